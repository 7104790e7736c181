use axum::Json;
use utoipa::ToSchema;

use crate::middleware::auth::CurrentUser;
use crate::modules::auth::model::Principal;
use crate::utils::errors::AppError;

#[derive(serde::Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}

/// Return the freshly reconciled principal for the calling identity.
///
/// The dashboard calls this after login to learn the locally authoritative
/// role and subroles; reconciliation itself already ran in the extractor.
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Resolved principal", body = Principal),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Registration disabled", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Authentication"
)]
pub async fn get_me(CurrentUser(principal): CurrentUser) -> Result<Json<Principal>, AppError> {
    Ok(Json(principal))
}
