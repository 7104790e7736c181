use axum::{Json, extract::{Query, State}};
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::require_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::logs::model::{LogQuery, LogsResponse};
use crate::modules::logs::service::LogService;
use crate::modules::users::model::StaffRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// List audit entries with dashboard stats. SUPER_ADMIN only.
#[utoipa::path(
    get,
    path = "/api/logs",
    params(LogQuery),
    responses(
        (status = 200, description = "Audit entries and stats", body = LogsResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Audit"
)]
#[instrument(skip(state, principal))]
pub async fn get_logs(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Query(query): Query<LogQuery>,
) -> Result<Json<LogsResponse>, AppError> {
    require_any_role(&principal, &[StaffRole::SuperAdmin])?;
    let response = LogService::get_logs(&state.db, &query).await?;
    Ok(Json(response))
}
