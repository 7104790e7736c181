use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::require_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::config::model::{ConfigUpdateDto, GlobalConfig, PolicyCheckResponse};
use crate::modules::config::service::ConfigService;
use crate::modules::users::model::StaffRole;
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Read the global configuration, creating it with defaults on first access.
#[utoipa::path(
    get,
    path = "/api/config",
    responses(
        (status = 200, description = "Current configuration", body = GlobalConfig),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Configuration"
)]
#[instrument(skip(state, _principal))]
pub async fn get_config(
    State(state): State<AppState>,
    CurrentUser(_principal): CurrentUser,
) -> Result<Json<GlobalConfig>, AppError> {
    let config = ConfigService::get_or_init(&state.db).await?;
    Ok(Json(config))
}

/// Update the global configuration. SUPER_ADMIN only.
#[utoipa::path(
    patch,
    path = "/api/config",
    request_body = ConfigUpdateDto,
    responses(
        (status = 200, description = "Updated configuration", body = GlobalConfig),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Configuration"
)]
#[instrument(skip(state, principal))]
pub async fn update_config(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(dto): Json<ConfigUpdateDto>,
) -> Result<Json<GlobalConfig>, AppError> {
    require_any_role(&principal, &[StaffRole::SuperAdmin])?;
    let config = ConfigService::update(&state.db, dto, &principal).await?;
    Ok(Json(config))
}

/// Public probe the login pages use to decide whether to offer signup.
#[utoipa::path(
    get,
    path = "/api/config/check-policy",
    responses(
        (status = 200, description = "Signup policy", body = PolicyCheckResponse)
    ),
    tag = "Configuration"
)]
#[instrument(skip(state))]
pub async fn check_policy(
    State(state): State<AppState>,
) -> Result<Json<PolicyCheckResponse>, AppError> {
    let config = ConfigService::get_or_init(&state.db).await?;

    let response = if config.allow_public_signup {
        PolicyCheckResponse {
            allow_signup: true,
            reason: None,
        }
    } else {
        PolicyCheckResponse {
            allow_signup: false,
            reason: Some("Public signup is disabled".to_string()),
        }
    };

    Ok(Json(response))
}
