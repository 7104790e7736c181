use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::config::identity::DEV_ADMIN_TOKEN;
use crate::modules::auth::model::Principal;
use crate::modules::auth::service::{AuthService, verify_assertion};
use crate::state::AppState;
use crate::utils::errors::AppError;

/// Extractor resolving the staff principal for the current request.
///
/// Verifies the bearer assertion, then runs identity reconciliation against
/// the local user store. The principal is rebuilt on every request; nothing
/// is cached between requests.
#[derive(Debug, Clone)]
pub struct CurrentUser(pub Principal);

impl FromRequestParts<AppState> for CurrentUser {
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let auth_header = parts
            .headers
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .ok_or_else(|| AppError::unauthorized("Missing authorization header".to_string()))?;

        let token = auth_header.strip_prefix("Bearer ").ok_or_else(|| {
            AppError::unauthorized("Invalid authorization header format".to_string())
        })?;

        if state.identity_config.dev_mode && token == DEV_ADMIN_TOKEN {
            let principal = AuthService::dev_principal(&state.db).await?;
            return Ok(CurrentUser(principal));
        }

        let assertion = verify_assertion(token, &state.identity_config)?;
        let principal = AuthService::resolve(&state.db, &assertion).await?;

        Ok(CurrentUser(principal))
    }
}
