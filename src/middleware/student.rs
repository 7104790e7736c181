use axum::{
    extract::FromRequestParts,
    http::{header, request::Parts},
};

use crate::modules::students::model::Student;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::jwt::parse_student_token;

/// Extractor authenticating a student portal session.
///
/// The session token carries only the student id; activation is re-checked
/// against the live row so an administrative reset invalidates outstanding
/// tokens immediately, expiry notwithstanding.
#[derive(Debug, Clone)]
pub struct PortalStudent(pub Student);

impl FromRequestParts<AppState> for PortalStudent {
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

        let student_id = parse_student_token(token, &state.student_jwt_config)?;

        let student = sqlx::query_as::<_, Student>(
            "SELECT id, full_name, admission_number, activated, class_id, stream_id, is_cleared, cleared_at
             FROM students WHERE id = $1",
        )
        .bind(student_id)
        .fetch_optional(&state.db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::unauthorized("Could not validate credentials".to_string()))?;

        if !student.activated {
            return Err(AppError::forbidden(
                "Account not activated. Please complete onboarding.".to_string(),
            ));
        }

        Ok(PortalStudent(student))
    }
}
