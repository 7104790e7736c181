use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::config::jwt::StudentJwtConfig;
use crate::utils::errors::AppError;
use crate::utils::jwt::create_student_token;
use crate::utils::password::{hash_password, verify_password};

use super::model::TokenResponse;

/// Single credentials error for the login path. Missing accounts and wrong
/// passwords are indistinguishable to the caller.
fn invalid_credentials() -> AppError {
    AppError::unauthorized("Incorrect admission number or password".to_string())
}

pub struct StudentAuthService;

impl StudentAuthService {
    /// Onboarding step 1: confirm the admission number maps to a student
    /// that has not yet activated, returning the display name.
    #[instrument(skip(db))]
    pub async fn verify_onboarding(
        db: &PgPool,
        admission_number: &str,
    ) -> Result<String, AppError> {
        let row = sqlx::query_as::<_, (String, bool)>(
            "SELECT full_name, activated FROM students WHERE admission_number = $1",
        )
        .bind(admission_number)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| {
            AppError::not_found(anyhow::anyhow!(
                "Student not found with this admission number."
            ))
        })?;

        let (full_name, activated) = row;
        if activated {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Account already activated. Please login instead."
            )));
        }

        Ok(full_name)
    }

    /// Onboarding step 2: set the password and activate, exactly once.
    ///
    /// The guarded UPDATE makes concurrent activations race-safe: only one
    /// writer flips `activated`, the other observes zero rows and fails with
    /// the same already-activated conflict.
    #[instrument(skip(db, new_password, config))]
    pub async fn activate(
        db: &PgPool,
        admission_number: &str,
        new_password: &str,
        config: &StudentJwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let row = sqlx::query_as::<_, (Uuid, bool)>(
            "SELECT id, activated FROM students WHERE admission_number = $1",
        )
        .bind(admission_number)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found.")))?;

        let (student_id, activated) = row;
        if activated {
            return Err(AppError::conflict(anyhow::anyhow!("Account already activated.")));
        }

        let password_hash = hash_password(new_password)?;

        let updated = sqlx::query(
            "UPDATE students SET password_hash = $1, activated = TRUE
             WHERE id = $2 AND activated = FALSE",
        )
        .bind(&password_hash)
        .bind(student_id)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        if updated.rows_affected() == 0 {
            return Err(AppError::conflict(anyhow::anyhow!("Account already activated.")));
        }

        let access_token = create_student_token(student_id, config)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }

    #[instrument(skip(db, password, config))]
    pub async fn login(
        db: &PgPool,
        admission_number: &str,
        password: &str,
        config: &StudentJwtConfig,
    ) -> Result<TokenResponse, AppError> {
        let row = sqlx::query_as::<_, (Uuid, Option<String>, bool)>(
            "SELECT id, password_hash, activated FROM students WHERE admission_number = $1",
        )
        .bind(admission_number)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(invalid_credentials)?;

        let (student_id, password_hash, activated) = row;

        // One error shape for missing account, unactivated account, and hash
        // mismatch; the onboarding flow is where activation state is surfaced.
        if !activated {
            return Err(invalid_credentials());
        }

        let password_hash = password_hash.ok_or_else(invalid_credentials)?;
        if !verify_password(password, &password_hash)? {
            return Err(invalid_credentials());
        }

        let access_token = create_student_token(student_id, config)?;
        Ok(TokenResponse {
            access_token,
            token_type: "bearer".to_string(),
        })
    }
}
