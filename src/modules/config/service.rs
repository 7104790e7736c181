use sqlx::PgPool;
use tracing::instrument;

use crate::modules::auth::model::Principal;
use crate::modules::logs::model::LogLevel;
use crate::modules::logs::service::LogService;
use crate::utils::errors::AppError;

use super::model::{ConfigUpdateDto, GlobalConfig};

pub struct ConfigService;

impl ConfigService {
    /// Reads the singleton, creating it with defaults on first access.
    ///
    /// The upsert keeps concurrent first reads convergent: both writers
    /// target id = 1 and the loser's insert becomes a no-op.
    #[instrument(skip(db))]
    pub async fn get_or_init(db: &PgPool) -> Result<GlobalConfig, AppError> {
        let existing = sqlx::query_as::<_, GlobalConfig>(
            "SELECT id, allow_public_signup, updated_at FROM global_config LIMIT 1",
        )
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?;

        if let Some(config) = existing {
            return Ok(config);
        }

        sqlx::query_as::<_, GlobalConfig>(
            "INSERT INTO global_config (id, allow_public_signup) VALUES (1, TRUE)
             ON CONFLICT (id) DO UPDATE SET id = global_config.id
             RETURNING id, allow_public_signup, updated_at",
        )
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn update(
        db: &PgPool,
        dto: ConfigUpdateDto,
        principal: &Principal,
    ) -> Result<GlobalConfig, AppError> {
        let current = Self::get_or_init(db).await?;

        let allow_public_signup = dto.allow_public_signup.unwrap_or(current.allow_public_signup);

        let updated = sqlx::query_as::<_, GlobalConfig>(
            "UPDATE global_config SET allow_public_signup = $1, updated_at = now()
             WHERE id = $2
             RETURNING id, allow_public_signup, updated_at",
        )
        .bind(allow_public_signup)
        .bind(current.id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Warning,
            "config update",
            &principal.email,
            &format!(
                "Updated global configuration: public_signup={}",
                updated.allow_public_signup
            ),
            None,
        )
        .await;

        Ok(updated)
    }
}
