use jsonwebtoken::{DecodingKey, Validation, decode};
use sqlx::PgPool;
use tracing::{info, instrument, warn};

use crate::config::identity::IdentityConfig;
use crate::modules::users::model::{StaffRole, User};
use crate::utils::errors::AppError;

use super::model::{AssertionClaims, ExternalAssertion, Principal};

/// Verifies a provider-signed assertion token and extracts the usable
/// identity fields. Rejects before any database access when the token
/// carries no subject id or email.
pub fn verify_assertion(
    token: &str,
    config: &IdentityConfig,
) -> Result<ExternalAssertion, AppError> {
    let claims = decode::<AssertionClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| AppError::unauthorized(format!("Authentication failed: {}", e)))?;

    let subject_id = claims
        .sub
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid token payload".to_string()))?;
    let email = claims
        .email
        .filter(|s| !s.is_empty())
        .ok_or_else(|| AppError::unauthorized("Invalid token payload".to_string()))?;

    let full_name = format!(
        "{} {}",
        claims.first_name.unwrap_or_default(),
        claims.last_name.unwrap_or_default()
    )
    .trim()
    .to_string();

    Ok(ExternalAssertion {
        subject_id,
        email,
        full_name,
    })
}

pub struct AuthService;

impl AuthService {
    /// Maps a verified external assertion onto the local user record,
    /// creating or linking it as needed, and returns the request Principal.
    ///
    /// Role is always read back from the local record: a provider-side
    /// metadata change can neither escalate nor revoke privilege here.
    #[instrument(skip(db, assertion), fields(subject = %assertion.subject_id))]
    pub async fn resolve(db: &PgPool, assertion: &ExternalAssertion) -> Result<Principal, AppError> {
        let mut user = Self::find_by_subject(db, &assertion.subject_id).await?;

        // Accounts provisioned before their first login have no subject id
        // yet; link it onto the record found by email.
        if user.is_none() {
            if let Some(existing) = Self::find_by_email(db, &assertion.email).await? {
                info!(user_id = %existing.id, "linking external subject to existing account");
                user = Some(Self::link_subject(db, &existing, &assertion.subject_id).await?);
            }
        }

        let user = match user {
            Some(user) => user,
            None => Self::create_user(db, assertion).await?,
        };

        let user = Self::sync_profile(db, user, assertion).await?;
        let subroles = Self::load_subroles(db, &user).await?;

        Ok(Principal {
            user_id: user.id,
            external_subject_id: user.external_subject_id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            subroles,
            assigned_class_id: user.assigned_class_id,
            assigned_stream_id: user.assigned_stream_id,
        })
    }

    /// Builds a Principal for the development bypass: impersonates the
    /// provisioned SUPER_ADMIN without touching the identity provider.
    pub async fn dev_principal(db: &PgPool) -> Result<Principal, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, external_subject_id, email, full_name, role, assigned_class_id, assigned_stream_id
             FROM users WHERE role = $1 LIMIT 1",
        )
        .bind(StaffRole::SuperAdmin)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| {
            AppError::unauthorized("Dev bypass requires a provisioned SUPER_ADMIN".to_string())
        })?;

        let subroles = Self::load_subroles(db, &user).await?;

        Ok(Principal {
            user_id: user.id,
            external_subject_id: user.external_subject_id,
            email: user.email,
            full_name: user.full_name,
            role: user.role,
            subroles,
            assigned_class_id: user.assigned_class_id,
            assigned_stream_id: user.assigned_stream_id,
        })
    }

    async fn find_by_subject(db: &PgPool, subject_id: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, external_subject_id, email, full_name, role, assigned_class_id, assigned_stream_id
             FROM users WHERE external_subject_id = $1",
        )
        .bind(subject_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)
    }

    async fn find_by_email(db: &PgPool, email: &str) -> Result<Option<User>, AppError> {
        sqlx::query_as::<_, User>(
            "SELECT id, external_subject_id, email, full_name, role, assigned_class_id, assigned_stream_id
             FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)
    }

    async fn link_subject(db: &PgPool, user: &User, subject_id: &str) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            "UPDATE users SET external_subject_id = $1 WHERE id = $2
             RETURNING id, external_subject_id, email, full_name, role, assigned_class_id, assigned_stream_id",
        )
        .bind(subject_id)
        .bind(user.id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    /// First-time creation. The signup policy and the first-user role
    /// decision are evaluated inside one transaction; the unique constraints
    /// on email and subject id resolve concurrent duplicate creation, and the
    /// loser of that race adopts the winner's row by re-querying.
    async fn create_user(db: &PgPool, assertion: &ExternalAssertion) -> Result<User, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let allow_public_signup: Option<bool> =
            sqlx::query_scalar("SELECT allow_public_signup FROM global_config LIMIT 1")
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::database)?;

        let user_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
            .fetch_one(&mut *tx)
            .await
            .map_err(AppError::database)?;

        // The very first account is always admitted as SUPER_ADMIN, even
        // with signup disabled; otherwise the gate applies.
        if !allow_public_signup.unwrap_or(true) && user_count > 0 {
            warn!(email = %assertion.email, "registration blocked by signup policy");
            return Err(AppError::forbidden(
                "Registration is currently disabled.".to_string(),
            ));
        }

        let role = if user_count == 0 {
            StaffRole::SuperAdmin
        } else {
            StaffRole::Unassigned
        };

        let inserted = sqlx::query_as::<_, User>(
            "INSERT INTO users (external_subject_id, email, full_name, role)
             VALUES ($1, $2, $3, $4)
             RETURNING id, external_subject_id, email, full_name, role, assigned_class_id, assigned_stream_id",
        )
        .bind(&assertion.subject_id)
        .bind(&assertion.email)
        .bind(&assertion.full_name)
        .bind(role)
        .fetch_one(&mut *tx)
        .await;

        match inserted {
            Ok(user) => {
                tx.commit().await.map_err(AppError::database)?;
                info!(user_id = %user.id, role = %user.role, "created user with permanent role");
                Ok(user)
            }
            Err(err) => {
                // Lost a creation race: roll back and re-resolve by email
                // instead of assuming this process won.
                drop(tx);
                warn!(email = %assertion.email, error = %err, "user creation conflicted, re-resolving");
                Self::find_by_email(db, &assertion.email)
                    .await?
                    .ok_or_else(|| {
                        AppError::database(anyhow::anyhow!("User synchronization failed: {}", err))
                    })
            }
        }
    }

    /// Keeps mutable profile fields fresh from the provider. Never touches
    /// role, subroles, or the class/stream assignment.
    async fn sync_profile(
        db: &PgPool,
        user: User,
        assertion: &ExternalAssertion,
    ) -> Result<User, AppError> {
        let name_changed = !assertion.full_name.is_empty() && user.full_name != assertion.full_name;
        let email_changed = !assertion.email.is_empty() && user.email != assertion.email;

        if !name_changed && !email_changed {
            return Ok(user);
        }

        let full_name = if name_changed {
            &assertion.full_name
        } else {
            &user.full_name
        };
        let email = if email_changed {
            &assertion.email
        } else {
            &user.email
        };

        sqlx::query_as::<_, User>(
            "UPDATE users SET full_name = $1, email = $2 WHERE id = $3
             RETURNING id, external_subject_id, email, full_name, role, assigned_class_id, assigned_stream_id",
        )
        .bind(full_name)
        .bind(email)
        .bind(user.id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    async fn load_subroles(db: &PgPool, user: &User) -> Result<Vec<String>, AppError> {
        sqlx::query_scalar::<_, String>(
            "SELECT subrole_name FROM user_subroles WHERE user_id = $1 ORDER BY subrole_name",
        )
        .bind(user.id)
        .fetch_all(db)
        .await
        .map_err(AppError::database)
    }
}
