use std::collections::HashMap;

use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::role::validate_role_change;
use crate::modules::auth::model::Principal;
use crate::modules::logs::model::LogLevel;
use crate::modules::logs::service::LogService;
use crate::utils::errors::AppError;

use super::model::{StaffMember, StaffRole, UpdateRoleDto, UpdateSubrolesDto, User};

const USER_COLUMNS: &str =
    "id, external_subject_id, email, full_name, role, assigned_class_id, assigned_stream_id";

pub struct UserService;

impl UserService {
    #[instrument(skip(db))]
    pub async fn get_staff(db: &PgPool) -> Result<Vec<StaffMember>, AppError> {
        let users = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users ORDER BY full_name"
        ))
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let rows = sqlx::query_as::<_, (Uuid, String)>(
            "SELECT user_id, subrole_name FROM user_subroles ORDER BY subrole_name",
        )
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let mut subroles_by_user: HashMap<Uuid, Vec<String>> = HashMap::new();
        for (user_id, name) in rows {
            subroles_by_user.entry(user_id).or_default().push(name);
        }

        Ok(users
            .into_iter()
            .map(|u| StaffMember {
                subroles: subroles_by_user.remove(&u.id).unwrap_or_default(),
                id: u.id,
                full_name: u.full_name,
                email: u.email,
                role: u.role,
                external_subject_id: u.external_subject_id,
                assigned_class_id: u.assigned_class_id,
                assigned_stream_id: u.assigned_stream_id,
            })
            .collect())
    }

    /// Changes a user's role under the privilege-escalation rules.
    ///
    /// The target row is re-read `FOR UPDATE` inside the transaction that
    /// writes it, so the "never touch SUPER_ADMIN" rule is enforced against
    /// a fresh value rather than whatever the caller last saw.
    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn update_user_role(
        db: &PgPool,
        target_id: Uuid,
        dto: UpdateRoleDto,
        principal: &Principal,
    ) -> Result<User, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let target = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(target_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        validate_role_change(principal.role, target.role, dto.role)?;

        // Teacher and admin assignments carry a class/stream scope; anything
        // else clears it.
        let (class_id, stream_id) = match dto.role {
            StaffRole::Teacher | StaffRole::Admin => {
                (dto.assigned_class_id, dto.assigned_stream_id)
            }
            _ => (None, None),
        };

        let updated = sqlx::query_as::<_, User>(&format!(
            "UPDATE users SET role = $1, assigned_class_id = $2, assigned_stream_id = $3
             WHERE id = $4 RETURNING {USER_COLUMNS}"
        ))
        .bind(dto.role)
        .bind(class_id)
        .bind(stream_id)
        .bind(target_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        // Subroles belong to the admin category; leaving it drops them.
        if dto.role != StaffRole::Admin {
            sqlx::query("DELETE FROM user_subroles WHERE user_id = $1")
                .bind(target_id)
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Warning,
            "role update",
            &principal.email,
            &format!(
                "Changed role of {} from {} to {}",
                updated.email, target.role, updated.role
            ),
            Some(&updated.email),
        )
        .await;

        Ok(updated)
    }

    /// Replaces an admin's subrole set. SUPER_ADMIN only (enforced by the
    /// caller); the target must currently hold the admin role.
    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn update_subroles(
        db: &PgPool,
        target_id: Uuid,
        dto: UpdateSubrolesDto,
        principal: &Principal,
    ) -> Result<Vec<String>, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let target = sqlx::query_as::<_, User>(&format!(
            "SELECT {USER_COLUMNS} FROM users WHERE id = $1 FOR UPDATE"
        ))
        .bind(target_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("User not found")))?;

        if target.role != StaffRole::Admin {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Subroles can only be assigned to admin users"
            )));
        }

        sqlx::query("DELETE FROM user_subroles WHERE user_id = $1")
            .bind(target_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        let mut subroles: Vec<String> = dto
            .subroles
            .into_iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();
        subroles.sort();
        subroles.dedup();

        for name in &subroles {
            sqlx::query("INSERT INTO user_subroles (user_id, subrole_name) VALUES ($1, $2)")
                .bind(target_id)
                .bind(name)
                .execute(&mut *tx)
                .await
                .map_err(AppError::database)?;
        }

        tx.commit().await.map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Info,
            "subrole update",
            &principal.email,
            &format!("Set subroles of {} to [{}]", target.email, subroles.join(", ")),
            Some(&target.email),
        )
        .await;

        Ok(subroles)
    }
}
