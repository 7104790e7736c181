use sqlx::PgPool;
use tracing::{error, instrument};

use crate::utils::errors::AppError;

use super::model::{LogLevel, LogQuery, LogStats, LogsResponse, SystemLog};

pub struct LogService;

impl LogService {
    /// Appends an audit entry. Callers invoke this after the main effect has
    /// committed; use [`LogService::audit`] unless the caller wants the error.
    pub async fn record(
        db: &PgPool,
        level: LogLevel,
        action: &str,
        actor_email: &str,
        details: &str,
        target: Option<&str>,
    ) -> Result<(), AppError> {
        sqlx::query(
            "INSERT INTO system_logs (level, action, actor_email, target, details)
             VALUES ($1, $2, $3, $4, $5)",
        )
        .bind(level)
        .bind(action)
        .bind(actor_email)
        .bind(target)
        .bind(details)
        .execute(db)
        .await
        .map_err(AppError::database)?;

        Ok(())
    }

    /// Best-effort audit append. A lost audit entry is tolerable; a business
    /// transaction failed because logging failed is not, so errors are traced
    /// and swallowed here.
    pub async fn audit(
        db: &PgPool,
        level: LogLevel,
        action: &str,
        actor_email: &str,
        details: &str,
        target: Option<&str>,
    ) {
        if let Err(err) = Self::record(db, level, action, actor_email, details, target).await {
            error!(action, error = %err.error, "failed to append audit log entry");
        }
    }

    #[instrument(skip(db))]
    pub async fn get_logs(db: &PgPool, query: &LogQuery) -> Result<LogsResponse, AppError> {
        let limit = query.limit.unwrap_or(100).clamp(1, 1000);

        let mut sql = String::from(
            "SELECT id, level, action, actor_email, target, details, timestamp
             FROM system_logs WHERE 1=1",
        );
        if query.level.is_some() {
            sql.push_str(" AND level = $1");
        }
        if query.search.is_some() {
            let idx = if query.level.is_some() { 2 } else { 1 };
            sql.push_str(&format!(
                " AND (action ILIKE ${idx} OR actor_email ILIKE ${idx} OR target ILIKE ${idx} OR details ILIKE ${idx})",
            ));
        }
        let limit_idx =
            1 + query.level.is_some() as usize + query.search.is_some() as usize;
        sql.push_str(&format!(" ORDER BY timestamp DESC LIMIT ${limit_idx}"));

        let mut stmt = sqlx::query_as::<_, SystemLog>(&sql);
        if let Some(level) = query.level {
            stmt = stmt.bind(level);
        }
        if let Some(search) = &query.search {
            stmt = stmt.bind(format!("%{}%", search));
        }
        let items = stmt.bind(limit).fetch_all(db).await.map_err(AppError::database)?;

        let total_events: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM system_logs")
            .fetch_one(db)
            .await
            .map_err(AppError::database)?;
        let security_alerts: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM system_logs WHERE level = $1")
                .bind(LogLevel::Warning)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;
        let critical_failures: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM system_logs WHERE level = $1")
                .bind(LogLevel::Error)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        Ok(LogsResponse {
            items,
            stats: LogStats {
                total_events,
                security_alerts,
                critical_failures,
            },
        })
    }
}
