use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::Principal;
use crate::modules::logs::model::LogLevel;
use crate::modules::logs::service::LogService;
use crate::utils::errors::AppError;

use super::model::{CreateStreamDto, Stream, StreamDetail, StreamQuery};

pub struct StreamService;

impl StreamService {
    #[instrument(skip(db))]
    pub async fn get_streams(
        db: &PgPool,
        query: &StreamQuery,
    ) -> Result<Vec<StreamDetail>, AppError> {
        let sql = "SELECT s.id, s.name, s.class_id, c.name AS class_name,
                          c.name || ' ' || s.name AS full_name
                   FROM streams s
                   JOIN classes c ON c.id = s.class_id
                   WHERE ($1::uuid IS NULL OR s.class_id = $1)
                   ORDER BY c.name, s.name";

        sqlx::query_as::<_, StreamDetail>(sql)
            .bind(query.class_id)
            .fetch_all(db)
            .await
            .map_err(AppError::database)
    }

    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn create_stream(
        db: &PgPool,
        dto: CreateStreamDto,
        principal: &Principal,
    ) -> Result<Stream, AppError> {
        let class_name: String = sqlx::query_scalar("SELECT name FROM classes WHERE id = $1")
            .bind(dto.class_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        let stream = sqlx::query_as::<_, Stream>(
            "INSERT INTO streams (name, class_id) VALUES ($1, $2)
             RETURNING id, name, class_id",
        )
        .bind(&dto.name)
        .bind(dto.class_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        let label = format!("{}{}", class_name, stream.name);
        LogService::audit(
            db,
            LogLevel::Info,
            "stream creation",
            &principal.email,
            &format!("Created new stream: {}", label),
            Some(&label),
        )
        .await;

        Ok(stream)
    }

    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn delete_stream(
        db: &PgPool,
        stream_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let label: String = sqlx::query_scalar(
            "SELECT c.name || s.name FROM streams s
             JOIN classes c ON c.id = s.class_id
             WHERE s.id = $1",
        )
        .bind(stream_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Stream not found")))?;

        let student_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE stream_id = $1")
                .bind(stream_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;
        if student_count > 0 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Cannot delete stream that has students assigned to it."
            )));
        }

        sqlx::query("DELETE FROM streams WHERE id = $1")
            .bind(stream_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Warning,
            "stream deletion",
            &principal.email,
            &format!("Deleted stream: {}", label),
            Some(&label),
        )
        .await;

        Ok(())
    }
}
