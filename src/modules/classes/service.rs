use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::Principal;
use crate::modules::logs::model::LogLevel;
use crate::modules::logs::service::LogService;
use crate::utils::errors::AppError;

use super::model::{Class, ClassOverview, CreateClassDto, StreamSummary};

pub struct ClassService;

impl ClassService {
    #[instrument(skip(db))]
    pub async fn get_classes(db: &PgPool) -> Result<Vec<ClassOverview>, AppError> {
        let classes = sqlx::query_as::<_, Class>("SELECT id, name FROM classes ORDER BY name")
            .fetch_all(db)
            .await
            .map_err(AppError::database)?;

        let mut result = Vec::with_capacity(classes.len());
        for class in classes {
            let student_count: i64 =
                sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE class_id = $1")
                    .bind(class.id)
                    .fetch_one(db)
                    .await
                    .map_err(AppError::database)?;

            let streams = sqlx::query_as::<_, (Uuid, String, i64)>(
                "SELECT s.id, s.name, COUNT(st.id)
                 FROM streams s
                 LEFT JOIN students st ON st.stream_id = s.id
                 WHERE s.class_id = $1
                 GROUP BY s.id, s.name
                 ORDER BY s.name",
            )
            .bind(class.id)
            .fetch_all(db)
            .await
            .map_err(AppError::database)?
            .into_iter()
            .map(|(id, name, count)| StreamSummary {
                id,
                full_name: format!("{}{}", class.name, name),
                name,
                count,
            })
            .collect();

            result.push(ClassOverview {
                id: class.id,
                name: class.name,
                student_count,
                streams,
            });
        }

        Ok(result)
    }

    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn create_class(
        db: &PgPool,
        dto: CreateClassDto,
        principal: &Principal,
    ) -> Result<Class, AppError> {
        let existing: Option<Uuid> = sqlx::query_scalar("SELECT id FROM classes WHERE name = $1")
            .bind(&dto.name)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!("Class name already exists")));
        }

        let class = sqlx::query_as::<_, Class>(
            "INSERT INTO classes (name) VALUES ($1) RETURNING id, name",
        )
        .bind(&dto.name)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Info,
            "class creation",
            &principal.email,
            &format!("Created new class: {}", class.name),
            Some(&class.name),
        )
        .await;

        Ok(class)
    }

    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn delete_class(
        db: &PgPool,
        class_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let class = sqlx::query_as::<_, Class>("SELECT id, name FROM classes WHERE id = $1")
            .bind(class_id)
            .fetch_optional(db)
            .await
            .map_err(AppError::database)?
            .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Class not found")))?;

        let student_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM students WHERE class_id = $1")
                .bind(class_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;
        if student_count > 0 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Cannot delete class that has students assigned to it."
            )));
        }

        let stream_count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM streams WHERE class_id = $1")
                .bind(class_id)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;
        if stream_count > 0 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Cannot delete class that has streams associated with it. Delete streams first."
            )));
        }

        sqlx::query("DELETE FROM classes WHERE id = $1")
            .bind(class_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Warning,
            "class deletion",
            &principal.email,
            &format!("Deleted class: {}", class.name),
            Some(&class.name),
        )
        .await;

        Ok(())
    }
}
