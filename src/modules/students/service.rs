use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::modules::auth::model::Principal;
use crate::modules::circulation::model::BorrowStatus;
use crate::modules::logs::model::LogLevel;
use crate::modules::logs::service::LogService;
use crate::utils::errors::AppError;
use crate::utils::pagination::{Paginated, clamp_limit, clamp_skip};

use super::model::{CreateStudentDto, Student, StudentDetail, StudentQuery, UpdateStudentDto};

const STUDENT_COLUMNS: &str =
    "id, full_name, admission_number, activated, class_id, stream_id, is_cleared, cleared_at";

pub struct StudentService;

impl StudentService {
    #[instrument(skip(db))]
    pub async fn get_students(
        db: &PgPool,
        query: &StudentQuery,
    ) -> Result<Paginated<StudentDetail>, AppError> {
        let limit = clamp_limit(query.limit);
        let skip = clamp_skip(query.skip);
        let search = query.search.as_ref().map(|s| format!("%{}%", s));

        let filter = "($1::uuid IS NULL OR s.class_id = $1)
             AND ($2::uuid IS NULL OR s.stream_id = $2)
             AND ($3::text IS NULL OR s.full_name ILIKE $3 OR s.admission_number ILIKE $3)";

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM students s WHERE {filter}"
        ))
        .bind(query.class_id)
        .bind(query.stream_id)
        .bind(&search)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        let items = sqlx::query_as::<_, StudentDetail>(&format!(
            "SELECT s.id, s.full_name, s.admission_number, s.activated,
                    s.class_id, s.stream_id, c.name AS class_name, st.name AS stream_name,
                    s.is_cleared, s.cleared_at
             FROM students s
             LEFT JOIN classes c ON c.id = s.class_id
             LEFT JOIN streams st ON st.id = s.stream_id
             WHERE {filter}
             ORDER BY s.full_name
             OFFSET $4 LIMIT $5"
        ))
        .bind(query.class_id)
        .bind(query.stream_id)
        .bind(&search)
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(Paginated { total, items })
    }

    #[instrument(skip(db))]
    pub async fn create_student(db: &PgPool, dto: CreateStudentDto) -> Result<Student, AppError> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM students WHERE admission_number = $1")
                .bind(&dto.admission_number)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!(
                "Admission number already exists"
            )));
        }

        sqlx::query_as::<_, Student>(&format!(
            "INSERT INTO students (full_name, admission_number, class_id, stream_id)
             VALUES ($1, $2, $3, $4)
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(&dto.full_name)
        .bind(&dto.admission_number)
        .bind(dto.class_id)
        .bind(dto.stream_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn update_student(
        db: &PgPool,
        student_id: Uuid,
        dto: UpdateStudentDto,
    ) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "UPDATE students
             SET full_name = COALESCE($1, full_name),
                 class_id = COALESCE($2, class_id),
                 stream_id = COALESCE($3, stream_id)
             WHERE id = $4
             RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(dto.full_name)
        .bind(dto.class_id)
        .bind(dto.stream_id)
        .bind(student_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }

    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn delete_student(
        db: &PgPool,
        student_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let student = Self::get_student(db, student_id).await?;

        sqlx::query("DELETE FROM students WHERE id = $1")
            .bind(student_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Warning,
            "student deletion",
            &principal.email,
            &format!("Deleted student: {}", student.full_name),
            Some(&student.admission_number),
        )
        .await;

        Ok(())
    }

    /// Marks a student as cleared for leaving. Refused while any borrow
    /// record is still outstanding.
    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn clear_student(
        db: &PgPool,
        student_id: Uuid,
        principal: &Principal,
    ) -> Result<Student, AppError> {
        let student = Self::get_student(db, student_id).await?;

        let outstanding: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM borrow_records WHERE student_id = $1 AND status = $2",
        )
        .bind(student_id)
        .bind(BorrowStatus::Borrowed)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        if outstanding > 0 {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Student has outstanding books. Return all books before clearance."
            )));
        }

        let cleared = sqlx::query_as::<_, Student>(&format!(
            "UPDATE students SET is_cleared = TRUE, cleared_at = now()
             WHERE id = $1 RETURNING {STUDENT_COLUMNS}"
        ))
        .bind(student_id)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Info,
            "student clearance",
            &principal.email,
            &format!("Cleared student: {}", cleared.full_name),
            Some(&cleared.admission_number),
        )
        .await;

        Ok(cleared)
    }

    /// Administrative reset: clears the password hash and activation flag so
    /// the student can onboard again. Outstanding portal sessions die with
    /// this because the portal extractor re-checks activation on every
    /// request.
    #[instrument(skip(db, principal), fields(caller = %principal.email))]
    pub async fn reset_student_account(
        db: &PgPool,
        student_id: Uuid,
        principal: &Principal,
    ) -> Result<(), AppError> {
        let student = Self::get_student(db, student_id).await?;

        sqlx::query("UPDATE students SET activated = FALSE, password_hash = NULL WHERE id = $1")
            .bind(student_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        LogService::audit(
            db,
            LogLevel::Info,
            "student account reset",
            &principal.email,
            &format!("Reset account for student: {}", student.full_name),
            Some(&student.admission_number),
        )
        .await;

        Ok(())
    }

    async fn get_student(db: &PgPool, student_id: Uuid) -> Result<Student, AppError> {
        sqlx::query_as::<_, Student>(&format!(
            "SELECT {STUDENT_COLUMNS} FROM students WHERE id = $1"
        ))
        .bind(student_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))
    }
}
