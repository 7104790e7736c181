use chrono::{Duration, Utc};
use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::{Paginated, clamp_limit, clamp_skip};

use super::model::{
    BorrowRecord, BorrowRequestDto, BorrowStatus, HistoryItem, HistoryQuery, HistoryRow,
    LOAN_PERIOD_DAYS,
};

const RECORD_COLUMNS: &str = "id, book_id, student_id, class_id, stream_id, borrow_date, \
                              due_date, return_date, status, copy_label";

pub struct CirculationService;

impl CirculationService {
    /// Lends one copy of a book to a student.
    ///
    /// The book row is locked for the duration of the transaction, so
    /// concurrent borrows of the same title serialize and the capacity check
    /// holds; record insertion and the counter increment commit together or
    /// not at all.
    #[instrument(skip(db))]
    pub async fn borrow_book(
        db: &PgPool,
        dto: &BorrowRequestDto,
    ) -> Result<BorrowRecord, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let book: (i32, i32) = sqlx::query_as(
            "SELECT total_copies, borrowed_copies FROM books WHERE id = $1 FOR UPDATE",
        )
        .bind(dto.book_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Book not found")))?;

        let (total_copies, borrowed_copies) = book;
        if borrowed_copies >= total_copies {
            return Err(AppError::bad_request(anyhow::anyhow!(
                "Book capacity exhausted (out of stock)"
            )));
        }

        let student: (Option<Uuid>, Option<Uuid>) =
            sqlx::query_as("SELECT class_id, stream_id FROM students WHERE id = $1")
                .bind(dto.student_id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(AppError::database)?
                .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Student not found")))?;

        let (class_id, stream_id) = student;
        let now = Utc::now();
        let due_date = now + Duration::days(LOAN_PERIOD_DAYS);

        let record = sqlx::query_as::<_, BorrowRecord>(&format!(
            "INSERT INTO borrow_records
                 (book_id, student_id, class_id, stream_id, borrow_date, due_date, status, copy_label)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {RECORD_COLUMNS}"
        ))
        .bind(dto.book_id)
        .bind(dto.student_id)
        .bind(class_id)
        .bind(stream_id)
        .bind(now)
        .bind(due_date)
        .bind(BorrowStatus::Borrowed)
        .bind(&dto.copy_label)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        sqlx::query("UPDATE books SET borrowed_copies = borrowed_copies + 1 WHERE id = $1")
            .bind(dto.book_id)
            .execute(&mut *tx)
            .await
            .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(record)
    }

    /// Completes a circulation transaction.
    ///
    /// The record row is locked so a doubled return observes the committed
    /// `returned` status and is rejected; the counter is decremented exactly
    /// once, clamped at zero against historical drift.
    #[instrument(skip(db))]
    pub async fn return_book(db: &PgPool, record_id: Uuid) -> Result<BorrowRecord, AppError> {
        let mut tx = db.begin().await.map_err(AppError::database)?;

        let record = sqlx::query_as::<_, BorrowRecord>(&format!(
            "SELECT {RECORD_COLUMNS} FROM borrow_records WHERE id = $1 FOR UPDATE"
        ))
        .bind(record_id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Transaction not found")))?;

        if record.status == BorrowStatus::Returned {
            return Err(AppError::conflict(anyhow::anyhow!("Book already returned")));
        }

        let updated = sqlx::query_as::<_, BorrowRecord>(&format!(
            "UPDATE borrow_records SET status = $1, return_date = $2
             WHERE id = $3 RETURNING {RECORD_COLUMNS}"
        ))
        .bind(BorrowStatus::Returned)
        .bind(Utc::now())
        .bind(record_id)
        .fetch_one(&mut *tx)
        .await
        .map_err(AppError::database)?;

        sqlx::query(
            "UPDATE books SET borrowed_copies = GREATEST(borrowed_copies - 1, 0) WHERE id = $1",
        )
        .bind(record.book_id)
        .execute(&mut *tx)
        .await
        .map_err(AppError::database)?;

        tx.commit().await.map_err(AppError::database)?;

        Ok(updated)
    }

    /// Read-only history projection; overdue is computed here, not stored.
    #[instrument(skip(db))]
    pub async fn get_borrow_history(
        db: &PgPool,
        query: &HistoryQuery,
    ) -> Result<Paginated<HistoryItem>, AppError> {
        let limit = clamp_limit(query.limit);
        let skip = clamp_skip(query.skip);
        let search = query.search.as_ref().map(|s| format!("%{}%", s));

        let filter = "($1::text IS NULL OR b.title ILIKE $1
                       OR s.full_name ILIKE $1 OR s.admission_number ILIKE $1)";

        let total: i64 = sqlx::query_scalar(&format!(
            "SELECT COUNT(*) FROM borrow_records r
             LEFT JOIN books b ON b.id = r.book_id
             LEFT JOIN students s ON s.id = r.student_id
             WHERE {filter}"
        ))
        .bind(&search)
        .fetch_one(db)
        .await
        .map_err(AppError::database)?;

        let rows = sqlx::query_as::<_, HistoryRow>(&format!(
            "SELECT r.id, b.title AS book_title, s.full_name AS student_name,
                    r.class_id, r.stream_id, c.name AS class_name, st.name AS stream_name,
                    r.borrow_date, r.due_date, r.return_date, r.status, r.copy_label
             FROM borrow_records r
             LEFT JOIN books b ON b.id = r.book_id
             LEFT JOIN students s ON s.id = r.student_id
             LEFT JOIN classes c ON c.id = r.class_id
             LEFT JOIN streams st ON st.id = r.stream_id
             WHERE {filter}
             ORDER BY r.borrow_date DESC
             OFFSET $2 LIMIT $3"
        ))
        .bind(&search)
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        let now = Utc::now();
        let items = rows
            .into_iter()
            .map(|row| HistoryItem::from_row(row, now))
            .collect();

        Ok(Paginated { total, items })
    }
}
