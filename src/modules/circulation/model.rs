use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

/// Days a borrowed item may be held before it reads as overdue.
pub const LOAN_PERIOD_DAYS: i64 = 14;

/// Persisted lifecycle states of a borrow record.
///
/// `Overdue` is never written by this engine: it is derived at read time
/// from `due_date`. `Missing` is written by a separate administrative
/// workflow; circulation only refuses to double-return such records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum BorrowStatus {
    Borrowed,
    Returned,
    Overdue,
    Missing,
}

/// The reporting status of a record at a given instant.
pub fn effective_status(
    status: BorrowStatus,
    due_date: DateTime<Utc>,
    now: DateTime<Utc>,
) -> BorrowStatus {
    if status == BorrowStatus::Borrowed && due_date < now {
        BorrowStatus::Overdue
    } else {
        status
    }
}

/// A circulation transaction.
///
/// `class_id`/`stream_id` are a historical snapshot of the student's
/// placement at borrow time, not a live reference.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct BorrowRecord {
    pub id: Uuid,
    pub book_id: Uuid,
    pub student_id: Uuid,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
    pub copy_label: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct BorrowRequestDto {
    pub book_id: Uuid,
    pub student_id: Uuid,
    pub copy_label: Option<String>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct HistoryQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

/// Row shape fetched for the history projection.
#[derive(Debug, FromRow)]
pub struct HistoryRow {
    pub id: Uuid,
    pub book_title: Option<String>,
    pub student_name: Option<String>,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
    pub class_name: Option<String>,
    pub stream_name: Option<String>,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
    pub copy_label: Option<String>,
}

/// History listing entry with display labels and the derived status.
#[derive(Debug, Serialize, ToSchema)]
pub struct HistoryItem {
    pub id: Uuid,
    pub book: String,
    pub student: String,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
    /// Snapshot class label, e.g. "Form 1A"; "N/A" when unplaced.
    pub class: String,
    pub borrow_date: DateTime<Utc>,
    pub due_date: DateTime<Utc>,
    pub return_date: Option<DateTime<Utc>>,
    pub status: BorrowStatus,
    pub copy_label: Option<String>,
}

impl HistoryItem {
    pub fn from_row(row: HistoryRow, now: DateTime<Utc>) -> Self {
        let class = match (&row.class_name, &row.stream_name) {
            (Some(class), Some(stream)) => format!("{class}{stream}"),
            (Some(class), None) => class.clone(),
            _ => "N/A".to_string(),
        };

        Self {
            id: row.id,
            book: row.book_title.unwrap_or_else(|| "Unknown title".to_string()),
            student: row
                .student_name
                .unwrap_or_else(|| "Unknown student".to_string()),
            class_id: row.class_id,
            stream_id: row.stream_id,
            class,
            borrow_date: row.borrow_date,
            due_date: row.due_date,
            return_date: row.return_date,
            status: effective_status(row.status, row.due_date, now),
            copy_label: row.copy_label,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    #[test]
    fn test_borrowed_past_due_reads_as_overdue() {
        let now = Utc::now();
        assert_eq!(
            effective_status(BorrowStatus::Borrowed, now - Duration::days(1), now),
            BorrowStatus::Overdue
        );
    }

    #[test]
    fn test_borrowed_within_due_stays_borrowed() {
        let now = Utc::now();
        assert_eq!(
            effective_status(BorrowStatus::Borrowed, now + Duration::days(3), now),
            BorrowStatus::Borrowed
        );
    }

    #[test]
    fn test_returned_and_missing_never_flip_to_overdue() {
        let now = Utc::now();
        let past = now - Duration::days(30);
        assert_eq!(
            effective_status(BorrowStatus::Returned, past, now),
            BorrowStatus::Returned
        );
        assert_eq!(
            effective_status(BorrowStatus::Missing, past, now),
            BorrowStatus::Missing
        );
    }
}
