use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A catalog entry for a physical title.
///
/// Invariant: `0 <= borrowed_copies <= total_copies`; the circulation engine
/// is the only writer of `borrowed_copies`.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Book {
    pub id: Uuid,
    pub catalog_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub subject: String,
    pub isbn: Option<String>,
    pub total_copies: i32,
    pub borrowed_copies: i32,
}

impl Book {
    pub fn available(&self) -> bool {
        self.total_copies > self.borrowed_copies
    }
}

/// Catalog listing entry with derived availability.
#[derive(Debug, Serialize, ToSchema)]
pub struct BookResponse {
    pub id: Uuid,
    pub catalog_id: String,
    pub title: String,
    pub author: String,
    pub category: String,
    pub subject: String,
    pub isbn: Option<String>,
    pub total_copies: i32,
    pub borrowed_copies: i32,
    pub available: bool,
}

impl From<Book> for BookResponse {
    fn from(book: Book) -> Self {
        let available = book.available();
        Self {
            id: book.id,
            catalog_id: book.catalog_id,
            title: book.title,
            author: book.author,
            category: book.category,
            subject: book.subject,
            isbn: book.isbn,
            total_copies: book.total_copies,
            borrowed_copies: book.borrowed_copies,
            available,
        }
    }
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct BookQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateBookDto {
    #[validate(length(min = 1, max = 50))]
    pub catalog_id: String,
    #[validate(length(min = 1, max = 300))]
    pub title: String,
    #[serde(default)]
    pub author: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subject: Option<String>,
    pub isbn: Option<String>,
    #[validate(range(min = 0))]
    pub total_copies: Option<i32>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateBookDto {
    #[validate(length(min = 1, max = 300))]
    pub title: Option<String>,
    pub author: Option<String>,
    pub category: Option<String>,
    pub subject: Option<String>,
    pub isbn: Option<String>,
    #[validate(range(min = 0))]
    pub total_copies: Option<i32>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn book(total: i32, borrowed: i32) -> Book {
        Book {
            id: Uuid::new_v4(),
            catalog_id: "BK-001".to_string(),
            title: "Things Fall Apart".to_string(),
            author: "Chinua Achebe".to_string(),
            category: "Fiction".to_string(),
            subject: "Literature".to_string(),
            isbn: None,
            total_copies: total,
            borrowed_copies: borrowed,
        }
    }

    #[test]
    fn test_availability_derived_from_counters() {
        assert!(book(2, 1).available());
        assert!(!book(2, 2).available());
        assert!(!book(0, 0).available());
    }

    #[test]
    fn test_response_carries_availability() {
        let response = BookResponse::from(book(3, 3));
        assert!(!response.available);
        assert_eq!(response.borrowed_copies, 3);
    }
}
