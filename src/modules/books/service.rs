use sqlx::PgPool;
use tracing::instrument;
use uuid::Uuid;

use crate::utils::errors::AppError;
use crate::utils::pagination::{Paginated, clamp_limit, clamp_skip};

use super::model::{Book, BookQuery, BookResponse, CreateBookDto, UpdateBookDto};

const BOOK_COLUMNS: &str =
    "id, catalog_id, title, author, category, subject, isbn, total_copies, borrowed_copies";

pub struct BookService;

impl BookService {
    #[instrument(skip(db))]
    pub async fn get_books(
        db: &PgPool,
        query: &BookQuery,
    ) -> Result<Paginated<BookResponse>, AppError> {
        let limit = clamp_limit(query.limit);
        let skip = clamp_skip(query.skip);
        let search = query.search.as_ref().map(|s| format!("%{}%", s));

        let filter = "($1::text IS NULL OR title ILIKE $1 OR author ILIKE $1
                       OR catalog_id ILIKE $1 OR category ILIKE $1 OR subject ILIKE $1)";

        let total: i64 =
            sqlx::query_scalar(&format!("SELECT COUNT(*) FROM books WHERE {filter}"))
                .bind(&search)
                .fetch_one(db)
                .await
                .map_err(AppError::database)?;

        let items = sqlx::query_as::<_, Book>(&format!(
            "SELECT {BOOK_COLUMNS} FROM books WHERE {filter}
             ORDER BY title OFFSET $2 LIMIT $3"
        ))
        .bind(&search)
        .bind(skip)
        .bind(limit)
        .fetch_all(db)
        .await
        .map_err(AppError::database)?;

        Ok(Paginated {
            total,
            items: items.into_iter().map(BookResponse::from).collect(),
        })
    }

    #[instrument(skip(db))]
    pub async fn create_book(db: &PgPool, dto: CreateBookDto) -> Result<Book, AppError> {
        let existing: Option<Uuid> =
            sqlx::query_scalar("SELECT id FROM books WHERE catalog_id = $1")
                .bind(&dto.catalog_id)
                .fetch_optional(db)
                .await
                .map_err(AppError::database)?;

        if existing.is_some() {
            return Err(AppError::conflict(anyhow::anyhow!("Book ID already exists")));
        }

        sqlx::query_as::<_, Book>(&format!(
            "INSERT INTO books (catalog_id, title, author, category, subject, isbn, total_copies)
             VALUES ($1, $2, $3, $4, $5, $6, $7)
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(&dto.catalog_id)
        .bind(&dto.title)
        .bind(dto.author.unwrap_or_default())
        .bind(dto.category.unwrap_or_default())
        .bind(dto.subject.unwrap_or_default())
        .bind(dto.isbn)
        .bind(dto.total_copies.unwrap_or(1))
        .fetch_one(db)
        .await
        .map_err(AppError::database)
    }

    #[instrument(skip(db))]
    pub async fn update_book(
        db: &PgPool,
        book_id: Uuid,
        dto: UpdateBookDto,
    ) -> Result<Book, AppError> {
        sqlx::query_as::<_, Book>(&format!(
            "UPDATE books
             SET title = COALESCE($1, title),
                 author = COALESCE($2, author),
                 category = COALESCE($3, category),
                 subject = COALESCE($4, subject),
                 isbn = COALESCE($5, isbn),
                 total_copies = COALESCE($6, total_copies)
             WHERE id = $7
             RETURNING {BOOK_COLUMNS}"
        ))
        .bind(dto.title)
        .bind(dto.author)
        .bind(dto.category)
        .bind(dto.subject)
        .bind(dto.isbn)
        .bind(dto.total_copies)
        .bind(book_id)
        .fetch_optional(db)
        .await
        .map_err(AppError::database)?
        .ok_or_else(|| AppError::not_found(anyhow::anyhow!("Book not found")))
    }

    #[instrument(skip(db))]
    pub async fn delete_book(db: &PgPool, book_id: Uuid) -> Result<(), AppError> {
        let deleted = sqlx::query("DELETE FROM books WHERE id = $1")
            .bind(book_id)
            .execute(db)
            .await
            .map_err(AppError::database)?;

        if deleted.rows_affected() == 0 {
            return Err(AppError::not_found(anyhow::anyhow!("Book not found")));
        }

        Ok(())
    }
}
