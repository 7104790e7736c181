use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::require_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::books::model::{Book, BookQuery, BookResponse, CreateBookDto, UpdateBookDto};
use crate::modules::books::service::BookService;
use crate::modules::users::model::StaffRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use crate::validator::ValidatedJson;

const CATALOG_MANAGERS: &[StaffRole] = &[
    StaffRole::Librarian,
    StaffRole::Admin,
    StaffRole::SuperAdmin,
];

#[utoipa::path(
    get,
    path = "/api/books",
    params(BookQuery),
    responses(
        (status = 200, description = "Paginated catalog", body = Paginated<BookResponse>),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state, _principal))]
pub async fn get_books(
    State(state): State<AppState>,
    CurrentUser(_principal): CurrentUser,
    Query(query): Query<BookQuery>,
) -> Result<Json<Paginated<BookResponse>>, AppError> {
    let books = BookService::get_books(&state.db, &query).await?;
    Ok(Json(books))
}

#[utoipa::path(
    post,
    path = "/api/books",
    request_body = CreateBookDto,
    responses(
        (status = 200, description = "Book created", body = Book),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Book ID already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state, principal))]
pub async fn create_book(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateBookDto>,
) -> Result<Json<Book>, AppError> {
    require_any_role(&principal, CATALOG_MANAGERS)?;
    let book = BookService::create_book(&state.db, dto).await?;
    Ok(Json(book))
}

#[utoipa::path(
    patch,
    path = "/api/books/{id}",
    request_body = UpdateBookDto,
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book updated", body = Book),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state, principal))]
pub async fn update_book(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateBookDto>,
) -> Result<Json<Book>, AppError> {
    require_any_role(&principal, CATALOG_MANAGERS)?;
    let book = BookService::update_book(&state.db, id, dto).await?;
    Ok(Json(book))
}

#[utoipa::path(
    delete,
    path = "/api/books/{id}",
    params(("id" = Uuid, Path, description = "Book id")),
    responses(
        (status = 200, description = "Book deleted"),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Book not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Books"
)]
#[instrument(skip(state, principal))]
pub async fn delete_book(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    BookService::delete_book(&state.db, id).await?;
    Ok(Json(json!({ "message": "Book deleted successfully" })))
}
