use axum::{
    Json,
    extract::{Path, Query, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::require_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::circulation::model::{
    BorrowRecord, BorrowRequestDto, HistoryItem, HistoryQuery,
};
use crate::modules::circulation::service::CirculationService;
use crate::modules::users::model::StaffRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;

const CIRCULATION_STAFF: &[StaffRole] = &[
    StaffRole::Librarian,
    StaffRole::Admin,
    StaffRole::SuperAdmin,
];

#[utoipa::path(
    get,
    path = "/api/circulation/history",
    params(HistoryQuery),
    responses(
        (status = 200, description = "Borrow history", body = Paginated<HistoryItem>),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Circulation"
)]
#[instrument(skip(state, _principal))]
pub async fn get_borrow_history(
    State(state): State<AppState>,
    CurrentUser(_principal): CurrentUser,
    Query(query): Query<HistoryQuery>,
) -> Result<Json<Paginated<HistoryItem>>, AppError> {
    let history = CirculationService::get_borrow_history(&state.db, &query).await?;
    Ok(Json(history))
}

/// Lend a copy to a student.
#[utoipa::path(
    post,
    path = "/api/circulation/borrow",
    request_body = BorrowRequestDto,
    responses(
        (status = 200, description = "Borrow record created", body = BorrowRecord),
        (status = 400, description = "Capacity exhausted", body = ErrorResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Book or student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Circulation"
)]
#[instrument(skip(state, principal))]
pub async fn borrow_book(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Json(dto): Json<BorrowRequestDto>,
) -> Result<Json<BorrowRecord>, AppError> {
    require_any_role(&principal, CIRCULATION_STAFF)?;
    let record = CirculationService::borrow_book(&state.db, &dto).await?;
    Ok(Json(record))
}

/// Complete a circulation transaction.
#[utoipa::path(
    post,
    path = "/api/circulation/return/{record_id}",
    params(("record_id" = Uuid, Path, description = "Borrow record id")),
    responses(
        (status = 200, description = "Book returned", body = BorrowRecord),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Transaction not found", body = ErrorResponse),
        (status = 409, description = "Book already returned", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Circulation"
)]
#[instrument(skip(state, principal))]
pub async fn return_book(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(record_id): Path<Uuid>,
) -> Result<Json<BorrowRecord>, AppError> {
    require_any_role(&principal, CIRCULATION_STAFF)?;
    let record = CirculationService::return_book(&state.db, record_id).await?;
    Ok(Json(record))
}
