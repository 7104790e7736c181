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
use crate::modules::streams::model::{CreateStreamDto, Stream, StreamDetail, StreamQuery};
use crate::modules::streams::service::StreamService;
use crate::modules::users::model::StaffRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/streams",
    params(StreamQuery),
    responses(
        (status = 200, description = "Streams", body = [StreamDetail]),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Streams"
)]
#[instrument(skip(state, _principal))]
pub async fn get_streams(
    State(state): State<AppState>,
    CurrentUser(_principal): CurrentUser,
    Query(query): Query<StreamQuery>,
) -> Result<Json<Vec<StreamDetail>>, AppError> {
    let streams = StreamService::get_streams(&state.db, &query).await?;
    Ok(Json(streams))
}

#[utoipa::path(
    post,
    path = "/api/streams",
    request_body = CreateStreamDto,
    responses(
        (status = 200, description = "Stream created", body = Stream),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Streams"
)]
#[instrument(skip(state, principal))]
pub async fn create_stream(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateStreamDto>,
) -> Result<Json<Stream>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    let stream = StreamService::create_stream(&state.db, dto, &principal).await?;
    Ok(Json(stream))
}

#[utoipa::path(
    delete,
    path = "/api/streams/{id}",
    params(("id" = Uuid, Path, description = "Stream id")),
    responses(
        (status = 200, description = "Stream deleted"),
        (status = 400, description = "Stream still referenced", body = ErrorResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Stream not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Streams"
)]
#[instrument(skip(state, principal))]
pub async fn delete_stream(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    StreamService::delete_stream(&state.db, id, &principal).await?;
    Ok(Json(json!({ "message": "Stream deleted successfully" })))
}
