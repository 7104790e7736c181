use axum::{
    Json,
    extract::{Path, State},
};
use serde_json::{Value, json};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::require_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::classes::model::{Class, ClassOverview, CreateClassDto};
use crate::modules::classes::service::ClassService;
use crate::modules::users::model::StaffRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

#[utoipa::path(
    get,
    path = "/api/classes",
    responses(
        (status = 200, description = "Classes with stream breakdown", body = [ClassOverview]),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, _principal))]
pub async fn get_classes(
    State(state): State<AppState>,
    CurrentUser(_principal): CurrentUser,
) -> Result<Json<Vec<ClassOverview>>, AppError> {
    let classes = ClassService::get_classes(&state.db).await?;
    Ok(Json(classes))
}

#[utoipa::path(
    post,
    path = "/api/classes",
    request_body = CreateClassDto,
    responses(
        (status = 200, description = "Class created", body = Class),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Class name already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, principal))]
pub async fn create_class(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateClassDto>,
) -> Result<Json<Class>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    let class = ClassService::create_class(&state.db, dto, &principal).await?;
    Ok(Json(class))
}

#[utoipa::path(
    delete,
    path = "/api/classes/{id}",
    params(("id" = Uuid, Path, description = "Class id")),
    responses(
        (status = 200, description = "Class deleted"),
        (status = 400, description = "Class still referenced", body = ErrorResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Class not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Classes"
)]
#[instrument(skip(state, principal))]
pub async fn delete_class(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    ClassService::delete_class(&state.db, id, &principal).await?;
    Ok(Json(json!({ "message": "Class deleted successfully" })))
}
