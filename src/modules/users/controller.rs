use axum::{
    Json,
    extract::{Path, State},
};
use tracing::instrument;
use uuid::Uuid;

use crate::middleware::auth::CurrentUser;
use crate::middleware::role::require_any_role;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::users::model::{StaffMember, StaffRole, UpdateRoleDto, UpdateSubrolesDto, User};
use crate::modules::users::service::UserService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// List all staff accounts with their subroles.
#[utoipa::path(
    get,
    path = "/api/staff",
    responses(
        (status = 200, description = "Staff listing", body = [StaffMember]),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, principal))]
pub async fn get_staff(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
) -> Result<Json<Vec<StaffMember>>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    let staff = UserService::get_staff(&state.db).await?;
    Ok(Json(staff))
}

/// Change a user's role.
#[utoipa::path(
    patch,
    path = "/api/users/{id}/role",
    request_body = UpdateRoleDto,
    params(
        ("id" = Uuid, Path, description = "Target user id")
    ),
    responses(
        (status = 200, description = "Role updated", body = User),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden by role-mutation policy", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, principal))]
pub async fn update_user_role(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
    Json(dto): Json<UpdateRoleDto>,
) -> Result<Json<User>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    let user = UserService::update_user_role(&state.db, id, dto, &principal).await?;
    Ok(Json(user))
}

/// Replace an admin's subrole set. SUPER_ADMIN only.
#[utoipa::path(
    put,
    path = "/api/users/{id}/subroles",
    request_body = UpdateSubrolesDto,
    params(
        ("id" = Uuid, Path, description = "Target user id")
    ),
    responses(
        (status = 200, description = "Subroles replaced", body = [String]),
        (status = 400, description = "Target is not an admin", body = ErrorResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "User not found", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    ),
    tag = "Users"
)]
#[instrument(skip(state, principal))]
pub async fn update_subroles(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateSubrolesDto>,
) -> Result<Json<Vec<String>>, AppError> {
    require_any_role(&principal, &[StaffRole::SuperAdmin])?;
    let subroles = UserService::update_subroles(&state.db, id, dto, &principal).await?;
    Ok(Json(subroles))
}
