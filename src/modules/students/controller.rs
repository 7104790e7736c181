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
use crate::modules::students::model::{
    CreateStudentDto, Student, StudentDetail, StudentQuery, UpdateStudentDto,
};
use crate::modules::students::service::StudentService;
use crate::modules::users::model::StaffRole;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::utils::pagination::Paginated;
use crate::validator::ValidatedJson;

const STUDENT_MANAGERS: &[StaffRole] = &[
    StaffRole::Librarian,
    StaffRole::Admin,
    StaffRole::SuperAdmin,
];

#[utoipa::path(
    get,
    path = "/api/students",
    params(StudentQuery),
    responses(
        (status = 200, description = "Paginated students", body = Paginated<StudentDetail>),
        (status = 401, description = "Authentication failed", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, _principal))]
pub async fn get_students(
    State(state): State<AppState>,
    CurrentUser(_principal): CurrentUser,
    Query(query): Query<StudentQuery>,
) -> Result<Json<Paginated<StudentDetail>>, AppError> {
    let students = StudentService::get_students(&state.db, &query).await?;
    Ok(Json(students))
}

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = CreateStudentDto,
    responses(
        (status = 200, description = "Student created", body = Student),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 409, description = "Admission number already exists", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, principal))]
pub async fn create_student(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    ValidatedJson(dto): ValidatedJson<CreateStudentDto>,
) -> Result<Json<Student>, AppError> {
    require_any_role(&principal, STUDENT_MANAGERS)?;
    let student = StudentService::create_student(&state.db, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    patch,
    path = "/api/students/{id}",
    request_body = UpdateStudentDto,
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student updated", body = Student),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, principal))]
pub async fn update_student(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
    ValidatedJson(dto): ValidatedJson<UpdateStudentDto>,
) -> Result<Json<Student>, AppError> {
    require_any_role(&principal, STUDENT_MANAGERS)?;
    let student = StudentService::update_student(&state.db, id, dto).await?;
    Ok(Json(student))
}

#[utoipa::path(
    delete,
    path = "/api/students/{id}",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student deleted"),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, principal))]
pub async fn delete_student(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    StudentService::delete_student(&state.db, id, &principal).await?;
    Ok(Json(json!({ "message": "Student deleted successfully" })))
}

/// Clear a student for leaving; refused while books are outstanding.
#[utoipa::path(
    post,
    path = "/api/students/{id}/clear",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Student cleared", body = Student),
        (status = 400, description = "Outstanding books", body = ErrorResponse),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, principal))]
pub async fn clear_student(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Student>, AppError> {
    require_any_role(&principal, STUDENT_MANAGERS)?;
    let student = StudentService::clear_student(&state.db, id, &principal).await?;
    Ok(Json(student))
}

/// Reset a student's portal account so they can onboard again.
#[utoipa::path(
    post,
    path = "/api/students/{id}/reset-account",
    params(("id" = Uuid, Path, description = "Student id")),
    responses(
        (status = 200, description = "Account reset"),
        (status = 401, description = "Authentication failed", body = ErrorResponse),
        (status = 403, description = "Forbidden", body = ErrorResponse),
        (status = 404, description = "Student not found", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Students"
)]
#[instrument(skip(state, principal))]
pub async fn reset_student_account(
    State(state): State<AppState>,
    CurrentUser(principal): CurrentUser,
    Path(id): Path<Uuid>,
) -> Result<Json<Value>, AppError> {
    require_any_role(&principal, &[StaffRole::Admin, StaffRole::SuperAdmin])?;
    StudentService::reset_student_account(&state.db, id, &principal).await?;
    Ok(Json(json!({
        "message": "Student account reset successfully. They can now onboard again."
    })))
}
