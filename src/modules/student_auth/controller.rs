use axum::{Json, extract::State};
use tracing::instrument;

use crate::middleware::student::PortalStudent;
use crate::modules::auth::controller::ErrorResponse;
use crate::modules::student_auth::model::{
    ActivateAccountDto, OnboardVerifyDto, OnboardVerifyResponse, PortalProfile, StudentLoginDto,
    TokenResponse,
};
use crate::modules::student_auth::service::StudentAuthService;
use crate::state::AppState;
use crate::utils::errors::AppError;
use crate::validator::ValidatedJson;

/// Onboarding step 1: verify admission number and activation status.
#[utoipa::path(
    post,
    path = "/api/student/auth/onboard/verify",
    request_body = OnboardVerifyDto,
    responses(
        (status = 200, description = "Verification successful", body = OnboardVerifyResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Account already activated", body = ErrorResponse)
    ),
    tag = "Student Portal"
)]
#[instrument(skip(state, dto))]
pub async fn verify_onboarding(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<OnboardVerifyDto>,
) -> Result<Json<OnboardVerifyResponse>, AppError> {
    let full_name = StudentAuthService::verify_onboarding(&state.db, &dto.admission_number).await?;
    Ok(Json(OnboardVerifyResponse {
        message: "Verification successful".to_string(),
        full_name,
    }))
}

/// Onboarding step 2: set password, activate, and log in.
#[utoipa::path(
    post,
    path = "/api/student/auth/onboard/activate",
    request_body = ActivateAccountDto,
    responses(
        (status = 200, description = "Account activated", body = TokenResponse),
        (status = 404, description = "Student not found", body = ErrorResponse),
        (status = 409, description = "Account already activated", body = ErrorResponse)
    ),
    tag = "Student Portal"
)]
#[instrument(skip(state, dto))]
pub async fn activate_account(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<ActivateAccountDto>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = StudentAuthService::activate(
        &state.db,
        &dto.admission_number,
        &dto.new_password,
        &state.student_jwt_config,
    )
    .await?;
    Ok(Json(token))
}

/// Student portal login.
#[utoipa::path(
    post,
    path = "/api/student/auth/login",
    request_body = StudentLoginDto,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    ),
    tag = "Student Portal"
)]
#[instrument(skip(state, dto))]
pub async fn login(
    State(state): State<AppState>,
    ValidatedJson(dto): ValidatedJson<StudentLoginDto>,
) -> Result<Json<TokenResponse>, AppError> {
    let token = StudentAuthService::login(
        &state.db,
        &dto.admission_number,
        &dto.password,
        &state.student_jwt_config,
    )
    .await?;
    Ok(Json(token))
}

/// The logged-in student's profile, checked against live state.
#[utoipa::path(
    get,
    path = "/api/student/auth/me",
    responses(
        (status = 200, description = "Current student", body = PortalProfile),
        (status = 401, description = "Invalid session", body = ErrorResponse),
        (status = 403, description = "Account no longer activated", body = ErrorResponse)
    ),
    security(("bearer_auth" = [])),
    tag = "Student Portal"
)]
pub async fn get_me(
    PortalStudent(student): PortalStudent,
) -> Result<Json<PortalProfile>, AppError> {
    Ok(Json(PortalProfile {
        id: student.id,
        full_name: student.full_name,
        admission_number: student.admission_number,
        class_id: student.class_id,
        stream_id: student.stream_id,
    }))
}
