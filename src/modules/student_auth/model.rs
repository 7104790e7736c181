use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct OnboardVerifyDto {
    #[validate(length(min = 1, max = 50))]
    pub admission_number: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct ActivateAccountDto {
    #[validate(length(min = 1, max = 50))]
    pub admission_number: String,
    #[validate(length(min = 8))]
    pub new_password: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct StudentLoginDto {
    #[validate(length(min = 1, max = 50))]
    pub admission_number: String,
    #[validate(length(min = 1))]
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OnboardVerifyResponse {
    pub message: String,
    pub full_name: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// What the portal shows about the logged-in student.
#[derive(Debug, Serialize, ToSchema)]
pub struct PortalProfile {
    pub id: Uuid,
    pub full_name: String,
    pub admission_number: String,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
}
