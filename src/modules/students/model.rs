use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

/// A student record.
///
/// The password hash is deliberately not part of this struct; the portal
/// login path reads it through a narrow query of its own.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct Student {
    pub id: Uuid,
    pub full_name: String,
    pub admission_number: String,
    pub activated: bool,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
    pub is_cleared: bool,
    pub cleared_at: Option<DateTime<Utc>>,
}

/// Listing entry with the display labels the dashboard renders.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct StudentDetail {
    pub id: Uuid,
    pub full_name: String,
    pub admission_number: String,
    pub activated: bool,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
    pub class_name: Option<String>,
    pub stream_name: Option<String>,
    pub is_cleared: bool,
    pub cleared_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StudentQuery {
    pub skip: Option<i64>,
    pub limit: Option<i64>,
    pub search: Option<String>,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateStudentDto {
    #[validate(length(min = 1, max = 200))]
    pub full_name: String,
    #[validate(length(min = 1, max = 50))]
    pub admission_number: String,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateStudentDto {
    #[validate(length(min = 1, max = 200))]
    pub full_name: Option<String>,
    pub class_id: Option<Uuid>,
    pub stream_id: Option<Uuid>,
}
