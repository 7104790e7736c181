use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Class {
    pub id: Uuid,
    pub name: String,
}

/// Listing entry with the per-stream breakdown the dashboard renders.
#[derive(Debug, Serialize, ToSchema)]
pub struct ClassOverview {
    pub id: Uuid,
    pub name: String,
    pub student_count: i64,
    pub streams: Vec<StreamSummary>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct StreamSummary {
    pub id: Uuid,
    pub name: String,
    pub count: i64,
    /// Display label, e.g. "Form 1A".
    pub full_name: String,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateClassDto {
    #[validate(length(min = 1, max = 100))]
    pub name: String,
}
