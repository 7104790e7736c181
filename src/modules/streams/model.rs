use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;
use validator::Validate;

#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct Stream {
    pub id: Uuid,
    pub name: String,
    pub class_id: Uuid,
}

/// Listing entry carrying the parent class label, e.g. "Form 1 A".
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct StreamDetail {
    pub id: Uuid,
    pub name: String,
    pub class_id: Uuid,
    pub class_name: String,
    pub full_name: String,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
pub struct StreamQuery {
    pub class_id: Option<Uuid>,
}

#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct CreateStreamDto {
    #[validate(length(min = 1, max = 50))]
    pub name: String,
    pub class_id: Uuid,
}
