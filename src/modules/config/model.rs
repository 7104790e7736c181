use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;

/// The process-wide configuration singleton.
///
/// Lives as a single row so every instance of the service observes the same
/// policy; it is read through the store on demand, never cached in-process.
#[derive(Debug, Serialize, FromRow, ToSchema)]
pub struct GlobalConfig {
    pub id: i32,
    pub allow_public_signup: bool,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct ConfigUpdateDto {
    pub allow_public_signup: Option<bool>,
}

/// Answer for the public signup-policy probe the login pages call.
#[derive(Debug, Serialize, ToSchema)]
pub struct PolicyCheckResponse {
    pub allow_signup: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}
