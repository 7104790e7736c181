use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Staff roles, ordered by privilege.
///
/// `SUPER_ADMIN` is terminal: it is granted exactly once, to the first
/// account ever created, and no role-update operation may touch it again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type, ToSchema)]
pub enum StaffRole {
    #[serde(rename = "SUPER_ADMIN")]
    #[sqlx(rename = "SUPER_ADMIN")]
    SuperAdmin,
    #[serde(rename = "admin")]
    #[sqlx(rename = "admin")]
    Admin,
    #[serde(rename = "teacher")]
    #[sqlx(rename = "teacher")]
    Teacher,
    #[serde(rename = "librarian")]
    #[sqlx(rename = "librarian")]
    Librarian,
    #[serde(rename = "none")]
    #[sqlx(rename = "none")]
    Unassigned,
}

impl StaffRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            StaffRole::SuperAdmin => "SUPER_ADMIN",
            StaffRole::Admin => "admin",
            StaffRole::Teacher => "teacher",
            StaffRole::Librarian => "librarian",
            StaffRole::Unassigned => "none",
        }
    }
}

impl std::fmt::Display for StaffRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A staff account.
///
/// `external_subject_id` is nullable until the account's first login links
/// it to the identity provider. `role` is written at creation and afterwards
/// only through the role-update operation.
#[derive(Debug, Clone, Serialize, FromRow, ToSchema)]
pub struct User {
    pub id: Uuid,
    pub external_subject_id: Option<String>,
    pub email: String,
    pub full_name: String,
    pub role: StaffRole,
    pub assigned_class_id: Option<Uuid>,
    pub assigned_stream_id: Option<Uuid>,
}

/// Staff listing entry: the account plus its subrole tags.
#[derive(Debug, Serialize, ToSchema)]
pub struct StaffMember {
    pub id: Uuid,
    pub full_name: String,
    pub email: String,
    pub role: StaffRole,
    pub external_subject_id: Option<String>,
    pub assigned_class_id: Option<Uuid>,
    pub assigned_stream_id: Option<Uuid>,
    pub subroles: Vec<String>,
}

/// Payload for the role-update operation.
///
/// The class/stream scope is only honoured when the requested role is
/// `teacher` or `admin`; any other assignment clears it.
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRoleDto {
    pub role: StaffRole,
    pub assigned_class_id: Option<Uuid>,
    pub assigned_stream_id: Option<Uuid>,
}

/// Payload replacing an admin's subrole set.
#[derive(Debug, Deserialize, ToSchema, Validate)]
pub struct UpdateSubrolesDto {
    #[validate(length(max = 16))]
    pub subroles: Vec<String>,
}
