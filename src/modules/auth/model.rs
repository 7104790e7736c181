use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::modules::users::model::StaffRole;

/// Raw claims of a provider-signed assertion token.
///
/// Everything beyond `sub` is optional on the wire; [`ExternalAssertion`]
/// is the checked form.
#[derive(Debug, Deserialize)]
pub struct AssertionClaims {
    pub sub: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    pub exp: usize,
}

/// A verified identity assertion from the external provider.
#[derive(Debug, Clone)]
pub struct ExternalAssertion {
    pub subject_id: String,
    pub email: String,
    pub full_name: String,
}

/// The resolved, authorized identity for the current request.
///
/// Built fresh on every request by joining the verified external identity
/// with the local authorization record; never cached across requests. Role
/// and subroles always come from the local record, not from provider claims.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct Principal {
    pub user_id: Uuid,
    pub external_subject_id: Option<String>,
    pub email: String,
    pub full_name: String,
    pub role: StaffRole,
    pub subroles: Vec<String>,
    pub assigned_class_id: Option<Uuid>,
    pub assigned_stream_id: Option<Uuid>,
}
