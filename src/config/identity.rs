use std::env;

/// Settings for verifying assertions minted by the external identity
/// provider that authenticates staff.
///
/// The provider is a black box to this service: it signs a JWT whose subject
/// is the provider-side user id. Role metadata it may carry is only consulted
/// at account genesis, never afterwards.
#[derive(Clone, Debug)]
pub struct IdentityConfig {
    pub secret: String,
    /// When true, the fixed sentinel bearer token impersonates the
    /// SUPER_ADMIN. Local testing only; off unless APP_ENV=dev.
    pub dev_mode: bool,
}

/// Sentinel credential accepted only in dev mode.
pub const DEV_ADMIN_TOKEN: &str = "dev_token_admin";

impl IdentityConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("IDENTITY_PROVIDER_SECRET")
                .unwrap_or_else(|_| "change-me-identity-secret".to_string()),
            dev_mode: env::var("APP_ENV").map(|v| v == "dev").unwrap_or(false),
        }
    }
}
