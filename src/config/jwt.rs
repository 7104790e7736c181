use std::env;

/// Settings for student portal session tokens.
///
/// Students authenticate against this service directly (admission number +
/// password), decoupled from the staff identity provider, so they get their
/// own signing secret.
#[derive(Clone, Debug)]
pub struct StudentJwtConfig {
    pub secret: String,
    pub token_expiry: i64,
}

impl StudentJwtConfig {
    pub fn from_env() -> Self {
        Self {
            secret: env::var("STUDENT_JWT_SECRET")
                .unwrap_or_else(|_| "change-me-student-secret".to_string()),
            token_expiry: env::var("STUDENT_TOKEN_EXPIRY")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(604800), // 1 week
        }
    }
}
