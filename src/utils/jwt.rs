//! Student portal session tokens.
//!
//! Tokens carry only the student id and a role marker. Activation state is
//! never embedded: the portal extractor re-checks it against the live student
//! row, so an administrative reset invalidates outstanding tokens.

use chrono::Utc;
use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

use crate::config::jwt::StudentJwtConfig;
use crate::utils::errors::AppError;

use serde::{Deserialize, Serialize};

pub const STUDENT_ROLE: &str = "student";

#[derive(Debug, Serialize, Deserialize)]
pub struct StudentClaims {
    pub sub: String,
    pub role: String,
    pub exp: usize,
    pub iat: usize,
}

pub fn create_student_token(
    student_id: Uuid,
    config: &StudentJwtConfig,
) -> Result<String, AppError> {
    let now = Utc::now().timestamp() as usize;
    let exp = now + config.token_expiry as usize;

    let claims = StudentClaims {
        sub: student_id.to_string(),
        role: STUDENT_ROLE.to_string(),
        exp,
        iat: now,
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .map_err(|e| AppError::internal(anyhow::anyhow!("Failed to create session token: {}", e)))
}

pub fn parse_student_token(token: &str, config: &StudentJwtConfig) -> Result<Uuid, AppError> {
    let claims = decode::<StudentClaims>(
        token,
        &DecodingKey::from_secret(config.secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|_| AppError::unauthorized("Could not validate credentials".to_string()))?;

    if claims.role != STUDENT_ROLE {
        return Err(AppError::unauthorized(
            "Could not validate credentials".to_string(),
        ));
    }

    Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::unauthorized("Could not validate credentials".to_string()))
}
