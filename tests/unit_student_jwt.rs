use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;
use uuid::Uuid;

use shulebase::config::jwt::StudentJwtConfig;
use shulebase::utils::jwt::{create_student_token, parse_student_token};

fn test_config() -> StudentJwtConfig {
    StudentJwtConfig {
        secret: "unit-test-secret".to_string(),
        token_expiry: 604800,
    }
}

#[test]
fn test_token_round_trip() {
    let config = test_config();
    let student_id = Uuid::new_v4();

    let token = create_student_token(student_id, &config).unwrap();
    let parsed = parse_student_token(&token, &config).unwrap();

    assert_eq!(parsed, student_id);
}

#[test]
fn test_token_rejected_with_wrong_secret() {
    let config = test_config();
    let other = StudentJwtConfig {
        secret: "a-different-secret".to_string(),
        token_expiry: 604800,
    };

    let token = create_student_token(Uuid::new_v4(), &config).unwrap();
    assert!(parse_student_token(&token, &other).is_err());
}

#[test]
fn test_garbage_token_rejected() {
    let config = test_config();
    assert!(parse_student_token("not-a-token", &config).is_err());
}

#[derive(Serialize)]
struct ForgedClaims {
    sub: String,
    role: String,
    exp: usize,
    iat: usize,
}

#[test]
fn test_token_without_student_role_marker_rejected() {
    let config = test_config();
    let now = Utc::now().timestamp() as usize;

    let claims = ForgedClaims {
        sub: Uuid::new_v4().to_string(),
        role: "teacher".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    assert!(parse_student_token(&token, &config).is_err());
}

#[test]
fn test_expired_token_rejected() {
    let config = test_config();
    let now = Utc::now().timestamp() as usize;

    // Past the default validation leeway.
    let claims = ForgedClaims {
        sub: Uuid::new_v4().to_string(),
        role: "student".to_string(),
        exp: now - 600,
        iat: now - 7200,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    assert!(parse_student_token(&token, &config).is_err());
}

#[test]
fn test_token_with_non_uuid_subject_rejected() {
    let config = test_config();
    let now = Utc::now().timestamp() as usize;

    let claims = ForgedClaims {
        sub: "ADM-2024-001".to_string(),
        role: "student".to_string(),
        exp: now + 3600,
        iat: now,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.secret.as_bytes()),
    )
    .unwrap();

    assert!(parse_student_token(&token, &config).is_err());
}
