use chrono::Utc;
use jsonwebtoken::{EncodingKey, Header, encode};
use serde::Serialize;

use shulebase::config::identity::IdentityConfig;
use shulebase::modules::auth::service::verify_assertion;

fn test_config() -> IdentityConfig {
    IdentityConfig {
        secret: "provider-secret".to_string(),
        dev_mode: false,
    }
}

#[derive(Serialize)]
struct ProviderClaims {
    #[serde(skip_serializing_if = "Option::is_none")]
    sub: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_name: Option<String>,
    exp: usize,
}

fn sign(claims: &ProviderClaims, secret: &str) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

fn valid_claims() -> ProviderClaims {
    ProviderClaims {
        sub: Some("user_2abc".to_string()),
        email: Some("jane@school.test".to_string()),
        first_name: Some("Jane".to_string()),
        last_name: Some("Wanjiku".to_string()),
        exp: Utc::now().timestamp() as usize + 3600,
    }
}

#[test]
fn test_valid_assertion_extracts_identity() {
    let config = test_config();
    let token = sign(&valid_claims(), &config.secret);

    let assertion = verify_assertion(&token, &config).unwrap();
    assert_eq!(assertion.subject_id, "user_2abc");
    assert_eq!(assertion.email, "jane@school.test");
    assert_eq!(assertion.full_name, "Jane Wanjiku");
}

#[test]
fn test_partial_name_is_trimmed() {
    let config = test_config();
    let mut claims = valid_claims();
    claims.last_name = None;
    let token = sign(&claims, &config.secret);

    let assertion = verify_assertion(&token, &config).unwrap();
    assert_eq!(assertion.full_name, "Jane");
}

#[test]
fn test_missing_subject_rejected() {
    let config = test_config();
    let mut claims = valid_claims();
    claims.sub = None;
    let token = sign(&claims, &config.secret);

    assert!(verify_assertion(&token, &config).is_err());
}

#[test]
fn test_missing_email_rejected() {
    let config = test_config();
    let mut claims = valid_claims();
    claims.email = None;
    let token = sign(&claims, &config.secret);

    assert!(verify_assertion(&token, &config).is_err());
}

#[test]
fn test_foreign_signature_rejected() {
    let config = test_config();
    let token = sign(&valid_claims(), "not-the-provider-secret");

    assert!(verify_assertion(&token, &config).is_err());
}

#[test]
fn test_expired_assertion_rejected() {
    let config = test_config();
    let mut claims = valid_claims();
    claims.exp = Utc::now().timestamp() as usize - 600;
    let token = sign(&claims, &config.secret);

    assert!(verify_assertion(&token, &config).is_err());
}
