//! End-to-end tests for a registry configured from TOML with JWT verification.

use gqlkit_scalars::{ConfigError, ScalarRegistry, ScalarsConfig};
use jsonwebtoken::{EncodingKey, Header, encode};
use serde_json::{Value as JsonValue, json};
use time::OffsetDateTime;

const CONFIG: &str = r#"
[jwt]
secret = "integration-secret"
algorithm = "HS256"
issuer = "https://auth.example.com"
required_claims = ["sub"]
"#;

fn sign(claims: &JsonValue) -> String {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(b"integration-secret"),
    )
    .unwrap()
}

fn exp() -> i64 {
    OffsetDateTime::now_utc().unix_timestamp() + 600
}

#[test]
fn test_registry_from_toml_verifies_tokens() {
    let config = ScalarsConfig::from_toml_str(CONFIG).unwrap();
    let registry = ScalarRegistry::from_config(&config).unwrap();

    let token = sign(&json!({"sub": "u-1", "iss": "https://auth.example.com", "exp": exp()}));
    let parsed = registry.parse_value("Jwt", &json!(token)).unwrap();
    assert_eq!(registry.serialize("Jwt", &parsed).unwrap(), json!(token));

    let literal = async_graphql_value::Value::String(token.clone());
    assert_eq!(registry.parse_literal("Jwt", &literal).unwrap(), parsed);
}

#[test]
fn test_rejected_tokens_become_validation_errors() {
    let config = ScalarsConfig::from_toml_str(CONFIG).unwrap();
    let registry = ScalarRegistry::from_config(&config).unwrap();

    let no_subject = sign(&json!({"iss": "https://auth.example.com", "exp": exp()}));
    let err = registry.parse_value("Jwt", &json!(no_subject)).unwrap_err();
    assert!(err.is_validation_error());
    assert_eq!(err.to_string(), "Invalid Jwt: Missing required claim: sub");

    let wrong_issuer = sign(&json!({"sub": "u-1", "iss": "https://other.example", "exp": exp()}));
    assert!(
        registry
            .parse_value("Jwt", &json!(wrong_issuer))
            .unwrap_err()
            .is_validation_error()
    );

    // other scalars are unaffected by the JWT settings
    assert!(registry.parse_value("Email", &json!("a@b.io")).is_ok());
}

#[test]
fn test_invalid_toml() {
    assert!(matches!(
        ScalarsConfig::from_toml_str("[jwt\nsecret = 1"),
        Err(ConfigError::Parse(_))
    ));
    assert!(matches!(
        ScalarsConfig::from_toml_str("[jwt]\nsecret = \"\""),
        Err(ConfigError::Validation(_))
    ));
}
