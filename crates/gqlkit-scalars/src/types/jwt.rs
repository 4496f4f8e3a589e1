//! The `Jwt` scalar.

use std::fmt;
use std::sync::Arc;

use async_graphql_value::Value;
use serde_json::Value as JsonValue;

use crate::Result;
use crate::jwt::JwtVerifier;
use crate::scalar::{CustomScalar, invalid, json_str, literal_str, serialize_mismatch};
use crate::value::ScalarValue;

/// `Jwt` - a JSON Web Token string.
///
/// Without a verifier the token is passed through after the kind check. With
/// one, both parse paths reject tokens the verifier refuses.
#[derive(Clone, Default)]
pub struct JwtScalar {
    verifier: Option<Arc<dyn JwtVerifier>>,
}

impl JwtScalar {
    /// Creates a pass-through `Jwt` scalar.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a `Jwt` scalar that checks tokens with `verifier`.
    #[must_use]
    pub fn with_verifier(verifier: Arc<dyn JwtVerifier>) -> Self {
        Self {
            verifier: Some(verifier),
        }
    }

    /// Returns `true` if tokens are verified.
    #[must_use]
    pub fn is_verifying(&self) -> bool {
        self.verifier.is_some()
    }

    fn coerce(&self, token: &str) -> Result<ScalarValue> {
        if let Some(verifier) = &self.verifier {
            verifier
                .verify(token)
                .map_err(|e| invalid(self.name(), e.to_string()))?;
        }
        Ok(ScalarValue::String(token.to_owned()))
    }
}

impl fmt::Debug for JwtScalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtScalar")
            .field("verifying", &self.is_verifying())
            .finish()
    }
}

impl CustomScalar for JwtScalar {
    fn name(&self) -> &'static str {
        "Jwt"
    }

    fn description(&self) -> &'static str {
        "A JSON Web Token"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::String(s) => Ok(JsonValue::String(s.clone())),
            other => Err(serialize_mismatch(self.name(), "STRING", other)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScalarError;
    use crate::jwt::JwtError;
    use serde_json::json;

    fn deny_all() -> Arc<dyn JwtVerifier> {
        Arc::new(|_: &str| -> std::result::Result<(), JwtError> { Err(JwtError::InvalidSignature) })
    }

    #[test]
    fn test_pass_through() {
        let jwt = JwtScalar::new();
        assert!(!jwt.is_verifying());
        assert_eq!(
            jwt.parse_value(&json!("anything.at.all")).unwrap(),
            ScalarValue::from("anything.at.all")
        );
        assert_eq!(
            jwt.parse_literal(&Value::String("x".into())).unwrap(),
            ScalarValue::from("x")
        );
    }

    #[test]
    fn test_kind_check() {
        let jwt = JwtScalar::new();
        assert!(jwt.parse_value(&json!(123)).unwrap_err().is_type_mismatch());
        assert!(
            jwt.parse_literal(&Value::Boolean(false))
                .unwrap_err()
                .is_type_mismatch()
        );
    }

    #[test]
    fn test_verifier_rejects_on_both_paths() {
        let jwt = JwtScalar::with_verifier(deny_all());
        assert!(jwt.is_verifying());

        let expected = ScalarError::validation("Jwt", "Invalid signature");
        assert_eq!(jwt.parse_value(&json!("a.b.c")).unwrap_err(), expected);
        assert_eq!(
            jwt.parse_literal(&Value::String("a.b.c".into())).unwrap_err(),
            expected
        );
    }

    #[test]
    fn test_serialize_identity() {
        let jwt = JwtScalar::with_verifier(deny_all());
        // serialize trusts its input and does not re-verify
        assert_eq!(
            jwt.serialize(&ScalarValue::from("a.b.c")).unwrap(),
            json!("a.b.c")
        );
    }
}
