//! JWT verification strategy for the `Jwt` scalar.
//!
//! The scalar itself only checks that it received a string. Signature and
//! payload checks depend on a per-deployment secret, so they are supplied as
//! a [`JwtVerifier`] when the registry is built.
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use gqlkit_scalars::{HmacJwtVerifier, JwtConfig, ScalarRegistry};
//!
//! let verifier = HmacJwtVerifier::new(&jwt_config);
//! let registry = ScalarRegistry::builder()
//!     .with_jwt_verifier(Arc::new(verifier))
//!     .build();
//! ```

use std::fmt;

use jsonwebtoken::{DecodingKey, Validation, decode};
use serde_json::{Map, Value as JsonValue};
use tracing::debug;

use crate::config::JwtConfig;

// ============================================================================
// Error Types
// ============================================================================

/// Errors that can occur while verifying a token.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum JwtError {
    /// The token could not be decoded.
    #[error("Malformed token: {message}")]
    Malformed {
        /// Description of the decoding error.
        message: String,
    },

    /// The token signature is invalid.
    #[error("Invalid signature")]
    InvalidSignature,

    /// The token has expired.
    #[error("Token expired")]
    Expired,

    /// The token claims are invalid.
    #[error("Invalid claims: {message}")]
    InvalidClaims {
        /// Description of why claims are invalid.
        message: String,
    },

    /// A required claim is missing.
    #[error("Missing required claim: {claim}")]
    MissingClaim {
        /// Name of the missing claim.
        claim: String,
    },
}

impl JwtError {
    /// Creates a new `Malformed` error.
    #[must_use]
    pub fn malformed(message: impl Into<String>) -> Self {
        Self::Malformed {
            message: message.into(),
        }
    }

    /// Creates a new `InvalidClaims` error.
    #[must_use]
    pub fn invalid_claims(message: impl Into<String>) -> Self {
        Self::InvalidClaims {
            message: message.into(),
        }
    }

    /// Creates a new `MissingClaim` error.
    #[must_use]
    pub fn missing_claim(claim: impl Into<String>) -> Self {
        Self::MissingClaim {
            claim: claim.into(),
        }
    }
}

impl From<jsonwebtoken::errors::Error> for JwtError {
    fn from(err: jsonwebtoken::errors::Error) -> Self {
        use jsonwebtoken::errors::ErrorKind;

        match err.kind() {
            ErrorKind::ExpiredSignature => Self::Expired,
            ErrorKind::InvalidSignature => Self::InvalidSignature,
            ErrorKind::MissingRequiredClaim(claim) => Self::missing_claim(claim.clone()),
            ErrorKind::InvalidAudience
            | ErrorKind::InvalidIssuer
            | ErrorKind::InvalidSubject
            | ErrorKind::ImmatureSignature => Self::invalid_claims(err.to_string()),
            _ => Self::malformed(err.to_string()),
        }
    }
}

// ============================================================================
// Verifier
// ============================================================================

/// Verifies a raw JWT on behalf of the `Jwt` scalar.
pub trait JwtVerifier: Send + Sync {
    /// Checks the token.
    ///
    /// # Errors
    ///
    /// Returns a [`JwtError`] describing why the token was rejected.
    fn verify(&self, token: &str) -> Result<(), JwtError>;
}

impl<F> JwtVerifier for F
where
    F: Fn(&str) -> Result<(), JwtError> + Send + Sync,
{
    fn verify(&self, token: &str) -> Result<(), JwtError> {
        self(token)
    }
}

/// HMAC (HS256/HS384/HS512) verifier with a shared secret.
///
/// Besides the signature it checks `exp` (with leeway), the optional `iss` and
/// `aud` values, and that every configured payload claim is present.
pub struct HmacJwtVerifier {
    key: DecodingKey,
    validation: Validation,
    required_claims: Vec<String>,
}

impl HmacJwtVerifier {
    /// Creates a verifier from JWT configuration.
    #[must_use]
    pub fn new(config: &JwtConfig) -> Self {
        let mut validation = Validation::new(config.algorithm.into());
        validation.leeway = config.leeway_secs;

        validation.required_spec_claims.clear();
        if config.require_exp {
            validation.set_required_spec_claims(&["exp"]);
        }

        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        match &config.audience {
            Some(audience) => validation.set_audience(&[audience]),
            None => validation.validate_aud = false,
        }

        Self {
            key: DecodingKey::from_secret(config.secret.as_bytes()),
            validation,
            required_claims: config.required_claims.clone(),
        }
    }

    /// Payload claims every token must carry.
    #[must_use]
    pub fn required_claims(&self) -> &[String] {
        &self.required_claims
    }
}

impl fmt::Debug for HmacJwtVerifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HmacJwtVerifier")
            .field("algorithms", &self.validation.algorithms)
            .field("required_claims", &self.required_claims)
            .finish_non_exhaustive()
    }
}

impl JwtVerifier for HmacJwtVerifier {
    fn verify(&self, token: &str) -> Result<(), JwtError> {
        let data = decode::<Map<String, JsonValue>>(token, &self.key, &self.validation)
            .map_err(JwtError::from)?;

        if let Some(claim) = self
            .required_claims
            .iter()
            .find(|claim| !data.claims.contains_key(claim.as_str()))
        {
            debug!(claim = %claim, "token is missing a required claim");
            return Err(JwtError::missing_claim(claim.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::JwtAlgorithm;
    use jsonwebtoken::{EncodingKey, Header, encode};
    use serde_json::json;
    use time::OffsetDateTime;

    const SECRET: &str = "test-secret-that-is-long-enough";

    fn config() -> JwtConfig {
        JwtConfig {
            secret: SECRET.to_string(),
            ..JwtConfig::default()
        }
    }

    fn sign(claims: &JsonValue, secret: &str) -> String {
        encode(
            &Header::default(),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn in_one_hour() -> i64 {
        OffsetDateTime::now_utc().unix_timestamp() + 3600
    }

    #[test]
    fn test_valid_token() {
        let verifier = HmacJwtVerifier::new(&config());
        let token = sign(&json!({"sub": "user-1", "exp": in_one_hour()}), SECRET);
        assert_eq!(verifier.verify(&token), Ok(()));
    }

    #[test]
    fn test_wrong_secret() {
        let verifier = HmacJwtVerifier::new(&config());
        let token = sign(&json!({"exp": in_one_hour()}), "another-secret");
        assert_eq!(verifier.verify(&token), Err(JwtError::InvalidSignature));
    }

    #[test]
    fn test_expired_token() {
        let verifier = HmacJwtVerifier::new(&config());
        let exp = OffsetDateTime::now_utc().unix_timestamp() - 3600;
        let token = sign(&json!({"exp": exp}), SECRET);
        assert_eq!(verifier.verify(&token), Err(JwtError::Expired));
    }

    #[test]
    fn test_missing_exp() {
        let verifier = HmacJwtVerifier::new(&config());
        let token = sign(&json!({"sub": "user-1"}), SECRET);
        assert_eq!(
            verifier.verify(&token),
            Err(JwtError::missing_claim("exp"))
        );

        let lenient = HmacJwtVerifier::new(&JwtConfig {
            require_exp: false,
            ..config()
        });
        assert_eq!(lenient.verify(&token), Ok(()));
    }

    #[test]
    fn test_required_claims() {
        let verifier = HmacJwtVerifier::new(&JwtConfig {
            required_claims: vec!["sub".into(), "role".into()],
            ..config()
        });

        let token = sign(&json!({"sub": "u", "exp": in_one_hour()}), SECRET);
        assert_eq!(
            verifier.verify(&token),
            Err(JwtError::missing_claim("role"))
        );

        let token = sign(
            &json!({"sub": "u", "role": "admin", "exp": in_one_hour()}),
            SECRET,
        );
        assert_eq!(verifier.verify(&token), Ok(()));
    }

    #[test]
    fn test_issuer_and_audience() {
        let verifier = HmacJwtVerifier::new(&JwtConfig {
            issuer: Some("https://issuer.example".into()),
            audience: Some("api".into()),
            ..config()
        });

        let token = sign(
            &json!({"iss": "https://issuer.example", "aud": "api", "exp": in_one_hour()}),
            SECRET,
        );
        assert_eq!(verifier.verify(&token), Ok(()));

        let token = sign(
            &json!({"iss": "https://evil.example", "aud": "api", "exp": in_one_hour()}),
            SECRET,
        );
        assert!(matches!(
            verifier.verify(&token),
            Err(JwtError::InvalidClaims { .. })
        ));
    }

    #[test]
    fn test_algorithm_mismatch() {
        let verifier = HmacJwtVerifier::new(&JwtConfig {
            algorithm: JwtAlgorithm::HS512,
            ..config()
        });
        let token = sign(&json!({"exp": in_one_hour()}), SECRET);
        assert!(verifier.verify(&token).is_err());
    }

    #[test]
    fn test_garbage_token() {
        let verifier = HmacJwtVerifier::new(&config());
        assert!(matches!(
            verifier.verify("not-a-jwt"),
            Err(JwtError::Malformed { .. })
        ));
    }

    #[test]
    fn test_closure_verifier() {
        let verifier = |token: &str| {
            if token == "let-me-in" {
                Ok(())
            } else {
                Err(JwtError::InvalidSignature)
            }
        };
        assert!(JwtVerifier::verify(&verifier, "let-me-in").is_ok());
        assert!(JwtVerifier::verify(&verifier, "nope").is_err());
    }

    #[test]
    fn test_debug_hides_key() {
        let verifier = HmacJwtVerifier::new(&config());
        assert!(!format!("{verifier:?}").contains(SECRET));
    }
}
