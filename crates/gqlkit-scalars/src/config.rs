//! Scalar registry configuration.
//!
//! Configuration is read from TOML. Only JWT verification is configurable;
//! every other scalar has a fixed contract.
//!
//! # Example Configuration
//!
//! ```toml
//! [jwt]
//! secret = "change-me"
//! algorithm = "HS256"
//! issuer = "https://auth.example.com"
//! leeway_secs = 60
//! required_claims = ["sub"]
//! ```

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Error types for configuration operations
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Validation error: {0}")]
    Validation(String),
}

impl ConfigError {
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}

/// Top-level scalar configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScalarsConfig {
    /// JWT verification for the `Jwt` scalar.
    /// Default: none (tokens are only checked to be strings)
    #[serde(default)]
    pub jwt: Option<JwtConfig>,
}

impl ScalarsConfig {
    /// Parses and validates configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or fails validation.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source).map_err(|e| ConfigError::parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML configuration file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, or as
    /// [`ScalarsConfig::from_toml_str`].
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if let Some(jwt) = &self.jwt {
            jwt.validate()?;
        }
        Ok(())
    }
}

/// HMAC algorithms accepted for JWT signatures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum JwtAlgorithm {
    #[default]
    HS256,
    HS384,
    HS512,
}

impl From<JwtAlgorithm> for jsonwebtoken::Algorithm {
    fn from(alg: JwtAlgorithm) -> Self {
        match alg {
            JwtAlgorithm::HS256 => Self::HS256,
            JwtAlgorithm::HS384 => Self::HS384,
            JwtAlgorithm::HS512 => Self::HS512,
        }
    }
}

/// JWT verification settings.
#[derive(Clone, Serialize, Deserialize)]
pub struct JwtConfig {
    /// Shared HMAC secret.
    pub secret: String,

    /// Signature algorithm.
    /// Default: HS256
    #[serde(default)]
    pub algorithm: JwtAlgorithm,

    /// Expected `iss` claim, if any.
    #[serde(default)]
    pub issuer: Option<String>,

    /// Expected `aud` claim, if any.
    #[serde(default)]
    pub audience: Option<String>,

    /// Clock skew tolerated when checking `exp`, in seconds.
    /// Default: 60
    #[serde(default = "default_leeway_secs")]
    pub leeway_secs: u64,

    /// Reject tokens without an `exp` claim.
    /// Default: true
    #[serde(default = "default_require_exp")]
    pub require_exp: bool,

    /// Payload claims every token must carry.
    /// Default: none
    #[serde(default)]
    pub required_claims: Vec<String>,
}

fn default_leeway_secs() -> u64 {
    60
}

fn default_require_exp() -> bool {
    true
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: String::new(),
            algorithm: JwtAlgorithm::default(),
            issuer: None,
            audience: None,
            leeway_secs: default_leeway_secs(),
            require_exp: default_require_exp(),
            required_claims: Vec::new(),
        }
    }
}

impl fmt::Debug for JwtConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JwtConfig")
            .field("secret", &"<redacted>")
            .field("algorithm", &self.algorithm)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .field("leeway_secs", &self.leeway_secs)
            .field("require_exp", &self.require_exp)
            .field("required_claims", &self.required_claims)
            .finish()
    }
}

impl JwtConfig {
    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration values are invalid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.secret.is_empty() {
            return Err(ConfigError::validation("jwt.secret must not be empty"));
        }
        if let Some(claim) = self.required_claims.iter().find(|c| c.trim().is_empty()) {
            return Err(ConfigError::validation(format!(
                "jwt.required_claims contains an empty claim name: {claim:?}"
            )));
        }
        Ok(())
    }
}
