//! Error types for scalar coercion.
//!
//! A scalar either fully succeeds with a normalized value or fails with one of
//! these errors. The query engine is expected to surface them to the caller as
//! input coercion failures; [`ScalarError::to_graphql_error`] renders the
//! error object it can put into a response.

/// Errors returned by scalar operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScalarError {
    /// The literal kind, variable type or internal value variant does not
    /// match what the scalar accepts.
    #[error("{scalar} cannot represent a {found} value, expected {expected}")]
    TypeMismatch {
        /// Name of the scalar.
        scalar: &'static str,
        /// Accepted kinds, e.g. `STRING` or `STRING or INT`.
        expected: &'static str,
        /// The kind that was received.
        found: &'static str,
    },

    /// The value has the right shape but fails the scalar's predicate.
    #[error("Invalid {scalar}: {message}")]
    Validation {
        /// Name of the scalar.
        scalar: &'static str,
        /// Why the value was rejected.
        message: String,
    },

    /// No scalar with this name is registered.
    #[error("Unknown scalar: {0}")]
    UnknownScalar(String),
}

impl ScalarError {
    /// Creates a new `TypeMismatch` error.
    #[must_use]
    pub fn type_mismatch(
        scalar: &'static str,
        expected: &'static str,
        found: &'static str,
    ) -> Self {
        Self::TypeMismatch {
            scalar,
            expected,
            found,
        }
    }

    /// Creates a new `Validation` error.
    #[must_use]
    pub fn validation(scalar: &'static str, message: impl Into<String>) -> Self {
        Self::Validation {
            scalar,
            message: message.into(),
        }
    }

    /// Creates a new `UnknownScalar` error.
    #[must_use]
    pub fn unknown_scalar(name: impl Into<String>) -> Self {
        Self::UnknownScalar(name.into())
    }

    /// Returns `true` if the value had the wrong kind.
    #[must_use]
    pub fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch { .. })
    }

    /// Returns `true` if the value had the right kind but was rejected.
    #[must_use]
    pub fn is_validation_error(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }

    /// Name of the scalar that failed, if the error came from one.
    #[must_use]
    pub fn scalar(&self) -> Option<&'static str> {
        match self {
            Self::TypeMismatch { scalar, .. } | Self::Validation { scalar, .. } => Some(*scalar),
            Self::UnknownScalar(_) => None,
        }
    }

    /// Returns the error code for GraphQL error extensions.
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::TypeMismatch { .. } => "TYPE_MISMATCH",
            Self::Validation { .. } => "VALIDATION_ERROR",
            Self::UnknownScalar(_) => "UNKNOWN_SCALAR",
        }
    }

    /// Converts the error to a GraphQL error object.
    #[must_use]
    pub fn to_graphql_error(&self) -> serde_json::Value {
        let mut extensions = serde_json::Map::new();
        extensions.insert("code".into(), self.error_code().into());
        if let Some(scalar) = self.scalar() {
            extensions.insert("scalar".into(), scalar.into());
        }

        serde_json::json!({
            "message": self.to_string(),
            "extensions": extensions,
        })
    }
}
