//! Name-keyed scalar registry.
//!
//! `ScalarRegistry` maps scalar names to their implementations. It is built
//! once, never mutated afterwards, and can be shared freely between threads.
//!
//! # Example
//!
//! ```ignore
//! let registry = ScalarRegistry::from_config(&config)?;
//!
//! let page = registry.parse_value("PageSize", &json!(25))?;
//! let out = registry.serialize("PageSize", &page)?;
//! ```

use std::fmt;
use std::sync::{Arc, LazyLock};

use async_graphql_value::Value;
use indexmap::IndexMap;
use serde_json::Value as JsonValue;
use tracing::{debug, trace, warn};

use crate::Result;
use crate::config::{ConfigError, ScalarsConfig};
use crate::error::ScalarError;
use crate::jwt::{HmacJwtVerifier, JwtVerifier};
use crate::scalar::CustomScalar;
use crate::types::{
    CalendarDateScalar, CodeScalar, DateScalar, EmailScalar, JwtScalar, MultiFormatDateScalar,
    PageSizeScalar, PasswordScalar, SemanticVersionScalar, TimeScalar, TimestampScalar,
    TokenScalar, UIntScalar, UriScalar,
};
use crate::value::ScalarValue;

static DEFAULT_REGISTRY: LazyLock<ScalarRegistry> = LazyLock::new(ScalarRegistry::standard);

/// The process-wide standard registry.
///
/// Built on first use. Its `Jwt` scalar does not verify tokens; build a
/// registry with [`ScalarRegistry::builder`] or [`ScalarRegistry::from_config`]
/// to inject a verifier.
pub fn registry() -> &'static ScalarRegistry {
    &DEFAULT_REGISTRY
}

/// Read-only mapping from scalar name to implementation.
pub struct ScalarRegistry {
    scalars: IndexMap<&'static str, Arc<dyn CustomScalar>>,
}

impl ScalarRegistry {
    /// Starts a builder preloaded with the standard scalars.
    #[must_use]
    pub fn builder() -> ScalarRegistryBuilder {
        ScalarRegistryBuilder::new()
    }

    /// All standard scalars, with a pass-through `Jwt`.
    #[must_use]
    pub fn standard() -> Self {
        Self::builder().build()
    }

    /// Standard scalars configured from `config`.
    ///
    /// When `[jwt]` is present the `Jwt` scalar verifies tokens with an
    /// [`HmacJwtVerifier`].
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration fails validation.
    pub fn from_config(config: &ScalarsConfig) -> std::result::Result<Self, ConfigError> {
        config.validate()?;

        let mut builder = Self::builder();
        if let Some(jwt) = &config.jwt {
            builder = builder.with_jwt_verifier(Arc::new(HmacJwtVerifier::new(jwt)));
        }
        Ok(builder.build())
    }

    /// Looks up a scalar by name.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&dyn CustomScalar> {
        self.scalars.get(name).map(|s| &**s)
    }

    /// Looks up a scalar by name, failing with `UnknownScalar`.
    ///
    /// # Errors
    ///
    /// Returns [`ScalarError::UnknownScalar`] if no scalar has this name.
    pub fn scalar(&self, name: &str) -> Result<&dyn CustomScalar> {
        self.get(name).ok_or_else(|| {
            debug!(scalar = name, "lookup of unknown scalar");
            ScalarError::unknown_scalar(name)
        })
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.scalars.contains_key(name)
    }

    /// Scalar names in registration order.
    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.scalars.keys().copied()
    }

    /// Scalars in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &dyn CustomScalar> + '_ {
        self.scalars.values().map(|s| &**s)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.scalars.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.scalars.is_empty()
    }

    /// Coerces a literal with the scalar called `name`.
    ///
    /// # Errors
    ///
    /// `UnknownScalar`, or whatever the scalar's `parse_literal` returns.
    pub fn parse_literal(&self, name: &str, literal: &Value) -> Result<ScalarValue> {
        let value = self.scalar(name)?.parse_literal(literal)?;
        trace!(scalar = name, "coerced literal");
        Ok(value)
    }

    /// Coerces a variable value with the scalar called `name`.
    ///
    /// # Errors
    ///
    /// `UnknownScalar`, or whatever the scalar's `parse_value` returns.
    pub fn parse_value(&self, name: &str, value: &JsonValue) -> Result<ScalarValue> {
        let value = self.scalar(name)?.parse_value(value)?;
        trace!(scalar = name, "coerced variable");
        Ok(value)
    }

    /// Serializes an internal value with the scalar called `name`.
    ///
    /// # Errors
    ///
    /// `UnknownScalar`, or whatever the scalar's `serialize` returns.
    pub fn serialize(&self, name: &str, value: &ScalarValue) -> Result<JsonValue> {
        self.scalar(name)?.serialize(value)
    }
}

impl Default for ScalarRegistry {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Debug for ScalarRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScalarRegistry")
            .field("scalars", &self.scalars.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Builder for [`ScalarRegistry`].
pub struct ScalarRegistryBuilder {
    jwt_verifier: Option<Arc<dyn JwtVerifier>>,
    extra: Vec<Arc<dyn CustomScalar>>,
}

impl ScalarRegistryBuilder {
    fn new() -> Self {
        Self {
            jwt_verifier: None,
            extra: Vec::new(),
        }
    }

    /// Verifies `Jwt` values with `verifier`.
    #[must_use]
    pub fn with_jwt_verifier(mut self, verifier: Arc<dyn JwtVerifier>) -> Self {
        self.jwt_verifier = Some(verifier);
        self
    }

    /// Adds a scalar, replacing any standard scalar with the same name.
    #[must_use]
    pub fn register(mut self, scalar: Arc<dyn CustomScalar>) -> Self {
        self.extra.push(scalar);
        self
    }

    /// Builds the registry.
    #[must_use]
    pub fn build(self) -> ScalarRegistry {
        let jwt = match self.jwt_verifier {
            Some(verifier) => JwtScalar::with_verifier(verifier),
            None => JwtScalar::new(),
        };

        let standard: [Arc<dyn CustomScalar>; 14] = [
            Arc::new(CodeScalar),
            Arc::new(TokenScalar),
            Arc::new(EmailScalar),
            Arc::new(UriScalar),
            Arc::new(jwt),
            Arc::new(PasswordScalar),
            Arc::new(UIntScalar),
            Arc::new(PageSizeScalar),
            Arc::new(DateScalar),
            Arc::new(CalendarDateScalar),
            Arc::new(TimeScalar),
            Arc::new(TimestampScalar),
            Arc::new(MultiFormatDateScalar),
            Arc::new(SemanticVersionScalar),
        ];

        let mut scalars = IndexMap::with_capacity(standard.len() + self.extra.len());
        for scalar in standard {
            scalars.insert(scalar.name(), scalar);
        }
        for scalar in self.extra {
            if scalars.insert(scalar.name(), Arc::clone(&scalar)).is_some() {
                warn!(
                    scalar = scalar.name(),
                    "custom scalar replaces a previously registered scalar"
                );
            }
        }

        debug!(count = scalars.len(), "scalar registry built");
        ScalarRegistry { scalars }
    }
}
