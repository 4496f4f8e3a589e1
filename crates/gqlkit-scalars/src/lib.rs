//! # gqlkit-scalars
//!
//! Custom GraphQL scalar types that validate and normalize values at the type
//! boundary.
//!
//! Every scalar exposes the same three operations through [`CustomScalar`]:
//!
//! - `parse_literal` - coerce an inline literal from a request document
//! - `parse_value` - coerce a value supplied through request variables
//! - `serialize` - render an internal value for a response payload
//!
//! ## Overview
//!
//! The query engine owns the documents and variables. It hands literal nodes
//! (`async_graphql_value::Value`) and decoded variables (`serde_json::Value`)
//! to a [`ScalarRegistry`], which looks the scalar up by name and returns
//! either a normalized [`ScalarValue`] or a [`ScalarError`].
//!
//! ```ignore
//! use gqlkit_scalars::registry;
//! use serde_json::json;
//!
//! let email = registry().parse_value("Email", &json!("USER@Example.com"))?;
//! assert_eq!(email.as_str(), Some("user@example.com"));
//! ```
//!
//! ## Scalars
//!
//! - Opaque: `Code`, `Token`
//! - Strings: `Email`, `Uri`, `Jwt`, `Password`, `Time`, `SemanticVersion`
//! - Numbers: `UInt`, `PageSize`, `Timestamp`
//! - Dates: `Date`, `CalendarDate`, `MultiFormatDate`
//!
//! ## Configuration
//!
//! JWT verification is optional and configured in TOML:
//!
//! ```toml
//! [jwt]
//! secret = "change-me"
//! algorithm = "HS256"
//! required_claims = ["sub"]
//! ```
//!
//! ## Modules
//!
//! - [`config`] - Configuration options
//! - [`error`] - Error types for scalar coercion
//! - [`jwt`] - Injected JWT verification strategy
//! - [`registry`] - Name-keyed scalar registry
//! - [`types`] - The scalar implementations

pub mod config;
pub mod error;
pub mod jwt;
pub mod kind;
pub mod registry;
pub mod scalar;
pub mod types;
pub mod value;

// Re-export main types
pub use config::{ConfigError, JwtConfig, ScalarsConfig};
pub use error::ScalarError;
pub use jwt::{HmacJwtVerifier, JwtError, JwtVerifier};
pub use kind::LiteralKind;
pub use registry::{ScalarRegistry, ScalarRegistryBuilder, registry};
pub use scalar::CustomScalar;
pub use value::ScalarValue;

/// Result type for scalar operations.
pub type Result<T> = std::result::Result<T, ScalarError>;
