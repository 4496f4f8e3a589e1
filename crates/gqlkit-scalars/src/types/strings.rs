//! String-shaped scalars: opaque codes and tokens, emails, URLs, passwords,
//! times of day and semantic versions.

use std::sync::LazyLock;

use async_graphql_value::Value;
use serde_json::Value as JsonValue;
use tracing::trace;

use crate::Result;
use crate::kind::LiteralKind;
use crate::scalar::{CustomScalar, invalid, json_str, literal_str, mismatch, serialize_mismatch};
use crate::value::ScalarValue;

// =============================================================================
// Regex patterns for validation
// =============================================================================

/// Email address: dot-atom local part, dotted domain with at least one dot.
static EMAIL_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+(?:\.[a-zA-Z0-9!#$%&'*+/=?^_`{|}~-]+)*@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)+$",
    )
    .expect("Invalid email regex")
});

/// Time of day: HH:MM or HH:MM:SS
static TIME_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9](:[0-5][0-9])?$").expect("Invalid time regex")
});

/// Semantic version 2.0.0: MAJOR.MINOR.PATCH[-prerelease][+build]
static SEMVER_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(
        r"^(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)\.(0|[1-9][0-9]*)(?:-((?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*)(?:\.(?:0|[1-9][0-9]*|[0-9]*[a-zA-Z-][0-9a-zA-Z-]*))*))?(?:\+([0-9a-zA-Z-]+(?:\.[0-9a-zA-Z-]+)*))?$",
    )
    .expect("Invalid semver regex")
});

const EMAIL_MAX_LENGTH: usize = 254;
const EMAIL_LOCAL_MAX_LENGTH: usize = 64;

/// Passwords must be strictly longer than this many characters.
pub const PASSWORD_MIN_LENGTH: usize = 8;

fn serialize_string(scalar: &'static str, value: &ScalarValue) -> Result<JsonValue> {
    match value {
        ScalarValue::String(s) => Ok(JsonValue::String(s.clone())),
        other => Err(serialize_mismatch(scalar, "STRING", other)),
    }
}

fn opaque_literal(scalar: &'static str, literal: &Value) -> Result<ScalarValue> {
    let constant = literal
        .clone()
        .into_const()
        .ok_or_else(|| mismatch(scalar, "a constant value", LiteralKind::Variable))?;
    let json = constant
        .into_json()
        .map_err(|e| invalid(scalar, format!("literal is not representable as JSON: {e}")))?;
    Ok(ScalarValue::Json(json))
}

fn serialize_opaque(scalar: &'static str, value: &ScalarValue) -> Result<JsonValue> {
    match value {
        ScalarValue::Json(v) => Ok(v.clone()),
        other => Err(serialize_mismatch(scalar, "JSON", other)),
    }
}

// =============================================================================
// Code - opaque pass-through
// =============================================================================

/// `Code` - an opaque code, accepted as-is in any shape.
///
/// # Examples
/// - `"ABC-123"`
/// - `123456`
#[derive(Debug, Clone, Copy, Default)]
pub struct CodeScalar;

impl CustomScalar for CodeScalar {
    fn name(&self) -> &'static str {
        "Code"
    }

    fn description(&self) -> &'static str {
        "An opaque code, passed through unchanged"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        opaque_literal(self.name(), literal)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        Ok(ScalarValue::Json(value.clone()))
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        serialize_opaque(self.name(), value)
    }
}

// =============================================================================
// Token - opaque pass-through
// =============================================================================

/// `Token` - an opaque token, accepted as-is in any shape.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokenScalar;

impl CustomScalar for TokenScalar {
    fn name(&self) -> &'static str {
        "Token"
    }

    fn description(&self) -> &'static str {
        "An opaque token, passed through unchanged"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        opaque_literal(self.name(), literal)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        Ok(ScalarValue::Json(value.clone()))
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        serialize_opaque(self.name(), value)
    }
}

// =============================================================================
// Email - lower-cased email address
// =============================================================================

/// `Email` - an email address, normalized to lower case.
///
/// # Examples
/// - `user@example.com`
/// - `USER@Example.com` (stored as `user@example.com`)
#[derive(Debug, Clone, Copy, Default)]
pub struct EmailScalar;

impl EmailScalar {
    fn coerce(&self, s: &str) -> Result<ScalarValue> {
        let local_len = s.rfind('@').unwrap_or(0);
        if s.len() > EMAIL_MAX_LENGTH
            || local_len > EMAIL_LOCAL_MAX_LENGTH
            || !EMAIL_REGEX.is_match(s)
        {
            return Err(invalid(
                self.name(),
                format!("'{s}' is not a valid email address"),
            ));
        }
        trace!(scalar = self.name(), "accepted email");
        Ok(ScalarValue::String(s.to_lowercase()))
    }
}

impl CustomScalar for EmailScalar {
    fn name(&self) -> &'static str {
        "Email"
    }

    fn description(&self) -> &'static str {
        "An email address, normalized to lower case"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::String(s) => Ok(JsonValue::String(s.to_lowercase())),
            other => Err(serialize_mismatch(self.name(), "STRING", other)),
        }
    }
}

// =============================================================================
// Uri - absolute URL
// =============================================================================

/// `Uri` - an absolute URL.
///
/// # Examples
/// - `https://example.com/path?q=1`
/// - `mailto:someone@example.com`
#[derive(Debug, Clone, Copy, Default)]
pub struct UriScalar;

impl UriScalar {
    fn coerce(&self, s: &str) -> Result<ScalarValue> {
        match url::Url::parse(s) {
            Ok(_) => Ok(ScalarValue::String(s.to_owned())),
            Err(e) => Err(invalid(self.name(), format!("'{s}' is not a valid URL. {e}"))),
        }
    }
}

impl CustomScalar for UriScalar {
    fn name(&self) -> &'static str {
        "Uri"
    }

    fn description(&self) -> &'static str {
        "An absolute URL"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        serialize_string(self.name(), value)
    }
}

// =============================================================================
// Password - minimum length
// =============================================================================

/// `Password` - a password longer than eight characters.
///
/// Length is counted in Unicode scalar values, not bytes.
#[derive(Debug, Clone, Copy, Default)]
pub struct PasswordScalar;

impl PasswordScalar {
    fn coerce(&self, s: &str) -> Result<ScalarValue> {
        let length = s.chars().count();
        if length > PASSWORD_MIN_LENGTH {
            Ok(ScalarValue::String(s.to_owned()))
        } else {
            // Never echo the password itself.
            Err(invalid(
                self.name(),
                format!("must be longer than {PASSWORD_MIN_LENGTH} characters, got {length}"),
            ))
        }
    }
}

impl CustomScalar for PasswordScalar {
    fn name(&self) -> &'static str {
        "Password"
    }

    fn description(&self) -> &'static str {
        "A password longer than 8 characters"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        serialize_string(self.name(), value)
    }
}

// =============================================================================
// Time - time of day
// =============================================================================

/// `Time` - a time of day.
///
/// Format: `HH:MM` or `HH:MM:SS`
///
/// # Examples
/// - `09:30`
/// - `23:59:59`
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeScalar;

impl TimeScalar {
    fn coerce(&self, s: &str) -> Result<ScalarValue> {
        if TIME_REGEX.is_match(s) {
            Ok(ScalarValue::String(s.to_owned()))
        } else {
            Err(invalid(
                self.name(),
                format!("'{s}'. Expected: HH:MM or HH:MM:SS"),
            ))
        }
    }
}

impl CustomScalar for TimeScalar {
    fn name(&self) -> &'static str {
        "Time"
    }

    fn description(&self) -> &'static str {
        "A time of day (HH:MM or HH:MM:SS)"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        serialize_string(self.name(), value)
    }
}

// =============================================================================
// SemanticVersion - semver 2.0.0
// =============================================================================

/// `SemanticVersion` - a semantic version string.
///
/// Format: `MAJOR.MINOR.PATCH[-prerelease][+build]`. Numeric identifiers may
/// not carry leading zeros.
///
/// # Examples
/// - `1.0.0`
/// - `1.2.3-beta.1+build.5`
#[derive(Debug, Clone, Copy, Default)]
pub struct SemanticVersionScalar;

impl SemanticVersionScalar {
    fn coerce(&self, s: &str) -> Result<ScalarValue> {
        if SEMVER_REGEX.is_match(s) {
            Ok(ScalarValue::String(s.to_owned()))
        } else {
            Err(invalid(
                self.name(),
                format!("'{s}'. Expected: MAJOR.MINOR.PATCH[-prerelease][+build]"),
            ))
        }
    }
}

impl CustomScalar for SemanticVersionScalar {
    fn name(&self) -> &'static str {
        "SemanticVersion"
    }

    fn description(&self) -> &'static str {
        "A semantic version (MAJOR.MINOR.PATCH[-prerelease][+build])"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        serialize_string(self.name(), value)
    }
}

// =============================================================================
// Tests
// =============================================================================
