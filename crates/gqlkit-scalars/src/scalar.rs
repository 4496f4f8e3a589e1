//! The three-operation scalar contract.

use async_graphql_value::Value;
use serde_json::Value as JsonValue;
use tracing::debug;

use crate::Result;
use crate::error::ScalarError;
use crate::kind::LiteralKind;
use crate::value::ScalarValue;

/// A custom scalar type.
///
/// `parse_literal` and `parse_value` must agree: equivalent logical input on
/// either path yields the same [`ScalarValue`], and neither ever returns a
/// value that fails the scalar's predicate. `serialize` trusts its input and
/// only rejects internal values of the wrong variant.
pub trait CustomScalar: Send + Sync {
    /// Name of the scalar as it appears in the schema.
    fn name(&self) -> &'static str;

    /// Human readable description for schema documentation.
    fn description(&self) -> &'static str;

    /// Coerces an inline literal from a request document.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the literal kind is not accepted, `Validation` if the
    /// value fails the scalar's predicate.
    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue>;

    /// Coerces a decoded variable value.
    ///
    /// # Errors
    ///
    /// Same as [`CustomScalar::parse_literal`].
    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue>;

    /// Renders an internal value for a response payload.
    ///
    /// # Errors
    ///
    /// `TypeMismatch` if the value is not a variant this scalar produces.
    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue>;
}

pub(crate) fn mismatch(
    scalar: &'static str,
    expected: &'static str,
    found: LiteralKind,
) -> ScalarError {
    debug!(scalar, kind = %found, "rejected value of unexpected kind");
    ScalarError::type_mismatch(scalar, expected, found.as_str())
}

pub(crate) fn invalid(scalar: &'static str, message: impl Into<String>) -> ScalarError {
    let err = ScalarError::validation(scalar, message);
    debug!(scalar, error = %err, "rejected invalid value");
    err
}

pub(crate) fn serialize_mismatch(
    scalar: &'static str,
    expected: &'static str,
    value: &ScalarValue,
) -> ScalarError {
    ScalarError::type_mismatch(scalar, expected, value.variant_name())
}

/// Borrows the string of a STRING literal.
pub(crate) fn literal_str<'a>(scalar: &'static str, literal: &'a Value) -> Result<&'a str> {
    match literal {
        Value::String(s) => Ok(s.as_str()),
        other => Err(mismatch(scalar, "STRING", LiteralKind::of_literal(other))),
    }
}

/// Borrows the string of a string variable.
pub(crate) fn json_str<'a>(scalar: &'static str, value: &'a JsonValue) -> Result<&'a str> {
    match value {
        JsonValue::String(s) => Ok(s.as_str()),
        other => Err(mismatch(scalar, "STRING", LiteralKind::of_json(other))),
    }
}

/// Integer of an INT literal or integer variable, as `i128` so that both
/// signed and unsigned 64-bit inputs fit.
pub(crate) fn number_int(scalar: &'static str, n: &serde_json::Number) -> Result<i128> {
    if let Some(v) = n.as_i64() {
        Ok(i128::from(v))
    } else if let Some(v) = n.as_u64() {
        Ok(i128::from(v))
    } else {
        Err(mismatch(scalar, "INT", LiteralKind::Float))
    }
}

pub(crate) fn literal_int(scalar: &'static str, literal: &Value) -> Result<i128> {
    match literal {
        Value::Number(n) => number_int(scalar, n),
        other => Err(mismatch(scalar, "INT", LiteralKind::of_literal(other))),
    }
}

pub(crate) fn json_int(scalar: &'static str, value: &JsonValue) -> Result<i128> {
    match value {
        JsonValue::Number(n) => number_int(scalar, n),
        other => Err(mismatch(scalar, "INT", LiteralKind::of_json(other))),
    }
}
