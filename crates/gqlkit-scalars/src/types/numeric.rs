//! Numeric scalars: unsigned integers, page sizes and floating-point
//! timestamps.

use async_graphql_value::Value;
use serde_json::Value as JsonValue;

use crate::Result;
use crate::kind::LiteralKind;
use crate::scalar::{CustomScalar, invalid, json_int, literal_int, mismatch, serialize_mismatch};
use crate::value::ScalarValue;

/// Largest page a client may request.
pub const PAGE_SIZE_MAX: i64 = 100;

// =============================================================================
// UInt - non-negative integer (>= 0)
// =============================================================================

/// `UInt` - a non-negative integer.
///
/// Any integer in the range 0 to 18,446,744,073,709,551,615.
#[derive(Debug, Clone, Copy, Default)]
pub struct UIntScalar;

impl UIntScalar {
    fn coerce(&self, num: i128) -> Result<ScalarValue> {
        if num < 0 {
            return Err(invalid(self.name(), format!("must be >= 0, got {num}")));
        }
        u64::try_from(num).map(ScalarValue::UInt).map_err(|_| {
            invalid(
                self.name(),
                format!("exceeds maximum value ({}), got {num}", u64::MAX),
            )
        })
    }
}

impl CustomScalar for UIntScalar {
    fn name(&self) -> &'static str {
        "UInt"
    }

    fn description(&self) -> &'static str {
        "A non-negative integer (>= 0)"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_int(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_int(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::UInt(n) => Ok(JsonValue::from(*n)),
            other => Err(serialize_mismatch(self.name(), "UINT", other)),
        }
    }
}

// =============================================================================
// PageSize - integer in [0, 100]
// =============================================================================

/// `PageSize` - number of items per page, from 0 to 100 inclusive.
#[derive(Debug, Clone, Copy, Default)]
pub struct PageSizeScalar;

impl PageSizeScalar {
    fn coerce(&self, num: i128) -> Result<ScalarValue> {
        if num < 0 {
            Err(invalid(self.name(), format!("must be >= 0, got {num}")))
        } else if num > i128::from(PAGE_SIZE_MAX) {
            Err(invalid(
                self.name(),
                format!("must be <= {PAGE_SIZE_MAX}, got {num}"),
            ))
        } else {
            // In range, so the narrowing cannot fail.
            Ok(ScalarValue::Int(num as i64))
        }
    }
}

impl CustomScalar for PageSizeScalar {
    fn name(&self) -> &'static str {
        "PageSize"
    }

    fn description(&self) -> &'static str {
        "Number of items per page (0 to 100)"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_int(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_int(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::Int(n) => Ok(JsonValue::from(*n)),
            other => Err(serialize_mismatch(self.name(), "INT", other)),
        }
    }
}

// =============================================================================
// Timestamp - floating-point number
// =============================================================================

/// `Timestamp` - a floating-point timestamp.
///
/// Literals must be written as floats (`1623456789.5`). Variables may be any
/// JSON number, since JSON does not distinguish integers from floats.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimestampScalar;

impl TimestampScalar {
    fn coerce(&self, n: &serde_json::Number) -> Result<ScalarValue> {
        match n.as_f64() {
            Some(f) if f.is_finite() => Ok(ScalarValue::Float(f)),
            _ => Err(invalid(self.name(), format!("'{n}' is not a finite number"))),
        }
    }
}

impl CustomScalar for TimestampScalar {
    fn name(&self) -> &'static str {
        "Timestamp"
    }

    fn description(&self) -> &'static str {
        "A floating-point timestamp"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        match literal {
            Value::Number(n) if n.is_f64() => self.coerce(n),
            other => Err(mismatch(self.name(), "FLOAT", LiteralKind::of_literal(other))),
        }
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        match value {
            JsonValue::Number(n) => self.coerce(n),
            other => Err(mismatch(self.name(), "FLOAT", LiteralKind::of_json(other))),
        }
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::Float(f) => serde_json::Number::from_f64(*f)
                .map(JsonValue::Number)
                .ok_or_else(|| invalid(self.name(), format!("'{f}' is not a finite number"))),
            other => Err(serialize_mismatch(self.name(), "FLOAT", other)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
