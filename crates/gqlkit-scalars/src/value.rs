//! Internal scalar values.

use serde_json::Value as JsonValue;
use time::{Date, OffsetDateTime};

/// The normalized, validated representation of a scalar after parsing.
#[derive(Debug, Clone, PartialEq)]
pub enum ScalarValue {
    /// Opaque value passed through unchanged (`Code`, `Token`).
    Json(JsonValue),
    String(String),
    Int(i64),
    UInt(u64),
    Float(f64),
    /// A UTC date-time with millisecond precision.
    DateTime(OffsetDateTime),
    Date(Date),
}

impl ScalarValue {
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Int(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Self::UInt(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Float(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_datetime(&self) -> Option<OffsetDateTime> {
        match self {
            Self::DateTime(dt) => Some(*dt),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_date(&self) -> Option<Date> {
        match self {
            Self::Date(d) => Some(*d),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_json(&self) -> Option<&JsonValue> {
        match self {
            Self::Json(v) => Some(v),
            _ => None,
        }
    }

    /// Name of the variant, used when `serialize` receives the wrong one.
    #[must_use]
    pub fn variant_name(&self) -> &'static str {
        match self {
            Self::Json(_) => "JSON",
            Self::String(_) => "STRING",
            Self::Int(_) => "INT",
            Self::UInt(_) => "UINT",
            Self::Float(_) => "FLOAT",
            Self::DateTime(_) => "DATETIME",
            Self::Date(_) => "DATE",
        }
    }
}

impl From<String> for ScalarValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for ScalarValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_owned())
    }
}
