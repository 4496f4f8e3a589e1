//! Date scalars: ISO-8601 date-times, calendar dates and the multi-format
//! epoch-millisecond date.
//!
//! Date-times are normalized to UTC with millisecond precision, so the
//! rendered `YYYY-MM-DDTHH:MM:SS.sssZ` form parses back to the same instant.

use std::sync::LazyLock;

use async_graphql_value::Value;
use serde_json::Value as JsonValue;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime, UtcOffset};

use crate::Result;
use crate::kind::LiteralKind;
use crate::scalar::{
    CustomScalar, invalid, json_str, literal_str, mismatch, number_int, serialize_mismatch,
};
use crate::value::ScalarValue;

/// Calendar date: YYYY-MM-DD
static CALENDAR_DATE_REGEX: LazyLock<regex::Regex> = LazyLock::new(|| {
    regex::Regex::new(r"^[0-9]{4}-(0[1-9]|1[0-2])-(0[1-9]|[12][0-9]|3[01])$")
        .expect("Invalid calendar date regex")
});

const NANOS_PER_MILLI: i128 = 1_000_000;

/// `0000-01-01T00:00:00.000Z` in epoch milliseconds.
const MIN_EPOCH_MILLIS: i128 = -62_167_219_200_000;

/// `9999-12-31T23:59:59.999Z` in epoch milliseconds.
const MAX_EPOCH_MILLIS: i128 = 253_402_300_799_999;

/// Parses an RFC 3339 date-time, or a bare `YYYY-MM-DD` as midnight UTC.
fn parse_datetime(scalar: &'static str, s: &str) -> Result<OffsetDateTime> {
    let parsed = OffsetDateTime::parse(s, &Rfc3339).or_else(|rfc_err| {
        Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(|d| d.midnight().assume_utc())
            .map_err(|_| rfc_err)
    });

    let dt = parsed
        .map_err(|e| invalid(scalar, format!("'{s}' is not a valid date-time: {e}")))?;
    let utc = dt
        .checked_to_offset(UtcOffset::UTC)
        .ok_or_else(|| invalid(scalar, format!("'{s}' is out of range")))?;

    // Only four-digit years render back to a parseable string.
    if !(0..=9999).contains(&utc.year()) {
        return Err(invalid(
            scalar,
            format!("'{s}' falls outside years 0000-9999 in UTC"),
        ));
    }
    truncate_to_millis(scalar, utc)
}

fn truncate_to_millis(scalar: &'static str, dt: OffsetDateTime) -> Result<OffsetDateTime> {
    dt.replace_nanosecond(u32::from(dt.millisecond()) * 1_000_000)
        .map_err(|e| invalid(scalar, e.to_string()))
}

fn format_datetime(scalar: &'static str, dt: OffsetDateTime) -> Result<String> {
    dt.checked_to_offset(UtcOffset::UTC)
        .ok_or_else(|| invalid(scalar, "date-time out of range"))?
        .format(format_description!(
            "[year]-[month]-[day]T[hour]:[minute]:[second].[subsecond digits:3]Z"
        ))
        .map_err(|e| invalid(scalar, format!("cannot format date-time: {e}")))
}

fn epoch_millis(scalar: &'static str, dt: OffsetDateTime) -> Result<i64> {
    i64::try_from(dt.unix_timestamp_nanos().div_euclid(NANOS_PER_MILLI))
        .map_err(|_| invalid(scalar, "date-time out of range"))
}

fn from_epoch_millis(scalar: &'static str, millis: i128) -> Result<OffsetDateTime> {
    OffsetDateTime::from_unix_timestamp_nanos(millis * NANOS_PER_MILLI)
        .map_err(|e| invalid(scalar, format!("epoch milliseconds {millis} out of range: {e}")))
}

// =============================================================================
// Date - ISO-8601 date-time
// =============================================================================

/// `Date` - a point in time.
///
/// Accepts RFC 3339 date-times with any offset, or a bare `YYYY-MM-DD`
/// (midnight UTC). Rendered in UTC as `YYYY-MM-DDTHH:MM:SS.sssZ`.
///
/// # Examples
/// - `2021-01-01T00:00:00Z`
/// - `2021-06-15T10:30:00.250+02:00`
#[derive(Debug, Clone, Copy, Default)]
pub struct DateScalar;

impl DateScalar {
    fn coerce(&self, s: &str) -> Result<ScalarValue> {
        parse_datetime(self.name(), s).map(ScalarValue::DateTime)
    }
}

impl CustomScalar for DateScalar {
    fn name(&self) -> &'static str {
        "Date"
    }

    fn description(&self) -> &'static str {
        "An ISO-8601 date-time"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::DateTime(dt) => format_datetime(self.name(), *dt).map(JsonValue::String),
            other => Err(serialize_mismatch(self.name(), "DATETIME", other)),
        }
    }
}

// =============================================================================
// CalendarDate - YYYY-MM-DD
// =============================================================================

/// `CalendarDate` - a calendar day without time or offset.
///
/// Format: `YYYY-MM-DD`. The day must exist, so `2021-02-30` is rejected.
#[derive(Debug, Clone, Copy, Default)]
pub struct CalendarDateScalar;

impl CalendarDateScalar {
    fn coerce(&self, s: &str) -> Result<ScalarValue> {
        if !CALENDAR_DATE_REGEX.is_match(s) {
            return Err(invalid(self.name(), format!("'{s}'. Expected: YYYY-MM-DD")));
        }
        Date::parse(s, format_description!("[year]-[month]-[day]"))
            .map(ScalarValue::Date)
            .map_err(|e| invalid(self.name(), format!("'{s}' is not a calendar day: {e}")))
    }
}

impl CustomScalar for CalendarDateScalar {
    fn name(&self) -> &'static str {
        "CalendarDate"
    }

    fn description(&self) -> &'static str {
        "A calendar date (YYYY-MM-DD)"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        self.coerce(literal_str(self.name(), literal)?)
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        self.coerce(json_str(self.name(), value)?)
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::Date(d) => d
                .format(format_description!("[year]-[month]-[day]"))
                .map(JsonValue::String)
                .map_err(|e| invalid(self.name(), format!("cannot format date: {e}"))),
            other => Err(serialize_mismatch(self.name(), "DATE", other)),
        }
    }
}

// =============================================================================
// MultiFormatDate - date-time string or epoch milliseconds
// =============================================================================

/// `MultiFormatDate` - a point in time given either as a date-time string or
/// as milliseconds since the Unix epoch.
///
/// Both forms are stored as epoch milliseconds and rendered as an ISO-8601
/// string.
///
/// # Examples
/// - `1000` (one second after the epoch)
/// - `"2021-01-01T00:00:00Z"` (stored as `1609459200000`)
#[derive(Debug, Clone, Copy, Default)]
pub struct MultiFormatDateScalar;

impl MultiFormatDateScalar {
    const EXPECTED: &'static str = "STRING or INT";

    fn coerce_str(&self, s: &str) -> Result<ScalarValue> {
        let dt = parse_datetime(self.name(), s)?;
        epoch_millis(self.name(), dt).map(ScalarValue::Int)
    }

    fn coerce_number(&self, n: &serde_json::Number) -> Result<ScalarValue> {
        let millis = number_int(self.name(), n)?;
        if !(MIN_EPOCH_MILLIS..=MAX_EPOCH_MILLIS).contains(&millis) {
            return Err(invalid(
                self.name(),
                format!("epoch milliseconds {millis} fall outside years 0000-9999"),
            ));
        }
        // In range, so the narrowing cannot fail.
        Ok(ScalarValue::Int(millis as i64))
    }
}

impl CustomScalar for MultiFormatDateScalar {
    fn name(&self) -> &'static str {
        "MultiFormatDate"
    }

    fn description(&self) -> &'static str {
        "A date-time string or epoch milliseconds"
    }

    fn parse_literal(&self, literal: &Value) -> Result<ScalarValue> {
        match literal {
            Value::String(s) => self.coerce_str(s),
            Value::Number(n) if !n.is_f64() => self.coerce_number(n),
            other => Err(mismatch(self.name(), Self::EXPECTED, LiteralKind::of_literal(other))),
        }
    }

    fn parse_value(&self, value: &JsonValue) -> Result<ScalarValue> {
        match value {
            JsonValue::String(s) => self.coerce_str(s),
            JsonValue::Number(n) if !n.is_f64() => self.coerce_number(n),
            other => Err(mismatch(self.name(), Self::EXPECTED, LiteralKind::of_json(other))),
        }
    }

    fn serialize(&self, value: &ScalarValue) -> Result<JsonValue> {
        match value {
            ScalarValue::Int(millis) => {
                let dt = from_epoch_millis(self.name(), i128::from(*millis))?;
                format_datetime(self.name(), dt).map(JsonValue::String)
            }
            other => Err(serialize_mismatch(self.name(), "INT", other)),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
