//! Timestamp codec for `created_at` / `updated_at`.
//!
//! Timestamps are naive local date-times with microsecond precision. Their
//! textual form is fixed: `YYYY-MM-DDTHH:MM:SS.ffffff` (always six fractional
//! digits, no zone).

use chrono::{Local, NaiveDateTime, Timelike};
use serde_json::Value;

use crate::error::{ModelError, ModelResult};

/// Timestamp type carried by every model.
pub type Timestamp = NaiveDateTime;

/// `strftime` pattern used when rendering timestamps.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.6f";

const WHOLE_SECONDS_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const FRACTION_DIGITS: usize = 6;

/// Current local time, truncated to microseconds.
///
/// Truncation keeps `parse(format(now()))` equal to `now()`.
pub fn now() -> Timestamp {
    truncate_to_micros(Local::now().naive_local())
}

/// Drop sub-microsecond precision.
pub fn truncate_to_micros(ts: Timestamp) -> Timestamp {
    let micros = ts.nanosecond() / 1_000;
    ts.with_nanosecond(micros * 1_000).unwrap_or(ts)
}

/// Render a timestamp as `YYYY-MM-DDTHH:MM:SS.ffffff`.
pub fn format(ts: &Timestamp) -> String {
    ts.format(TIMESTAMP_FORMAT).to_string()
}

/// Parse `YYYY-MM-DDTHH:MM:SS.ffffff`.
///
/// `field` only feeds the error message.
pub fn parse(field: &str, text: &str) -> ModelResult<Timestamp> {
    let (whole, fraction) = text.split_once('.').ok_or_else(|| {
        ModelError::invalid_timestamp(field, format!("'{text}' has no fractional seconds"))
    })?;

    if fraction.len() != FRACTION_DIGITS || !fraction.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ModelError::invalid_timestamp(
            field,
            format!("'{text}' must carry exactly {FRACTION_DIGITS} fractional digits"),
        ));
    }

    let seconds = NaiveDateTime::parse_from_str(whole, WHOLE_SECONDS_FORMAT)
        .map_err(|e| ModelError::invalid_timestamp(field, format!("'{text}': {e}")))?;

    let micros: u32 = fraction
        .parse()
        .map_err(|e| ModelError::invalid_timestamp(field, format!("'{text}': {e}")))?;

    seconds
        .with_nanosecond(micros * 1_000)
        .ok_or_else(|| ModelError::invalid_timestamp(field, format!("'{text}' is out of range")))
}

/// Parse a timestamp held in a dictionary value (must be a string).
pub fn parse_value(field: &str, value: &Value) -> ModelResult<Timestamp> {
    match value {
        Value::String(text) => parse(field, text),
        other => Err(ModelError::invalid_timestamp(
            field,
            format!("expected a string, got {other}"),
        )),
    }
}
