//! Per-field input parsing and checks used by the listing form.
//!
//! Functions here return a short human message on failure; the form turns
//! it into a [`FieldError`](crate::error::FieldError) for the offending field.

use chrono::{DateTime, NaiveDateTime};
use serde_json::Value;

use crate::fields::FieldOption;

pub const MAX_TEXT_LENGTH: usize = 255;
pub const MAX_TEXTAREA_LENGTH: usize = 20_000;

const DATETIME_LOCAL: &str = "%Y-%m-%dT%H:%M";
const DATETIME_LOCAL_SECONDS: &str = "%Y-%m-%dT%H:%M:%S";

/// Strip ASCII control characters (keeping newlines and tabs when
/// `multiline`), trim surrounding whitespace and enforce a byte-length limit.
pub fn sanitize_text(input: &str, max_len: usize, multiline: bool) -> Result<String, String> {
    if input.len() > max_len {
        return Err(format!("must be at most {} bytes", max_len));
    }
    Ok(input
        .chars()
        .filter(|c| !c.is_ascii_control() || (multiline && (*c == '\n' || *c == '\t')))
        .collect::<String>()
        .trim()
        .to_string())
}

/// Parse a number field. Blank input means "no value".
pub fn parse_number(input: &str) -> Result<Option<f64>, String> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    match trimmed.parse::<f64>() {
        Ok(n) if n.is_finite() => Ok(Some(n)),
        _ => Err(format!("'{}' is not a number", trimmed)),
    }
}

/// Parse a switch: accepts 1/0, true/false, yes/no, on/off.
pub fn parse_switch(input: &str) -> Result<bool, String> {
    match input.trim().to_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        other => Err(format!("'{}' is not on/off", other)),
    }
}

/// Normalise a datetime to the `YYYY-MM-DDTHH:MM[:SS]` shape of a
/// datetime-local input. RFC 3339 timestamps keep their wall-clock time.
pub fn parse_datetime_local(input: &str) -> Result<String, String> {
    let trimmed = input.trim();
    let naive = NaiveDateTime::parse_from_str(trimmed, DATETIME_LOCAL)
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, DATETIME_LOCAL_SECONDS))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M:%S"))
        .or_else(|_| NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%d %H:%M"))
        .or_else(|_| DateTime::parse_from_rfc3339(trimmed).map(|dt| dt.naive_local()))
        .map_err(|_| format!("'{}' is not a date and time (YYYY-MM-DDTHH:MM)", trimmed))?;
    let format = if naive.format("%S").to_string() == "00" {
        DATETIME_LOCAL
    } else {
        DATETIME_LOCAL_SECONDS
    };
    Ok(naive.format(format).to_string())
}

/// Check that a non-empty option value is one of the declared options.
pub fn validate_option(value: &str, options: &[FieldOption]) -> Result<(), String> {
    if value.is_empty() || options.iter().any(|o| o.value == value) {
        return Ok(());
    }
    let valid: Vec<&str> = options.iter().map(|o| o.value.as_str()).collect();
    Err(format!(
        "'{}' is not a valid choice. Valid values: {}",
        value,
        valid.join(", ")
    ))
}

/// Reads a boolean-like JSON value. The backend uses real booleans, `"1"`/`"0"`
/// strings and `1`/`0` numbers interchangeably.
pub fn truthy(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::Number(n) => n.as_f64().map(|n| n != 0.0),
        Value::String(s) => parse_switch(s).ok(),
        _ => None,
    }
}
