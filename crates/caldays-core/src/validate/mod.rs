//! Typed accessors over untyped request payloads.
//!
//! Optional accessors treat a missing or empty field as absent. Required
//! accessors turn absence into an error with the same wording clients have
//! always received.

use std::sync::LazyLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;
use serde_json::{Map, Value};

use crate::constants::{MAX_YEAR, MIN_YEAR};
use crate::error::{CoreError, CoreResult};

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static HEX_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#[A-Fa-f0-9]{6}$").expect("color pattern should compile"));

#[expect(clippy::expect_used, reason = "Pattern is a compile-time constant")]
static LOCAL_DATE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(\d{4})-(\d{2})-(\d{2})$").expect("local date pattern should compile")
});

/// An untyped request body: a JSON object keyed by field name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Payload(Map<String, Value>);

impl From<Map<String, Value>> for Payload {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Payload {
    /// ## Summary
    /// Builds a payload from a JSON value. Anything other than an object is
    /// treated as an empty payload.
    #[must_use]
    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(map) => Self(map),
            _ => Self::default(),
        }
    }

    /// ## Summary
    /// Parses a raw request body. An empty body yields an empty payload.
    ///
    /// ## Errors
    /// Returns `InvalidParameter` if the body is not valid JSON.
    pub fn from_slice(body: &[u8]) -> CoreResult<Self> {
        if body.iter().all(u8::is_ascii_whitespace) {
            return Ok(Self::default());
        }

        serde_json::from_slice::<Value>(body)
            .map(Self::from_value)
            .map_err(|e| CoreError::InvalidParameter(format!("Invalid JSON body: {e}")))
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.0.get(name)
    }

    #[must_use]
    pub fn optional_string(&self, name: &str) -> Option<String> {
        match self.get(name) {
            Some(Value::String(s)) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }

    /// ## Errors
    /// Returns `MissingParameter` if the field is absent, empty or not a string.
    pub fn required_string(&self, name: &'static str) -> CoreResult<String> {
        self.optional_string(name)
            .ok_or(CoreError::MissingParameter(name))
    }

    /// ## Summary
    /// Reads a `#RRGGBB` color.
    ///
    /// ## Errors
    /// Returns `InvalidParameter` if the field is present but not a color.
    pub fn optional_color(&self, name: &str) -> CoreResult<Option<String>> {
        self.optional_string(name)
            .map(|value| validate_color(&value, name).map(|()| value))
            .transpose()
    }

    /// ## Errors
    /// Returns `InvalidParameter` if the field is absent or not a color.
    pub fn required_color(&self, name: &str) -> CoreResult<String> {
        self.optional_color(name)?
            .ok_or_else(|| CoreError::invalid_parameter(name, "a color"))
    }

    /// ## Errors
    /// Returns `InvalidParameter` if the field is present but not a valid date.
    pub fn optional_local_date(&self, name: &str) -> CoreResult<Option<NaiveDate>> {
        self.optional_string(name)
            .map(|value| validate_local_date(&value, name))
            .transpose()
    }

    /// ## Errors
    /// Returns `InvalidParameter` if the field is absent or not a valid date.
    pub fn required_local_date(&self, name: &str) -> CoreResult<NaiveDate> {
        self.optional_local_date(name)?
            .ok_or_else(|| CoreError::invalid_parameter(name, "a date"))
    }

    /// ## Summary
    /// Only the literal strings `"true"` and `"false"` are booleans.
    #[must_use]
    pub fn optional_bool(&self, name: &str) -> Option<bool> {
        match self.get(name) {
            Some(Value::String(s)) if s == "true" => Some(true),
            Some(Value::String(s)) if s == "false" => Some(false),
            _ => None,
        }
    }

    /// ## Errors
    /// Returns `InvalidParameter` unless the field is `"true"` or `"false"`.
    pub fn required_bool(&self, name: &str) -> CoreResult<bool> {
        self.optional_bool(name)
            .ok_or_else(|| CoreError::invalid_parameter(name, "a boolean"))
    }

    /// ## Summary
    /// Reads an integer given either as a string or as a JSON integer.
    ///
    /// ## Errors
    /// Returns `MissingParameter` if absent, `InvalidParameter` if not an integer.
    pub fn required_int(&self, name: &'static str) -> CoreResult<i32> {
        if let Some(Value::Number(n)) = self.get(name) {
            return n
                .as_i64()
                .and_then(|v| i32::try_from(v).ok())
                .ok_or_else(|| CoreError::invalid_parameter(name, "an integer"));
        }

        let value = self.required_string(name)?;
        validate_int(&value, name)
    }
}

/// ## Summary
/// Checks a `#RRGGBB` hex color.
///
/// ## Errors
/// Returns `InvalidParameter` naming `name` if the value does not match.
pub fn validate_color(value: &str, name: &str) -> CoreResult<()> {
    if HEX_COLOR.is_match(value) {
        Ok(())
    } else {
        Err(CoreError::invalid_parameter(name, "a color"))
    }
}

/// ## Summary
/// Parses a `YYYY-MM-DD` local date within the supported year range.
///
/// The date is built from its parts and must round-trip unchanged, so day
/// overflow such as `2023-02-30` is rejected instead of wrapping into March.
///
/// ## Errors
/// Returns `InvalidParameter` naming `name` if the value is not a real date.
pub fn validate_local_date(value: &str, name: &str) -> CoreResult<NaiveDate> {
    let invalid = || CoreError::invalid_parameter(name, "a date");

    let caps = LOCAL_DATE.captures(value).ok_or_else(invalid)?;
    let part = |i: usize| caps.get(i).map(|m| m.as_str());

    let year: i32 = part(1).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    let month: u32 = part(2).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;
    let day: u32 = part(3).and_then(|s| s.parse().ok()).ok_or_else(invalid)?;

    if !(MIN_YEAR..=MAX_YEAR).contains(&year)
        || !(1..=12).contains(&month)
        || !(1..=31).contains(&day)
    {
        return Err(invalid());
    }

    let date = NaiveDate::from_ymd_opt(year, month, day).ok_or_else(invalid)?;
    if date.year() != year || date.month() != month || date.day() != day {
        return Err(invalid());
    }

    Ok(date)
}

/// ## Summary
/// Parses an integer the lenient way browsers do: leading whitespace and a
/// sign are allowed, and parsing stops at the first non-digit.
///
/// ## Errors
/// Returns `InvalidParameter` naming `name` if no digits lead the value or it
/// does not fit in an `i32`.
pub fn validate_int(value: &str, name: &str) -> CoreResult<i32> {
    let trimmed = value.trim_start();
    let (negative, rest) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return Err(CoreError::invalid_parameter(name, "an integer"));
    }

    let magnitude: i64 = rest[..digits_len]
        .parse()
        .map_err(|_err| CoreError::invalid_parameter(name, "an integer"))?;
    let signed = if negative { -magnitude } else { magnitude };

    i32::try_from(signed).map_err(|_err| CoreError::invalid_parameter(name, "an integer"))
}

/// ## Summary
/// Renders a date in the canonical zero-padded `YYYY-MM-DD` form.
#[must_use]
pub fn format_local_date(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}
