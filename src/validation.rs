//! Loose request payloads and the coercions applied to them before writes.
//!
//! Dashboard forms post whatever the browser produced: numbers arrive as
//! strings, dates as `YYYY-MM-DD`, blank inputs as `""`. [`Payload`] wraps
//! the raw JSON object and turns it into typed values, collecting every
//! missing required field into one [`AppError::MissingFields`].

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;
use serde_json::{Map, Value};
use validator::ValidateEmail;

use crate::error::{AppError, Result};

/// A JSON object body with no fixed shape.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(transparent)]
pub struct Payload(Map<String, Value>);

#[async_trait]
impl<S> FromRequest<S> for Payload
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> std::result::Result<Self, Self::Rejection> {
        let Json(map) = Json::<Map<String, Value>>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::BadRequest(rejection.body_text()))?;
        Ok(Payload(map))
    }
}

impl From<Value> for Payload {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(map) => Payload(map),
            _ => Payload::default(),
        }
    }
}

impl Payload {
    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    /// Trimmed text for `key`. Absent, null and blank values are `None`.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(value_to_text)
    }

    /// Text that must be present and non-blank on create.
    pub fn required_text(&self, key: &'static str, missing: &mut Missing) -> String {
        match self.text(key) {
            Some(text) => text,
            None => {
                missing.push(key);
                String::new()
            }
        }
    }

    /// Text for a required field on update: absent keeps the stored value,
    /// present-but-blank is reported as missing.
    pub fn replacement_text(&self, key: &'static str, missing: &mut Missing) -> Option<String> {
        if !self.contains(key) {
            return None;
        }
        let text = self.text(key);
        if text.is_none() {
            missing.push(key);
        }
        text
    }

    /// Text for a nullable field on update. `None` leaves the field alone,
    /// `Some(None)` clears it.
    pub fn nullable_text(&self, key: &str) -> Option<Option<String>> {
        if self.contains(key) {
            Some(self.text(key))
        } else {
            None
        }
    }

    pub fn integer(&self, key: &str) -> Result<Option<i64>> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => coerce_integer(value)
                .map(Some)
                .ok_or_else(|| invalid(key, "an integer")),
        }
    }

    /// Integer that must be present on create.
    pub fn required_integer(&self, key: &'static str, missing: &mut Missing) -> Result<i64> {
        match self.integer(key)? {
            Some(value) => Ok(value),
            None => {
                missing.push(key);
                Ok(0)
            }
        }
    }

    pub fn boolean(&self, key: &str) -> Result<Option<bool>> {
        match self.present(key) {
            None => Ok(None),
            Some(value) => coerce_bool(value)
                .map(Some)
                .ok_or_else(|| invalid(key, "true or false")),
        }
    }

    pub fn date(&self, key: &str) -> Result<Option<DateTime<Utc>>> {
        match self.text(key) {
            None => Ok(None),
            Some(text) => parse_date(&text)
                .map(Some)
                .ok_or_else(|| invalid(key, "a date")),
        }
    }

    /// Date that must be present on create. Like the other `required_*`
    /// helpers it yields a placeholder when missing; callers must run
    /// [`Missing::check`] before using the values.
    pub fn required_date(&self, key: &'static str, missing: &mut Missing) -> Result<DateTime<Utc>> {
        match self.date(key)? {
            Some(date) => Ok(date),
            None => {
                missing.push(key);
                Ok(DateTime::<Utc>::default())
            }
        }
    }

    /// Date for a nullable field on update, same convention as [`Payload::nullable_text`].
    pub fn nullable_date(&self, key: &str) -> Result<Option<Option<DateTime<Utc>>>> {
        if self.contains(key) {
            self.date(key).map(Some)
        } else {
            Ok(None)
        }
    }

    /// A value from a fixed set, parsed with `parse` (usually an enum's `parse`).
    pub fn choice<T>(&self, key: &str, parse: fn(&str) -> Option<T>) -> Result<Option<T>> {
        match self.text(key) {
            None => Ok(None),
            Some(text) => parse(&text)
                .map(Some)
                .ok_or_else(|| AppError::Validation(format!("Invalid {}: {}", key, text))),
        }
    }

    /// Optional email address that must be well-formed when given.
    pub fn email(&self, key: &str) -> Result<Option<String>> {
        match self.text(key) {
            None => Ok(None),
            Some(email) if email.validate_email() => Ok(Some(email)),
            Some(_) => Err(invalid(key, "a valid email address")),
        }
    }

    /// Array of nested objects, e.g. timeline tasks.
    pub fn objects(&self, key: &str) -> Result<Option<Vec<Payload>>> {
        match self.present(key) {
            None => Ok(None),
            Some(Value::Array(items)) => Ok(Some(
                items.iter().cloned().map(Payload::from).collect(),
            )),
            Some(_) => Err(invalid(key, "a list")),
        }
    }

    fn present(&self, key: &str) -> Option<&Value> {
        match self.0.get(key) {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) if s.trim().is_empty() => None,
            Some(value) => Some(value),
        }
    }
}

/// Accumulates the names of missing required fields.
#[derive(Debug, Default)]
pub struct Missing(Vec<String>);

impl Missing {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, field: impl Into<String>) {
        self.0.push(field.into());
    }

    pub fn check(self) -> Result<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(AppError::MissingFields(self.0))
        }
    }
}

fn invalid(key: &str, expected: &str) -> AppError {
    AppError::Validation(format!("Invalid value for {}: expected {}", key, expected))
}

fn value_to_text(value: &Value) -> Option<String> {
    let text = match value {
        Value::String(s) => s.trim().to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        _ => return None,
    };
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.fract() == 0.0).map(|f| f as i64)),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn coerce_bool(value: &Value) -> Option<bool> {
    match value {
        Value::Bool(b) => Some(*b),
        Value::String(s) => match s.trim().to_lowercase().as_str() {
            "true" | "1" | "on" => Some(true),
            "false" | "0" | "off" => Some(false),
            _ => None,
        },
        Value::Number(n) => n.as_i64().map(|i| i != 0),
        _ => None,
    }
}

/// Parse the date formats browsers submit: RFC 3339, `datetime-local`
/// (`YYYY-MM-DDTHH:MM[:SS]`, read as UTC) and plain `YYYY-MM-DD`.
pub fn parse_date(input: &str) -> Option<DateTime<Utc>> {
    let input = input.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(input) {
        return Some(dt.with_timezone(&Utc));
    }

    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(input, format) {
            return Some(DateTime::from_naive_utc_and_offset(naive, Utc));
        }
    }

    NaiveDate::parse_from_str(input, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| DateTime::from_naive_utc_and_offset(naive, Utc))
}

/// Normalize an enum label: upper-case, `-` and spaces become `_`.
pub fn normalize_label(input: &str) -> String {
    input
        .trim()
        .to_uppercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}
