//! Normalization and validation of incoming submissions.

use crate::{CoreError, Entry, Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde_json::{Map, Number, Value};

pub const MAX_TITLE_LENGTH: usize = 100;
pub const MAX_REQUESTED_BY_LENGTH: usize = 50;

/// A validated submission: both fields trimmed, capped and non-empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Submission {
    pub title: String,
    pub requested_by: String,
}

impl Submission {
    /// Decode a raw request body.
    ///
    /// Accepts a JSON object, or a JSON string whose contents are a JSON
    /// object. An empty body is treated as `{}`.
    #[track_caller]
    pub fn from_body(body: &[u8]) -> CoreResult<Self> {
        let value = decode_body(body)?;
        Self::from_value(&value)
    }

    /// Build a submission from an already decoded JSON value.
    ///
    /// Extra members are ignored; anything other than an object has no
    /// usable fields and is rejected.
    #[track_caller]
    pub fn from_value(value: &Value) -> CoreResult<Self> {
        let requested_by = normalize_field(
            &coerce_field(value.get("requestedBy")),
            MAX_REQUESTED_BY_LENGTH,
        );
        let title = normalize_field(&coerce_field(value.get("title")), MAX_TITLE_LENGTH);

        if requested_by.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "requestedBy is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        if title.is_empty() {
            return Err(CoreError::InvalidInput {
                message: "title is required".to_string(),
                location: ErrorLocation::from(Location::caller()),
            });
        }

        Ok(Self {
            title,
            requested_by,
        })
    }

    /// Stamp the submission with the current time.
    pub fn into_entry(self) -> Entry {
        Entry::new(self.title, self.requested_by)
    }
}

/// Coerce a JSON member to a string the way `String(value || "")` would.
///
/// Missing, `null`, `false`, numeric zero and `""` become the empty string.
/// Anything else goes through the generic string form.
pub fn coerce_field(value: Option<&Value>) -> String {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => String::new(),
        Some(Value::Number(n)) if n.as_f64() == Some(0.0) => String::new(),
        Some(other) => string_form(other),
    }
}

/// Script-style string conversion of a JSON value.
///
/// Arrays join their elements with `,` (null elements are empty), objects
/// become `[object Object]`, numbers use the shortest round-trip form.
fn string_form(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => number_text(n),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|item| match item {
                Value::Null => String::new(),
                other => string_form(other),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    }
}

fn number_text(n: &Number) -> String {
    if let Some(i) = n.as_i64() {
        return i.to_string();
    }
    if let Some(u) = n.as_u64() {
        return u.to_string();
    }

    let f = n.as_f64().unwrap_or_default();
    let magnitude = f.abs();

    if f == 0.0 {
        "0".to_string()
    } else if !(1e-6..1e21).contains(&magnitude) {
        // Exponent form with an explicit sign on positive exponents: 1e+21, 1.5e-7
        let text = format!("{:e}", f);
        match text.split_once('e') {
            Some((mantissa, exponent)) if !exponent.starts_with('-') => {
                format!("{}e+{}", mantissa, exponent)
            }
            _ => text,
        }
    } else if f.fract() == 0.0 {
        format!("{:.0}", f)
    } else {
        f.to_string()
    }
}

/// Trim surrounding whitespace, then keep at most `max_chars` characters.
pub fn normalize_field(raw: &str, max_chars: usize) -> String {
    raw.trim().chars().take(max_chars).collect()
}

#[track_caller]
fn decode_body(body: &[u8]) -> CoreResult<Value> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Value::Object(Map::new()));
    }

    let value: Value = serde_json::from_slice(body).map_err(|e| CoreError::MalformedBody {
        message: e.to_string(),
        location: ErrorLocation::from(Location::caller()),
    })?;

    match value {
        Value::String(inner) if inner.trim().is_empty() => Ok(Value::Object(Map::new())),
        Value::String(inner) => {
            serde_json::from_str(&inner).map_err(|e| CoreError::MalformedBody {
                message: format!("string body is not JSON: {}", e),
                location: ErrorLocation::from(Location::caller()),
            })
        }
        other => Ok(other),
    }
}
