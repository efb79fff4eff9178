//! The persisted request list.
//!
//! Stored items are kept as raw JSON values so that whatever is already in
//! the backing file is listed and rewritten untouched. Only newly appended
//! entries are guaranteed to have the [`Entry`] shape.

use crate::{CoreError, Entry, Result as CoreResult};

use std::panic::Location;

use error_location::ErrorLocation;
use serde::Serialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestDocument {
    pub requests: Vec<Value>,
}

impl RequestDocument {
    /// Parse stored document text.
    ///
    /// Invalid JSON is an error. Valid JSON that is not an object, or an
    /// object whose `requests` member is missing or not an array, yields an
    /// empty document.
    #[track_caller]
    pub fn parse(text: &str) -> CoreResult<Self> {
        let value: Value =
            serde_json::from_str(text).map_err(|source| CoreError::DocumentParse {
                source,
                location: ErrorLocation::from(Location::caller()),
            })?;

        let requests = match value {
            Value::Object(mut map) => match map.remove("requests") {
                Some(Value::Array(items)) => items,
                _ => Vec::new(),
            },
            _ => Vec::new(),
        };

        Ok(Self { requests })
    }

    /// Append an entry at the end of the list.
    #[track_caller]
    pub fn push(&mut self, entry: &Entry) -> CoreResult<()> {
        let value = serde_json::to_value(entry).map_err(|source| CoreError::DocumentSerialize {
            source,
            location: ErrorLocation::from(Location::caller()),
        })?;
        self.requests.push(value);
        Ok(())
    }

    /// Serialize as `{"requests": [...]}` with 2-space indentation.
    #[track_caller]
    pub fn to_pretty_json(&self) -> CoreResult<String> {
        serde_json::to_string_pretty(self).map_err(|source| CoreError::DocumentSerialize {
            source,
            location: ErrorLocation::from(Location::caller()),
        })
    }

    pub fn len(&self) -> usize {
        self.requests.len()
    }

    pub fn is_empty(&self) -> bool {
        self.requests.is_empty()
    }
}
