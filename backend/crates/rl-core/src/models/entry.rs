use chrono::Utc;
use serde::{Deserialize, Serialize};

/// A single submitted request as persisted in the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    pub title: String,
    pub requested_by: String,
    /// Milliseconds since the Unix epoch, assigned by the server
    pub timestamp: i64,
}

impl Entry {
    pub fn new(title: String, requested_by: String) -> Self {
        Self::with_timestamp(title, requested_by, Utc::now().timestamp_millis())
    }

    pub fn with_timestamp(title: String, requested_by: String, timestamp: i64) -> Self {
        Self {
            title,
            requested_by,
            timestamp,
        }
    }
}
