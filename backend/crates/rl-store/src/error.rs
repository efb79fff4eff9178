use std::panic::Location;

use error_location::ErrorLocation;
use thiserror::Error;

/// Status the GitHub contents API answers when the supplied sha is stale
pub const CONFLICT_STATUS: u16 = 409;

/// Errors that can occur while talking to the document backend
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Store configuration missing: {} {location}", .fields.join(", "))]
    MissingConfiguration {
        fields: Vec<&'static str>,
        location: ErrorLocation,
    },

    #[error("Invalid store configuration: {message} {location}")]
    InvalidConfiguration {
        message: String,
        location: ErrorLocation,
    },

    #[error("Fetch rejected with status {status} {location}")]
    FetchRejected {
        status: u16,
        body: String,
        location: ErrorLocation,
    },

    #[error("Write rejected with status {status} {location}")]
    WriteRejected {
        status: u16,
        body: String,
        location: ErrorLocation,
    },

    #[error("HTTP request error: {message} {location}")]
    Http {
        message: String,
        location: ErrorLocation,
        #[source]
        source: reqwest::Error,
    },

    #[error("JSON parse error: {message} {location}")]
    Json {
        message: String,
        location: ErrorLocation,
        #[source]
        source: serde_json::Error,
    },
}

impl StoreError {
    #[track_caller]
    pub fn fetch_rejected(status: u16, body: impl Into<String>) -> Self {
        StoreError::FetchRejected {
            status,
            body: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn write_rejected(status: u16, body: impl Into<String>) -> Self {
        StoreError::WriteRejected {
            status,
            body: body.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn invalid_configuration(message: impl Into<String>) -> Self {
        StoreError::InvalidConfiguration {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    /// Convert reqwest error with context
    #[track_caller]
    pub fn from_reqwest(err: reqwest::Error) -> Self {
        StoreError::Http {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Convert JSON error with context
    #[track_caller]
    pub fn from_json(err: serde_json::Error) -> Self {
        StoreError::Json {
            message: err.to_string(),
            location: ErrorLocation::from(Location::caller()),
            source: err,
        }
    }

    /// Backend status code, for rejections
    pub fn status(&self) -> Option<u16> {
        match self {
            StoreError::FetchRejected { status, .. } | StoreError::WriteRejected { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    /// Whether a write lost an optimistic-concurrency race
    pub fn is_conflict(&self) -> bool {
        matches!(self, StoreError::WriteRejected { status, .. } if *status == CONFLICT_STATUS)
    }
}

impl From<reqwest::Error> for StoreError {
    #[track_caller]
    fn from(err: reqwest::Error) -> Self {
        StoreError::from_reqwest(err)
    }
}

impl From<serde_json::Error> for StoreError {
    #[track_caller]
    fn from(err: serde_json::Error) -> Self {
        StoreError::from_json(err)
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
