use std::result::Result as StdResult;

use error_location::ErrorLocation;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum CoreError {
    #[error("Invalid input: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    #[error("Malformed request body: {message} {location}")]
    MalformedBody {
        message: String,
        location: ErrorLocation,
    },

    #[error("Document is not valid JSON: {source} {location}")]
    DocumentParse {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },

    #[error("Failed to serialize document: {source} {location}")]
    DocumentSerialize {
        #[source]
        source: serde_json::Error,
        location: ErrorLocation,
    },
}

pub type Result<T> = StdResult<T, CoreError>;
