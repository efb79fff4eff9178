//! REST API error types
//!
//! Every failure renders as a flat JSON body `{"error": CODE}`, with a
//! `detail` member for backend and unexpected failures. Backend rejections
//! keep the backend's own status code.

use rl_core::CoreError;
use rl_store::StoreError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// Maximum number of characters of a backend response echoed in `detail`
pub const DETAIL_LIMIT: usize = 300;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    /// Machine-readable error code (e.g., "INVALID_INPUT", "GITHUB_PUT_FAILED")
    pub error: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// Method not supported by the endpoint (405)
    #[error("Method not allowed {location}")]
    MethodNotAllowed { location: ErrorLocation },

    /// Submission failed validation (400)
    #[error("Invalid input: {message} {location}")]
    InvalidInput {
        message: String,
        location: ErrorLocation,
    },

    /// Store owner, repo or token not configured (500)
    #[error("Store configuration missing {location}")]
    MissingEnv { location: ErrorLocation },

    /// Backend refused the read (backend status)
    #[error("Document fetch failed with status {status} {location}")]
    GithubGetFailed {
        status: u16,
        detail: String,
        location: ErrorLocation,
    },

    /// Backend refused the write, including revision conflicts (backend status)
    #[error("Document write failed with status {status} {location}")]
    GithubPutFailed {
        status: u16,
        detail: String,
        location: ErrorLocation,
    },

    /// Anything else (500)
    #[error("Server error: {detail} {location}")]
    Server {
        detail: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn method_not_allowed() -> Self {
        ApiError::MethodNotAllowed {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn missing_env() -> Self {
        ApiError::MissingEnv {
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn server<S: Into<String>>(detail: S) -> Self {
        ApiError::Server {
            detail: detail.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::MethodNotAllowed { .. } => StatusCode::METHOD_NOT_ALLOWED,
            ApiError::InvalidInput { .. } => StatusCode::BAD_REQUEST,
            ApiError::MissingEnv { .. } | ApiError::Server { .. } => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
            ApiError::GithubGetFailed { status, .. } | ApiError::GithubPutFailed { status, .. } => {
                StatusCode::from_u16(*status).unwrap_or(StatusCode::BAD_GATEWAY)
            }
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            ApiError::MethodNotAllowed { .. } => "METHOD_NOT_ALLOWED",
            ApiError::InvalidInput { .. } => "INVALID_INPUT",
            ApiError::MissingEnv { .. } => "MISSING_ENV",
            ApiError::GithubGetFailed { .. } => "GITHUB_GET_FAILED",
            ApiError::GithubPutFailed { .. } => "GITHUB_PUT_FAILED",
            ApiError::Server { .. } => "SERVER_ERROR",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        // Log the error with location for debugging
        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let body = ApiErrorResponse {
            error: self.code(),
            detail: match self {
                ApiError::GithubGetFailed { detail, .. }
                | ApiError::GithubPutFailed { detail, .. }
                | ApiError::Server { detail, .. } => Some(detail),
                _ => None,
            },
        };

        (status, Json(body)).into_response()
    }
}

/// Keep at most [`DETAIL_LIMIT`] characters of a backend response body
pub fn truncate_detail(body: &str) -> String {
    body.chars().take(DETAIL_LIMIT).collect()
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            StoreError::FetchRejected { status, body, .. } => ApiError::GithubGetFailed {
                status,
                detail: truncate_detail(&body),
                location,
            },
            StoreError::WriteRejected { status, body, .. } => ApiError::GithubPutFailed {
                status,
                detail: truncate_detail(&body),
                location,
            },
            StoreError::MissingConfiguration { .. } => ApiError::MissingEnv { location },
            StoreError::InvalidConfiguration { message, .. }
            | StoreError::Http { message, .. }
            | StoreError::Json { message, .. } => ApiError::Server {
                detail: message,
                location,
            },
        }
    }
}

/// Convert domain errors to API errors
impl From<CoreError> for ApiError {
    #[track_caller]
    fn from(e: CoreError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            CoreError::InvalidInput { message, .. } | CoreError::MalformedBody { message, .. } => {
                ApiError::InvalidInput { message, location }
            }
            CoreError::DocumentParse { source, .. } | CoreError::DocumentSerialize { source, .. } => {
                ApiError::Server {
                    detail: source.to_string(),
                    location,
                }
            }
        }
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
