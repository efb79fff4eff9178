pub mod error;
pub mod models;
pub mod submission;


pub use error::{CoreError, Result};
pub use models::entry::Entry;
pub use models::request_document::RequestDocument;
pub use submission::{
    MAX_REQUESTED_BY_LENGTH, MAX_TITLE_LENGTH, Submission, coerce_field, normalize_field,
};
