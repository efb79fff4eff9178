pub mod entry;
pub mod request_document;
