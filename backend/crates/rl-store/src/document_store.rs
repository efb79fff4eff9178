use crate::StoreResult;

use async_trait::async_trait;

/// Current document text and the revision marker needed to overwrite it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredDocument {
    /// Decoded UTF-8 text of the document (may be empty or invalid JSON)
    pub text: String,
    /// Opaque revision marker, `None` if the backend did not report one
    pub revision: Option<String>,
}

/// A full replacement of the document, guarded by the revision it was read at.
#[derive(Debug, Clone, Copy)]
pub struct WriteRequest<'a> {
    pub text: &'a str,
    pub revision: Option<&'a str>,
    /// Commit message recorded by the backend
    pub message: &'a str,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct WriteReceipt {
    /// Revision marker of the newly written document, when reported
    pub revision: Option<String>,
}

/// Read-modify-write access to a single remote document.
///
/// Implementations must reject a write whose revision no longer matches the
/// stored document with [`crate::StoreError::WriteRejected`]; they never
/// retry or merge.
#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn fetch(&self) -> StoreResult<StoredDocument>;

    async fn write(&self, request: WriteRequest<'_>) -> StoreResult<WriteReceipt>;
}
