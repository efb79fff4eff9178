//! rl-store
//!
//! Remote storage for the request document. The only backend is the
//! GitHub contents API; the [`DocumentStore`] trait is the seam the
//! server handlers depend on.

pub(crate) mod content_codec;
pub(crate) mod document_store;
pub(crate) mod error;
pub(crate) mod github_store;


pub use content_codec::{decode_content, encode_content};
pub use document_store::{DocumentStore, StoredDocument, WriteReceipt, WriteRequest};
pub use error::{Result as StoreResult, StoreError};
pub use github_store::GithubStore;
