use crate::{ApiError, ApiResult, ServerResult};

use rl_config::StoreConfig;
use rl_store::{DocumentStore, GithubStore, StoreError};

use std::sync::Arc;

/// Shared, immutable state handed to every handler
#[derive(Clone)]
pub struct AppState {
    /// None when owner, repo or token is not configured
    store: Option<Arc<dyn DocumentStore>>,
}

impl AppState {
    /// Build state from configuration.
    ///
    /// Missing store credentials are not fatal: the server still starts and
    /// every operation answers MISSING_ENV. An unusable API URL is fatal.
    pub fn from_config(config: &StoreConfig) -> ServerResult<Self> {
        match GithubStore::from_config(config) {
            Ok(store) => {
                log::info!("Document store: GitHub contents API (branch {})", store.branch());
                Ok(Self::with_store(Arc::new(store)))
            }
            Err(StoreError::MissingConfiguration { fields, .. }) => {
                log::warn!(
                    "Document store not configured (missing: {}); requests will fail with MISSING_ENV",
                    fields.join(", ")
                );
                Ok(Self::without_store())
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn with_store(store: Arc<dyn DocumentStore>) -> Self {
        Self { store: Some(store) }
    }

    pub fn without_store() -> Self {
        Self { store: None }
    }

    pub fn is_store_configured(&self) -> bool {
        self.store.is_some()
    }

    /// The configured store, or MISSING_ENV
    #[track_caller]
    pub fn require_store(&self) -> ApiResult<Arc<dyn DocumentStore>> {
        self.store.clone().ok_or_else(ApiError::missing_env)
    }
}
