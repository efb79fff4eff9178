use crate::{
    ConfigError, ConfigErrorResult, DEFAULT_API_URL, DEFAULT_BRANCH, DEFAULT_DOCUMENT_PATH,
};

use serde::Deserialize;

/// Location of, and credentials for, the backing document in a GitHub repository.
///
/// Owner, repository and token are optional at load time: a server without
/// them still starts, and every operation reports the missing configuration.
#[derive(Clone, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Repository owner (user or organization)
    pub owner: Option<String>,
    /// Repository name
    pub repo: Option<String>,
    /// Access token with contents read/write permission
    pub token: Option<String>,
    /// Path of the JSON document inside the repository
    pub path: String,
    /// Branch the document is read from and committed to
    pub branch: String,
    /// Base URL of the GitHub REST API
    pub api_url: String,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            owner: None,
            repo: None,
            token: None,
            path: String::from(DEFAULT_DOCUMENT_PATH),
            branch: String::from(DEFAULT_BRANCH),
            api_url: String::from(DEFAULT_API_URL),
        }
    }
}

// Hand-written so the token never ends up in logs
impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("owner", &self.owner)
            .field("repo", &self.repo)
            .field("token", &self.token.as_ref().map(|_| "<redacted>"))
            .field("path", &self.path)
            .field("branch", &self.branch)
            .field("api_url", &self.api_url)
            .finish()
    }
}

impl StoreConfig {
    pub fn owner(&self) -> Option<&str> {
        non_empty(&self.owner)
    }

    pub fn repo(&self) -> Option<&str> {
        non_empty(&self.repo)
    }

    pub fn token(&self) -> Option<&str> {
        non_empty(&self.token)
    }

    /// Names of the required settings that are absent or empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let mut missing = Vec::new();
        if self.owner().is_none() {
            missing.push("owner");
        }
        if self.repo().is_none() {
            missing.push("repo");
        }
        if self.token().is_none() {
            missing.push("token");
        }
        missing
    }

    pub fn validate(&self) -> ConfigErrorResult<()> {
        if self.path.trim().is_empty() {
            return Err(ConfigError::store("store.path cannot be empty"));
        }

        if self.branch.trim().is_empty() {
            return Err(ConfigError::store("store.branch cannot be empty"));
        }

        if !(self.api_url.starts_with("http://") || self.api_url.starts_with("https://")) {
            return Err(ConfigError::store(format!(
                "store.api_url must be an http(s) URL, got {}",
                self.api_url
            )));
        }

        Ok(())
    }
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|s| !s.is_empty())
}
