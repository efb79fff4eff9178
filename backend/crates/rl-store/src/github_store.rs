//! GitHub contents API backend.
//!
//! The document lives at `/repos/{owner}/{repo}/contents/{path}` on a
//! branch. A GET returns the base64 content and the blob `sha`; a PUT
//! replaces the file and is refused when the supplied `sha` is stale.

use crate::{
    DocumentStore, StoreError, StoreResult, StoredDocument, WriteReceipt, WriteRequest,
    decode_content, encode_content,
};

use rl_config::StoreConfig;

use std::panic::Location;

use async_trait::async_trait;
use error_location::ErrorLocation;
use reqwest::{Client as ReqwestClient, Method, RequestBuilder, Url, header};
use serde::{Deserialize, Serialize};
use serde_json::Value;

const GITHUB_ACCEPT: &str = "application/vnd.github+json";
const USER_AGENT: &str = concat!("request-list/", env!("CARGO_PKG_VERSION"));

/// `content` member of the PUT response
#[derive(Debug, Deserialize)]
struct CommittedContent {
    #[serde(default)]
    sha: Option<String>,
}

/// PUT /repos/{owner}/{repo}/contents/{path}
#[derive(Debug, Serialize)]
struct UpdateContentsBody<'a> {
    message: &'a str,
    content: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    sha: Option<&'a str>,
    branch: &'a str,
}

#[derive(Debug, Deserialize)]
struct UpdateContentsResponse {
    content: Option<CommittedContent>,
}

/// Document store backed by a file in a GitHub repository
pub struct GithubStore {
    client: ReqwestClient,
    contents_url: Url,
    token: String,
    branch: String,
}

impl GithubStore {
    /// Build a store from configuration.
    ///
    /// Fails with [`StoreError::MissingConfiguration`] when owner, repo or
    /// token is absent, so callers can tell that apart from a bad API URL.
    #[track_caller]
    pub fn from_config(config: &StoreConfig) -> StoreResult<Self> {
        let (Some(owner), Some(repo), Some(token)) =
            (config.owner(), config.repo(), config.token())
        else {
            return Err(StoreError::MissingConfiguration {
                fields: config.missing_fields(),
                location: ErrorLocation::from(Location::caller()),
            });
        };

        let contents_url = Self::contents_url(&config.api_url, owner, repo, &config.path)?;

        let client = ReqwestClient::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(StoreError::from_reqwest)?;

        Ok(Self {
            client,
            contents_url,
            token: token.to_string(),
            branch: config.branch.clone(),
        })
    }

    /// URL of the document; the path is encoded as a single segment.
    fn contents_url(api_url: &str, owner: &str, repo: &str, path: &str) -> StoreResult<Url> {
        let mut url = Url::parse(api_url).map_err(|e| {
            StoreError::invalid_configuration(format!("api_url {}: {}", api_url, e))
        })?;

        url.path_segments_mut()
            .map_err(|_| StoreError::invalid_configuration("api_url cannot be a base URL"))?
            .pop_if_empty()
            .extend(["repos", owner, repo, "contents", path]);

        Ok(url)
    }

    pub fn branch(&self) -> &str {
        &self.branch
    }

    /// Build a request with the GitHub API headers
    fn request(&self, method: Method, url: Url) -> RequestBuilder {
        self.client
            .request(method, url)
            .bearer_auth(&self.token)
            .header(header::ACCEPT, GITHUB_ACCEPT)
    }
}

#[async_trait]
impl DocumentStore for GithubStore {
    async fn fetch(&self) -> StoreResult<StoredDocument> {
        let mut url = self.contents_url.clone();
        url.query_pairs_mut().append_pair("ref", &self.branch);

        log::debug!("Fetching document: {}", url);
        let response = self.request(Method::GET, url).send().await?;
        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::fetch_rejected(status.as_u16(), body));
        }

        // A file yields {sha, content}; directory listings and other payloads carry neither
        let payload: Value = serde_json::from_str(&body)?;
        if !payload.is_object() {
            log::warn!("Contents API returned a non-file payload, treating document as empty");
        }

        Ok(StoredDocument {
            text: decode_content(
                payload
                    .get("content")
                    .and_then(Value::as_str)
                    .unwrap_or_default(),
            ),
            revision: payload
                .get("sha")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    async fn write(&self, request: WriteRequest<'_>) -> StoreResult<WriteReceipt> {
        let body = UpdateContentsBody {
            message: request.message,
            content: encode_content(request.text),
            sha: request.revision,
            branch: &self.branch,
        };

        log::debug!(
            "Writing document: {} (base revision {})",
            self.contents_url,
            request.revision.unwrap_or("none")
        );
        let response = self
            .request(Method::PUT, self.contents_url.clone())
            .json(&body)
            .send()
            .await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(StoreError::write_rejected(status.as_u16(), text));
        }

        // The new sha is informational only; a success without it is still a success.
        let revision = serde_json::from_str::<UpdateContentsResponse>(&text)
            .ok()
            .and_then(|r| r.content)
            .and_then(|c| c.sha);

        Ok(WriteReceipt { revision })
    }
}
