//! Request list REST API handlers
//!
//! Submit is a read-modify-write against the document store: fetch the
//! document and its revision, append one entry, write it back guarded by
//! that revision. A concurrent writer makes the write fail; there is no
//! retry.

use crate::{ApiError, ApiResult, AppState, RequestListResponse, SubmitResponse};

use rl_core::{RequestDocument, Submission};
use rl_store::WriteRequest;

use axum::{Json, body::Bytes, extract::State, http::StatusCode};

/// POST /api/request
pub async fn submit_request(
    State(state): State<AppState>,
    body: Bytes,
) -> ApiResult<Json<SubmitResponse>> {
    // 1. Configuration is checked before the body is looked at
    let store = state.require_store()?;

    // 2. Validate input
    let submission = Submission::from_body(&body)?;

    // 3. Fetch current document and revision
    let stored = store.fetch().await?;
    let mut document = parse_or_empty(&stored.text);

    // 4. Append
    let entry = submission.into_entry();
    document.push(&entry)?;
    let text = document.to_pretty_json()?;

    // 5. Write back, guarded by the fetched revision
    let message = format!("New request: {}", entry.title);
    let receipt = store
        .write(WriteRequest {
            text: &text,
            revision: stored.revision.as_deref(),
            message: &message,
        })
        .await
        .inspect_err(|e| {
            if e.is_conflict() {
                log::warn!(
                    "Revision conflict writing request \"{}\" (base revision {}); caller must resubmit",
                    entry.title,
                    stored.revision.as_deref().unwrap_or("none")
                );
            }
        })?;

    log::info!(
        "Stored request \"{}\" from {} ({} total, revision {})",
        entry.title,
        entry.requested_by,
        document.len(),
        receipt.revision.as_deref().unwrap_or("unknown")
    );

    Ok(Json(SubmitResponse { ok: true }))
}

/// GET /api/requests
pub async fn list_requests(State(state): State<AppState>) -> ApiResult<Json<RequestListResponse>> {
    let store = state.require_store()?;

    let stored = store.fetch().await?;
    let document = parse_or_empty(&stored.text);

    log::debug!("Listing {} requests", document.len());

    Ok(Json(RequestListResponse {
        sha: stored.revision,
        requests: document.requests,
    }))
}

/// OPTIONS /api/requests - CORS preflight
pub async fn preflight() -> StatusCode {
    StatusCode::NO_CONTENT
}

/// HEAD /api/requests - liveness probe, never touches the store
pub async fn probe() -> StatusCode {
    StatusCode::OK
}

/// Any method an endpoint does not serve
pub async fn method_not_allowed() -> ApiError {
    ApiError::method_not_allowed()
}

/// Unparsable stored content degrades to an empty list
fn parse_or_empty(text: &str) -> RequestDocument {
    RequestDocument::parse(text).unwrap_or_else(|e| {
        log::warn!("Stored document unreadable, starting from an empty list: {}", e);
        RequestDocument::default()
    })
}
