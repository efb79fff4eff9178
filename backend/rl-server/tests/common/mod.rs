#![allow(dead_code)]

//! Test infrastructure for rl-server API tests

use rl_server::{AppState, build_router};
use rl_store::{
    DocumentStore, StoreError, StoreResult, StoredDocument, WriteReceipt, WriteRequest,
};

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use http_body_util::BodyExt;
use serde_json::Value;
use tokio::sync::Barrier;
use tower::ServiceExt;

/// In-memory document store with GitHub-like revision checks.
///
/// Revisions are counters rendered as strings; a write whose revision does
/// not match the current one is rejected with 409.
pub struct InMemoryStore {
    state: Mutex<StoredState>,
    fetch_failure: Option<(u16, String)>,
    fetch_barrier: Option<Barrier>,
    fetch_calls: AtomicUsize,
    write_calls: AtomicUsize,
}

struct StoredState {
    text: String,
    revision: u64,
}

impl InMemoryStore {
    pub fn new(text: &str) -> Self {
        Self {
            state: Mutex::new(StoredState {
                text: text.to_string(),
                revision: 1,
            }),
            fetch_failure: None,
            fetch_barrier: None,
            fetch_calls: AtomicUsize::new(0),
            write_calls: AtomicUsize::new(0),
        }
    }

    pub fn empty() -> Self {
        Self::new(r#"{"requests":[]}"#)
    }

    /// Every fetch fails with the given backend status and body
    pub fn failing_fetch(status: u16, body: &str) -> Self {
        Self {
            fetch_failure: Some((status, body.to_string())),
            ..Self::empty()
        }
    }

    /// Hold each fetch until `parties` fetches have read the same revision
    pub fn with_fetch_barrier(mut self, parties: usize) -> Self {
        self.fetch_barrier = Some(Barrier::new(parties));
        self
    }

    pub fn text(&self) -> String {
        self.state.lock().unwrap().text.clone()
    }

    pub fn document(&self) -> Value {
        serde_json::from_str(&self.text()).unwrap()
    }

    pub fn revision(&self) -> String {
        self.state.lock().unwrap().revision.to_string()
    }

    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn write_calls(&self) -> usize {
        self.write_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl DocumentStore for InMemoryStore {
    async fn fetch(&self) -> StoreResult<StoredDocument> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if let Some((status, body)) = &self.fetch_failure {
            return Err(StoreError::fetch_rejected(*status, body.clone()));
        }

        let snapshot = {
            let state = self.state.lock().unwrap();
            StoredDocument {
                text: state.text.clone(),
                revision: Some(state.revision.to_string()),
            }
        };

        if let Some(ref barrier) = self.fetch_barrier {
            barrier.wait().await;
        }

        Ok(snapshot)
    }

    async fn write(&self, request: WriteRequest<'_>) -> StoreResult<WriteReceipt> {
        self.write_calls.fetch_add(1, Ordering::SeqCst);

        let mut state = self.state.lock().unwrap();
        let current = state.revision.to_string();

        if request.revision != Some(current.as_str()) {
            return Err(StoreError::write_rejected(
                409,
                format!(
                    r#"{{"message":"requests.json does not match {}"}}"#,
                    request.revision.unwrap_or("")
                ),
            ));
        }

        state.text = request.text.to_string();
        state.revision += 1;

        Ok(WriteReceipt {
            revision: Some(state.revision.to_string()),
        })
    }
}

/// Router backed by the given store
pub fn test_app(store: Arc<InMemoryStore>) -> Router {
    build_router(AppState::with_store(store))
}

/// Router with no store configured
pub fn unconfigured_app() -> Router {
    build_router(AppState::without_store())
}

/// Send a request and return status and raw body bytes
pub async fn send(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Vec<u8>) {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(body)
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    (status, bytes.to_vec())
}

/// Send a request and parse the JSON response body
pub async fn send_json(app: Router, method: &str, uri: &str, body: Body) -> (StatusCode, Value) {
    let (status, bytes) = send(app, method, uri, body).await;
    let json = serde_json::from_slice(&bytes).unwrap();
    (status, json)
}

/// POST a JSON value to the submit endpoint
pub async fn submit(app: Router, payload: &Value) -> (StatusCode, Value) {
    send_json(
        app,
        "POST",
        "/api/request",
        Body::from(serde_json::to_vec(payload).unwrap()),
    )
    .await
}

/// GET the list endpoint
pub async fn list(app: Router) -> (StatusCode, Value) {
    send_json(app, "GET", "/api/requests", Body::empty()).await
}
