use crate::{AppState, health, list_requests, method_not_allowed, preflight, probe, submit_request};

use axum::{
    Router,
    routing::{get, post},
};

/// Build the application router with all endpoints
pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Submit: POST only
        .route(
            "/api/request",
            post(submit_request).fallback(method_not_allowed),
        )
        // List: GET, plus preflight and liveness probes
        .route(
            "/api/requests",
            get(list_requests)
                .head(probe)
                .options(preflight)
                .fallback(method_not_allowed),
        )
        // Health check
        .route("/health", get(health::health_check))
        .with_state(state)
}
