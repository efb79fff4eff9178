use crate::ApiError;
use crate::api::error::{DETAIL_LIMIT, truncate_detail};

use rl_core::Submission;
use rl_store::StoreError;

use axum::response::IntoResponse;
use http::StatusCode;
use http_body_util::BodyExt;

async fn body_json(error: ApiError) -> (StatusCode, serde_json::Value) {
    let response = error.into_response();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&body).unwrap())
}

#[tokio::test]
async fn test_method_not_allowed_returns_405_without_detail() {
    let (status, json) = body_json(ApiError::method_not_allowed()).await;

    assert_eq!(status, StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(json, serde_json::json!({ "error": "METHOD_NOT_ALLOWED" }));
}

#[tokio::test]
async fn test_missing_env_returns_500() {
    let (status, json) = body_json(ApiError::missing_env()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json, serde_json::json!({ "error": "MISSING_ENV" }));
}

#[tokio::test]
async fn test_invalid_input_returns_400_without_detail() {
    let core_err = Submission::from_body(br#"{"title":"x"}"#).unwrap_err();

    let (status, json) = body_json(core_err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json, serde_json::json!({ "error": "INVALID_INPUT" }));
}

#[tokio::test]
async fn test_malformed_body_maps_to_invalid_input() {
    let core_err = Submission::from_body(b"{oops").unwrap_err();

    let (status, json) = body_json(core_err.into()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "INVALID_INPUT");
}

#[tokio::test]
async fn test_fetch_rejection_passes_status_through() {
    let api_err: ApiError = StoreError::fetch_rejected(404, r#"{"message":"Not Found"}"#).into();

    let (status, json) = body_json(api_err).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["error"], "GITHUB_GET_FAILED");
    assert_eq!(json["detail"], r#"{"message":"Not Found"}"#);
}

#[tokio::test]
async fn test_write_conflict_passes_409_through() {
    let api_err: ApiError = StoreError::write_rejected(409, "sha does not match").into();

    let (status, json) = body_json(api_err).await;

    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(json["error"], "GITHUB_PUT_FAILED");
    assert_eq!(json["detail"], "sha does not match");
}

#[tokio::test]
async fn test_backend_detail_truncated_to_limit() {
    let long_body = "x".repeat(DETAIL_LIMIT * 2);
    let api_err: ApiError = StoreError::write_rejected(422, long_body).into();

    let (_, json) = body_json(api_err).await;

    assert_eq!(json["detail"].as_str().unwrap().chars().count(), DETAIL_LIMIT);
}

#[tokio::test]
async fn test_server_error_returns_500_with_detail() {
    let (status, json) = body_json(ApiError::server("connection reset")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(json["error"], "SERVER_ERROR");
    assert_eq!(json["detail"], "connection reset");
}

#[test]
fn test_json_store_error_converts_to_server_error() {
    let json_err = serde_json::from_str::<serde_json::Value>("<html>").unwrap_err();
    let api_err: ApiError = StoreError::from(json_err).into();

    assert!(matches!(api_err, ApiError::Server { .. }));
}

#[test]
fn test_missing_configuration_converts_to_missing_env() {
    let config = rl_config::StoreConfig::default();
    let store_err = match rl_store::GithubStore::from_config(&config) {
        Err(e) => e,
        Ok(_) => panic!("Expected missing configuration"),
    };

    let api_err: ApiError = store_err.into();

    assert!(matches!(api_err, ApiError::MissingEnv { .. }));
}

#[test]
fn test_truncate_detail_counts_characters() {
    let body = "é".repeat(DETAIL_LIMIT + 1);

    assert_eq!(truncate_detail(&body).chars().count(), DETAIL_LIMIT);
    assert_eq!(truncate_detail("short"), "short");
}
