use serde::Serialize;
use serde_json::Value;

/// Stored requests with the revision they were read at
#[derive(Debug, Serialize)]
pub struct RequestListResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sha: Option<String>,
    pub requests: Vec<Value>,
}
