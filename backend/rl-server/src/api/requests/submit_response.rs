use serde::Serialize;

/// Body of a successful submission: `{"ok": true}`
#[derive(Debug, Serialize)]
pub struct SubmitResponse {
    pub ok: bool,
}
