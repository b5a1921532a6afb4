//! Wire payloads exchanged with the remote chat service.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat/stream`.
#[derive(Debug, Clone, Serialize)]
pub struct ChatRequest {
    pub message: String,
    pub model_name: String,
}

/// One `data:` payload of the reply stream.
///
/// The service sends cumulative snapshots: `content` always carries the
/// whole reply so far. `error` is sent as a boolean by the reference server,
/// but any truthy JSON value is accepted.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StreamPayload {
    #[serde(default)]
    pub content: Option<serde_json::Value>,
    #[serde(default)]
    pub done: Option<serde_json::Value>,
    #[serde(default)]
    pub error: Option<serde_json::Value>,
}

impl StreamPayload {
    /// Snapshot text, if the payload carries a non-empty string.
    pub fn snapshot(&self) -> Option<&str> {
        match &self.content {
            Some(serde_json::Value::String(s)) if !s.is_empty() => Some(s.as_str()),
            _ => None,
        }
    }

    pub fn has_error(&self) -> bool {
        self.error.as_ref().is_some_and(is_truthy)
    }

    pub fn is_done(&self) -> bool {
        self.done.as_ref().is_some_and(is_truthy)
    }
}

fn is_truthy(value: &serde_json::Value) -> bool {
    match value {
        serde_json::Value::Null => false,
        serde_json::Value::Bool(b) => *b,
        serde_json::Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        serde_json::Value::String(s) => !s.is_empty(),
        serde_json::Value::Array(_) | serde_json::Value::Object(_) => true,
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: String,
    pub content: String,
}

/// Body of `GET /api/chat/history`.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryResponse {
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}
