// src/message.rs
//! Wire types for the JSON API. The `success` flag is added by
//! [`crate::responses::success`], so it does not appear here.

use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: Option<String>,
    /// Opaque to the server; any JSON value is accepted.
    #[serde(default)]
    pub conversation_id: Option<Value>,
}

impl ChatRequest {
    /// The id to echo back, or `None` when the client sent a falsy value
    /// (`null`, `false`, `0`, `""`). Strings come back untouched; other
    /// values come back as their JSON text.
    pub fn echoed_conversation_id(&self) -> Option<String> {
        match self.conversation_id.as_ref()? {
            Value::Null | Value::Bool(false) => None,
            Value::Number(n) if n.as_f64() == Some(0.0) => None,
            Value::String(id) if id.is_empty() => None,
            Value::String(id) => Some(id.clone()),
            other => Some(other.to_string()),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChatResponse {
    pub message: String,
    pub conversation_id: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GreetingResponse {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub mode: String,
}
