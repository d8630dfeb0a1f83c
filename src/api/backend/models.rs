use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Status body returned by the write endpoints
///
/// `POST /api/banks` fills `id`, `POST /api/fix-mismatch` fills `new_id`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct StatusResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub new_id: Option<i64>,
}

/// Request body for POST /api/fix-mismatch
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixMismatchRequest {
    pub id: i64,
}

/// Request body for POST /api/banks and /api/pairs
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReferenceRequest {
    pub name: String,
}

/// Error body sent with non-2xx responses
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorResponse {
    pub message: Option<String>,
}

/// Errors raised by the backend client
#[derive(Debug, Clone, Error)]
pub enum ApiError {
    /// Network/request error, nothing came back
    #[error("Request Error: {0}")]
    Request(String),
    /// Non-2xx response, with the server's `message` when it sent one
    #[error("HTTP Error ({status}): {}", .message.as_deref().unwrap_or("no message"))]
    Rejected {
        status: u16,
        message: Option<String>,
    },
    /// 2xx response with a body we could not parse
    #[error("Deserialization Error: {0}")]
    Deserialization(String),
}

impl ApiError {
    /// Text shown to the operator for a failed write
    ///
    /// The server's own message wins, transport failures read "Server error",
    /// anything else falls back to `fallback`.
    pub fn notice(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                message: Some(message),
                ..
            } if !message.is_empty() => message.clone(),
            ApiError::Request(_) => "Server error".to_string(),
            _ => fallback.to_string(),
        }
    }
}
