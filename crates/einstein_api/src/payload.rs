use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Wire body for `POST /sessions/{id}/messages/stream`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MessageRequest {
    pub message: OutboundMessage,
    #[serde(default)]
    pub variables: Vec<Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboundMessage {
    /// Monotonic per-session ordinal for outbound messages.
    #[serde(rename = "sequenceId")]
    pub sequence_id: u64,
    #[serde(rename = "type")]
    pub kind: String,
    pub text: String,
}

impl MessageRequest {
    /// Builds the canonical text-message body.
    #[must_use]
    pub fn text(sequence_id: u64, text: impl Into<String>) -> Self {
        Self {
            message: OutboundMessage {
                sequence_id,
                kind: "Text".to_string(),
                text: text.into(),
            },
            variables: Vec::new(),
        }
    }
}

/// Handshake payload returned by session creation.
#[derive(Debug, Clone, Deserialize)]
pub struct StartSessionResponse {
    #[serde(rename = "sessionId")]
    pub session_id: String,
    #[serde(default)]
    pub messages: Vec<HandshakeMessage>,
}

/// One service-authored message in the handshake payload.
#[derive(Debug, Clone, Deserialize)]
pub struct HandshakeMessage {
    /// Service-side identifier; shape varies, so it stays opaque.
    #[serde(default)]
    pub id: Option<Value>,
    #[serde(default)]
    pub message: String,
}

impl StartSessionResponse {
    /// The service greeting. Only the first handshake message is consumed.
    #[must_use]
    pub fn greeting(&self) -> Option<&str> {
        self.messages.first().map(|entry| entry.message.as_str())
    }
}
