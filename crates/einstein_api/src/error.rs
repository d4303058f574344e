use std::fmt;
use std::time::Duration;

use reqwest::StatusCode;
use serde::Deserialize;
use serde_json::Error as JsonError;

#[derive(Debug)]
pub enum EinsteinApiError {
    MissingAccessToken,
    InvalidHeader(String),
    Request(reqwest::Error),
    Status(StatusCode, String),
    MalformedHandshake(String),
    ReadTimeout(Duration),
    Serde(JsonError),
    Cancelled,
}

impl fmt::Display for EinsteinApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingAccessToken => write!(f, "access token is required"),
            Self::InvalidHeader(message) => write!(f, "invalid header: {message}"),
            Self::Request(error) => write!(f, "request error: {error}"),
            Self::Status(status, message) => write!(f, "HTTP {status} {message}"),
            Self::MalformedHandshake(message) => {
                write!(f, "malformed session handshake: {message}")
            }
            Self::ReadTimeout(bound) => {
                write!(f, "stream read produced no data within {bound:?}")
            }
            Self::Serde(error) => write!(f, "serialization error: {error}"),
            Self::Cancelled => write!(f, "request was cancelled"),
        }
    }
}

impl std::error::Error for EinsteinApiError {}

impl From<reqwest::Error> for EinsteinApiError {
    fn from(error: reqwest::Error) -> Self {
        Self::Request(error)
    }
}

impl From<JsonError> for EinsteinApiError {
    fn from(error: JsonError) -> Self {
        Self::Serde(error)
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayload {
    pub message: Option<String>,
    pub error: Option<ErrorPayloadFields>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorPayloadFields {
    pub message: Option<String>,
}

/// Extract a human-readable message from an error response body.
///
/// Tries the documented JSON error envelopes first, then falls back to the
/// raw body, then to the status line's canonical reason.
pub fn parse_error_message(status: StatusCode, body: &str) -> String {
    if let Ok(payload) = serde_json::from_str::<ErrorPayload>(body) {
        let message = payload
            .error
            .and_then(|fields| fields.message)
            .or(payload.message)
            .filter(|message| !message.trim().is_empty());
        if let Some(message) = message {
            return message;
        }
    }

    if body.is_empty() {
        status
            .canonical_reason()
            .unwrap_or("request failed")
            .to_string()
    } else {
        body.to_string()
    }
}
