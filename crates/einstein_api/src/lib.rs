//! Transport-only client primitives for the hosted agent-chat API.
//!
//! This crate owns request building, header construction, and stream
//! parsing for the session endpoints only. It intentionally contains no
//! credential acquisition code and no presentation coupling.
//!
//! Stream normalization keeps unrecognized frame tags as
//! [`AgentStreamEvent::Unknown`] for forward-compatible passthrough, and
//! classifies unparseable payloads as [`AgentStreamEvent::Malformed`] so
//! callers can drop them without aborting the stream.

pub mod client;
pub mod config;
pub mod decode;
pub mod error;
pub mod events;
pub mod headers;
pub mod payload;
pub mod sse;
pub mod url;

pub use client::{CancellationSignal, EinsteinApiClient};
pub use config::EinsteinApiConfig;
pub use decode::Utf8StreamDecoder;
pub use error::EinsteinApiError;
pub use events::AgentStreamEvent;
pub use payload::{HandshakeMessage, MessageRequest, StartSessionResponse};
pub use sse::SseStreamParser;
pub use url::DEFAULT_AGENT_BASE_URL;

pub use reqwest::StatusCode;
