//! Session lifecycle and streaming transcript core for a remote chat-agent
//! service.
//!
//! [`SessionManager`] drives start/send/end against the transport seam and
//! folds streamed agent events into an append-only [`Transcript`].
//! Rendering, input handling, and credential acquisition belong to the
//! host; this crate owns only the protocol and state machine.

pub mod accumulate;
pub mod error;
pub mod session;
pub mod transcript;
pub mod transport;

pub use accumulate::MessageAccumulator;
pub use error::ChatSessionError;
pub use session::{SessionManager, SessionState};
pub use transcript::{ChatMessage, MessageId, Sender, Transcript};
pub use transport::{AgentTransport, HttpTransport};

pub use einstein_api::{AgentStreamEvent, CancellationSignal, EinsteinApiConfig};
