use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use tracing::{debug, warn};

use einstein_api::{
    AgentStreamEvent, CancellationSignal, EinsteinApiConfig, EinsteinApiError, MessageRequest,
};

use crate::accumulate::MessageAccumulator;
use crate::error::ChatSessionError;
use crate::transcript::{Sender, Transcript};
use crate::transport::{AgentTransport, HttpTransport};

/// Text appended when a session is terminated locally.
const SESSION_ENDED_TEXT: &str = "Session ended.";

/// Lifecycle of one session against the remote service.
///
/// `Starting` and `Ending` fall back to `Idle` and forward to `Ended`
/// respectively on failure; neither is retried implicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    Idle,
    Starting,
    Active,
    Ending,
    Ended,
}

/// Drives one chat session's lifecycle against the remote agent service.
///
/// All operations run on the caller's task and suspend only at network
/// boundaries. `&mut self` on `send` makes two interleaved streams for one
/// session unrepresentable; hosts that want to abort an in-flight stream
/// set the shared handle from [`Self::cancel_handle`] and call
/// [`Self::end`] once the send returns.
pub struct SessionManager {
    transport: Box<dyn AgentTransport>,
    state: SessionState,
    session_id: Option<String>,
    transcript: Transcript,
    accumulator: MessageAccumulator,
    next_sequence_id: u64,
    cancellation: CancellationSignal,
}

impl SessionManager {
    #[must_use]
    pub fn new(transport: Box<dyn AgentTransport>) -> Self {
        Self {
            transport,
            state: SessionState::Idle,
            session_id: None,
            transcript: Transcript::new(),
            accumulator: MessageAccumulator::new(),
            next_sequence_id: 1,
            cancellation: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Convenience constructor over the HTTP transport.
    pub fn over_http(config: EinsteinApiConfig) -> Result<Self, ChatSessionError> {
        let transport = HttpTransport::new(config).map_err(ChatSessionError::SessionStart)?;
        Ok(Self::new(Box::new(transport)))
    }

    #[must_use]
    pub fn state(&self) -> SessionState {
        self.state
    }

    #[must_use]
    pub fn session_id(&self) -> Option<&str> {
        self.session_id.as_deref()
    }

    #[must_use]
    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// True while the agent is composing a reply.
    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.accumulator.is_waiting()
    }

    /// Shared handle that aborts an in-flight stream read when set.
    #[must_use]
    pub fn cancel_handle(&self) -> CancellationSignal {
        Arc::clone(&self.cancellation)
    }

    /// Perform the session-creation exchange.
    ///
    /// On success the service greeting (the first handshake message, if
    /// any) becomes the transcript's first Agent message. On failure no
    /// session exists and the state returns to `Idle`.
    pub async fn start(&mut self) -> Result<(), ChatSessionError> {
        if self.state != SessionState::Idle {
            return Err(ChatSessionError::InvalidState {
                operation: "start",
                state: self.state,
            });
        }

        self.state = SessionState::Starting;
        match self.transport.start_session(Some(&self.cancellation)).await {
            Ok(handshake) => {
                debug!(session_id = %handshake.session_id, "session started");
                if let Some(greeting) = handshake
                    .greeting()
                    .map(str::trim)
                    .filter(|greeting| !greeting.is_empty())
                {
                    self.transcript.push(Sender::Agent, greeting);
                }
                self.session_id = Some(handshake.session_id);
                self.state = SessionState::Active;
                Ok(())
            }
            Err(error) => {
                self.state = SessionState::Idle;
                Err(classify_start_failure(error))
            }
        }
    }

    /// Send one user message and consume the agent's streamed reply.
    ///
    /// The User message is appended synchronously, before any network
    /// round-trip. Completed Agent messages are appended in wire order as
    /// the stream produces them; a mid-stream failure keeps everything
    /// already appended and discards only the partial fragments.
    ///
    /// Empty or whitespace-only input is ignored without error.
    pub async fn send(&mut self, text: &str) -> Result<(), ChatSessionError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Ok(());
        }
        if self.state != SessionState::Active {
            return Err(ChatSessionError::InvalidState {
                operation: "send",
                state: self.state,
            });
        }
        let Some(session_id) = self.session_id.clone() else {
            return Err(ChatSessionError::InvalidState {
                operation: "send",
                state: self.state,
            });
        };

        let sequence_id = self.next_sequence_id;
        self.next_sequence_id += 1;
        let request = MessageRequest::text(sequence_id, trimmed);

        self.transcript.push(Sender::User, trimmed);
        self.accumulator.begin_turn();

        let Self {
            transport,
            transcript,
            accumulator,
            cancellation,
            ..
        } = self;
        let mut on_event = |event: AgentStreamEvent| {
            if let Some(completed) = accumulator.apply(event) {
                transcript.push(Sender::Agent, completed);
            }
        };
        let result = transport
            .stream_message(&session_id, &request, Some(&*cancellation), &mut on_event)
            .await;

        match result {
            Ok(()) => {
                if self.accumulator.is_waiting() {
                    warn!("stream ended without a turn-terminating event; discarding partial reply");
                    self.accumulator.reset();
                }
                Ok(())
            }
            Err(EinsteinApiError::Cancelled) => {
                self.accumulator.reset();
                Err(ChatSessionError::Cancelled)
            }
            Err(error) => {
                self.accumulator.reset();
                Err(ChatSessionError::Network(error))
            }
        }
    }

    /// Terminate the session.
    ///
    /// Idempotent: calling again after `Ended` is a no-op. Local cleanup is
    /// unconditional; if the remote termination request fails, the state
    /// still transitions to `Ended` and the failure is reported rather
    /// than retried. The terminal transcript message is appended exactly
    /// once per established session.
    pub async fn end(&mut self) -> Result<(), ChatSessionError> {
        if self.state == SessionState::Ended {
            return Ok(());
        }

        // Any reader still polling the shared signal stops before remote
        // teardown releases the connection.
        self.cancellation.store(true, Ordering::Release);

        let Some(session_id) = self.session_id.take() else {
            self.state = SessionState::Ended;
            return Ok(());
        };

        self.state = SessionState::Ending;
        let result = self.transport.end_session(&session_id, None).await;

        self.accumulator.reset();
        self.transcript.push(Sender::Agent, SESSION_ENDED_TEXT);
        self.state = SessionState::Ended;

        match result {
            Ok(()) => {
                debug!(session_id = %session_id, "session ended");
                Ok(())
            }
            Err(error) => {
                warn!(%error, "session end request failed; local state is Ended");
                Err(ChatSessionError::SessionEnd(error))
            }
        }
    }
}

fn classify_start_failure(error: EinsteinApiError) -> ChatSessionError {
    match &error {
        EinsteinApiError::MissingAccessToken => ChatSessionError::Auth(error),
        EinsteinApiError::Status(status, _) if matches!(status.as_u16(), 401 | 403) => {
            ChatSessionError::Auth(error)
        }
        EinsteinApiError::Cancelled => ChatSessionError::Cancelled,
        _ => ChatSessionError::SessionStart(error),
    }
}
