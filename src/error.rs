use thiserror::Error;

use einstein_api::EinsteinApiError;

use crate::session::SessionState;

/// Failure taxonomy for session operations.
///
/// Frame-level parse problems never surface here: the stream parser skips
/// malformed frames and the read loop continues. Every variant aborts only
/// the operation that raised it; transcript and session state stay intact.
#[derive(Debug, Error)]
pub enum ChatSessionError {
    #[error("credential was rejected or unusable: {0}")]
    Auth(#[source] EinsteinApiError),

    #[error("session start failed: {0}")]
    SessionStart(#[source] EinsteinApiError),

    #[error("transport failure while exchanging messages: {0}")]
    Network(#[source] EinsteinApiError),

    #[error("session end request failed; local state is already Ended: {0}")]
    SessionEnd(#[source] EinsteinApiError),

    #[error("cannot {operation} while the session is {state:?}")]
    InvalidState {
        operation: &'static str,
        state: SessionState,
    },

    #[error("message stream was cancelled")]
    Cancelled,
}
