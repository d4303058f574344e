use async_trait::async_trait;
use einstein_api::{
    AgentStreamEvent, CancellationSignal, EinsteinApiClient, EinsteinApiConfig, EinsteinApiError,
    MessageRequest, StartSessionResponse,
};

/// Transport seam between the session manager and the remote service.
///
/// The default implementation speaks HTTP through [`einstein_api`]; tests
/// and embedded hosts substitute their own.
#[async_trait]
pub trait AgentTransport: Send + Sync {
    async fn start_session(
        &self,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<StartSessionResponse, EinsteinApiError>;

    /// Streams one outbound message, delivering decoded events in wire
    /// order. Events handed to `on_event` before a failure stay delivered.
    async fn stream_message(
        &self,
        session_id: &str,
        request: &MessageRequest,
        cancellation: Option<&CancellationSignal>,
        on_event: &mut (dyn FnMut(AgentStreamEvent) + Send),
    ) -> Result<(), EinsteinApiError>;

    async fn end_session(
        &self,
        session_id: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), EinsteinApiError>;
}

/// HTTP-backed transport over [`EinsteinApiClient`].
#[derive(Debug)]
pub struct HttpTransport {
    client: EinsteinApiClient,
}

impl HttpTransport {
    pub fn new(config: EinsteinApiConfig) -> Result<Self, EinsteinApiError> {
        Ok(Self {
            client: EinsteinApiClient::new(config)?,
        })
    }
}

#[async_trait]
impl AgentTransport for HttpTransport {
    async fn start_session(
        &self,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<StartSessionResponse, EinsteinApiError> {
        self.client.start_session(cancellation).await
    }

    async fn stream_message(
        &self,
        session_id: &str,
        request: &MessageRequest,
        cancellation: Option<&CancellationSignal>,
        on_event: &mut (dyn FnMut(AgentStreamEvent) + Send),
    ) -> Result<(), EinsteinApiError> {
        self.client
            .stream_message_with_handler(session_id, request, cancellation, on_event)
            .await
    }

    async fn end_session(
        &self,
        session_id: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), EinsteinApiError> {
        self.client.end_session(session_id, cancellation).await
    }
}
