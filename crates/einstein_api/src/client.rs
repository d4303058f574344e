use std::future::Future;
use std::sync::{atomic::AtomicBool, atomic::Ordering, Arc};
use std::time::Duration;

use futures_util::StreamExt;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Response};

use crate::config::EinsteinApiConfig;
use crate::error::{parse_error_message, EinsteinApiError};
use crate::events::AgentStreamEvent;
use crate::headers::{build_headers, ACCEPT_EVENT_STREAM, ACCEPT_JSON};
use crate::payload::{MessageRequest, StartSessionResponse};
use crate::sse::SseStreamParser;
use crate::url::{message_stream_url, session_end_url, session_start_url};

/// Optional cancellation signal shared across request and stream loops.
pub type CancellationSignal = Arc<AtomicBool>;

const CANCEL_POLL_INTERVAL: Duration = Duration::from_millis(25);

#[derive(Debug)]
pub struct EinsteinApiClient {
    http: Client,
    config: EinsteinApiConfig,
}

impl EinsteinApiClient {
    pub fn new(config: EinsteinApiConfig) -> Result<Self, EinsteinApiError> {
        let http = Client::builder().build().map_err(EinsteinApiError::from)?;
        Ok(Self { http, config })
    }

    pub fn config(&self) -> &EinsteinApiConfig {
        &self.config
    }

    fn header_map(&self, accept: &str) -> Result<HeaderMap, EinsteinApiError> {
        let headers = build_headers(&self.config, accept)?;
        let mut out = HeaderMap::new();
        for (key, value) in headers {
            let name = HeaderName::from_bytes(key.as_bytes()).map_err(|_| {
                EinsteinApiError::InvalidHeader(format!("invalid header name: {key}"))
            })?;
            let value = HeaderValue::from_str(&value).map_err(|_| {
                EinsteinApiError::InvalidHeader(format!("invalid value for header {key}"))
            })?;
            out.insert(name, value);
        }
        Ok(out)
    }

    /// Create a remote session and return the handshake payload.
    ///
    /// The credential travels in the `Authorization` header; the request
    /// body is an empty object.
    pub async fn start_session(
        &self,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<StartSessionResponse, EinsteinApiError> {
        let headers = self.header_map(ACCEPT_JSON)?;
        let mut request = self
            .http
            .post(session_start_url(&self.config.base_url))
            .headers(headers)
            .json(&serde_json::json!({}));
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = await_or_cancel(request.send(), cancellation)
            .await?
            .map_err(EinsteinApiError::from)?;
        let response = check_status(response, cancellation).await?;

        let handshake = await_or_cancel(response.json::<StartSessionResponse>(), cancellation)
            .await?
            .map_err(|error| EinsteinApiError::MalformedHandshake(error.to_string()))?;
        if handshake.session_id.trim().is_empty() {
            return Err(EinsteinApiError::MalformedHandshake(
                "handshake is missing a session id".to_string(),
            ));
        }

        Ok(handshake)
    }

    /// Stream one outbound message, invoking `on_event` for every decoded
    /// frame event in wire order.
    ///
    /// Events already handed to `on_event` stay delivered even when the
    /// read loop aborts afterwards; a failure never retracts them. Each
    /// chunk read is bounded by the configured read timeout so a stalled
    /// stream surfaces as an error instead of hanging.
    pub async fn stream_message_with_handler<F>(
        &self,
        session_id: &str,
        request: &MessageRequest,
        cancellation: Option<&CancellationSignal>,
        mut on_event: F,
    ) -> Result<(), EinsteinApiError>
    where
        F: FnMut(AgentStreamEvent),
    {
        let headers = self.header_map(ACCEPT_EVENT_STREAM)?;
        let response = await_or_cancel(
            self.http
                .post(message_stream_url(&self.config.base_url, session_id))
                .headers(headers)
                .json(request)
                .send(),
            cancellation,
        )
        .await?
        .map_err(EinsteinApiError::from)?;
        let response = check_status(response, cancellation).await?;

        let mut bytes = response.bytes_stream();
        let mut parser = SseStreamParser::default();

        loop {
            let next = tokio::time::timeout(self.config.read_timeout, bytes.next());
            let Some(chunk) = await_or_cancel(next, cancellation)
                .await?
                .map_err(|_| EinsteinApiError::ReadTimeout(self.config.read_timeout))?
            else {
                break;
            };
            if is_cancelled(cancellation) {
                return Err(EinsteinApiError::Cancelled);
            }
            let chunk = chunk.map_err(EinsteinApiError::from)?;
            for event in parser.feed(&chunk) {
                on_event(event);
            }
        }

        parser.finish();

        if is_cancelled(cancellation) {
            return Err(EinsteinApiError::Cancelled);
        }

        Ok(())
    }

    /// Collecting variant of [`Self::stream_message_with_handler`].
    pub async fn stream_message(
        &self,
        session_id: &str,
        request: &MessageRequest,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<Vec<AgentStreamEvent>, EinsteinApiError> {
        let mut events = Vec::new();
        self.stream_message_with_handler(session_id, request, cancellation, |event| {
            events.push(event);
        })
        .await?;
        Ok(events)
    }

    /// Terminate a remote session. The response body is ignored.
    pub async fn end_session(
        &self,
        session_id: &str,
        cancellation: Option<&CancellationSignal>,
    ) -> Result<(), EinsteinApiError> {
        let headers = self.header_map(ACCEPT_JSON)?;
        let mut request = self
            .http
            .delete(session_end_url(&self.config.base_url, session_id))
            .headers(headers);
        if let Some(timeout) = self.config.timeout {
            request = request.timeout(timeout);
        }

        let response = await_or_cancel(request.send(), cancellation)
            .await?
            .map_err(EinsteinApiError::from)?;
        check_status(response, cancellation).await?;
        Ok(())
    }
}

/// Map a non-success response to a typed status error, extracting a
/// readable message from the body when one exists.
async fn check_status(
    response: Response,
    cancellation: Option<&CancellationSignal>,
) -> Result<Response, EinsteinApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = await_or_cancel(response.text(), cancellation)
        .await?
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("request failed")
                .to_string()
        });
    Err(EinsteinApiError::Status(
        status,
        parse_error_message(status, &body),
    ))
}

fn is_cancelled(cancellation: Option<&CancellationSignal>) -> bool {
    cancellation.is_some_and(|token| token.load(Ordering::Acquire))
}

async fn await_or_cancel<F>(
    future: F,
    cancellation: Option<&CancellationSignal>,
) -> Result<F::Output, EinsteinApiError>
where
    F: Future,
{
    if cancellation.is_none() {
        return Ok(future.await);
    }

    let mut future = Box::pin(future);

    loop {
        if is_cancelled(cancellation) {
            return Err(EinsteinApiError::Cancelled);
        }

        if let Ok(output) = tokio::time::timeout(CANCEL_POLL_INTERVAL, &mut future).await {
            if is_cancelled(cancellation) {
                return Err(EinsteinApiError::Cancelled);
            }
            return Ok(output);
        }
    }
}
