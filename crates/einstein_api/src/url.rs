/// Default base URL for the hosted agent API.
pub const DEFAULT_AGENT_BASE_URL: &str = "https://api.salesforce.com/einstein/ai-agent/v1";

/// Normalize a base URL for endpoint building.
///
/// An empty or whitespace-only input falls back to the default base URL;
/// trailing slashes are trimmed so joined paths never double up.
pub fn normalize_base_url(input: &str) -> String {
    let base = if input.trim().is_empty() {
        DEFAULT_AGENT_BASE_URL
    } else {
        input.trim()
    };

    base.trim_end_matches('/').to_string()
}

/// Endpoint for creating a session.
pub fn session_start_url(base: &str) -> String {
    format!("{}/sessions", normalize_base_url(base))
}

/// Endpoint for streaming one outbound message within a session.
pub fn message_stream_url(base: &str, session_id: &str) -> String {
    format!(
        "{}/sessions/{}/messages/stream",
        normalize_base_url(base),
        session_id
    )
}

/// Endpoint for terminating a session.
pub fn session_end_url(base: &str, session_id: &str) -> String {
    format!("{}/sessions/{}", normalize_base_url(base), session_id)
}
