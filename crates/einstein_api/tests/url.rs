use einstein_api::url::{
    message_stream_url, normalize_base_url, session_end_url, session_start_url,
};
use einstein_api::DEFAULT_AGENT_BASE_URL;

#[test]
fn empty_base_url_falls_back_to_default() {
    assert_eq!(normalize_base_url(""), DEFAULT_AGENT_BASE_URL);
    assert_eq!(normalize_base_url("   "), DEFAULT_AGENT_BASE_URL);
}

#[test]
fn trailing_slashes_are_trimmed() {
    assert_eq!(
        normalize_base_url("https://agent.example/v1/"),
        "https://agent.example/v1"
    );
}

#[test]
fn endpoint_builders_produce_expected_paths() {
    let base = "https://agent.example/v1";

    assert_eq!(
        session_start_url(base),
        "https://agent.example/v1/sessions"
    );
    assert_eq!(
        message_stream_url(base, "s-42"),
        "https://agent.example/v1/sessions/s-42/messages/stream"
    );
    assert_eq!(
        session_end_url(base, "s-42"),
        "https://agent.example/v1/sessions/s-42"
    );
}
