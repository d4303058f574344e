use einstein_api::{MessageRequest, StartSessionResponse};
use serde_json::json;

#[test]
fn message_request_serializes_to_documented_wire_shape() {
    let request = MessageRequest::text(7, "What's the weather?");

    let value = serde_json::to_value(&request).expect("request should serialize");
    assert_eq!(
        value,
        json!({
            "message": {
                "sequenceId": 7,
                "type": "Text",
                "text": "What's the weather?",
            },
            "variables": [],
        })
    );
}

#[test]
fn handshake_deserializes_session_id_and_greeting() {
    let body = r#"{
        "sessionId": "06f4ddc3",
        "messages": [
            { "id": "m-1", "message": "Hi, how can I help?" },
            { "id": "m-2", "message": "second message is ignored" }
        ]
    }"#;

    let handshake: StartSessionResponse =
        serde_json::from_str(body).expect("handshake should deserialize");
    assert_eq!(handshake.session_id, "06f4ddc3");
    assert_eq!(handshake.greeting(), Some("Hi, how can I help?"));
}

#[test]
fn handshake_tolerates_missing_messages() {
    let handshake: StartSessionResponse =
        serde_json::from_str(r#"{"sessionId":"s-1"}"#).expect("handshake should deserialize");
    assert!(handshake.messages.is_empty());
    assert_eq!(handshake.greeting(), None);
}

#[test]
fn handshake_message_id_shape_is_opaque() {
    let body = r#"{"sessionId":"s-2","messages":[{"id":1733349000000,"message":"hello"}]}"#;

    let handshake: StartSessionResponse =
        serde_json::from_str(body).expect("numeric ids should be tolerated");
    assert_eq!(handshake.greeting(), Some("hello"));
}
