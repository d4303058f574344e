use serde_json::Value;

use crate::decode::Utf8StreamDecoder;
use crate::events::AgentStreamEvent;

/// Incremental parser for the blank-line-delimited event stream.
///
/// Bytes may arrive split at arbitrary boundaries; the parser buffers the
/// incomplete trailing frame (and any incomplete trailing character)
/// between calls, so the yielded event sequence is identical no matter how
/// the stream was chunked.
#[derive(Debug, Default)]
pub struct SseStreamParser {
    decoder: Utf8StreamDecoder,
    buffer: String,
}

impl SseStreamParser {
    /// Feed arbitrary bytes into the parser and drain complete frames.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<AgentStreamEvent> {
        self.buffer.push_str(&self.decoder.feed(bytes));
        let mut events = Vec::new();

        while let Some(split) = self.buffer.find("\n\n") {
            let frame = self.buffer[..split].to_string();
            self.buffer.drain(0..split + 2);

            if let Some(event) = parse_frame(&frame) {
                events.push(event);
            }
        }

        events
    }

    /// Parse a complete stream body in one shot.
    pub fn parse_frames(input: &str) -> Vec<AgentStreamEvent> {
        let mut parser = Self::default();
        parser.feed(input.as_bytes())
    }

    /// Discard whatever is left at end-of-stream.
    ///
    /// A remainder that never became a complete frame is dropped rather
    /// than force-emitted; the discard is logged so a misbehaving server
    /// stays diagnosable.
    pub fn finish(&mut self) {
        let dropped = self.decoder.finish();
        if dropped > 0 {
            tracing::warn!(dropped, "stream ended inside a multi-byte character");
        }
        if !self.buffer.trim().is_empty() {
            tracing::warn!(
                remainder = self.buffer.len(),
                "discarding incomplete trailing frame at end-of-stream"
            );
        }
        self.buffer.clear();
    }

    #[must_use]
    pub fn is_empty_buffer(&self) -> bool {
        self.buffer.trim().is_empty() && !self.decoder.has_pending()
    }
}

/// Extracts and classifies one frame. Frames without a `data:` payload
/// line (comments, heartbeats) yield nothing.
fn parse_frame(frame: &str) -> Option<AgentStreamEvent> {
    let payload = extract_data_payload(frame)?;
    Some(classify_payload(&payload))
}

fn extract_data_payload(frame: &str) -> Option<String> {
    let data_lines: Vec<&str> = frame
        .lines()
        .filter_map(|line| line.strip_prefix("data:"))
        .map(|value| value.trim())
        .filter(|value| !value.is_empty())
        .collect();

    if data_lines.is_empty() {
        None
    } else {
        Some(data_lines.join("\n"))
    }
}

fn classify_payload(payload: &str) -> AgentStreamEvent {
    let value = match serde_json::from_str::<Value>(payload) {
        Ok(value) => value,
        Err(error) => {
            tracing::debug!(%error, "skipping unparseable frame payload");
            return AgentStreamEvent::Malformed {
                reason: error.to_string(),
            };
        }
    };

    let Some(message) = value.get("message") else {
        return AgentStreamEvent::Malformed {
            reason: "payload has no message object".to_string(),
        };
    };
    let Some(kind) = message.get("type").and_then(Value::as_str) else {
        return AgentStreamEvent::Malformed {
            reason: "message has no type tag".to_string(),
        };
    };

    match kind {
        "TextChunk" => AgentStreamEvent::TextChunk {
            text: message
                .get("message")
                .and_then(Value::as_str)
                .unwrap_or("")
                .to_owned(),
        },
        "Inform" => AgentStreamEvent::Inform {
            id: message_id(message),
            text: message_text(message),
        },
        "EndOfTurn" => AgentStreamEvent::EndOfTurn {
            id: message_id(message),
            text: message_text(message),
        },
        other => AgentStreamEvent::Unknown {
            event_type: other.to_owned(),
        },
    }
}

/// Final-text override for turn-terminating events. An absent or empty
/// field means the accumulated fragments stand.
fn message_text(message: &Value) -> Option<String> {
    message
        .get("message")
        .and_then(Value::as_str)
        .filter(|text| !text.is_empty())
        .map(ToOwned::to_owned)
}

fn message_id(message: &Value) -> Option<String> {
    match message.get("id") {
        Some(Value::String(id)) => Some(id.clone()),
        Some(Value::Number(id)) => Some(id.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::SseStreamParser;
    use crate::events::AgentStreamEvent;

    #[test]
    fn parse_frames_incrementally() {
        let mut parser = SseStreamParser::default();
        let mut events = Vec::new();

        events.extend(
            parser.feed(b"data: {\"message\":{\"type\":\"TextChunk\",\"message\":\"Hello\"}}\n\n"),
        );
        assert_eq!(
            events,
            vec![AgentStreamEvent::TextChunk {
                text: "Hello".to_string(),
            }]
        );
        assert!(parser.is_empty_buffer());
    }

    #[test]
    fn partial_frame_is_buffered_until_delimiter_arrives() {
        let mut parser = SseStreamParser::default();

        assert!(parser
            .feed(b"data: {\"message\":{\"type\":\"TextChunk\",\"message\":\"abc\"")
            .is_empty());
        assert!(!parser.is_empty_buffer());

        let events = parser.feed(b"}}\n\n");
        assert_eq!(events.len(), 1);
        assert!(parser.is_empty_buffer());
    }
}
