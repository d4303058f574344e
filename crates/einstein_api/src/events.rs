/// Typed event carried by one stream frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentStreamEvent {
    /// Incremental fragment of the agent's in-progress reply.
    TextChunk { text: String },
    /// Turn completion that may carry the final full reply text.
    Inform {
        id: Option<String>,
        text: Option<String>,
    },
    /// Turn completion without a full-text guarantee.
    EndOfTurn {
        id: Option<String>,
        text: Option<String>,
    },
    /// Recognized frame with an unrecognized type tag, forwarded for
    /// forward-compatible silent ignoring.
    Unknown { event_type: String },
    /// Frame whose payload could not be parsed. Consumers drop it; the
    /// stream continues.
    Malformed { reason: String },
}

impl AgentStreamEvent {
    /// Returns true when this event terminates the agent's current turn.
    #[must_use]
    pub fn is_turn_terminal(&self) -> bool {
        matches!(self, Self::Inform { .. } | Self::EndOfTurn { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::AgentStreamEvent;

    #[test]
    fn turn_terminal_detection_matches_event_kind() {
        assert!(!AgentStreamEvent::TextChunk {
            text: "hel".to_string(),
        }
        .is_turn_terminal());
        assert!(AgentStreamEvent::Inform {
            id: None,
            text: None,
        }
        .is_turn_terminal());
        assert!(AgentStreamEvent::EndOfTurn {
            id: Some("7".to_string()),
            text: Some("done".to_string()),
        }
        .is_turn_terminal());
        assert!(!AgentStreamEvent::Unknown {
            event_type: "ProgressIndicator".to_string(),
        }
        .is_turn_terminal());
        assert!(!AgentStreamEvent::Malformed {
            reason: "bad json".to_string(),
        }
        .is_turn_terminal());
    }
}
