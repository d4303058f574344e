use einstein_api::AgentStreamEvent;

/// Folds stream events into completed agent messages.
///
/// `pending` holds fragment text strictly between the first `TextChunk` of
/// a turn and the event that terminates it; `waiting` mirrors whether the
/// agent is still composing. State is scoped to one session and reset
/// whenever a turn completes, the stream fails, or the session ends.
#[derive(Debug, Default)]
pub struct MessageAccumulator {
    pending: String,
    waiting: bool,
}

impl MessageAccumulator {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_waiting(&self) -> bool {
        self.waiting
    }

    /// Marks the agent as composing; called when an outbound message is
    /// issued, before the first frame arrives.
    pub fn begin_turn(&mut self) {
        self.waiting = true;
    }

    /// Discards partial state after cancellation, transport failure, or
    /// session end.
    pub fn reset(&mut self) {
        self.pending.clear();
        self.waiting = false;
    }

    /// Apply one event; returns the completed message text when the event
    /// closes a non-empty turn.
    ///
    /// Explicit text on a turn-terminating event overrides the accumulated
    /// fragments. Empty turns emit nothing but still close: the waiting
    /// flag clears on every terminal event so UI state cannot wedge.
    pub fn apply(&mut self, event: AgentStreamEvent) -> Option<String> {
        match event {
            AgentStreamEvent::TextChunk { text } => {
                self.pending.push_str(&text);
                self.waiting = true;
                None
            }
            AgentStreamEvent::Inform { text, .. } | AgentStreamEvent::EndOfTurn { text, .. } => {
                let pending = std::mem::take(&mut self.pending);
                self.waiting = false;

                let completed = match text.map(|t| t.trim().to_owned()).filter(|t| !t.is_empty()) {
                    Some(explicit) => explicit,
                    None => pending.trim().to_owned(),
                };
                if completed.is_empty() {
                    None
                } else {
                    Some(completed)
                }
            }
            AgentStreamEvent::Unknown { .. } | AgentStreamEvent::Malformed { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MessageAccumulator;
    use einstein_api::AgentStreamEvent;

    fn chunk(text: &str) -> AgentStreamEvent {
        AgentStreamEvent::TextChunk {
            text: text.to_string(),
        }
    }

    fn end_of_turn(text: Option<&str>) -> AgentStreamEvent {
        AgentStreamEvent::EndOfTurn {
            id: None,
            text: text.map(ToOwned::to_owned),
        }
    }

    #[test]
    fn fragments_accumulate_into_one_message() {
        let mut accumulator = MessageAccumulator::new();

        assert_eq!(accumulator.apply(chunk("Hel")), None);
        assert!(accumulator.is_waiting());
        assert_eq!(accumulator.apply(chunk("lo")), None);
        assert!(accumulator.is_waiting());

        assert_eq!(
            accumulator.apply(end_of_turn(None)),
            Some("Hello".to_string())
        );
        assert!(!accumulator.is_waiting());
    }

    #[test]
    fn explicit_terminal_text_overrides_fragments() {
        let mut accumulator = MessageAccumulator::new();
        accumulator.apply(chunk("partial"));

        assert_eq!(
            accumulator.apply(AgentStreamEvent::Inform {
                id: Some("7".to_string()),
                text: Some("Full forecast.".to_string()),
            }),
            Some("Full forecast.".to_string())
        );
    }

    #[test]
    fn empty_turn_emits_nothing_and_clears_waiting() {
        let mut accumulator = MessageAccumulator::new();
        accumulator.begin_turn();

        assert_eq!(accumulator.apply(end_of_turn(None)), None);
        assert!(!accumulator.is_waiting());
    }

    #[test]
    fn whitespace_only_fragments_are_suppressed() {
        let mut accumulator = MessageAccumulator::new();
        accumulator.apply(chunk("   "));

        assert_eq!(accumulator.apply(end_of_turn(None)), None);
    }

    #[test]
    fn completed_message_text_is_trimmed() {
        let mut accumulator = MessageAccumulator::new();
        accumulator.apply(chunk("It's sunny. "));

        assert_eq!(
            accumulator.apply(end_of_turn(None)),
            Some("It's sunny.".to_string())
        );
    }

    #[test]
    fn unknown_and_malformed_events_are_inert() {
        let mut accumulator = MessageAccumulator::new();
        accumulator.apply(chunk("Hel"));

        assert_eq!(
            accumulator.apply(AgentStreamEvent::Unknown {
                event_type: "ProgressIndicator".to_string(),
            }),
            None
        );
        assert_eq!(
            accumulator.apply(AgentStreamEvent::Malformed {
                reason: "bad json".to_string(),
            }),
            None
        );
        assert!(accumulator.is_waiting());

        assert_eq!(accumulator.apply(chunk("lo")), None);
        assert_eq!(
            accumulator.apply(end_of_turn(None)),
            Some("Hello".to_string())
        );
    }

    #[test]
    fn consecutive_turns_do_not_leak_fragments() {
        let mut accumulator = MessageAccumulator::new();

        accumulator.apply(chunk("first"));
        assert_eq!(
            accumulator.apply(end_of_turn(None)),
            Some("first".to_string())
        );

        accumulator.apply(chunk("second"));
        assert_eq!(
            accumulator.apply(end_of_turn(None)),
            Some("second".to_string())
        );
    }

    #[test]
    fn reset_discards_partial_fragments() {
        let mut accumulator = MessageAccumulator::new();
        accumulator.apply(chunk("doomed"));

        accumulator.reset();
        assert!(!accumulator.is_waiting());
        assert_eq!(accumulator.apply(end_of_turn(None)), None);
    }
}
