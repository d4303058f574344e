use serde::Serialize;

/// Identifier unique to one message within a [`Transcript`].
pub type MessageId = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    User,
    Agent,
}

/// One completed chat message. Never mutated after creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub id: MessageId,
    pub sender: Sender,
    pub text: String,
}

/// Append-only ordered record of a session's chat messages.
///
/// Insertion order is display order is causal arrival order. Ids come from
/// an owned counter, so no two messages in one transcript collide and a
/// fresh session implies a fresh transcript.
#[derive(Debug, Default)]
pub struct Transcript {
    entries: Vec<ChatMessage>,
    next_id: MessageId,
}

impl Transcript {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append one message and return its allocated id.
    pub fn push(&mut self, sender: Sender, text: impl Into<String>) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        self.entries.push(ChatMessage {
            id,
            sender,
            text: text.into(),
        });
        id
    }

    #[must_use]
    pub fn messages(&self) -> &[ChatMessage] {
        &self.entries
    }

    /// Owned copy for presentation layers that outlive the borrow.
    #[must_use]
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.entries.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    #[must_use]
    pub fn last(&self) -> Option<&ChatMessage> {
        self.entries.last()
    }
}
