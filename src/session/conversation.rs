//! Conversation message history management.

use crate::types::{Message, Role};

/// Ordered message history: appended at the tail, evicted from the head.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Conversation {
    messages: Vec<Message>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a message with the given role.
    pub fn push(&mut self, role: Role, content: impl Into<String>) {
        self.messages.push(Message::new(role, content));
    }

    /// Add a user message.
    pub fn add_user_message(&mut self, text: impl Into<String>) {
        self.push(Role::User, text);
    }

    /// Add an assistant message.
    pub fn add_assistant_message(&mut self, text: impl Into<String>) {
        self.push(Role::Assistant, text);
    }

    /// Get all messages, oldest first.
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Sum of content lengths across every stored message.
    pub fn total_chars(&self) -> usize {
        self.messages.iter().map(Message::char_len).sum()
    }

    /// Evict the oldest messages until the total content length is at most `bound`.
    ///
    /// The newest message is never evicted, so a single oversized message survives.
    /// Returns how many messages were removed.
    pub fn trim_to(&mut self, bound: usize) -> usize {
        let mut total = self.total_chars();
        let mut evicted = 0;
        while total > bound && self.messages.len() - evicted > 1 {
            total -= self.messages[evicted].char_len();
            evicted += 1;
        }
        self.messages.drain(..evicted);
        evicted
    }

    /// Clear all messages.
    pub fn clear(&mut self) {
        self.messages.clear();
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    /// Number of messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}
