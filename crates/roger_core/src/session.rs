//! Session-scoped conversation log.
//!
//! Append-only message history owned by a single session. Responses are
//! appended in the arrival order of their triggering inputs; nothing in the
//! log is ever mutated after creation.

use serde::{Deserialize, Serialize};

use crate::types::{Message, Role};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ConversationLog {
    messages: Vec<Message>,
}

impl ConversationLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn message_count(&self) -> usize {
        self.messages.len()
    }

    /// Prior user-message texts, oldest first, for detectors that take
    /// history as plain strings.
    pub fn user_texts(&self) -> Vec<&str> {
        self.messages
            .iter()
            .filter(|m| m.role == Role::User)
            .map(|m| m.text.as_str())
            .collect()
    }

    /// Whether this is the very first turn of the session.
    pub fn is_first_turn(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_only_ordering() {
        let mut log = ConversationLog::new();
        assert!(log.is_first_turn());

        log.append(Message::user("hi"));
        log.append(Message::assistant("hello"));
        log.append(Message::user("my boss yells at me"));

        assert_eq!(log.message_count(), 3);
        assert_eq!(log.history()[0].text, "hi");
        assert_eq!(log.history()[2].text, "my boss yells at me");
        assert_eq!(log.user_texts(), vec!["hi", "my boss yells at me"]);
        assert!(!log.is_first_turn());
    }
}
