//! Bounded transcript of everything said in town

use std::collections::VecDeque;

use chrono::{DateTime, Utc};

/// Sender label used for the player's own lines
pub const PLAYER_SENDER: &str = "You";

/// One transcript line
#[derive(Debug, Clone, PartialEq)]
pub struct ChatMessage {
    /// Monotonic per log, usable for ordering
    pub id: u64,
    pub sender: String,
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

/// Append-only ring of the most recent messages
#[derive(Debug, Clone)]
pub struct ChatLog {
    messages: VecDeque<ChatMessage>,
    capacity: usize,
    next_id: u64,
}

impl ChatLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            messages: VecDeque::with_capacity(capacity),
            capacity: capacity.max(1),
            next_id: 1,
        }
    }

    /// Append a message, evicting the oldest once over capacity
    pub fn push(&mut self, sender: impl Into<String>, text: impl Into<String>) -> &ChatMessage {
        let id = self.next_id;
        self.next_id += 1;

        while self.messages.len() >= self.capacity {
            self.messages.pop_front();
        }
        self.messages.push_back(ChatMessage {
            id,
            sender: sender.into(),
            text: text.into(),
            timestamp: Utc::now(),
        });
        &self.messages[self.messages.len() - 1]
    }

    pub fn iter(&self) -> impl Iterator<Item = &ChatMessage> {
        self.messages.iter()
    }

    /// Owned copy, oldest first
    pub fn snapshot(&self) -> Vec<ChatMessage> {
        self.messages.iter().cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for ChatLog {
    fn default() -> Self {
        Self::new(15)
    }
}
