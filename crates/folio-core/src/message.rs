use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Who wrote a chat message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Author {
    User,
    Assistant,
}

impl Author {
    /// CSS class used for the message bubble.
    pub fn css_class(&self) -> &'static str {
        match self {
            Self::User => "user-message",
            Self::Assistant => "assistant-message",
        }
    }
}

/// A single exchanged message in a conversation session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub author: Author,
    /// Message text, stored unescaped.
    pub text: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            author: Author::User,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        Self {
            author: Author::Assistant,
            text: text.into(),
            timestamp: Utc::now(),
        }
    }
}

/// The last user-composed message waiting for a contact channel.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PendingOutboundMessage(String);

impl PendingOutboundMessage {
    pub fn new(text: impl Into<String>) -> Self {
        Self(text.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.trim().is_empty()
    }
}

/// First `max` characters of `text`, for analytics labels.
pub fn truncate_label(text: &str, max: usize) -> String {
    text.chars().take(max).collect()
}
