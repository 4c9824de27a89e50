//! Conversation state: which screen is showing and what has been said.

use folio_core::message::{Author, ChatMessage};
use std::fmt;
use uuid::Uuid;

/// A screen inside the conversation dialogue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Screen {
    Main,
    About,
    Contact,
    Project,
    Expertise,
    Rates,
}

impl Screen {
    pub const ALL: [Screen; 6] = [
        Screen::Main,
        Screen::About,
        Screen::Contact,
        Screen::Project,
        Screen::Expertise,
        Screen::Rates,
    ];

    /// Topic name used by `data-topic` shortcuts.
    pub fn topic(&self) -> &'static str {
        match self {
            Self::Main => "main",
            Self::About => "about",
            Self::Contact => "contact",
            Self::Project => "project",
            Self::Expertise => "expertise",
            Self::Rates => "rates",
        }
    }

    /// Id of the screen's container element.
    pub fn element_id(&self) -> &'static str {
        match self {
            Self::Main => "mainScreen",
            Self::About => "aboutScreen",
            Self::Contact => "contactScreen",
            Self::Project => "projectScreen",
            Self::Expertise => "expertiseScreen",
            Self::Rates => "ratesScreen",
        }
    }

    pub fn from_topic(topic: &str) -> Option<Self> {
        let topic = topic.trim();
        Self::ALL
            .into_iter()
            .find(|s| s.topic().eq_ignore_ascii_case(topic))
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.topic())
    }
}

/// Widget state machine position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum WidgetState {
    #[default]
    Closed,
    Open(Screen),
}

impl WidgetState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn screen(&self) -> Option<Screen> {
        match self {
            Self::Open(screen) => Some(*screen),
            Self::Closed => None,
        }
    }
}

impl fmt::Display for WidgetState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Closed => f.write_str("closed"),
            Self::Open(screen) => write!(f, "open:{}Screen", screen.topic()),
        }
    }
}

/// Ephemeral per-open session. Never persisted.
#[derive(Debug, Clone)]
pub struct ConversationSession {
    id: Uuid,
    messages: Vec<ChatMessage>,
    greeting_len: usize,
    awaiting: bool,
}

impl ConversationSession {
    /// Start a session whose history begins with `greeting`, if any.
    pub fn new(greeting: Option<String>) -> Self {
        let messages: Vec<ChatMessage> = greeting.into_iter().map(ChatMessage::assistant).collect();
        Self {
            id: Uuid::new_v4(),
            greeting_len: messages.len(),
            messages,
            awaiting: false,
        }
    }

    /// Identifies this session; replies addressed to an older id are stale.
    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Messages exchanged after the greeting.
    pub fn exchanged(&self) -> &[ChatMessage] {
        &self.messages[self.greeting_len..]
    }

    pub fn is_awaiting(&self) -> bool {
        self.awaiting
    }

    pub fn set_awaiting(&mut self, awaiting: bool) {
        self.awaiting = awaiting;
    }

    pub fn push(&mut self, message: ChatMessage) {
        self.messages.push(message);
    }

    pub fn last_user_message(&self) -> Option<&str> {
        self.messages
            .iter()
            .rev()
            .find(|m| m.author == Author::User)
            .map(|m| m.text.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_screen_topics() {
        assert_eq!(Screen::from_topic("Rates"), Some(Screen::Rates));
        assert_eq!(Screen::from_topic("pricing"), None);
        assert_eq!(Screen::About.element_id(), "aboutScreen");
        assert_eq!(WidgetState::Open(Screen::Expertise).to_string(), "open:expertiseScreen");
    }

    #[test]
    fn test_session_history() {
        let mut session = ConversationSession::new(Some("Hey!".into()));
        assert!(session.exchanged().is_empty());
        session.push(ChatMessage::user("tarief?"));
        session.push(ChatMessage::assistant("€95"));
        session.push(ChatMessage::user("en workshops?"));
        assert_eq!(session.messages().len(), 4);
        assert_eq!(session.exchanged().len(), 3);
        assert_eq!(session.last_user_message(), Some("en workshops?"));
    }

    #[test]
    fn test_new_sessions_have_distinct_ids() {
        assert_ne!(ConversationSession::new(None).id(), ConversationSession::new(None).id());
    }
}
