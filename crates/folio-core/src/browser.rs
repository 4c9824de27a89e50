//! In-memory browser surface.

use crate::{location::Location, traits::Navigator};

/// A navigation call recorded by [`MemoryNavigator`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NavigationEvent {
    ReplaceState(String),
    Assign(String),
    OpenNewContext(String),
}

/// Navigator that tracks the location and records every call.
#[derive(Debug, Clone, Default)]
pub struct MemoryNavigator {
    location: Location,
    locale: Option<String>,
    events: Vec<NavigationEvent>,
}

impl MemoryNavigator {
    pub fn new(url: &str) -> Self {
        Self {
            location: Location::parse(url),
            locale: None,
            events: Vec::new(),
        }
    }

    pub fn with_locale(mut self, locale: &str) -> Self {
        self.locale = Some(locale.to_string());
        self
    }

    pub fn events(&self) -> &[NavigationEvent] {
        &self.events
    }

    /// URLs opened through [`Navigator::assign`].
    pub fn navigations(&self) -> Vec<&str> {
        self.events
            .iter()
            .filter_map(|e| match e {
                NavigationEvent::Assign(url) => Some(url.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn last_event(&self) -> Option<&NavigationEvent> {
        self.events.last()
    }
}

impl Navigator for MemoryNavigator {
    fn location(&self) -> Location {
        self.location.clone()
    }

    fn preferred_locale(&self) -> Option<String> {
        self.locale.clone()
    }

    fn replace_state(&mut self, url: &str) {
        self.location = Location::parse(url);
        self.events.push(NavigationEvent::ReplaceState(url.to_string()));
    }

    fn assign(&mut self, url: &str) {
        // External schemes (mailto:) hand off without changing the page.
        if url.starts_with('/') || url.contains("://") {
            self.location = Location::parse(url);
        }
        self.events.push(NavigationEvent::Assign(url.to_string()));
    }

    fn open_new_context(&mut self, url: &str) {
        self.events.push(NavigationEvent::OpenNewContext(url.to_string()));
    }
}
