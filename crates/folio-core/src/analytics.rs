//! Named interaction events and the sinks that receive them.

use std::sync::{Arc, Mutex};
use tracing::info;

use crate::{message::truncate_label, traits::Analytics};

/// Maximum label length derived from user text.
pub const MAX_LABEL_CHARS: usize = 50;

/// A named event with a category/label payload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalyticsEvent {
    pub name: String,
    pub category: String,
    pub label: String,
}

impl AnalyticsEvent {
    pub fn new(name: &str, category: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            category: category.to_string(),
            label: truncate_label(label, MAX_LABEL_CHARS),
        }
    }
}

/// Emit `event` if a sink is present.
pub fn emit(sink: &Option<Arc<dyn Analytics>>, event: AnalyticsEvent) {
    if let Some(sink) = sink {
        sink.track(&event);
    }
}

/// Sink that writes events to the log.
#[derive(Debug, Default)]
pub struct TracingAnalytics;

impl Analytics for TracingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        info!(
            event = %event.name,
            category = %event.category,
            label = %event.label,
            "analytics event"
        );
    }
}

/// Sink that keeps every event in memory.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<AnalyticsEvent>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<AnalyticsEvent> {
        self.events
            .lock()
            .map(|events| events.clone())
            .unwrap_or_default()
    }

    pub fn names(&self) -> Vec<String> {
        self.events().into_iter().map(|e| e.name).collect()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &AnalyticsEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}
