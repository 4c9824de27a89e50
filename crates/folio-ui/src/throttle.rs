//! Rate limiting for high-frequency page events.

use std::time::{Duration, Instant};

/// Lets an event through at most once per window.
#[derive(Debug, Clone)]
pub struct Throttle {
    window: Duration,
    last: Option<Instant>,
}

impl Throttle {
    pub fn new(window: Duration) -> Self {
        Self { window, last: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    pub fn ready(&mut self) -> bool {
        self.ready_at(Instant::now())
    }

    pub fn ready_at(&mut self, now: Instant) -> bool {
        match self.last {
            Some(last) if now.saturating_duration_since(last) < self.window => false,
            _ => {
                self.last = Some(now);
                true
            }
        }
    }
}

/// Fires once the events stop for a full window.
#[derive(Debug, Clone)]
pub struct Debounce {
    window: Duration,
    deadline: Option<Instant>,
}

impl Debounce {
    pub fn new(window: Duration) -> Self {
        Self { window, deadline: None }
    }

    pub fn from_millis(ms: u64) -> Self {
        Self::new(Duration::from_millis(ms))
    }

    /// Record an event, pushing the deadline out.
    pub fn touch_at(&mut self, now: Instant) {
        self.deadline = Some(now + self.window);
    }

    pub fn touch(&mut self) {
        self.touch_at(Instant::now());
    }

    pub fn is_pending(&self) -> bool {
        self.deadline.is_some()
    }

    /// True exactly once per burst, when its deadline has passed.
    pub fn fire_at(&mut self, now: Instant) -> bool {
        match self.deadline {
            Some(deadline) if now >= deadline => {
                self.deadline = None;
                true
            }
            _ => false,
        }
    }

    pub fn fire(&mut self) -> bool {
        self.fire_at(Instant::now())
    }
}
