//! Scroll-driven reveal and header state.
//!
//! Elements carry their layout position in `data-offset-top` (pixels from
//! the top of the page); the page model has no layout of its own.

use folio_core::{
    config::UiConfig,
    dom::{Document, ElementId},
};

use crate::throttle::{Debounce, Throttle};
use std::time::Instant;

pub const REVEAL_CLASS: &str = "fade-in";
pub const SCROLLED_CLASS: &str = "scrolled";

#[derive(Debug, Clone)]
pub struct ScrollReveal {
    header: Option<ElementId>,
    targets: Vec<ElementId>,
    threshold: f64,
    throttle: Throttle,
    resize: Debounce,
    pending_height: Option<f64>,
}

impl ScrollReveal {
    pub fn resolve(doc: &Document, config: &UiConfig) -> Self {
        let header = doc
            .select_by_class("header")
            .into_iter()
            .next()
            .or_else(|| doc.first_by_tag_within(doc.root(), "header"));
        let mut targets = doc.select_by_class("project-card");
        targets.extend(doc.select_by_class("stat-card"));
        Self {
            header,
            targets,
            threshold: f64::from(config.scroll_threshold_px),
            throttle: Throttle::from_millis(config.scroll_throttle_ms),
            resize: Debounce::from_millis(config.resize_debounce_ms),
            pending_height: None,
        }
    }

    /// A scroll event. Throttled; returns how many elements were revealed,
    /// or `None` when the event was dropped.
    pub fn on_scroll_at(&mut self, doc: &mut Document, scroll_y: f64, viewport: f64, now: Instant) -> Option<usize> {
        if !self.throttle.ready_at(now) {
            return None;
        }
        Some(self.update(doc, scroll_y, viewport))
    }

    pub fn on_scroll(&mut self, doc: &mut Document, scroll_y: f64, viewport: f64) -> Option<usize> {
        self.on_scroll_at(doc, scroll_y, viewport, Instant::now())
    }

    /// Unthrottled update.
    pub fn update(&self, doc: &mut Document, scroll_y: f64, viewport: f64) -> usize {
        if let Some(header) = self.header {
            doc.set_class(header, SCROLLED_CLASS, scroll_y > self.threshold);
        }

        let bottom = scroll_y + viewport;
        let mut revealed = 0;
        for &el in &self.targets {
            if doc.has_class(el, REVEAL_CLASS) {
                continue;
            }
            let Some(top) = doc.attr(el, "data-offset-top").and_then(|v| v.trim().parse::<f64>().ok()) else {
                continue;
            };
            if top >= scroll_y && top < bottom {
                doc.add_class(el, REVEAL_CLASS);
                revealed += 1;
            }
        }
        revealed
    }

    /// A resize event; the viewport unit is applied once resizing settles.
    pub fn on_resize_at(&mut self, height: f64, now: Instant) {
        self.pending_height = Some(height);
        self.resize.touch_at(now);
    }

    pub fn on_resize(&mut self, height: f64) {
        self.on_resize_at(height, Instant::now());
    }

    /// Apply a settled resize: `--vh` on the root is one percent of the
    /// viewport height. Returns whether anything was applied.
    pub fn flush_resize_at(&mut self, doc: &mut Document, now: Instant) -> bool {
        if !self.resize.fire_at(now) {
            return false;
        }
        match self.pending_height.take() {
            Some(height) => {
                let root = doc.root();
                doc.set_style(root, "--vh", &format!("{}px", height / 100.0));
                true
            }
            None => false,
        }
    }

    pub fn flush_resize(&mut self, doc: &mut Document) -> bool {
        self.flush_resize_at(doc, Instant::now())
    }
}
