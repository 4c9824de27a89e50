//! Project filtering by category.

use folio_core::dom::{Document, ElementId};
use tracing::debug;

/// Filter value that shows every card.
pub const FILTER_ALL: &str = "all";

/// `.filter-btn[data-filter]` buttons over `.project-card[data-category]`.
#[derive(Debug, Clone, Default)]
pub struct ProjectFilter {
    buttons: Vec<ElementId>,
    cards: Vec<ElementId>,
}

impl ProjectFilter {
    pub fn resolve(doc: &Document) -> Self {
        Self {
            buttons: doc
                .select_by_class("filter-btn")
                .into_iter()
                .filter(|&b| doc.attr(b, "data-filter").is_some())
                .collect(),
            cards: doc.select_by_class("project-card"),
        }
    }

    pub fn buttons(&self) -> &[ElementId] {
        &self.buttons
    }

    pub fn cards(&self) -> &[ElementId] {
        &self.cards
    }

    pub fn is_button(&self, id: ElementId) -> bool {
        self.buttons.contains(&id)
    }

    /// Apply the filter carried by `button`. Returns the number of cards
    /// left visible, or `None` when `button` is not a filter button.
    pub fn click(&self, doc: &mut Document, button: ElementId) -> Option<usize> {
        if !self.is_button(button) {
            return None;
        }
        let filter = doc.attr(button, "data-filter")?.to_string();
        Some(self.apply(doc, &filter))
    }

    /// Enter and Space act like a click.
    pub fn key(&self, doc: &mut Document, button: ElementId, key: &str) -> Option<usize> {
        match key {
            "Enter" | " " => self.click(doc, button),
            _ => None,
        }
    }

    /// Show the cards matching `filter` and mark its button active.
    pub fn apply(&self, doc: &mut Document, filter: &str) -> usize {
        self.mark_active(doc, filter);
        let mut shown = 0;
        for &card in &self.cards {
            let matches = filter == FILTER_ALL || doc.attr(card, "data-category") == Some(filter);
            doc.set_displayed(card, matches, "block");
            doc.set_style(card, "opacity", if matches { "1" } else { "0" });
            if matches {
                shown += 1;
            }
        }
        debug!("filter {filter}: {shown} of {} cards shown", self.cards.len());
        shown
    }

    /// Only the button for `filter` carries `active`; cards are untouched.
    pub fn mark_active(&self, doc: &mut Document, filter: &str) {
        for &button in &self.buttons {
            let on = doc.attr(button, "data-filter") == Some(filter);
            doc.set_class(button, "active", on);
        }
    }

    pub fn active(&self, doc: &Document) -> Option<String> {
        self.buttons
            .iter()
            .find(|&&b| doc.has_class(b, "active"))
            .and_then(|&b| doc.attr(b, "data-filter"))
            .map(str::to_string)
    }
}
