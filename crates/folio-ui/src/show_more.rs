//! "Show more projects" toggle.

use folio_core::dom::{Document, ElementId};

use crate::filter::{ProjectFilter, FILTER_ALL};

pub const HIDDEN_CLASS: &str = "hidden-project";

/// `#showMoreProjects` over the cards that start out `.hidden-project`.
#[derive(Debug, Clone, Default)]
pub struct ShowMore {
    button: Option<ElementId>,
    /// The `<span>` holding the label, else the button itself.
    label: Option<ElementId>,
    collapsed_cards: Vec<ElementId>,
    expanded: bool,
}

impl ShowMore {
    pub fn resolve(doc: &Document) -> Self {
        let button = doc.get_element_by_id("showMoreProjects");
        let label = button.map(|b| doc.first_by_tag_within(b, "span").unwrap_or(b));
        Self {
            button,
            label,
            collapsed_cards: doc.select_by_class(HIDDEN_CLASS),
            expanded: false,
        }
    }

    pub fn button(&self) -> Option<ElementId> {
        self.button
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    /// Cards without `.hidden-project` are shown from the start.
    pub fn init(&self, doc: &mut Document, filter: &ProjectFilter) {
        for &card in filter.cards() {
            if !doc.has_class(card, HIDDEN_CLASS) {
                doc.set_displayed(card, true, "block");
                doc.set_style(card, "opacity", "1");
            }
        }
        if let Some(button) = self.button {
            doc.set_attr(button, "aria-expanded", "false");
        }
    }

    /// Flip between all projects and the initial selection. `copy` looks up
    /// the label text for the current language. Returns the new state, or
    /// `None` without a button.
    pub fn toggle<'a>(
        &mut self,
        doc: &mut Document,
        filter: &ProjectFilter,
        copy: impl Fn(&str) -> Option<&'a str>,
    ) -> Option<bool> {
        let button = self.button?;
        self.expanded = !self.expanded;

        if self.expanded {
            for &card in filter.cards() {
                doc.remove_class(card, HIDDEN_CLASS);
                doc.set_displayed(card, true, "block");
                doc.set_style(card, "opacity", "1");
            }
            filter.mark_active(doc, FILTER_ALL);
        } else {
            for &card in &self.collapsed_cards {
                doc.add_class(card, HIDDEN_CLASS);
                doc.set_style(card, "opacity", "0");
                doc.set_displayed(card, false, "block");
            }
        }

        let key = if self.expanded { "showLessBtn" } else { "showMoreBtn" };
        if let Some(label) = self.label {
            // Keep a later re-translation in step with the state.
            if doc.attr(label, "data-translate").is_some() {
                doc.set_attr(label, "data-translate", key);
            }
            if let Some(text) = copy(key) {
                doc.set_text(label, text);
            }
        }
        let expanded = if self.expanded { "true" } else { "false" };
        doc.set_attr(button, "aria-expanded", expanded);
        Some(self.expanded)
    }
}
