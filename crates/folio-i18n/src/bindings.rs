//! Page elements the language manager touches, resolved once.

use folio_core::dom::{Document, ElementId};

/// In-page anchors for the mobile nav links, by element id.
pub const NAV_ANCHORS: [(&str, &str); 4] = [
    ("navHome", "#home"),
    ("navProjects", "#projects"),
    ("navAbout", "#about"),
    ("navContact", "#contact"),
];

/// Handles to the language widgets and language-dependent links.
///
/// Every handle is optional: page variants carry different subsets.
#[derive(Debug, Clone, Default)]
pub struct LanguageBindings {
    pub current_label: Option<ElementId>,
    pub toggle: Option<ElementId>,
    pub dropdown: Option<ElementId>,
    pub options: Vec<ElementId>,
    pub footer_buttons: Vec<ElementId>,
    pub sticker_link: Option<ElementId>,
    pub nav_links: Vec<(ElementId, &'static str)>,
    pub back_link: Option<ElementId>,
}

impl LanguageBindings {
    pub fn resolve(doc: &Document) -> Self {
        let dropdown = doc.get_element_by_id("languageDropdown");
        let options = dropdown
            .map(|d| doc.select_by_class_within(d, "lang-option"))
            .unwrap_or_default();

        Self {
            current_label: doc.select_by_class("lang-current").into_iter().next(),
            toggle: doc.get_element_by_id("languageToggle"),
            dropdown,
            options,
            footer_buttons: doc.select_by_class("footer-lang-btn"),
            sticker_link: doc.get_element_by_id("portfolioStickerLink"),
            nav_links: NAV_ANCHORS
                .iter()
                .filter_map(|(id, anchor)| doc.get_element_by_id(id).map(|el| (el, *anchor)))
                .collect(),
            back_link: doc.select_by_class("back-link").into_iter().next(),
        }
    }

    /// Header option or footer button carrying `data-lang`.
    pub fn is_language_control(&self, id: ElementId) -> bool {
        self.options.contains(&id) || self.footer_buttons.contains(&id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::dom::ElementBuilder;

    #[test]
    fn test_resolve_partial_page() {
        let mut doc = Document::new();
        let body = doc.body();
        let footer = ElementBuilder::new(&mut doc, "footer").append_to(body);
        let nl = ElementBuilder::new(&mut doc, "button")
            .class("footer-lang-btn")
            .attr("data-lang", "nl")
            .append_to(footer);
        ElementBuilder::new(&mut doc, "a").id("navAbout").append_to(body);

        let bindings = LanguageBindings::resolve(&doc);
        assert!(bindings.dropdown.is_none());
        assert!(bindings.current_label.is_none());
        assert_eq!(bindings.footer_buttons, vec![nl]);
        assert_eq!(bindings.nav_links.len(), 1);
        assert_eq!(bindings.nav_links[0].1, "#about");
        assert!(bindings.is_language_control(nl));
    }

    #[test]
    fn test_options_scoped_to_dropdown() {
        let mut doc = Document::new();
        let body = doc.body();
        // A stray option outside the dropdown is not a header option.
        ElementBuilder::new(&mut doc, "button").class("lang-option").append_to(body);
        let dropdown = ElementBuilder::new(&mut doc, "div").id("languageDropdown").append_to(body);
        let en = ElementBuilder::new(&mut doc, "button")
            .class("lang-option")
            .attr("data-lang", "en")
            .append_to(dropdown);

        let bindings = LanguageBindings::resolve(&doc);
        assert_eq!(bindings.options, vec![en]);
    }
}
