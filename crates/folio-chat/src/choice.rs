//! The contact choice surface: holds the pending outbound message until the
//! visitor picks WhatsApp or email, or dismisses it.

use folio_channels::{ChannelCopy, ChannelKind, ContactHandoff};
use folio_core::{
    analytics::{emit, AnalyticsEvent},
    dom::{Document, ElementId},
    error::FolioError,
    message::PendingOutboundMessage,
    traits::{Analytics, Navigator},
};
use std::sync::Arc;
use tracing::{debug, info};

use crate::bindings::ChoiceBindings;

pub struct ContactChoice {
    bindings: ChoiceBindings,
    pending: Option<PendingOutboundMessage>,
    analytics: Option<Arc<dyn Analytics>>,
}

impl ContactChoice {
    pub fn new(doc: &Document) -> Self {
        Self {
            bindings: ChoiceBindings::resolve(doc),
            pending: None,
            analytics: None,
        }
    }

    pub fn with_analytics(mut self, analytics: Option<Arc<dyn Analytics>>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn bindings(&self) -> &ChoiceBindings {
        &self.bindings
    }

    pub fn pending(&self) -> Option<&PendingOutboundMessage> {
        self.pending.as_ref()
    }

    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Show the modal with `message` as the pending outbound message.
    pub fn open(&mut self, doc: &mut Document, message: PendingOutboundMessage) -> bool {
        let Some(modal) = self.bindings.modal else {
            debug!("no contact choice modal on this page");
            return false;
        };

        if let Some(preview) = self.bindings.preview {
            if message.is_empty() {
                doc.set_displayed(preview, false, "block");
            } else {
                doc.set_text(preview, &format!("\"{}\"", message.as_str()));
                doc.set_displayed(preview, true, "block");
            }
        }
        doc.add_class(modal, "active");
        let body = doc.body();
        doc.set_style(body, "overflow", "hidden");

        emit(
            &self.analytics,
            AnalyticsEvent::new("contact_choice_modal_open", "Engagement", message.as_str()),
        );
        self.pending = Some(message);
        true
    }

    /// Dismiss the modal and drop the pending message.
    pub fn close(&mut self, doc: &mut Document) -> bool {
        let was_open = self.pending.take().is_some();
        if let Some(modal) = self.bindings.modal {
            doc.remove_class(modal, "active");
        }
        if was_open {
            let body = doc.body();
            doc.set_style(body, "overflow", "");
        }
        was_open
    }

    /// Hand the pending message off through `kind`, then close.
    ///
    /// Returns the URI opened, or `None` when nothing was pending. A failed
    /// hand-off leaves the surface open.
    pub fn choose(
        &mut self,
        doc: &mut Document,
        kind: ChannelKind,
        handoff: &ContactHandoff,
        copy: &ChannelCopy,
        nav: &mut dyn Navigator,
    ) -> Result<Option<String>, FolioError> {
        let Some(message) = self.pending.clone() else {
            return Ok(None);
        };

        let uri = handoff.dispatch(kind, &message, copy, nav)?;
        info!("Contact handed off via {kind}");
        emit(
            &self.analytics,
            AnalyticsEvent::new(kind.event_name(), "Conversion", message.as_str()),
        );
        self.close(doc);
        Ok(Some(uri))
    }

    /// Hero form submit: a non-blank input opens the surface and is cleared.
    pub fn submit_hero(&mut self, doc: &mut Document) -> bool {
        let Some(input) = self.bindings.hero_input else {
            return false;
        };
        let message = doc.value(input).trim().to_string();
        if message.is_empty() {
            return false;
        }
        let opened = self.open(doc, PendingOutboundMessage::new(message));
        if opened {
            doc.set_value(input, "");
        }
        opened
    }

    /// Suggestion pill click.
    pub fn click_pill(&mut self, doc: &mut Document, pill: ElementId) -> bool {
        match doc.attr(pill, "data-message").map(str::to_string) {
            Some(message) if !message.trim().is_empty() => {
                self.open(doc, PendingOutboundMessage::new(message))
            }
            _ => false,
        }
    }

    pub fn handle_escape(&mut self, doc: &mut Document) -> bool {
        self.is_open() && self.close(doc)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use folio_core::{
        analytics::RecordingAnalytics,
        browser::{MemoryNavigator, NavigationEvent},
        config::ContactConfig,
        dom::ElementBuilder,
    };

    struct Fixture {
        doc: Document,
        modal: ElementId,
        preview: ElementId,
        hero_input: ElementId,
        pill: ElementId,
    }

    fn fixture() -> Fixture {
        let mut doc = Document::new();
        let body = doc.body();
        let hero = ElementBuilder::new(&mut doc, "form").id("heroConversationForm").append_to(body);
        let hero_input = ElementBuilder::new(&mut doc, "input").id("heroInput").append_to(hero);
        let pill = ElementBuilder::new(&mut doc, "button")
            .class("suggestion-pill")
            .attr("data-message", "Snellere groei")
            .append_to(hero);
        let modal = ElementBuilder::new(&mut doc, "div").id("contactChoiceModal").append_to(body);
        ElementBuilder::new(&mut doc, "div").class("modal-backdrop").append_to(modal);
        let preview = ElementBuilder::new(&mut doc, "p")
            .class("user-message-preview")
            .style("display", "none")
            .append_to(modal);
        ElementBuilder::new(&mut doc, "button").id("chooseWhatsApp").append_to(modal);
        ElementBuilder::new(&mut doc, "button").id("chooseEmail").append_to(modal);
        ElementBuilder::new(&mut doc, "button").id("modalClose").append_to(modal);
        Fixture {
            doc,
            modal,
            preview,
            hero_input,
            pill,
        }
    }

    fn copy() -> ChannelCopy {
        ChannelCopy::from_lookup("Nathalja", |_| None)
    }

    #[test]
    fn test_hero_submit_opens_with_preview() {
        let mut f = fixture();
        let mut choice = ContactChoice::new(&f.doc);
        f.doc.set_value(f.hero_input, "  Ik heb een idee  ");

        assert!(choice.submit_hero(&mut f.doc));
        assert!(f.doc.has_class(f.modal, "active"));
        assert_eq!(f.doc.text_content(f.preview), "\"Ik heb een idee\"");
        assert!(f.doc.is_displayed(f.preview));
        assert_eq!(f.doc.value(f.hero_input), "");
        assert_eq!(choice.pending().unwrap().as_str(), "Ik heb een idee");
        assert_eq!(f.doc.style(f.doc.body(), "overflow"), Some("hidden"));
    }

    #[test]
    fn test_blank_hero_input_ignored() {
        let mut f = fixture();
        let mut choice = ContactChoice::new(&f.doc);
        f.doc.set_value(f.hero_input, "   ");
        assert!(!choice.submit_hero(&mut f.doc));
        assert!(!choice.is_open());
    }

    #[test]
    fn test_choose_whatsapp_dispatches_and_clears() {
        let mut f = fixture();
        let analytics = Arc::new(RecordingAnalytics::default());
        let sink: Option<Arc<dyn Analytics>> = Some(analytics.clone());
        let mut choice = ContactChoice::new(&f.doc).with_analytics(sink);
        let handoff = ContactHandoff::from_config(&ContactConfig::default());
        let mut nav = MemoryNavigator::new("/nl");

        assert!(choice.click_pill(&mut f.doc, f.pill));
        let uri = choice
            .choose(&mut f.doc, ChannelKind::WhatsApp, &handoff, &copy(), &mut nav)
            .unwrap()
            .unwrap();

        assert_eq!(uri, "https://wa.me/31657591440?text=Hi%20Nathalja%21%20Snellere%20groei");
        assert_eq!(nav.last_event(), Some(&NavigationEvent::OpenNewContext(uri)));
        assert!(!choice.is_open());
        assert!(!f.doc.has_class(f.modal, "active"));
        assert_eq!(f.doc.style(f.doc.body(), "overflow"), None);
        assert_eq!(
            analytics.names(),
            vec!["contact_choice_modal_open", "contact_choice_whatsapp"]
        );
        assert_eq!(analytics.events()[1].label, "Snellere groei");
    }

    #[test]
    fn test_choose_without_pending_is_noop() {
        let mut f = fixture();
        let mut choice = ContactChoice::new(&f.doc);
        let handoff = ContactHandoff::from_config(&ContactConfig::default());
        let mut nav = MemoryNavigator::new("/nl");

        let result = choice
            .choose(&mut f.doc, ChannelKind::Email, &handoff, &copy(), &mut nav)
            .unwrap();
        assert_eq!(result, None);
        assert!(nav.events().is_empty());
    }

    #[test]
    fn test_failed_handoff_keeps_surface_open() {
        let mut f = fixture();
        let mut choice = ContactChoice::new(&f.doc);
        let config = ContactConfig {
            email: String::new(),
            ..Default::default()
        };
        let handoff = ContactHandoff::from_config(&config);
        let mut nav = MemoryNavigator::new("/nl");

        choice.open(&mut f.doc, PendingOutboundMessage::new("Hoi"));
        assert!(choice
            .choose(&mut f.doc, ChannelKind::Email, &handoff, &copy(), &mut nav)
            .is_err());
        assert!(choice.is_open());
    }

    #[test]
    fn test_escape_dismisses_and_clears() {
        let mut f = fixture();
        let mut choice = ContactChoice::new(&f.doc);
        choice.open(&mut f.doc, PendingOutboundMessage::new("Hoi"));

        assert!(choice.handle_escape(&mut f.doc));
        assert!(choice.pending().is_none());
        assert!(!choice.handle_escape(&mut f.doc));
    }

    #[test]
    fn test_empty_message_hides_preview() {
        let mut f = fixture();
        let mut choice = ContactChoice::new(&f.doc);
        choice.open(&mut f.doc, PendingOutboundMessage::new(""));
        assert!(choice.is_open());
        assert!(!f.doc.is_displayed(f.preview));
    }

    #[test]
    fn test_missing_modal_degrades() {
        let mut doc = Document::new();
        let mut choice = ContactChoice::new(&doc);
        assert!(!choice.open(&mut doc, PendingOutboundMessage::new("Hoi")));
        assert!(!choice.is_open());
    }
}
