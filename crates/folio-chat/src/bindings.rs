//! Page elements used by the conversation widget and the contact choice
//! surface, resolved once.

use folio_core::dom::{Document, ElementId};

use crate::session::Screen;

#[derive(Debug, Clone, Default)]
pub struct ChatBindings {
    pub dialogue: Option<ElementId>,
    pub trigger: Option<ElementId>,
    pub close: Option<ElementId>,
    pub conversation: Option<ElementId>,
    pub input: Option<ElementId>,
    pub send: Option<ElementId>,
    pub typing: Option<ElementId>,
    pub suggestions: Option<ElementId>,
    /// `.suggestion-chip[data-message]` inside the dialogue.
    pub chips: Vec<ElementId>,
    /// `[data-topic]` shortcuts.
    pub topics: Vec<ElementId>,
    pub screens: Vec<(Screen, ElementId)>,
    /// `[data-action="back"]` buttons on sub-screens.
    pub back_buttons: Vec<ElementId>,
    /// `[data-action="contact"]` calls to action on sub-screens.
    pub contact_buttons: Vec<ElementId>,
    pub inquiry: InquiryBindings,
}

impl ChatBindings {
    pub fn resolve(doc: &Document) -> Self {
        let dialogue = doc.get_element_by_id("conversationDialogue");
        let scoped = |class: &str| {
            dialogue
                .map(|d| doc.select_by_class_within(d, class))
                .unwrap_or_default()
        };

        Self {
            dialogue,
            trigger: doc.get_element_by_id("conversationTrigger"),
            close: doc.get_element_by_id("closeDialogue"),
            conversation: doc.get_element_by_id("chatConversation"),
            input: doc.get_element_by_id("chatInput"),
            send: doc.get_element_by_id("sendButton"),
            typing: doc.get_element_by_id("typingIndicator"),
            suggestions: doc.get_element_by_id("quickSuggestions"),
            chips: scoped("suggestion-chip"),
            topics: doc.select_by_attr("data-topic"),
            screens: Screen::ALL
                .into_iter()
                .filter_map(|s| doc.get_element_by_id(s.element_id()).map(|el| (s, el)))
                .collect(),
            back_buttons: doc.select_by_attr_value("data-action", "back"),
            contact_buttons: doc.select_by_attr_value("data-action", "contact"),
            inquiry: InquiryBindings::resolve(doc),
        }
    }

    pub fn screen(&self, screen: Screen) -> Option<ElementId> {
        self.screens
            .iter()
            .find(|(s, _)| *s == screen)
            .map(|(_, el)| *el)
    }
}

/// The project inquiry form on the project screen.
#[derive(Debug, Clone, Default)]
pub struct InquiryBindings {
    pub form: Option<ElementId>,
    pub name: Option<ElementId>,
    pub email: Option<ElementId>,
    pub project_type: Option<ElementId>,
    pub description: Option<ElementId>,
    pub status: Option<ElementId>,
}

impl InquiryBindings {
    pub fn resolve(doc: &Document) -> Self {
        Self {
            form: doc.get_element_by_id("projectForm"),
            name: doc.get_element_by_id("projectName"),
            email: doc.get_element_by_id("projectEmail"),
            project_type: doc.get_element_by_id("projectType"),
            description: doc.get_element_by_id("projectDescription"),
            status: doc.get_element_by_id("projectFormStatus"),
        }
    }
}

/// The "how shall we talk" modal and the surfaces that open it.
#[derive(Debug, Clone, Default)]
pub struct ChoiceBindings {
    pub modal: Option<ElementId>,
    pub preview: Option<ElementId>,
    pub whatsapp: Option<ElementId>,
    pub email: Option<ElementId>,
    pub close: Option<ElementId>,
    pub backdrop: Option<ElementId>,
    pub hero_form: Option<ElementId>,
    pub hero_input: Option<ElementId>,
    /// `.suggestion-pill[data-message]` in the hero.
    pub pills: Vec<ElementId>,
}

impl ChoiceBindings {
    pub fn resolve(doc: &Document) -> Self {
        let modal = doc.get_element_by_id("contactChoiceModal");
        let within = |class: &str| {
            modal
                .and_then(|m| doc.select_by_class_within(m, class).into_iter().next())
        };

        Self {
            modal,
            preview: within("user-message-preview"),
            whatsapp: doc.get_element_by_id("chooseWhatsApp"),
            email: doc.get_element_by_id("chooseEmail"),
            close: doc.get_element_by_id("modalClose"),
            backdrop: within("modal-backdrop"),
            hero_form: doc.get_element_by_id("heroConversationForm"),
            hero_input: doc.get_element_by_id("heroInput"),
            pills: doc
                .select_by_class("suggestion-pill")
                .into_iter()
                .filter(|&p| doc.attr(p, "data-message").is_some())
                .collect(),
        }
    }
}
