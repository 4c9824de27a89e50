//! The conversation widget state machine.
//!
//! `closed → open:main → open:<topic> → open:main → closed`. Closing from
//! any screen cancels a pending reply and resets the session so the next
//! open starts from the greeting. Replies arrive through the channel
//! returned by [`ConversationWidget::new`] and are handed back with
//! [`ConversationWidget::deliver`].


use folio_channels::ContactHandoff;
use folio_core::{
    analytics::{emit, AnalyticsEvent},
    dom::{Document, ElementBuilder, ElementId},
    error::FolioError,
    language::LanguageCode,
    message::{Author, ChatMessage, PendingOutboundMessage},
    traits::{Analytics, Navigator},
};
use folio_i18n::TranslationTable;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info};

use crate::{
    bindings::ChatBindings,
    inquiry::{InquiryError, ProjectInquiry},
    rules::ResponseEngine,
    session::{ConversationSession, Screen, WidgetState},
    typing::{PendingReply, ReplyDelay, TypingTimer},
};

pub const BACKDROP_ID: &str = "dialogueBackdrop";

/// Why a submission did not go through.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IgnoreReason {
    Closed,
    NotOnMainScreen,
    AwaitingReply,
    Blank,
    NoInput,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    Sent,
    Ignored(IgnoreReason),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InquiryOutcome {
    /// Not on the project screen.
    Ignored,
    Invalid(InquiryError),
    /// Handed off by email; carries the `mailto:` URI.
    Sent(String),
}

pub struct ConversationWidget {
    bindings: ChatBindings,
    engine: Arc<ResponseEngine>,
    table: Arc<TranslationTable>,
    delay: ReplyDelay,
    state: WidgetState,
    session: ConversationSession,
    timer: TypingTimer,
    replies: UnboundedSender<PendingReply>,
    backdrop: Option<ElementId>,
    greeting_nodes: usize,
    analytics: Option<Arc<dyn Analytics>>,
}

impl ConversationWidget {
    /// Bind to `doc`. Scheduled replies come out of the returned receiver.
    pub fn new(
        doc: &Document,
        engine: Arc<ResponseEngine>,
        table: Arc<TranslationTable>,
        delay: ReplyDelay,
    ) -> (Self, UnboundedReceiver<PendingReply>) {
        let bindings = ChatBindings::resolve(doc);
        let greeting_nodes = bindings
            .conversation
            .map(|c| doc.select_by_class_within(c, "chat-message").len())
            .unwrap_or(0);
        let (replies, rx) = mpsc::unbounded_channel();

        let widget = Self {
            session: ConversationSession::new(greeting_text(doc, &bindings)),
            bindings,
            engine,
            table,
            delay,
            state: WidgetState::Closed,
            timer: TypingTimer::new(),
            replies,
            backdrop: None,
            greeting_nodes,
            analytics: None,
        };
        (widget, rx)
    }

    pub fn with_analytics(mut self, analytics: Option<Arc<dyn Analytics>>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn state(&self) -> WidgetState {
        self.state
    }

    pub fn session(&self) -> &ConversationSession {
        &self.session
    }

    pub fn bindings(&self) -> &ChatBindings {
        &self.bindings
    }

    pub fn is_open(&self) -> bool {
        self.state.is_open()
    }

    /// `closed → open:main`. A non-blank `seed` is put in the input and
    /// submitted right away.
    pub fn open(&mut self, doc: &mut Document, lang: LanguageCode, seed: Option<&str>) -> bool {
        if self.state.is_open() {
            return false;
        }
        let Some(dialogue) = self.bindings.dialogue else {
            debug!("no conversation dialogue on this page");
            return false;
        };

        let body = doc.body();
        let backdrop = ElementBuilder::new(doc, "div")
            .id(BACKDROP_ID)
            .class("dialogue-backdrop")
            .append_to(body);
        self.backdrop = Some(backdrop);
        doc.set_displayed(dialogue, true, "block");
        doc.set_style(body, "overflow", "hidden");

        self.state = WidgetState::Open(Screen::Main);
        self.session = ConversationSession::new(greeting_text(doc, &self.bindings));
        self.show_screen(doc, Screen::Main);
        info!("Conversation opened");
        emit(
            &self.analytics,
            AnalyticsEvent::new("conversation_open", "Engagement", seed.unwrap_or_default()),
        );

        if let Some(input) = self.bindings.input {
            if let Some(seed) = seed.filter(|s| !s.trim().is_empty()) {
                doc.set_value(input, seed);
                self.submit(doc, lang);
            }
            doc.focus(input);
        }
        self.update_send_button(doc);
        true
    }

    /// `open:main → open:<screen>`.
    pub fn select_topic(&mut self, doc: &mut Document, screen: Screen) -> bool {
        if self.state != WidgetState::Open(Screen::Main) || screen == Screen::Main {
            debug!("ignoring topic {screen} in state {}", self.state);
            return false;
        }
        if self.bindings.screen(screen).is_none() {
            debug!("no {} element on this page", screen.element_id());
            return false;
        }
        self.show_screen(doc, screen);
        self.state = WidgetState::Open(screen);
        true
    }

    /// `open:<screen> → open:main`.
    pub fn back(&mut self, doc: &mut Document) -> bool {
        match self.state {
            WidgetState::Open(screen) if screen != Screen::Main => {
                self.show_screen(doc, Screen::Main);
                self.state = WidgetState::Open(Screen::Main);
                true
            }
            _ => false,
        }
    }

    /// `open:* → closed`, discarding the session.
    pub fn close(&mut self, doc: &mut Document) -> bool {
        if !self.state.is_open() {
            return false;
        }
        if self.timer.cancel() {
            debug!("pending reply cancelled by close");
        }

        if let Some(dialogue) = self.bindings.dialogue {
            doc.set_displayed(dialogue, false, "block");
        }
        if let Some(backdrop) = self.backdrop.take() {
            doc.remove(backdrop);
        }
        let body = doc.body();
        doc.set_style(body, "overflow", "");

        self.state = WidgetState::Closed;
        self.reset(doc);
        info!("Conversation closed");
        true
    }

    /// Submit the chat input. Only on the main screen, and never while a
    /// reply is on its way.
    pub fn submit(&mut self, doc: &mut Document, lang: LanguageCode) -> SubmitOutcome {
        match self.state {
            WidgetState::Closed => return SubmitOutcome::Ignored(IgnoreReason::Closed),
            WidgetState::Open(Screen::Main) => {}
            WidgetState::Open(_) => return SubmitOutcome::Ignored(IgnoreReason::NotOnMainScreen),
        }
        if self.session.is_awaiting() {
            return SubmitOutcome::Ignored(IgnoreReason::AwaitingReply);
        }
        let Some(input) = self.bindings.input else {
            return SubmitOutcome::Ignored(IgnoreReason::NoInput);
        };
        let text = doc.value(input).trim().to_string();
        if text.is_empty() {
            return SubmitOutcome::Ignored(IgnoreReason::Blank);
        }

        self.append_message(doc, Author::User, &text);
        self.session.push(ChatMessage::user(text.as_str()));
        doc.set_value(input, "");
        if let Some(suggestions) = self.bindings.suggestions {
            doc.set_displayed(suggestions, false, "block");
        }
        self.session.set_awaiting(true);
        if let Some(typing) = self.bindings.typing {
            doc.set_displayed(typing, true, "flex");
        }
        self.update_send_button(doc);

        let delay = self.delay.sample(&mut rand::thread_rng());
        let reply = self.engine.reply(lang, &text);
        debug!("reply topic {:?}", reply.topic);
        self.timer.start(delay, self.session.id(), reply, self.replies.clone());
        SubmitOutcome::Sent
    }

    /// Put `text` in the input and submit it.
    pub fn send(&mut self, doc: &mut Document, lang: LanguageCode, text: &str) -> SubmitOutcome {
        if self.session.is_awaiting() {
            return SubmitOutcome::Ignored(IgnoreReason::AwaitingReply);
        }
        if let Some(input) = self.bindings.input {
            doc.set_value(input, text);
        }
        self.submit(doc, lang)
    }

    /// A `.suggestion-chip` click: its `data-message` is sent.
    pub fn click_chip(&mut self, doc: &mut Document, lang: LanguageCode, chip: ElementId) -> SubmitOutcome {
        match doc.attr(chip, "data-message").map(str::to_string) {
            Some(message) => self.send(doc, lang, &message),
            None => SubmitOutcome::Ignored(IgnoreReason::Blank),
        }
    }

    /// Render a reply from the typing timer. Replies for another session
    /// or arriving after close are dropped.
    pub fn deliver(&mut self, doc: &mut Document, pending: PendingReply) -> bool {
        if !self.state.is_open()
            || pending.session != self.session.id()
            || !self.session.is_awaiting()
        {
            debug!("dropping stale reply for session {}", pending.session);
            return false;
        }

        if let Some(typing) = self.bindings.typing {
            doc.set_displayed(typing, false, "flex");
        }
        self.append_message(doc, Author::Assistant, &pending.reply.text);
        self.session.push(ChatMessage::assistant(pending.reply.text));
        self.session.set_awaiting(false);
        self.update_send_button(doc);
        true
    }

    /// Keep the send button in step with the input.
    pub fn input_changed(&mut self, doc: &mut Document) {
        self.update_send_button(doc);
    }

    pub fn handle_escape(&mut self, doc: &mut Document) -> bool {
        self.close(doc)
    }

    /// Close when the click landed on the backdrop itself.
    pub fn click_backdrop(&mut self, doc: &mut Document, target: ElementId) -> bool {
        if self.backdrop == Some(target) {
            return self.close(doc);
        }
        false
    }

    /// The "get in touch" call to action: closes the widget and returns the
    /// last user message for the contact choice surface.
    pub fn get_in_touch(&mut self, doc: &mut Document) -> Option<PendingOutboundMessage> {
        if !self.state.is_open() {
            return None;
        }
        let message = PendingOutboundMessage::new(self.session.last_user_message().unwrap_or_default());
        self.close(doc);
        Some(message)
    }

    /// Validate the project form and hand a valid inquiry off by email.
    pub fn submit_inquiry(
        &mut self,
        doc: &mut Document,
        lang: LanguageCode,
        handoff: &ContactHandoff,
        nav: &mut dyn Navigator,
    ) -> Result<InquiryOutcome, FolioError> {
        if self.state != WidgetState::Open(Screen::Project) {
            return Ok(InquiryOutcome::Ignored);
        }

        let form = &self.bindings.inquiry;
        let field = |id: Option<ElementId>| id.map(|id| doc.value(id)).unwrap_or_default();
        let inquiry = ProjectInquiry::new(
            &field(form.name),
            &field(form.email),
            &field(form.project_type),
            &field(form.description),
        );
        let status = form.status;

        if let Err(e) = inquiry.validate() {
            if let Some(status) = status {
                let text = self.copy(lang, e.translation_key()).unwrap_or_default().to_string();
                doc.set_text(status, &text);
                doc.add_class(status, "error");
            }
            return Ok(InquiryOutcome::Invalid(e));
        }

        let subject = inquiry.subject(self.copy(lang, "inquirySubject").unwrap_or("Project inquiry: {type}"));
        let body = inquiry.body(
            self.copy(lang, "inquiryBody")
                .unwrap_or("{name} <{email}>\n{type}\n\n{description}"),
        );
        let uri = handoff.send_email(&subject, &body, nav)?;

        emit(
            &self.analytics,
            AnalyticsEvent::new("project_inquiry", "Conversion", &inquiry.project_type),
        );
        info!("Project inquiry handed off by email");
        self.close(doc);
        Ok(InquiryOutcome::Sent(uri))
    }

    fn copy(&self, lang: LanguageCode, key: &str) -> Option<&str> {
        self.table
            .get(lang, key)
            .or_else(|| self.table.get(LanguageCode::default(), key))
    }

    fn show_screen(&self, doc: &mut Document, screen: Screen) {
        for &(s, el) in &self.bindings.screens {
            doc.set_displayed(el, s == screen, "block");
        }
    }

    fn append_message(&self, doc: &mut Document, author: Author, text: &str) {
        let Some(conversation) = self.bindings.conversation else {
            return;
        };
        let bubble = ElementBuilder::new(doc, "div")
            .class("chat-message")
            .class(author.css_class())
            .append_to(conversation);
        let content = ElementBuilder::new(doc, "div")
            .class("message-content")
            .append_to(bubble);
        ElementBuilder::new(doc, "p").text(text).append_to(content);
    }

    fn update_send_button(&self, doc: &mut Document) {
        let Some(send) = self.bindings.send else {
            return;
        };
        let blank = self
            .bindings
            .input
            .map_or(true, |input| doc.value(input).trim().is_empty());
        if self.session.is_awaiting() || blank {
            doc.set_attr(send, "disabled", "");
        } else {
            doc.remove_attr(send, "disabled");
        }
    }

    /// Back to a fresh session: greeting only, suggestions visible, input
    /// cleared, main screen showing.
    fn reset(&mut self, doc: &mut Document) {
        if let Some(conversation) = self.bindings.conversation {
            let bubbles = doc.select_by_class_within(conversation, "chat-message");
            for bubble in bubbles.into_iter().skip(self.greeting_nodes) {
                doc.remove(bubble);
            }
        }
        if let Some(suggestions) = self.bindings.suggestions {
            doc.set_displayed(suggestions, true, "block");
        }
        if let Some(typing) = self.bindings.typing {
            doc.set_displayed(typing, false, "flex");
        }
        if let Some(input) = self.bindings.input {
            doc.set_value(input, "");
        }
        if let Some(status) = self.bindings.inquiry.status {
            doc.set_text(status, "");
            doc.remove_class(status, "error");
        }
        self.show_screen(doc, Screen::Main);
        self.session = ConversationSession::new(greeting_text(doc, &self.bindings));
        self.update_send_button(doc);
    }
}

/// Text of the first message bubble present in the page markup.
fn greeting_text(doc: &Document, bindings: &ChatBindings) -> Option<String> {
    let conversation = bindings.conversation?;
    let first = doc
        .select_by_class_within(conversation, "chat-message")
        .into_iter()
        .next()?;
    let text = doc.text_content(first).trim().to_string();
    (!text.is_empty()).then_some(text)
}
