//! The site context: one page model and every component bound to it.
//!
//! Events arrive as element targets. A click is offered to the target and
//! then to each ancestor in turn, the way it would bubble in a browser,
//! until a component claims it.

#[cfg(test)]
mod tests;

use folio_channels::{ChannelCopy, ChannelKind, ContactHandoff};
use folio_chat::{
    ContactChoice, ConversationWidget, PendingReply, ReplyDelay, ResponseEngine, Screen,
    SubmitOutcome,
};
use folio_core::{
    analytics::TracingAnalytics,
    config::Config,
    dom::{Document, ElementId},
    error::FolioError,
    language::LanguageCode,
    traits::{Analytics, Navigator, PreferenceStore},
};
use folio_i18n::{LanguageManager, Resolution, SwitchOutcome, TranslationTable};
use folio_ui::{NavHighlight, ProjectFilter, ScrollReveal, ShowMore};
use std::sync::Arc;
use tokio::sync::mpsc::UnboundedReceiver;
use tracing::{debug, warn};

/// The analytics sink the configuration asks for.
pub fn analytics_sink(config: &Config) -> Option<Arc<dyn Analytics>> {
    if config.analytics.enabled {
        Some(Arc::new(TracingAnalytics))
    } else {
        None
    }
}

/// What a click on a conversation control does.
enum WidgetAction {
    Open,
    Close,
    Send,
    Chip,
    Topic(Option<Screen>),
    Back,
    GetInTouch,
}

pub struct Site<N, S> {
    config: Config,
    doc: Document,
    nav: N,
    store: S,
    language: LanguageManager,
    widget: ConversationWidget,
    choice: ContactChoice,
    handoff: ContactHandoff,
    filter: ProjectFilter,
    show_more: ShowMore,
    nav_highlight: NavHighlight,
    scroll: ScrollReveal,
}

impl<N: Navigator, S: PreferenceStore> Site<N, S> {
    /// Load tables and rules and bind every component to `doc`. Replies
    /// scheduled by the conversation widget come out of the returned
    /// receiver and go back in through [`Site::deliver`].
    pub fn new(
        config: Config,
        doc: Document,
        nav: N,
        store: S,
        analytics: Option<Arc<dyn Analytics>>,
    ) -> Result<(Self, UnboundedReceiver<PendingReply>), FolioError> {
        let table = Arc::new(TranslationTable::load(config.i18n.translations_dir.as_deref())?);
        let engine = Arc::new(ResponseEngine::load(
            config.chat.rules_dir.as_deref(),
            &config.site,
            &config.contact,
            config.i18n.default_language,
        )?);

        let language = LanguageManager::new(table.clone(), config.i18n.clone(), &doc)
            .with_analytics(analytics.clone());
        let (widget, replies) = ConversationWidget::new(
            &doc,
            engine,
            table,
            ReplyDelay::from_config(&config.chat),
        );
        let widget = widget.with_analytics(analytics.clone());
        let choice = ContactChoice::new(&doc).with_analytics(analytics);

        let site = Self {
            handoff: ContactHandoff::from_config(&config.contact),
            filter: ProjectFilter::resolve(&doc),
            show_more: ShowMore::resolve(&doc),
            nav_highlight: NavHighlight::resolve(&doc),
            scroll: ScrollReveal::resolve(&doc, &config.ui),
            config,
            doc,
            nav,
            store,
            language,
            widget,
            choice,
        };
        Ok((site, replies))
    }

    /// Page load: resolve the language and settle the initial UI state.
    pub fn load(&mut self) -> Resolution {
        let resolution = self
            .language
            .init(&mut self.doc, &mut self.nav, &mut self.store);
        self.show_more.init(&mut self.doc, &self.filter);
        resolution
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn doc(&self) -> &Document {
        &self.doc
    }

    pub fn doc_mut(&mut self) -> &mut Document {
        &mut self.doc
    }

    pub fn nav(&self) -> &N {
        &self.nav
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn language(&self) -> &LanguageManager {
        &self.language
    }

    pub fn widget(&self) -> &ConversationWidget {
        &self.widget
    }

    pub fn choice(&self) -> &ContactChoice {
        &self.choice
    }

    pub fn current_language(&self) -> LanguageCode {
        self.language.current()
    }

    pub fn render(&self) -> String {
        self.doc.render()
    }

    // --- Direct operations ---

    pub fn switch_language(&mut self, code: &str) -> SwitchOutcome {
        self.language
            .switch_language(code, &mut self.doc, &mut self.nav, &mut self.store)
    }

    pub fn open_conversation(&mut self, seed: Option<&str>) -> bool {
        let lang = self.language.current();
        self.widget.open(&mut self.doc, lang, seed)
    }

    pub fn close_conversation(&mut self) -> bool {
        self.widget.close(&mut self.doc)
    }

    pub fn send(&mut self, text: &str) -> SubmitOutcome {
        let lang = self.language.current();
        self.widget.send(&mut self.doc, lang, text)
    }

    pub fn select_topic(&mut self, screen: Screen) -> bool {
        self.widget.select_topic(&mut self.doc, screen)
    }

    pub fn back(&mut self) -> bool {
        self.widget.back(&mut self.doc)
    }

    pub fn deliver(&mut self, pending: PendingReply) -> bool {
        self.widget.deliver(&mut self.doc, pending)
    }

    /// Close the widget and offer its last message on the choice surface.
    pub fn get_in_touch(&mut self) -> bool {
        match self.widget.get_in_touch(&mut self.doc) {
            Some(message) => self.choice.open(&mut self.doc, message),
            None => false,
        }
    }

    /// Hand the pending message to `kind`. Failures are logged and leave
    /// the choice surface open.
    pub fn choose(&mut self, kind: ChannelKind) -> Option<String> {
        let language = &self.language;
        let copy = ChannelCopy::from_lookup(&self.config.site.owner_name, |key| language.t(key));
        match self
            .choice
            .choose(&mut self.doc, kind, &self.handoff, &copy, &mut self.nav)
        {
            Ok(uri) => uri,
            Err(e) => {
                warn!("contact hand-off via {kind} failed: {e}");
                None
            }
        }
    }

    // --- Page events ---

    /// A click on `target`, bubbling up through its ancestors.
    pub fn click(&mut self, target: ElementId) -> bool {
        let path: Vec<ElementId> =
            std::iter::successors(Some(target), |&id| self.doc.parent(id)).collect();
        let on_toggle = self
            .language
            .bindings()
            .toggle
            .is_some_and(|toggle| path.contains(&toggle));
        if !on_toggle {
            self.language.close_dropdown(&mut self.doc);
        }
        for id in path {
            if self.click_control(id) {
                return true;
            }
        }
        debug!("click on {target:?} not handled");
        false
    }

    fn click_control(&mut self, id: ElementId) -> bool {
        if self.language.bindings().toggle == Some(id) {
            self.language.toggle_dropdown(&mut self.doc);
            return true;
        }
        if self.language.bindings().is_language_control(id) {
            if let Some(code) = self.doc.attr(id, "data-lang").map(str::to_string) {
                self.switch_language(&code);
            }
            return true;
        }
        if self.nav_highlight.activate(&mut self.doc, id) {
            return true;
        }
        if self.filter.click(&mut self.doc, id).is_some() {
            return true;
        }
        if self.show_more.button() == Some(id) {
            let language = &self.language;
            self.show_more
                .toggle(&mut self.doc, &self.filter, |key| language.t(key));
            return true;
        }
        self.click_widget(id) || self.click_choice(id)
    }

    fn click_widget(&mut self, id: ElementId) -> bool {
        let Some(action) = self.widget_action(id) else {
            return self.widget.click_backdrop(&mut self.doc, id);
        };
        let lang = self.language.current();
        match action {
            WidgetAction::Open => {
                self.widget.open(&mut self.doc, lang, None);
            }
            WidgetAction::Close => {
                self.widget.close(&mut self.doc);
            }
            WidgetAction::Send => {
                self.widget.submit(&mut self.doc, lang);
            }
            WidgetAction::Chip => {
                self.widget.click_chip(&mut self.doc, lang, id);
            }
            WidgetAction::Topic(Some(screen)) => {
                self.widget.select_topic(&mut self.doc, screen);
            }
            WidgetAction::Topic(None) => debug!("unknown topic on {id:?}"),
            WidgetAction::Back => {
                self.widget.back(&mut self.doc);
            }
            WidgetAction::GetInTouch => {
                self.get_in_touch();
            }
        }
        true
    }

    fn widget_action(&self, id: ElementId) -> Option<WidgetAction> {
        let bindings = self.widget.bindings();
        let action = if bindings.trigger == Some(id) {
            WidgetAction::Open
        } else if bindings.close == Some(id) {
            WidgetAction::Close
        } else if bindings.send == Some(id) {
            WidgetAction::Send
        } else if bindings.chips.contains(&id) {
            WidgetAction::Chip
        } else if bindings.topics.contains(&id) {
            WidgetAction::Topic(self.doc.attr(id, "data-topic").and_then(Screen::from_topic))
        } else if bindings.back_buttons.contains(&id) {
            WidgetAction::Back
        } else if bindings.contact_buttons.contains(&id) {
            WidgetAction::GetInTouch
        } else {
            return None;
        };
        Some(action)
    }

    fn click_choice(&mut self, id: ElementId) -> bool {
        let bindings = self.choice.bindings();
        let (whatsapp, email, pill) = (
            bindings.whatsapp == Some(id),
            bindings.email == Some(id),
            bindings.pills.contains(&id),
        );
        let dismiss = bindings.close == Some(id) || bindings.backdrop == Some(id);

        if whatsapp {
            self.choose(ChannelKind::WhatsApp);
        } else if email {
            self.choose(ChannelKind::Email);
        } else if dismiss {
            self.choice.close(&mut self.doc);
        } else if pill {
            self.choice.click_pill(&mut self.doc, id);
        } else {
            return false;
        }
        true
    }

    /// A key press. Escape closes the topmost surface: the contact choice
    /// first, then the conversation.
    pub fn key(&mut self, target: Option<ElementId>, key: &str) -> bool {
        if key == "Escape" {
            return self.choice.handle_escape(&mut self.doc) || self.widget.handle_escape(&mut self.doc);
        }
        let Some(target) = target else {
            return false;
        };
        if self.filter.key(&mut self.doc, target, key).is_some() {
            return true;
        }
        if key == "Enter" && self.widget.bindings().input == Some(target) {
            let lang = self.language.current();
            return self.widget.submit(&mut self.doc, lang) == SubmitOutcome::Sent;
        }
        false
    }

    /// A form submit.
    pub fn submit(&mut self, form: ElementId) -> bool {
        let lang = self.language.current();
        if self.widget.bindings().inquiry.form == Some(form) {
            if let Err(e) =
                self.widget
                    .submit_inquiry(&mut self.doc, lang, &self.handoff, &mut self.nav)
            {
                warn!("project inquiry hand-off failed: {e}");
            }
            return true;
        }
        if self.choice.bindings().hero_form == Some(form) {
            self.choice.submit_hero(&mut self.doc);
            return true;
        }
        let chat_input = self.widget.bindings().input;
        if chat_input.is_some_and(|input| self.is_within(input, form)) {
            self.widget.submit(&mut self.doc, lang);
            return true;
        }
        false
    }

    /// The value of an input changed.
    pub fn input(&mut self, target: ElementId) {
        if self.widget.bindings().input == Some(target) {
            self.widget.input_changed(&mut self.doc);
        }
    }

    pub fn scroll(&mut self, scroll_y: f64, viewport: f64) -> Option<usize> {
        self.scroll.on_scroll(&mut self.doc, scroll_y, viewport)
    }

    pub fn resize(&mut self, height: f64) {
        self.scroll.on_resize(height);
    }

    /// Apply work whose quiet period has passed.
    pub fn tick(&mut self) -> bool {
        self.scroll.flush_resize(&mut self.doc)
    }

    fn is_within(&self, node: ElementId, ancestor: ElementId) -> bool {
        std::iter::successors(Some(node), |&id| self.doc.parent(id)).any(|id| id == ancestor)
    }
}
