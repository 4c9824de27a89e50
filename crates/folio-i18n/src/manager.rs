//! The language manager: one owner for the page language.
//!
//! Resolution on load, explicit switches, DOM translation, indicator and
//! link updates all go through [`LanguageManager`]. Browser collaborators
//! are passed in per call so the manager owns nothing but its own state.


use folio_core::{
    analytics::{emit, AnalyticsEvent},
    config::I18nConfig,
    dom::Document,
    language::LanguageCode,
    location::prefixed_path,
    sanitize::{contains_markup, sanitize_translation},
    traits::{Analytics, Navigator, PreferenceStore},
};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::{
    bindings::LanguageBindings,
    resolve::{prefixed_url, resolve, Resolution},
    table::TranslationTable,
    TRANSLATE_ATTR,
};

/// Result of [`LanguageManager::switch_language`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SwitchOutcome {
    /// Unsupported code; nothing changed.
    Rejected,
    /// A full navigation to the given URL was started.
    Navigated(String),
    /// The page was re-translated without navigation.
    InPlace,
}

/// What [`LanguageManager::apply_translations`] did.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranslationReport {
    pub applied: usize,
    /// Keys annotated on the page but absent or empty for the current
    /// language.
    pub missing: Vec<String>,
}

pub struct LanguageManager {
    table: Arc<TranslationTable>,
    config: I18nConfig,
    current: LanguageCode,
    bindings: LanguageBindings,
    analytics: Option<Arc<dyn Analytics>>,
}

impl LanguageManager {
    /// Bind to `doc`. The language starts at the configured default until
    /// [`init`](Self::init) runs.
    pub fn new(table: Arc<TranslationTable>, config: I18nConfig, doc: &Document) -> Self {
        Self {
            table,
            current: config.default_language,
            config,
            bindings: LanguageBindings::resolve(doc),
            analytics: None,
        }
    }

    pub fn with_analytics(mut self, analytics: Option<Arc<dyn Analytics>>) -> Self {
        self.analytics = analytics;
        self
    }

    pub fn current(&self) -> LanguageCode {
        self.current
    }

    pub fn bindings(&self) -> &LanguageBindings {
        &self.bindings
    }

    pub fn table(&self) -> &TranslationTable {
        &self.table
    }

    /// Resolve the language for this load and bring every surface in line.
    pub fn init(
        &mut self,
        doc: &mut Document,
        nav: &mut dyn Navigator,
        store: &mut dyn PreferenceStore,
    ) -> Resolution {
        let location = nav.location();
        let stored = match store.get(&self.config.storage_key) {
            Ok(value) => value,
            Err(e) => {
                warn!("could not read language preference from {}: {e}", store.name());
                None
            }
        };
        let locale = nav.preferred_locale();

        let resolution = resolve(
            &location,
            &self.config.query_param,
            stored.as_deref(),
            locale.as_deref(),
            self.config.default_language,
        );
        self.current = resolution.language;
        info!(
            "Language resolved to {} (source: {})",
            resolution.language, resolution.source
        );

        if resolution.source.should_persist() {
            self.persist(store);
        }
        if let Some(url) = prefixed_url(&location, self.current) {
            nav.replace_state(&url);
        }

        doc.set_lang(self.current.as_str());
        let report = self.apply_translations(doc);
        debug!("Applied {} translations on load", report.applied);
        self.update_indicators(doc);
        self.update_dynamic_links(doc);
        resolution
    }

    /// Switch to `code`. Unsupported codes are ignored.
    pub fn switch_language(
        &mut self,
        code: &str,
        doc: &mut Document,
        nav: &mut dyn Navigator,
        store: &mut dyn PreferenceStore,
    ) -> SwitchOutcome {
        let Some(lang) = LanguageCode::parse(code) else {
            warn!("ignoring switch to unsupported language {code:?}");
            return SwitchOutcome::Rejected;
        };

        let previous = self.current;
        self.current = lang;
        self.persist(store);
        doc.set_lang(lang.as_str());
        emit(
            &self.analytics,
            AnalyticsEvent::new("language_switch", "Language", lang.as_str()),
        );

        let location = nav.location();
        let target = location.path_for(lang);
        let url = format!("{target}{}{}", location.search(), location.hash);

        if location.path != target {
            if self.config.static_variants {
                info!("Language switch {previous} -> {lang}: navigating to {url}");
                nav.assign(&url);
                return SwitchOutcome::Navigated(url);
            }
            nav.replace_state(&url);
        }

        info!("Language switch {previous} -> {lang} in place");
        self.apply_translations(doc);
        self.update_indicators(doc);
        self.update_dynamic_links(doc);
        SwitchOutcome::InPlace
    }

    /// Write the current language into every annotated element.
    ///
    /// Keys without an entry for the current language, or with empty text,
    /// leave the element untouched.
    pub fn apply_translations(&self, doc: &mut Document) -> TranslationReport {
        let mut report = TranslationReport::default();

        for id in doc.select_by_attr(TRANSLATE_ATTR) {
            let Some(key) = doc.attr(id, TRANSLATE_ATTR).map(str::to_string) else {
                continue;
            };
            let Some(text) = self.table.get(self.current, &key) else {
                debug!("no {} translation for {key}", self.current);
                report.missing.push(key);
                continue;
            };

            let (is_input, is_option) = match doc.element(id) {
                Some(el) => (el.is_text_input(), el.tag == "option"),
                None => continue,
            };
            if is_input {
                doc.set_attr(id, "placeholder", text);
            } else if is_option || !contains_markup(text) {
                doc.set_text(id, text);
            } else {
                doc.set_inner_html(id, &sanitize_translation(text));
            }
            report.applied += 1;
        }

        report
    }

    /// Toggle label, active states and `aria-pressed` on the language
    /// controls, plus the document `lang`.
    pub fn update_indicators(&self, doc: &mut Document) {
        let code = self.current.as_str();
        if let Some(label) = self.bindings.current_label {
            doc.set_text(label, self.current.label());
        }
        for &option in &self.bindings.options {
            let active = doc.attr(option, "data-lang") == Some(code);
            doc.set_class(option, "active", active);
        }
        for &button in &self.bindings.footer_buttons {
            let active = doc.attr(button, "data-lang") == Some(code);
            doc.set_class(button, "active", active);
            doc.set_attr(button, "aria-pressed", if active { "true" } else { "false" });
        }
        doc.set_lang(code);
    }

    /// Point language-dependent links at the current language.
    pub fn update_dynamic_links(&self, doc: &mut Document) {
        let lang = self.current;
        if let Some(link) = self.bindings.sticker_link {
            doc.set_attr(link, "href", &prefixed_path(lang, "/portfolio-website"));
        }
        for &(link, anchor) in &self.bindings.nav_links {
            doc.set_attr(link, "href", &format!("/{lang}{anchor}"));
        }
        if let Some(back) = self.bindings.back_link {
            let points_home = doc.attr(back, "href").is_some_and(|href| {
                matches!(href, "/" | "#")
                    || LanguageCode::ALL.iter().any(|l| href == format!("/{l}"))
            });
            if points_home {
                doc.set_attr(back, "href", &format!("/{lang}"));
            }
        }
    }

    /// Flip the header dropdown. Returns whether it is now open.
    pub fn toggle_dropdown(&self, doc: &mut Document) -> bool {
        match (self.bindings.toggle, self.bindings.dropdown) {
            (Some(_), Some(dropdown)) => doc.toggle_class(dropdown, "active"),
            _ => false,
        }
    }

    pub fn close_dropdown(&self, doc: &mut Document) {
        if let Some(dropdown) = self.bindings.dropdown {
            doc.remove_class(dropdown, "active");
        }
    }

    /// Copy for other components: current language first, then the default.
    pub fn t(&self, key: &str) -> Option<&str> {
        self.table
            .get(self.current, key)
            .or_else(|| self.table.get(self.config.default_language, key))
    }

    fn persist(&self, store: &mut dyn PreferenceStore) {
        if let Err(e) = store.set(&self.config.storage_key, self.current.as_str()) {
            warn!("could not persist language preference to {}: {e}", store.name());
        }
    }
}
