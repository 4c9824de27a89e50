use crate::{analytics::AnalyticsEvent, error::FolioError, location::Location};

/// Browser navigation surface: the current location and where it can go.
///
/// The web runtime implements this over `window.location`/`history`;
/// [`crate::browser::MemoryNavigator`] records calls for tests and the CLI.
pub trait Navigator {
    /// Current page location.
    fn location(&self) -> Location;

    /// Locale reported by the runtime (e.g. `navigator.language`).
    fn preferred_locale(&self) -> Option<String>;

    /// Rewrite the visible URL without navigating (history replacement).
    fn replace_state(&mut self, url: &str);

    /// Navigate the current browsing context to `url`.
    fn assign(&mut self, url: &str);

    /// Open `url` in a new browsing context.
    fn open_new_context(&mut self, url: &str);
}

/// Browser-local key/value storage for the language preference.
pub trait PreferenceStore {
    /// Human-readable backend name.
    fn name(&self) -> &str;

    fn get(&self, key: &str) -> Result<Option<String>, FolioError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), FolioError>;

    fn remove(&mut self, key: &str) -> Result<(), FolioError>;
}

/// Analytics sink. Always optional at call sites.
pub trait Analytics: Send + Sync {
    fn track(&self, event: &AnalyticsEvent);
}
