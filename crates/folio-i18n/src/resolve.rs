//! Initial language resolution.

use folio_core::{
    language::LanguageCode,
    location::{prefixed_path, Location},
};
use std::fmt;

/// Where the resolved language came from, in precedence order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LanguageSource {
    Path,
    Query,
    Stored,
    Locale,
    Default,
}

impl LanguageSource {
    /// Every source except the store itself writes the result back.
    pub fn should_persist(&self) -> bool {
        !matches!(self, Self::Stored)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Path => "path",
            Self::Query => "query",
            Self::Stored => "stored",
            Self::Locale => "locale",
            Self::Default => "default",
        }
    }
}

impl fmt::Display for LanguageSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    pub language: LanguageCode,
    pub source: LanguageSource,
}

/// Resolve the page language: path prefix, then query parameter, then the
/// stored preference, then the runtime locale, then `default`. Values that
/// are not supported codes are skipped.
pub fn resolve(
    location: &Location,
    query_param: &str,
    stored: Option<&str>,
    locale: Option<&str>,
    default: LanguageCode,
) -> Resolution {
    let found = location
        .language_prefix()
        .map(|lang| (lang, LanguageSource::Path))
        .or_else(|| {
            location
                .query_param(query_param)
                .and_then(|code| LanguageCode::parse(&code))
                .map(|lang| (lang, LanguageSource::Query))
        })
        .or_else(|| stored.and_then(LanguageCode::parse).map(|lang| (lang, LanguageSource::Stored)))
        .or_else(|| {
            locale
                .and_then(LanguageCode::from_locale)
                .map(|lang| (lang, LanguageSource::Locale))
        });

    let (language, source) = found.unwrap_or((default, LanguageSource::Default));
    Resolution { language, source }
}

/// The URL to show after resolution, or `None` when the path already
/// carries a language prefix. Query and fragment are kept.
pub fn prefixed_url(location: &Location, lang: LanguageCode) -> Option<String> {
    if location.language_prefix().is_some() {
        return None;
    }
    Some(format!(
        "{}{}{}",
        prefixed_path(lang, &location.path),
        location.search(),
        location.hash
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(url: &str) -> Location {
        Location::parse(url)
    }

    #[test]
    fn test_path_beats_everything() {
        let r = resolve(&at("/en?lang=nl"), "lang", Some("nl"), Some("nl-NL"), LanguageCode::Nl);
        assert_eq!(r.language, LanguageCode::En);
        assert_eq!(r.source, LanguageSource::Path);
    }

    #[test]
    fn test_query_beats_store() {
        let r = resolve(&at("/?lang=en"), "lang", Some("nl"), None, LanguageCode::Nl);
        assert_eq!(r, Resolution { language: LanguageCode::En, source: LanguageSource::Query });
    }

    #[test]
    fn test_invalid_values_fall_through() {
        let r = resolve(&at("/?lang=fr"), "lang", Some("de"), Some("en-GB"), LanguageCode::Nl);
        assert_eq!(r, Resolution { language: LanguageCode::En, source: LanguageSource::Locale });
    }

    #[test]
    fn test_stored_beats_locale() {
        let r = resolve(&at("/"), "lang", Some("en"), Some("nl-NL"), LanguageCode::Nl);
        assert_eq!(r.source, LanguageSource::Stored);
        assert!(!r.source.should_persist());
    }

    #[test]
    fn test_default_when_nothing_matches() {
        let r = resolve(&at("/"), "lang", None, Some("fr-FR"), LanguageCode::Nl);
        assert_eq!(r, Resolution { language: LanguageCode::Nl, source: LanguageSource::Default });
        assert!(r.source.should_persist());
    }

    #[test]
    fn test_custom_query_param() {
        let r = resolve(&at("/?taal=en&lang=nl"), "taal", None, None, LanguageCode::Nl);
        assert_eq!(r.language, LanguageCode::En);
    }

    #[test]
    fn test_prefixed_url() {
        assert_eq!(prefixed_url(&at("/"), LanguageCode::En).as_deref(), Some("/en"));
        assert_eq!(
            prefixed_url(&at("/index.html?lang=en#about"), LanguageCode::En).as_deref(),
            Some("/en?lang=en#about")
        );
        assert_eq!(
            prefixed_url(&at("/portfolio-website"), LanguageCode::Nl).as_deref(),
            Some("/nl/portfolio-website")
        );
        assert_eq!(prefixed_url(&at("/nl/portfolio-website"), LanguageCode::En), None);
    }
}
