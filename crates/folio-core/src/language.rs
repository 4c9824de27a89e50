//! Supported page languages.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::FolioError;

/// A supported page language. Dutch is the primary audience and the default.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LanguageCode {
    #[default]
    Nl,
    En,
}

impl LanguageCode {
    /// Every supported language, in display order.
    pub const ALL: [LanguageCode; 2] = [LanguageCode::Nl, LanguageCode::En];

    /// Lower-case code as used in URLs, storage and the `lang` attribute.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Nl => "nl",
            Self::En => "en",
        }
    }

    /// Upper-case label shown on toggle and footer buttons.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Nl => "NL",
            Self::En => "EN",
        }
    }

    /// Name of the language in that language.
    pub fn native_name(&self) -> &'static str {
        match self {
            Self::Nl => "Nederlands",
            Self::En => "English",
        }
    }

    /// Parse a code, returning `None` for anything unsupported.
    pub fn parse(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|lang| lang.as_str().eq_ignore_ascii_case(code))
    }

    /// Map a runtime locale (`en-US`, `nl_NL.UTF-8`, `EN`) to a supported
    /// language by its primary subtag.
    pub fn from_locale(locale: &str) -> Option<Self> {
        let primary = locale
            .split(['-', '_', '.'])
            .next()
            .unwrap_or_default();
        Self::parse(primary)
    }
}

impl fmt::Display for LanguageCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LanguageCode {
    type Err = FolioError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| FolioError::UnsupportedLanguage(s.to_string()))
    }
}
