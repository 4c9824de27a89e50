//! Language × key → text.

use folio_core::{config::shellexpand, error::FolioError, language::LanguageCode};
use std::collections::{BTreeMap, BTreeSet};
use std::path::Path;
use tracing::info;

const BUNDLED_NL: &str = include_str!("../translations/nl.toml");
const BUNDLED_EN: &str = include_str!("../translations/en.toml");

/// Static translation data. Immutable once loaded.
#[derive(Debug, Clone, Default)]
pub struct TranslationTable {
    entries: BTreeMap<LanguageCode, BTreeMap<String, String>>,
}

impl TranslationTable {
    /// The tables compiled into the binary.
    pub fn bundled() -> Result<Self, FolioError> {
        Self::from_sources(&[
            (LanguageCode::Nl, BUNDLED_NL),
            (LanguageCode::En, BUNDLED_EN),
        ])
    }

    /// Build from TOML sources, one flat `key = "text"` table per language.
    pub fn from_sources(sources: &[(LanguageCode, &str)]) -> Result<Self, FolioError> {
        let mut table = Self::default();
        for (lang, source) in sources {
            table.entries.insert(*lang, parse_entries(*lang, source)?);
        }
        Ok(table)
    }

    /// Bundled tables, with `<dir>/<code>.toml` entries layered on top when
    /// a directory is given. Keys in an override file replace bundled keys;
    /// keys it does not mention keep their bundled text.
    pub fn load(dir: Option<&str>) -> Result<Self, FolioError> {
        let mut table = Self::bundled()?;
        let Some(dir) = dir else {
            return Ok(table);
        };

        let dir = shellexpand(dir);
        for lang in LanguageCode::ALL {
            let path = Path::new(&dir).join(format!("{lang}.toml"));
            if !path.exists() {
                continue;
            }
            let content = std::fs::read_to_string(&path).map_err(|e| {
                FolioError::Translation(format!("failed to read {}: {e}", path.display()))
            })?;
            let overrides = parse_entries(lang, &content)?;
            info!("Loaded {} translation overrides from {}", overrides.len(), path.display());
            table.entries.entry(lang).or_default().extend(overrides);
        }
        Ok(table)
    }

    /// Text for `key`, or `None` when it is absent or empty.
    pub fn get(&self, lang: LanguageCode, key: &str) -> Option<&str> {
        self.entries
            .get(&lang)?
            .get(key)
            .map(String::as_str)
            .filter(|text| !text.is_empty())
    }

    /// Languages that have a table.
    pub fn languages(&self) -> Vec<LanguageCode> {
        self.entries.keys().copied().collect()
    }

    pub fn len(&self, lang: LanguageCode) -> usize {
        self.entries.get(&lang).map_or(0, BTreeMap::len)
    }

    /// Keys defined for some other language but not for `lang`, sorted.
    pub fn missing_keys(&self, lang: LanguageCode) -> Vec<String> {
        let own = self.entries.get(&lang);
        let all: BTreeSet<&String> = self.entries.values().flat_map(BTreeMap::keys).collect();
        all.into_iter()
            .filter(|key| !own.is_some_and(|entries| entries.contains_key(*key)))
            .cloned()
            .collect()
    }
}

fn parse_entries(lang: LanguageCode, source: &str) -> Result<BTreeMap<String, String>, FolioError> {
    let raw: toml::Table = toml::from_str(source)
        .map_err(|e| FolioError::Translation(format!("invalid {lang} table: {e}")))?;

    raw.into_iter()
        .map(|(key, value)| match value {
            toml::Value::String(text) => Ok((key, text)),
            other => Err(FolioError::Translation(format!(
                "{lang}.{key} must be a string, got {}",
                other.type_str()
            ))),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bundled_tables_load() {
        let table = TranslationTable::bundled().unwrap();
        assert_eq!(table.get(LanguageCode::Nl, "navProjects"), Some("Projecten"));
        assert_eq!(table.get(LanguageCode::En, "navProjects"), Some("Work"));
        assert_eq!(table.get(LanguageCode::En, "noSuchKey"), None);
        assert_eq!(table.languages(), vec![LanguageCode::Nl, LanguageCode::En]);
    }

    #[test]
    fn test_bundled_tables_in_parity() {
        let table = TranslationTable::bundled().unwrap();
        for lang in LanguageCode::ALL {
            assert!(table.missing_keys(lang).is_empty(), "{lang} missing keys");
        }
    }

    #[test]
    fn test_missing_keys() {
        let table = TranslationTable::from_sources(&[
            (LanguageCode::Nl, "a = \"A\"\nb = \"B\""),
            (LanguageCode::En, "a = \"A\""),
        ])
        .unwrap();
        assert_eq!(table.missing_keys(LanguageCode::En), vec!["b".to_string()]);
        assert!(table.missing_keys(LanguageCode::Nl).is_empty());
    }

    #[test]
    fn test_empty_text_reads_as_absent() {
        let table = TranslationTable::from_sources(&[
            (LanguageCode::Nl, "projectsTitle = \"\"\nnavHome = \"Home\""),
        ])
        .unwrap();
        assert_eq!(table.get(LanguageCode::Nl, "projectsTitle"), None);
        assert_eq!(table.get(LanguageCode::Nl, "navHome"), Some("Home"));
    }

    #[test]
    fn test_non_string_value_rejected() {
        let err = TranslationTable::from_sources(&[(LanguageCode::Nl, "a = 1")]).unwrap_err();
        assert!(err.to_string().contains("nl.a must be a string"));
    }

    #[test]
    fn test_directory_overrides_layer_on_bundled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("en.toml"), "navProjects = \"Projects\"\n").unwrap();

        let table = TranslationTable::load(dir.path().to_str()).unwrap();
        assert_eq!(table.get(LanguageCode::En, "navProjects"), Some("Projects"));
        assert_eq!(table.get(LanguageCode::En, "navHome"), Some("Home"));
        assert_eq!(table.get(LanguageCode::Nl, "navProjects"), Some("Projecten"));
    }

    #[test]
    fn test_invalid_override_is_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("nl.toml"), "not toml at all [").unwrap();
        assert!(TranslationTable::load(dir.path().to_str()).is_err());
    }
}
