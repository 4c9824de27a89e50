//! Keyword Response Engine.
//!
//! Rule tables are data: an ordered list of (keywords, template) pairs and a
//! default template per language. The first rule with any keyword contained
//! in the lower-cased message wins, so table order is priority order.

use folio_core::{
    config::{shellexpand, ContactConfig, SiteConfig},
    error::FolioError,
    language::LanguageCode,
    template::fill,
};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::info;

const BUNDLED_NL: &str = include_str!("../rules/nl.toml");
const BUNDLED_EN: &str = include_str!("../rules/en.toml");

/// One (trigger set, template) pair.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResponseRule {
    pub topic: String,
    /// Lower-cased trigger keywords.
    pub keywords: Vec<String>,
    pub template: String,
}

impl ResponseRule {
    fn matches(&self, normalized: &str) -> bool {
        self.keywords.iter().any(|kw| normalized.contains(kw.as_str()))
    }
}

/// The engine's answer to one message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reply {
    /// Topic of the matched rule, `None` for the default reply.
    pub topic: Option<String>,
    pub text: String,
}

#[derive(Debug, Deserialize)]
struct RuleFile {
    #[serde(default)]
    question_note: String,
    default: String,
    #[serde(default, rename = "rule")]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
struct RawRule {
    topic: String,
    keywords: Vec<String>,
    template: String,
}

/// The rules for one language.
#[derive(Debug, Clone)]
pub struct RuleSet {
    rules: Vec<ResponseRule>,
    default: String,
    question_note: String,
}

impl RuleSet {
    /// Parse a TOML rule table, filling `{owner}`, `{email}` and
    /// `{linkedin}` from `vars`.
    pub fn parse(source: &str, vars: &[(&str, &str)]) -> Result<Self, FolioError> {
        let file: RuleFile =
            toml::from_str(source).map_err(|e| FolioError::Rules(format!("invalid rule table: {e}")))?;

        let mut rules = Vec::with_capacity(file.rules.len());
        for raw in file.rules {
            let keywords: Vec<String> = raw
                .keywords
                .iter()
                .map(|kw| kw.trim().to_lowercase())
                .collect();
            if keywords.is_empty() || keywords.iter().any(String::is_empty) {
                return Err(FolioError::Rules(format!(
                    "rule {:?} needs at least one non-empty keyword",
                    raw.topic
                )));
            }
            if rules.iter().any(|r: &ResponseRule| r.topic == raw.topic) {
                return Err(FolioError::Rules(format!("duplicate rule topic {:?}", raw.topic)));
            }
            rules.push(ResponseRule {
                topic: raw.topic,
                keywords,
                template: fill(&raw.template, vars),
            });
        }

        Ok(Self {
            rules,
            default: fill(&file.default, vars),
            question_note: file.question_note,
        })
    }

    pub fn rules(&self) -> &[ResponseRule] {
        &self.rules
    }

    pub fn topics(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.topic.as_str()).collect()
    }

    /// Pick the reply for `message`. Pure: no state, no randomness.
    pub fn reply(&self, message: &str) -> Reply {
        let normalized = message.to_lowercase();
        if let Some(rule) = self.rules.iter().find(|r| r.matches(&normalized)) {
            return Reply {
                topic: Some(rule.topic.clone()),
                text: rule.template.clone(),
            };
        }

        let note = if message.contains('?') {
            self.question_note.as_str()
        } else {
            ""
        };
        let text = fill(&self.default, &[("question_note", note)]);
        Reply {
            topic: None,
            text: tidy_lines(&text),
        }
    }
}

/// Per-language rule sets with a fallback language.
#[derive(Debug, Clone)]
pub struct ResponseEngine {
    sets: BTreeMap<LanguageCode, RuleSet>,
    fallback: LanguageCode,
}

impl ResponseEngine {
    /// Bundled tables, with `<dir>/<code>.toml` replacing a language's table
    /// when present.
    pub fn load(
        dir: Option<&str>,
        site: &SiteConfig,
        contact: &ContactConfig,
        fallback: LanguageCode,
    ) -> Result<Self, FolioError> {
        let vars = [
            ("owner", site.owner_name.as_str()),
            ("email", contact.email.as_str()),
            ("linkedin", contact.linkedin.as_str()),
        ];

        let mut sets = BTreeMap::new();
        for (lang, bundled) in [(LanguageCode::Nl, BUNDLED_NL), (LanguageCode::En, BUNDLED_EN)] {
            let source = match dir.map(|d| Path::new(&shellexpand(d)).join(format!("{lang}.toml"))) {
                Some(path) if path.exists() => {
                    info!("Loading {lang} reply rules from {}", path.display());
                    std::fs::read_to_string(&path).map_err(|e| {
                        FolioError::Rules(format!("failed to read {}: {e}", path.display()))
                    })?
                }
                _ => bundled.to_string(),
            };
            let set = RuleSet::parse(&source, &vars)
                .map_err(|e| FolioError::Rules(format!("{lang}: {e}")))?;
            sets.insert(lang, set);
        }

        Ok(Self { sets, fallback })
    }

    /// Bundled tables only.
    pub fn bundled(site: &SiteConfig, contact: &ContactConfig) -> Result<Self, FolioError> {
        Self::load(None, site, contact, LanguageCode::default())
    }

    pub fn from_sets(sets: BTreeMap<LanguageCode, RuleSet>, fallback: LanguageCode) -> Self {
        Self { sets, fallback }
    }

    /// The rule set for `lang`, or the fallback language's.
    pub fn rule_set(&self, lang: LanguageCode) -> Option<&RuleSet> {
        self.sets.get(&lang).or_else(|| self.sets.get(&self.fallback))
    }

    /// Reply in `lang`. Callers filter out blank input before calling.
    pub fn reply(&self, lang: LanguageCode, message: &str) -> Reply {
        match self.rule_set(lang) {
            Some(set) => set.reply(message),
            None => Reply {
                topic: None,
                text: String::new(),
            },
        }
    }
}

fn tidy_lines(text: &str) -> String {
    text.lines().map(str::trim_end).collect::<Vec<_>>().join("\n")
}
