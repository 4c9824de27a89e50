mod defaults;


use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::FolioError;
use crate::language::LanguageCode;
use defaults::*;

/// Top-level Folio configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub site: SiteConfig,
    #[serde(default)]
    pub i18n: I18nConfig,
    #[serde(default)]
    pub contact: ContactConfig,
    #[serde(default)]
    pub chat: ChatConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub analytics: AnalyticsConfig,
}

/// General site settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SiteConfig {
    /// First name used in greetings and reply templates.
    #[serde(default = "default_owner_name")]
    pub owner_name: String,
    /// Where the CLI keeps its preference file.
    #[serde(default = "default_data_dir")]
    pub data_dir: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            owner_name: default_owner_name(),
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Language management settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct I18nConfig {
    #[serde(default)]
    pub default_language: LanguageCode,
    /// Storage key holding the persisted preference.
    #[serde(default = "default_storage_key")]
    pub storage_key: String,
    /// Query parameter recognised as an override on load.
    #[serde(default = "default_query_param")]
    pub query_param: String,
    /// Whether each language prefix is served as its own static page.
    /// When false, prefixes are virtual routes onto one document and a
    /// switch never reloads.
    #[serde(default = "default_true")]
    pub static_variants: bool,
    /// Directory with `<code>.toml` files overriding the bundled tables.
    #[serde(default)]
    pub translations_dir: Option<String>,
}

impl Default for I18nConfig {
    fn default() -> Self {
        Self {
            default_language: LanguageCode::default(),
            storage_key: default_storage_key(),
            query_param: default_query_param(),
            static_variants: true,
            translations_dir: None,
        }
    }
}

/// Contact hand-off targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactConfig {
    /// Phone number for `wa.me`; anything but digits is dropped.
    #[serde(default = "default_whatsapp_number")]
    pub whatsapp_number: String,
    #[serde(default = "default_email")]
    pub email: String,
    #[serde(default = "default_linkedin")]
    pub linkedin: String,
}

impl Default for ContactConfig {
    fn default() -> Self {
        Self {
            whatsapp_number: default_whatsapp_number(),
            email: default_email(),
            linkedin: default_linkedin(),
        }
    }
}

/// Conversation widget settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatConfig {
    #[serde(default = "default_reply_delay_min_ms")]
    pub reply_delay_min_ms: u64,
    #[serde(default = "default_reply_delay_max_ms")]
    pub reply_delay_max_ms: u64,
    /// Directory with `<code>.toml` rule tables overriding the bundled ones.
    #[serde(default)]
    pub rules_dir: Option<String>,
}

impl Default for ChatConfig {
    fn default() -> Self {
        Self {
            reply_delay_min_ms: default_reply_delay_min_ms(),
            reply_delay_max_ms: default_reply_delay_max_ms(),
            rules_dir: None,
        }
    }
}

impl ChatConfig {
    /// Reply delay bounds, ordered so `min <= max`.
    pub fn reply_delay(&self) -> (Duration, Duration) {
        let lo = self.reply_delay_min_ms.min(self.reply_delay_max_ms);
        let hi = self.reply_delay_min_ms.max(self.reply_delay_max_ms);
        (Duration::from_millis(lo), Duration::from_millis(hi))
    }
}

/// UI interaction settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_scroll_throttle_ms")]
    pub scroll_throttle_ms: u64,
    #[serde(default = "default_resize_debounce_ms")]
    pub resize_debounce_ms: u64,
    #[serde(default = "default_scroll_threshold_px")]
    pub scroll_threshold_px: u32,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            scroll_throttle_ms: default_scroll_throttle_ms(),
            resize_debounce_ms: default_resize_debounce_ms(),
            scroll_threshold_px: default_scroll_threshold_px(),
        }
    }
}

/// Analytics settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Expand `~` to home directory.
pub fn shellexpand(path: &str) -> String {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = std::env::var_os("HOME") {
            return format!("{}/{rest}", home.to_string_lossy());
        }
    }
    path.to_string()
}

/// Load configuration from a TOML file.
///
/// Falls back to defaults if the file does not exist.
pub fn load(path: &str) -> Result<Config, FolioError> {
    let path = Path::new(path);
    if !path.exists() {
        tracing::info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| FolioError::Config(format!("failed to read {}: {}", path.display(), e)))?;

    let config: Config = toml::from_str(&content)
        .map_err(|e| FolioError::Config(format!("failed to parse config: {}", e)))?;

    Ok(config)
}
