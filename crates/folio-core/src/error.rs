use thiserror::Error;

/// Top-level error type for Folio.
#[derive(Debug, Error)]
pub enum FolioError {
    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// A language code outside the supported set.
    #[error("unsupported language: {0}")]
    UnsupportedLanguage(String),

    /// Translation table could not be loaded.
    #[error("translation error: {0}")]
    Translation(String),

    /// Preference storage error.
    #[error("storage error: {0}")]
    Storage(String),

    /// Contact channel error.
    #[error("channel error: {0}")]
    Channel(String),

    /// Response rule table could not be loaded.
    #[error("rules error: {0}")]
    Rules(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
