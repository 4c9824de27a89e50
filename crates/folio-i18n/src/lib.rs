//! # folio-i18n
//!
//! Translation tables, language resolution and the [`LanguageManager`]
//! that keeps page text, URL, stored preference and language indicators in
//! agreement.

pub mod bindings;
pub mod manager;
pub mod resolve;
pub mod table;

pub use bindings::LanguageBindings;
pub use manager::{LanguageManager, SwitchOutcome, TranslationReport};
pub use resolve::{resolve, LanguageSource, Resolution};
pub use table::TranslationTable;

/// Attribute marking an element whose content comes from the table.
pub const TRANSLATE_ATTR: &str = "data-translate";
