//! # folio-core
//!
//! Core types, traits, configuration, the headless page model and error
//! handling shared by every Folio crate.

pub mod analytics;
pub mod browser;
pub mod config;
pub mod dom;
pub mod error;
pub mod language;
pub mod location;
pub mod message;
pub mod sanitize;
pub mod template;
pub mod traits;
