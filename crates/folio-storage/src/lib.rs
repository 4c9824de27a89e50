//! # folio-storage
//!
//! Backends for the persisted language preference: an in-memory map
//! standing in for browser local storage, and a JSON file for the CLI.

pub mod file;
pub mod memory;

pub use file::JsonFileStore;
pub use memory::MemoryStore;
