use folio_core::{error::FolioError, traits::PreferenceStore};
use std::collections::HashMap;

/// Browser-local storage stand-in. Lives as long as the page.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Pre-populate a key, as if written on an earlier visit.
    pub fn with(mut self, key: &str, value: &str) -> Self {
        self.values.insert(key.to_string(), value.to_string());
        self
    }
}

impl PreferenceStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    fn get(&self, key: &str) -> Result<Option<String>, FolioError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FolioError> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), FolioError> {
        self.values.remove(key);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_set_get_remove() {
        let mut store = MemoryStore::new();
        assert_eq!(store.get("preferredLanguage").unwrap(), None);
        store.set("preferredLanguage", "en").unwrap();
        assert_eq!(store.get("preferredLanguage").unwrap().as_deref(), Some("en"));
        store.remove("preferredLanguage").unwrap();
        assert_eq!(store.get("preferredLanguage").unwrap(), None);
    }

    #[test]
    fn test_prepopulated() {
        let store = MemoryStore::new().with("preferredLanguage", "nl");
        assert_eq!(store.get("preferredLanguage").unwrap().as_deref(), Some("nl"));
    }
}
