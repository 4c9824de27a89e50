use folio_core::{config::shellexpand, error::FolioError, traits::PreferenceStore};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Preferences persisted as a flat JSON object on disk.
///
/// The whole map is rewritten on every `set`; the file holds a handful of
/// keys at most.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
    values: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Open (or lazily create) the store at `path`. `~/` is expanded.
    ///
    /// A corrupt file is logged and treated as empty; it is replaced on the
    /// next write.
    pub fn open(path: &str) -> Result<Self, FolioError> {
        let path = PathBuf::from(shellexpand(path));
        let values = match std::fs::read_to_string(&path) {
            Ok(content) => match serde_json::from_str(&content) {
                Ok(values) => values,
                Err(e) => {
                    warn!("preferences file {} is not valid JSON: {e}", path.display());
                    BTreeMap::new()
                }
            },
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => return Err(FolioError::Storage(format!("failed to read {}: {e}", path.display()))),
        };
        info!("Preference store opened at {}", path.display());
        Ok(Self { path, values })
    }

    /// Store inside `data_dir` as `preferences.json`.
    pub fn in_data_dir(data_dir: &str) -> Result<Self, FolioError> {
        let dir = shellexpand(data_dir);
        let path = Path::new(&dir).join("preferences.json");
        Self::open(&path.to_string_lossy())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn flush(&self) -> Result<(), FolioError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .map_err(|e| FolioError::Storage(format!("failed to create data dir: {e}")))?;
        }
        let json = serde_json::to_string_pretty(&self.values)?;
        std::fs::write(&self.path, json)
            .map_err(|e| FolioError::Storage(format!("failed to write {}: {e}", self.path.display())))
    }
}

impl PreferenceStore for JsonFileStore {
    fn name(&self) -> &str {
        "json-file"
    }

    fn get(&self, key: &str) -> Result<Option<String>, FolioError> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), FolioError> {
        if self.values.get(key).is_some_and(|v| v == value) {
            return Ok(());
        }
        self.values.insert(key.to_string(), value.to_string());
        self.flush()
    }

    fn remove(&mut self, key: &str) -> Result<(), FolioError> {
        if self.values.remove(key).is_some() {
            self.flush()?;
        }
        Ok(())
    }
}
