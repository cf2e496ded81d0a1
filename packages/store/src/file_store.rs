//! # Filesystem-backed key-value store
//!
//! [`FileStore`] is a [`KeyValueStore`] implementation that persists every
//! key of one namespace as a single JSON object on disk. It is used on
//! desktop and mobile platforms to keep the signed-in session across app
//! restarts.
//!
//! ## Layout
//!
//! ```text
//! <base_dir>/
//! └── storage.json        # {"token": "...", "user": "{\"id\":1,...}"}
//! ```
//!
//! Writes go to `storage.json.tmp` first and are then renamed over the
//! document, so a multi-key write or remove lands on disk all at once.
//!
//! ## Platform data directories
//!
//! [`FileStore::for_namespace`] resolves the base through [`dirs::data_dir()`]:
//!
//! | Platform | Path |
//! |----------|------|
//! | macOS / iOS | `~/Library/Application Support/<namespace>/` |
//! | Linux | `~/.local/share/<namespace>/` |
//! | Windows | `C:\Users\<user>\AppData\Roaming\<namespace>\` |
//! | Android | App-internal storage (via `dirs`) |

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use crate::kv::KeyValueStore;
use crate::StorageError;

const DOCUMENT: &str = "storage.json";
const DOCUMENT_TMP: &str = "storage.json.tmp";

type Document = BTreeMap<String, String>;

/// Filesystem-backed KeyValueStore for desktop and mobile persistence.
#[derive(Clone, Debug)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: PathBuf) -> Self {
        Self { base }
    }

    /// Store rooted at `<data_dir>/<namespace>/`, or `./<namespace>/` when the
    /// platform has no data directory.
    pub fn for_namespace(namespace: &str) -> Self {
        let base = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(namespace);
        Self::new(base)
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    fn document_path(&self) -> PathBuf {
        self.base.join(DOCUMENT)
    }

    fn load(&self) -> Result<Document, StorageError> {
        let path = self.document_path();
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Document::new()),
            Err(e) => return Err(StorageError::io(path, e)),
        };
        if raw.trim().is_empty() {
            return Ok(Document::new());
        }
        serde_json::from_str(&raw).map_err(|e| StorageError::corrupt(DOCUMENT, e))
    }

    fn save(&self, document: &Document) -> Result<(), StorageError> {
        std::fs::create_dir_all(&self.base).map_err(|e| StorageError::io(&self.base, e))?;

        let raw = serde_json::to_string(document).map_err(|e| StorageError::corrupt(DOCUMENT, e))?;
        let tmp = self.base.join(DOCUMENT_TMP);
        std::fs::write(&tmp, raw).map_err(|e| StorageError::io(&tmp, e))?;

        let path = self.document_path();
        std::fs::rename(&tmp, &path).map_err(|e| StorageError::io(path, e))
    }
}

impl KeyValueStore for FileStore {
    async fn multi_get(&self, keys: &[&str]) -> Result<Vec<Option<String>>, StorageError> {
        let document = self.load()?;
        Ok(keys.iter().map(|key| document.get(*key).cloned()).collect())
    }

    async fn multi_set(&self, entries: &[(&str, &str)]) -> Result<(), StorageError> {
        let mut document = self.load()?;
        for (key, value) in entries {
            document.insert((*key).to_string(), (*value).to_string());
        }
        tracing::trace!(path = %self.document_path().display(), keys = entries.len(), "storage write");
        self.save(&document)
    }

    async fn multi_remove(&self, keys: &[&str]) -> Result<(), StorageError> {
        let mut document = self.load()?;
        let before = document.len();
        for key in keys {
            document.remove(*key);
        }
        // Nothing stored under these keys: leave the disk untouched.
        if document.len() == before {
            return Ok(());
        }
        self.save(&document)
    }
}
