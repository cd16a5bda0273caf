//! One-JSON-file-per-key store.

use super::OptionStore;
use crate::core::BlockwrightError;
use crate::utils::fs::atomic_write;
use serde_json::Value;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Stores each record as `<dir>/<key>.json`.
///
/// Keys are flattened into file names by percent-encoding every byte outside
/// `[A-Za-z0-9._-]` (`composition_report/7` is stored as
/// `composition_report%2F7.json`). The encoding is one-to-one, so two keys never
/// share a file. Writes are atomic, so a reader never observes a half-written
/// record.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    /// A store rooted at `dir`. The directory is created on first write.
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Root directory.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// File backing `key`.
    pub fn path_for(&self, key: &str) -> PathBuf {
        let mut name = String::with_capacity(key.len());
        for byte in key.bytes() {
            if byte.is_ascii_alphanumeric() || matches!(byte, b'.' | b'_' | b'-') {
                name.push(char::from(byte));
            } else {
                name.push_str(&format!("%{byte:02X}"));
            }
        }
        self.dir.join(format!("{name}.json"))
    }
}

impl OptionStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, BlockwrightError> {
        let path = self.path_for(key);
        let text = match std::fs::read_to_string(&path) {
            Ok(text) => text,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => {
                return Err(BlockwrightError::StoreReadError {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
            }
        };

        serde_json::from_str(&text).map(Some).map_err(|e| BlockwrightError::StoreReadError {
            key: key.to_string(),
            reason: e.to_string(),
        })
    }

    fn set(&self, key: &str, value: Value) -> Result<(), BlockwrightError> {
        let path = self.path_for(key);
        let write_error = |reason: String| BlockwrightError::StoreWriteError {
            key: key.to_string(),
            reason,
        };

        let bytes = serde_json::to_vec_pretty(&value).map_err(|e| write_error(e.to_string()))?;
        atomic_write(&path, &bytes).map_err(|e| write_error(format!("{e:#}")))?;
        debug!("Stored {} at {}", key, path.display());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use tempfile::tempdir;

    #[test]
    fn test_round_trip_and_overwrite() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path().join(".blockwright"));

        assert_eq!(store.get("composition_report/7").unwrap(), None);

        store.set("composition_report/7", json!({"ok": false})).unwrap();
        store.set("composition_report/7", json!({"ok": true})).unwrap();

        assert_eq!(store.get("composition_report/7").unwrap(), Some(json!({"ok": true})));
        assert!(temp.path().join(".blockwright/composition_report%2F7.json").is_file());
    }

    #[test]
    fn test_key_flattening() {
        let store = JsonFileStore::new("/s");
        assert_eq!(store.path_for("a/b c"), PathBuf::from("/s/a%2Fb%20c.json"));
        assert_eq!(store.path_for("../x"), PathBuf::from("/s/..%2Fx.json"));
        assert_eq!(store.path_for("50%"), PathBuf::from("/s/50%25.json"));
    }

    #[test]
    fn test_similar_keys_do_not_share_a_file() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path());

        let pairs = [
            ("composition_report/blog/first", "composition_report/blog__first"),
            ("composition_report/a b", "composition_report/a_b"),
            ("composition_report/x%2Fy", "composition_report/x/y"),
        ];
        for (left, right) in pairs {
            assert_ne!(store.path_for(left), store.path_for(right));

            store.set(left, json!({"key": left})).unwrap();
            store.set(right, json!({"key": right})).unwrap();
            assert_eq!(store.get(left).unwrap(), Some(json!({"key": left})));
            assert_eq!(store.get(right).unwrap(), Some(json!({"key": right})));
        }
    }

    #[test]
    fn test_corrupt_record_is_read_error() {
        let temp = tempdir().unwrap();
        let store = JsonFileStore::new(temp.path());
        std::fs::write(store.path_for("k"), "{not json").unwrap();

        assert!(matches!(store.get("k"), Err(BlockwrightError::StoreReadError { .. })));
    }
}
