//! Key-value persistence for engine reports.
//!
//! Reports are opaque JSON records stored under string keys, last writer wins.
//! The engine only ever reads and overwrites whole records; there is no merging,
//! versioning, or locking.
//!
//! Two implementations are provided:
//!
//! - [`MemoryStore`] for tests and embedding
//! - [`JsonFileStore`] writing one JSON file per key, used by the CLI

mod file;

pub use file::JsonFileStore;

use crate::core::BlockwrightError;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Mutex;

/// Key of the persisted composition report for `page_id`.
pub fn composition_report_key(page_id: &str) -> String {
    format!("composition_report/{page_id}")
}

/// Key of the global mining report.
pub const MINING_REPORT_KEY: &str = "auto_patterns_report";

/// Get/set access to persisted records.
pub trait OptionStore: Send + Sync {
    /// The record stored under `key`, if any.
    fn get(&self, key: &str) -> Result<Option<Value>, BlockwrightError>;

    /// Replace the record stored under `key`.
    fn set(&self, key: &str, value: Value) -> Result<(), BlockwrightError>;
}

/// Serialize `record` and store it under `key`.
pub fn save_record<T: Serialize>(
    store: &dyn OptionStore,
    key: &str,
    record: &T,
) -> Result<(), BlockwrightError> {
    let value = serde_json::to_value(record).map_err(|e| BlockwrightError::StoreWriteError {
        key: key.to_string(),
        reason: e.to_string(),
    })?;
    store.set(key, value)
}

/// Load and decode the record under `key`. `Ok(None)` when nothing is stored.
pub fn load_record<T: DeserializeOwned>(
    store: &dyn OptionStore,
    key: &str,
) -> Result<Option<T>, BlockwrightError> {
    let Some(value) = store.get(key)? else {
        return Ok(None);
    };
    serde_json::from_value(value)
        .map(Some)
        .map_err(|e| BlockwrightError::StoreReadError {
            key: key.to_string(),
            reason: e.to_string(),
        })
}

/// In-process store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    records: Mutex<HashMap<String, Value>>,
}

impl MemoryStore {
    /// An empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().map(|records| records.len()).unwrap_or(0)
    }

    /// Whether nothing is stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OptionStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, BlockwrightError> {
        let records = self.records.lock().map_err(|e| BlockwrightError::StoreReadError {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        Ok(records.get(key).cloned())
    }

    fn set(&self, key: &str, value: Value) -> Result<(), BlockwrightError> {
        let mut records = self.records.lock().map_err(|e| BlockwrightError::StoreWriteError {
            key: key.to_string(),
            reason: e.to_string(),
        })?;
        records.insert(key.to_string(), value);
        Ok(())
    }
}
