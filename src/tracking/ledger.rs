//! Persisted mapping from tracking key to last-seen version
//!
//! Stored as a pretty-printed JSON object. Insertion order is preserved so
//! diffs of the ledger file stay readable between runs.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use indexmap::IndexMap;
use serde::Serialize;
use tracing::{info, warn};

use crate::page::types::UpdateRecord;
use crate::tracking::compare::UNSEEN_VERSION;
use crate::tracking::error::LedgerError;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ledger {
    entries: IndexMap<String, String>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load the ledger at `path`.
    ///
    /// A missing or corrupt file yields an empty ledger; neither is fatal.
    pub fn load(path: &Path) -> Self {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                info!("Ledger {:?} not found, starting empty", path);
                return Self::new();
            }
            Err(e) => {
                warn!("Failed to read ledger {:?}: {}. Starting empty", path, e);
                return Self::new();
            }
        };

        match serde_json::from_str::<IndexMap<String, String>>(&content) {
            Ok(entries) => {
                info!("Loaded {} ledger entries from {:?}", entries.len(), path);
                Self { entries }
            }
            Err(e) => {
                warn!("Ledger {:?} is corrupt ({}), starting empty", path, e);
                Self::new()
            }
        }
    }

    /// Write the ledger to `path` as pretty-printed JSON.
    pub fn save(&self, path: &Path) -> Result<(), LedgerError> {
        write_json(path, &self.entries)?;
        info!("Saved {} ledger entries to {:?}", self.entries.len(), path);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Last recorded version for `key`, or [`UNSEEN_VERSION`].
    pub fn last_version(&self, key: &str) -> &str {
        self.get(key).unwrap_or(UNSEEN_VERSION)
    }

    pub fn record(&mut self, key: impl Into<String>, version: impl Into<String>) {
        self.entries.insert(key.into(), version.into());
    }

    /// Write each record's version under its tracking key. Later records win
    /// when two share a key.
    pub fn apply(&mut self, records: &[UpdateRecord]) {
        for record in records {
            self.record(&record.tracking_key, &record.version_for_tracking);
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Ledger {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Serialize `value` as pretty-printed JSON into `path`, keeping non-ASCII
/// text as-is.
pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), LedgerError> {
    let mut json = serde_json::to_string_pretty(value)?;
    json.push('\n');
    fs::write(path, json).map_err(|source| LedgerError::Io {
        path: path.display().to_string(),
        source,
    })
}
