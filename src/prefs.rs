//! File-backed preference store.
//!
//! A flat JSON object on disk standing in for browser local storage. The
//! whole object is rewritten on every `set`; last write wins.

use anyhow::{Context, Result};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use portfolio_core::theme::{KeyValueStore, StoreError};

#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl JsonFileStore {
    /// Opens the store, treating a missing file as empty.
    pub fn open(path: &Path) -> Result<Self> {
        let entries = if path.exists() {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read preferences: {}", path.display()))?;
            if content.trim().is_empty() {
                BTreeMap::new()
            } else {
                serde_json::from_str(&content)
                    .with_context(|| format!("Failed to parse preferences: {}", path.display()))?
            }
        } else {
            BTreeMap::new()
        };
        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn write_entries(&self, entries: &BTreeMap<String, String>) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string_pretty(entries)?;
        std::fs::write(&self.path, json)?;
        Ok(())
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        // Only commit in memory once the file holds the new value.
        let mut next = self.entries.clone();
        next.insert(key.to_string(), value.to_string());
        self.write_entries(&next)
            .map_err(|e| StoreError(format!("{}: {:#}", self.path.display(), e)))?;
        self.entries = next;
        tracing::debug!(key, value, path = %self.path.display(), "preference saved");
        Ok(())
    }
}
