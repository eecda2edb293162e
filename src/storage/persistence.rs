//! Durable local key-value store backing the in-memory record sets.
//!
//! One JSON entry per record-set key. Loads fall back to a default on
//! missing or corrupt entries; saves are best-effort and never propagate
//! failures to the caller. Writes go through a temp file and a rename so a
//! crashed write cannot truncate an existing entry.

use crate::core::{Result, StoreError};
use log::{error, warn};
use serde::Serialize;
use serde::de::DeserializeOwned;
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct DurableStore {
    root: Option<PathBuf>,
}

impl DurableStore {
    /// Opens the store rooted at `root`, creating the directory when needed.
    pub fn open<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref().to_path_buf();
        fs::create_dir_all(&root)
            .map_err(|e| StoreError::Io(format!("failed to create data directory: {e}")))?;
        Ok(Self { root: Some(root) })
    }

    /// A store that keeps nothing; every load yields its default. Used for
    /// ephemeral stores in tests and previews.
    pub fn disabled() -> Self {
        Self { root: None }
    }

    pub fn is_enabled(&self) -> bool {
        self.root.is_some()
    }

    fn entry_path(&self, key: &str) -> Option<PathBuf> {
        self.root.as_ref().map(|root| root.join(format!("{key}.json")))
    }

    /// Returns the stored value for `key`, or `default` when the entry is
    /// absent or corrupt. Corrupt entries are logged and treated as missing.
    pub fn load<T: DeserializeOwned>(&self, key: &str, default: T) -> T {
        match self.try_load(key) {
            Ok(Some(value)) => value,
            Ok(None) => default,
            Err(err) => {
                warn!("discarding corrupt entry '{key}': {err}");
                default
            }
        }
    }

    fn try_load<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>> {
        let Some(path) = self.entry_path(key) else {
            return Ok(None);
        };
        if !path.exists() {
            return Ok(None);
        }
        let bytes = fs::read(&path).map_err(|e| StoreError::Io(e.to_string()))?;
        Ok(Some(serde_json::from_slice(&bytes)?))
    }

    /// Serializes `value` and writes it under `key`. Failures are logged and
    /// swallowed; persistence is best-effort by contract.
    pub fn save<T: Serialize>(&self, key: &str, value: &T) {
        if let Err(err) = self.try_save(key, value) {
            error!("failed to persist entry '{key}': {err}");
        }
    }

    fn try_save<T: Serialize>(&self, key: &str, value: &T) -> Result<()> {
        let Some(path) = self.entry_path(key) else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(value)?;
        write_atomic(&path, &bytes)
    }

    /// Removes the entry for `key`, if present.
    pub fn remove(&self, key: &str) {
        let Some(path) = self.entry_path(key) else {
            return;
        };
        if path.exists() {
            if let Err(err) = fs::remove_file(&path) {
                warn!("failed to remove entry '{key}': {err}");
            }
        }
    }
}

fn write_atomic(path: &Path, bytes: &[u8]) -> Result<()> {
    let temp_path = path.with_extension("tmp");
    let file = File::create(&temp_path)
        .map_err(|e| StoreError::Io(format!("failed to create temp file: {e}")))?;
    let mut writer = BufWriter::new(file);
    writer
        .write_all(bytes)
        .map_err(|e| StoreError::Io(format!("failed to write entry: {e}")))?;
    writer
        .flush()
        .map_err(|e| StoreError::Io(format!("failed to flush entry: {e}")))?;
    writer
        .get_mut()
        .sync_all()
        .map_err(|e| StoreError::Io(format!("failed to sync entry: {e}")))?;
    fs::rename(&temp_path, path)
        .map_err(|e| StoreError::Io(format!("failed to rename entry: {e}")))?;
    Ok(())
}
