use crate::core::{Record, Result, StoreError};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Named in-memory record sets with per-set locks.
///
/// Each set is the authoritative copy of one logical table; the durable
/// mirror is written by the layer above after every mutation.
pub struct RecordSets {
    sets: HashMap<String, Arc<RwLock<Vec<Record>>>>,
}

impl RecordSets {
    pub fn new() -> Self {
        Self {
            sets: HashMap::new(),
        }
    }

    /// Registers a set with its initial records. The first registration of a
    /// name wins.
    pub fn register(&mut self, name: &str, records: Vec<Record>) {
        self.sets
            .entry(name.to_string())
            .or_insert_with(|| Arc::new(RwLock::new(records)));
    }

    fn handle(&self, name: &str) -> Result<Arc<RwLock<Vec<Record>>>> {
        self.sets
            .get(name)
            .cloned()
            .ok_or_else(|| StoreError::TableNotFound(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.sets.contains_key(name)
    }

    pub fn set_names(&self) -> Vec<String> {
        self.sets.keys().cloned().collect()
    }

    /// Full copy of a set, newest first.
    pub async fn scan(&self, name: &str) -> Result<Vec<Record>> {
        let handle = self.handle(name)?;
        let rows = handle.read().await;
        Ok(rows.clone())
    }

    pub async fn row_count(&self, name: &str) -> Result<usize> {
        let handle = self.handle(name)?;
        let rows = handle.read().await;
        Ok(rows.len())
    }

    /// Prepends the record; newest records sit at the front.
    pub async fn insert_front(&self, name: &str, record: Record) -> Result<()> {
        let handle = self.handle(name)?;
        let mut rows = handle.write().await;
        rows.insert(0, record);
        Ok(())
    }

    /// Shallow-merges `patch` onto the first record with the given id.
    /// Returns false when no record matches.
    pub async fn merge_by_id(&self, name: &str, id: &str, patch: &Record) -> Result<bool> {
        let handle = self.handle(name)?;
        let mut rows = handle.write().await;
        match rows.iter_mut().find(|r| r.id() == Some(id)) {
            Some(row) => {
                row.merge(patch);
                Ok(true)
            }
            None => Ok(false),
        }
    }

    /// Removes every record with the given id; returns how many went away.
    pub async fn remove_by_id(&self, name: &str, id: &str) -> Result<usize> {
        let handle = self.handle(name)?;
        let mut rows = handle.write().await;
        let before = rows.len();
        rows.retain(|r| r.id() != Some(id));
        Ok(before - rows.len())
    }

    /// First record where `column` equals `value`.
    pub async fn find_by_field(
        &self,
        name: &str,
        column: &str,
        value: &Value,
    ) -> Result<Option<Record>> {
        let handle = self.handle(name)?;
        let rows = handle.read().await;
        Ok(rows.iter().find(|r| r.matches(column, value)).cloned())
    }
}

impl Default for RecordSets {
    fn default() -> Self {
        Self::new()
    }
}
