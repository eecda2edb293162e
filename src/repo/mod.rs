//! Typed repositories.
//!
//! Compile-time-safe alternative to the chainable facade: one repository
//! per entity, each speaking `Result` instead of `{data, error}` envelopes.
//! Repositories share the store core with the facade, so both surfaces see
//! the same data; they skip the facade's simulated latency.

use crate::core::{Record, Result, StoreError};
use crate::facade::StoreCore;
use async_trait::async_trait;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::marker::PhantomData;
use std::sync::Arc;

mod clients;
mod products;
mod projects;

pub use clients::{ClientPatch, ClientRepository, NewClient};
pub use products::{NewProduct, ProductPatch, ProductRepository};
pub use projects::{NewProject, ProjectPatch, ProjectRepository};

/// Record-backed CRUD surface shared by every repository.
#[async_trait]
pub trait Repository: Send + Sync {
    type Entity: Send;
    type New: Send;
    type Patch: Send;

    /// All entities, newest first.
    async fn list(&self) -> Result<Vec<Self::Entity>>;

    async fn get(&self, id: &str) -> Result<Option<Self::Entity>>;

    /// Stores a new entity; id and creation timestamp are assigned by the
    /// store.
    async fn insert(&self, new: Self::New) -> Result<Self::Entity>;

    /// Shallow-merges the patch onto the entity with the given id and
    /// returns the merged entity. A miss is a not-found error.
    async fn update(&self, id: &str, patch: Self::Patch) -> Result<Self::Entity>;

    /// Removes the entity; returns how many records went away. Absent ids
    /// remove nothing and are not an error.
    async fn delete(&self, id: &str) -> Result<usize>;
}

// Shared plumbing: serde round-trip between typed entities and records.
pub(crate) struct RepoCore<T> {
    core: Arc<StoreCore>,
    table: &'static str,
    _marker: PhantomData<fn() -> T>,
}

impl<T: Serialize + DeserializeOwned> RepoCore<T> {
    pub(crate) fn new(core: Arc<StoreCore>, table: &'static str) -> Self {
        Self {
            core,
            table,
            _marker: PhantomData,
        }
    }

    pub(crate) async fn list(&self) -> Result<Vec<T>> {
        let rows = self.core.select_records(self.table).await?;
        rows.iter().map(Record::decode).collect()
    }

    pub(crate) async fn get(&self, id: &str) -> Result<Option<T>> {
        match self.find(id).await? {
            Some(record) => Ok(Some(record.decode()?)),
            None => Ok(None),
        }
    }

    pub(crate) async fn insert<N: Serialize>(&self, new: &N) -> Result<T> {
        let record = Record::from_serialize(new)?;
        let inserted = self.core.insert_record(self.table, vec![record]).await?;
        inserted.decode()
    }

    pub(crate) async fn update<P: Serialize>(&self, id: &str, patch: &P) -> Result<T> {
        let patch = Record::from_serialize(patch)?;
        self.core.update_record(self.table, id, &patch).await?;
        match self.find(id).await? {
            Some(record) => record.decode(),
            None => Err(StoreError::RecordNotFound {
                table: self.table.to_string(),
                id: id.to_string(),
            }),
        }
    }

    pub(crate) async fn delete(&self, id: &str) -> Result<usize> {
        self.core.delete_record(self.table, id).await
    }

    async fn find(&self, id: &str) -> Result<Option<Record>> {
        self.core
            .find_record(self.table, "id", &Value::String(id.to_string()))
            .await
    }
}
