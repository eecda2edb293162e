use crate::core::Result;
use crate::facade::StoreCore;
use crate::model::{ClientRecord, ClientStatus, PlanTier};
use crate::repo::{RepoCore, Repository};
use crate::storage::catalog;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the client/team set.
pub struct ClientRepository {
    inner: RepoCore<ClientRecord>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewClient {
    pub name: String,
    pub email: String,
    pub company: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    pub status: ClientStatus,
    pub plan: PlanTier,
    pub projects_count: i64,
}

/// Unset fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ClientPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub salary: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ClientStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<PlanTier>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projects_count: Option<i64>,
}

impl ClientRepository {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self {
            inner: RepoCore::new(core, catalog::CLIENTS),
        }
    }

    pub async fn active(&self) -> Result<Vec<ClientRecord>> {
        let all = self.inner.list().await?;
        Ok(all
            .into_iter()
            .filter(|c| c.status == ClientStatus::Active)
            .collect())
    }
}

#[async_trait]
impl Repository for ClientRepository {
    type Entity = ClientRecord;
    type New = NewClient;
    type Patch = ClientPatch;

    async fn list(&self) -> Result<Vec<ClientRecord>> {
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> Result<Option<ClientRecord>> {
        self.inner.get(id).await
    }

    async fn insert(&self, new: NewClient) -> Result<ClientRecord> {
        self.inner.insert(&new).await
    }

    async fn update(&self, id: &str, patch: ClientPatch) -> Result<ClientRecord> {
        self.inner.update(id, &patch).await
    }

    async fn delete(&self, id: &str) -> Result<usize> {
        self.inner.delete(id).await
    }
}
