use crate::core::Result;
use crate::facade::StoreCore;
use crate::model::{Priority, Project, ProjectStatus, Task};
use crate::repo::{RepoCore, Repository};
use crate::storage::catalog;
use async_trait::async_trait;
use serde::Serialize;
use std::sync::Arc;

/// Typed access to the project/event set.
pub struct ProjectRepository {
    inner: RepoCore<Project>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewProject {
    pub name: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub status: ProjectStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub tasks: Vec<Task>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<String>,
}

impl NewProject {
    /// A scheduled event with just a name and category.
    pub fn scheduled(name: &str, kind: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: kind.to_string(),
            status: ProjectStatus::Scheduled,
            brief: None,
            content: None,
            priority: None,
            tasks: Vec::new(),
            attachments: Vec::new(),
        }
    }
}

/// Unset fields leave the stored value untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ProjectPatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ProjectStatus>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brief: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tasks: Option<Vec<Task>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub attachments: Option<Vec<String>>,
}

impl ProjectRepository {
    pub(crate) fn new(core: Arc<StoreCore>) -> Self {
        Self {
            inner: RepoCore::new(core, catalog::PROJECTS),
        }
    }

    /// Projects with the given lifecycle status, newest first.
    pub async fn by_status(&self, status: ProjectStatus) -> Result<Vec<Project>> {
        let all = self.inner.list().await?;
        Ok(all.into_iter().filter(|p| p.status == status).collect())
    }

    /// Upcoming work: everything still scheduled.
    pub async fn scheduled(&self) -> Result<Vec<Project>> {
        self.by_status(ProjectStatus::Scheduled).await
    }
}

#[async_trait]
impl Repository for ProjectRepository {
    type Entity = Project;
    type New = NewProject;
    type Patch = ProjectPatch;

    async fn list(&self) -> Result<Vec<Project>> {
        self.inner.list().await
    }

    async fn get(&self, id: &str) -> Result<Option<Project>> {
        self.inner.get(id).await
    }

    async fn insert(&self, new: NewProject) -> Result<Project> {
        self.inner.insert(&new).await
    }

    async fn update(&self, id: &str, patch: ProjectPatch) -> Result<Project> {
        self.inner.update(id, &patch).await
    }

    async fn delete(&self, id: &str) -> Result<usize> {
        self.inner.delete(id).await
    }
}
