use crate::config::StoreConfig;
use crate::core::{Record, Result, StoreError};
use crate::facade::query::TableQuery;
use crate::repo::{ClientRepository, ProductRepository, ProjectRepository};
use crate::session::SessionManager;
use crate::storage::{DurableStore, RecordSets, catalog};
use log::warn;
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

/// Entry point to the record store.
///
/// Owns the in-memory record sets, the durable store mirroring them, and the
/// current session. Construct once at application start and share by
/// cloning; clones refer to the same store.
///
/// # Examples
///
/// ```
/// use calendash::{Record, StoreClient};
///
/// # tokio_test::block_on(async {
/// let store = StoreClient::ephemeral();
///
/// let record = Record::from_value(serde_json::json!({
///     "name": "Kickoff",
///     "type": "Reunião",
///     "status": "scheduled"
/// })).unwrap();
///
/// let inserted = store.from("projects").insert(vec![record]).await;
/// assert!(inserted.is_ok());
///
/// let all = store.from("projects").select().await;
/// assert_eq!(all.data.unwrap().len(), 1);
/// # });
/// ```
#[derive(Clone)]
pub struct StoreClient {
    core: Arc<StoreCore>,
}

impl std::fmt::Debug for StoreClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreClient").finish_non_exhaustive()
    }
}

impl StoreClient {
    /// Opens the store, loading every record set and the stored session from
    /// the configured data directory.
    pub fn open(config: StoreConfig) -> Result<Self> {
        config.validate().map_err(StoreError::Validation)?;
        let durable = match &config.data_dir {
            Some(dir) => DurableStore::open(dir)?,
            None => DurableStore::disabled(),
        };
        Ok(Self::bootstrap(durable, config.simulated_latency))
    }

    /// An in-memory store with no durable backing and no simulated latency.
    pub fn ephemeral() -> Self {
        Self::bootstrap(DurableStore::disabled(), Duration::ZERO)
    }

    fn bootstrap(durable: DurableStore, latency: Duration) -> Self {
        let mut sets = RecordSets::new();
        for (set, key) in catalog::SET_KEYS {
            let records: Vec<Record> = durable.load(key, Vec::new());
            sets.register(set, records);
        }

        let session = SessionManager::load(durable.clone(), latency);

        Self {
            core: Arc::new(StoreCore {
                sets,
                durable,
                templates: catalog::template_catalog_records(),
                session,
                latency,
            }),
        }
    }

    /// Starts a query against `table`, mirroring a remote client's `from`.
    pub fn from(&self, table: &str) -> TableQuery {
        TableQuery::new(self.core.clone(), table)
    }

    /// Session operations: sign-in/out, current user, profile updates.
    pub fn auth(&self) -> &SessionManager {
        &self.core.session
    }

    /// Typed repository over the project set.
    pub fn projects(&self) -> ProjectRepository {
        ProjectRepository::new(self.core.clone())
    }

    /// Typed repository over the product set.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.core.clone())
    }

    /// Typed repository over the client set.
    pub fn clients(&self) -> ClientRepository {
        ClientRepository::new(self.core.clone())
    }
}

/// Shared state behind every facade query and repository.
pub struct StoreCore {
    sets: RecordSets,
    durable: DurableStore,
    templates: Vec<Record>,
    session: SessionManager,
    latency: Duration,
}

impl StoreCore {
    pub(crate) async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
    }

    /// Full contents of a table. Read-only tables serve seed or derived
    /// data; unknown tables yield an empty list.
    pub(crate) async fn select_records(&self, table: &str) -> Result<Vec<Record>> {
        if let Some(set) = catalog::resolve_set(table) {
            return self.sets.scan(set).await;
        }
        match table {
            catalog::TEMPLATES => Ok(self.templates.clone()),
            catalog::TRANSACTIONS => {
                let projects = self.sets.scan(catalog::PROJECTS).await?;
                Ok(catalog::derive_transactions(&projects))
            }
            _ => Ok(Vec::new()),
        }
    }

    /// Resolves a table for mutation. Read-only and unknown tables are
    /// rejected with typed errors.
    fn mutable_set(&self, table: &str) -> Result<&'static str> {
        if let Some(set) = catalog::resolve_set(table) {
            return Ok(set);
        }
        match table {
            catalog::TEMPLATES | catalog::TRANSACTIONS => {
                Err(StoreError::ReadOnlyTable(table.to_string()))
            }
            _ => Err(StoreError::TableNotFound(table.to_string())),
        }
    }

    // Mirror the whole set to durable storage; every mutation ends here
    // before its result is returned.
    async fn persist(&self, set: &'static str) {
        let Some(key) = catalog::durable_key(set) else {
            return;
        };
        match self.sets.scan(set).await {
            Ok(rows) => self.durable.save(key, &rows),
            Err(err) => warn!("skipping persist of '{set}': {err}"),
        }
    }

    /// Inserts the head of `records` (multi-row input is accepted, only the
    /// first record takes effect), stamping id and creation time when
    /// absent. Newest records sit at the front of the set.
    pub(crate) async fn insert_record(&self, table: &str, records: Vec<Record>) -> Result<Record> {
        let set = self.mutable_set(table)?;
        let mut record = records
            .into_iter()
            .next()
            .ok_or_else(|| StoreError::Validation("insert requires at least one record".into()))?;
        record.ensure_id();
        record.ensure_created_at();
        self.sets.insert_front(set, record.clone()).await?;
        self.persist(set).await;
        Ok(record)
    }

    /// Shallow-merges `patch` onto the record with the given id. A miss is a
    /// typed not-found error.
    pub(crate) async fn update_record(&self, table: &str, id: &str, patch: &Record) -> Result<()> {
        let set = self.mutable_set(table)?;
        if !self.sets.merge_by_id(set, id, patch).await? {
            return Err(StoreError::RecordNotFound {
                table: table.to_string(),
                id: id.to_string(),
            });
        }
        self.persist(set).await;
        Ok(())
    }

    /// Removes every record with the given id; returns how many went away.
    /// Deleting an absent id removes nothing and is not an error.
    pub(crate) async fn delete_record(&self, table: &str, id: &str) -> Result<usize> {
        let set = self.mutable_set(table)?;
        let removed = self.sets.remove_by_id(set, id).await?;
        if removed > 0 {
            self.persist(set).await;
        }
        Ok(removed)
    }

    /// First record of `table` where `column` equals `value`.
    pub(crate) async fn find_record(
        &self,
        table: &str,
        column: &str,
        value: &Value,
    ) -> Result<Option<Record>> {
        if let Some(set) = catalog::resolve_set(table) {
            return self.sets.find_by_field(set, column, value).await;
        }
        let rows = self.select_records(table).await?;
        Ok(rows.into_iter().find(|r| r.matches(column, value)))
    }
}
