//! Chainable query surface.
//!
//! Mirrors the call shape of a remote database client: `from(table)` then
//! `select` / `insert` / `update(..).eq(..)` / `delete().eq(..)`, plus the
//! filter entry points `eq`, `neq`, `gte`, and `order`. Every terminal
//! operation resolves to a `{data, error}` envelope after the configured
//! simulated latency; nothing here returns `Err`.

use crate::core::{Record, StoreError, compare_values};
use crate::facade::client::StoreCore;
use crate::facade::response::{DeleteResponse, QueryResponse, RowResponse, RowsResponse};
use serde_json::Value;
use std::cmp::Ordering;
use std::sync::Arc;

pub struct TableQuery {
    core: Arc<StoreCore>,
    table: String,
}

impl TableQuery {
    pub(crate) fn new(core: Arc<StoreCore>, table: &str) -> Self {
        Self {
            core,
            table: table.to_string(),
        }
    }

    /// Full contents of the table, newest first. Unknown tables yield an
    /// empty list, never an error.
    pub async fn select(&self) -> RowsResponse {
        self.core.simulate_latency().await;
        self.core.select_records(&self.table).await.into()
    }

    /// Same as [`TableQuery::select`]; the column list is accepted for
    /// call-site compatibility and ignored, full records always come back.
    pub async fn select_columns(&self, _columns: &str) -> RowsResponse {
        self.select().await
    }

    /// Inserts the first record of `records`; multi-row input is accepted
    /// but only the head is stored. Generates an id and stamps `created_at`
    /// when absent.
    pub async fn insert(&self, records: Vec<Record>) -> RowsResponse {
        self.core.simulate_latency().await;
        match self.core.insert_record(&self.table, records).await {
            Ok(inserted) => QueryResponse::ok(vec![inserted]),
            Err(err) => QueryResponse::err(err),
        }
    }

    /// Prepares a shallow-merge update; finalize with `.eq("id", ..)`.
    pub fn update(&self, patch: Record) -> UpdateBuilder {
        UpdateBuilder {
            core: self.core.clone(),
            table: self.table.clone(),
            patch,
        }
    }

    /// Prepares a deletion; finalize with `.eq("id", ..)`.
    pub fn delete(&self) -> DeleteBuilder {
        DeleteBuilder {
            core: self.core.clone(),
            table: self.table.clone(),
        }
    }

    /// Equality filter supporting `select`, `single`, and `delete`.
    pub fn eq(&self, column: &str, value: impl Into<Value>) -> EqFilter {
        EqFilter {
            core: self.core.clone(),
            table: self.table.clone(),
            column: column.to_string(),
            value: value.into(),
        }
    }

    /// Inequality filter; chain `.order(..)` and `.limit(..)`.
    pub fn neq(&self, column: &str, value: impl Into<Value>) -> RangeFilter {
        RangeFilter::new(self, column, value.into(), CompareOp::NotEqual)
    }

    /// Greater-or-equal filter; chain `.order(..)` and `.limit(..)`.
    pub fn gte(&self, column: &str, value: impl Into<Value>) -> RangeFilter {
        RangeFilter::new(self, column, value.into(), CompareOp::GreaterOrEqual)
    }

    /// Orders the whole table; chain `.limit(..)`.
    pub fn order(&self, column: &str, descending: bool) -> OrderedQuery {
        OrderedQuery {
            core: self.core.clone(),
            table: self.table.clone(),
            filter: None,
            order_column: column.to_string(),
            descending,
        }
    }
}

pub struct UpdateBuilder {
    core: Arc<StoreCore>,
    table: String,
    patch: Record,
}

impl UpdateBuilder {
    /// Applies the patch to the record whose `id` matches `value`. Only the
    /// `id` column is accepted; a miss is a not-found error. The patch
    /// itself is echoed back as the data row.
    pub async fn eq(self, column: &str, value: impl Into<Value>) -> RowsResponse {
        self.core.simulate_latency().await;
        if column != "id" {
            return QueryResponse::err(StoreError::UnsupportedFilter(column.to_string()));
        }
        let value = value.into();
        let Some(id) = value.as_str() else {
            return QueryResponse::err(StoreError::Validation(
                "id filter value must be a string".into(),
            ));
        };
        match self.core.update_record(&self.table, id, &self.patch).await {
            Ok(()) => QueryResponse::ok(vec![self.patch]),
            Err(err) => QueryResponse::err(err),
        }
    }
}

pub struct DeleteBuilder {
    core: Arc<StoreCore>,
    table: String,
}

impl DeleteBuilder {
    /// Removes every record with the matching id. Deleting an absent id is
    /// not an error.
    pub async fn eq(self, column: &str, value: impl Into<Value>) -> DeleteResponse {
        self.core.simulate_latency().await;
        delete_by_id(&self.core, &self.table, column, value.into()).await
    }
}

pub struct EqFilter {
    core: Arc<StoreCore>,
    table: String,
    column: String,
    value: Value,
}

impl EqFilter {
    /// First record whose column equals the value, without removing it.
    /// Finding nothing is not an error: data and error are both empty.
    pub async fn select(self) -> RowResponse {
        self.core.simulate_latency().await;
        match self
            .core
            .find_record(&self.table, &self.column, &self.value)
            .await
        {
            Ok(Some(record)) => QueryResponse::ok(record),
            Ok(None) => QueryResponse::empty(),
            Err(err) => QueryResponse::err(err),
        }
    }

    /// Alias of [`EqFilter::select`] mirroring the remote client's
    /// `.single()`.
    pub async fn single(self) -> RowResponse {
        self.select().await
    }

    /// Shortcut deletion by id.
    pub async fn delete(self) -> DeleteResponse {
        self.core.simulate_latency().await;
        delete_by_id(&self.core, &self.table, &self.column, self.value).await
    }
}

async fn delete_by_id(
    core: &Arc<StoreCore>,
    table: &str,
    column: &str,
    value: Value,
) -> DeleteResponse {
    if column != "id" {
        return DeleteResponse::err(StoreError::UnsupportedFilter(column.to_string()));
    }
    let Some(id) = value.as_str() else {
        return DeleteResponse::err(StoreError::Validation(
            "id filter value must be a string".into(),
        ));
    };
    match core.delete_record(table, id).await {
        Ok(_) => DeleteResponse::ok(),
        Err(err) => DeleteResponse::err(err),
    }
}

#[derive(Debug, Clone, Copy)]
enum CompareOp {
    NotEqual,
    GreaterOrEqual,
}

/// A comparison filter waiting for its ordering clause.
pub struct RangeFilter {
    core: Arc<StoreCore>,
    table: String,
    column: String,
    value: Value,
    op: CompareOp,
}

impl RangeFilter {
    fn new(query: &TableQuery, column: &str, value: Value, op: CompareOp) -> Self {
        Self {
            core: query.core.clone(),
            table: query.table.clone(),
            column: column.to_string(),
            value,
            op,
        }
    }

    pub fn order(self, column: &str, descending: bool) -> OrderedQuery {
        OrderedQuery {
            core: self.core,
            table: self.table,
            filter: Some((self.column, self.value, self.op)),
            order_column: column.to_string(),
            descending,
        }
    }
}

/// An ordered (optionally filtered) read waiting for its row cap.
pub struct OrderedQuery {
    core: Arc<StoreCore>,
    table: String,
    filter: Option<(String, Value, CompareOp)>,
    order_column: String,
    descending: bool,
}

impl OrderedQuery {
    /// At most `n` rows after filtering and ordering.
    pub async fn limit(self, n: usize) -> RowsResponse {
        self.core.simulate_latency().await;
        let rows = match self.core.select_records(&self.table).await {
            Ok(rows) => rows,
            Err(err) => return QueryResponse::err(err),
        };

        let mut rows: Vec<Record> = rows.into_iter().filter(|r| self.matches(r)).collect();
        rows.sort_by(|a, b| {
            let lhs = a.get(&self.order_column).unwrap_or(&Value::Null);
            let rhs = b.get(&self.order_column).unwrap_or(&Value::Null);
            let ord = compare_values(lhs, rhs);
            if self.descending { ord.reverse() } else { ord }
        });
        rows.truncate(n);
        QueryResponse::ok(rows)
    }

    fn matches(&self, record: &Record) -> bool {
        let Some((column, value, op)) = &self.filter else {
            return true;
        };
        let null = Value::Null;
        let field = record.get(column).unwrap_or(&null);
        match op {
            CompareOp::NotEqual => field != value,
            CompareOp::GreaterOrEqual => compare_values(field, value) != Ordering::Less,
        }
    }
}
