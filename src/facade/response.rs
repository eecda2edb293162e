//! Result envelopes returned by the query facade.
//!
//! The facade never surfaces `Err`: every operation resolves to an envelope
//! carrying either data or a store error, and callers branch on the fields.

use crate::core::{Record, StoreError};

#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse<T> {
    pub data: Option<T>,
    pub error: Option<StoreError>,
}

impl<T> QueryResponse<T> {
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    pub fn err(error: StoreError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    /// No match and no failure, e.g. a filtered read that found nothing.
    pub fn empty() -> Self {
        Self {
            data: None,
            error: None,
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    pub fn into_data(self) -> Option<T> {
        self.data
    }
}

impl<T> From<crate::core::Result<T>> for QueryResponse<T> {
    fn from(result: crate::core::Result<T>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(error) => Self::err(error),
        }
    }
}

/// Rows returned by `select`, `insert`, and ordered reads.
pub type RowsResponse = QueryResponse<Vec<Record>>;

/// A single optional row from `.select()`/`.single()` on an `eq` filter.
pub type RowResponse = QueryResponse<Record>;

/// Deletion outcome. Deletes never report not-found.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DeleteResponse {
    pub error: Option<StoreError>,
}

impl DeleteResponse {
    pub fn ok() -> Self {
        Self { error: None }
    }

    pub fn err(error: StoreError) -> Self {
        Self { error: Some(error) }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}
