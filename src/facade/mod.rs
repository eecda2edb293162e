mod client;
mod query;
mod response;

pub use client::StoreClient;
pub(crate) use client::StoreCore;
pub use query::{DeleteBuilder, EqFilter, OrderedQuery, RangeFilter, TableQuery, UpdateBuilder};
pub use response::{DeleteResponse, QueryResponse, RowResponse, RowsResponse};
