// ============================================================================
// Calendash Data Library
// ============================================================================

pub mod config;
pub mod core;
pub mod facade;
pub mod model;
pub mod optimistic;
pub mod repo;
pub mod session;
pub mod storage;
pub mod web;

// Re-export main types for convenience
pub use config::StoreConfig;
pub use core::{Record, Result, StoreError};
pub use facade::{
    DeleteResponse, QueryResponse, RowResponse, RowsResponse, StoreClient, TableQuery,
};
pub use optimistic::apply_optimistic;
pub use repo::{
    ClientRepository, NewClient, NewProduct, NewProject, ProductRepository, ProjectRepository,
    Repository,
};
pub use session::SessionManager;
