//! Typed entities stored as flat records.
//!
//! Every entity round-trips through [`crate::core::Record`] via serde; the
//! store itself enforces no schema and no referential integrity.

mod client;
mod product;
mod project;
mod template;
mod user;

pub use client::{ClientRecord, ClientStatus, PlanTier};
pub use product::Product;
pub use project::{Priority, Project, ProjectStatus, Task};
pub use template::Template;
pub use user::{User, UserPatch, UserRole};
