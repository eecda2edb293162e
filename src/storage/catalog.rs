//! Storage keys, table-name resolution, and read-only seed data.

use crate::core::Record;
use crate::model::{Template, User, UserRole};
use serde_json::{Value, json};

/// Durable entry keys, one per record set plus the session. The `_v1`
/// suffix is the only versioning the layout has; a shape change means a new
/// key or silent tolerance of missing fields.
pub mod keys {
    pub const USER: &str = "calendash_user_v1";
    pub const PROJECTS: &str = "calendash_projects_v1";
    pub const PRODUCTS: &str = "calendash_products_v1";
    pub const CLIENTS: &str = "calendash_clients_v1";
}

/// Canonical mutable record-set names.
pub const PROJECTS: &str = "projects";
pub const PRODUCTS: &str = "products";
pub const CLIENTS: &str = "clients";

/// Read-only tables served from seed or derived data.
pub const TEMPLATES: &str = "templates";
pub const TRANSACTIONS: &str = "transactions";

/// Mutable sets paired with their durable keys.
pub const SET_KEYS: [(&str, &str); 3] = [
    (PROJECTS, keys::PROJECTS),
    (PRODUCTS, keys::PRODUCTS),
    (CLIENTS, keys::CLIENTS),
];

/// Fictitious income booked per project by the derived transactions view.
pub const PROJECT_INCOME_AMOUNT: f64 = 1500.0;

/// Maps a facade table name to its canonical record set. `events` is an
/// alias for `projects`.
pub fn resolve_set(table: &str) -> Option<&'static str> {
    match table {
        "projects" | "events" => Some(PROJECTS),
        "products" => Some(PRODUCTS),
        "clients" => Some(CLIENTS),
        _ => None,
    }
}

pub fn durable_key(set: &str) -> Option<&'static str> {
    SET_KEYS
        .iter()
        .find(|(name, _)| *name == set)
        .map(|(_, key)| *key)
}

/// The account used when no session was ever stored.
pub fn default_user() -> User {
    User {
        id: "user-123".to_string(),
        email: "admin@calendash.com".to_string(),
        name: "Gestor".to_string(),
        role: UserRole::Admin,
        avatar_url: None,
        company: None,
        phone: None,
        department: Some("Geral".to_string()),
    }
}

/// The static template catalog. Seeded at startup, never mutated.
pub fn template_catalog() -> Vec<Template> {
    vec![
        Template {
            id: 1,
            title: "Calendário Editorial".to_string(),
            category: "Marketing".to_string(),
            image_url: "https://images.unsplash.com/photo-1611162617474-5b21e879e113".to_string(),
            short_desc: "Organize posts e stories.".to_string(),
            full_desc: "Ideal para gestores.".to_string(),
            features: vec!["Planejador".to_string(), "Status".to_string()],
            popularity: 98,
        },
        Template {
            id: 2,
            title: "Gestão Financeira".to_string(),
            category: "Negócios".to_string(),
            image_url: "https://images.unsplash.com/photo-1554224155-9844c6ef315a".to_string(),
            short_desc: "Controle de fluxo de caixa.".to_string(),
            full_desc: "Planilha completa.".to_string(),
            features: vec!["Entradas".to_string(), "Saídas".to_string()],
            popularity: 85,
        },
    ]
}

/// Template catalog as facade records.
pub fn template_catalog_records() -> Vec<Record> {
    template_catalog()
        .iter()
        .filter_map(|t| Record::from_serialize(t).ok())
        .collect()
}

/// Income view synthesized from the project set, one row per project.
pub fn derive_transactions(projects: &[Record]) -> Vec<Record> {
    projects
        .iter()
        .map(|project| {
            let mut row = Record::new();
            row.insert(
                "id".to_string(),
                project.get("id").cloned().unwrap_or(Value::Null),
            );
            row.insert("amount".to_string(), json!(PROJECT_INCOME_AMOUNT));
            row.insert("type".to_string(), json!("income"));
            row.insert("category".to_string(), json!("Venda de Projeto"));
            row.insert(
                "date".to_string(),
                project.get("created_at").cloned().unwrap_or(Value::Null),
            );
            row
        })
        .collect()
}
