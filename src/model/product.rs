use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Inventory item. Stock never going negative is a caller-side concern; the
/// store does not enforce it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub cost_price: f64,
    pub sale_price: f64,
    pub current_stock: i64,
    pub min_stock: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Stock at or below the minimum threshold.
    pub fn needs_restock(&self) -> bool {
        self.current_stock <= self.min_stock
    }

    pub fn margin(&self) -> f64 {
        self.sale_price - self.cost_price
    }
}
