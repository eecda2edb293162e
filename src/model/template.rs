use serde::{Deserialize, Serialize};

/// Read-only catalog entry. Seeded at startup, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Template {
    pub id: i64,
    pub title: String,
    pub category: String,
    pub image_url: String,
    #[serde(rename = "shortDesc")]
    pub short_desc: String,
    #[serde(rename = "fullDesc")]
    pub full_desc: String,
    pub features: Vec<String>,
    /// 0-100.
    pub popularity: u8,
}
