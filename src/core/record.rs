//! Schemaless record primitive shared by the store, the facade, and the
//! typed repositories.

use crate::core::{Result, StoreError};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::cmp::Ordering;
use std::ops::{Deref, DerefMut};
use uuid::Uuid;

/// A single flat record: a JSON object with free-form fields.
///
/// Records carry no schema and no referential integrity. Typed views live in
/// [`crate::model`] and round-trip through serde.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builds a record from any serializable value. The value must serialize
    /// to a JSON object.
    pub fn from_serialize<T: Serialize>(value: &T) -> Result<Self> {
        Self::from_value(serde_json::to_value(value)?)
    }

    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            other => Err(StoreError::Serialization(format!(
                "expected a JSON object, got {}",
                json_kind(&other)
            ))),
        }
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }

    /// Deserializes the record into a typed entity.
    pub fn decode<T: DeserializeOwned>(&self) -> Result<T> {
        serde_json::from_value(Value::Object(self.0.clone())).map_err(Into::into)
    }

    /// The record id, when present and textual.
    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    /// Assigns a generated id unless the record already carries a non-empty
    /// one.
    pub fn ensure_id(&mut self) {
        let missing = match self.0.get("id") {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.is_empty(),
            Some(_) => false,
        };
        if missing {
            self.0
                .insert("id".to_string(), Value::String(Uuid::new_v4().to_string()));
        }
    }

    /// Stamps `created_at` with the current UTC time unless already set.
    pub fn ensure_created_at(&mut self) {
        if matches!(self.0.get("created_at"), None | Some(Value::Null)) {
            self.0.insert(
                "created_at".to_string(),
                Value::String(Utc::now().to_rfc3339()),
            );
        }
    }

    /// Shallow merge: every field of `patch` replaces the field of the same
    /// name here, other fields stay untouched.
    pub fn merge(&mut self, patch: &Record) {
        for (key, value) in patch.iter() {
            self.0.insert(key.clone(), value.clone());
        }
    }

    /// Equality match on a single column. Absent columns never match.
    pub fn matches(&self, column: &str, value: &Value) -> bool {
        self.0.get(column) == Some(value)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}

impl Deref for Record {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl DerefMut for Record {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.0
    }
}

/// Ordering over scalar JSON values used by the `order`/`gte` filters.
///
/// Numbers compare numerically, strings lexicographically (RFC 3339
/// timestamps therefore order chronologically), booleans false-before-true.
/// Null sorts before everything; mismatched kinds compare as equal.
pub fn compare_values(a: &Value, b: &Value) -> Ordering {
    match (a, b) {
        (Value::Null, Value::Null) => Ordering::Equal,
        (Value::Null, _) => Ordering::Less,
        (_, Value::Null) => Ordering::Greater,
        (Value::Number(x), Value::Number(y)) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Value::String(x), Value::String(y)) => x.cmp(y),
        (Value::Bool(x), Value::Bool(y)) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
