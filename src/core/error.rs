use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Table '{0}' not found")]
    TableNotFound(String),

    #[error("Table '{0}' is read-only")]
    ReadOnlyTable(String),

    #[error("Record '{id}' not found in table '{table}'")]
    RecordNotFound { table: String, id: String },

    #[error("Filter on column '{0}' is not supported; only 'id' equality is accepted")]
    UnsupportedFilter(String),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("No active session")]
    NoSession,

    #[error("Serialization error: {0}")]
    Serialization(String),

    #[error("I/O error: {0}")]
    Io(String),
}

pub type Result<T> = std::result::Result<T, StoreError>;

impl From<serde_json::Error> for StoreError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}
