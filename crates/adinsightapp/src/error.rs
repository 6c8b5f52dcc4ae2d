use crate::model::Id;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AdinsightError {
    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Entry not found: {0}")]
    EntryNotFound(Id),

    #[error("Malformed snapshot: {0}")]
    MalformedSnapshot(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Spreadsheet error: {0}")]
    Sheet(String),

    #[error("Api Error: {0}")]
    Api(String),
}

pub type Result<T> = std::result::Result<T, AdinsightError>;
