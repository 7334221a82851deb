use crate::model::EntryId;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ShelfError {
    #[error("Entry not found: {0}")]
    NotFound(EntryId),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Store error: {0}")]
    Store(String),

    #[error("Invalid score {0}: ratings must be between 1 and 5")]
    InvalidScore(i64),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// An accessor was used outside of any scope that installed the value.
    #[error("No provider installed for {0}; call context::provide first")]
    MissingProvider(&'static str),

    #[error("Config error: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, ShelfError>;
