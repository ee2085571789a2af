//! Error types for the page glue
//!
//! The animation components never fail; their guards return `None`. These
//! errors come from storage, persisted JSON and configuration.

use thiserror::Error;

pub type Result<T> = std::result::Result<T, FolioError>;

#[derive(Error, Debug)]
pub enum FolioError {
    #[error("Storage unavailable: {message}")]
    StorageUnavailable { message: String },

    #[error("Failed to write {key} to storage: {message}")]
    StorageWrite { key: String, message: String },

    #[error("Stored value for {key} is not valid JSON: {source}")]
    CorruptRecord {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Invalid configuration: {0}")]
    InvalidConfig(#[from] serde_json::Error),
}
