//! Error types for match sources

use std::path::PathBuf;
use thiserror::Error;

/// Result type for match source operations
pub type Result<T> = std::result::Result<T, SourceError>;

/// Errors that can occur while loading match data
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("I/O error reading {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed match JSON in {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No match data for event {0}")]
    EventNotFound(String),

    #[error("No match data for any {0} event")]
    SeasonNotFound(i32),
}
