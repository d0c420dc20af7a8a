//! Error types for the metrics engine
//!
//! Profile computation itself never fails; these cover configuration and the
//! batch thread pool.

use thiserror::Error;

/// Result type for metrics engine operations
pub type Result<T> = std::result::Result<T, MetricsError>;

/// Errors that can occur around the metrics engine
#[derive(Error, Debug)]
pub enum MetricsError {
    #[error("Failed to read configuration file: {0}")]
    ConfigIo(#[from] std::io::Error),

    #[error("Failed to parse configuration: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("Failed to serialize configuration: {0}")]
    ConfigSerialize(#[from] toml::ser::Error),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Failed to build thread pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}
