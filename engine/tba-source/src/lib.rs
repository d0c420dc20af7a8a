//! TBA Source
//!
//! Loads The Blue Alliance match data, maps it onto `team-metrics` match
//! records and produces team performance reports.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod mapper;
pub mod models;
pub mod source;

pub use config::{LoggingConfig, ReportConfig, SourceConfig};
pub use error::{Result, SourceError};
pub use logging::initialize_logging;
pub use mapper::{map_match, map_matches, team_key};
pub use models::*;
pub use source::{JsonFileSource, MatchSource};
