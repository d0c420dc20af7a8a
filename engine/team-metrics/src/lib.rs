//! # Team Metrics
//!
//! Attributes shared alliance scores to individual teams and folds a team's
//! match history into a performance profile.
//!
//! Upstream data only reports alliance-wide totals for most scoring, so the
//! per-team numbers produced here are estimates built from a small set of
//! heuristics (equal coral split in auto, activity-weighted teleop split and a
//! fixed endgame point table).

pub mod calculator;
pub mod classifier;
pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod stats;



pub use calculator::{
    AutoAttributor, AutoEstimate, EndgameAttributor, EndgameEstimate, PhaseAttributor,
    TeleopAttributor, TeleopEstimate,
};
pub use classifier::{AllianceSeatClassifier, MatchClassifier, SeatAssignment};
pub use config::{EndgamePointTable, MetricsConfig, ProcessingConfig, ScoringConfig};
pub use engine::{MatchAttribution, PerformanceAggregator};
pub use error::{MetricsError, Result};
pub use models::*;

/// Current version of the metrics engine
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Points credited to a robot that leaves its starting line in auto
pub const DEFAULT_MOBILITY_POINTS: f64 = 3.0;

/// Teleop activity weight for a robot that crossed the auto line
pub const DEFAULT_ACTIVE_WEIGHT: f64 = 1.0;

/// Teleop activity weight for a robot that did not cross the auto line
pub const DEFAULT_INACTIVE_WEIGHT: f64 = 0.7;
