//! Configuration for the metrics engine

use crate::error::{MetricsError, Result};
use crate::models::EndgameState;
use crate::{DEFAULT_ACTIVE_WEIGHT, DEFAULT_INACTIVE_WEIGHT, DEFAULT_MOBILITY_POINTS};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Configuration for the metrics engine
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct MetricsConfig {
    /// Attribution heuristics
    pub scoring: ScoringConfig,

    /// Batch processing
    pub processing: ProcessingConfig,
}

/// Constants used to attribute alliance scores to a single robot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoringConfig {
    /// Points credited for crossing the auto line
    pub mobility_points: f64,

    /// Teleop activity weight for a robot that crossed the auto line
    pub active_weight: f64,

    /// Teleop activity weight for a robot that stayed put in auto
    pub inactive_weight: f64,

    /// Endgame points by final robot state
    pub endgame_points: EndgamePointTable,
}

/// Endgame points awarded per robot state
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EndgamePointTable {
    pub none: f64,
    pub parked: f64,
    pub shallow_cage: f64,
    pub deep_cage: f64,
}

/// Batch processing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProcessingConfig {
    /// Number of threads used for multi-team batches
    pub thread_pool_size: usize,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            mobility_points: DEFAULT_MOBILITY_POINTS,
            active_weight: DEFAULT_ACTIVE_WEIGHT,
            inactive_weight: DEFAULT_INACTIVE_WEIGHT,
            endgame_points: EndgamePointTable::default(),
        }
    }
}

impl Default for EndgamePointTable {
    fn default() -> Self {
        Self { none: 0.0, parked: 2.0, shallow_cage: 6.0, deep_cage: 12.0 }
    }
}

impl EndgamePointTable {
    pub fn points_for(&self, state: EndgameState) -> f64 {
        match state {
            EndgameState::None => self.none,
            EndgameState::Parked => self.parked,
            EndgameState::ShallowCage => self.shallow_cage,
            EndgameState::DeepCage => self.deep_cage,
        }
    }
}

impl Default for ProcessingConfig {
    fn default() -> Self {
        Self { thread_pool_size: num_cpus::get() }
    }
}

impl MetricsConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: MetricsConfig = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn to_file(&self, path: impl AsRef<Path>) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Apply `TEAM_METRICS_*` environment overrides
    pub fn apply_env(&mut self) {
        if let Ok(points) = std::env::var("TEAM_METRICS_MOBILITY_POINTS") {
            self.scoring.mobility_points =
                points.parse().unwrap_or(DEFAULT_MOBILITY_POINTS);
        }

        if let Ok(weight) = std::env::var("TEAM_METRICS_INACTIVE_WEIGHT") {
            self.scoring.inactive_weight = weight.parse().unwrap_or(DEFAULT_INACTIVE_WEIGHT);
        }

        if let Ok(threads) = std::env::var("TEAM_METRICS_THREADS") {
            self.processing.thread_pool_size = threads.parse().unwrap_or_else(|_| num_cpus::get());
        }
    }

    /// Load defaults with environment overrides
    pub fn from_env() -> Result<Self> {
        let mut config = Self::default();
        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let scoring = &self.scoring;

        if !(scoring.active_weight > 0.0) || !(scoring.inactive_weight > 0.0) {
            return Err(MetricsError::InvalidConfig(format!(
                "activity weights must be positive (active: {}, inactive: {})",
                scoring.active_weight, scoring.inactive_weight
            )));
        }

        if scoring.mobility_points < 0.0 {
            return Err(MetricsError::InvalidConfig(format!(
                "mobility points must not be negative: {}",
                scoring.mobility_points
            )));
        }

        let table = &scoring.endgame_points;
        if [table.none, table.parked, table.shallow_cage, table.deep_cage]
            .iter()
            .any(|points| *points < 0.0)
        {
            return Err(MetricsError::InvalidConfig(
                "endgame points must not be negative".to_string(),
            ));
        }

        if self.processing.thread_pool_size == 0 {
            return Err(MetricsError::InvalidConfig(
                "thread pool size must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
