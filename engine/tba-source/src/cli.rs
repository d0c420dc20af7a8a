//! # Command Line Interface
//!
//! Computes team performance profiles from stored event match data.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::fmt;
use std::path::PathBuf;
use team_metrics::{MatchRecord, PerformanceAggregator, TeamPerformanceProfile};
use tracing::info;

use crate::config::ReportConfig;
use crate::error::Result as SourceResult;
use crate::mapper::team_key;
use crate::source::{JsonFileSource, MatchSource};

/// Team performance reports from The Blue Alliance match data
#[derive(Parser)]
#[command(name = "team-report")]
#[command(about = "Per-team performance profiles for FRC events and seasons")]
pub struct Cli {
    /// Directory holding `<event>_matches.json` files (overrides config)
    #[arg(short, long, global = true)]
    pub data_dir: Option<PathBuf>,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Command to execute
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Profile a single team
    Profile {
        /// Event code (e.g. 2025incmp)
        #[arg(long)]
        event: Option<String>,

        /// Profile across every event of a season instead of one event
        #[arg(long, conflicts_with = "event")]
        season: Option<i32>,

        /// Team number
        #[arg(long)]
        team: u32,
    },
    /// Profile several teams over the same matches
    Compare {
        /// Event code (e.g. 2025incmp)
        #[arg(long)]
        event: Option<String>,

        /// Compare across every event of a season instead of one event
        #[arg(long, conflicts_with = "event")]
        season: Option<i32>,

        /// Team numbers
        #[arg(long, num_args = 1.., required = true)]
        teams: Vec<u32>,
    },
}

/// The set of matches a report covers
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchScope {
    Event(String),
    Season(i32),
}

impl fmt::Display for MatchScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MatchScope::Event(code) => write!(f, "event {code}"),
            MatchScope::Season(year) => write!(f, "season {year}"),
        }
    }
}

/// CLI handler
pub struct CliHandler<S = JsonFileSource> {
    config: ReportConfig,
    source: S,
    aggregator: PerformanceAggregator,
}

impl CliHandler {
    pub fn new(config: ReportConfig) -> Self {
        let source = JsonFileSource::new(config.source.data_dir.clone());
        Self::with_source(config, source)
    }
}

impl<S: MatchSource> CliHandler<S> {
    pub fn with_source(config: ReportConfig, source: S) -> Self {
        let aggregator = PerformanceAggregator::new(config.metrics.clone());
        Self { config, source, aggregator }
    }

    /// Run a command and return the report as JSON
    pub fn handle_command(&self, command: Commands) -> Result<serde_json::Value> {
        match command {
            Commands::Profile { event, season, team } => {
                let profile = self.profile(&self.scope(event, season), team)?;
                Ok(serde_json::to_value(profile)?)
            }
            Commands::Compare { event, season, teams } => {
                let profiles = self.compare(&self.scope(event, season), &teams)?;
                Ok(serde_json::to_value(profiles)?)
            }
        }
    }

    pub fn profile(&self, scope: &MatchScope, team: u32) -> Result<TeamPerformanceProfile> {
        let key = team_key(team);
        let matches = self
            .matches(scope, Some(&key))
            .with_context(|| format!("Failed to load matches for {key} in {scope}"))?;

        info!("Profiling {} over {} matches in {}", key, matches.len(), scope);
        Ok(self.aggregator.compute_profile(&matches, &key))
    }

    pub fn compare(
        &self,
        scope: &MatchScope,
        teams: &[u32],
    ) -> Result<Vec<TeamPerformanceProfile>> {
        let matches = self
            .matches(scope, None)
            .with_context(|| format!("Failed to load matches for {scope}"))?;
        let keys: Vec<String> = teams.iter().copied().map(team_key).collect();

        info!("Profiling {} teams over {} matches in {}", keys.len(), matches.len(), scope);
        Ok(self.aggregator.compute_profiles(&matches, &keys)?)
    }

    /// A season when given, otherwise the named or configured default event
    pub fn scope(&self, event: Option<String>, season: Option<i32>) -> MatchScope {
        match season {
            Some(year) => MatchScope::Season(year),
            None => MatchScope::Event(
                event.unwrap_or_else(|| self.config.source.default_event.clone()),
            ),
        }
    }

    fn matches(
        &self,
        scope: &MatchScope,
        team_key: Option<&str>,
    ) -> SourceResult<Vec<MatchRecord>> {
        match scope {
            MatchScope::Event(code) => self.source.event_matches(code, team_key),
            MatchScope::Season(year) => self.source.season_matches(*year, team_key),
        }
    }
}
