use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use team_metrics::MetricsConfig;

/// Configuration for the team report tool
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    /// Match data location
    pub source: SourceConfig,

    /// Logging configuration
    pub logging: LoggingConfig,

    /// Metrics engine configuration
    pub metrics: MetricsConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory holding `<event>_matches.json` dumps
    pub data_dir: PathBuf,

    /// Event used when none is given on the command line
    pub default_event: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    pub level: String,

    /// Log format (json, pretty, compact)
    pub format: String,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self { data_dir: PathBuf::from("./data/matches"), default_event: "2025incmp".to_string() }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self { level: "info".to_string(), format: "compact".to_string() }
    }
}

impl ReportConfig {
    /// Load from an optional TOML file, then apply environment overrides
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let mut config = match path {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };

        config.apply_env();
        config.validate()?;
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading configuration from file: {:?}", path);
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {path:?}"))?;
        toml::from_str(&content).with_context(|| format!("Failed to parse config file: {path:?}"))
    }

    pub fn apply_env(&mut self) {
        if let Ok(data_dir) = std::env::var("TBA_DATA_DIR") {
            self.source.data_dir = PathBuf::from(data_dir);
        }

        if let Ok(event) = std::env::var("TBA_EVENT_CODE") {
            self.source.default_event = event;
        }

        if let Ok(level) = std::env::var("TEAM_REPORT_LOG_LEVEL") {
            self.logging.level = level;
        }

        if let Ok(format) = std::env::var("TEAM_REPORT_LOG_FORMAT") {
            self.logging.format = format;
        }

        self.metrics.apply_env();
    }

    pub fn validate(&self) -> Result<()> {
        match self.logging.level.as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => return Err(anyhow::anyhow!("Invalid log level: {}", self.logging.level)),
        }

        match self.logging.format.as_str() {
            "json" | "pretty" | "compact" => {}
            _ => return Err(anyhow::anyhow!("Invalid log format: {}", self.logging.format)),
        }

        self.metrics.validate().context("Invalid metrics configuration")?;
        Ok(())
    }
}
