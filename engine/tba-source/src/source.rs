use std::path::{Path, PathBuf};

use team_metrics::MatchRecord;
use tracing::{debug, info};

use crate::error::{Result, SourceError};
use crate::mapper;
use crate::models::TbaMatch;

const EVENT_FILE_SUFFIX: &str = "_matches.json";

/// A provider of already-played matches
pub trait MatchSource {
    /// Matches for `event_code` in source order, optionally limited to one team key
    fn event_matches(&self, event_code: &str, team_key: Option<&str>) -> Result<Vec<MatchRecord>>;

    /// Matches from every event of `year`, optionally limited to one team key
    fn season_matches(&self, year: i32, team_key: Option<&str>) -> Result<Vec<MatchRecord>>;
}

/// Reads TBA `/event/{code}/matches` dumps from a directory.
///
/// Files are named `<event_code>_matches.json`. TBA event codes start with
/// the season year, which is how a season's files are found.
#[derive(Debug, Clone)]
pub struct JsonFileSource {
    data_dir: PathBuf,
}

impl JsonFileSource {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self { data_dir: data_dir.into() }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn event_path(&self, event_code: &str) -> PathBuf {
        self.data_dir.join(format!("{event_code}{EVENT_FILE_SUFFIX}"))
    }

    /// Raw TBA matches for an event
    pub fn load_event(&self, event_code: &str) -> Result<Vec<TbaMatch>> {
        let path = self.event_path(event_code);
        if !path.exists() {
            return Err(SourceError::EventNotFound(event_code.to_string()));
        }

        let content = std::fs::read_to_string(&path)
            .map_err(|source| SourceError::Io { path: path.clone(), source })?;
        let matches: Vec<TbaMatch> =
            serde_json::from_str(&content).map_err(|source| SourceError::Json { path, source })?;

        info!("Loaded {} matches for event {}", matches.len(), event_code);
        Ok(matches)
    }

    /// Event codes with a dump in the data directory for `year`, sorted
    pub fn season_events(&self, year: i32) -> Result<Vec<String>> {
        let io_err = |source| SourceError::Io { path: self.data_dir.clone(), source };
        let prefix = year.to_string();

        let mut events = Vec::new();
        for entry in std::fs::read_dir(&self.data_dir).map_err(io_err)? {
            let name = entry.map_err(io_err)?.file_name();
            let Some(event_code) = name.to_str().and_then(|n| n.strip_suffix(EVENT_FILE_SUFFIX))
            else {
                continue;
            };
            if event_code.starts_with(&prefix) {
                events.push(event_code.to_string());
            }
        }

        events.sort();
        Ok(events)
    }
}

impl MatchSource for JsonFileSource {
    fn event_matches(&self, event_code: &str, team_key: Option<&str>) -> Result<Vec<MatchRecord>> {
        let mut records = mapper::map_matches(&self.load_event(event_code)?);

        if let Some(team_key) = team_key {
            records.retain(|record| record.involves(team_key));
        }

        Ok(records)
    }

    /// Concatenates every event of the season, then orders by start time.
    /// Matches without a time keep their relative order and go first.
    fn season_matches(&self, year: i32, team_key: Option<&str>) -> Result<Vec<MatchRecord>> {
        let events = self.season_events(year)?;
        if events.is_empty() {
            return Err(SourceError::SeasonNotFound(year));
        }

        let mut records = Vec::new();
        for event_code in &events {
            records.extend(self.event_matches(event_code, team_key)?);
        }
        records.sort_by_key(|record| record.played_at);

        debug!("Season {}: {} matches across {} events", year, records.len(), events.len());
        Ok(records)
    }
}
