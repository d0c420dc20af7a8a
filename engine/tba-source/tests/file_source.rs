//! Loading event dumps from disk and profiling teams end to end

use std::fs;
use std::path::{Path, PathBuf};

use chrono::DateTime;
use tba_source::cli::{CliHandler, Commands, MatchScope};
use tba_source::{JsonFileSource, MatchSource, ReportConfig, SourceError};
use team_metrics::{AllianceColor, EndgameState, MatchResult, Seat};
use tempfile::TempDir;

const EVENT: &str = "2025test";
const EPS: f64 = 1e-9;

fn fixture_path() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/2025test_matches.json")
}

fn setup_data_dir() -> TempDir {
    let dir = TempDir::new().unwrap();
    fs::copy(fixture_path(), dir.path().join(format!("{EVENT}_matches.json"))).unwrap();
    dir
}

/// One played qualification match with a minimal breakdown for each side
fn match_json(key: &str, red: [&str; 3], blue: [&str; 3], time: i64) -> serde_json::Value {
    serde_json::json!({
        "key": key,
        "comp_level": "qm",
        "match_number": 1,
        "alliances": {
            "red": { "team_keys": red, "score": 40 },
            "blue": { "team_keys": blue, "score": 30 }
        },
        "winning_alliance": "red",
        "time": time,
        "actual_time": null,
        "score_breakdown": {
            "red": {
                "totalPoints": 40,
                "autoLineRobot1": "Yes",
                "autoLineRobot2": "Yes",
                "autoLineRobot3": "Yes",
                "teleopPoints": 30,
                "endGameRobot1": "Parked"
            },
            "blue": { "totalPoints": 30, "teleopPoints": 30 }
        }
    })
}

fn write_event(dir: &TempDir, event: &str, matches: &[serde_json::Value]) {
    let path = dir.path().join(format!("{event}_matches.json"));
    fs::write(path, serde_json::to_string(matches).unwrap()).unwrap();
}

fn create_test_handler(dir: &TempDir) -> CliHandler {
    let mut config = ReportConfig::default();
    config.source.data_dir = dir.path().to_path_buf();
    config.source.default_event = EVENT.to_string();
    config.metrics.processing.thread_pool_size = 2;
    CliHandler::new(config)
}

#[test]
fn test_event_path_layout() {
    let source = JsonFileSource::new("/data/matches");
    assert_eq!(
        source.event_path("2025incmp"),
        PathBuf::from("/data/matches/2025incmp_matches.json")
    );
}

#[test]
fn test_load_event_keeps_unplayed_raw_matches() {
    let dir = setup_data_dir();
    let source = JsonFileSource::new(dir.path());

    let raw = source.load_event(EVENT).unwrap();
    assert_eq!(raw.len(), 3);
    assert!(raw[2].score_breakdown.is_none());
}

#[test]
fn test_event_matches_drops_unplayed() {
    let dir = setup_data_dir();
    let source = JsonFileSource::new(dir.path());

    let records = source.event_matches(EVENT, None).unwrap();
    let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["2025test_qm1", "2025test_qm2"]);

    assert_eq!(records[0].winning_alliance, Some(AllianceColor::Red));
    assert_eq!(records[0].red_breakdown.auto_line, [true, true, false]);
    assert_eq!(records[0].red_breakdown.teleop_reef.top_row, 2);
    assert_eq!(records[0].played_at, DateTime::from_timestamp(1_743_700_120, 0));
    // Falls back to the scheduled time
    assert_eq!(records[1].played_at, DateTime::from_timestamp(1_743_700_600, 0));
}

#[test]
fn test_event_matches_filters_by_team() {
    let dir = setup_data_dir();
    let source = JsonFileSource::new(dir.path());

    let records = source.event_matches(EVENT, Some("frc700")).unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].key, "2025test_qm2");

    let none = source.event_matches(EVENT, Some("frc9999")).unwrap();
    assert!(none.is_empty());
}

#[test]
fn test_missing_event_is_not_found() {
    let dir = TempDir::new().unwrap();
    let source = JsonFileSource::new(dir.path());

    match source.event_matches("2025nope", None) {
        Err(SourceError::EventNotFound(event)) => assert_eq!(event, "2025nope"),
        other => panic!("expected EventNotFound, got {other:?}"),
    }
}

#[test]
fn test_malformed_json_is_reported() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("2025bad_matches.json"), "{ not json").unwrap();
    let source = JsonFileSource::new(dir.path());

    let err = source.load_event("2025bad").unwrap_err();
    assert!(matches!(err, SourceError::Json { .. }));
}

#[test]
fn test_profile_from_fixture() {
    let dir = setup_data_dir();
    let handler = create_test_handler(&dir);

    let profile = handler.profile(&MatchScope::Event(EVENT.to_string()), 100).unwrap();

    assert_eq!(profile.team_key, "frc100");
    assert_eq!(profile.matches_played, 2);
    assert_eq!(profile.wins, 1);
    assert_eq!(profile.losses, 1);

    let first = &profile.match_history[0];
    assert_eq!(first.alliance, AllianceColor::Red);
    assert_eq!(first.robot_position, Seat::One);
    assert_eq!(first.result, MatchResult::Win);
    assert_eq!(first.endgame, EndgameState::DeepCage);
    assert!((first.estimated_points.auto - 10.0).abs() < EPS);
    assert!((first.estimated_points.teleop - 40.0 / 2.7).abs() < EPS);
    assert_eq!(first.alliance_total, 80);

    let second = &profile.match_history[1];
    assert_eq!(second.alliance, AllianceColor::Blue);
    assert_eq!(second.robot_position, Seat::Two);
    assert_eq!(second.result, MatchResult::Loss);
    assert!((second.estimated_points.teleop - 10.0).abs() < EPS);
    assert!((second.estimated_points.endgame - 6.0).abs() < EPS);

    assert_eq!(profile.auto_performance.auto_line_crosses, 1);
    assert!((profile.auto_performance.line_cross_success_rate - 0.5).abs() < EPS);
    assert_eq!(profile.endgame_performance.deep_cage_count, 1);
    assert_eq!(profile.endgame_performance.shallow_cage_count, 1);
    assert!((profile.endgame_performance.avg_endgame_points - 9.0).abs() < EPS);
}

#[test]
fn test_compare_uses_default_event() {
    let dir = setup_data_dir();
    let handler = create_test_handler(&dir);

    let report = handler
        .handle_command(Commands::Compare {
            event: None,
            season: None,
            teams: vec![100, 400, 9999],
        })
        .unwrap();

    let profiles = report.as_array().unwrap();
    assert_eq!(profiles.len(), 3);
    assert_eq!(profiles[0]["team_key"], "frc100");
    assert_eq!(profiles[1]["team_key"], "frc400");
    assert_eq!(profiles[1]["matches_played"], 2);
    assert_eq!(profiles[1]["wins"], 0);
    assert_eq!(profiles[1]["losses"], 2);
    assert_eq!(profiles[2]["matches_played"], 0);
}

#[test]
fn test_profile_for_missing_event_fails() {
    let dir = TempDir::new().unwrap();
    let handler = create_test_handler(&dir);

    let err = handler
        .handle_command(Commands::Profile { event: None, season: None, team: 100 })
        .unwrap_err();
    assert!(err.downcast_ref::<SourceError>().is_some());
}

#[test]
fn test_wrong_typed_breakdown_field_keeps_event() {
    let dir = TempDir::new().unwrap();
    let mut bad =
        match_json("2025lenient_qm1", ["frc1", "frc2", "frc3"], ["frc4", "frc5", "frc6"], 10);
    bad["score_breakdown"]["red"]["teleopReef"] = serde_json::json!({ "trough": "n/a" });
    bad["score_breakdown"]["red"]["teleopPoints"] = serde_json::json!("n/a");
    let good =
        match_json("2025lenient_qm2", ["frc4", "frc1", "frc6"], ["frc7", "frc8", "frc9"], 20);
    write_event(&dir, "2025lenient", &[bad, good]);

    let source = JsonFileSource::new(dir.path());
    let records = source.event_matches("2025lenient", Some("frc1")).unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].red_breakdown.teleop_points, 0);
    assert_eq!(records[0].red_breakdown.teleop_reef.trough, 0);
    assert_eq!(records[0].red_breakdown.total_points, 40);
    assert_eq!(records[1].red_breakdown.teleop_points, 30);
}

#[test]
fn test_team_filter_ignores_entries_past_third_seat() {
    let dir = TempDir::new().unwrap();
    let mut padded =
        match_json("2025pad_qm1", ["frc1", "frc2", "frc3"], ["frc4", "frc5", "frc6"], 10);
    padded["alliances"]["red"]["team_keys"] = serde_json::json!(["frc1", "frc2", "frc3", "frc99"]);
    write_event(&dir, "2025pad", &[padded]);

    let source = JsonFileSource::new(dir.path());
    assert!(source.event_matches("2025pad", Some("frc99")).unwrap().is_empty());
    assert_eq!(source.event_matches("2025pad", Some("frc3")).unwrap().len(), 1);
}

#[test]
fn test_season_spans_events_of_that_year() {
    let dir = setup_data_dir();
    let red = ["frc100", "frc2", "frc3"];
    let blue = ["frc4", "frc5", "frc6"];
    write_event(&dir, "2025early", &[match_json("2025early_qm1", red, blue, 1_700_000_000)]);
    write_event(&dir, "2024old", &[match_json("2024old_qm1", red, blue, 1_690_000_000)]);
    fs::write(dir.path().join("notes.txt"), "not an event").unwrap();

    let source = JsonFileSource::new(dir.path());
    assert_eq!(source.season_events(2025).unwrap(), vec!["2025early", "2025test"]);

    let records = source.season_matches(2025, Some("frc100")).unwrap();
    let keys: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
    assert_eq!(keys, vec!["2025early_qm1", "2025test_qm1", "2025test_qm2"]);

    let handler = create_test_handler(&dir);
    let profile = handler.profile(&MatchScope::Season(2025), 100).unwrap();
    assert_eq!(profile.matches_played, 3);
    assert_eq!(profile.wins, 2);
    assert_eq!(profile.match_history[0].match_key, "2025early_qm1");
}

#[test]
fn test_season_without_events_fails() {
    let dir = setup_data_dir();
    let source = JsonFileSource::new(dir.path());

    match source.season_matches(2019, None) {
        Err(SourceError::SeasonNotFound(year)) => assert_eq!(year, 2019),
        other => panic!("expected SeasonNotFound, got {other:?}"),
    }
}

#[test]
fn test_scope_prefers_season_then_event_then_default() {
    let dir = setup_data_dir();
    let handler = create_test_handler(&dir);

    assert_eq!(handler.scope(None, Some(2025)), MatchScope::Season(2025));
    assert_eq!(
        handler.scope(Some("2025mimid".to_string()), None),
        MatchScope::Event("2025mimid".to_string())
    );
    assert_eq!(handler.scope(None, None), MatchScope::Event(EVENT.to_string()));
}
