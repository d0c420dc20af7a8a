//! Maps The Blue Alliance wire models onto engine match records.
//!
//! Missing or malformed breakdown fields become zero / false / no endgame so a
//! partially reported match still contributes to a profile.

use chrono::{DateTime, Utc};
use team_metrics::{AllianceColor, AllianceScoreBreakdown, EndgameState, MatchRecord, ReefCounts};
use tracing::{debug, warn};

use crate::models::{TbaAllianceBreakdown, TbaMatch};

/// TBA team key for a team number (e.g. `frc254`)
pub fn team_key(team_number: u32) -> String {
    format!("frc{team_number}")
}

/// Convert a batch of TBA matches, dropping those without a score breakdown
pub fn map_matches(matches: &[TbaMatch]) -> Vec<MatchRecord> {
    let records: Vec<MatchRecord> = matches.iter().filter_map(map_match).collect();

    if records.len() < matches.len() {
        debug!(
            "Mapped {} of {} matches ({} unplayed)",
            records.len(),
            matches.len(),
            matches.len() - records.len()
        );
    }

    records
}

/// Convert one TBA match; `None` when it has not been played yet
pub fn map_match(tba: &TbaMatch) -> Option<MatchRecord> {
    let Some(breakdown) = tba.score_breakdown.as_ref() else {
        debug!("Skipping match {} with no score breakdown", tba.key);
        return None;
    };

    Some(MatchRecord {
        key: tba.key.clone(),
        red_teams: tba.alliances.red.team_keys.clone(),
        blue_teams: tba.alliances.blue.team_keys.clone(),
        winning_alliance: parse_winner(tba.winning_alliance.as_deref(), &tba.key),
        red_breakdown: map_breakdown(&breakdown.red),
        blue_breakdown: map_breakdown(&breakdown.blue),
        played_at: tba
            .actual_time
            .or(tba.time)
            .and_then(|secs| DateTime::<Utc>::from_timestamp(secs, 0)),
    })
}

pub fn map_breakdown(tba: &TbaAllianceBreakdown) -> AllianceScoreBreakdown {
    let reef = tba.teleop_reef.clone().unwrap_or_default();

    AllianceScoreBreakdown {
        total_points: count(tba.total_points),
        auto_line: tba.auto_line_flags().map(parse_auto_line),
        auto_bonus_achieved: tba.auto_bonus_achieved.unwrap_or(false),
        auto_coral_points: count(tba.auto_coral_points),
        auto_coral_count: count(tba.auto_coral_count),
        teleop_points: count(tba.teleop_points),
        teleop_coral_count: count(tba.teleop_coral_count),
        teleop_reef: ReefCounts {
            top_row: count(reef.top_row_count),
            mid_row: count(reef.mid_row_count),
            bot_row: count(reef.bot_row_count),
            trough: count(reef.trough),
        },
        endgame: tba.end_game_states().map(parse_endgame),
    }
}

/// `"Yes"` means the robot left its starting line
pub fn parse_auto_line(value: Option<&str>) -> bool {
    matches!(value, Some("Yes"))
}

pub fn parse_endgame(value: Option<&str>) -> EndgameState {
    match value {
        Some("Parked") => EndgameState::Parked,
        Some("ShallowCage") => EndgameState::ShallowCage,
        Some("DeepCage") => EndgameState::DeepCage,
        _ => EndgameState::None,
    }
}

/// Empty or missing means tie
pub fn parse_winner(value: Option<&str>, match_key: &str) -> Option<AllianceColor> {
    match value {
        Some("red") => Some(AllianceColor::Red),
        Some("blue") => Some(AllianceColor::Blue),
        None | Some("") => None,
        Some(other) => {
            warn!("Unknown winning alliance {:?} in match {}; treating as tie", other, match_key);
            None
        }
    }
}

fn count(value: Option<i64>) -> u32 {
    value.map(|v| v.clamp(0, u32::MAX as i64) as u32).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{TbaAlliance, TbaAlliances, TbaReef, TbaScoreBreakdown};

    fn tba_match(breakdown: Option<TbaScoreBreakdown>, winner: &str) -> TbaMatch {
        TbaMatch {
            key: "2025incmp_qm12".to_string(),
            comp_level: "qm".to_string(),
            match_number: 12,
            alliances: TbaAlliances {
                red: TbaAlliance {
                    team_keys: vec!["frc1".into(), "frc2".into(), "frc3".into()],
                    ..Default::default()
                },
                blue: TbaAlliance {
                    team_keys: vec!["frc4".into(), "frc5".into(), "frc6".into()],
                    ..Default::default()
                },
            },
            winning_alliance: Some(winner.to_string()),
            score_breakdown: breakdown,
            time: Some(1_744_300_000),
            actual_time: None,
        }
    }

    #[test]
    fn test_team_key() {
        assert_eq!(team_key(254), "frc254");
    }

    #[test]
    fn test_full_breakdown_mapping() {
        let red = TbaAllianceBreakdown {
            total_points: Some(120),
            auto_line_robot1: Some("Yes".into()),
            auto_line_robot2: Some("No".into()),
            auto_line_robot3: Some("Yes".into()),
            auto_bonus_achieved: Some(true),
            auto_coral_points: Some(21),
            auto_coral_count: Some(3),
            teleop_points: Some(70),
            teleop_coral_count: Some(14),
            teleop_reef: Some(TbaReef {
                top_row_count: Some(5),
                mid_row_count: Some(4),
                bot_row_count: Some(3),
                trough: Some(2),
            }),
            end_game_robot1: Some("DeepCage".into()),
            end_game_robot2: Some("Parked".into()),
            end_game_robot3: Some("None".into()),
        };

        let record = map_match(&tba_match(
            Some(TbaScoreBreakdown { red, blue: TbaAllianceBreakdown::default() }),
            "red",
        ))
        .unwrap();

        assert_eq!(record.key, "2025incmp_qm12");
        assert_eq!(record.winning_alliance, Some(AllianceColor::Red));
        assert_eq!(record.red_breakdown.total_points, 120);
        assert_eq!(record.red_breakdown.auto_line, [true, false, true]);
        assert!(record.red_breakdown.auto_bonus_achieved);
        assert_eq!(record.red_breakdown.teleop_reef.mid_row, 4);
        assert_eq!(
            record.red_breakdown.endgame,
            [EndgameState::DeepCage, EndgameState::Parked, EndgameState::None]
        );
        assert_eq!(record.played_at.map(|t| t.timestamp()), Some(1_744_300_000));
    }

    #[test]
    fn test_missing_fields_default_to_zero() {
        let record = map_match(&tba_match(
            Some(TbaScoreBreakdown {
                red: TbaAllianceBreakdown::default(),
                blue: TbaAllianceBreakdown { total_points: Some(-5), ..Default::default() },
            }),
            "",
        ))
        .unwrap();

        assert_eq!(record.red_breakdown, AllianceScoreBreakdown::default());
        assert_eq!(record.blue_breakdown.total_points, 0);
        assert_eq!(record.winning_alliance, None);
    }

    #[test]
    fn test_unplayed_match_is_dropped() {
        assert!(map_match(&tba_match(None, "")).is_none());
        assert!(map_matches(&[tba_match(None, "")]).is_empty());
    }

    #[test]
    fn test_wrong_typed_fields_read_as_missing() {
        let json = r#"{
            "red": {
                "totalPoints": 64,
                "autoLineRobot1": 1,
                "autoBonusAchieved": "yes",
                "teleopPoints": "n/a",
                "teleopReef": { "tba_topRowCount": 3, "trough": "n/a" },
                "endGameRobot1": "DeepCage"
            },
            "blue": "unavailable"
        }"#;
        let breakdown: TbaScoreBreakdown = serde_json::from_str(json).unwrap();

        let red = map_breakdown(&breakdown.red);
        assert_eq!(red.total_points, 64);
        assert_eq!(red.auto_line, [false, false, false]);
        assert!(!red.auto_bonus_achieved);
        assert_eq!(red.teleop_points, 0);
        assert_eq!(red.teleop_reef.top_row, 3);
        assert_eq!(red.teleop_reef.trough, 0);
        assert_eq!(red.endgame[0], EndgameState::DeepCage);
        assert_eq!(map_breakdown(&breakdown.blue), AllianceScoreBreakdown::default());
    }

    #[test]
    fn test_unknown_strings() {
        assert_eq!(parse_endgame(Some("Hanging")), EndgameState::None);
        assert!(!parse_auto_line(Some("Maybe")));
        assert_eq!(parse_winner(Some("green"), "k"), None);
    }
}
