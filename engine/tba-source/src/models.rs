use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};

/// The Blue Alliance v3 match
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaMatch {
    #[serde(rename = "key")]
    pub key: String,

    #[serde(rename = "comp_level", default)]
    pub comp_level: String,

    #[serde(rename = "match_number", default)]
    pub match_number: u32,

    #[serde(rename = "alliances")]
    pub alliances: TbaAlliances,

    /// "red", "blue", or "" for a tie / unplayed match
    #[serde(rename = "winning_alliance", default)]
    pub winning_alliance: Option<String>,

    /// Null until the match has been played
    #[serde(rename = "score_breakdown", default)]
    pub score_breakdown: Option<TbaScoreBreakdown>,

    /// Scheduled start, unix seconds
    #[serde(rename = "time", default)]
    pub time: Option<i64>,

    /// Actual start, unix seconds
    #[serde(rename = "actual_time", default)]
    pub actual_time: Option<i64>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaAlliances {
    #[serde(rename = "red")]
    pub red: TbaAlliance,

    #[serde(rename = "blue")]
    pub blue: TbaAlliance,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
pub struct TbaAlliance {
    #[serde(rename = "team_keys", default)]
    pub team_keys: Vec<String>,

    #[serde(rename = "score", default)]
    pub score: Option<i32>,

    #[serde(rename = "surrogate_team_keys", default)]
    pub surrogate_team_keys: Vec<String>,

    #[serde(rename = "dq_team_keys", default)]
    pub dq_team_keys: Vec<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct TbaScoreBreakdown {
    #[serde(rename = "red", default, deserialize_with = "lenient_or_default")]
    pub red: TbaAllianceBreakdown,

    #[serde(rename = "blue", default, deserialize_with = "lenient_or_default")]
    pub blue: TbaAllianceBreakdown,
}

/// 2025 alliance score breakdown.
///
/// Every field is optional upstream, and a value of the wrong type reads as
/// missing so one bad field cannot fail the whole event.
#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct TbaAllianceBreakdown {
    #[serde(rename = "totalPoints", deserialize_with = "lenient")]
    pub total_points: Option<i64>,

    #[serde(rename = "autoLineRobot1", deserialize_with = "lenient")]
    pub auto_line_robot1: Option<String>,

    #[serde(rename = "autoLineRobot2", deserialize_with = "lenient")]
    pub auto_line_robot2: Option<String>,

    #[serde(rename = "autoLineRobot3", deserialize_with = "lenient")]
    pub auto_line_robot3: Option<String>,

    #[serde(rename = "autoBonusAchieved", deserialize_with = "lenient")]
    pub auto_bonus_achieved: Option<bool>,

    #[serde(rename = "autoCoralPoints", deserialize_with = "lenient")]
    pub auto_coral_points: Option<i64>,

    #[serde(rename = "autoCoralCount", deserialize_with = "lenient")]
    pub auto_coral_count: Option<i64>,

    #[serde(rename = "teleopPoints", deserialize_with = "lenient")]
    pub teleop_points: Option<i64>,

    #[serde(rename = "teleopCoralCount", deserialize_with = "lenient")]
    pub teleop_coral_count: Option<i64>,

    #[serde(rename = "teleopReef", deserialize_with = "lenient")]
    pub teleop_reef: Option<TbaReef>,

    #[serde(rename = "endGameRobot1", deserialize_with = "lenient")]
    pub end_game_robot1: Option<String>,

    #[serde(rename = "endGameRobot2", deserialize_with = "lenient")]
    pub end_game_robot2: Option<String>,

    #[serde(rename = "endGameRobot3", deserialize_with = "lenient")]
    pub end_game_robot3: Option<String>,
}

#[derive(Debug, Deserialize, Serialize, Clone, Default)]
#[serde(default)]
pub struct TbaReef {
    #[serde(rename = "tba_topRowCount", deserialize_with = "lenient")]
    pub top_row_count: Option<i64>,

    #[serde(rename = "tba_midRowCount", deserialize_with = "lenient")]
    pub mid_row_count: Option<i64>,

    #[serde(rename = "tba_botRowCount", deserialize_with = "lenient")]
    pub bot_row_count: Option<i64>,

    #[serde(rename = "trough", deserialize_with = "lenient")]
    pub trough: Option<i64>,
}

impl TbaAllianceBreakdown {
    pub fn auto_line_flags(&self) -> [Option<&str>; 3] {
        [
            self.auto_line_robot1.as_deref(),
            self.auto_line_robot2.as_deref(),
            self.auto_line_robot3.as_deref(),
        ]
    }

    pub fn end_game_states(&self) -> [Option<&str>; 3] {
        [
            self.end_game_robot1.as_deref(),
            self.end_game_robot2.as_deref(),
            self.end_game_robot3.as_deref(),
        ]
    }
}

/// Reads any JSON value, keeping it only if it has the expected shape
fn lenient<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let value = serde_json::Value::deserialize(deserializer)?;
    Ok(serde_json::from_value(value).ok())
}

fn lenient_or_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    Ok(lenient(deserializer)?.unwrap_or_default())
}
