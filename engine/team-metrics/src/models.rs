use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the two alliances in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AllianceColor {
    Red,
    Blue,
}

impl AllianceColor {
    pub fn as_str(self) -> &'static str {
        match self {
            AllianceColor::Red => "red",
            AllianceColor::Blue => "blue",
        }
    }
}

impl fmt::Display for AllianceColor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A robot's position within its alliance (1-3)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Seat {
    One,
    Two,
    Three,
}

impl Seat {
    pub const ALL: [Seat; 3] = [Seat::One, Seat::Two, Seat::Three];

    /// Seat from a 1-based position
    pub fn from_number(number: u8) -> Option<Self> {
        match number {
            1 => Some(Seat::One),
            2 => Some(Seat::Two),
            3 => Some(Seat::Three),
            _ => None,
        }
    }

    /// 1-based seat number
    pub fn number(self) -> u8 {
        self.index() as u8 + 1
    }

    /// 0-based index into per-seat arrays
    pub fn index(self) -> usize {
        match self {
            Seat::One => 0,
            Seat::Two => 1,
            Seat::Three => 2,
        }
    }
}

impl TryFrom<u8> for Seat {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        Seat::from_number(value).ok_or_else(|| format!("seat must be 1, 2 or 3, got {value}"))
    }
}

impl From<Seat> for u8 {
    fn from(seat: Seat) -> Self {
        seat.number()
    }
}

impl fmt::Display for Seat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.number())
    }
}

/// Where a robot finished the match
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndgameState {
    #[default]
    None,
    Parked,
    ShallowCage,
    DeepCage,
}

/// Outcome of a match from one team's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    Win,
    Loss,
}

/// Alliance-wide teleop reef placement counts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReefCounts {
    pub top_row: u32,
    pub mid_row: u32,
    pub bot_row: u32,
    pub trough: u32,
}

/// Reef placements attributed to a single team (fractional)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ReefPlacements {
    pub top_row: f64,
    pub mid_row: f64,
    pub bot_row: f64,
    pub trough: f64,
}

impl ReefPlacements {
    pub fn add(&mut self, other: &ReefPlacements) {
        self.top_row += other.top_row;
        self.mid_row += other.mid_row;
        self.bot_row += other.bot_row;
        self.trough += other.trough;
    }

    pub fn scaled(&self, factor: f64) -> ReefPlacements {
        ReefPlacements {
            top_row: self.top_row * factor,
            mid_row: self.mid_row * factor,
            bot_row: self.bot_row * factor,
            trough: self.trough * factor,
        }
    }

    pub fn total(&self) -> f64 {
        self.top_row + self.mid_row + self.bot_row + self.trough
    }
}

/// Score breakdown for one alliance in one match.
///
/// Absent fields deserialize as zero so partial upstream records still fold.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AllianceScoreBreakdown {
    pub total_points: u32,
    /// Auto line crossed, indexed by seat
    pub auto_line: [bool; 3],
    pub auto_bonus_achieved: bool,
    pub auto_coral_points: u32,
    pub auto_coral_count: u32,
    pub teleop_points: u32,
    pub teleop_coral_count: u32,
    pub teleop_reef: ReefCounts,
    /// Endgame state, indexed by seat
    pub endgame: [EndgameState; 3],
}

impl AllianceScoreBreakdown {
    pub fn auto_line_crossed(&self, seat: Seat) -> bool {
        self.auto_line[seat.index()]
    }

    pub fn endgame_state(&self, seat: Seat) -> EndgameState {
        self.endgame[seat.index()]
    }

    /// Number of robots on the alliance that left the starting line
    pub fn robots_crossed(&self) -> u32 {
        self.auto_line.iter().filter(|crossed| **crossed).count() as u32
    }
}

/// One played match, already mapped from the upstream schema
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchRecord {
    pub key: String,
    /// Red team keys in seat order
    pub red_teams: Vec<String>,
    /// Blue team keys in seat order
    pub blue_teams: Vec<String>,
    /// `None` for a tie
    pub winning_alliance: Option<AllianceColor>,
    pub red_breakdown: AllianceScoreBreakdown,
    pub blue_breakdown: AllianceScoreBreakdown,
    #[serde(default)]
    pub played_at: Option<DateTime<Utc>>,
}

impl MatchRecord {
    pub fn teams(&self, alliance: AllianceColor) -> &[String] {
        match alliance {
            AllianceColor::Red => &self.red_teams,
            AllianceColor::Blue => &self.blue_teams,
        }
    }

    /// Teams occupying a seat; entries past the third are ignored
    pub fn seated_teams(&self, alliance: AllianceColor) -> &[String] {
        let teams = self.teams(alliance);
        &teams[..teams.len().min(Seat::ALL.len())]
    }

    /// Whether `team_key` occupied a seat on either alliance
    pub fn involves(&self, team_key: &str) -> bool {
        [AllianceColor::Red, AllianceColor::Blue]
            .into_iter()
            .any(|alliance| self.seated_teams(alliance).iter().any(|key| key == team_key))
    }

    pub fn breakdown(&self, alliance: AllianceColor) -> &AllianceScoreBreakdown {
        match alliance {
            AllianceColor::Red => &self.red_breakdown,
            AllianceColor::Blue => &self.blue_breakdown,
        }
    }

    pub fn result_for(&self, alliance: AllianceColor) -> MatchResult {
        if self.winning_alliance == Some(alliance) {
            MatchResult::Win
        } else {
            MatchResult::Loss
        }
    }
}

/// Estimated points for a single match, split by phase
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PhasePoints {
    pub auto: f64,
    pub teleop: f64,
    pub endgame: f64,
    pub total: f64,
}

impl PhasePoints {
    pub fn new(auto: f64, teleop: f64, endgame: f64) -> Self {
        Self { auto, teleop, endgame, total: auto + teleop + endgame }
    }
}

/// A team's estimated contribution to one match
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchContribution {
    pub match_key: String,
    pub alliance: AllianceColor,
    pub robot_position: Seat,
    pub result: MatchResult,
    pub auto_line: bool,
    pub endgame: EndgameState,
    pub estimated_points: PhasePoints,
    pub alliance_total: u32,
    pub contribution_percentage: f64,
    pub played_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AutoPerformance {
    pub auto_line_crosses: u32,
    pub line_cross_success_rate: f64,
    pub avg_auto_contribution: f64,
    pub total_auto_points: f64,
    pub auto_coral_count: f64,
    pub auto_coral_per_match: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeleopPerformance {
    pub avg_teleop_contribution: f64,
    pub total_teleop_points: f64,
    pub estimated_coral_per_match: f64,
    pub total_coral_count: f64,
    pub reef_placements: ReefPlacements,
    pub reef_placements_per_match: ReefPlacements,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EndgamePerformance {
    pub parked_count: u32,
    pub parked_rate: f64,
    pub deep_cage_count: u32,
    pub deep_cage_rate: f64,
    pub shallow_cage_count: u32,
    pub shallow_cage_rate: f64,
    pub none_count: u32,
    pub none_rate: f64,
    pub total_endgame_points: f64,
    pub avg_endgame_points: f64,
}

impl EndgamePerformance {
    pub fn record(&mut self, state: EndgameState) {
        match state {
            EndgameState::None => self.none_count += 1,
            EndgameState::Parked => self.parked_count += 1,
            EndgameState::ShallowCage => self.shallow_cage_count += 1,
            EndgameState::DeepCage => self.deep_cage_count += 1,
        }
    }

    pub fn count(&self, state: EndgameState) -> u32 {
        match state {
            EndgameState::None => self.none_count,
            EndgameState::Parked => self.parked_count,
            EndgameState::ShallowCage => self.shallow_cage_count,
            EndgameState::DeepCage => self.deep_cage_count,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OverallMetrics {
    pub total_estimated_points: f64,
    pub avg_points_per_match: f64,
    pub contribution_percentages: Vec<f64>,
    pub avg_contribution_percentage: f64,
    pub consistency_rating: f64,
}

/// Aggregated performance of one team across its match history
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct TeamPerformanceProfile {
    pub team_key: String,
    pub matches_played: u32,
    pub wins: u32,
    pub losses: u32,
    pub auto_performance: AutoPerformance,
    pub teleop_performance: TeleopPerformance,
    pub endgame_performance: EndgamePerformance,
    pub overall_metrics: OverallMetrics,
    pub match_history: Vec<MatchContribution>,
}

impl TeamPerformanceProfile {
    /// Empty profile for a team that has not played yet
    pub fn empty(team_key: impl Into<String>) -> Self {
        Self { team_key: team_key.into(), ..Default::default() }
    }

    pub fn win_rate(&self) -> f64 {
        if self.matches_played == 0 {
            0.0
        } else {
            self.wins as f64 / self.matches_played as f64
        }
    }

    /// Serialize as structured context for downstream reporting
    pub fn to_json(&self) -> serde_json::Result<serde_json::Value> {
        serde_json::to_value(self)
    }
}
