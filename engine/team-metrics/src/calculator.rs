use crate::config::{EndgamePointTable, ScoringConfig};
use crate::models::{AllianceScoreBreakdown, EndgameState, ReefPlacements, Seat};
use tracing::trace;

/// Estimates one seat's share of an alliance's score for a single phase
pub trait PhaseAttributor {
    type Estimate;

    fn attribute(&self, breakdown: &AllianceScoreBreakdown, seat: Seat) -> Self::Estimate;
}

/// Auto phase estimate for one seat
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AutoEstimate {
    pub crossed_line: bool,
    pub points: f64,
    pub coral_count: f64,
}

/// Teleop phase estimate for one seat
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TeleopEstimate {
    pub points: f64,
    pub coral_count: f64,
    pub reef: ReefPlacements,
}

/// Endgame phase estimate for one seat
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct EndgameEstimate {
    pub state: EndgameState,
    pub points: f64,
}

/// Auto: mobility credit plus an equal split of bonus coral among robots that moved
#[derive(Debug, Clone)]
pub struct AutoAttributor {
    mobility_points: f64,
}

impl AutoAttributor {
    pub fn new(config: &ScoringConfig) -> Self {
        Self { mobility_points: config.mobility_points }
    }
}

impl PhaseAttributor for AutoAttributor {
    type Estimate = AutoEstimate;

    fn attribute(&self, breakdown: &AllianceScoreBreakdown, seat: Seat) -> AutoEstimate {
        if !breakdown.auto_line_crossed(seat) {
            return AutoEstimate::default();
        }

        let mut estimate =
            AutoEstimate { crossed_line: true, points: self.mobility_points, coral_count: 0.0 };

        // Coral is not tracked per robot, so only the bonus case gets a share
        if breakdown.auto_bonus_achieved {
            let crossed = breakdown.robots_crossed();
            if crossed > 0 {
                let crossed = crossed as f64;
                estimate.points += breakdown.auto_coral_points as f64 / crossed;
                estimate.coral_count = breakdown.auto_coral_count as f64 / crossed;
            }
        }

        trace!(
            "Auto estimate for seat {}: {:.2} pts, {:.2} coral",
            seat,
            estimate.points,
            estimate.coral_count
        );

        estimate
    }
}

/// Teleop: alliance totals split by activity weight
#[derive(Debug, Clone)]
pub struct TeleopAttributor {
    active_weight: f64,
    inactive_weight: f64,
}

impl TeleopAttributor {
    pub fn new(config: &ScoringConfig) -> Self {
        Self { active_weight: config.active_weight, inactive_weight: config.inactive_weight }
    }

    /// Activity weight of every seat; reduced for robots that never left the line
    pub fn activity_weights(&self, breakdown: &AllianceScoreBreakdown) -> [f64; 3] {
        Seat::ALL.map(|seat| {
            if breakdown.auto_line_crossed(seat) {
                self.active_weight
            } else {
                self.inactive_weight
            }
        })
    }

    /// Fraction of any alliance-wide teleop quantity owed to `seat`
    pub fn share(&self, breakdown: &AllianceScoreBreakdown, seat: Seat) -> f64 {
        let weights = self.activity_weights(breakdown);
        let total: f64 = weights.iter().sum();
        weights[seat.index()] / total
    }
}

impl PhaseAttributor for TeleopAttributor {
    type Estimate = TeleopEstimate;

    fn attribute(&self, breakdown: &AllianceScoreBreakdown, seat: Seat) -> TeleopEstimate {
        let share = self.share(breakdown, seat);
        let reef = &breakdown.teleop_reef;

        let estimate = TeleopEstimate {
            points: breakdown.teleop_points as f64 * share,
            coral_count: breakdown.teleop_coral_count as f64 * share,
            reef: ReefPlacements {
                top_row: reef.top_row as f64 * share,
                mid_row: reef.mid_row as f64 * share,
                bot_row: reef.bot_row as f64 * share,
                trough: reef.trough as f64 * share,
            },
        };

        trace!(
            "Teleop estimate for seat {}: {:.2} pts (share {:.3})",
            seat,
            estimate.points,
            share
        );

        estimate
    }
}

/// Endgame: fixed points per final robot state
#[derive(Debug, Clone)]
pub struct EndgameAttributor {
    table: EndgamePointTable,
}

impl EndgameAttributor {
    pub fn new(config: &ScoringConfig) -> Self {
        Self { table: config.endgame_points }
    }
}

impl PhaseAttributor for EndgameAttributor {
    type Estimate = EndgameEstimate;

    fn attribute(&self, breakdown: &AllianceScoreBreakdown, seat: Seat) -> EndgameEstimate {
        let state = breakdown.endgame_state(seat);
        EndgameEstimate { state, points: self.table.points_for(state) }
    }
}
