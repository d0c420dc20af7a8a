//! Locates a team within a match.

use crate::models::{AllianceColor, MatchRecord, Seat};
use tracing::warn;

/// Where a team sat in a match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeatAssignment {
    pub alliance: AllianceColor,
    pub seat: Seat,
}

/// Anything that can tell which alliance and seat a team occupied in a match
pub trait MatchClassifier {
    /// `None` when the team did not play in the match
    fn classify(&self, record: &MatchRecord, team_key: &str) -> Option<SeatAssignment>;
}

/// Classifies by position in each alliance's ordered team list.
///
/// A team listed on both alliances resolves to red.
#[derive(Debug, Clone, Copy, Default)]
pub struct AllianceSeatClassifier;

impl AllianceSeatClassifier {
    pub fn new() -> Self {
        Self
    }

    fn seat_in(record: &MatchRecord, alliance: AllianceColor, team_key: &str) -> Option<Seat> {
        record
            .seated_teams(alliance)
            .iter()
            .position(|key| key == team_key)
            .and_then(|idx| Seat::from_number(idx as u8 + 1))
    }
}

impl MatchClassifier for AllianceSeatClassifier {
    fn classify(&self, record: &MatchRecord, team_key: &str) -> Option<SeatAssignment> {
        if team_key.is_empty() {
            return None;
        }

        let red = Self::seat_in(record, AllianceColor::Red, team_key);
        let blue = Self::seat_in(record, AllianceColor::Blue, team_key);

        match (red, blue) {
            (Some(seat), Some(blue_seat)) => {
                warn!(
                    "Team {} listed on both alliances in match {} (red seat {}, blue seat {}); \
                     using red",
                    team_key, record.key, seat, blue_seat
                );
                Some(SeatAssignment { alliance: AllianceColor::Red, seat })
            }
            (Some(seat), None) => Some(SeatAssignment { alliance: AllianceColor::Red, seat }),
            (None, Some(seat)) => Some(SeatAssignment { alliance: AllianceColor::Blue, seat }),
            (None, None) => None,
        }
    }
}
