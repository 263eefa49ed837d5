use super::team::Team;
use serde::{Deserialize, Serialize};

/// Per-team aggregate derived from the match log.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStatistics {
    pub team: Team,
    pub wins: u32,
    pub losses: u32,
    pub points_for: u64,
    pub points_against: u64,
}

impl TeamStatistics {
    pub fn new(team: Team) -> Self {
        Self { team, wins: 0, losses: 0, points_for: 0, points_against: 0 }
    }

    pub fn games_played(&self) -> u32 {
        self.wins + self.losses
    }

    pub fn point_difference(&self) -> i128 {
        i128::from(self.points_for) - i128::from(self.points_against)
    }
}
