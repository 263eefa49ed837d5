use super::court::{CourtId, MatchNumber};
use super::team::Team;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One side of a reported score.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreEntry {
    pub team: Team,
    pub score: u32,
}

impl ScoreEntry {
    pub fn new(team: Team, score: u32) -> Self {
        Self { team, score }
    }
}

/// Historical record of a finished match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub match_number: MatchNumber,
    pub court_id: CourtId,
    pub winner: Team,
    pub loser: Team,
    /// `[winner_score, loser_score]`
    pub scores: [u32; 2],
    pub recorded_at: DateTime<Utc>,
}

impl MatchResult {
    pub fn winner_score(&self) -> u32 {
        self.scores[0]
    }

    pub fn loser_score(&self) -> u32 {
        self.scores[1]
    }
}
