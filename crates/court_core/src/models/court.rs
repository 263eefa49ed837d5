use super::team::Team;
use serde::{Deserialize, Serialize};

pub type CourtId = u32;

/// Global match sequence number, strictly increasing across all courts.
pub type MatchNumber = u64;

/// Addresses one of the two teams of a match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TeamSlot {
    First,
    Second,
}

impl TeamSlot {
    pub fn index(self) -> usize {
        match self {
            TeamSlot::First => 0,
            TeamSlot::Second => 1,
        }
    }
}

/// In-progress point counters, indexed like [`Match::teams`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LiveScore {
    pub points: [u32; 2],
}

impl LiveScore {
    pub fn get(&self, slot: TeamSlot) -> u32 {
        self.points[slot.index()]
    }

    /// Applies a signed delta, never dropping below zero.
    pub fn apply(&mut self, slot: TeamSlot, delta: i32) {
        let current = i64::from(self.points[slot.index()]);
        let next = (current + i64::from(delta)).clamp(0, i64::from(u32::MAX));
        self.points[slot.index()] = next as u32;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub number: MatchNumber,
    pub court_id: CourtId,
    pub teams: [Team; 2],
    /// Presentation-only; never persisted or captured in history.
    #[serde(skip)]
    pub live_score: Option<LiveScore>,
}

impl Match {
    pub fn new(number: MatchNumber, court_id: CourtId, first: Team, second: Team) -> Self {
        Self { number, court_id, teams: [first, second], live_score: None }
    }

    /// Position of `team` (by identity) within this match.
    pub fn slot_of(&self, team: &Team) -> Option<TeamSlot> {
        if self.teams[0].same_team(team) {
            Some(TeamSlot::First)
        } else if self.teams[1].same_team(team) {
            Some(TeamSlot::Second)
        } else {
            None
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Court {
    pub id: CourtId,
    pub current_match: Option<Match>,
    pub consecutive_wins: u32,
    pub streak_holder: Option<Team>,
}

impl Court {
    pub fn new(id: CourtId) -> Self {
        Self { id, current_match: None, consecutive_wins: 0, streak_holder: None }
    }

    pub fn is_active(&self) -> bool {
        self.current_match.is_some()
    }

    pub fn reset_streak(&mut self) {
        self.consecutive_wins = 0;
        self.streak_holder = None;
    }

    /// Copy of this court with any live score dropped.
    pub fn without_live_score(&self) -> Court {
        let mut court = self.clone();
        if let Some(current) = court.current_match.as_mut() {
            current.live_score = None;
        }
        court
    }
}
