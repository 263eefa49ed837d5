pub mod court;
pub mod match_result;
pub mod player;
pub mod stats;
pub mod team;

pub use court::{Court, CourtId, LiveScore, Match, MatchNumber, TeamSlot};
pub use match_result::{MatchResult, ScoreEntry};
pub use player::{Player, PlayerId};
pub use stats::TeamStatistics;
pub use team::{are_teams_equal, Team, TeamKey};
