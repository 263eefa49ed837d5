//! # court_core - Win-Streak Court Rotation Engine
//!
//! Rotates two-player teams through a fixed set of courts. Winners hold the court,
//! losers join a shared queue, and a team that wins twice in a row makes way for
//! the next two teams in line.
//!
//! ## Features
//! - Identity-based teams (the sorted pair of player ids, not the input order)
//! - Full match log with per-team standings
//! - Bounded snapshot undo/redo for every structural change
//! - Versioned JSON session documents with migration
//! - Per-session locking registry for concurrent hosts
//!
//! ```rust
//! use court_core::{Player, RotationConfig, RotationEngine, ScoreEntry, Team};
//!
//! let team = |a: u32, b: u32| {
//!     Team::new(Player::new(a, format!("P{}", a)), Player::new(b, format!("P{}", b)))
//! };
//!
//! let mut engine = RotationEngine::new(RotationConfig::default()).unwrap();
//! engine.initialize(vec![team(1, 2), team(3, 4), team(5, 6)]).unwrap();
//!
//! engine
//!     .record_result(1, &[ScoreEntry::new(team(1, 2), 15), ScoreEntry::new(team(3, 4), 11)])
//!     .unwrap();
//!
//! assert_eq!(engine.beautify_queue(), "P3, P4");
//! assert!(engine.undo());
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod models;
pub mod save;
pub mod state;

pub use config::RotationConfig;
pub use engine::{
    compute_team_statistics, RotationEngine, SessionSnapshot, SessionState, EMPTY_QUEUE_TEXT,
};
pub use error::{Result, RotationError};
pub use models::{
    are_teams_equal, Court, CourtId, LiveScore, Match, MatchNumber, MatchResult, Player,
    PlayerId, ScoreEntry, Team, TeamKey, TeamSlot, TeamStatistics,
};

// Re-export save system
pub use save::{SaveError, SessionDocument, SessionFiles, SAVE_VERSION};

// Re-export session registry
pub use state::{SessionId, SessionStore, SharedEngine, SESSIONS};

// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
