//! Rotation engine configuration
//!
//! ```rust
//! use court_core::RotationConfig;
//!
//! let config = RotationConfig::default().with_court_count(3).with_history_limit(20);
//! assert!(config.validate().is_ok());
//! ```

use crate::error::{Result, RotationError};
use serde::{Deserialize, Serialize};

pub const DEFAULT_COURT_COUNT: usize = 1;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;
pub const DEFAULT_STREAK_LIMIT: u32 = 2;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RotationConfig {
    /// Number of physical courts (default: 1)
    pub court_count: usize,
    /// Maximum depth of each of the undo and redo stacks (default: 50)
    pub history_limit: usize,
    /// Consecutive wins after which both teams leave the court (default: 2)
    pub streak_limit: u32,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            court_count: DEFAULT_COURT_COUNT,
            history_limit: DEFAULT_HISTORY_LIMIT,
            streak_limit: DEFAULT_STREAK_LIMIT,
        }
    }
}

impl RotationConfig {
    pub fn new(court_count: usize) -> Self {
        Self { court_count, ..Self::default() }
    }

    pub fn with_court_count(mut self, court_count: usize) -> Self {
        self.court_count = court_count;
        self
    }

    pub fn with_history_limit(mut self, history_limit: usize) -> Self {
        self.history_limit = history_limit;
        self
    }

    pub fn with_streak_limit(mut self, streak_limit: u32) -> Self {
        self.streak_limit = streak_limit;
        self
    }

    /// Teams needed to fill every court.
    pub fn teams_on_court(&self) -> usize {
        self.court_count * 2
    }

    pub fn validate(&self) -> Result<()> {
        if self.court_count == 0 {
            return Err(RotationError::InvalidConfig("court_count must be at least 1".to_string()));
        }
        if self.history_limit == 0 {
            return Err(RotationError::InvalidConfig(
                "history_limit must be at least 1".to_string(),
            ));
        }
        if self.streak_limit == 0 {
            return Err(RotationError::InvalidConfig("streak_limit must be at least 1".to_string()));
        }
        Ok(())
    }

    /// Parse and validate a JSON settings document. Missing fields use defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: RotationConfig = serde_json::from_str(json)
            .map_err(|e| RotationError::InvalidConfig(format!("Failed to parse: {}", e)))?;
        config.validate()?;
        Ok(config)
    }
}
