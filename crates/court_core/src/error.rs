use thiserror::Error;

use crate::models::{CourtId, MatchNumber};

/// Every way a rotation call can be rejected.
///
/// All variants are caller-input or precondition violations; none are transient.
/// A call that returns one of these has left the engine untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum RotationError {
    #[error("Insufficient participants: need {required} teams, have {available}")]
    InsufficientParticipants { required: usize, available: usize },

    #[error("Invalid result: {0}")]
    InvalidResult(String),

    #[error("Court {court_id} has no active match")]
    NoActiveMatch { court_id: CourtId },

    #[error("Court not found: {court_id}")]
    CourtNotFound { court_id: CourtId },

    #[error("Invalid queue index {index} (queue length {len})")]
    InvalidQueueIndex { index: usize, len: usize },

    #[error("Invalid match index {index} (match log length {len})")]
    InvalidMatchIndex { index: usize, len: usize },

    #[error("Rotation not initialized")]
    NotInitialized,

    #[error("Invalid saved state: {0}")]
    InvalidSavedState(String),

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Match numbers exhausted after {last}")]
    MatchNumbersExhausted { last: MatchNumber },
}

impl RotationError {
    /// Whether the failure came from a malformed request rather than session state.
    pub fn is_input_error(&self) -> bool {
        match self {
            RotationError::InvalidResult(_)
            | RotationError::CourtNotFound { .. }
            | RotationError::InvalidQueueIndex { .. }
            | RotationError::InvalidMatchIndex { .. }
            | RotationError::InvalidSavedState(_)
            | RotationError::InvalidConfig(_) => true,
            RotationError::InsufficientParticipants { .. }
            | RotationError::NoActiveMatch { .. }
            | RotationError::NotInitialized
            | RotationError::MatchNumbersExhausted { .. } => false,
        }
    }
}

impl From<serde_json::Error> for RotationError {
    fn from(err: serde_json::Error) -> Self {
        RotationError::InvalidSavedState(err.to_string())
    }
}

pub type Result<T> = std::result::Result<T, RotationError>;
