use super::SAVE_VERSION;
use crate::engine::{SessionSnapshot, SessionState};
use crate::error::{Result, RotationError};
use crate::models::MatchNumber;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashSet;

/// Persisted form of a whole session.
///
/// `version`, `saved_at` and the history stacks are optional on input so that
/// documents written before they existed still load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct SessionDocument {
    /// Format version for migration; absent in legacy documents (0)
    #[serde(default)]
    pub version: u32,

    #[serde(default)]
    pub saved_at: Option<DateTime<Utc>>,

    /// Courts, queue and match log
    pub state: SessionState,

    pub match_counter: MatchNumber,

    /// Oldest first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub undo_stack: Option<Vec<SessionSnapshot>>,

    /// Oldest first
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub redo_stack: Option<Vec<SessionSnapshot>>,
}

impl SessionDocument {
    /// Document with no history, stamped now.
    pub fn new(state: SessionState, match_counter: MatchNumber) -> Self {
        Self {
            version: SAVE_VERSION,
            saved_at: Some(Utc::now()),
            state,
            match_counter,
            undo_stack: None,
            redo_stack: None,
        }
    }

    pub fn has_history(&self) -> bool {
        self.undo_stack.is_some() || self.redo_stack.is_some()
    }

    pub fn to_json_string(&self) -> std::result::Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json_str(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)?;
        Self::from_value(value)
    }

    /// Decode an already-parsed JSON document.
    ///
    /// The `state` section and a numeric `match_counter` are checked up front so
    /// that their absence is reported plainly rather than as a decode error.
    pub fn from_value(value: Value) -> Result<Self> {
        if !value.get("state").is_some_and(Value::is_object) {
            return Err(RotationError::InvalidSavedState("missing state section".to_string()));
        }
        if value.get("match_counter").and_then(Value::as_u64).is_none() {
            return Err(RotationError::InvalidSavedState(
                "missing or non-numeric match_counter".to_string(),
            ));
        }

        Ok(serde_json::from_value(value)?)
    }

    pub fn validate(&self) -> Result<()> {
        validate_state(&self.state, self.match_counter)?;

        let history = self.undo_stack.iter().chain(self.redo_stack.iter()).flatten();
        for snapshot in history {
            validate_state(&snapshot.state, snapshot.match_counter)?;
        }
        Ok(())
    }
}

fn validate_state(state: &SessionState, match_counter: MatchNumber) -> Result<()> {
    if state.courts.is_empty() {
        return Err(RotationError::InvalidSavedState("session has no courts".to_string()));
    }

    let mut court_ids = HashSet::new();
    for court in &state.courts {
        if !court_ids.insert(court.id) {
            return Err(RotationError::InvalidSavedState(format!(
                "duplicate court id {}",
                court.id
            )));
        }
    }

    if let Some(highest) = state.max_match_number() {
        if highest > match_counter {
            return Err(RotationError::InvalidSavedState(format!(
                "match_counter {} is behind match number {}",
                match_counter, highest
            )));
        }
    }
    Ok(())
}
