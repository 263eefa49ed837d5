//! Snapshot-based undo/redo
//!
//! Every structural mutation stores a full copy of the session taken just before it
//! ran. Live scores are stripped on capture, so they never travel through history.

use super::SessionState;
use crate::models::MatchNumber;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionSnapshot {
    pub state: SessionState,
    pub match_counter: MatchNumber,
}

impl SessionSnapshot {
    pub fn capture(state: &SessionState, match_counter: MatchNumber) -> Self {
        Self { state: state.without_live_scores(), match_counter }
    }
}

/// Bounded undo and redo stacks. The newest entry sits at the back.
#[derive(Debug, Clone)]
pub struct History {
    undo: VecDeque<SessionSnapshot>,
    redo: VecDeque<SessionSnapshot>,
    limit: usize,
}

impl History {
    pub fn new(limit: usize) -> Self {
        Self { undo: VecDeque::new(), redo: VecDeque::new(), limit: limit.max(1) }
    }

    /// Push the pre-mutation snapshot of a new structural change.
    pub fn record(&mut self, before: SessionSnapshot) {
        push_bounded(&mut self.undo, before, self.limit);
        self.redo.clear();
    }

    /// Swap `current` for the newest undo entry.
    pub fn step_back(&mut self, current: SessionSnapshot) -> Option<SessionSnapshot> {
        let previous = self.undo.pop_back()?;
        push_bounded(&mut self.redo, current, self.limit);
        Some(previous)
    }

    /// Swap `current` for the newest redo entry.
    pub fn step_forward(&mut self, current: SessionSnapshot) -> Option<SessionSnapshot> {
        let next = self.redo.pop_back()?;
        push_bounded(&mut self.undo, current, self.limit);
        Some(next)
    }

    pub fn clear(&mut self) {
        self.undo.clear();
        self.redo.clear();
    }

    pub fn can_undo(&self) -> bool {
        !self.undo.is_empty()
    }

    pub fn can_redo(&self) -> bool {
        !self.redo.is_empty()
    }

    pub fn undo_depth(&self) -> usize {
        self.undo.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo.len()
    }

    /// Oldest first.
    pub fn undo_entries(&self) -> Vec<SessionSnapshot> {
        self.undo.iter().cloned().collect()
    }

    /// Oldest first.
    pub fn redo_entries(&self) -> Vec<SessionSnapshot> {
        self.redo.iter().cloned().collect()
    }

    /// Replace both stacks, keeping only the newest `limit` entries of each.
    pub fn restore(&mut self, undo: Vec<SessionSnapshot>, redo: Vec<SessionSnapshot>) {
        self.clear();
        for snapshot in undo {
            push_bounded(&mut self.undo, snapshot, self.limit);
        }
        for snapshot in redo {
            push_bounded(&mut self.redo, snapshot, self.limit);
        }
    }
}

fn push_bounded(stack: &mut VecDeque<SessionSnapshot>, snapshot: SessionSnapshot, limit: usize) {
    stack.push_back(snapshot);
    while stack.len() > limit {
        stack.pop_front();
    }
}
