//! # Court Rotation Engine
//!
//! Owns the courts, the shared waiting queue, the match log and the undo/redo
//! history of one session. Every mutating call validates first and then applies
//! its whole effect, so a call that returns an error has changed nothing.
//!
//! ## Rotation rule
//! - The winner of a match stays on court and the loser joins the back of the queue.
//! - Once a team has won `streak_limit` (default 2) matches in a row on a court and
//!   at least two teams are waiting, winner and loser both join the queue (winner
//!   first) and the two teams at the front take the court.
//!
//! ## Tracked mutations
//! `add_teams`, `record_result`, `reorder_team_in_queue` and `edit_match_result`
//! push a snapshot of the previous state onto the undo stack. `initialize` and
//! loading a document are hard resets. Live score updates are never tracked.

mod display;
mod history;
mod standings;

#[cfg(test)]
mod properties_test;

pub use display::EMPTY_QUEUE_TEXT;
pub use history::{History, SessionSnapshot};
pub use standings::compute_team_statistics;

use crate::config::RotationConfig;
use crate::error::{Result, RotationError};
use crate::models::{
    Court, CourtId, LiveScore, Match, MatchNumber, MatchResult, ScoreEntry, Team, TeamKey,
    TeamSlot,
};
use crate::save::{migrate_document, SessionDocument, SAVE_VERSION};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::collections::{HashSet, VecDeque};

/// Everything that makes up a session apart from the match counter and history.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionState {
    pub courts: Vec<Court>,
    pub queue: VecDeque<Team>,
    pub match_log: Vec<MatchResult>,
}

impl SessionState {
    pub fn without_live_scores(&self) -> SessionState {
        SessionState {
            courts: self.courts.iter().map(Court::without_live_score).collect(),
            queue: self.queue.clone(),
            match_log: self.match_log.clone(),
        }
    }

    pub fn court(&self, court_id: CourtId) -> Option<&Court> {
        self.courts.iter().find(|c| c.id == court_id)
    }

    /// Identities of every team currently queued or on a court.
    pub fn active_team_keys(&self) -> HashSet<TeamKey> {
        let on_court = self
            .courts
            .iter()
            .filter_map(|c| c.current_match.as_ref())
            .flat_map(|m| m.teams.iter());

        self.queue.iter().chain(on_court).map(Team::key).collect()
    }

    /// Highest match number referenced anywhere in the state.
    pub fn max_match_number(&self) -> Option<MatchNumber> {
        let on_court = self.courts.iter().filter_map(|c| c.current_match.as_ref()).map(|m| m.number);
        let logged = self.match_log.iter().map(|r| r.match_number);
        on_court.chain(logged).max()
    }
}

/// Outcome of matching two score entries against the two teams of a match.
#[derive(Debug, Clone, Copy)]
struct Ranking {
    winner: usize,
    loser: usize,
    /// `[winner_score, loser_score]`
    scores: [u32; 2],
    tied: bool,
}

/// Pairs `entries` with `teams` by identity and orders them by score.
///
/// Indices in the returned [`Ranking`] refer to `teams`. On a tie the second entry
/// is taken as the winner.
fn rank_entries(teams: [&Team; 2], entries: &[ScoreEntry]) -> Result<Ranking> {
    let [first, second] = entries else {
        return Err(RotationError::InvalidResult(format!(
            "expected exactly two score entries, got {}",
            entries.len()
        )));
    };

    let position = |entry: &ScoreEntry| teams.iter().position(|t| t.same_team(&entry.team));
    let (Some(first_index), Some(second_index)) = (position(first), position(second)) else {
        return Err(RotationError::InvalidResult(
            "score entries do not match the teams of this match".to_string(),
        ));
    };
    if first_index == second_index {
        return Err(RotationError::InvalidResult(format!(
            "team {} appears twice in the score entries",
            first.team.key()
        )));
    }

    let tied = first.score == second.score;
    let ranking = if first.score > second.score {
        Ranking {
            winner: first_index,
            loser: second_index,
            scores: [first.score, second.score],
            tied,
        }
    } else {
        Ranking {
            winner: second_index,
            loser: first_index,
            scores: [second.score, first.score],
            tied,
        }
    };
    Ok(ranking)
}

fn next_match_number(counter: MatchNumber) -> Result<MatchNumber> {
    counter.checked_add(1).ok_or(RotationError::MatchNumbersExhausted { last: counter })
}

pub struct RotationEngine {
    config: RotationConfig,
    state: SessionState,
    match_counter: MatchNumber,
    history: History,
}

impl RotationEngine {
    pub fn new(config: RotationConfig) -> Result<Self> {
        config.validate()?;

        let courts = (1..=config.court_count).map(|id| Court::new(id as CourtId)).collect();
        let history = History::new(config.history_limit);

        Ok(Self {
            config,
            state: SessionState { courts, ..SessionState::default() },
            match_counter: 0,
            history,
        })
    }

    // ========================
    // Queries
    // ========================

    pub fn config(&self) -> &RotationConfig {
        &self.config
    }

    pub fn courts(&self) -> &[Court] {
        &self.state.courts
    }

    pub fn court(&self, court_id: CourtId) -> Option<&Court> {
        self.state.court(court_id)
    }

    pub fn queue(&self) -> &VecDeque<Team> {
        &self.state.queue
    }

    pub fn match_log(&self) -> &[MatchResult] {
        &self.state.match_log
    }

    pub fn match_counter(&self) -> MatchNumber {
        self.match_counter
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// True once any court holds a match.
    pub fn is_initialized(&self) -> bool {
        self.state.courts.iter().any(Court::is_active)
    }

    /// Current state as it would be captured for history.
    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot::capture(&self.state, self.match_counter)
    }

    // ========================
    // Session setup
    // ========================

    /// Put the first `2 * courts` teams on court in order and queue the rest.
    ///
    /// Clears the match log and both history stacks. The match counter keeps
    /// counting from where it was.
    pub fn initialize(&mut self, teams: Vec<Team>) -> Result<()> {
        let required = self.state.courts.len() * 2;
        let available = teams.len();
        if available < required {
            return Err(RotationError::InsufficientParticipants { required, available });
        }

        let mut teams = teams.into_iter();
        let mut counter = self.match_counter;
        let mut courts = Vec::with_capacity(self.state.courts.len());

        for court in &self.state.courts {
            let (Some(first), Some(second)) = (teams.next(), teams.next()) else {
                return Err(RotationError::InsufficientParticipants { required, available });
            };
            counter = next_match_number(counter)?;
            let mut fresh = Court::new(court.id);
            fresh.current_match = Some(Match::new(counter, court.id, first, second));
            courts.push(fresh);
        }

        self.state = SessionState { courts, queue: teams.collect(), match_log: Vec::new() };
        self.match_counter = counter;
        self.history.clear();

        log::info!(
            "Initialized rotation: {} courts, {} teams queued",
            self.state.courts.len(),
            self.state.queue.len()
        );
        Ok(())
    }

    /// Append teams to the queue, skipping any already queued or on court.
    ///
    /// Returns how many teams were actually added.
    pub fn add_teams(&mut self, candidates: Vec<Team>) -> Result<usize> {
        if !self.is_initialized() {
            return Err(RotationError::NotInitialized);
        }

        let before = self.snapshot();
        let mut known = self.state.active_team_keys();
        let mut added = 0;

        for team in candidates {
            if known.insert(team.key()) {
                self.state.queue.push_back(team);
                added += 1;
            } else {
                log::debug!("Skipping duplicate team {}", team.key());
            }
        }

        self.history.record(before);
        log::info!("Added {} teams, queue length {}", added, self.state.queue.len());
        Ok(added)
    }

    // ========================
    // Results & rotation
    // ========================

    /// Record the result of the match on `court_id` and rotate the next match in.
    pub fn record_result(
        &mut self,
        court_id: CourtId,
        entries: &[ScoreEntry],
    ) -> Result<MatchResult> {
        let court_index = self.court_index(court_id)?;
        let current = self.state.courts[court_index]
            .current_match
            .as_ref()
            .ok_or(RotationError::NoActiveMatch { court_id })?;

        let ranking = rank_entries([&current.teams[0], &current.teams[1]], entries)?;
        if ranking.tied {
            log::warn!(
                "Tied score {}-{} recorded on court {}; treating second entry as winner",
                ranking.scores[0],
                ranking.scores[1],
                court_id
            );
        }

        let winner = current.teams[ranking.winner].clone();
        let loser = current.teams[ranking.loser].clone();
        let result = MatchResult {
            match_number: current.number,
            court_id,
            winner: winner.clone(),
            loser: loser.clone(),
            scores: ranking.scores,
            recorded_at: Utc::now(),
        };

        // Work on copies so a failure leaves the session untouched
        let mut court = self.state.courts[court_index].clone();
        let mut queue = self.state.queue.clone();

        let extends_streak = court.streak_holder.as_ref().is_some_and(|h| h.same_team(&winner));
        if extends_streak {
            court.consecutive_wins += 1;
        } else {
            court.consecutive_wins = 1;
            court.streak_holder = Some(winner.clone());
        }

        let (first, second) = if court.consecutive_wins >= self.config.streak_limit
            && queue.len() >= 2
        {
            log::info!(
                "Team {} reached {} straight wins on court {}; rotating both teams out",
                winner.key(),
                court.consecutive_wins,
                court_id
            );
            queue.push_back(winner);
            queue.push_back(loser);
            let (Some(first), Some(second)) = (queue.pop_front(), queue.pop_front()) else {
                return Err(RotationError::InsufficientParticipants {
                    required: 2,
                    available: queue.len(),
                });
            };
            court.reset_streak();
            (first, second)
        } else {
            queue.push_back(loser);
            let Some(challenger) = queue.pop_front() else {
                return Err(RotationError::InsufficientParticipants { required: 1, available: 0 });
            };
            (winner, challenger)
        };

        let number = next_match_number(self.match_counter)?;
        court.current_match = Some(Match::new(number, court_id, first, second));

        let before = self.snapshot();
        self.state.courts[court_index] = court;
        self.state.queue = queue;
        self.state.match_log.push(result.clone());
        self.match_counter = number;
        self.history.record(before);

        log::debug!(
            "Court {}: match {} won by {} {}-{}, next match {}",
            court_id,
            result.match_number,
            result.winner.key(),
            result.scores[0],
            result.scores[1],
            number
        );
        Ok(result)
    }

    /// Adjust the live score of one side of the match on `court_id`.
    ///
    /// Live scores are presentation state only: not tracked by undo/redo and not
    /// part of any snapshot or saved document.
    pub fn update_score(
        &mut self,
        court_id: CourtId,
        slot: TeamSlot,
        delta: i32,
    ) -> Result<LiveScore> {
        let court_index = self.court_index(court_id)?;
        let current = self.state.courts[court_index]
            .current_match
            .as_mut()
            .ok_or(RotationError::NoActiveMatch { court_id })?;

        let score = current.live_score.get_or_insert_with(LiveScore::default);
        score.apply(slot, delta);
        Ok(*score)
    }

    // ========================
    // Queue & history edits
    // ========================

    /// Move the queued team at `from` so it ends up at index `to`.
    ///
    /// `from == to` leaves the queue as is but still records an undo step.
    pub fn reorder_team_in_queue(&mut self, from: usize, to: usize) -> Result<()> {
        if !self.is_initialized() {
            return Err(RotationError::NotInitialized);
        }

        let len = self.state.queue.len();
        for index in [from, to] {
            if index >= len {
                return Err(RotationError::InvalidQueueIndex { index, len });
            }
        }

        let before = self.snapshot();
        if from != to {
            if let Some(team) = self.state.queue.remove(from) {
                self.state.queue.insert(to, team);
            }
        }
        self.history.record(before);

        log::debug!("Moved queue entry {} to {}", from, to);
        Ok(())
    }

    /// Correct the scores of a logged match without replaying any rotation.
    pub fn edit_match_result(
        &mut self,
        match_index: usize,
        entries: &[ScoreEntry],
    ) -> Result<MatchResult> {
        let len = self.state.match_log.len();
        let existing = self
            .state
            .match_log
            .get(match_index)
            .ok_or(RotationError::InvalidMatchIndex { index: match_index, len })?;

        let ranking = rank_entries([&existing.winner, &existing.loser], entries)?;
        if ranking.tied {
            return Err(RotationError::InvalidResult(format!(
                "tied score {}-{} cannot decide a winner",
                ranking.scores[0], ranking.scores[1]
            )));
        }

        let teams = [existing.winner.clone(), existing.loser.clone()];
        let before = self.snapshot();

        let entry = &mut self.state.match_log[match_index];
        entry.winner = teams[ranking.winner].clone();
        entry.loser = teams[ranking.loser].clone();
        entry.scores = ranking.scores;
        let edited = entry.clone();

        self.history.record(before);
        log::info!(
            "Edited match {}: {} won {}-{}",
            edited.match_number,
            edited.winner.key(),
            edited.scores[0],
            edited.scores[1]
        );
        Ok(edited)
    }

    // ========================
    // Undo / redo
    // ========================

    pub fn undo(&mut self) -> bool {
        if !self.history.can_undo() {
            return false;
        }
        let current = self.snapshot();
        match self.history.step_back(current) {
            Some(previous) => {
                self.restore(previous);
                true
            }
            None => false,
        }
    }

    pub fn redo(&mut self) -> bool {
        if !self.history.can_redo() {
            return false;
        }
        let current = self.snapshot();
        match self.history.step_forward(current) {
            Some(next) => {
                self.restore(next);
                true
            }
            None => false,
        }
    }

    pub fn can_undo(&self) -> bool {
        self.history.can_undo()
    }

    pub fn can_redo(&self) -> bool {
        self.history.can_redo()
    }

    pub fn undo_depth(&self) -> usize {
        self.history.undo_depth()
    }

    pub fn redo_depth(&self) -> usize {
        self.history.redo_depth()
    }

    // ========================
    // Save / load
    // ========================

    /// Full session document including undo/redo history.
    pub fn to_document(&self) -> SessionDocument {
        SessionDocument {
            version: SAVE_VERSION,
            saved_at: Some(Utc::now()),
            state: self.state.without_live_scores(),
            match_counter: self.match_counter,
            undo_stack: Some(self.history.undo_entries()),
            redo_stack: Some(self.history.redo_entries()),
        }
    }

    pub fn to_json(&self) -> std::result::Result<String, serde_json::Error> {
        self.to_document().to_json_string()
    }

    /// Replace the whole session with `document`.
    ///
    /// History is cleared unless the document carries its own undo/redo stacks.
    /// The configured court count follows the document.
    pub fn load_document(&mut self, document: SessionDocument) -> Result<()> {
        let document = migrate_document(document)?;
        document.validate()?;

        if document.state.courts.len() != self.config.court_count {
            log::warn!(
                "Loaded session has {} courts, config expects {}",
                document.state.courts.len(),
                self.config.court_count
            );
            self.config.court_count = document.state.courts.len();
        }

        self.state = document.state.without_live_scores();
        self.match_counter = document.match_counter;

        match (document.undo_stack, document.redo_stack) {
            (None, None) => self.history.clear(),
            (undo, redo) => {
                self.history.restore(undo.unwrap_or_default(), redo.unwrap_or_default())
            }
        }

        log::info!(
            "Loaded session: {} matches logged, {} teams queued, history {}/{}",
            self.state.match_log.len(),
            self.state.queue.len(),
            self.history.undo_depth(),
            self.history.redo_depth()
        );
        Ok(())
    }

    pub fn load_json(&mut self, json: &str) -> Result<()> {
        let document = SessionDocument::from_json_str(json)?;
        self.load_document(document)
    }

    // Private helper methods

    fn court_index(&self, court_id: CourtId) -> Result<usize> {
        self.state
            .courts
            .iter()
            .position(|c| c.id == court_id)
            .ok_or(RotationError::CourtNotFound { court_id })
    }

    fn restore(&mut self, snapshot: SessionSnapshot) {
        self.state = snapshot.state;
        self.match_counter = snapshot.match_counter;
    }
}
