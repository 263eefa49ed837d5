//! Standings derived from the match log

use super::RotationEngine;
use crate::models::{MatchResult, TeamKey, TeamStatistics};
use std::collections::BTreeMap;

/// Fold `log` into per-team statistics.
///
/// Ordered by wins, then points scored, both descending. Remaining ties fall back
/// to ascending [`TeamKey`], so the order is stable for a given log.
pub fn compute_team_statistics(log: &[MatchResult]) -> Vec<TeamStatistics> {
    let mut table: BTreeMap<TeamKey, TeamStatistics> = BTreeMap::new();

    for result in log {
        let winner = table
            .entry(result.winner.key())
            .or_insert_with(|| TeamStatistics::new(result.winner.clone()));
        winner.wins += 1;
        winner.points_for += u64::from(result.winner_score());
        winner.points_against += u64::from(result.loser_score());

        let loser = table
            .entry(result.loser.key())
            .or_insert_with(|| TeamStatistics::new(result.loser.clone()));
        loser.losses += 1;
        loser.points_for += u64::from(result.loser_score());
        loser.points_against += u64::from(result.winner_score());
    }

    let mut standings: Vec<TeamStatistics> = table.into_values().collect();
    standings.sort_by(|a, b| b.wins.cmp(&a.wins).then_with(|| b.points_for.cmp(&a.points_for)));
    standings
}

impl RotationEngine {
    pub fn team_statistics(&self) -> Vec<TeamStatistics> {
        compute_team_statistics(&self.state.match_log)
    }

    pub fn session_winner(&self) -> Option<TeamStatistics> {
        self.team_statistics().into_iter().next()
    }
}
