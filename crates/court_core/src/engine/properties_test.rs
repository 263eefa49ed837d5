//! Property-based tests for rotation invariants

use super::*;
use crate::models::{are_teams_equal, Player};
use proptest::prelude::*;

fn team(a: u32, b: u32) -> Team {
    Team::new(Player::new(a, format!("P{}", a)), Player::new(b, format!("P{}", b)))
}

/// `count` teams with pairwise distinct identities.
fn distinct_teams(count: usize, offset: u32) -> Vec<Team> {
    (0..count as u32).map(|i| team(offset + i * 2 + 1, offset + i * 2 + 2)).collect()
}

pub fn team_strategy() -> impl Strategy<Value = Team> {
    (1u32..=200, 1u32..=200)
        .prop_filter("players must differ", |(a, b)| a != b)
        .prop_map(|(a, b)| team(a, b))
}

#[derive(Debug, Clone)]
enum Op {
    Record { court: usize, first_wins: bool, loser_points: u32, margin: u32 },
    Reorder { from: usize, to: usize },
    Add { count: usize },
    Edit { index: usize, first_wins: bool },
    Undo,
    Redo,
}

fn structural_op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => (0usize..4, any::<bool>(), 0u32..25, 1u32..10).prop_map(
            |(court, first_wins, loser_points, margin)| Op::Record {
                court,
                first_wins,
                loser_points,
                margin
            }
        ),
        1 => (0usize..8, 0usize..8).prop_map(|(from, to)| Op::Reorder { from, to }),
    ]
}

fn op_strategy() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => structural_op_strategy(),
        1 => (0usize..3).prop_map(|count| Op::Add { count }),
        1 => (0usize..6, any::<bool>()).prop_map(|(index, first_wins)| Op::Edit { index, first_wins }),
        1 => Just(Op::Undo),
        1 => Just(Op::Redo),
    ]
}

/// Apply `op`, deriving score entries from whatever is currently on court.
fn apply(engine: &mut RotationEngine, op: &Op, fresh_ids: &mut u32) -> Result<()> {
    match *op {
        Op::Record { court, first_wins, loser_points, margin } => {
            let court_id = (court % engine.courts().len()) as CourtId + 1;
            let teams = engine
                .court(court_id)
                .and_then(|c| c.current_match.as_ref())
                .map(|m| m.teams.clone())
                .ok_or(RotationError::NoActiveMatch { court_id })?;
            let (winner, loser) = if first_wins { (0, 1) } else { (1, 0) };
            let entries = [
                ScoreEntry::new(teams[loser].clone(), loser_points),
                ScoreEntry::new(teams[winner].clone(), loser_points + margin),
            ];
            engine.record_result(court_id, &entries).map(|_| ())
        }
        Op::Reorder { from, to } => engine.reorder_team_in_queue(from, to),
        Op::Add { count } => {
            let teams = distinct_teams(count, *fresh_ids);
            *fresh_ids += count as u32 * 2;
            engine.add_teams(teams).map(|_| ())
        }
        Op::Edit { index, first_wins } => {
            let Some(logged) = engine.match_log().get(index).cloned() else {
                return engine.edit_match_result(index, &[]).map(|_| ());
            };
            let (high, low) = if first_wins { (21, 17) } else { (17, 21) };
            let entries =
                [ScoreEntry::new(logged.winner, high), ScoreEntry::new(logged.loser, low)];
            engine.edit_match_result(index, &entries).map(|_| ())
        }
        Op::Undo => {
            engine.undo();
            Ok(())
        }
        Op::Redo => {
            engine.redo();
            Ok(())
        }
    }
}

fn assert_consistent(engine: &RotationEngine) -> std::result::Result<(), TestCaseError> {
    let on_court = engine.courts().iter().filter(|c| c.is_active()).count() * 2;
    let active = engine.state().active_team_keys();
    prop_assert_eq!(active.len(), on_court + engine.queue().len(), "duplicate team identity");

    for court in engine.courts() {
        prop_assert_eq!(court.streak_holder.is_none(), court.consecutive_wins == 0);
    }
    if let Some(highest) = engine.state().max_match_number() {
        prop_assert!(highest <= engine.match_counter());
    }
    Ok(())
}

proptest! {
    #[test]
    fn test_team_equality_ignores_player_order(first in team_strategy()) {
        let swapped = Team::new(first.second().clone(), first.first().clone());

        prop_assert!(are_teams_equal(&first, &first));
        prop_assert!(are_teams_equal(&first, &swapped));
        prop_assert!(are_teams_equal(&swapped, &first));
        prop_assert_eq!(first.key(), swapped.key());
    }

    #[test]
    fn test_team_equality_is_symmetric(a in team_strategy(), b in team_strategy()) {
        prop_assert_eq!(are_teams_equal(&a, &b), are_teams_equal(&b, &a));
    }

    #[test]
    fn test_rotation_conserves_teams(
        courts in 1usize..=3,
        extra in 0usize..6,
        ops in prop::collection::vec(structural_op_strategy(), 0..40),
    ) {
        let total = courts * 2 + extra;
        let mut engine = RotationEngine::new(RotationConfig::new(courts)).unwrap();
        engine.initialize(distinct_teams(total, 0)).unwrap();
        let mut fresh_ids = 10_000;
        let mut recorded = 0;

        for op in &ops {
            if apply(&mut engine, op, &mut fresh_ids).is_ok() && matches!(op, Op::Record { .. }) {
                recorded += 1;
            }
            prop_assert_eq!(engine.queue().len() + courts * 2, total);
            assert_consistent(&engine)?;
        }

        prop_assert_eq!(engine.match_log().len(), recorded);
        prop_assert_eq!(engine.match_counter(), (courts + recorded) as MatchNumber);
    }

    #[test]
    fn test_failed_operations_change_nothing(
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let mut engine = RotationEngine::new(RotationConfig::new(2)).unwrap();
        engine.initialize(distinct_teams(6, 0)).unwrap();
        let mut fresh_ids = 10_000;

        for op in &ops {
            let before = engine.snapshot();
            let depths = (engine.undo_depth(), engine.redo_depth());

            if apply(&mut engine, op, &mut fresh_ids).is_err() {
                prop_assert_eq!(engine.snapshot(), before);
                prop_assert_eq!((engine.undo_depth(), engine.redo_depth()), depths);
            }
            assert_consistent(&engine)?;
        }
    }

    #[test]
    fn test_undo_all_then_redo_all(
        ops in prop::collection::vec(structural_op_strategy(), 1..25),
    ) {
        let mut engine = RotationEngine::new(RotationConfig::new(1)).unwrap();
        engine.initialize(distinct_teams(5, 0)).unwrap();
        let initial = engine.snapshot();
        let mut fresh_ids = 10_000;

        for op in &ops {
            let _ = apply(&mut engine, op, &mut fresh_ids);
        }
        let latest = engine.snapshot();
        let depth = engine.undo_depth();

        while engine.undo() {}
        prop_assert_eq!(engine.snapshot(), initial);
        prop_assert_eq!(engine.redo_depth(), depth);

        while engine.redo() {}
        prop_assert_eq!(engine.snapshot(), latest);
        prop_assert_eq!(engine.undo_depth(), depth);
    }

    #[test]
    fn test_history_never_exceeds_limit(
        limit in 1usize..6,
        ops in prop::collection::vec(op_strategy(), 0..40),
    ) {
        let config = RotationConfig::new(1).with_history_limit(limit);
        let mut engine = RotationEngine::new(config).unwrap();
        engine.initialize(distinct_teams(4, 0)).unwrap();
        let mut fresh_ids = 10_000;

        for op in &ops {
            let _ = apply(&mut engine, op, &mut fresh_ids);
            prop_assert!(engine.undo_depth() <= limit);
            prop_assert!(engine.redo_depth() <= limit);
        }
    }

    #[test]
    fn test_saved_session_loads_back(
        courts in 1usize..=2,
        ops in prop::collection::vec(op_strategy(), 0..30),
    ) {
        let mut engine = RotationEngine::new(RotationConfig::new(courts)).unwrap();
        engine.initialize(distinct_teams(courts * 2 + 2, 0)).unwrap();
        let mut fresh_ids = 10_000;
        for op in &ops {
            let _ = apply(&mut engine, op, &mut fresh_ids);
        }

        let json = engine.to_json().unwrap();
        let mut restored = RotationEngine::new(RotationConfig::new(courts)).unwrap();
        restored.load_json(&json).unwrap();

        prop_assert_eq!(restored.snapshot(), engine.snapshot());
        prop_assert_eq!(restored.undo_depth(), engine.undo_depth());
        prop_assert_eq!(restored.redo_depth(), engine.redo_depth());
    }
}
