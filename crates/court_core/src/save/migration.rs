use super::format::SessionDocument;
use super::SAVE_VERSION;
use crate::engine::SessionState;
use crate::error::Result;

/// Migrate a session document from older versions to the current version
pub fn migrate_document(mut document: SessionDocument) -> Result<SessionDocument> {
    let original_version = document.version;

    document = match document.version {
        0 => migrate_v0_to_v1(document),
        SAVE_VERSION => document,
        v => {
            // Future version - fields we do not know are ignored by serde
            log::warn!("Loading session from future version {} (current: {})", v, SAVE_VERSION);
            document
        }
    };

    document.version = SAVE_VERSION;

    if original_version != SAVE_VERSION {
        log::info!("Migrated session from version {} to {}", original_version, SAVE_VERSION);
    }

    Ok(document)
}

/// Version 0 documents predate the version field. Some of them carry streak
/// counters without a holder (or the reverse); both halves must agree.
fn migrate_v0_to_v1(mut document: SessionDocument) -> SessionDocument {
    log::info!("Migrating session from version 0 to 1");

    normalize_streaks(&mut document.state);
    let history = document.undo_stack.iter_mut().chain(document.redo_stack.iter_mut()).flatten();
    for snapshot in history {
        normalize_streaks(&mut snapshot.state);
    }

    document
}

fn normalize_streaks(state: &mut SessionState) {
    for court in &mut state.courts {
        if court.streak_holder.is_none() != (court.consecutive_wins == 0) {
            log::warn!("Court {} had an inconsistent streak, clearing", court.id);
            court.reset_streak();
        }
    }
}

pub fn needs_migration(document: &SessionDocument) -> bool {
    document.version < SAVE_VERSION
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::SessionSnapshot;
    use crate::models::{Court, Player, Team};

    fn court_with_streak(wins: u32, holder: Option<Team>) -> Court {
        let mut court = Court::new(1);
        court.consecutive_wins = wins;
        court.streak_holder = holder;
        court
    }

    fn team() -> Team {
        Team::new(Player::new(1, "A"), Player::new(2, "B"))
    }

    #[test]
    fn test_migrate_v0_to_v1() {
        let mut state = SessionState::default();
        state.courts.push(court_with_streak(2, None));
        let mut document = SessionDocument::new(state, 0);
        document.version = 0;

        assert!(needs_migration(&document));
        let migrated = migrate_document(document).unwrap();

        assert_eq!(migrated.version, 1);
        assert_eq!(migrated.state.courts[0].consecutive_wins, 0);
        assert!(migrated.state.courts[0].streak_holder.is_none());
    }

    #[test]
    fn test_v0_keeps_history_and_consistent_streaks() {
        let mut state = SessionState::default();
        state.courts.push(court_with_streak(1, Some(team())));
        let mut document = SessionDocument::new(state.clone(), 4);
        document.version = 0;
        document.undo_stack = Some(vec![SessionSnapshot { state, match_counter: 3 }]);

        let migrated = migrate_document(document).unwrap();

        assert_eq!(migrated.state.courts[0].consecutive_wins, 1);
        assert_eq!(migrated.undo_stack.map(|s| s.len()), Some(1));
    }

    #[test]
    fn test_no_migration_needed() {
        let document = SessionDocument::new(SessionState::default(), 0);
        let result = migrate_document(document.clone()).unwrap();
        assert_eq!(result, document);
    }

    #[test]
    fn test_future_version_warning() {
        let mut document = SessionDocument::new(SessionState::default(), 0);
        document.version = 999;

        let result = migrate_document(document);
        assert!(result.is_ok());
    }
}
