use super::RotationEngine;

pub const EMPTY_QUEUE_TEXT: &str = "Queue is empty";

impl RotationEngine {
    /// One line per queued team, players in stored order.
    pub fn beautify_queue(&self) -> String {
        if self.state.queue.is_empty() {
            return EMPTY_QUEUE_TEXT.to_string();
        }
        self.state.queue.iter().map(|team| team.display_name()).collect::<Vec<_>>().join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RotationConfig;
    use crate::models::{Player, Team};

    fn team(a: u32, a_name: &str, b: u32, b_name: &str) -> Team {
        Team::new(Player::new(a, a_name), Player::new(b, b_name))
    }

    #[test]
    fn test_empty_queue_sentinel() {
        let engine = RotationEngine::new(RotationConfig::default()).unwrap();
        assert_eq!(engine.beautify_queue(), EMPTY_QUEUE_TEXT);
    }

    #[test]
    fn test_lines_keep_stored_order() {
        let mut engine = RotationEngine::new(RotationConfig::default()).unwrap();
        engine
            .initialize(vec![
                team(1, "Ann", 2, "Bo"),
                team(3, "Cy", 4, "Di"),
                team(9, "Zoe", 5, "Eve"),
                team(6, "Fay", 7, "Gus"),
            ])
            .unwrap();

        assert_eq!(engine.beautify_queue(), "Zoe, Eve\nFay, Gus");
    }
}
