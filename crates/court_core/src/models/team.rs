use super::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical identity of a team: the two player ids in ascending order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TeamKey(pub PlayerId, pub PlayerId);

impl TeamKey {
    pub fn from_ids(a: PlayerId, b: PlayerId) -> Self {
        if a <= b {
            TeamKey(a, b)
        } else {
            TeamKey(b, a)
        }
    }
}

impl fmt::Display for TeamKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}-{}", self.0, self.1)
    }
}

/// A pair of players competing together.
///
/// The pair is kept in the order it was supplied so it can be displayed as the
/// caller entered it. The derived `PartialEq` is structural (order-sensitive);
/// use [`Team::key`] or [`are_teams_equal`] whenever team *identity* matters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub players: [Player; 2],
}

impl Team {
    pub fn new(first: Player, second: Player) -> Self {
        Self { players: [first, second] }
    }

    pub fn first(&self) -> &Player {
        &self.players[0]
    }

    pub fn second(&self) -> &Player {
        &self.players[1]
    }

    pub fn key(&self) -> TeamKey {
        TeamKey::from_ids(self.players[0].id, self.players[1].id)
    }

    pub fn same_team(&self, other: &Team) -> bool {
        self.key() == other.key()
    }

    /// "first, second" in stored order.
    pub fn display_name(&self) -> String {
        format!("{}, {}", self.players[0].name, self.players[1].name)
    }
}

pub fn are_teams_equal(a: &Team, b: &Team) -> bool {
    a.same_team(b)
}
