//! Match, Outcome, and Round.

use crate::models::player::PlayerId;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use uuid::Uuid;

/// Unique identifier for a match.
pub type MatchId = Uuid;

/// Result of a match. A match without a side B is always `Bye`.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Outcome {
    #[default]
    Pending,
    AWins,
    BWins,
    Tie,
    Bye,
}

impl Outcome {
    /// Whether the match still needs a result.
    pub fn is_pending(self) -> bool {
        self == Outcome::Pending
    }

    /// Outcomes an organizer may submit for a played match.
    pub fn is_reportable(self) -> bool {
        matches!(self, Outcome::AWins | Outcome::BWins | Outcome::Tie)
    }
}

/// Tag that does not name any outcome.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownOutcome(pub String);

impl std::fmt::Display for UnknownOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Unknown outcome tag: {}", self.0)
    }
}

impl std::error::Error for UnknownOutcome {}

impl FromStr for Outcome {
    type Err = UnknownOutcome;

    /// Accepts the serialized tags (`A_WINS`, ...) and the short form-entry tags (`A`, `B`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "PENDING" => Ok(Outcome::Pending),
            "A" | "A_WINS" => Ok(Outcome::AWins),
            "B" | "B_WINS" => Ok(Outcome::BWins),
            "TIE" => Ok(Outcome::Tie),
            "BYE" => Ok(Outcome::Bye),
            _ => Err(UnknownOutcome(s.to_string())),
        }
    }
}

/// A single match at a table. `side_b` is `None` for a bye.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub id: MatchId,
    /// 1-based, contiguous within a round.
    pub table: u32,
    pub side_a: PlayerId,
    pub side_b: Option<PlayerId>,
    pub outcome: Outcome,
}

impl GameMatch {
    /// A pending match between two players.
    pub fn paired(table: u32, side_a: PlayerId, side_b: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            table,
            side_a,
            side_b: Some(side_b),
            outcome: Outcome::Pending,
        }
    }

    /// An auto-resolved bye for one player.
    pub fn bye(table: u32, player: PlayerId) -> Self {
        Self {
            id: Uuid::new_v4(),
            table,
            side_a: player,
            side_b: None,
            outcome: Outcome::Bye,
        }
    }

    pub fn is_bye(&self) -> bool {
        self.side_b.is_none()
    }
}

/// One round of the tournament: its sequence number (from 1) and its matches.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Round {
    pub number: u32,
    pub matches: Vec<GameMatch>,
}

impl Round {
    /// All non-bye matches have a result.
    pub fn is_complete(&self) -> bool {
        self.matches.iter().all(|m| !m.outcome.is_pending())
    }
}
