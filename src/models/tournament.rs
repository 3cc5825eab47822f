//! Tournament snapshot and TournamentError.

use crate::models::game::{GameMatch, MatchId, Outcome, Round};
use crate::models::player::{Player, PlayerId};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use uuid::Uuid;

/// Errors that can occur during tournament operations.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum TournamentError {
    /// The tournament has no players.
    EmptyPlayerList,
    /// Results were submitted but the tournament has no rounds yet.
    NoRounds,
    /// A result submission contained no entries.
    EmptyResults,
    /// No tournament stored under this id.
    NotFound(TournamentId),
    /// A match references a player that is not in the player list.
    UnknownPlayer(PlayerId),
    /// A match pairs a player against themselves.
    SelfPairing(MatchId),
    /// A player appears in more than one match of the same round.
    DoubleBooked { round: u32, player: PlayerId },
    /// Round numbers must run 1, 2, 3, ... without gaps.
    RoundOutOfSequence { expected: u32, found: u32 },
    /// Tables must run 1..k within a round.
    TableOutOfSequence { round: u32, expected: u32, found: u32 },
    /// A bye match carries an outcome other than `BYE`.
    UnresolvedBye(MatchId),
    /// A match with two players is marked `BYE`.
    MisplacedBye(MatchId),
    /// The snapshot store could not be read or written.
    Storage(String),
}

impl std::fmt::Display for TournamentError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TournamentError::EmptyPlayerList => write!(f, "Players list is required"),
            TournamentError::NoRounds => write!(f, "No rounds to finalize"),
            TournamentError::EmptyResults => write!(f, "Results array required"),
            TournamentError::NotFound(id) => write!(f, "Tournament {} not found", id),
            TournamentError::UnknownPlayer(id) => write!(f, "Unknown player {}", id),
            TournamentError::SelfPairing(id) => write!(f, "Match {} pairs a player with themselves", id),
            TournamentError::DoubleBooked { round, player } => {
                write!(f, "Player {} appears twice in round {}", player, round)
            }
            TournamentError::RoundOutOfSequence { expected, found } => {
                write!(f, "Expected round {} but found round {}", expected, found)
            }
            TournamentError::TableOutOfSequence { round, expected, found } => {
                write!(f, "Round {}: expected table {} but found table {}", round, expected, found)
            }
            TournamentError::UnresolvedBye(id) => write!(f, "Bye match {} is not marked BYE", id),
            TournamentError::MisplacedBye(id) => {
                write!(f, "Match {} has two players but is marked BYE", id)
            }
            TournamentError::Storage(msg) => write!(f, "Storage error: {}", msg),
        }
    }
}

impl std::error::Error for TournamentError {}

/// Unique identifier for a tournament.
pub type TournamentId = Uuid;

/// Summary view of a tournament (for listings and the pair button state).
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct TournamentInfo {
    pub id: TournamentId,
    pub name: String,
    pub total_rounds: u32,
    /// Number of the latest round, 0 before the first pairing.
    pub round: u32,
}

/// Full tournament snapshot: the fixed player list and every round paired so far.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Tournament {
    pub id: TournamentId,
    pub name: String,
    /// Number of rounds after which no further pairing is made.
    pub total_rounds: u32,
    pub players: Vec<Player>,
    /// Rounds in order, numbered from 1.
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Tournament {
    /// Create a tournament with the given players and no rounds.
    pub fn new(name: impl Into<String>, total_rounds: u32, players: Vec<Player>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            total_rounds,
            players,
            rounds: Vec::new(),
        }
    }

    /// Highest round number so far (0 when nothing has been paired).
    pub fn current_round(&self) -> u32 {
        self.rounds.iter().map(|r| r.number).max().unwrap_or(0)
    }

    pub fn info(&self) -> TournamentInfo {
        TournamentInfo {
            id: self.id,
            name: self.name.clone(),
            total_rounds: self.total_rounds,
            round: self.current_round(),
        }
    }

    pub fn get_player(&self, id: PlayerId) -> Option<&Player> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_name(&self, id: PlayerId) -> Option<&str> {
        self.get_player(id).map(|p| p.name.as_str())
    }

    /// The round results are applied to.
    pub fn latest_round_mut(&mut self) -> Option<&mut Round> {
        self.rounds.last_mut()
    }

    /// Iterate every match of every round, in round order.
    pub fn all_matches(&self) -> impl Iterator<Item = (u32, &GameMatch)> {
        self.rounds
            .iter()
            .flat_map(|r| r.matches.iter().map(move |m| (r.number, m)))
    }

    /// Check the structural invariants of the snapshot; returns the first violation found.
    pub fn validate(&self) -> Result<(), TournamentError> {
        if self.players.is_empty() {
            return Err(TournamentError::EmptyPlayerList);
        }
        let known: HashSet<PlayerId> = self.players.iter().map(|p| p.id).collect();

        for (idx, round) in self.rounds.iter().enumerate() {
            let expected = idx as u32 + 1;
            if round.number != expected {
                return Err(TournamentError::RoundOutOfSequence {
                    expected,
                    found: round.number,
                });
            }

            let mut seen = HashSet::new();
            for (t, m) in round.matches.iter().enumerate() {
                let expected_table = t as u32 + 1;
                if m.table != expected_table {
                    return Err(TournamentError::TableOutOfSequence {
                        round: round.number,
                        expected: expected_table,
                        found: m.table,
                    });
                }
                for pid in std::iter::once(m.side_a).chain(m.side_b) {
                    if !known.contains(&pid) {
                        return Err(TournamentError::UnknownPlayer(pid));
                    }
                }
                match m.side_b {
                    Some(b) if b == m.side_a => return Err(TournamentError::SelfPairing(m.id)),
                    Some(_) if m.outcome == Outcome::Bye => {
                        return Err(TournamentError::MisplacedBye(m.id))
                    }
                    None if m.outcome != Outcome::Bye => {
                        return Err(TournamentError::UnresolvedBye(m.id))
                    }
                    _ => {}
                }
                for pid in std::iter::once(m.side_a).chain(m.side_b) {
                    if !seen.insert(pid) {
                        return Err(TournamentError::DoubleBooked {
                            round: round.number,
                            player: pid,
                        });
                    }
                }
            }
        }
        Ok(())
    }
}
