//! Data structures for the Swiss tournament: players, matches, rounds, tournament snapshot.

mod game;
mod player;
mod tournament;

pub use game::{GameMatch, MatchId, Outcome, Round, UnknownOutcome};
pub use player::{Player, PlayerId};
pub use tournament::{Tournament, TournamentError, TournamentId, TournamentInfo};
