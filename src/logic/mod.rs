//! Tournament business logic: setup, standings, pairing, result entry.

mod pairing;
mod results;
mod setup;
mod standings;

pub use pairing::{
    next_round, next_round_with_rng, NextRound, Pairing, PairingConfig, REMATCH_PENALTY,
};
pub use results::{apply_results, ResultEntry};
pub use setup::{create_tournament, DEFAULT_NAME, DEFAULT_TOTAL_ROUNDS};
pub use standings::{compute_standings, kts, StandingsRow};
