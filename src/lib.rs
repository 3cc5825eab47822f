//! Swiss tournament organizer: library with models, pairing engine and KTS standings.

pub mod logic;
pub mod models;
pub mod service;
pub mod store;

pub use logic::{
    apply_results, compute_standings, create_tournament, kts, next_round, next_round_with_rng,
    NextRound, Pairing, PairingConfig, ResultEntry, StandingsRow,
};
pub use models::{
    GameMatch, MatchId, Outcome, Player, PlayerId, Round, Tournament, TournamentError,
    TournamentId, TournamentInfo,
};
pub use service::{RawResult, TournamentService};
pub use store::{JsonDirStore, MemoryStore, SnapshotStore};
