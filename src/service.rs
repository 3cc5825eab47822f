//! Request-handling layer without a transport: load snapshot, run one operation, store it back.

use crate::logic::{
    apply_results, compute_standings, create_tournament, next_round, NextRound, PairingConfig,
    ResultEntry, StandingsRow,
};
use crate::models::{Outcome, Tournament, TournamentError, TournamentId, TournamentInfo};
use crate::store::SnapshotStore;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A result as typed into an entry form: both fields are unparsed text.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct RawResult {
    pub match_id: String,
    pub outcome: String,
}

impl RawResult {
    pub fn new(match_id: impl Into<String>, outcome: impl Into<String>) -> Self {
        Self {
            match_id: match_id.into(),
            outcome: outcome.into(),
        }
    }

    /// `None` when either field does not parse.
    fn parse(&self) -> Option<ResultEntry> {
        let match_id = Uuid::parse_str(self.match_id.trim()).ok()?;
        let outcome: Outcome = self.outcome.parse().ok()?;
        Some(ResultEntry::new(match_id, outcome))
    }
}

/// Tournament operations over a snapshot store. Callers serialize mutations per tournament.
pub struct TournamentService<S> {
    store: S,
    config: PairingConfig,
}

impl<S: SnapshotStore> TournamentService<S> {
    pub fn new(store: S, config: PairingConfig) -> Self {
        Self { store, config }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    fn load(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.store.load(id)?.ok_or(TournamentError::NotFound(id))
    }

    /// Create and store a new tournament.
    pub fn create<N: AsRef<str>>(
        &self,
        name: &str,
        total_rounds: u32,
        players: &[N],
    ) -> Result<TournamentInfo, TournamentError> {
        let tournament = create_tournament(name, total_rounds, players)?;
        self.store.save(&tournament)?;
        Ok(tournament.info())
    }

    pub fn info(&self, id: TournamentId) -> Result<TournamentInfo, TournamentError> {
        Ok(self.load(id)?.info())
    }

    pub fn tournament(&self, id: TournamentId) -> Result<Tournament, TournamentError> {
        self.load(id)
    }

    pub fn standings(&self, id: TournamentId) -> Result<Vec<StandingsRow>, TournamentError> {
        Ok(compute_standings(&self.load(id)?))
    }

    /// Pair the next round; the snapshot is only written back when a round was created.
    pub fn pair_next(&self, id: TournamentId) -> Result<NextRound, TournamentError> {
        let mut tournament = self.load(id)?;
        tournament.validate()?;
        let outcome = next_round(&mut tournament, &self.config);
        if matches!(outcome, NextRound::Paired { .. }) {
            self.store.save(&tournament)?;
        }
        Ok(outcome)
    }

    /// Apply results to the latest round and return the updated standings.
    ///
    /// Entries whose match id or outcome tag does not parse are ignored like unknown ids.
    pub fn finalize_round(
        &self,
        id: TournamentId,
        results: &[RawResult],
    ) -> Result<Vec<StandingsRow>, TournamentError> {
        if results.is_empty() {
            return Err(TournamentError::EmptyResults);
        }
        let mut tournament = self.load(id)?;
        let entries: Vec<ResultEntry> = results
            .iter()
            .filter_map(|r| {
                let parsed = r.parse();
                if parsed.is_none() {
                    log::debug!("Ignoring unparseable result {:?}", r);
                }
                parsed
            })
            .collect();
        apply_results(&mut tournament, &entries)?;
        self.store.save(&tournament)?;
        Ok(compute_standings(&tournament))
    }
}
