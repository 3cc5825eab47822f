//! Result entry for the latest round.

use crate::models::{MatchId, Outcome, Tournament, TournamentError};
use serde::{Deserialize, Serialize};

/// One submitted result: which match, and who won.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct ResultEntry {
    pub match_id: MatchId,
    pub outcome: Outcome,
}

impl ResultEntry {
    pub fn new(match_id: MatchId, outcome: Outcome) -> Self {
        Self { match_id, outcome }
    }
}

/// Apply outcomes to matches of the most recent round. Returns how many entries were applied.
///
/// Tolerant merge: entries for unknown match ids, bye matches, or with a `PENDING`/`BYE`
/// outcome are skipped. A later entry for the same match wins.
pub fn apply_results(
    tournament: &mut Tournament,
    results: &[ResultEntry],
) -> Result<usize, TournamentError> {
    let tournament_id = tournament.id;
    let round = tournament
        .latest_round_mut()
        .ok_or(TournamentError::NoRounds)?;

    let mut applied = 0;
    for entry in results {
        if !entry.outcome.is_reportable() {
            log::debug!("Ignoring result {:?} for match {}", entry.outcome, entry.match_id);
            continue;
        }
        match round
            .matches
            .iter_mut()
            .find(|m| m.id == entry.match_id && !m.is_bye())
        {
            Some(m) => {
                m.outcome = entry.outcome;
                applied += 1;
            }
            None => log::debug!("Ignoring result for unknown match {}", entry.match_id),
        }
    }

    log::info!(
        "Tournament {}: applied {} of {} results to round {}",
        tournament_id,
        applied,
        results.len(),
        round.number
    );
    Ok(applied)
}
