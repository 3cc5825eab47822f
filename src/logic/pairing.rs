//! Swiss pairing: seed by current points, reserve a bye, then hill-climb over shuffles
//! to minimize point spread plus a heavy rematch penalty.

use crate::logic::standings::compute_standings;
use crate::models::{GameMatch, MatchId, PlayerId, Round, Tournament};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};

/// Added to the penalty for every pair that has already played each other.
pub const REMATCH_PENALTY: u32 = 1000;

/// Search budget for the pairing hill-climb.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct PairingConfig {
    /// Shuffles tried per pass, per player in the pool.
    pub attempts_per_player: usize,
    /// Upper bound on improving passes.
    pub max_passes: usize,
    /// Fixed RNG seed for reproducible pairings; `None` draws from entropy.
    pub seed: Option<u64>,
}

impl Default for PairingConfig {
    fn default() -> Self {
        Self {
            attempts_per_player: 100,
            max_passes: 100,
            seed: None,
        }
    }
}

/// One table of a freshly paired round, with player names for display.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Pairing {
    pub table: u32,
    pub match_id: MatchId,
    pub side_a: String,
    /// `None` for the bye.
    pub side_b: Option<String>,
}

/// Result of asking for the next round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum NextRound {
    /// A new round was appended to the tournament.
    Paired { round: u32, pairs: Vec<Pairing> },
    /// `total_rounds` already reached; the tournament is unchanged.
    AllRoundsCompleted { round: u32 },
}

#[derive(Clone, Debug)]
struct Seat {
    id: PlayerId,
    points: u32,
}

/// Unordered pair key.
fn pair_key(a: PlayerId, b: PlayerId) -> (PlayerId, PlayerId) {
    if a < b {
        (a, b)
    } else {
        (b, a)
    }
}

/// Every pair that has met in a real (non-bye) match in any round.
fn prior_pairs(tournament: &Tournament) -> HashSet<(PlayerId, PlayerId)> {
    tournament
        .all_matches()
        .filter_map(|(_, m)| m.side_b.map(|b| pair_key(m.side_a, b)))
        .collect()
}

/// Sum of point differences across consecutive pairs (0-1, 2-3, ...).
fn weight(seats: &[Seat]) -> u32 {
    seats
        .chunks_exact(2)
        .map(|pair| pair[0].points.abs_diff(pair[1].points))
        .sum()
}

fn penalty(seats: &[Seat], prior: &HashSet<(PlayerId, PlayerId)>) -> u32 {
    let rematches = seats
        .chunks_exact(2)
        .filter(|pair| prior.contains(&pair_key(pair[0].id, pair[1].id)))
        .count() as u32;
    weight(seats) + rematches * REMATCH_PENALTY
}

/// Stochastic hill-climb: each pass shuffles up to `pool_len * attempts_per_player` times and
/// keeps the first strictly better arrangement; stops after a pass without improvement.
fn search<R: Rng + ?Sized>(
    mut pool: Vec<Seat>,
    prior: &HashSet<(PlayerId, PlayerId)>,
    config: &PairingConfig,
    rng: &mut R,
) -> Vec<Seat> {
    let mut best = pool.clone();
    let mut min_pen = penalty(&pool, prior);
    let attempts = pool.len().max(1) * config.attempts_per_player;

    for pass in 0..config.max_passes {
        if min_pen == 0 || pool.len() <= 2 {
            break;
        }
        let mut improved = false;
        for _ in 0..attempts {
            pool.shuffle(rng);
            let score = penalty(&pool, prior);
            if score < min_pen {
                min_pen = score;
                best = pool.clone();
                improved = true;
                break;
            }
        }
        log::debug!("Pairing pass {}: penalty {} (improved: {})", pass + 1, min_pen, improved);
        if !improved {
            break;
        }
    }
    best
}

/// Pair the next round using the RNG described by `config`.
pub fn next_round(tournament: &mut Tournament, config: &PairingConfig) -> NextRound {
    let mut rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    next_round_with_rng(tournament, config, &mut rng)
}

/// Pair the next round and append it to the tournament.
///
/// 1. Refuse once `total_rounds` rounds exist (the tournament is left untouched).
/// 2. Order players by points (descending), then name.
/// 3. With an odd pool, the last player gets the bye.
/// 4. Search for a low-penalty arrangement of the rest; consecutive seats play each other.
pub fn next_round_with_rng<R: Rng + ?Sized>(
    tournament: &mut Tournament,
    config: &PairingConfig,
    rng: &mut R,
) -> NextRound {
    let current = tournament.current_round();
    if current >= tournament.total_rounds {
        log::info!(
            "Tournament {}: all {} rounds completed",
            tournament.id,
            tournament.total_rounds
        );
        return NextRound::AllRoundsCompleted { round: current };
    }

    let points: HashMap<PlayerId, u32> = compute_standings(tournament)
        .into_iter()
        .map(|row| (row.player_id, row.points))
        .collect();

    let mut ordered: Vec<_> = tournament
        .players
        .iter()
        .map(|p| (p, points.get(&p.id).copied().unwrap_or(0)))
        .collect();
    ordered.sort_by(|(pa, a), (pb, b)| b.cmp(a).then_with(|| pa.name.cmp(&pb.name)));
    let mut pool: Vec<Seat> = ordered
        .into_iter()
        .map(|(p, points)| Seat { id: p.id, points })
        .collect();

    let bye = if pool.len() % 2 == 1 { pool.pop() } else { None };

    let prior = prior_pairs(tournament);
    let best = search(pool, &prior, config, rng);
    let final_penalty = penalty(&best, &prior);
    if final_penalty >= REMATCH_PENALTY {
        log::warn!(
            "Tournament {}: no rematch-free pairing found (penalty {})",
            tournament.id,
            final_penalty
        );
    }

    let mut matches: Vec<GameMatch> = best
        .chunks_exact(2)
        .zip(1u32..)
        .map(|(pair, table)| GameMatch::paired(table, pair[0].id, pair[1].id))
        .collect();
    if let Some(seat) = bye {
        let table = matches.len() as u32 + 1;
        matches.push(GameMatch::bye(table, seat.id));
    }

    let number = current + 1;
    let pairs = matches
        .iter()
        .map(|m| Pairing {
            table: m.table,
            match_id: m.id,
            side_a: tournament.player_name(m.side_a).unwrap_or_default().to_string(),
            side_b: m
                .side_b
                .map(|b| tournament.player_name(b).unwrap_or_default().to_string()),
        })
        .collect();

    tournament.rounds.push(Round { number, matches });
    log::info!(
        "Tournament {}: paired round {} with penalty {}",
        tournament.id,
        number,
        final_penalty
    );
    NextRound::Paired { round: number, pairs }
}
