//! Standings: results graph rebuilt from finalized matches, MW%/OMW%/OOMW%, loss-round penalty and KTS.

use crate::models::{Outcome, PlayerId, Tournament};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Points awarded for a win (byes included).
const WIN_POINTS: u32 = 3;
/// Upper bound for each three-digit KTS field.
const FIELD_MAX: u32 = 999;

/// Who a player beat: a real opponent or the synthetic bye.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum Beaten {
    Player(PlayerId),
    Bye,
}

/// Per-player results, rebuilt from scratch on every standings computation.
#[derive(Clone, Debug, Default)]
struct Node {
    wins: Vec<Beaten>,
    /// Real losses and ties (a tie counts as a loss to each other for percentages).
    losses: Vec<PlayerId>,
    ties: Vec<PlayerId>,
    /// Round number of every loss or tie.
    lost_rounds: Vec<u32>,
}

impl Node {
    fn byes(&self) -> usize {
        self.wins.iter().filter(|w| **w == Beaten::Bye).count()
    }

    fn wins_excl_bye(&self) -> usize {
        self.wins.len() - self.byes()
    }

    fn matches_played_excl_bye(&self) -> usize {
        self.wins_excl_bye() + self.losses.len()
    }

    fn match_points(&self) -> u32 {
        WIN_POINTS * self.wins.len() as u32
    }

    /// Fraction in [0, 1]; 0 when no non-bye match has been played.
    fn match_win_fraction(&self) -> f64 {
        match self.matches_played_excl_bye() {
            0 => 0.0,
            d => self.wins_excl_bye() as f64 / d as f64,
        }
    }

    /// Every real opponent, once per encounter (wins then losses).
    fn opponents(&self) -> impl Iterator<Item = PlayerId> + '_ {
        self.wins
            .iter()
            .filter_map(|w| match w {
                Beaten::Player(id) => Some(*id),
                Beaten::Bye => None,
            })
            .chain(self.losses.iter().copied())
    }

    fn loss_round_penalty(&self) -> u32 {
        self.lost_rounds
            .iter()
            .fold(0u32, |acc, r| acc.saturating_add(r.saturating_mul(*r)))
            .min(FIELD_MAX)
    }
}

/// Results graph for the whole tournament.
struct ResultsGraph {
    nodes: HashMap<PlayerId, Node>,
}

impl ResultsGraph {
    /// Replay every finalized match in round order. Pending matches contribute nothing.
    fn build(tournament: &Tournament) -> Self {
        let mut nodes: HashMap<PlayerId, Node> = tournament
            .players
            .iter()
            .map(|p| (p.id, Node::default()))
            .collect();

        for (round, m) in tournament.all_matches() {
            if m.outcome.is_pending() {
                continue;
            }
            if !nodes.contains_key(&m.side_a) {
                log::warn!("Skipping match {}: unknown player {}", m.id, m.side_a);
                continue;
            }
            if m.outcome == Outcome::Bye {
                if m.side_b.is_some() {
                    log::warn!("Skipping match {}: BYE with a side B", m.id);
                } else if let Some(a) = nodes.get_mut(&m.side_a) {
                    a.wins.push(Beaten::Bye);
                }
                continue;
            }
            let Some(b) = m.side_b else {
                log::warn!("Skipping match {}: result {:?} without a side B", m.id, m.outcome);
                continue;
            };
            if !nodes.contains_key(&b) {
                log::warn!("Skipping match {}: unknown player {}", m.id, b);
                continue;
            }
            let a = m.side_a;
            match m.outcome {
                Outcome::AWins => Self::record_win(&mut nodes, a, b, round),
                Outcome::BWins => Self::record_win(&mut nodes, b, a, round),
                Outcome::Tie => {
                    for (me, them) in [(a, b), (b, a)] {
                        if let Some(node) = nodes.get_mut(&me) {
                            node.losses.push(them);
                            node.ties.push(them);
                            node.lost_rounds.push(round);
                        }
                    }
                }
                Outcome::Pending | Outcome::Bye => {}
            }
        }

        Self { nodes }
    }

    fn record_win(nodes: &mut HashMap<PlayerId, Node>, winner: PlayerId, loser: PlayerId, round: u32) {
        if let Some(w) = nodes.get_mut(&winner) {
            w.wins.push(Beaten::Player(loser));
        }
        if let Some(l) = nodes.get_mut(&loser) {
            l.losses.push(winner);
            l.lost_rounds.push(round);
        }
    }

    fn match_win_fraction(&self, id: PlayerId) -> f64 {
        self.nodes.get(&id).map_or(0.0, Node::match_win_fraction)
    }

    /// Mean MW of the player's opponents, as a fraction.
    fn opp_win_fraction(&self, id: PlayerId) -> f64 {
        let Some(node) = self.nodes.get(&id) else {
            return 0.0;
        };
        mean(node.opponents().map(|opp| self.match_win_fraction(opp)))
    }

    /// Mean OMW of the player's opponents, as a fraction.
    fn opp_opp_win_fraction(&self, id: PlayerId) -> f64 {
        let Some(node) = self.nodes.get(&id) else {
            return 0.0;
        };
        mean(node.opponents().map(|opp| self.opp_win_fraction(opp)))
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, n) = values.fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    if n == 0 {
        0.0
    } else {
        sum / n as f64
    }
}

/// Three-digit KTS field: thousandths of a fraction, floored, clamped to [0, 999].
fn kts_field(fraction: f64) -> u32 {
    // The epsilon keeps exact thousandths (e.g. 0.29) from flooring one below after float error.
    let scaled = (fraction * 1000.0 + 1e-9).floor();
    scaled.clamp(0.0, FIELD_MAX as f64) as u32
}

/// Composite key: digits of `points` followed by three zero-padded three-digit fields.
pub fn kts(points: u32, omw_field: u32, oomw_field: u32, ddd: u32) -> u64 {
    u64::from(points) * 1_000_000_000
        + u64::from(omw_field) * 1_000_000
        + u64::from(oomw_field) * 1_000
        + u64::from(ddd)
}

fn percent_one_decimal(fraction: f64) -> f64 {
    (fraction * 1000.0).round() / 10.0
}

/// One row of the standings table.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct StandingsRow {
    /// 1-based position.
    pub rank: usize,
    pub player_id: PlayerId,
    pub player: String,
    pub points: u32,
    /// Real wins (byes excluded).
    pub wins: usize,
    /// Real losses (ties excluded).
    pub losses: usize,
    pub ties: usize,
    pub byes: usize,
    /// Match-win percentage, one decimal.
    pub mw: f64,
    /// Opponents' match-win percentage, one decimal.
    pub omw: f64,
    /// Opponents' opponents' match-win percentage, one decimal.
    pub oomw: f64,
    /// Sum of squared loss/tie round numbers, capped at 999.
    pub ddd: u32,
    pub kts: u64,
}

impl StandingsRow {
    pub fn ddd_padded(&self) -> String {
        format!("{:03}", self.ddd)
    }
}

/// Compute the ranked standings table for a tournament snapshot.
///
/// One row per player, sorted by descending KTS. Equal keys keep player-list order.
pub fn compute_standings(tournament: &Tournament) -> Vec<StandingsRow> {
    let graph = ResultsGraph::build(tournament);

    let mut rows: Vec<StandingsRow> = tournament
        .players
        .iter()
        .map(|p| {
            let node = &graph.nodes[&p.id];
            let points = node.match_points();
            let omw = graph.opp_win_fraction(p.id);
            let oomw = graph.opp_opp_win_fraction(p.id);
            let ddd = node.loss_round_penalty();
            StandingsRow {
                rank: 0,
                player_id: p.id,
                player: p.name.clone(),
                points,
                wins: node.wins_excl_bye(),
                losses: node.losses.len() - node.ties.len(),
                ties: node.ties.len(),
                byes: node.byes(),
                mw: percent_one_decimal(node.match_win_fraction()),
                omw: percent_one_decimal(omw),
                oomw: percent_one_decimal(oomw),
                ddd,
                kts: kts(points, kts_field(omw), kts_field(oomw), ddd),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.kts.cmp(&a.kts));
    for (i, row) in rows.iter_mut().enumerate() {
        row.rank = i + 1;
    }
    log::debug!("Computed standings for {} players", rows.len());
    rows
}
