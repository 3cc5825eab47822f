//! Setup: create a tournament from a name, a round target and a list of player names.

use crate::models::{Player, Tournament, TournamentError};

/// Name used when none is given.
pub const DEFAULT_NAME: &str = "Tournament";
/// Round target used when 0 is given.
pub const DEFAULT_TOTAL_ROUNDS: u32 = 4;

/// Create a tournament: names are trimmed and blank ones dropped; at least one player is required.
pub fn create_tournament<S: AsRef<str>>(
    name: &str,
    total_rounds: u32,
    player_names: &[S],
) -> Result<Tournament, TournamentError> {
    let players: Vec<Player> = player_names
        .iter()
        .map(|n| n.as_ref().trim())
        .filter(|n| !n.is_empty())
        .map(Player::new)
        .collect();
    if players.is_empty() {
        return Err(TournamentError::EmptyPlayerList);
    }

    let name = match name.trim() {
        "" => DEFAULT_NAME,
        n => n,
    };
    let total_rounds = if total_rounds == 0 {
        DEFAULT_TOTAL_ROUNDS
    } else {
        total_rounds
    };

    let tournament = Tournament::new(name, total_rounds, players);
    log::info!(
        "Created tournament {} ({}) with {} players over {} rounds",
        tournament.id,
        tournament.name,
        tournament.players.len(),
        tournament.total_rounds
    );
    Ok(tournament)
}
