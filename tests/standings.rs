//! Integration tests for standings: match points, percentages, loss-round penalty and KTS ordering.

use swiss_tournament::{
    compute_standings, GameMatch, Outcome, Player, PlayerId, Round, StandingsRow, Tournament,
};

fn tournament_with_players(names: &[&str], total_rounds: u32) -> Tournament {
    let players: Vec<Player> = names.iter().map(|n| Player::new(*n)).collect();
    Tournament::new("Test", total_rounds, players)
}

fn id(t: &Tournament, name: &str) -> PlayerId {
    t.players.iter().find(|p| p.name == name).unwrap().id
}

fn played(table: u32, a: PlayerId, b: PlayerId, outcome: Outcome) -> GameMatch {
    let mut m = GameMatch::paired(table, a, b);
    m.outcome = outcome;
    m
}

fn push_round(t: &mut Tournament, matches: Vec<GameMatch>) {
    let number = t.rounds.len() as u32 + 1;
    t.rounds.push(Round { number, matches });
}

fn row<'a>(rows: &'a [StandingsRow], name: &str) -> &'a StandingsRow {
    rows.iter().find(|r| r.player == name).unwrap()
}

#[test]
fn win_and_tie_after_one_round() {
    let mut t = tournament_with_players(&["A", "B", "C", "D"], 3);
    let (a, b, c, d) = (id(&t, "A"), id(&t, "B"), id(&t, "C"), id(&t, "D"));
    push_round(
        &mut t,
        vec![played(1, a, b, Outcome::AWins), played(2, c, d, Outcome::Tie)],
    );

    let rows = compute_standings(&t);
    assert_eq!(rows[0].player, "A");
    assert_eq!(row(&rows, "A").points, 3);
    assert_eq!(row(&rows, "B").points, 0);
    assert_eq!(row(&rows, "C").points, 0);
    assert_eq!(row(&rows, "D").points, 0);

    let a_row = row(&rows, "A");
    assert_eq!(a_row.mw, 100.0);
    assert_eq!(a_row.omw, 0.0);
    assert_eq!(a_row.ddd, 0);
    assert_eq!(a_row.kts, 3_000_000_000);

    // B lost to a 100% player: OMW field clamps to 999.
    let b_row = row(&rows, "B");
    assert_eq!(b_row.omw, 100.0);
    assert_eq!(b_row.ddd, 1);
    assert_eq!(b_row.kts, 999_000_001);
    assert_eq!(b_row.rank, 2);

    // A tie counts as a loss round for both and in percentage denominators.
    let c_row = row(&rows, "C");
    assert_eq!(c_row.ties, 1);
    assert_eq!(c_row.losses, 0);
    assert_eq!(c_row.mw, 0.0);
    assert_eq!(c_row.ddd_padded(), "001");
    assert_eq!(c_row.kts, 1);
}

#[test]
fn opponent_percentages_and_later_losses() {
    let mut t = tournament_with_players(&["A", "B", "C", "D"], 3);
    let (a, b, c, d) = (id(&t, "A"), id(&t, "B"), id(&t, "C"), id(&t, "D"));
    push_round(
        &mut t,
        vec![played(1, a, b, Outcome::AWins), played(2, c, d, Outcome::AWins)],
    );
    push_round(
        &mut t,
        vec![played(1, a, c, Outcome::AWins), played(2, b, d, Outcome::AWins)],
    );

    let rows = compute_standings(&t);
    let names: Vec<&str> = rows.iter().map(|r| r.player.as_str()).collect();
    // B and C both have 3 points and 50/50; C lost in round 2 so its DDD (4) beats B's (1).
    assert_eq!(names, vec!["A", "C", "B", "D"]);

    let a_row = row(&rows, "A");
    assert_eq!(a_row.points, 6);
    assert_eq!(a_row.omw, 50.0);
    assert_eq!(a_row.oomw, 50.0);
    assert_eq!(a_row.kts, 6_500_500_000);

    assert_eq!(row(&rows, "C").kts, 3_500_500_004);
    assert_eq!(row(&rows, "B").kts, 3_500_500_001);

    let d_row = row(&rows, "D");
    assert_eq!(d_row.losses, 2);
    assert_eq!(d_row.ddd, 5);
    assert_eq!(d_row.mw, 0.0);
}

#[test]
fn one_row_per_player_with_contiguous_ranks() {
    let mut t = tournament_with_players(&["A", "B", "C", "D", "E"], 3);
    let (a, b) = (id(&t, "A"), id(&t, "B"));
    push_round(&mut t, vec![played(1, a, b, Outcome::BWins)]);

    let rows = compute_standings(&t);
    assert_eq!(rows.len(), 5);
    let ranks: Vec<usize> = rows.iter().map(|r| r.rank).collect();
    assert_eq!(ranks, vec![1, 2, 3, 4, 5]);
    for r in &rows {
        assert_eq!(r.points % 3, 0);
    }
}

#[test]
fn player_without_matches_has_zero_stats() {
    let mut t = tournament_with_players(&["A", "B", "C"], 3);
    let (a, b) = (id(&t, "A"), id(&t, "B"));
    push_round(&mut t, vec![played(1, a, b, Outcome::AWins)]);

    let rows = compute_standings(&t);
    let c_row = row(&rows, "C");
    assert_eq!(c_row.points, 0);
    assert_eq!(c_row.mw, 0.0);
    assert_eq!(c_row.omw, 0.0);
    assert_eq!(c_row.oomw, 0.0);
    assert_eq!(c_row.ddd, 0);
    assert_eq!(c_row.kts, 0);
}

#[test]
fn pending_matches_contribute_nothing() {
    let mut t = tournament_with_players(&["A", "B"], 3);
    let (a, b) = (id(&t, "A"), id(&t, "B"));
    push_round(&mut t, vec![GameMatch::paired(1, a, b)]);

    let rows = compute_standings(&t);
    assert!(rows.iter().all(|r| r.points == 0 && r.kts == 0));
    // Equal keys keep player-list order.
    assert_eq!(rows[0].player, "A");
    assert_eq!(rows[1].player, "B");
}

#[test]
fn bye_counts_for_points_but_not_percentages() {
    let mut t = tournament_with_players(&["A", "B", "C"], 3);
    let (a, b, c) = (id(&t, "A"), id(&t, "B"), id(&t, "C"));
    push_round(
        &mut t,
        vec![played(1, a, b, Outcome::AWins), GameMatch::bye(2, c)],
    );

    let rows = compute_standings(&t);
    let c_row = row(&rows, "C");
    assert_eq!(c_row.points, 3);
    assert_eq!(c_row.byes, 1);
    assert_eq!(c_row.wins, 0);
    assert_eq!(c_row.mw, 0.0);
    assert_eq!(c_row.omw, 0.0);
    assert_eq!(c_row.oomw, 0.0);
    assert_eq!(c_row.kts, 3_000_000_000);

    // Equal keys (3 points, OMW 0): player-list order decides.
    assert_eq!(rows[0].player, "A");
    assert_eq!(row(&rows, "A").mw, 100.0);
}

#[test]
fn loss_round_penalty_is_capped() {
    let mut t = tournament_with_players(&["A", "B"], 20);
    let (a, b) = (id(&t, "A"), id(&t, "B"));
    // 1² + 2² + ... + 14² = 1015
    for _ in 0..14 {
        push_round(&mut t, vec![played(1, a, b, Outcome::AWins)]);
    }

    let rows = compute_standings(&t);
    assert_eq!(row(&rows, "A").points, 42);
    assert_eq!(row(&rows, "B").ddd, 999);
    assert_eq!(row(&rows, "B").losses, 14);
}

#[test]
fn standings_are_idempotent() {
    let mut t = tournament_with_players(&["A", "B", "C", "D"], 3);
    let (a, b, c, d) = (id(&t, "A"), id(&t, "B"), id(&t, "C"), id(&t, "D"));
    push_round(
        &mut t,
        vec![played(1, a, c, Outcome::Tie), played(2, b, d, Outcome::BWins)],
    );

    assert_eq!(compute_standings(&t), compute_standings(&t));
}

#[test]
fn bye_outcome_with_two_players_is_skipped() {
    let mut t = tournament_with_players(&["A", "B"], 3);
    let (a, b) = (id(&t, "A"), id(&t, "B"));
    push_round(&mut t, vec![played(1, a, b, Outcome::Bye)]);

    let rows = compute_standings(&t);
    for name in ["A", "B"] {
        let r = row(&rows, name);
        assert_eq!(r.points, 0);
        assert_eq!(r.byes, 0);
        assert_eq!(r.kts, 0);
    }
}
