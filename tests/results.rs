//! Integration tests for result entry on the latest round.

use swiss_tournament::{
    apply_results, compute_standings, next_round, NextRound, Outcome, PairingConfig, Player,
    ResultEntry, Tournament, TournamentError,
};
use uuid::Uuid;

fn paired_tournament(n: usize) -> Tournament {
    let players: Vec<Player> = (0..n).map(|i| Player::new(format!("P{i}"))).collect();
    let mut t = Tournament::new("Test", 3, players);
    let config = PairingConfig {
        seed: Some(7),
        ..PairingConfig::default()
    };
    assert!(matches!(next_round(&mut t, &config), NextRound::Paired { .. }));
    t
}

#[test]
fn every_winner_gets_three_points_once() {
    let mut t = paired_tournament(6);
    let entries: Vec<ResultEntry> = t.rounds[0]
        .matches
        .iter()
        .filter(|m| m.outcome.is_pending())
        .map(|m| ResultEntry::new(m.id, Outcome::AWins))
        .collect();
    let winners: Vec<_> = t.rounds[0].matches.iter().map(|m| m.side_a).collect();

    assert_eq!(apply_results(&mut t, &entries).unwrap(), 3);
    assert!(t.rounds[0].is_complete());

    let rows = compute_standings(&t);
    for r in &rows {
        let expected = if winners.contains(&r.player_id) { 3 } else { 0 };
        assert_eq!(r.points, expected, "{}", r.player);
    }
}

#[test]
fn unknown_and_invalid_entries_are_ignored() {
    let mut t = paired_tournament(5);
    let round = &t.rounds[0];
    let real = round.matches.iter().find(|m| !m.is_bye()).unwrap().id;
    let bye = round.matches.iter().find(|m| m.is_bye()).unwrap().id;

    let entries = vec![
        ResultEntry::new(Uuid::new_v4(), Outcome::AWins),
        ResultEntry::new(real, Outcome::Pending),
        ResultEntry::new(real, Outcome::Bye),
        ResultEntry::new(bye, Outcome::BWins),
        ResultEntry::new(real, Outcome::Tie),
    ];
    assert_eq!(apply_results(&mut t, &entries).unwrap(), 1);

    let round = &t.rounds[0];
    assert_eq!(round.matches.iter().find(|m| m.id == real).unwrap().outcome, Outcome::Tie);
    assert_eq!(round.matches.iter().find(|m| m.id == bye).unwrap().outcome, Outcome::Bye);
}

#[test]
fn later_entry_overwrites_earlier_result() {
    let mut t = paired_tournament(2);
    let m = t.rounds[0].matches[0].id;
    apply_results(&mut t, &[ResultEntry::new(m, Outcome::AWins)]).unwrap();
    apply_results(&mut t, &[ResultEntry::new(m, Outcome::BWins)]).unwrap();
    assert_eq!(t.rounds[0].matches[0].outcome, Outcome::BWins);
}

#[test]
fn only_latest_round_is_updated() {
    let mut t = paired_tournament(4);
    let first_round_match = t.rounds[0].matches[0].id;
    next_round(&mut t, &PairingConfig::default());

    assert_eq!(
        apply_results(&mut t, &[ResultEntry::new(first_round_match, Outcome::AWins)]).unwrap(),
        0
    );
    assert!(t.rounds[0].matches[0].outcome.is_pending());
}

#[test]
fn no_rounds_is_an_error() {
    let mut t = Tournament::new("Empty", 3, vec![Player::new("A"), Player::new("B")]);
    assert_eq!(
        apply_results(&mut t, &[ResultEntry::new(Uuid::new_v4(), Outcome::Tie)]),
        Err(TournamentError::NoRounds)
    );
}

#[test]
fn outcome_tags_parse() {
    assert_eq!("A".parse::<Outcome>().unwrap(), Outcome::AWins);
    assert_eq!("b".parse::<Outcome>().unwrap(), Outcome::BWins);
    assert_eq!("A_WINS".parse::<Outcome>().unwrap(), Outcome::AWins);
    assert_eq!(" tie ".parse::<Outcome>().unwrap(), Outcome::Tie);
    assert!("draw".parse::<Outcome>().is_err());
    assert_eq!(serde_json::to_string(&Outcome::BWins).unwrap(), "\"B_WINS\"");
}
