//! Command-line driver: one JSON snapshot file per tournament in a data directory.
//! Run with: cargo run --bin swiss -- <command> ...
//!
//! Commands:
//!   new <name> <total_rounds> <player>...
//!   info <tournament_id>
//!   standings <tournament_id>
//!   pair <tournament_id>
//!   finalize <tournament_id> <match_id>=<A|B|TIE>...
//!
//! Override with env: SWISS_DATA_DIR (default "data"), SWISS_ATTEMPTS_PER_PLAYER,
//! SWISS_MAX_PASSES, SWISS_SEED.

use std::process::ExitCode;
use swiss_tournament::{
    JsonDirStore, NextRound, PairingConfig, RawResult, StandingsRow, TournamentError, TournamentId,
    TournamentService,
};

fn default_data_dir() -> String {
    "data".to_string()
}

fn env_parse<T: std::str::FromStr>(key: &str) -> Option<T> {
    std::env::var(key).ok().and_then(|v| v.parse().ok())
}

fn pairing_config_from_env() -> PairingConfig {
    let defaults = PairingConfig::default();
    PairingConfig {
        attempts_per_player: env_parse("SWISS_ATTEMPTS_PER_PLAYER")
            .unwrap_or(defaults.attempts_per_player),
        max_passes: env_parse("SWISS_MAX_PASSES").unwrap_or(defaults.max_passes),
        seed: env_parse("SWISS_SEED"),
    }
}

#[derive(Debug)]
enum CliError {
    Usage(String),
    Tournament(TournamentError),
    Json(serde_json::Error),
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Usage(msg) => write!(f, "{}", msg),
            CliError::Tournament(e) => write!(f, "{}", e),
            CliError::Json(e) => write!(f, "JSON error: {}", e),
        }
    }
}

impl From<TournamentError> for CliError {
    fn from(e: TournamentError) -> Self {
        CliError::Tournament(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}

const USAGE: &str = "usage: swiss <new|info|standings|pair|finalize> ...";

fn parse_id(arg: Option<&String>) -> Result<TournamentId, CliError> {
    let arg = arg.ok_or_else(|| CliError::Usage(USAGE.to_string()))?;
    arg.parse()
        .map_err(|_| CliError::Usage(format!("invalid tournament id: {}", arg)))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn print_standings(rows: &[StandingsRow]) {
    println!(
        "{:>4}  {:<20} {:>4} {:>6} {:>6} {:>6} {:>4}  {}",
        "rank", "player", "pts", "mw", "omw", "oomw", "ddd", "kts"
    );
    for r in rows {
        println!(
            "{:>4}  {:<20} {:>4} {:>6.1} {:>6.1} {:>6.1} {:>4}  {}",
            r.rank,
            r.player,
            r.points,
            r.mw,
            r.omw,
            r.oomw,
            r.ddd_padded(),
            r.kts
        );
    }
}

fn run(args: &[String], service: &TournamentService<JsonDirStore>) -> Result<(), CliError> {
    let command = args.first().map(String::as_str);
    match command {
        Some("new") => {
            let name = args.get(1).map(String::as_str).unwrap_or_default();
            let total_rounds = args.get(2).and_then(|r| r.parse().ok()).unwrap_or(0);
            let players = args.get(3..).unwrap_or_default();
            let info = service.create(name, total_rounds, players)?;
            print_json(&info)
        }
        Some("info") => print_json(&service.info(parse_id(args.get(1))?)?),
        Some("standings") => {
            print_standings(&service.standings(parse_id(args.get(1))?)?);
            Ok(())
        }
        Some("pair") => match service.pair_next(parse_id(args.get(1))?)? {
            NextRound::Paired { round, pairs } => {
                println!("Round {}", round);
                for p in pairs {
                    println!(
                        "  table {:>2}: {} vs {}  ({})",
                        p.table,
                        p.side_a,
                        p.side_b.as_deref().unwrap_or("BYE"),
                        p.match_id
                    );
                }
                Ok(())
            }
            NextRound::AllRoundsCompleted { round } => {
                println!("All rounds completed. (round {})", round);
                Ok(())
            }
        },
        Some("finalize") => {
            let id = parse_id(args.get(1))?;
            let results: Vec<RawResult> = args
                .get(2..)
                .unwrap_or_default()
                .iter()
                .filter_map(|a| a.split_once('='))
                .map(|(m, o)| RawResult::new(m, o))
                .collect();
            print_standings(&service.finalize_round(id, &results)?);
            Ok(())
        }
        _ => Err(CliError::Usage(USAGE.to_string())),
    }
}

fn main() -> ExitCode {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let dir = std::env::var("SWISS_DATA_DIR").unwrap_or_else(|_| default_data_dir());
    let config = pairing_config_from_env();
    log::debug!("Data dir {}, pairing config {:?}", dir, config);
    let service = TournamentService::new(JsonDirStore::new(dir), config);

    let args: Vec<String> = std::env::args().skip(1).collect();
    match run(&args, &service) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
