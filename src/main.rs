//! Cryo Arcade - headless native entry point
//!
//! Plays the stock levels under the seeded autopilot and prints the outcome.
//!
//! Usage: `cryo-arcade [settings.json] [seed]`

use std::process::ExitCode;

use cryo_arcade::autopilot::Autopilot;
use cryo_arcade::{HighScores, Phase, Session, Settings};

/// Two minutes of play at the default tick
const MAX_TICKS: u32 = 7_500;

fn main() -> ExitCode {
    env_logger::init();
    log::info!("Cryo Arcade (headless) starting...");

    let mut args = std::env::args().skip(1);
    let settings = match args.next() {
        Some(path) => match Settings::load_from(&path) {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to load settings from {path}: {e}");
                return ExitCode::FAILURE;
            }
        },
        None => Settings::default(),
    };
    let seed = match args.next().map(|s| s.parse::<u64>()) {
        Some(Ok(seed)) => seed,
        Some(Err(e)) => {
            log::error!("Seed must be an unsigned integer: {e}");
            return ExitCode::FAILURE;
        }
        None => 0x5EED,
    };
    log::info!("Autopilot seed: {seed}");

    let mut session = Session::new(settings);
    let mut pilot = Autopilot::new(seed);
    let mut ticks = 0;
    while ticks < MAX_TICKS && session.phase() == Phase::Playing {
        pilot.advance();
        session.step(&pilot);
        ticks += 1;
    }

    let outcome = match session.phase() {
        Phase::Playing => "time up",
        Phase::Victory => "victory",
        Phase::GameOver => "game over",
    };
    println!(
        "{outcome} after {ticks} ticks: level {}, score {}, lives {}",
        session.level_number(),
        session.score(),
        session.lives()
    );

    let mut board = HighScores::new();
    if let Some(rank) = board.add_score("cpu", session.score()) {
        println!("Leaderboard rank #{rank}");
    }
    for entry in &board.entries {
        println!("  {entry}");
    }

    ExitCode::SUCCESS
}
