//! Headless runner (default binary).
//!
//! Plays one session with the heuristic autoplayer on the fixed 16 ms tick and
//! prints the final result as JSON. Settings come from the `BLOCKFALL_*`
//! environment variables; the first argument picks the mode
//! (`classic`, `sprint` or `marathon`, default `sprint`).

use anyhow::{bail, Context, Result};
use tracing::info;
use tracing_subscriber::EnvFilter;

use blockfall::autoplay::{Autoplayer, HeuristicPolicy};
use blockfall::core::{HighScores, JsonFileStore, Session, SessionConfig, SessionState};
use blockfall::types::{GameMode, TICK_MS};

/// Upper bound on simulated ticks for modes without a goal
const MAX_TICKS: u64 = 1_000_000;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let mode = match std::env::args().nth(1) {
        Some(arg) => GameMode::from_str(&arg).with_context(|| {
            let known: Vec<&str> = GameMode::ALL.iter().map(|m| m.as_str()).collect();
            format!("unknown mode: {arg} (expected one of {})", known.join(", "))
        })?,
        None => GameMode::Sprint,
    };

    let config = SessionConfig::from_env();
    let high_scores = HighScores::load(JsonFileStore::new(config.high_score_path.clone()));
    let mut session = Session::new(config, high_scores);

    run(&mut session, mode)
}

fn run(session: &mut Session, mode: GameMode) -> Result<()> {
    if !session.start(mode) {
        bail!("could not start a {} game", mode.label());
    }

    let mut bot = Autoplayer::new(HeuristicPolicy::default());
    let mut ticks: u64 = 0;

    while session.state() == SessionState::Playing && ticks < MAX_TICKS {
        bot.step(session).context("autoplayer placement failed")?;
        session.update(TICK_MS);
        ticks += 1;
    }

    let Some(result) = session.take_result() else {
        session.back_to_menu();
        bail!("{} game did not finish within {MAX_TICKS} ticks", mode.label());
    };

    info!(
        pieces = bot.placed(),
        ticks,
        rank = ?session.last_rank(),
        "session over"
    );
    println!("{}", serde_json::to_string_pretty(&result)?);

    Ok(())
}
