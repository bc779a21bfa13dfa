//! Twenty Questions - CLI driver
//!
//! Runs LLM-backed twenty questions games and prints the event stream. All
//! user-visible printing lives here; the engine only emits events.

#![warn(missing_docs)]

mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};
use std::path::Path;
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use twenty_questions::{
    EngineConfig, EngineError, GameConfig, GameState, LlmClient, LlmOracle, Outcome, TurnEngine,
    TurnEvent,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();
    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play { config, max_turns } => run_play(&config, max_turns).await,
        Command::Batch {
            config,
            count,
            max_turns,
        } => run_batch(&config, count, max_turns).await,
    }
}

#[instrument]
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn,twenty_questions=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Loads the game configuration, falling back to defaults if the file is
/// absent.
#[instrument(skip(path), fields(path = %path.display()))]
fn load_config(path: &Path) -> Result<GameConfig> {
    if path.exists() {
        Ok(GameConfig::from_file(path)?)
    } else {
        info!(
            "Config file not found at {}, using defaults",
            path.display()
        );
        Ok(GameConfig::default())
    }
}

/// Resolves the engine bounds, applying the CLI turn-limit override.
fn engine_config(config: &GameConfig, max_turns: Option<u32>) -> EngineConfig {
    let base = *config.engine();
    match max_turns {
        Some(n) => EngineConfig::new(n, base.max_secret_words(), base.max_guess_words()),
        None => base,
    }
}

/// Builds the production oracle from the configured LLM settings.
fn build_oracle(config: &GameConfig, engine_cfg: &EngineConfig) -> Result<LlmOracle> {
    let llm_config = config.llm().create_llm_config()?;
    Ok(LlmOracle::new(
        LlmClient::new(llm_config),
        engine_cfg.max_turns(),
    ))
}

/// Plays one game stepwise, printing each event as it happens.
#[instrument(skip(path))]
async fn run_play(path: &Path, max_turns: Option<u32>) -> Result<()> {
    let config = load_config(path)?;
    let engine_cfg = engine_config(&config, max_turns);
    let oracle = build_oracle(&config, &engine_cfg)?;

    let mut engine = TurnEngine::new(engine_cfg, oracle, GameState::new())?;
    while let Some(event) = engine.step().await? {
        print_event(&event);
    }
    Ok(())
}

/// Runs `count` independent games concurrently and prints a win tally.
#[instrument(skip(path))]
async fn run_batch(path: &Path, count: u32, max_turns: Option<u32>) -> Result<()> {
    let config = load_config(path)?;
    let engine_cfg = engine_config(&config, max_turns);
    let oracle = build_oracle(&config, &engine_cfg)?;

    let mut games = tokio::task::JoinSet::new();
    for game_index in 0..count {
        let oracle = oracle.clone();
        games.spawn(async move {
            let mut engine = TurnEngine::new(engine_cfg, oracle, GameState::new())?;
            let outcome = engine.run().await?;
            Ok::<_, EngineError>((game_index, outcome, engine.into_state()))
        });
    }

    let mut wins = 0u32;
    let mut finished = 0u32;
    while let Some(joined) = games.join_next().await {
        match joined? {
            Ok((game_index, outcome, state)) => {
                finished += 1;
                if outcome == Outcome::Won {
                    wins += 1;
                }
                println!(
                    "Game {}: {} in {} turns (secret: {})",
                    game_index + 1,
                    outcome,
                    state.turn_count(),
                    state.secret()
                );
            }
            Err(e) => warn!(error = %e, "Game aborted"),
        }
    }
    println!("Won {wins} of {finished} games");
    Ok(())
}

/// Prints one engine event in the per-turn format.
fn print_event(event: &TurnEvent) {
    match event {
        TurnEvent::QuestionAsked(question) => println!("Question: {question}"),
        TurnEvent::AnswerGiven(answer) => println!("Answer: {answer}"),
        TurnEvent::GuessMade(guess) => println!("Guess: {guess}"),
        TurnEvent::RoundContinues { turns_remaining } => {
            println!("Next round! Trials left: {turns_remaining}\n");
        }
        TurnEvent::GameEnded {
            outcome,
            secret,
            final_guess,
        } => match outcome {
            Outcome::Won => {
                println!("Correct! Final guess: {final_guess}, the answer was: {secret}");
            }
            Outcome::Exhausted => {
                println!("Game over! Out of trials. The correct answer: {secret}");
            }
        },
    }
}
