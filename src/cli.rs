//! Command-line interface for twenty_questions.

use clap::{Parser, Subcommand};

/// Twenty Questions - turn-based deduction games between LLM players
#[derive(Parser, Debug)]
#[command(name = "twenty_questions")]
#[command(about = "Turn-based twenty questions between LLM players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play a single game, printing each turn
    Play {
        /// Path to the game configuration file
        #[arg(short, long, default_value = "game_config.toml")]
        config: std::path::PathBuf,

        /// Override the configured turn limit
        #[arg(long)]
        max_turns: Option<u32>,
    },

    /// Run independent games concurrently and tally the outcomes
    Batch {
        /// Path to the game configuration file
        #[arg(short, long, default_value = "game_config.toml")]
        config: std::path::PathBuf,

        /// Number of games to run
        #[arg(short = 'n', long, default_value = "4")]
        count: u32,

        /// Override the configured turn limit
        #[arg(long)]
        max_turns: Option<u32>,
    },
}
