//! Twenty Questions library - turn-based deduction games with LLM players
//!
//! One engine drives a single game of twenty questions between a host role
//! (which commits to a secret and answers yes/no) and a questioner role
//! (which asks, then guesses). Both roles are supplied by an [`Oracle`]
//! implementation; the engine owns the turn order, history, and termination.
//!
//! # Architecture
//!
//! - **Engine**: stepwise state machine emitting [`TurnEvent`]s
//! - **Oracle**: capability trait for the text-completion collaborator
//! - **LlmOracle**: production oracle over OpenAI or Anthropic backends
//! - **GameState**: append-only per-game record
//!
//! # Example
//!
//! ```no_run
//! use twenty_questions::{
//!     EngineConfig, GameState, LlmClient, LlmOracle, LlmSettings, TurnEngine,
//! };
//!
//! # async fn example() -> anyhow::Result<()> {
//! let config = EngineConfig::default();
//! let llm = LlmSettings::default().create_llm_config()?;
//! let oracle = LlmOracle::new(LlmClient::new(llm), config.max_turns());
//!
//! let mut engine = TurnEngine::new(config, oracle, GameState::new())?;
//! while let Some(event) = engine.step().await? {
//!     println!("{event:?}");
//! }
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod config;
mod engine;
mod llm_client;
mod llm_oracle;
mod normalize;
mod oracle;
mod state;

// Crate-level exports - Configuration
pub use config::{ConfigError, EngineConfig, GameConfig, LlmSettings};

// Crate-level exports - Engine
pub use engine::{EngineError, Outcome, Phase, TurnEngine, TurnEvent};

// Crate-level exports - LLM client
pub use llm_client::{LlmClient, LlmConfig, LlmProvider};

// Crate-level exports - Production oracle
pub use llm_oracle::LlmOracle;

// Crate-level exports - Normalizer
pub use normalize::normalize;

// Crate-level exports - Oracle interface
pub use oracle::{CompletionFailure, Oracle, QaPair};

// Crate-level exports - Game state
pub use state::{GameState, InvariantViolation};
