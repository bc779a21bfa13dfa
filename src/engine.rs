//! The state machine driving one twenty questions game.
//!
//! Each game walks a fixed per-turn sequence: ask, answer, guess, check.
//! The check transition is the only branch, and it is a pure function of
//! the turn counter and the normalized guess/secret pair; it never calls
//! back into the oracle. The engine owns its [`GameState`] exclusively and
//! emits [`TurnEvent`]s for the driver to consume stepwise.

use crate::config::{ConfigError, EngineConfig};
use crate::normalize::normalize;
use crate::oracle::{CompletionFailure, Oracle};
use crate::state::{GameState, InvariantViolation};
use derive_more::{Display, Error, From};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};

/// Phase of the turn state machine.
///
/// The check transition loops straight back to `AwaitQuestion` when the
/// game continues, so there is no separate resting state between turns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Phase {
    /// No secret committed yet.
    Init,
    /// Ready for the next question.
    AwaitQuestion,
    /// A question is pending an answer.
    AwaitAnswer,
    /// A full Q/A pair is waiting on a guess.
    AwaitGuess,
    /// The turn is complete and termination is being decided.
    Check,
    /// The game has ended.
    Terminal,
}

/// Terminal classification of a finished game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, strum::Display)]
pub enum Outcome {
    /// The normalized guess matched the normalized secret.
    Won,
    /// The turn limit was reached without a match.
    Exhausted,
}

/// Observable event produced by one engine step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TurnEvent {
    /// The questioner asked a question.
    QuestionAsked(String),
    /// The host answered the pending question.
    AnswerGiven(String),
    /// The questioner committed a guess.
    GuessMade(String),
    /// The turn ended without a terminal condition.
    RoundContinues {
        /// Turns left before exhaustion.
        turns_remaining: u32,
    },
    /// The game reached a terminal outcome.
    GameEnded {
        /// Why the game ended.
        outcome: Outcome,
        /// The host's secret, revealed.
        secret: String,
        /// The final guess made.
        final_guess: String,
    },
}

/// Engine-level error: every way a game can abort.
#[derive(Debug, Display, Error, From)]
pub enum EngineError {
    /// An oracle call failed; the turn is left incomplete.
    #[display("{_0}")]
    Completion(#[error(source)] CompletionFailure),
    /// The state machine detected an impossible position.
    #[display("{_0}")]
    Invariant(#[error(source)] InvariantViolation),
    /// The engine was constructed with unusable bounds.
    #[display("{_0}")]
    Configuration(#[error(source)] ConfigError),
}

/// Pure branch predicate for the check transition.
///
/// A match is tested before the turn limit, so a guess that lands on the
/// exact final turn reports `Won` even though both conditions hold.
fn decide(turn_count: u32, max_turns: u32, guess: &str, secret: &str) -> Option<Outcome> {
    if normalize(guess) == normalize(secret) {
        Some(Outcome::Won)
    } else if turn_count >= max_turns {
        Some(Outcome::Exhausted)
    } else {
        None
    }
}

/// Drives one game from an empty state to a terminal outcome.
///
/// Strictly sequential: each oracle call completes (or fails) before the
/// next phase begins. A failed call is never retried and leaves the history
/// untouched. Independent games may run concurrently, each with its own
/// engine.
#[derive(Debug)]
pub struct TurnEngine<O> {
    config: EngineConfig,
    oracle: O,
    state: GameState,
    phase: Phase,
    outcome: Option<Outcome>,
}

impl<O: Oracle> TurnEngine<O> {
    /// Creates an engine over an empty game state.
    ///
    /// # Errors
    ///
    /// Rejects non-positive bounds and non-pristine states before any
    /// oracle call is made.
    #[instrument(skip(config, oracle, state), fields(max_turns = config.max_turns()))]
    pub fn new(config: EngineConfig, oracle: O, state: GameState) -> Result<Self, EngineError> {
        config.validate()?;
        state.ensure_pristine()?;
        info!("Engine constructed");
        Ok(Self {
            config,
            oracle,
            state,
            phase: Phase::Init,
            outcome: None,
        })
    }

    /// Advances to the next observable event.
    ///
    /// Returns `Ok(None)` once the game is over; callers can loop on
    /// `while let Some(event) = engine.step().await?` to consume the full
    /// event stream incrementally.
    pub async fn step(&mut self) -> Result<Option<TurnEvent>, EngineError> {
        while self.phase != Phase::Terminal {
            if let Some(event) = self.advance().await? {
                return Ok(Some(event));
            }
        }
        Ok(None)
    }

    /// Runs the game to completion and reports the outcome.
    pub async fn run(&mut self) -> Result<Outcome, EngineError> {
        while self.step().await?.is_some() {}
        self.outcome.ok_or_else(|| {
            InvariantViolation::new("engine terminal without an outcome".to_string()).into()
        })
    }

    /// Performs exactly one transition of the state machine.
    #[instrument(skip(self), fields(phase = %self.phase, turn = self.state.turn_count()))]
    async fn advance(&mut self) -> Result<Option<TurnEvent>, EngineError> {
        match self.phase {
            Phase::Init => {
                let secret = self
                    .oracle
                    .create_secret(self.config.max_secret_words())
                    .await?;
                debug!("Secret committed");
                self.state.set_secret(secret);
                self.phase = Phase::AwaitQuestion;
                Ok(None)
            }
            Phase::AwaitQuestion => {
                self.state.ensure_turn_boundary()?;
                let history = self.state.qa_history();
                let question = self
                    .oracle
                    .generate_question(&history, self.state.turn_count())
                    .await?;
                self.state.record_question(question.clone());
                self.phase = Phase::AwaitAnswer;
                Ok(Some(TurnEvent::QuestionAsked(question)))
            }
            Phase::AwaitAnswer => {
                let answer = self
                    .oracle
                    .answer_yes_no(self.state.secret(), self.state.current_question())
                    .await?;
                self.state.record_answer(answer.clone());
                self.phase = Phase::AwaitGuess;
                Ok(Some(TurnEvent::AnswerGiven(answer)))
            }
            Phase::AwaitGuess => {
                let history = self.state.qa_history();
                let guess = self
                    .oracle
                    .generate_guess(&history, self.state.guesses(), self.config.max_guess_words())
                    .await?;
                self.state.record_guess(guess.clone());
                self.phase = Phase::Check;
                Ok(Some(TurnEvent::GuessMade(guess)))
            }
            Phase::Check => {
                self.state.complete_turn();
                match decide(
                    self.state.turn_count(),
                    self.config.max_turns(),
                    self.state.current_guess(),
                    self.state.secret(),
                ) {
                    Some(outcome) => {
                        self.state.finish();
                        self.outcome = Some(outcome);
                        self.phase = Phase::Terminal;
                        info!(%outcome, "Game over");
                        Ok(Some(TurnEvent::GameEnded {
                            outcome,
                            secret: self.state.secret().clone(),
                            final_guess: self.state.current_guess().clone(),
                        }))
                    }
                    None => {
                        let turns_remaining = self.config.max_turns() - self.state.turn_count();
                        debug!(turns_remaining, "Round continues");
                        self.phase = Phase::AwaitQuestion;
                        Ok(Some(TurnEvent::RoundContinues { turns_remaining }))
                    }
                }
            }
            Phase::Terminal => Ok(None),
        }
    }

    /// Current phase of the state machine.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read access to the game record.
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// The terminal outcome, once the game has ended.
    pub fn outcome(&self) -> Option<Outcome> {
        self.outcome
    }

    /// Consumes the engine and releases the game record.
    pub fn into_state(self) -> GameState {
        self.state
    }
}
