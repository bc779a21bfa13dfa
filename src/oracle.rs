//! Capability interface for the external text-completion collaborator.
//!
//! The engine depends on four call shapes and nothing else: any backend that
//! can produce a secret, a question, a yes/no answer, and a guess can play.
//! Swapping a scripted oracle in for tests and an LLM-backed one for
//! production happens behind this trait.

use async_trait::async_trait;
use derive_getters::Getters;
use derive_more::{Display, Error};
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One asked question paired with the host's reply.
#[derive(Debug, Clone, PartialEq, Eq, Getters, Serialize, Deserialize, new)]
pub struct QaPair {
    /// The question the guesser asked.
    question: String,
    /// The host's reply.
    answer: String,
}

/// External collaborator supplying all natural-language content.
///
/// Implementations must be stateless across calls from the engine's
/// perspective (everything they need, history and prior guesses, is passed
/// explicitly) and safe for concurrent invocation across independent games.
/// The engine never retries a failed call; retry policy, if any, belongs
/// behind this trait.
#[async_trait]
pub trait Oracle: Send + Sync {
    /// Produces a secret concept of at most `max_secret_words` words.
    async fn create_secret(&self, max_secret_words: u32) -> Result<String, CompletionFailure>;

    /// Produces the next yes/no question given the Q/A history so far.
    ///
    /// Not repeating an earlier question is the implementation's contract;
    /// the engine forwards history but does not re-verify uniqueness.
    async fn generate_question(
        &self,
        history: &[QaPair],
        turn_index: u32,
    ) -> Result<String, CompletionFailure>;

    /// Answers whether the secret fits the question, as "Yes" or "No".
    ///
    /// The engine stores the reply verbatim and never parses it.
    async fn answer_yes_no(
        &self,
        secret: &str,
        question: &str,
    ) -> Result<String, CompletionFailure>;

    /// Produces a candidate guess of at most `max_guess_words` words,
    /// distinct from the guesses already made.
    async fn generate_guess(
        &self,
        history: &[QaPair],
        prior_guesses: &[String],
        max_guess_words: u32,
    ) -> Result<String, CompletionFailure>;
}

/// An oracle call returned no usable content or the collaborator was
/// unreachable. Aborts the current game; the turn is left incomplete and the
/// game is not resumable.
#[derive(Debug, Clone, Display, Error)]
#[display("completion failure: {} at {}:{}", message, file, line)]
pub struct CompletionFailure {
    /// What went wrong.
    pub message: String,
    /// Line number where the failure was raised.
    pub line: u32,
    /// Source file where the failure was raised.
    pub file: &'static str,
}

impl CompletionFailure {
    /// Creates a new completion failure, capturing the caller location.
    #[track_caller]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
