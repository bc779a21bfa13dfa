//! Mutable record of one twenty questions game in progress.
//!
//! A [`GameState`] is created empty by the driver and owned exclusively by
//! the engine for the duration of a game. History fields are append-only and
//! all mutation is crate-private, so external observers can only read.

use crate::oracle::QaPair;
use derive_getters::Getters;
use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

/// Per-game record: turn counter, Q/A/guess history, secret, and scratch
/// fields for the values produced in the current cycle.
#[derive(Debug, Clone, Default, Getters, Serialize, Deserialize)]
pub struct GameState {
    /// Completed question/answer/guess cycles.
    #[getter(skip)]
    turn_count: u32,
    /// Questions asked so far, in turn order.
    questions: Vec<String>,
    /// Host answers; `answers[i]` replies to `questions[i]`.
    answers: Vec<String>,
    /// Guesses made so far, one per completed turn.
    guesses: Vec<String>,
    /// The host's secret concept. Set exactly once, before turn 1.
    secret: String,
    /// Latest question produced this turn.
    current_question: String,
    /// Latest answer produced this turn.
    current_answer: String,
    /// Latest guess produced this turn.
    current_guess: String,
    /// Terminal flag. Monotonic: once true, never resets.
    #[getter(skip)]
    is_over: bool,
}

impl GameState {
    /// Creates an empty game state, ready to be handed to an engine.
    #[instrument]
    pub fn new() -> Self {
        debug!("Creating empty game state");
        Self::default()
    }

    /// Number of completed cycles.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    /// Whether the game has reached a terminal outcome.
    pub fn is_over(&self) -> bool {
        self.is_over
    }

    /// The Q/A history as owned pairs, for forwarding to an oracle.
    pub fn qa_history(&self) -> Vec<QaPair> {
        self.questions
            .iter()
            .zip(self.answers.iter())
            .map(|(q, a)| QaPair::new(q.clone(), a.clone()))
            .collect()
    }

    /// Verifies this state has never been played: a game must start from
    /// scratch, a half-completed turn is not a resumable position.
    pub(crate) fn ensure_pristine(&self) -> Result<(), InvariantViolation> {
        if self.turn_count != 0
            || !self.questions.is_empty()
            || !self.answers.is_empty()
            || !self.guesses.is_empty()
            || !self.secret.is_empty()
            || self.is_over
        {
            return Err(InvariantViolation::new(
                "initial game state must be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Verifies the state sits on a turn boundary with a committed secret.
    ///
    /// Holds before every question phase: all three histories have exactly
    /// `turn_count` entries and the secret is non-empty.
    pub(crate) fn ensure_turn_boundary(&self) -> Result<(), InvariantViolation> {
        if self.secret.is_empty() {
            return Err(InvariantViolation::new(
                "secret is empty at question phase".to_string(),
            ));
        }
        let expected = self.turn_count as usize;
        if self.questions.len() != expected
            || self.answers.len() != expected
            || self.guesses.len() != expected
        {
            return Err(InvariantViolation::new(format!(
                "history out of step at turn {}: {} questions, {} answers, {} guesses",
                self.turn_count,
                self.questions.len(),
                self.answers.len(),
                self.guesses.len(),
            )));
        }
        Ok(())
    }

    pub(crate) fn set_secret(&mut self, secret: String) {
        self.secret = secret;
    }

    pub(crate) fn record_question(&mut self, question: String) {
        self.questions.push(question.clone());
        self.current_question = question;
    }

    pub(crate) fn record_answer(&mut self, answer: String) {
        self.answers.push(answer.clone());
        self.current_answer = answer;
    }

    pub(crate) fn record_guess(&mut self, guess: String) {
        self.guesses.push(guess.clone());
        self.current_guess = guess;
    }

    pub(crate) fn complete_turn(&mut self) {
        self.turn_count += 1;
    }

    pub(crate) fn finish(&mut self) {
        self.is_over = true;
    }
}

/// Defensive invariant failure: the state machine detected an impossible
/// position. Fatal, never silently recovered.
#[derive(Debug, Clone, Display, Error)]
#[display("invariant violation: {} at {}:{}", message, file, line)]
pub struct InvariantViolation {
    /// What was out of order.
    pub message: String,
    /// Line number where the violation was raised.
    pub line: u32,
    /// Source file where the violation was raised.
    pub file: &'static str,
}

impl InvariantViolation {
    /// Creates a new invariant violation, capturing the caller location.
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

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_appends_in_order() {
        let mut state = GameState::new();
        state.set_secret("telephone".to_string());
        state.record_question("Is it alive?".to_string());
        state.record_answer("No".to_string());
        state.record_guess("chair".to_string());
        state.complete_turn();

        assert_eq!(state.turn_count(), 1);
        assert_eq!(state.questions(), &["Is it alive?".to_string()]);
        assert_eq!(state.answers(), &["No".to_string()]);
        assert_eq!(state.guesses(), &["chair".to_string()]);
        assert_eq!(state.current_question(), "Is it alive?");
        assert_eq!(state.current_guess(), "chair");
        assert!(!state.is_over());
    }

    #[test]
    fn qa_history_pairs_questions_with_answers() {
        let mut state = GameState::new();
        state.set_secret("lamp".to_string());
        for i in 0..3 {
            state.record_question(format!("q{i}"));
            state.record_answer(format!("a{i}"));
            state.record_guess(format!("g{i}"));
            state.complete_turn();
        }

        let history = state.qa_history();
        assert_eq!(history.len(), 3);
        for (i, pair) in history.iter().enumerate() {
            assert_eq!(pair.question(), &format!("q{i}"));
            assert_eq!(pair.answer(), &format!("a{i}"));
        }
    }

    #[test]
    fn fresh_state_is_pristine() {
        assert!(GameState::new().ensure_pristine().is_ok());
    }

    #[test]
    fn played_state_is_not_pristine() {
        let mut state = GameState::new();
        state.set_secret("desk".to_string());
        assert!(state.ensure_pristine().is_err());
    }

    #[test]
    fn turn_boundary_requires_secret() {
        let state = GameState::new();
        let err = state.ensure_turn_boundary().unwrap_err();
        assert!(err.message.contains("secret"));
    }

    #[test]
    fn turn_boundary_rejects_mismatched_history() {
        let mut state = GameState::new();
        state.set_secret("desk".to_string());
        state.record_question("q".to_string());
        let err = state.ensure_turn_boundary().unwrap_err();
        assert!(err.message.contains("out of step"));
    }

    #[test]
    fn finish_is_monotonic() {
        let mut state = GameState::new();
        state.finish();
        state.finish();
        assert!(state.is_over());
    }
}
