//! LLM-backed production implementation of the [`Oracle`] trait.
//!
//! One completion client plays both roles: the host (secret selection and
//! yes/no answers) and the questioner (questions and guesses). Prompts carry
//! the full Q/A memory explicitly on every call, so the backend stays
//! stateless between calls.

use crate::llm_client::LlmClient;
use crate::oracle::{CompletionFailure, Oracle, QaPair};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Oracle backed by a chat-completion LLM.
#[derive(Debug, Clone)]
pub struct LlmOracle {
    client: LlmClient,
    max_turns: u32,
}

impl LlmOracle {
    /// Creates an oracle over a completion client.
    ///
    /// `max_turns` is quoted in the prompts so both roles know the trial
    /// budget; the engine enforces the actual limit.
    #[instrument(skip(client))]
    pub fn new(client: LlmClient, max_turns: u32) -> Self {
        debug!(max_turns, "Creating LLM oracle");
        Self { client, max_turns }
    }
}

/// Renders the Q/A history as alternating `Q:`/`A:` lines.
fn format_history(history: &[QaPair]) -> String {
    history
        .iter()
        .map(|pair| format!("Q: {}\nA: {}", pair.question(), pair.answer()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Strips a guess down to letters and spaces for prompt display.
fn display_guess(guess: &str) -> String {
    guess
        .chars()
        .filter(|c| c.is_ascii_alphabetic() || *c == ' ')
        .collect()
}

#[async_trait]
impl Oracle for LlmOracle {
    #[instrument(skip(self))]
    async fn create_secret(&self, max_secret_words: u32) -> Result<String, CompletionFailure> {
        let system = format!(
            "You are the host of a {} questions game. You need to think of a \
             secret object that your opponent will try to guess. The secret \
             object has to consist of at most {} words. Be as concise as \
             possible and reply with the object alone.",
            self.max_turns, max_secret_words
        );
        self.client.generate(&system, "The secret object:").await
    }

    #[instrument(skip(self, history), fields(history_len = history.len()))]
    async fn generate_question(
        &self,
        history: &[QaPair],
        turn_index: u32,
    ) -> Result<String, CompletionFailure> {
        let system = format!(
            "You are an expert in reading someone's mind and you are playing \
             {max} questions. You need to guess an object that is currently \
             in my mind, and you only have a maximum of {max} trials. You \
             have a memory of the questions you have asked before and the \
             corresponding answers. Use that knowledge to formulate the next \
             question so that it helps you guess the object in my mind. A \
             'yes' answer means you are closer to the correct answer, a 'no' \
             answer means you are farther from it. The next question has to \
             narrow down the search space left by the questions with 'yes' \
             answers. DO NOT ask a question you have already asked.",
            max = self.max_turns
        );
        let user = format!(
            "These are the previous questions and answers:\n{}\nYou have \
             asked {} questions.\nNext question:",
            format_history(history),
            turn_index
        );
        self.client.generate(&system, &user).await
    }

    #[instrument(skip(self, secret, question))]
    async fn answer_yes_no(
        &self,
        secret: &str,
        question: &str,
    ) -> Result<String, CompletionFailure> {
        let system = format!(
            "You are the host in a game of {} questions. You are currently \
             thinking about: {}\nAnswer whether the object you are thinking \
             about fits your opponent's question. You can only answer Yes or \
             No.",
            self.max_turns, secret
        );
        let user = format!("Your opponent asked this question: {}", question);
        self.client.generate(&system, &user).await
    }

    #[instrument(skip(self, history, prior_guesses), fields(history_len = history.len(), prior = prior_guesses.len()))]
    async fn generate_guess(
        &self,
        history: &[QaPair],
        prior_guesses: &[String],
        max_guess_words: u32,
    ) -> Result<String, CompletionFailure> {
        let excluded = prior_guesses
            .iter()
            .map(|g| display_guess(g))
            .collect::<Vec<_>>()
            .join(", ");
        let system = format!(
            "You are an expert in reading someone's mind. You have a memory \
             of the questions you have asked before and the corresponding \
             answers. Use that knowledge to guess what object your opponent \
             is currently thinking about. DO NOT guess an object you have \
             already guessed. You have guessed these: {}. Your guess has to \
             fit the previous questions with 'yes' answers and MUST NOT fit \
             the previous questions with 'no' answers. Your guess can consist \
             of at most {} words. Be as concise as possible.",
            excluded, max_guess_words
        );
        let user = format!(
            "These are the previous questions and answers:\n{}\nYour guess:",
            format_history(history)
        );
        self.client.generate(&system, &user).await
    }
}
