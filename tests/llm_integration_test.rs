//! Integration tests for LLM connectivity and a real end-to-end game.
//!
//! These spend API tokens, so they are ignored unless the `api` marker
//! feature is enabled: `cargo test --features api`.

use twenty_questions::{
    EngineConfig, GameState, LlmClient, LlmConfig, LlmOracle, LlmProvider, TurnEngine,
};

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn anthropic_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("ANTHROPIC_API_KEY").expect("ANTHROPIC_API_KEY not set");

    let config = LlmConfig::new(
        LlmProvider::Anthropic,
        api_key,
        "claude-3-5-haiku-20241022".to_string(),
        50,
        1.0,
    );

    let client = LlmClient::new(config);

    let response = client
        .generate(
            "You are a helpful assistant.",
            "Say 'Hello, world!' and nothing else.",
        )
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn openai_connectivity() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");

    let config = LlmConfig::new(
        LlmProvider::OpenAI,
        api_key,
        "gpt-4o-mini".to_string(),
        50,
        1.0,
    );

    let client = LlmClient::new(config);

    let response = client
        .generate(
            "You are a helpful assistant.",
            "Say 'Hello, world!' and nothing else.",
        )
        .await
        .expect("Failed to generate");

    assert!(!response.is_empty(), "Response should not be empty");
    eprintln!("Response: {}", response);
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
async fn llm_oracle_plays_a_full_game() {
    dotenvy::dotenv().ok();

    let api_key = std::env::var("OPENAI_API_KEY").expect("OPENAI_API_KEY not set");

    let config = EngineConfig::new(5, 2, 2);
    let llm = LlmConfig::new(
        LlmProvider::OpenAI,
        api_key,
        "gpt-4o-mini".to_string(),
        150,
        1.0,
    );
    let oracle = LlmOracle::new(LlmClient::new(llm), config.max_turns());

    let mut engine = TurnEngine::new(config, oracle, GameState::new()).expect("engine");
    let outcome = engine.run().await.expect("game should reach an outcome");

    let state = engine.state();
    assert!(state.is_over());
    assert!(state.turn_count() >= 1 && state.turn_count() <= 5);
    assert_eq!(state.questions().len(), state.answers().len());
    assert_eq!(state.guesses().len() as u32, state.turn_count());
    assert!(!state.secret().is_empty());
    eprintln!("Outcome: {outcome}, secret: {}", state.secret());
}
