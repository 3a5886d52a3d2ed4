//! Integration test for LLM client connectivity.

use strictly_chess::{
    ChessBoard, CompletionProvider, GenerationParams, LlmClient, LlmConfig, LlmProvider,
    MoveResolver, PromptContext, PromptTemplate, TemplatePreset,
};
use tracing::instrument;

async fn ask_for_opening_move(provider: LlmProvider, key_var: &str, model: &str) {
    dotenvy::dotenv().ok();

    let api_key = std::env::var(key_var).unwrap_or_else(|_| panic!("{} not set", key_var));

    let config = LlmConfig::new(
        provider,
        api_key,
        model.to_string(),
        GenerationParams::default(),
    );
    let client = LlmClient::new(config);

    let board = ChessBoard::new();
    let legal = board.legal_moves();
    let prompt = PromptTemplate::from(TemplatePreset::Grandmaster)
        .render(&PromptContext::from_board(&board, &legal));

    let response = client.complete(&prompt).await.expect("Failed to generate");
    eprintln!("Response: {}", response);

    let resolution = MoveResolver::new(0)
        .resolve(&response, &legal)
        .expect("Failed to resolve");
    assert!(legal.contains(resolution.label()));
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_anthropic_connectivity() {
    ask_for_opening_move(
        LlmProvider::Anthropic,
        "ANTHROPIC_API_KEY",
        "claude-3-5-haiku-20241022",
    )
    .await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_openai_connectivity() {
    ask_for_opening_move(LlmProvider::OpenAI, "OPENAI_API_KEY", "gpt-4o-mini").await;
}

#[tokio::test]
#[cfg_attr(not(feature = "api"), ignore)]
#[instrument]
async fn test_cohere_connectivity() {
    ask_for_opening_move(LlmProvider::Cohere, "COHERE_API_KEY", "command").await;
}
