//! Player that asks a text-completion model for its move.

use super::Player;
use crate::agent_config::{AgentConfig, ConfigError};
use crate::error::GameError;
use crate::llm_client::{CompletionProvider, Credentials, LlmClient};
use crate::prompt::{PromptContext, PromptTemplate};
use crate::resolver::{MoveResolver, Resolution};
use strictly_chess_board::{ChessBoard, MoveLabel};
use tracing::{debug, info, instrument};

/// Turn agent: formats a prompt, requests a completion, resolves it.
///
/// Holds nothing between decisions beyond its fixed template, provider and
/// resolver. The board is borrowed for exactly one decision.
pub struct PromptAgent {
    name: String,
    template: PromptTemplate,
    provider: Box<dyn CompletionProvider>,
    resolver: MoveResolver,
}

impl PromptAgent {
    /// Creates an agent from its parts.
    pub fn new(
        name: impl Into<String>,
        template: PromptTemplate,
        provider: Box<dyn CompletionProvider>,
        resolver: MoveResolver,
    ) -> Self {
        let name = name.into();
        info!(agent = %name, "Creating prompt agent");
        Self {
            name,
            template,
            provider,
            resolver,
        }
    }

    /// Builds an agent backed by an [`LlmClient`] for `config`.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError`] if the provider's key is missing or the
    /// template cannot be loaded.
    #[instrument(skip(config, credentials), fields(agent = %config.name()))]
    pub fn from_config(
        config: &AgentConfig,
        credentials: &Credentials,
    ) -> Result<Self, ConfigError> {
        let client = LlmClient::new(config.create_llm_config(credentials)?);
        let template = config.resolve_template()?;
        let resolver = match config.seed() {
            Some(seed) => MoveResolver::new(*seed),
            None => MoveResolver::from_entropy(),
        };
        Ok(Self::new(
            config.name().clone(),
            template,
            Box::new(client),
            resolver,
        ))
    }

    /// Prompt template in use.
    pub fn template(&self) -> &PromptTemplate {
        &self.template
    }

    /// Renders the prompt for the current position.
    #[instrument(skip(self, board), fields(agent = %self.name))]
    pub fn format_prompt(&self, board: &ChessBoard) -> String {
        self.render_prompt(board, &board.legal_moves())
    }

    fn render_prompt(&self, board: &ChessBoard, legal_moves: &[MoveLabel]) -> String {
        self.template
            .render(&PromptContext::from_board(board, legal_moves))
    }

    /// Decides one move: prompt, completion, resolution.
    ///
    /// The legal-move set is computed once and used for both the prompt and
    /// the resolution, so the returned label is always legal on `board`.
    ///
    /// # Errors
    ///
    /// Provider failures propagate unchanged; a position without legal moves
    /// yields a resolve error.
    #[instrument(skip(self, board), fields(agent = %self.name, ply = board.ply_count()))]
    pub async fn decide(&mut self, board: &ChessBoard) -> Result<Resolution, GameError> {
        let legal_moves = board.legal_moves();
        let prompt = self.render_prompt(board, &legal_moves);
        debug!(prompt_length = prompt.len(), "Requesting completion");

        let completion = self.provider.complete(&prompt).await?;
        info!(agent = %self.name, completion = %completion, "Completion received");

        let resolution = self.resolver.resolve(&completion, &legal_moves)?;
        info!(
            agent = %self.name,
            label = %resolution.label(),
            random_fallback = resolution.was_random_fallback(),
            "Move resolved"
        );
        Ok(resolution)
    }
}

impl std::fmt::Debug for PromptAgent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PromptAgent")
            .field("name", &self.name)
            .field("template", &self.template)
            .finish_non_exhaustive()
    }
}

#[async_trait::async_trait]
impl Player for PromptAgent {
    async fn choose_move(&mut self, board: &ChessBoard) -> Result<Resolution, GameError> {
        self.decide(board).await
    }

    fn name(&self) -> &str {
        &self.name
    }
}
