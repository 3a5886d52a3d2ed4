//! Top-level error for players and the game loop.

use crate::agent_config::ConfigError;
use crate::llm_client::LlmError;
use crate::resolver::ResolveError;
use derive_more::{Display, Error, From};
use strictly_chess_board::BoardError;

/// Any failure that stops a turn or a game.
///
/// Random fallbacks and ambiguous matches are not errors; they are part of a
/// normal [`Resolution`](crate::Resolution).
#[derive(Debug, Clone, Display, Error, From)]
pub enum GameError {
    /// Bad or incomplete configuration, e.g. an unknown provider.
    #[display("{_0}")]
    Config(ConfigError),
    /// Completion call failed; never retried.
    #[display("{_0}")]
    Llm(LlmError),
    /// Resolution was asked to pick from nothing.
    #[display("{_0}")]
    Resolve(ResolveError),
    /// The rules engine rejected a move.
    #[display("{_0}")]
    Board(BoardError),
}
