//! Player trait and implementations.

mod prompt_agent;
mod random;

pub use prompt_agent::PromptAgent;
pub use random::RandomPlayer;

use crate::error::GameError;
use crate::resolver::Resolution;
use strictly_chess_board::ChessBoard;

/// Trait for players that can choose moves.
#[async_trait::async_trait]
pub trait Player: Send {
    /// Chooses a legal move for the side to move on `board`.
    ///
    /// The board is only read; the game loop applies the returned move.
    async fn choose_move(&mut self, board: &ChessBoard) -> Result<Resolution, GameError>;

    /// Returns the player's display name.
    fn name(&self) -> &str;
}
