//! Baseline player that ignores the position.

use super::Player;
use crate::error::GameError;
use crate::resolver::{MoveResolver, Resolution};
use strictly_chess_board::ChessBoard;
use tracing::debug;

/// Plays a uniformly random legal move every turn.
///
/// Every move counts as a random fallback in game statistics.
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    resolver: MoveResolver,
}

impl RandomPlayer {
    /// Creates a random player seeded from the operating system.
    pub fn new(name: impl Into<String>) -> Self {
        Self::with_resolver(name, MoveResolver::from_entropy())
    }

    /// Creates a random player with a reproducible move sequence.
    pub fn seeded(name: impl Into<String>, seed: u64) -> Self {
        Self::with_resolver(name, MoveResolver::new(seed))
    }

    fn with_resolver(name: impl Into<String>, resolver: MoveResolver) -> Self {
        Self {
            name: name.into(),
            resolver,
        }
    }
}

#[async_trait::async_trait]
impl Player for RandomPlayer {
    async fn choose_move(&mut self, board: &ChessBoard) -> Result<Resolution, GameError> {
        let resolution = self.resolver.fallback(&board.legal_moves())?;
        debug!(player = %self.name, label = %resolution.label(), "Random player chose move");
        Ok(resolution)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
