//! Game loop between two players.

use crate::error::GameError;
use crate::players::Player;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use strictly_chess_board::{ChessBoard, GameOutcome, MoveLabel, Side};
use tokio::sync::mpsc;
use tracing::{debug, error, info, instrument};

/// Default move cap; the loop stops once the counter exceeds it.
pub const DEFAULT_MAX_MOVES: u32 = 99;

/// Count of one player's moves by how they were resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct MoveTally {
    /// Moves named by the completion.
    matched: u32,
    /// Moves drawn at random because the completion named none.
    random_fallback: u32,
}

impl MoveTally {
    /// Records one move.
    pub fn record(&mut self, was_random_fallback: bool) {
        if was_random_fallback {
            self.random_fallback += 1;
        } else {
            self.matched += 1;
        }
    }

    /// Count for one bucket of the fallback flag.
    pub fn count(&self, was_random_fallback: bool) -> u32 {
        if was_random_fallback {
            self.random_fallback
        } else {
            self.matched
        }
    }

    /// All moves recorded.
    pub fn total(&self) -> u32 {
        self.matched + self.random_fallback
    }
}

/// Per-side move tallies for a whole game.
///
/// Keyed by side rather than by player: a [`GameLoop`] seats exactly one
/// player per side, so the two are interchangeable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Getters)]
pub struct GameStatistics {
    /// White's tally.
    white: MoveTally,
    /// Black's tally.
    black: MoveTally,
}

impl GameStatistics {
    /// Tally for `side`.
    pub fn for_side(&self, side: Side) -> &MoveTally {
        match side {
            Side::White => &self.white,
            Side::Black => &self.black,
        }
    }

    fn for_side_mut(&mut self, side: Side) -> &mut MoveTally {
        match side {
            Side::White => &mut self.white,
            Side::Black => &mut self.black,
        }
    }
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::Display)]
pub enum Termination {
    /// The position reached a terminal outcome.
    #[display("{_0}")]
    Outcome(GameOutcome),
    /// The move counter exceeded the cap first.
    #[display("move cap reached")]
    MoveCap,
}

/// Final state of a finished loop.
#[derive(Debug, Clone, Getters)]
pub struct GameReport {
    /// Board after the last move.
    board: ChessBoard,
    /// Why the loop stopped.
    termination: Termination,
    /// Per-side resolution counts.
    statistics: GameStatistics,
    /// Moves applied by the loop.
    moves_played: u32,
}

impl GameReport {
    /// Consumes the report, returning the final board.
    pub fn into_board(self) -> ChessBoard {
        self.board
    }
}

/// Messages sent from the loop to an optional observer.
#[derive(Debug, Clone)]
pub enum GameEvent {
    /// A move was applied.
    MoveMade {
        /// Side that moved.
        side: Side,
        /// Name of the player that moved.
        player: String,
        /// Move played.
        label: MoveLabel,
        /// Whether the move was a random fallback.
        random_fallback: bool,
        /// Plies applied so far, including this one.
        ply: u32,
    },
    /// The loop ended.
    GameOver {
        /// Why it ended.
        termination: Termination,
    },
}

/// Alternates two players on one board until an outcome or the move cap.
pub struct GameLoop {
    white: Box<dyn Player>,
    black: Box<dyn Player>,
    max_moves: u32,
    event_tx: Option<mpsc::UnboundedSender<GameEvent>>,
}

impl GameLoop {
    /// Creates a loop with the default move cap and no observer.
    pub fn new(white: Box<dyn Player>, black: Box<dyn Player>) -> Self {
        Self {
            white,
            black,
            max_moves: DEFAULT_MAX_MOVES,
            event_tx: None,
        }
    }

    /// Sets the move cap.
    pub fn with_max_moves(mut self, max_moves: u32) -> Self {
        self.max_moves = max_moves;
        self
    }

    /// Sends a [`GameEvent`] after every move and at the end.
    pub fn with_events(mut self, event_tx: mpsc::UnboundedSender<GameEvent>) -> Self {
        self.event_tx = Some(event_tx);
        self
    }

    /// Plays from `board` until it reaches an outcome or the cap is exceeded.
    ///
    /// Moves are applied irreversibly. A move the board rejects is an
    /// internal invariant violation and ends the game with an error.
    #[instrument(skip_all, fields(white = %self.white.name(), black = %self.black.name(), max_moves = self.max_moves))]
    pub async fn run(&mut self, mut board: ChessBoard) -> Result<GameReport, GameError> {
        info!("Starting game");
        let mut statistics = GameStatistics::default();
        let mut moves_played: u32 = 0;

        let termination = loop {
            if let Some(outcome) = board.outcome() {
                break Termination::Outcome(outcome);
            }

            let side = board.turn();
            let player = match side {
                Side::White => &mut self.white,
                Side::Black => &mut self.black,
            };

            debug!(player = %player.name(), side = %side, "Waiting for move");
            let resolution = player.choose_move(&board).await?;
            let was_random_fallback = resolution.was_random_fallback();
            let player_name = player.name().to_string();
            let label = resolution.into_label();

            board.play(&label).map_err(|e| {
                error!(label = %label, error = %e, "Resolved move rejected by the board");
                e
            })?;
            statistics.for_side_mut(side).record(was_random_fallback);
            moves_played += 1;

            info!(
                player = %player_name,
                side = %side,
                label = %label,
                random_fallback = was_random_fallback,
                ply = moves_played,
                "Move made"
            );
            self.notify(GameEvent::MoveMade {
                side,
                player: player_name,
                label,
                random_fallback: was_random_fallback,
                ply: moves_played,
            });

            if moves_played > self.max_moves {
                break match board.outcome() {
                    Some(outcome) => Termination::Outcome(outcome),
                    None => Termination::MoveCap,
                };
            }
        };

        info!(termination = %termination, moves_played, "Game finished");
        self.notify(GameEvent::GameOver { termination });

        Ok(GameReport {
            board,
            termination,
            statistics,
            moves_played,
        })
    }

    fn notify(&self, event: GameEvent) {
        if let Some(tx) = &self.event_tx {
            if tx.send(event).is_err() {
                debug!("Event receiver dropped");
            }
        }
    }
}
