//! Chess board adapter for prompt-driven players.
//!
//! Wraps the `shakmaty` rules engine with the handful of capabilities a
//! prompt player needs (legal move labels, move application, terminal
//! outcome, piece placement, replayable history) and renders those as
//! prompt-ready text.
//!
//! ```
//! use strictly_chess_board::{ChessBoard, MoveLabel, move_history};
//!
//! let mut board = ChessBoard::new();
//! board.play(&MoveLabel::from("e4")).unwrap();
//! board.play(&MoveLabel::from("e5")).unwrap();
//! assert_eq!(move_history(&board), "1. e4 e5");
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod board;
mod error;
mod format;
mod types;

pub use board::ChessBoard;
pub use error::BoardError;
pub use format::{
    legal_moves_text, listing_from_placements, move_history, numbered_history, piece_listing,
};
pub use types::{DrawReason, GameOutcome, MoveLabel, Placement, Side};
