//! Vocabulary types shared by the board adapter and the formatters.

use derive_getters::Getters;
use derive_more::Display;
use derive_new::new;
use serde::{Deserialize, Serialize};

/// One side of the board.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumIter,
)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    /// Moves first.
    White,
    /// Moves second.
    Black,
}

impl Side {
    /// Returns the opposing side.
    pub fn opponent(self) -> Self {
        match self {
            Side::White => Side::Black,
            Side::Black => Side::White,
        }
    }
}

impl From<shakmaty::Color> for Side {
    fn from(color: shakmaty::Color) -> Self {
        match color {
            shakmaty::Color::White => Side::White,
            shakmaty::Color::Black => Side::Black,
        }
    }
}

/// A legal move written in standard algebraic notation, including the
/// check (`+`) or mate (`#`) suffix.
///
/// Labels are unique within one position's legal-move set but carry no
/// identity across positions.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, Display)]
#[serde(transparent)]
#[display("{_0}")]
pub struct MoveLabel(String);

impl MoveLabel {
    /// Wraps a SAN string.
    pub fn new(san: impl Into<String>) -> Self {
        Self(san.into())
    }

    /// Returns the label text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for MoveLabel {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl From<&str> for MoveLabel {
    fn from(san: &str) -> Self {
        Self::new(san)
    }
}

impl From<String> for MoveLabel {
    fn from(san: String) -> Self {
        Self(san)
    }
}

impl PartialEq<str> for MoveLabel {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for MoveLabel {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Why a game ended without a winner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
pub enum DrawReason {
    /// Side to move has no legal move and is not in check.
    #[display("stalemate")]
    Stalemate,
    /// Neither side can possibly deliver mate.
    #[display("insufficient material")]
    InsufficientMaterial,
    /// 150 halfmoves without a capture or pawn move.
    #[display("seventy-five-move rule")]
    SeventyFiveMoves,
    /// The same position occurred five times.
    #[display("fivefold repetition")]
    FivefoldRepetition,
}

/// Terminal result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
pub enum GameOutcome {
    /// Checkmate.
    #[display("{winner} wins by checkmate")]
    Decisive {
        /// Side that delivered mate.
        winner: Side,
    },
    /// Drawn game.
    #[display("draw by {_0}")]
    Draw(DrawReason),
}

impl GameOutcome {
    /// Result tag as written in game records (`1-0`, `0-1`, `1/2-1/2`).
    pub fn result_tag(&self) -> &'static str {
        match self {
            GameOutcome::Decisive {
                winner: Side::White,
            } => "1-0",
            GameOutcome::Decisive {
                winner: Side::Black,
            } => "0-1",
            GameOutcome::Draw(_) => "1/2-1/2",
        }
    }

    /// Winning side, if any.
    pub fn winner(&self) -> Option<Side> {
        match self {
            GameOutcome::Decisive { winner } => Some(*winner),
            GameOutcome::Draw(_) => None,
        }
    }
}

/// A piece standing on an occupied square.
#[derive(Debug, Clone, Copy, PartialEq, Eq, new, Getters)]
pub struct Placement {
    /// Owner of the piece.
    side: Side,
    /// Uppercase role letter (`P`, `N`, `B`, `R`, `Q`, `K`).
    letter: char,
    /// Square index, 0 = a1 through 63 = h8.
    square: u8,
}
