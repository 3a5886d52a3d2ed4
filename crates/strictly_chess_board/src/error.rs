//! Board error types.

use derive_more::{Display, Error};
use tracing::instrument;

/// Board error with location tracking.
///
/// Raised when a position cannot be built or a move label does not name a
/// legal move in the current position.
#[derive(Debug, Clone, Display, Error)]
#[display("Board error: {} at {}:{}", message, file, line)]
pub struct BoardError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl BoardError {
    /// Creates a new board error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message: message.into(),
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<shakmaty::fen::ParseFenError> for BoardError {
    #[track_caller]
    fn from(err: shakmaty::fen::ParseFenError) -> Self {
        Self::new(format!("Invalid FEN: {}", err))
    }
}
