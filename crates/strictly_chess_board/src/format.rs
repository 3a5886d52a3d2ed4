//! Prompt-ready text renderings of a board.
//!
//! Each function produces one fragment that a prompt template can splice in:
//!
//! - [`piece_listing`]: `"Black: Rh8, Ng8, …. White: Ph2, …"`
//! - [`move_history`]: numbered move pairs, one per line
//! - [`legal_moves_text`]: comma-separated legal move labels

use crate::{ChessBoard, MoveLabel, Placement, Side};
use tracing::instrument;

/// Lists every piece as `<letter><file><rank>`, grouped by side.
#[instrument(skip(board))]
pub fn piece_listing(board: &ChessBoard) -> String {
    listing_from_placements(&board.placements())
}

/// Renders placements (in the order given) under `Black:` and `White:`.
pub fn listing_from_placements(placements: &[Placement]) -> String {
    let tokens = |side: Side| -> Vec<String> {
        placements
            .iter()
            .filter(|p| *p.side() == side)
            .map(placement_token)
            .collect()
    };

    format!(
        "Black: {}. White: {}",
        tokens(Side::Black).join(", "),
        tokens(Side::White).join(", ")
    )
}

fn placement_token(placement: &Placement) -> String {
    let square = *placement.square();
    let file = char::from(b'a' + square % 8);
    let rank = square / 8 + 1;
    format!("{}{}{}", placement.letter(), file, rank)
}

/// Numbered move history replayed from the board's root position.
///
/// Starting from the standard position, two moves give `"1. e4 e5"` and a
/// third adds a line `"2. Nf3"`. A root with Black to move opens with
/// `"<n>... <move>"`.
#[instrument(skip(board))]
pub fn move_history(board: &ChessBoard) -> String {
    numbered_history(
        &board.history_labels(),
        board.root_fullmove(),
        board.root_turn(),
    )
}

/// Numbers `labels` as move pairs starting at `fullmove` with `first` to move.
pub fn numbered_history(labels: &[MoveLabel], fullmove: u32, first: Side) -> String {
    let mut history = String::new();
    let mut number = fullmove;
    let mut side = first;

    for label in labels {
        match side {
            Side::White => {
                history.push_str(&format!("{}. {} ", number, label));
            }
            Side::Black => {
                if history.is_empty() {
                    history.push_str(&format!("{}... ", number));
                }
                history.push_str(&format!("{}\n", label));
                number += 1;
            }
        }
        side = side.opponent();
    }

    history.trim_end().to_string()
}

/// Joins legal move labels with `", "`, preserving their order.
pub fn legal_moves_text(legal_moves: &[MoveLabel]) -> String {
    legal_moves
        .iter()
        .map(MoveLabel::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
