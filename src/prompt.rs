//! Prompt templates and placeholder substitution.

use crate::templates::TemplatePreset;
use derive_getters::Getters;
use derive_new::new;
use serde::{Deserialize, Serialize};
use strictly_chess_board::{ChessBoard, MoveLabel, legal_moves_text, move_history, piece_listing};
use strum::IntoEnumIterator;
use tracing::{debug, instrument};

/// Named slot in a prompt template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, strum::EnumIter, strum::Display)]
#[strum(serialize_all = "snake_case")]
pub enum Placeholder {
    /// Piece placement listing.
    BoardState,
    /// Comma-separated legal moves.
    LegalMoves,
    /// Numbered move history.
    MoveHistory,
}

impl Placeholder {
    /// Literal token replaced in template text.
    pub fn token(self) -> &'static str {
        match self {
            Placeholder::BoardState => "!board_state!",
            Placeholder::LegalMoves => "!legal_moves!",
            Placeholder::MoveHistory => "!move_history!",
        }
    }
}

/// Text fragments spliced into a template.
#[derive(Debug, Clone, PartialEq, Eq, new, Getters)]
pub struct PromptContext {
    /// Rendered piece placement.
    board_state: String,
    /// Rendered legal moves.
    legal_moves: String,
    /// Rendered move history.
    move_history: String,
}

impl PromptContext {
    /// Renders all fragments for `board`, listing `legal_moves` in order.
    #[instrument(skip_all)]
    pub fn from_board(board: &ChessBoard, legal_moves: &[MoveLabel]) -> Self {
        Self {
            board_state: piece_listing(board),
            legal_moves: legal_moves_text(legal_moves),
            move_history: move_history(board),
        }
    }

    fn fragment(&self, placeholder: Placeholder) -> &str {
        match placeholder {
            Placeholder::BoardState => &self.board_state,
            Placeholder::LegalMoves => &self.legal_moves,
            Placeholder::MoveHistory => &self.move_history,
        }
    }
}

/// Immutable prompt text containing zero or more placeholders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PromptTemplate {
    text: String,
}

impl PromptTemplate {
    /// Wraps template text.
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }

    /// Raw template text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Placeholders that occur in the template.
    pub fn placeholders(&self) -> Vec<Placeholder> {
        Placeholder::iter()
            .filter(|p| self.text.contains(p.token()))
            .collect()
    }

    /// Substitutes every placeholder with its fragment.
    ///
    /// A single left-to-right pass: text inserted for one placeholder is
    /// never scanned again, so fragments that happen to contain a token
    /// come through verbatim. Placeholders absent from the template are
    /// simply not used.
    #[instrument(skip_all, fields(template_len = self.text.len()))]
    pub fn render(&self, context: &PromptContext) -> String {
        let mut rendered = String::with_capacity(self.text.len());
        let mut rest = self.text.as_str();

        while let Some((index, placeholder)) = next_placeholder(rest) {
            rendered.push_str(&rest[..index]);
            rendered.push_str(context.fragment(placeholder));
            rest = &rest[index + placeholder.token().len()..];
        }
        rendered.push_str(rest);

        debug!(prompt_len = rendered.len(), "Rendered prompt");
        rendered
    }
}

impl From<TemplatePreset> for PromptTemplate {
    fn from(preset: TemplatePreset) -> Self {
        Self::new(preset.text())
    }
}

fn next_placeholder(text: &str) -> Option<(usize, Placeholder)> {
    Placeholder::iter()
        .filter_map(|p| text.find(p.token()).map(|index| (index, p)))
        .min_by_key(|(index, _)| *index)
}
