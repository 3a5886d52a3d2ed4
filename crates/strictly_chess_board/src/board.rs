//! Chess position with its move stack.

use crate::{BoardError, DrawReason, GameOutcome, MoveLabel, Placement, Side};
use shakmaty::fen::Fen;
use shakmaty::san::SanPlus;
use shakmaty::zobrist::{Zobrist64, ZobristHash};
use shakmaty::{CastlingMode, Chess, EnPassantMode, Move, Position, Square};
use tracing::{debug, instrument, warn};

/// Halfmoves without capture or pawn move that end the game outright.
const SEVENTY_FIVE_MOVE_HALFMOVES: u32 = 150;

/// Occurrences of one position that end the game outright.
const FIVEFOLD_REPETITIONS: usize = 5;

/// A chess game in progress.
///
/// Keeps the root position next to the current one so the full history can
/// be replayed and rendered without touching the live position. Every
/// position reached, root included, is hashed for repetition detection.
#[derive(Debug, Clone)]
pub struct ChessBoard {
    root: Chess,
    position: Chess,
    moves: Vec<Move>,
    hashes: Vec<Zobrist64>,
}

impl ChessBoard {
    /// Creates a board in the standard starting position.
    #[instrument]
    pub fn new() -> Self {
        Self::from_position(Chess::default())
    }

    /// Creates a board from a FEN string. History is replayed from here.
    #[instrument]
    pub fn from_fen(fen: &str) -> Result<Self, BoardError> {
        let fen: Fen = fen.parse()?;
        let position: Chess = fen
            .into_position(CastlingMode::Standard)
            .map_err(|e| BoardError::new(format!("Illegal position: {}", e)))?;
        debug!("Board created from FEN");
        Ok(Self::from_position(position))
    }

    fn from_position(position: Chess) -> Self {
        let hashes = vec![position_hash(&position)];
        Self {
            root: position.clone(),
            position,
            moves: Vec::new(),
            hashes,
        }
    }

    /// Side to move.
    #[instrument(skip(self))]
    pub fn turn(&self) -> Side {
        self.position.turn().into()
    }

    /// Side to move in the root position.
    #[instrument(skip(self))]
    pub fn root_turn(&self) -> Side {
        self.root.turn().into()
    }

    /// Fullmove number of the root position.
    #[instrument(skip(self))]
    pub fn root_fullmove(&self) -> u32 {
        self.root.fullmoves().get()
    }

    /// Number of moves played since the root position.
    #[instrument(skip(self))]
    pub fn ply_count(&self) -> usize {
        self.moves.len()
    }

    /// Labels of every legal move, in the rules engine's enumeration order.
    #[instrument(skip(self))]
    pub fn legal_moves(&self) -> Vec<MoveLabel> {
        self.position
            .legal_moves()
            .iter()
            .map(|m| label_for(&self.position, m))
            .collect()
    }

    /// Plays the legal move whose label equals `label`.
    ///
    /// # Errors
    ///
    /// Returns [`BoardError`] if no legal move has that exact label.
    #[instrument(skip(self), fields(label = %label))]
    pub fn play(&mut self, label: &MoveLabel) -> Result<(), BoardError> {
        let legal = self.position.legal_moves();
        let chosen = legal
            .iter()
            .find(|m| label_for(&self.position, m) == *label)
            .cloned()
            .ok_or_else(|| {
                warn!(label = %label, "Rejected move that is not legal here");
                BoardError::new(format!("Illegal move: {}", label))
            })?;

        self.position.play_unchecked(&chosen);
        self.moves.push(chosen);
        self.hashes.push(position_hash(&self.position));
        debug!(ply = self.moves.len(), "Move applied");
        Ok(())
    }

    /// Terminal outcome, or `None` while the game goes on.
    #[instrument(skip(self))]
    pub fn outcome(&self) -> Option<GameOutcome> {
        if self.position.is_checkmate() {
            let winner = Side::from(self.position.turn()).opponent();
            Some(GameOutcome::Decisive { winner })
        } else if self.position.is_stalemate() {
            Some(GameOutcome::Draw(DrawReason::Stalemate))
        } else if self.position.is_insufficient_material() {
            Some(GameOutcome::Draw(DrawReason::InsufficientMaterial))
        } else if self.position.halfmoves() >= SEVENTY_FIVE_MOVE_HALFMOVES {
            Some(GameOutcome::Draw(DrawReason::SeventyFiveMoves))
        } else if self.repetitions() >= FIVEFOLD_REPETITIONS {
            Some(GameOutcome::Draw(DrawReason::FivefoldRepetition))
        } else {
            None
        }
    }

    /// How often the current position has occurred, counting itself.
    #[instrument(skip(self))]
    pub fn repetitions(&self) -> usize {
        let current = self.hashes.last().copied();
        self.hashes.iter().filter(|h| Some(**h) == current).count()
    }

    /// Occupied squares from h8 down to a1.
    #[instrument(skip(self))]
    pub fn placements(&self) -> Vec<Placement> {
        let board = self.position.board();
        (0..64u32)
            .rev()
            .filter_map(|index| {
                board.piece_at(Square::new(index)).map(|piece| {
                    Placement::new(
                        piece.color.into(),
                        piece.char().to_ascii_uppercase(),
                        index as u8,
                    )
                })
            })
            .collect()
    }

    /// Labels of the moves played so far, oldest first.
    ///
    /// Each label is rendered against the position it was played from, by
    /// replaying a private copy of the root position.
    #[instrument(skip(self))]
    pub fn history_labels(&self) -> Vec<MoveLabel> {
        let mut replay = self.root.clone();
        self.moves
            .iter()
            .map(|m| {
                let label = label_for(&replay, m);
                replay.play_unchecked(m);
                label
            })
            .collect()
    }

    /// Current position as FEN.
    #[instrument(skip(self))]
    pub fn fen(&self) -> String {
        Fen::from_position(self.position.clone(), EnPassantMode::Legal).to_string()
    }
}

impl Default for ChessBoard {
    fn default() -> Self {
        Self::new()
    }
}

fn position_hash(position: &Chess) -> Zobrist64 {
    position.zobrist_hash(EnPassantMode::Legal)
}

fn label_for(position: &Chess, m: &Move) -> MoveLabel {
    MoveLabel::new(SanPlus::from_move(position.clone(), m).to_string())
}
