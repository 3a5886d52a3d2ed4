//! Resolution of free-form completion text into a legal move.
//!
//! Every legal label is searched for as a literal substring of the
//! completion, and the label whose first occurrence starts leftmost wins.
//! Equal start indices fall back to enumeration order. When nothing
//! matches, a legal move is drawn uniformly at random.
//!
//! A label that is a substring of a longer legal label (`d5` inside `Nxd5`)
//! can match where the model meant the longer move. That is a known
//! limitation of the heuristic and is only logged.

use derive_more::{Display, Error};
use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_chacha::ChaCha8Rng;
use strictly_chess_board::MoveLabel;
use tracing::{debug, instrument, warn};

/// Result of resolving one completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The completion named this legal move.
    Matched(MoveLabel),
    /// Nothing matched; this move was drawn at random.
    Fallback(MoveLabel),
}

impl Resolution {
    /// Selected move.
    pub fn label(&self) -> &MoveLabel {
        match self {
            Resolution::Matched(label) | Resolution::Fallback(label) => label,
        }
    }

    /// Consumes the resolution, returning the selected move.
    pub fn into_label(self) -> MoveLabel {
        match self {
            Resolution::Matched(label) | Resolution::Fallback(label) => label,
        }
    }

    /// `true` when the move was drawn at random.
    pub fn was_random_fallback(&self) -> bool {
        matches!(self, Resolution::Fallback(_))
    }
}

/// Picks exactly one legal move for a completion.
#[derive(Debug, Clone)]
pub struct MoveResolver {
    rng: ChaCha8Rng,
}

impl MoveResolver {
    /// Creates a resolver whose random fallbacks are reproducible.
    #[instrument]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Creates a resolver seeded from the operating system.
    #[instrument]
    pub fn from_entropy() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    /// Selects the legal move mentioned first in `completion`.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if `legal_moves` is empty.
    #[instrument(skip(self, completion, legal_moves), fields(legal_count = legal_moves.len()))]
    pub fn resolve(
        &mut self,
        completion: &str,
        legal_moves: &[MoveLabel],
    ) -> Result<Resolution, ResolveError> {
        if legal_moves.is_empty() {
            return Err(ResolveError::new(
                "Cannot resolve a move without legal moves".to_string(),
            ));
        }

        let leftmost = legal_moves
            .iter()
            .enumerate()
            .filter_map(|(order, label)| {
                completion
                    .find(label.as_str())
                    .map(|index| (index, order, label))
            })
            .min_by_key(|&(index, order, _)| (index, order));

        if let Some((index, _, label)) = leftmost {
            debug!(label = %label, index, "Completion names a legal move");
            if let Some(longer) = legal_moves
                .iter()
                .find(|other| *other != label && other.as_str().contains(label.as_str()))
            {
                debug!(
                    label = %label,
                    longer = %longer,
                    "Matched label is embedded in a longer legal move"
                );
            }
            return Ok(Resolution::Matched(label.clone()));
        }

        let resolution = self.fallback(legal_moves)?;
        warn!(label = %resolution.label(), "No legal move in completion, random move chosen");
        Ok(resolution)
    }

    /// Draws a legal move uniformly at random.
    ///
    /// # Errors
    ///
    /// Returns [`ResolveError`] if `legal_moves` is empty.
    #[instrument(skip(self, legal_moves), fields(legal_count = legal_moves.len()))]
    pub fn fallback(&mut self, legal_moves: &[MoveLabel]) -> Result<Resolution, ResolveError> {
        legal_moves
            .choose(&mut self.rng)
            .cloned()
            .map(Resolution::Fallback)
            .ok_or_else(|| ResolveError::new("Cannot choose from an empty move set".to_string()))
    }
}

impl Default for MoveResolver {
    fn default() -> Self {
        Self::from_entropy()
    }
}

/// Resolution error.
#[derive(Debug, Clone, Display, Error)]
#[display("Resolve error: {} at {}:{}", message, file, line)]
pub struct ResolveError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl ResolveError {
    /// Creates a new resolution error.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: String) -> Self {
        let loc = std::panic::Location::caller();
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}
