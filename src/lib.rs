//! Strictly Chess library - chess played by text-completion models
//!
//! Each turn a player renders the position into a prompt, asks a
//! text-generation provider for a completion, and resolves the free-form
//! answer into a guaranteed-legal move.
//!
//! # Architecture
//!
//! - **Prompt**: templates with `!board_state!`, `!legal_moves!` and
//!   `!move_history!` placeholders, filled from the board
//! - **LLM client**: one call contract over OpenAI, GooseAI, Anthropic and Cohere
//! - **Resolver**: leftmost legal move named in the completion, random fallback
//! - **Players**: prompt agents and a random baseline
//! - **Game loop**: alternates two players until an outcome or the move cap
//!
//! # Example
//!
//! ```
//! use strictly_chess::{MoveLabel, MoveResolver};
//!
//! let legal = vec![MoveLabel::from("Nf3"), MoveLabel::from("Bxc6+"), MoveLabel::from("g4")];
//! let mut resolver = MoveResolver::new(7);
//! let resolution = resolver
//!     .resolve("I think g4 is fine but Nf3 also works", &legal)
//!     .unwrap();
//! assert_eq!(resolution.label().as_str(), "g4");
//! assert!(!resolution.was_random_fallback());
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod agent_config;
mod agent_library;
mod error;
mod game;
mod llm_client;
mod players;
mod prompt;
mod resolver;
mod templates;

// Crate-level exports - Configuration
pub use agent_config::{AgentConfig, ConfigError};
pub use agent_library::AgentLibrary;

// Crate-level exports - Errors
pub use error::GameError;

// Crate-level exports - Game loop
pub use game::{
    DEFAULT_MAX_MOVES, GameEvent, GameLoop, GameReport, GameStatistics, MoveTally, Termination,
};

// Crate-level exports - LLM client
pub use llm_client::{
    CompletionProvider, CompletionRequest, Credentials, GenerationParams, LlmClient, LlmConfig,
    LlmError, LlmProvider,
};

// Crate-level exports - Players
pub use players::{Player, PromptAgent, RandomPlayer};

// Crate-level exports - Prompts
pub use prompt::{Placeholder, PromptContext, PromptTemplate};
pub use templates::TemplatePreset;

// Crate-level exports - Resolution
pub use resolver::{MoveResolver, Resolution, ResolveError};

// Crate-level exports - Board types
pub use strictly_chess_board::{
    BoardError, ChessBoard, DrawReason, GameOutcome, MoveLabel, Placement, Side,
    legal_moves_text, move_history, piece_listing,
};
