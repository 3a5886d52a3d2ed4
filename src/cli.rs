//! Command-line interface for strictly_chess.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use strictly_chess::{DEFAULT_MAX_MOVES, TemplatePreset};

/// Strictly Chess - chess played by text-completion models
#[derive(Parser, Debug)]
#[command(name = "strictly_chess")]
#[command(about = "Chess between prompt-driven language model players", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one game between two players
    Play {
        /// White player: agent config path, agent name, or "random"
        #[arg(long)]
        white: String,

        /// Black player: agent config path, agent name, or "random"
        #[arg(long)]
        black: String,

        /// Stop once more than this many moves have been played
        #[arg(long, default_value_t = DEFAULT_MAX_MOVES)]
        max_moves: u32,

        /// Starting position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,

        /// Directory of agent .toml configs for lookups by name
        #[arg(long)]
        agents_dir: Option<PathBuf>,
    },

    /// Render a prompt without calling any provider
    Prompt {
        /// Built-in template
        #[arg(short, long, default_value = "transcript")]
        template: TemplatePreset,

        /// Template file (overrides --template)
        #[arg(long)]
        template_file: Option<PathBuf>,

        /// Starting position (defaults to the standard start)
        #[arg(long)]
        fen: Option<String>,

        /// Space-separated moves to play before rendering
        #[arg(long, default_value = "")]
        moves: String,
    },

    /// List configured agents
    Agents {
        /// Directory of agent .toml configs
        #[arg(long)]
        agents_dir: Option<PathBuf>,
    },
}
