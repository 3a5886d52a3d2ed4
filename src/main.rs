//! Strictly Chess - Unified CLI
//!
//! Plays chess between prompt-driven language model players.

#![warn(missing_docs)]

mod cli;

use anyhow::{Context, Result};
use clap::Parser;
use cli::{Cli, Command};
use std::path::{Path, PathBuf};
use strictly_chess::{
    AgentConfig, AgentLibrary, ChessBoard, Credentials, GameEvent, GameLoop, GameReport,
    MoveLabel, Player, PromptAgent, PromptContext, PromptTemplate, RandomPlayer, Side,
    TemplatePreset, move_history,
};
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    initialize_tracing();

    let cli = Cli::parse();

    match cli.command {
        Command::Play {
            white,
            black,
            max_moves,
            fen,
            agents_dir,
        } => run_play(white, black, max_moves, fen, agents_dir).await,
        Command::Prompt {
            template,
            template_file,
            fen,
            moves,
        } => run_prompt(template, template_file, fen, moves),
        Command::Agents { agents_dir } => run_agents(agents_dir),
    }
}

/// Play one game and print the result
#[instrument(skip_all, fields(white = %white, black = %black, max_moves = max_moves))]
async fn run_play(
    white: String,
    black: String,
    max_moves: u32,
    fen: Option<String>,
    agents_dir: Option<PathBuf>,
) -> Result<()> {
    let credentials = Credentials::from_env();
    let library = load_library(agents_dir);

    let white_player = build_player(&white, library.as_ref(), &credentials)?;
    let black_player = build_player(&black, library.as_ref(), &credentials)?;

    let board = starting_board(fen.as_deref())?;

    let (event_tx, mut event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(async move {
        while let Some(event) = event_rx.recv().await {
            print_event(&event);
        }
    });

    let mut game = GameLoop::new(white_player, black_player)
        .with_max_moves(max_moves)
        .with_events(event_tx);
    let report = game.run(board).await?;

    // Dropping the loop closes the channel so the printer can finish.
    drop(game);
    printer.await?;

    print_report(&white, &black, &report);
    Ok(())
}

/// Render a prompt for inspection
#[instrument(skip_all)]
fn run_prompt(
    template: TemplatePreset,
    template_file: Option<PathBuf>,
    fen: Option<String>,
    moves: String,
) -> Result<()> {
    let mut board = starting_board(fen.as_deref())?;
    for san in moves.split_whitespace() {
        board
            .play(&MoveLabel::from(san))
            .with_context(|| format!("Cannot play {}", san))?;
    }

    let template = match template_file {
        Some(path) => PromptTemplate::new(
            std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read {}", path.display()))?,
        ),
        None => PromptTemplate::from(template),
    };

    let context = PromptContext::from_board(&board, &board.legal_moves());
    println!("{}", template.render(&context));
    Ok(())
}

/// List agents in the library
#[instrument(skip_all)]
fn run_agents(agents_dir: Option<PathBuf>) -> Result<()> {
    let library = match agents_dir {
        Some(dir) => AgentLibrary::scan(dir)?,
        None => AgentLibrary::scan_default()?,
    };

    for agent in library.agents() {
        println!(
            "{:<24} {:<10} {:<28} template={}",
            agent.name(),
            agent.llm_provider(),
            agent.llm_model(),
            agent.template()
        );
    }
    Ok(())
}

fn load_library(agents_dir: Option<PathBuf>) -> Option<AgentLibrary> {
    let result = match agents_dir {
        Some(dir) => AgentLibrary::scan(dir),
        None => AgentLibrary::scan_default(),
    };

    match result {
        Ok(library) => Some(library),
        Err(e) => {
            warn!(error = %e, "No agent library available, only config paths can be used");
            None
        }
    }
}

/// Resolves a player argument: "random", a config file, or a library name
#[instrument(skip(library, credentials))]
fn build_player(
    spec: &str,
    library: Option<&AgentLibrary>,
    credentials: &Credentials,
) -> Result<Box<dyn Player>> {
    if spec.eq_ignore_ascii_case("random") {
        info!("Using random player");
        return Ok(Box::new(RandomPlayer::new("Random")));
    }

    let config = if Path::new(spec).is_file() {
        AgentConfig::from_file(spec)?
    } else {
        library
            .and_then(|lib| lib.get_by_name(spec))
            .cloned()
            .with_context(|| format!("No agent config file or library agent named {}", spec))?
    };

    Ok(Box::new(PromptAgent::from_config(&config, credentials)?))
}

fn starting_board(fen: Option<&str>) -> Result<ChessBoard> {
    Ok(match fen {
        Some(fen) => ChessBoard::from_fen(fen)?,
        None => ChessBoard::new(),
    })
}

fn print_event(event: &GameEvent) {
    match event {
        GameEvent::MoveMade {
            side,
            player,
            label,
            random_fallback,
            ply,
        } => {
            let marker = if *random_fallback { " (random)" } else { "" };
            println!("{:>3}. {:<5} {:<8} {}{}", ply, side, label, player, marker);
        }
        GameEvent::GameOver { termination } => {
            println!("Game over: {}", termination);
        }
    }
}

fn print_report(white: &str, black: &str, report: &GameReport) {
    println!();
    println!("Moves played: {}", report.moves_played());
    for (side, name) in [(Side::White, white), (Side::Black, black)] {
        let tally = report.statistics().for_side(side);
        println!(
            "{} ({}): {} named by completion, {} random",
            side,
            name,
            tally.matched(),
            tally.random_fallback()
        );
    }
    println!();
    println!("{}", move_history(report.board()));
    println!();
    println!("Final position: {}", report.board().fen());
}

fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,strictly_chess=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}
