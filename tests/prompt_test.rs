//! Tests for prompt templates and substitution.

use std::str::FromStr;
use strictly_chess::{
    ChessBoard, MoveLabel, Placeholder, PromptContext, PromptTemplate, TemplatePreset,
    move_history, piece_listing,
};
use strum::IntoEnumIterator;

const ALL_TOKENS: [&str; 3] = ["!board_state!", "!legal_moves!", "!move_history!"];

fn board_after(moves: &[&str]) -> ChessBoard {
    let mut board = ChessBoard::new();
    for san in moves {
        board.play(&MoveLabel::from(*san)).expect("legal move");
    }
    board
}

#[test]
fn test_render_replaces_all_placeholders() {
    let board = board_after(&["e4", "e5", "Nf3"]);
    let template = PromptTemplate::new(
        "Board: !board_state!\nHistory:\n!move_history!\nLegal: !legal_moves!\nMove:",
    );
    let context = PromptContext::from_board(&board, &board.legal_moves());
    let prompt = template.render(&context);

    for token in ALL_TOKENS {
        assert!(!prompt.contains(token), "{} left in prompt", token);
    }
    assert!(prompt.contains(&piece_listing(&board)));
    assert!(prompt.contains(&move_history(&board)));
    assert!(prompt.contains("1. e4 e5\n2. Nf3"));
}

#[test]
fn test_render_is_not_recursive() {
    let template = PromptTemplate::new("A=!board_state! B=!legal_moves!");
    let context = PromptContext::new(
        "!legal_moves!".to_string(),
        "e4, d4".to_string(),
        String::new(),
    );
    assert_eq!(template.render(&context), "A=!legal_moves! B=e4, d4");
}

#[test]
fn test_render_order_independent() {
    let template = PromptTemplate::new("!move_history!|!legal_moves!|!board_state!");
    let context = PromptContext::new("B".to_string(), "L".to_string(), "H".to_string());
    assert_eq!(template.render(&context), "H|L|B");
}

#[test]
fn test_render_repeated_placeholder() {
    let template = PromptTemplate::new("!legal_moves! or again !legal_moves!");
    let context = PromptContext::new(String::new(), "a3, a4".to_string(), String::new());
    assert_eq!(template.render(&context), "a3, a4 or again a3, a4");
}

#[test]
fn test_render_without_placeholders_is_identity() {
    let template = PromptTemplate::new("Just play !something! good.");
    let context = PromptContext::new("x".to_string(), "y".to_string(), "z".to_string());
    assert_eq!(template.render(&context), "Just play !something! good.");
    assert!(template.placeholders().is_empty());
}

#[test]
fn test_placeholders_detected() {
    let template = PromptTemplate::from(TemplatePreset::Continuation);
    assert_eq!(template.placeholders(), vec![Placeholder::MoveHistory]);

    let template = PromptTemplate::from(TemplatePreset::Position);
    assert_eq!(template.placeholders().len(), 3);
}

#[test]
fn test_every_preset_renders_cleanly() {
    let board = board_after(&["d4"]);
    let context = PromptContext::from_board(&board, &board.legal_moves());
    for preset in TemplatePreset::iter() {
        let prompt = PromptTemplate::from(preset).render(&context);
        for token in ALL_TOKENS {
            assert!(!prompt.contains(token), "{} left in {} prompt", token, preset);
        }
    }
}

#[test]
fn test_transcript_preset_lists_legal_moves() {
    let board = ChessBoard::new();
    let legal = board.legal_moves();
    let prompt = PromptTemplate::from(TemplatePreset::Transcript)
        .render(&PromptContext::from_board(&board, &legal));
    assert!(prompt.contains(&format!(
        "The legal moves are {}",
        strictly_chess::legal_moves_text(&legal)
    )));
    assert!(prompt.ends_with("The best next move is:"));
}

#[test]
fn test_preset_names() {
    assert_eq!(
        TemplatePreset::from_str("rule-list").expect("known preset"),
        TemplatePreset::RuleList
    );
    assert_eq!(TemplatePreset::Grandmaster.to_string(), "grandmaster");
    assert!(TemplatePreset::from_str("verbose").is_err());
    assert_eq!(TemplatePreset::default(), TemplatePreset::Transcript);
}
