//! Tests for the chess board adapter.

use strictly_chess_board::{ChessBoard, DrawReason, GameOutcome, MoveLabel, Side};

fn play_all(board: &mut ChessBoard, moves: &[&str]) {
    for san in moves {
        board
            .play(&MoveLabel::from(*san))
            .unwrap_or_else(|e| panic!("{} should be legal: {}", san, e));
    }
}

#[test]
fn test_start_position_has_twenty_moves() {
    let board = ChessBoard::new();
    let legal = board.legal_moves();
    assert_eq!(legal.len(), 20);
    assert!(legal.contains(&MoveLabel::from("e4")));
    assert!(legal.contains(&MoveLabel::from("Nf3")));
    assert_eq!(board.turn(), Side::White);
}

#[test]
fn test_legal_move_order_is_stable() {
    let board = ChessBoard::new();
    assert_eq!(board.legal_moves(), board.legal_moves());
}

#[test]
fn test_play_advances_turn_and_history() {
    let mut board = ChessBoard::new();
    play_all(&mut board, &["e4", "e5"]);
    assert_eq!(board.ply_count(), 2);
    assert_eq!(board.turn(), Side::White);
    assert_eq!(
        board.history_labels(),
        vec![MoveLabel::from("e4"), MoveLabel::from("e5")]
    );
}

#[test]
fn test_illegal_move_rejected_without_change() {
    let mut board = ChessBoard::new();
    let result = board.play(&MoveLabel::from("e5"));
    assert!(result.is_err());
    assert_eq!(board.ply_count(), 0);
    assert_eq!(board.turn(), Side::White);
}

#[test]
fn test_label_must_match_exactly() {
    let mut board = ChessBoard::new();
    play_all(&mut board, &["f3", "e5", "g4"]);
    // The mating move is labelled with its suffix.
    assert!(board.play(&MoveLabel::from("Qh4")).is_err());
    assert!(board.play(&MoveLabel::from("Qh4#")).is_ok());
}

#[test]
fn test_fools_mate_outcome() {
    let mut board = ChessBoard::new();
    play_all(&mut board, &["f3", "e5", "g4"]);
    assert_eq!(board.outcome(), None);
    assert!(board.legal_moves().contains(&MoveLabel::from("Qh4#")));

    play_all(&mut board, &["Qh4#"]);
    assert_eq!(
        board.outcome(),
        Some(GameOutcome::Decisive {
            winner: Side::Black
        })
    );
    assert!(board.legal_moves().is_empty());
}

#[test]
fn test_check_suffix_in_labels() {
    let mut board = ChessBoard::new();
    play_all(&mut board, &["e4", "f6", "d4", "g5"]);
    assert!(board.legal_moves().contains(&MoveLabel::from("Qh5#")));
    play_all(&mut board, &["Qh5#"]);
    assert_eq!(board.outcome().and_then(|o| o.winner()), Some(Side::White));
}

#[test]
fn test_stalemate_outcome() {
    let board = ChessBoard::from_fen("7k/5Q2/6K1/8/8/8/8/8 b - - 0 1").expect("valid FEN");
    assert_eq!(board.outcome(), Some(GameOutcome::Draw(DrawReason::Stalemate)));
}

#[test]
fn test_insufficient_material_outcome() {
    let board = ChessBoard::from_fen("8/8/8/4k3/8/8/8/4K3 w - - 0 1").expect("valid FEN");
    assert_eq!(
        board.outcome(),
        Some(GameOutcome::Draw(DrawReason::InsufficientMaterial))
    );
}

const KNIGHT_SHUFFLE: [&str; 4] = ["Nf3", "Nf6", "Ng1", "Ng8"];

#[test]
fn test_fivefold_repetition_outcome() {
    let mut board = ChessBoard::new();
    for _ in 0..3 {
        play_all(&mut board, &KNIGHT_SHUFFLE);
    }
    // Start position seen four times: still playable.
    assert_eq!(board.repetitions(), 4);
    assert_eq!(board.outcome(), None);

    play_all(&mut board, &KNIGHT_SHUFFLE[..3]);
    assert_eq!(board.outcome(), None);

    play_all(&mut board, &KNIGHT_SHUFFLE[3..]);
    assert_eq!(board.ply_count(), 16);
    assert_eq!(board.repetitions(), 5);
    assert_eq!(
        board.outcome(),
        Some(GameOutcome::Draw(DrawReason::FivefoldRepetition))
    );
}

#[test]
fn test_repetition_counts_only_identical_positions() {
    let mut board = ChessBoard::new();
    assert_eq!(board.repetitions(), 1);
    play_all(&mut board, &["Nf3", "Nf6", "Ng1"]);
    // White is home again but the black knight is still out.
    assert_eq!(board.repetitions(), 1);
    play_all(&mut board, &["Ng8"]);
    assert_eq!(board.repetitions(), 2);
}

#[test]
fn test_invalid_fen_rejected() {
    assert!(ChessBoard::from_fen("not a fen").is_err());
}

#[test]
fn test_history_replay_leaves_board_untouched() {
    let mut board = ChessBoard::new();
    play_all(&mut board, &["d4", "d5", "c4"]);
    let fen_before = board.fen();
    let _ = board.history_labels();
    assert_eq!(board.fen(), fen_before);
    assert_eq!(board.turn(), Side::Black);
}

#[test]
fn test_placements_descend_from_h8() {
    let board = ChessBoard::new();
    let placements = board.placements();
    assert_eq!(placements.len(), 32);
    assert_eq!(*placements[0].square(), 63);
    assert_eq!(*placements[0].letter(), 'R');
    assert_eq!(*placements[0].side(), Side::Black);
    assert_eq!(*placements[31].square(), 0);
    assert_eq!(*placements[31].side(), Side::White);
}

#[test]
fn test_result_tags() {
    assert_eq!(
        GameOutcome::Decisive {
            winner: Side::White
        }
        .result_tag(),
        "1-0"
    );
    assert_eq!(GameOutcome::Draw(DrawReason::Stalemate).result_tag(), "1/2-1/2");
}
