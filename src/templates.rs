//! Built-in prompt templates.

use serde::{Deserialize, Serialize};

/// Named prompt template shipped with the crate.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Default,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
    strum::EnumIter,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum TemplatePreset {
    /// Annotated grandmaster game transcript ending in "The best next move is:".
    #[default]
    Transcript,
    /// Bare transcript continuation.
    Continuation,
    /// Role-play instructions with selection heuristics.
    Grandmaster,
    /// Prioritised rule list with worked examples.
    RuleList,
    /// Piece placement, history and legal moves.
    Position,
}

impl TemplatePreset {
    /// Template text with placeholders.
    pub fn text(self) -> &'static str {
        match self {
            TemplatePreset::Transcript => TRANSCRIPT,
            TemplatePreset::Continuation => CONTINUATION,
            TemplatePreset::Grandmaster => GRANDMASTER,
            TemplatePreset::RuleList => RULE_LIST,
            TemplatePreset::Position => POSITION,
        }
    }
}

const TRANSCRIPT: &str = "Carlsen vs. Nakamura, Helsinki, 2023
Analyzed by Stockfish
Game Transcript So Far: !move_history!
Stockfish's Analysis:
The legal moves are !legal_moves!
The best next move is:";

const CONTINUATION: &str = "Carlsen vs. Nakamura, Helsinki, 2023
!move_history!";

const GRANDMASTER: &str = "INSTRUCTIONS
You are Magnus Carlsen, chess grandmaster. \
You will be presented with the set of legal moves and the game history so far. \
Choose the best move from the set of legal moves provided. \
Repeat, your move must always be in the set of legal moves.
- Whenever possible, prefer moves that capture a piece, and moves that deliver check. \
In other words, if the set of legal moves contains one or more moves with x or +, choose one of those.
- Prioritize pawn moves (moves that do not begin with N, K, Q, B, or R).
- Do NOT select any move that is in the last 4 moves of MOVE_HISTORY! \
Repeat, do not select any move that you have played recently. For instance, if Nf7 is in \
MOVE_HISTORY, and the set of legal_moves is [Nf7, Rh2, g3, g4], do not select Nf7. \
Instead, you should select g3 or g4 because it is a pawn move.
- Prioritize moving a different piece than the last piece you moved. For example, if the last \
move in MOVE_HISTORY was Bf4, your next move should not begin with B.
The *most important rule*: ALWAYS ALWAYS select any move with the # symbol. \
# denotes checkmate which is your goal!
Examples:
1. If the set of legal moves is [Nf3, Bxc6+, g3, g4], you might suggest Bxc6+ \
because Bxc6+ contains an x (it is a capture) and a + (it is a check).
2. If MOVE_HISTORY contains '22. Nd6+ Kc7
23. Nc8 Kb7', you would NOT select Nd6+ because it exists in MOVE_HISTORY.
3. If the set of legal moves is [Qg8, Qxf2, Qg7#], you should select Qg7# because it has a #
LEGAL_MOVES: !legal_moves!
MOVE_HISTORY: !move_history!
SELECTED_MOVE:";

const RULE_LIST: &str = "
You will be given a list of legal chess moves, LEGAL_MOVES. Pick one of them. Rules, in order of decreasing priority:
1. CHECKMATE. If one or more moves contains #, select a move that contains a #.
2. CAPTURE. If one or more moves contains x, select a move that contains x.
3. PROMOTION. If one or more moves contains =, select the move that contains =.
4. PAWN MOVE. Select a move that does not contain capital letters.
5. RANDOM MOVE. Select any move from the list.
Go through the list of rules in order, stating whether the rule applies. If a rule does apply, use it to select your move.

Example 1:
LEGAL_MOVES: Nf7, Rh2, g3, g4, Qxg8, Qg4#, Qc6, Qd6, Rb3, Rb2, Rb1
RESPONSE:
Rule CHECKMATE applies. Qg4# contains a #.
SELECTED MOVE: Qg4#

Example 2:
LEGAL_MOVES: Nf7, Rh2, g3, g4, Qxg8, Qc6, Qd6, Rb3, Rb2, Rb1
RESPONSE:
Rule CHECKMATE: No.
Rule CAPTURE applies. Qxg8 contains x.
SELECTED MOVE: Qxg8

Example 3:
LEGAL_MOVES: Nf7+, Rh2, g3, g4, Qc6, Qd6, Rb3, Rb2, Rb1
Rule CHECKMATE: No.
Rule CAPTURE: No.
Rule PROMOTION: No.
Rule PAWN MOVE applies. g3 does not contain a capital letter.
SELECTED MOVE: g3.

Example 4:
LEGAL_MOVES: Ne7+, Na7, Nd6, Nb6, Bh8, Bg7, b8=Q, Bf6, Ba1, Kh3, Kh1, Kg1, Rf2, Re2, Rd2, Rc2, Rb2, Ra2, Rg1
Rule CHECKMATE: No.
Rule CAPTURE: No.
Rule PROMOTION applies. b8=Q contains =.
SELECTED MOVE: b8=Q

Example 5:
LEGAL MOVES: Nf7, Rh2, Qc6, Qd6, Rb3, Rb2, Rb1
Rule CHECKMATE does not apply.
Rule CAPTURE does not apply.
Rule PROMOTION does not apply
Rule PAWN MOVE does not apply.
Rule RANDOM MOVE applies.
Selected move: Nf7.

Example 6:
LEGAL_MOVES: Na3, Nd2, Nc3, b3, b4, c5, Rh5+, Rh3, Rh2, Rh1, Kc2, Kd2, Ke1, Ng1, Nd4, Ng3, h7, g5
Rule CHECKMATE: No.
Rule CAPTURE: No.
Rule PROMOTION: No.
Rule PAWN MOVE applies. h7 does not contain a capital letter.
SELECTED MOVE: h7.

Example 7:
LEGAL MOVES: Na3, Nc3, Ra2, Ra3, Ra4, Bb2, Ba3, Bd2, Be3, Kd2, Ke2, Kf1, Kf2, exd5, fxe5, Rh2, Rh3
Rule CHECKMATE: No.
Rule CAPTURE applies. exd5 contains x.
SELECTED MOVE: exd5

LEGAL MOVES: !legal_moves!
RESPONSE:
";

const POSITION: &str = "You are playing a game of chess.
Pieces on the board: !board_state!
Moves so far:
!move_history!
Legal moves: !legal_moves!
Reply with exactly one move from the legal moves.
Move:";
