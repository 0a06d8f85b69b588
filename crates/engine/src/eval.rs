//! Position evaluation heuristics.
//!
//! Material and placement terms score from White's point of view: positive
//! favors White, negative favors Black, zero is balanced. The mobility term
//! inside `PstMobilityEvaluator` is the one exception, counting relative to
//! the side to move.

use chess_core::{legal_moves, Color, PieceKind, Position};

/// A single evaluation term. Terms are summed by the search, so each one
/// should stay roughly commensurate with the others in its stack.
pub trait Evaluator: Send + Sync {
    fn evaluate(&self, pos: &Position) -> f32;
}

/// Plain material count in pawn units: 1 / 3 / 3 / 5 / 9, king excluded.
/// Mostly useful as a cheap baseline and in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct MaterialEvaluator;

impl Evaluator for MaterialEvaluator {
    fn evaluate(&self, pos: &Position) -> f32 {
        let mut score = 0.0f32;
        for row in 0..8 {
            for col in 0..8 {
                if let Some(piece) = pos.piece_at(row, col) {
                    let value = match piece.kind {
                        PieceKind::Pawn => 1.0,
                        PieceKind::Knight | PieceKind::Bishop => 3.0,
                        PieceKind::Rook => 5.0,
                        PieceKind::Queen => 9.0,
                        PieceKind::King => 0.0,
                    };
                    score += if piece.color == Color::White {
                        value
                    } else {
                        -value
                    };
                }
            }
        }
        score
    }
}

/// Centipawn material plus piece-square tables, with a mobility bonus of 10
/// points per legal move the side to move has over its opponent. This is the
/// default stack the engine searches with.
#[derive(Debug, Clone, Copy, Default)]
pub struct PstMobilityEvaluator;

const PAWN_VALUE: i32 = 100;
const KNIGHT_VALUE: i32 = 320;
const BISHOP_VALUE: i32 = 330;
const ROOK_VALUE: i32 = 500;
const QUEEN_VALUE: i32 = 900;

const MOBILITY_WEIGHT: i32 = 10;

// Tables are written from White's side (row 0 is the enemy back rank).
// Black reads the same table mirrored vertically.
const PAWN_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [50, 50, 50, 50, 50, 50, 50, 50],
    [10, 10, 20, 30, 30, 20, 10, 10],
    [5, 5, 10, 25, 25, 10, 5, 5],
    [0, 0, 0, 20, 20, 0, 0, 0],
    [5, -5, -10, 0, 0, -10, -5, 5],
    [5, 10, 10, -20, -20, 10, 10, 5],
    [0, 0, 0, 0, 0, 0, 0, 0],
];

const KNIGHT_TABLE: [[i32; 8]; 8] = [
    [-50, -40, -30, -30, -30, -30, -40, -50],
    [-40, -20, 0, 0, 0, 0, -20, -40],
    [-30, 0, 10, 15, 15, 10, 0, -30],
    [-30, 5, 15, 20, 20, 15, 5, -30],
    [-30, 0, 15, 20, 20, 15, 0, -30],
    [-30, 5, 10, 15, 15, 10, 5, -30],
    [-40, -20, 0, 5, 5, 0, -20, -40],
    [-50, -40, -30, -30, -30, -30, -40, -50],
];

const BISHOP_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -10, -10, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 10, 10, 5, 0, -10],
    [-10, 5, 5, 10, 10, 5, 5, -10],
    [-10, 0, 10, 10, 10, 10, 0, -10],
    [-10, 10, 10, 10, 10, 10, 10, -10],
    [-10, 5, 0, 0, 0, 0, 5, -10],
    [-20, -10, -10, -10, -10, -10, -10, -20],
];

const ROOK_TABLE: [[i32; 8]; 8] = [
    [0, 0, 0, 0, 0, 0, 0, 0],
    [5, 10, 10, 10, 10, 10, 10, 5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [-5, 0, 0, 0, 0, 0, 0, -5],
    [0, 0, 0, 5, 5, 0, 0, 0],
];

const QUEEN_TABLE: [[i32; 8]; 8] = [
    [-20, -10, -10, -5, -5, -10, -10, -20],
    [-10, 0, 0, 0, 0, 0, 0, -10],
    [-10, 0, 5, 5, 5, 5, 0, -10],
    [-5, 0, 5, 5, 5, 5, 0, -5],
    [0, 0, 5, 5, 5, 5, 0, -5],
    [-10, 5, 5, 5, 5, 5, 0, -10],
    [-10, 0, 5, 0, 0, 0, 0, -10],
    [-20, -10, -10, -5, -5, -10, -10, -20],
];

const KING_TABLE: [[i32; 8]; 8] = [
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-30, -40, -40, -50, -50, -40, -40, -30],
    [-20, -30, -30, -40, -40, -30, -30, -20],
    [-10, -20, -20, -20, -20, -20, -20, -10],
    [20, 20, 0, 0, 0, 0, 20, 20],
    [20, 30, 10, 0, 0, 10, 30, 20],
];

impl Evaluator for PstMobilityEvaluator {
    fn evaluate(&self, pos: &Position) -> f32 {
        let mut score = 0i32;
        for row in 0..8u8 {
            for col in 0..8u8 {
                let piece = match pos.piece_at(row, col) {
                    Some(piece) => piece,
                    None => continue,
                };
                let (table, value) = match piece.kind {
                    PieceKind::Pawn => (&PAWN_TABLE, PAWN_VALUE),
                    PieceKind::Knight => (&KNIGHT_TABLE, KNIGHT_VALUE),
                    PieceKind::Bishop => (&BISHOP_TABLE, BISHOP_VALUE),
                    PieceKind::Rook => (&ROOK_TABLE, ROOK_VALUE),
                    PieceKind::Queen => (&QUEEN_TABLE, QUEEN_VALUE),
                    // King material stays off the scale, only placement counts.
                    PieceKind::King => (&KING_TABLE, 0),
                };
                match piece.color {
                    Color::White => score += value + table[row as usize][col as usize],
                    Color::Black => score -= value + table[7 - row as usize][col as usize],
                }
            }
        }

        // Mobility: weighted legal-move count of the side to move over its
        // opponent. The opponent's count comes from the same board with the
        // turn handed over.
        let to_move = legal_moves(pos).len() as i32;
        let mut handed_over = pos.clone();
        handed_over.side_to_move = handed_over.side_to_move.other();
        let waiting = legal_moves(&handed_over).len() as i32;
        score += MOBILITY_WEIGHT * (to_move - waiting);

        score as f32
    }
}
