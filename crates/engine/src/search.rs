//! Minimax search with alpha-beta pruning.

use chess_core::{legal_moves_into, Move, Position};

use crate::eval::Evaluator;

/// Score of a lost position. Mate scores sit outside any evaluator's range,
/// so the search always prefers a concrete mate over material.
pub const NEG_INF: f32 = f32::NEG_INFINITY;
/// Score of a won position.
pub const POS_INF: f32 = f32::INFINITY;

/// Searches `depth` plies and returns the best move with its score, or `None`
/// when the side to move has no legal moves at all.
///
/// Score ties keep the first candidate, so the generator's deterministic
/// ordering carries through to the root. When every reply loses, the first
/// legal move is still returned rather than nothing.
pub fn pick_best_move(
    pos: &Position,
    depth: u8,
    evaluators: &[Box<dyn Evaluator>],
) -> Option<(Move, f32)> {
    let mut tmp = pos.clone();
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(&mut tmp, &mut moves);
    if moves.is_empty() {
        return None;
    }

    let mut best = moves[0];
    let mut best_score = NEG_INF;

    // Each root child gets the full window, so its score is exact and the
    // first-found tie-break is well defined.
    for mv in moves {
        tmp.make_move(mv);
        let score = alphabeta(
            &mut tmp,
            depth.saturating_sub(1),
            NEG_INF,
            POS_INF,
            false,
            evaluators,
        );
        tmp.unmake_move();

        if score > best_score {
            best_score = score;
            best = mv;
        }
    }

    Some((best, best_score))
}

/// Fail-hard alpha-beta. `maximizing` tracks whose turn the node belongs to
/// relative to the root mover; evaluators stay White-positive throughout.
fn alphabeta(
    pos: &mut Position,
    depth: u8,
    mut alpha: f32,
    mut beta: f32,
    maximizing: bool,
    evaluators: &[Box<dyn Evaluator>],
) -> f32 {
    if depth == 0 || pos.is_terminal() {
        if pos.is_checkmate() {
            return if maximizing { NEG_INF } else { POS_INF };
        }
        if pos.is_stalemate() {
            return 0.0;
        }
        return evaluators.iter().map(|e| e.evaluate(pos)).sum();
    }

    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);

    if maximizing {
        let mut best = NEG_INF;
        for mv in moves {
            pos.make_move(mv);
            let eval = alphabeta(pos, depth - 1, alpha, beta, false, evaluators);
            pos.unmake_move();
            best = best.max(eval);
            alpha = alpha.max(eval);
            if beta <= alpha {
                break;
            }
        }
        best
    } else {
        let mut best = POS_INF;
        for mv in moves {
            pos.make_move(mv);
            let eval = alphabeta(pos, depth - 1, alpha, beta, true, evaluators);
            pos.unmake_move();
            best = best.min(eval);
            beta = beta.min(eval);
            if beta <= alpha {
                break;
            }
        }
        best
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
