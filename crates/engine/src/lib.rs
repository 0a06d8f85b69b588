//! Alpha-beta chess engine with a pluggable evaluation stack.

mod eval;
mod search;

use chess_core::{Move, Position};

pub use eval::{Evaluator, MaterialEvaluator, PstMobilityEvaluator};
pub use search::{pick_best_move, NEG_INF, POS_INF};

/// Search driver bound to a fixed stack of evaluation terms. The terms are
/// summed at every leaf, so a custom stack tunes the engine without touching
/// the search.
pub struct Engine {
    evaluators: Vec<Box<dyn Evaluator>>,
}

impl Engine {
    /// The default stack: piece-square tables with a mobility term.
    pub fn new() -> Self {
        Self {
            evaluators: vec![Box::new(PstMobilityEvaluator)],
        }
    }

    pub fn with_evaluators(evaluators: Vec<Box<dyn Evaluator>>) -> Self {
        Self { evaluators }
    }

    /// Best move for the side to move, or `None` when the game is over.
    pub fn best_move(&self, pos: &Position, depth: u8) -> Option<(Move, f32)> {
        search::pick_best_move(pos, depth, &self.evaluators)
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}
