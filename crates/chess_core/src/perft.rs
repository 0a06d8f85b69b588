use crate::board::Position;
use crate::movegen::legal_moves_into;

/// Counts leaf nodes of the legal-move tree to the given depth. Standard
/// movegen exerciser: any generation or make/unmake defect shows up as a
/// node-count mismatch.
pub fn perft(pos: &mut Position, depth: u8) -> u64 {
    if depth == 0 {
        return 1;
    }
    let mut moves = Vec::with_capacity(64);
    legal_moves_into(pos, &mut moves);
    if depth == 1 {
        return moves.len() as u64;
    }
    let mut nodes = 0;
    for mv in moves {
        pos.make_move(mv);
        nodes += perft(pos, depth - 1);
        pos.unmake_move();
    }
    nodes
}
