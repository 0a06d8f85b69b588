use crate::board::Position;
use crate::moves::{Move, Promotion};
use crate::types::*;

/// All legal moves for the side to move, in deterministic board-scan order
/// (row 0→7, column 0→7, fixed per-piece pattern order). The search relies on
/// this ordering for tie-breaking, so it must not change.
///
/// Clones the position once and probes candidates on the copy.
pub fn legal_moves(pos: &Position) -> Vec<Move> {
    let mut tmp = pos.clone();
    let mut out = Vec::with_capacity(64);
    collect_legal_moves(&mut tmp, &mut out);
    out
}

/// Generates into the provided buffer, reusing it across calls.
pub fn legal_moves_into(pos: &mut Position, out: &mut Vec<Move>) {
    collect_legal_moves(pos, out);
}

/// Make/check/unmake probe: would the mover's own king be attacked?
pub(crate) fn probe_legal(pos: &mut Position, mv: Move) -> bool {
    let mover = pos.side_to_move;
    pos.make_move(mv);
    let legal = !pos.in_check(mover);
    pos.unmake_move();
    legal
}

fn collect_legal_moves(pos: &mut Position, out: &mut Vec<Move>) {
    out.clear();
    for row in 0..8u8 {
        for col in 0..8u8 {
            let piece = match pos.piece_at(row, col) {
                Some(piece) => piece,
                None => continue,
            };
            if piece.color != pos.side_to_move {
                continue;
            }
            match piece.kind {
                PieceKind::Pawn => gen_pawn(pos, row, col, out),
                PieceKind::Knight => gen_knight(pos, row, col, out),
                PieceKind::Bishop => {
                    gen_slider(pos, row, col, &[(-1, -1), (-1, 1), (1, -1), (1, 1)], out)
                }
                PieceKind::Rook => {
                    gen_slider(pos, row, col, &[(-1, 0), (0, -1), (1, 0), (0, 1)], out)
                }
                PieceKind::Queen => gen_slider(
                    pos,
                    row,
                    col,
                    &[
                        (-1, -1),
                        (-1, 0),
                        (-1, 1),
                        (0, -1),
                        (0, 1),
                        (1, -1),
                        (1, 0),
                        (1, 1),
                    ],
                    out,
                ),
                PieceKind::King => {
                    gen_king(pos, row, col, out);
                    gen_castle(pos, row, col, out);
                }
            }
        }
    }
}

fn push_if_legal(pos: &mut Position, mv: Move, out: &mut Vec<Move>) {
    if probe_legal(pos, mv) {
        out.push(mv);
    }
}

/// Pawn moves in fixed order: single push, double push, captures toward
/// column -1 then +1, en passant. A push or capture onto the last rank fans
/// out into four promotion candidates (Q, R, N, B), each probed separately.
fn gen_pawn(pos: &mut Position, row: u8, col: u8, out: &mut Vec<Move>) {
    let (r, c) = (row as i8, col as i8);
    let white = pos.side_to_move == Color::White;
    let dir: i8 = if white { -1 } else { 1 };
    let start_row: i8 = if white { 6 } else { 1 };

    let push_pawn_move = |pos: &mut Position, to: (u8, u8), out: &mut Vec<Move>| {
        if to.0 == 0 || to.0 == 7 {
            for digit in 0..4 {
                let promotion = Promotion::from_digit(digit).unwrap_or_default();
                push_if_legal(
                    pos,
                    Move::promoting(row, col, to.0, to.1, promotion),
                    out,
                );
            }
        } else {
            push_if_legal(pos, Move::new(row, col, to.0, to.1), out);
        }
    };

    // Forward one
    if let Some(to) = square(r + dir, c) {
        if pos.piece_at(to.0, to.1).is_none() {
            push_pawn_move(pos, to, out);
        }
    }

    // Double step from the start row, both squares empty
    if r == start_row {
        let one = square(r + dir, c);
        let two = square(r + 2 * dir, c);
        if let (Some(one), Some(two)) = (one, two) {
            if pos.piece_at(one.0, one.1).is_none() && pos.piece_at(two.0, two.1).is_none() {
                push_if_legal(pos, Move::new(row, col, two.0, two.1), out);
            }
        }
    }

    // Captures
    for dc in [-1, 1] {
        if let Some(to) = square(r + dir, c + dc) {
            if let Some(target) = pos.piece_at(to.0, to.1) {
                if target.color != pos.side_to_move {
                    push_pawn_move(pos, to, out);
                }
            }
        }
    }

    // En passant: the target square is set for exactly one ply after an
    // opponent double step, diagonally adjacent to this pawn.
    if let Some((ep_row, ep_col)) = pos.en_passant {
        if ep_row as i8 == r + dir && (ep_col as i8 - c).abs() == 1 {
            push_if_legal(pos, Move::new(row, col, ep_row, ep_col), out);
        }
    }
}

fn gen_knight(pos: &mut Position, row: u8, col: u8, out: &mut Vec<Move>) {
    let (r, c) = (row as i8, col as i8);
    let offsets = [
        (-2, -1),
        (-2, 1),
        (2, -1),
        (2, 1),
        (-1, -2),
        (-1, 2),
        (1, -2),
        (1, 2),
    ];
    for (dr, dc) in offsets {
        if let Some(to) = square(r + dr, c + dc) {
            match pos.piece_at(to.0, to.1) {
                Some(target) if target.color == pos.side_to_move => {}
                _ => push_if_legal(pos, Move::new(row, col, to.0, to.1), out),
            }
        }
    }
}

/// Ray-walking generation shared by bishop, rook and queen: each ray stops at
/// the first occupied square, which is included only as a capture.
fn gen_slider(pos: &mut Position, row: u8, col: u8, dirs: &[(i8, i8)], out: &mut Vec<Move>) {
    let side = pos.side_to_move;
    for &(dr, dc) in dirs {
        let (mut r, mut c) = (row as i8 + dr, col as i8 + dc);
        while let Some(to) = square(r, c) {
            let occupant = pos.piece_at(to.0, to.1);
            if let Some(target) = occupant {
                if target.color != side {
                    push_if_legal(pos, Move::new(row, col, to.0, to.1), out);
                }
                break;
            }
            push_if_legal(pos, Move::new(row, col, to.0, to.1), out);
            r += dr;
            c += dc;
        }
    }
}

fn gen_king(pos: &mut Position, row: u8, col: u8, out: &mut Vec<Move>) {
    let (r, c) = (row as i8, col as i8);
    for dr in -1..=1 {
        for dc in -1..=1 {
            if dr == 0 && dc == 0 {
                continue;
            }
            if let Some(to) = square(r + dr, c + dc) {
                match pos.piece_at(to.0, to.1) {
                    Some(target) if target.color == pos.side_to_move => {}
                    _ => push_if_legal(pos, Move::new(row, col, to.0, to.1), out),
                }
            }
        }
    }
}

/// Castling: king and the relevant rook unmoved, rook physically on its home
/// square, intermediate squares empty, and none of the king's start, transit
/// or destination squares attacked. Kingside first, then queenside.
fn gen_castle(pos: &mut Position, row: u8, col: u8, out: &mut Vec<Move>) {
    let side = pos.side_to_move;
    let (home, king_moved, rook_a_moved, rook_b_moved) = match side {
        Color::White => (
            7u8,
            pos.castling.white_king_moved,
            pos.castling.white_rook_a_moved,
            pos.castling.white_rook_b_moved,
        ),
        Color::Black => (
            0u8,
            pos.castling.black_king_moved,
            pos.castling.black_rook_a_moved,
            pos.castling.black_rook_b_moved,
        ),
    };
    if king_moved || (row, col) != (home, 4) {
        return;
    }
    let enemy = side.other();
    let rook = Piece {
        color: side,
        kind: PieceKind::Rook,
    };

    // King side: columns 5 and 6 empty, rook on 7, squares e/f/g safe.
    if !rook_b_moved
        && pos.piece_at(home, 5).is_none()
        && pos.piece_at(home, 6).is_none()
        && pos.piece_at(home, 7) == Some(rook)
        && !pos.is_square_attacked(home, 4, enemy)
        && !pos.is_square_attacked(home, 5, enemy)
        && !pos.is_square_attacked(home, 6, enemy)
    {
        push_if_legal(pos, Move::new(home, 4, home, 6), out);
    }

    // Queen side: columns 1..=3 empty, rook on 0, squares e/d/c safe.
    if !rook_a_moved
        && pos.piece_at(home, 1).is_none()
        && pos.piece_at(home, 2).is_none()
        && pos.piece_at(home, 3).is_none()
        && pos.piece_at(home, 0) == Some(rook)
        && !pos.is_square_attacked(home, 4, enemy)
        && !pos.is_square_attacked(home, 3, enemy)
        && !pos.is_square_attacked(home, 2, enemy)
    {
        push_if_legal(pos, Move::new(home, 4, home, 2), out);
    }
}

#[cfg(test)]
#[path = "movegen_tests.rs"]
mod movegen_tests;
