use std::fmt;

use thiserror::Error;

use crate::moves::Move;
use crate::types::*;

/// The 71-character starting position: board in row-major order, White to
/// move, no king or rook has moved.
pub const START_ENCODING: &str =
    "rnbqkbnrpppppppp00000000000000000000000000000000PPPPPPPPRNBQKBNR1000000";

#[derive(Debug, Error, PartialEq, Eq)]
pub enum EncodingError {
    #[error("encoding must be exactly 71 characters, got {0}")]
    BadLength(usize),
    #[error("invalid piece code {code:?} at board cell {index}")]
    BadPieceCode { index: usize, code: char },
    #[error("invalid flag character {code:?} at position {index}")]
    BadFlag { index: usize, code: char },
}

/// Moved-flags for both kings and all four original-square rooks.
/// Rook A is the column-0 (queenside) rook, rook B the column-7 (kingside)
/// rook, matching flag characters 67..=70 of the encoding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CastlingFlags {
    pub white_king_moved: bool,
    pub black_king_moved: bool,
    pub white_rook_a_moved: bool,
    pub white_rook_b_moved: bool,
    pub black_rook_a_moved: bool,
    pub black_rook_b_moved: bool,
}

/// Everything needed to make `unmake_move` an exact inverse of `make_move`,
/// including pre-move snapshots of the castling flags and en-passant target.
#[derive(Clone, Copy, Debug)]
pub(crate) struct MoveRecord {
    pub from: (u8, u8),
    pub to: (u8, u8),
    pub moved: Piece,
    pub captured: Option<Piece>,
    /// Rook (from, to) when the move was a castle.
    pub castle_rook: Option<((u8, u8), (u8, u8))>,
    /// Square of the pawn removed by an en-passant capture.
    pub ep_captured: Option<(u8, u8)>,
    pub prev_castling: CastlingFlags,
    pub prev_en_passant: Option<(u8, u8)>,
}

/// Mutable board state driven through a make/unmake stack discipline.
///
/// A `Position` is built once from an encoding, mutated in place for the
/// duration of a search and then dropped; it is never shared between
/// concurrent searches. `make_move` applies moves unconditionally — callers
/// must establish legality first (see `legal_moves` / `is_legal_move`).
#[derive(Clone, Debug)]
pub struct Position {
    board: [[Option<Piece>; 8]; 8],
    pub side_to_move: Color,
    pub castling: CastlingFlags,
    /// Square a pawn may capture onto immediately after an opponent's double
    /// step. Cleared on every other move. Not part of the encoding: see
    /// `to_encoding`.
    pub en_passant: Option<(u8, u8)>,
    history: Vec<MoveRecord>,
}

impl Position {
    /// Parses the 71-character encoding: 64 board cells in row-major order
    /// (row 0 = rank 8), then side-to-move and the six moved-flags.
    pub fn from_encoding(encoding: &str) -> Result<Position, EncodingError> {
        let chars: Vec<char> = encoding.chars().collect();
        if chars.len() != 71 {
            return Err(EncodingError::BadLength(chars.len()));
        }

        let mut board = [[None; 8]; 8];
        for (index, &code) in chars.iter().take(64).enumerate() {
            board[index / 8][index % 8] = match code {
                '0' => None,
                _ => Some(
                    Piece::from_code(code).ok_or(EncodingError::BadPieceCode { index, code })?,
                ),
            };
        }

        let mut flags = [false; 7];
        for (index, &code) in chars.iter().enumerate().skip(64) {
            flags[index - 64] = match code {
                '0' => false,
                '1' => true,
                _ => return Err(EncodingError::BadFlag { index, code }),
            };
        }

        Ok(Position {
            board,
            side_to_move: if flags[0] { Color::White } else { Color::Black },
            castling: CastlingFlags {
                white_king_moved: flags[1],
                black_king_moved: flags[2],
                white_rook_a_moved: flags[3],
                white_rook_b_moved: flags[4],
                black_rook_a_moved: flags[5],
                black_rook_b_moved: flags[6],
            },
            en_passant: None,
            history: Vec::new(),
        })
    }

    pub fn startpos() -> Position {
        let mut board = [[None; 8]; 8];
        let back = [
            PieceKind::Rook,
            PieceKind::Knight,
            PieceKind::Bishop,
            PieceKind::Queen,
            PieceKind::King,
            PieceKind::Bishop,
            PieceKind::Knight,
            PieceKind::Rook,
        ];
        for (col, &kind) in back.iter().enumerate() {
            board[0][col] = Some(Piece {
                color: Color::Black,
                kind,
            });
            board[7][col] = Some(Piece {
                color: Color::White,
                kind,
            });
        }
        for col in 0..8 {
            board[1][col] = Some(Piece {
                color: Color::Black,
                kind: PieceKind::Pawn,
            });
            board[6][col] = Some(Piece {
                color: Color::White,
                kind: PieceKind::Pawn,
            });
        }
        Position {
            board,
            side_to_move: Color::White,
            castling: CastlingFlags::default(),
            en_passant: None,
            history: Vec::new(),
        }
    }

    /// Inverse of `from_encoding` over the live flags. The en-passant target
    /// has no slot in the 71-character form, so two positions differing only
    /// in en-passant availability serialize identically. Kept as-is because
    /// the persisted cache is keyed on this encoding.
    pub fn to_encoding(&self) -> String {
        let mut out = String::with_capacity(71);
        for row in 0..8 {
            for col in 0..8 {
                out.push(match self.board[row][col] {
                    Some(piece) => piece.code(),
                    None => '0',
                });
            }
        }
        let flags = [
            self.side_to_move == Color::White,
            self.castling.white_king_moved,
            self.castling.black_king_moved,
            self.castling.white_rook_a_moved,
            self.castling.white_rook_b_moved,
            self.castling.black_rook_a_moved,
            self.castling.black_rook_b_moved,
        ];
        for flag in flags {
            out.push(if flag { '1' } else { '0' });
        }
        out
    }

    pub fn piece_at(&self, row: u8, col: u8) -> Option<Piece> {
        self.board[row as usize][col as usize]
    }

    /// Like `piece_at` but tolerant of out-of-board coordinates, for offset
    /// and ray scans.
    pub(crate) fn lookup(&self, row: i8, col: i8) -> Option<Piece> {
        if inside(row, col) {
            self.board[row as usize][col as usize]
        } else {
            None
        }
    }

    pub fn king_square(&self, color: Color) -> Option<(u8, u8)> {
        for row in 0..8u8 {
            for col in 0..8u8 {
                if self.piece_at(row, col)
                    == Some(Piece {
                        color,
                        kind: PieceKind::King,
                    })
                {
                    return Some((row, col));
                }
            }
        }
        None
    }

    /// True if any piece of `by` currently threatens the square. A purely
    /// geometric scan: pins and turn order are not considered.
    pub fn is_square_attacked(&self, row: u8, col: u8, by: Color) -> bool {
        let (r, c) = (row as i8, col as i8);

        // Pawns attack diagonally toward the enemy back rank, so the
        // attacker sits one row behind the target from its own point of view.
        let pawn_row = match by {
            Color::White => r + 1,
            Color::Black => r - 1,
        };
        for dc in [-1, 1] {
            if let Some(piece) = self.lookup(pawn_row, c + dc) {
                if piece.color == by && piece.kind == PieceKind::Pawn {
                    return true;
                }
            }
        }

        let knight_offsets = [
            (-2, -1),
            (-2, 1),
            (2, -1),
            (2, 1),
            (-1, -2),
            (-1, 2),
            (1, -2),
            (1, 2),
        ];
        for (dr, dc) in knight_offsets {
            if let Some(piece) = self.lookup(r + dr, c + dc) {
                if piece.color == by && piece.kind == PieceKind::Knight {
                    return true;
                }
            }
        }

        // Bishop/queen rays, then rook/queen rays: walk until the first
        // occupied square.
        let diagonals = [(-1, -1), (-1, 1), (1, -1), (1, 1)];
        for (dr, dc) in diagonals {
            if let Some(piece) = self.first_piece_on_ray(r, c, dr, dc) {
                if piece.color == by
                    && (piece.kind == PieceKind::Bishop || piece.kind == PieceKind::Queen)
                {
                    return true;
                }
            }
        }
        let orthogonals = [(-1, 0), (1, 0), (0, -1), (0, 1)];
        for (dr, dc) in orthogonals {
            if let Some(piece) = self.first_piece_on_ray(r, c, dr, dc) {
                if piece.color == by
                    && (piece.kind == PieceKind::Rook || piece.kind == PieceKind::Queen)
                {
                    return true;
                }
            }
        }

        for dr in -1..=1 {
            for dc in -1..=1 {
                if dr == 0 && dc == 0 {
                    continue;
                }
                if let Some(piece) = self.lookup(r + dr, c + dc) {
                    if piece.color == by && piece.kind == PieceKind::King {
                        return true;
                    }
                }
            }
        }

        false
    }

    fn first_piece_on_ray(&self, row: i8, col: i8, dr: i8, dc: i8) -> Option<Piece> {
        let (mut r, mut c) = (row + dr, col + dc);
        while inside(r, c) {
            if let Some(piece) = self.board[r as usize][c as usize] {
                return Some(piece);
            }
            r += dr;
            c += dc;
        }
        None
    }

    /// Whether `color`'s king is attacked. False when the king is absent
    /// (malformed encodings make king queries undefined; we pick the
    /// non-panicking answer).
    pub fn in_check(&self, color: Color) -> bool {
        match self.king_square(color) {
            Some((row, col)) => self.is_square_attacked(row, col, color.other()),
            None => false,
        }
    }

    /// Applies the move unconditionally and pushes an undo record.
    /// Legality is the caller's responsibility.
    pub fn make_move(&mut self, mv: Move) {
        let (fr, fc) = (mv.from.0 as usize, mv.from.1 as usize);
        let (tr, tc) = (mv.to.0 as usize, mv.to.1 as usize);
        let mover = self.side_to_move;
        let moved = self.board[fr][fc].expect("no piece on from-square");

        let mut record = MoveRecord {
            from: mv.from,
            to: mv.to,
            moved,
            captured: self.board[tr][tc],
            castle_rook: None,
            ep_captured: None,
            prev_castling: self.castling,
            prev_en_passant: self.en_passant,
        };

        self.board[tr][tc] = Some(moved);
        self.board[fr][fc] = None;

        // Pawn reaching the last rank becomes the promoted piece.
        if moved.kind == PieceKind::Pawn {
            let last_row = match moved.color {
                Color::White => 0,
                Color::Black => 7,
            };
            if tr == last_row {
                self.board[tr][tc] = Some(Piece {
                    color: moved.color,
                    kind: mv.promotion.kind(),
                });
            }
        }

        // A king moving two columns is a castle: relocate the rook too.
        if moved.kind == PieceKind::King {
            if mv.from.1 == 4 && mv.to.1 == 6 {
                self.board[fr][5] = self.board[fr][7].take();
                record.castle_rook = Some(((mv.from.0, 7), (mv.from.0, 5)));
            } else if mv.from.1 == 4 && mv.to.1 == 2 {
                self.board[fr][3] = self.board[fr][0].take();
                record.castle_rook = Some(((mv.from.0, 0), (mv.from.0, 3)));
            }
            match moved.color {
                Color::White => self.castling.white_king_moved = true,
                Color::Black => self.castling.black_king_moved = true,
            }
        }

        // A pawn moving diagonally onto an empty square is an en-passant
        // capture: the passed pawn sits behind the destination.
        if moved.kind == PieceKind::Pawn && fc != tc && record.captured.is_none() {
            let capture_row = mv.to.0 as i8
                + match mover {
                    Color::White => 1,
                    Color::Black => -1,
                };
            if self.lookup(capture_row, tc as i8).is_some() {
                self.board[capture_row as usize][tc] = None;
                record.ep_captured = Some((capture_row as u8, mv.to.1));
            }
        }

        // The en-passant target survives exactly one ply.
        self.en_passant = None;
        if moved.kind == PieceKind::Pawn {
            let double_step = match moved.color {
                Color::White => mv.from.0 == 6 && mv.to.0 == 4,
                Color::Black => mv.from.0 == 1 && mv.to.0 == 3,
            };
            if double_step {
                let behind = match moved.color {
                    Color::White => mv.to.0 + 1,
                    Color::Black => mv.to.0 - 1,
                };
                self.en_passant = Some((behind, mv.to.1));
            }
        }

        // Rooks leaving their original squares lose the corresponding right.
        if moved.kind == PieceKind::Rook {
            match (moved.color, mv.from) {
                (Color::White, (7, 0)) => self.castling.white_rook_a_moved = true,
                (Color::White, (7, 7)) => self.castling.white_rook_b_moved = true,
                (Color::Black, (0, 0)) => self.castling.black_rook_a_moved = true,
                (Color::Black, (0, 7)) => self.castling.black_rook_b_moved = true,
                _ => {}
            }
        }

        self.history.push(record);
        self.side_to_move = mover.other();
    }

    /// Exact inverse of the most recent `make_move`; no-op on empty history.
    pub fn unmake_move(&mut self) {
        let record = match self.history.pop() {
            Some(record) => record,
            None => return,
        };
        let (fr, fc) = (record.from.0 as usize, record.from.1 as usize);
        let (tr, tc) = (record.to.0 as usize, record.to.1 as usize);

        // Putting the recorded piece back also reverts a promotion.
        self.board[fr][fc] = Some(record.moved);
        self.board[tr][tc] = record.captured;

        if let Some((rook_from, rook_to)) = record.castle_rook {
            self.board[rook_from.0 as usize][rook_from.1 as usize] =
                self.board[rook_to.0 as usize][rook_to.1 as usize].take();
        }

        if let Some((row, col)) = record.ep_captured {
            self.board[row as usize][col as usize] = Some(Piece {
                color: record.moved.color.other(),
                kind: PieceKind::Pawn,
            });
        }

        self.castling = record.prev_castling;
        self.en_passant = record.prev_en_passant;
        self.side_to_move = self.side_to_move.other();
    }

    /// Probes a single move: make, check the mover's own king, unmake.
    /// This is the exclusive legality gate used by the move generators.
    pub fn is_legal_move(&self, mv: Move) -> bool {
        let mut probe = self.clone();
        crate::movegen::probe_legal(&mut probe, mv)
    }

    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.side_to_move) && crate::movegen::legal_moves(self).is_empty()
    }

    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.side_to_move) && crate::movegen::legal_moves(self).is_empty()
    }

    pub fn is_terminal(&self) -> bool {
        self.is_checkmate() || self.is_stalemate()
    }
}

/// Diagnostic rendering: piece codes with `'0'` for empty squares, plus
/// row/column indices matching the move wire format.
impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..8u8 {
            write!(f, "{row} ")?;
            for col in 0..8u8 {
                match self.piece_at(row, col) {
                    Some(piece) => write!(f, "{} ", piece.code())?,
                    None => write!(f, "0 ")?,
                }
            }
            writeln!(f)?;
        }
        write!(f, "  0 1 2 3 4 5 6 7")
    }
}

#[cfg(test)]
#[path = "board_tests.rs"]
mod board_tests;
