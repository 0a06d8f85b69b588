use std::fmt;

use crate::types::PieceKind;

/// Promotion choice carried by every move. The digit values 0..=3 are part of
/// the wire format and the cache key, so the variant order is fixed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Promotion {
    #[default]
    Queen,
    Rook,
    Knight,
    Bishop,
}

impl Promotion {
    pub fn digit(self) -> u8 {
        match self {
            Promotion::Queen => 0,
            Promotion::Rook => 1,
            Promotion::Knight => 2,
            Promotion::Bishop => 3,
        }
    }

    pub fn from_digit(digit: u8) -> Option<Promotion> {
        match digit {
            0 => Some(Promotion::Queen),
            1 => Some(Promotion::Rook),
            2 => Some(Promotion::Knight),
            3 => Some(Promotion::Bishop),
            _ => None,
        }
    }

    pub fn kind(self) -> PieceKind {
        match self {
            Promotion::Queen => PieceKind::Queen,
            Promotion::Rook => PieceKind::Rook,
            Promotion::Knight => PieceKind::Knight,
            Promotion::Bishop => PieceKind::Bishop,
        }
    }
}

/// A from-square, to-square and promotion choice. Plain value type: validity
/// of the coordinates is a `Position` concern, not checked here.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Move {
    pub from: (u8, u8),
    pub to: (u8, u8),
    pub promotion: Promotion,
}

impl Move {
    pub fn new(from_row: u8, from_col: u8, to_row: u8, to_col: u8) -> Move {
        Move {
            from: (from_row, from_col),
            to: (to_row, to_col),
            promotion: Promotion::Queen,
        }
    }

    pub fn promoting(
        from_row: u8,
        from_col: u8,
        to_row: u8,
        to_col: u8,
        promotion: Promotion,
    ) -> Move {
        Move {
            from: (from_row, from_col),
            to: (to_row, to_col),
            promotion,
        }
    }
}

/// Five-digit wire form `<fromRow><fromCol><toRow><toCol><promotionDigit>`,
/// used both as the response body and as part of the cache entry.
impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}{}{}{}{}",
            self.from.0,
            self.from.1,
            self.to.0,
            self.to.1,
            self.promotion.digit()
        )
    }
}
