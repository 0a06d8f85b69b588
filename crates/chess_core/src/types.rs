#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Color {
    White,
    Black,
}

impl Color {
    pub fn other(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Piece {
    pub color: Color,
    pub kind: PieceKind,
}

impl Piece {
    /// Parses one of the 12 piece codes used by the 71-character encoding.
    /// Uppercase is White, lowercase is Black; `'0'` (empty) is not a piece.
    pub fn from_code(code: char) -> Option<Piece> {
        let color = if code.is_ascii_uppercase() {
            Color::White
        } else {
            Color::Black
        };
        let kind = match code.to_ascii_lowercase() {
            'p' => PieceKind::Pawn,
            'n' => PieceKind::Knight,
            'b' => PieceKind::Bishop,
            'r' => PieceKind::Rook,
            'q' => PieceKind::Queen,
            'k' => PieceKind::King,
            _ => return None,
        };
        Some(Piece { color, kind })
    }

    pub fn code(self) -> char {
        let c = match self.kind {
            PieceKind::Pawn => 'p',
            PieceKind::Knight => 'n',
            PieceKind::Bishop => 'b',
            PieceKind::Rook => 'r',
            PieceKind::Queen => 'q',
            PieceKind::King => 'k',
        };
        match self.color {
            Color::White => c.to_ascii_uppercase(),
            Color::Black => c,
        }
    }
}

// Board geometry helpers. Rows and columns run 0..8 with row 0 at the top
// (Black's back rank); White pawns move toward row 0.

pub fn inside(row: i8, col: i8) -> bool {
    (0..8).contains(&row) && (0..8).contains(&col)
}

pub fn square(row: i8, col: i8) -> Option<(u8, u8)> {
    if inside(row, col) {
        Some((row as u8, col as u8))
    } else {
        None
    }
}
