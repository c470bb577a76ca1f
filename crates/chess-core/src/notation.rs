//! Textual board layouts.
//!
//! A layout is the piece-placement part of FEN, optionally followed by the
//! side to move and the castling field:
//!
//! ```text
//! rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq
//! ```
//!
//! Any further fields (en passant target, clocks) are accepted and ignored,
//! so full FEN strings parse too. When the castling field is omitted, the
//! rights are inferred from placement: a king and rook still on their home
//! squares count as unmoved.

use crate::{Color, PieceKind, Square};
use thiserror::Error;

/// Errors that can occur when parsing notation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NotationError {
    #[error("invalid placement: {0}")]
    InvalidPlacement(String),

    #[error("invalid side to move: expected 'w' or 'b', got '{0}'")]
    InvalidSideToMove(String),

    #[error("invalid castling field: {0}")]
    InvalidCastling(String),

    #[error("invalid square: '{0}'")]
    InvalidSquare(String),

    #[error("invalid move: '{0}'")]
    InvalidMove(String),
}

/// One occupied square of a layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub square: Square,
    pub kind: PieceKind,
    pub color: Color,
}

/// Which castling rights a layout grants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CastlingField {
    pub white_short: bool,
    pub white_long: bool,
    pub black_short: bool,
    pub black_long: bool,
}

impl CastlingField {
    /// Every right granted.
    pub const ALL: CastlingField = CastlingField {
        white_short: true,
        white_long: true,
        black_short: true,
        black_long: true,
    };

    pub const fn short(self, color: Color) -> bool {
        match color {
            Color::White => self.white_short,
            Color::Black => self.black_short,
        }
    }

    pub const fn long(self, color: Color) -> bool {
        match color {
            Color::White => self.white_long,
            Color::Black => self.black_long,
        }
    }

    fn parse(field: &str) -> Result<Self, NotationError> {
        let mut rights = CastlingField::default();
        if field == "-" {
            return Ok(rights);
        }
        for c in field.chars() {
            let slot = match c {
                'K' => &mut rights.white_short,
                'Q' => &mut rights.white_long,
                'k' => &mut rights.black_short,
                'q' => &mut rights.black_long,
                _ => return Err(NotationError::InvalidCastling(field.to_string())),
            };
            if *slot {
                return Err(NotationError::InvalidCastling(field.to_string()));
            }
            *slot = true;
        }
        Ok(rights)
    }
}

/// A parsed layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Layout {
    /// Occupied squares in reading order (rank 8 first, a-file first).
    pub placements: Vec<Placement>,
    pub side_to_move: Color,
    /// `None` when the field was omitted.
    pub castling: Option<CastlingField>,
}

impl Layout {
    /// The standard starting layout.
    pub const STANDARD: &'static str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq";

    pub fn parse(text: &str) -> Result<Self, NotationError> {
        let mut fields = text.split_whitespace();
        let placement = fields
            .next()
            .ok_or_else(|| NotationError::InvalidPlacement("empty layout".to_string()))?;
        let placements = Self::parse_placement(placement)?;

        let side_to_move = match fields.next() {
            None | Some("w") => Color::White,
            Some("b") => Color::Black,
            Some(other) => return Err(NotationError::InvalidSideToMove(other.to_string())),
        };

        let castling = fields.next().map(CastlingField::parse).transpose()?;

        Ok(Layout {
            placements,
            side_to_move,
            castling,
        })
    }

    fn parse_placement(placement: &str) -> Result<Vec<Placement>, NotationError> {
        let ranks: Vec<&str> = placement.split('/').collect();
        if ranks.len() != 8 {
            return Err(NotationError::InvalidPlacement(format!(
                "expected 8 ranks, got {}",
                ranks.len()
            )));
        }

        let mut placements = Vec::new();
        for (row, text) in ranks.iter().enumerate() {
            let rank = 7 - row as u8;
            let mut file = 0u8;
            for c in text.chars() {
                if let Some(skip) = c.to_digit(10).filter(|d| (1..=8).contains(d)) {
                    file += skip as u8;
                } else if let Some((kind, color)) = PieceKind::from_char(c) {
                    if file >= 8 {
                        return Err(NotationError::InvalidPlacement(format!(
                            "rank {} overflows",
                            rank + 1
                        )));
                    }
                    placements.push(Placement {
                        square: Square::new(file, rank),
                        kind,
                        color,
                    });
                    file += 1;
                } else {
                    return Err(NotationError::InvalidPlacement(format!(
                        "invalid character '{}' in rank {}",
                        c,
                        rank + 1
                    )));
                }
            }
            if file != 8 {
                return Err(NotationError::InvalidPlacement(format!(
                    "rank {} has {} squares, expected 8",
                    rank + 1,
                    file
                )));
            }
        }
        Ok(placements)
    }
}
