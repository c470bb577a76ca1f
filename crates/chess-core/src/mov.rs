//! Move representation.

use crate::{NotationError, PromotionPiece, Square};
use std::fmt;
use std::str::FromStr;

/// Side effect a move carries beyond relocating the mover.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum MoveFlag {
    /// Plain relocation (possibly a capture).
    Normal = 0,
    /// King moves two files toward the h-file rook, which jumps over it.
    CastleShort = 1,
    /// King moves two files toward the a-file rook, which jumps over it.
    CastleLong = 2,
    PromoteQueen = 3,
    PromoteRook = 4,
    PromoteBishop = 5,
    PromoteKnight = 6,
}

impl MoveFlag {
    /// The flag that promotes to `piece`.
    #[inline]
    pub const fn promote(piece: PromotionPiece) -> Self {
        match piece {
            PromotionPiece::Queen => MoveFlag::PromoteQueen,
            PromotionPiece::Rook => MoveFlag::PromoteRook,
            PromotionPiece::Bishop => MoveFlag::PromoteBishop,
            PromotionPiece::Knight => MoveFlag::PromoteKnight,
        }
    }

    /// Returns the promotion choice if this is a promotion move.
    #[inline]
    pub const fn promotion_piece(self) -> Option<PromotionPiece> {
        match self {
            MoveFlag::PromoteQueen => Some(PromotionPiece::Queen),
            MoveFlag::PromoteRook => Some(PromotionPiece::Rook),
            MoveFlag::PromoteBishop => Some(PromotionPiece::Bishop),
            MoveFlag::PromoteKnight => Some(PromotionPiece::Knight),
            _ => None,
        }
    }

    #[inline]
    pub const fn is_promotion(self) -> bool {
        self.promotion_piece().is_some()
    }

    #[inline]
    pub const fn is_castling(self) -> bool {
        matches!(self, MoveFlag::CastleShort | MoveFlag::CastleLong)
    }

    const fn from_bits(bits: u16) -> Self {
        match bits {
            1 => MoveFlag::CastleShort,
            2 => MoveFlag::CastleLong,
            3 => MoveFlag::PromoteQueen,
            4 => MoveFlag::PromoteRook,
            5 => MoveFlag::PromoteBishop,
            6 => MoveFlag::PromoteKnight,
            _ => MoveFlag::Normal,
        }
    }
}

/// A committed move: source square, destination square and flag.
///
/// Encoded compactly: 6 bits from, 6 bits to, 3 bits flag.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct Move(u16);

impl Move {
    #[inline]
    pub const fn new(from: Square, to: Square, flag: MoveFlag) -> Self {
        Move((from.index() as u16) | ((to.index() as u16) << 6) | ((flag as u16) << 12))
    }

    /// Creates a move without side effects.
    #[inline]
    pub const fn normal(from: Square, to: Square) -> Self {
        Self::new(from, to, MoveFlag::Normal)
    }

    #[inline]
    pub const fn from(self) -> Square {
        Square::from_masked(self.0 as u8)
    }

    #[inline]
    pub const fn to(self) -> Square {
        Square::from_masked((self.0 >> 6) as u8)
    }

    #[inline]
    pub const fn flag(self) -> MoveFlag {
        MoveFlag::from_bits((self.0 >> 12) & 0x7)
    }

    /// Coordinate notation, e.g. "e2e4" or "e7e8q".
    pub fn to_coordinate(self) -> String {
        match self.flag().promotion_piece() {
            Some(p) => format!("{}{}{}", self.from(), self.to(), p.to_char()),
            None => format!("{}{}", self.from(), self.to()),
        }
    }
}

impl FromStr for Move {
    type Err = NotationError;

    /// Parses coordinate notation. Castling is not inferred here; the engine
    /// fills that in from the position.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || NotationError::InvalidMove(s.to_string());
        if !(4..=5).contains(&s.len()) || !s.is_ascii() {
            return Err(invalid());
        }
        let from: Square = s[0..2].parse().map_err(|_| invalid())?;
        let to: Square = s[2..4].parse().map_err(|_| invalid())?;
        let flag = match s[4..].chars().next() {
            Some(c) => MoveFlag::promote(PromotionPiece::from_char(c).ok_or_else(invalid)?),
            None => MoveFlag::Normal,
        };
        Ok(Move::new(from, to, flag))
    }
}

impl fmt::Debug for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Move({}", self.to_coordinate())?;
        if self.flag().is_castling() {
            write!(f, " {:?}", self.flag())?;
        }
        write!(f, ")")
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_coordinate())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sq(s: &str) -> Square {
        s.parse().unwrap()
    }

    #[test]
    fn move_encoding() {
        let m = Move::new(sq("e1"), sq("g1"), MoveFlag::CastleShort);
        assert_eq!(m.from(), Square::E1);
        assert_eq!(m.to(), Square::G1);
        assert_eq!(m.flag(), MoveFlag::CastleShort);
    }

    #[test]
    fn coordinate_notation() {
        assert_eq!(Move::normal(sq("e2"), sq("e4")).to_coordinate(), "e2e4");
        let promo = Move::new(sq("e7"), sq("e8"), MoveFlag::PromoteKnight);
        assert_eq!(promo.to_string(), "e7e8n");
    }

    #[test]
    fn parse_coordinate_notation() {
        let m: Move = "e2e4".parse().unwrap();
        assert_eq!(m, Move::normal(sq("e2"), sq("e4")));

        let promo: Move = "a7a8Q".parse().unwrap();
        assert_eq!(promo.flag(), MoveFlag::PromoteQueen);

        assert!("e2".parse::<Move>().is_err());
        assert!("e2e9".parse::<Move>().is_err());
        assert!("e7e8k".parse::<Move>().is_err());
        assert!("e2e4qq".parse::<Move>().is_err());
    }

    #[test]
    fn flag_queries() {
        for p in PromotionPiece::ALL {
            let flag = MoveFlag::promote(p);
            assert!(flag.is_promotion());
            assert!(!flag.is_castling());
            assert_eq!(flag.promotion_piece(), Some(p));
        }
        assert!(MoveFlag::CastleLong.is_castling());
        assert_eq!(MoveFlag::Normal.promotion_piece(), None);
    }

    #[test]
    fn debug_shows_castling() {
        let m = Move::new(Square::E8, Square::C8, MoveFlag::CastleLong);
        assert_eq!(format!("{:?}", m), "Move(e8c8 CastleLong)");
    }
}
