//! The `chess` module holds the board model: coordinates, bit-planes, positions and moves.
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::ops;
use std::fmt;
use std::mem;
use std::str::FromStr;
use std::convert::TryFrom;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Which side a piece or player is on, based on the color of the pieces for that side.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
#[repr(u8)]
pub enum Color {
    White,
    Black,
}

impl Color {
    /// The number of colors
    pub const COUNT: usize = 2;

    /// Returns the color to move on the given ply, where ply 1 is White's first move
    pub fn from_ply(ply: usize) -> Color {
        if ply % 2 == 1 { Color::White } else { Color::Black }
    }

    /// Returns the rank on which this color's king and rooks start
    pub fn home_rank(self) -> Rank {
        match self {
            Color::White => Rank::R1,
            Color::Black => Rank::R8,
        }
    }

    /// Returns the rank on which this color's pawns promote
    pub fn promotion_rank(self) -> Rank {
        match self {
            Color::White => Rank::R8,
            Color::Black => Rank::R1,
        }
    }

    /// Returns the rank direction in which this color's pawns advance
    pub fn forward(self) -> i8 {
        match self {
            Color::White => 1,
            Color::Black => -1,
        }
    }
}

impl ops::Not for Color {
    type Output = Color;

    /// Returns the opposite color
    ///
    /// # Example
    /// ```
    /// use chesscore::chess::Color;
    /// assert_eq!(!Color::White, Color::Black);
    /// assert_eq!(!Color::Black, Color::White);
    /// ```
    fn not(self) -> Color {
        match self {
            Color::White => Color::Black,
            Color::Black => Color::White,
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::White => 'w'.fmt(f),
            Color::Black => 'b'.fmt(f),
        }
    }
}

impl FromStr for Color {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "w" => Ok(Color::White),
            "b" => Ok(Color::Black),
            _   => Err(Error::ParseError),
        }
    }
}

impl Default for Color {
    fn default() -> Self {
        Color::White
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The type of a chess piece
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
#[repr(u8)]
pub enum Piece {
    Pawn = 0,
    Knight = 1,
    Bishop = 2,
    Rook = 3,
    Queen = 4,
    King = 5,
}

impl Piece {
    /// The number of piece types
    pub const COUNT: usize = Piece::King as usize + 1;

    /// All piece types, in discriminant order
    pub const ALL: [Piece; Piece::COUNT] = [
        Piece::Pawn, Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen, Piece::King,
    ];

    /// The pieces a pawn may promote to, most valuable first
    pub const PROMOTIONS: [Piece; 4] = [Piece::Queen, Piece::Rook, Piece::Bishop, Piece::Knight];

    /// Returns the combined piece-type and color code in `0..12`, used to index per-piece tables
    pub fn code(self, color: Color) -> usize {
        self as usize * Color::COUNT + color as usize
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Piece::Pawn => "P",
            Piece::Knight => "N",
            Piece::Bishop => "B",
            Piece::Rook => "R",
            Piece::Queen => "Q",
            Piece::King => "K",
        }.fmt(f)
    }
}

impl FromStr for Piece {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s {
            "P"|"p" => Ok(Piece::Pawn),
            "N"|"n" => Ok(Piece::Knight),
            "B"|"b" => Ok(Piece::Bishop),
            "R"|"r" => Ok(Piece::Rook),
            "Q"|"q" => Ok(Piece::Queen),
            "K"|"k" => Ok(Piece::King),
            _       => Err(Error::UnknownPiece),
        }
    }
}

impl Default for Piece {
    fn default() -> Self {
        Piece::Pawn
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Vertical column of the board, labeled from left to right from `White`'s perspective as
/// `A` through `H`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
#[repr(u8)]
pub enum File {
    // discriminants must stay contiguous from zero: `TryFrom<usize>` transmutes
    A = 0, B = 1, C = 2, D = 3, E = 4, F = 5, G = 6, H = 7,
}

impl File {
    /// The number of files
    pub const COUNT: usize = File::H as usize + 1;

    /// Returns the file named by a lowercase letter `a` to `h`
    pub fn from_char(c: char) -> Option<File> {
        match c {
            'a' ..= 'h' => File::try_from(c as usize - 'a' as usize).ok(),
            _ => None,
        }
    }

    /// Returns the file's letter
    pub fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for File {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => File::from_char(c.to_ascii_lowercase()).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for File {
    fn default() -> Self {
        File::A
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Horizontal row of the board, labeled from nearest to farthest from `White`'s perspective
/// as `R1` through `R8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
#[repr(u8)]
pub enum Rank {
    // discriminants must stay contiguous from zero: `TryFrom<usize>` transmutes
    R1 = 0, R2 = 1, R3 = 2, R4 = 3, R5 = 4, R6 = 5, R7 = 6, R8 = 7,
}

impl Rank {
    /// The number of ranks
    pub const COUNT: usize = Rank::R8 as usize + 1;

    /// Returns the rank named by a digit `1` to `8`
    pub fn from_char(c: char) -> Option<Rank> {
        match c {
            '1' ..= '8' => Rank::try_from(c as usize - '1' as usize).ok(),
            _ => None,
        }
    }

    /// Returns the rank's digit
    pub fn to_char(self) -> char {
        (b'1' + self as u8) as char
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_char().fmt(f)
    }
}

impl FromStr for Rank {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Rank::from_char(c).ok_or(Error::ParseError),
            _ => Err(Error::ParseError),
        }
    }
}

impl Default for Rank {
    fn default() -> Self {
        Rank::R1
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A specific square on the board, labeled using the `File` and `Rank` as coordinates.
///
/// The discriminant is the square's serial index, `file + rank * 8`, so `A1` is 0, `B1` is 1 and
/// `H8` is 63. The same index is the bit position of the square in a `Bitboard`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[allow(missing_docs)]
#[repr(u8)]
pub enum Square {
    // discriminants must stay contiguous from zero: `TryFrom<usize>` transmutes
    A1 = 0o00, B1 = 0o01, C1 = 0o02, D1 = 0o03, E1 = 0o04, F1 = 0o05, G1 = 0o06, H1 = 0o07,
    A2 = 0o10, B2 = 0o11, C2 = 0o12, D2 = 0o13, E2 = 0o14, F2 = 0o15, G2 = 0o16, H2 = 0o17,
    A3 = 0o20, B3 = 0o21, C3 = 0o22, D3 = 0o23, E3 = 0o24, F3 = 0o25, G3 = 0o26, H3 = 0o27,
    A4 = 0o30, B4 = 0o31, C4 = 0o32, D4 = 0o33, E4 = 0o34, F4 = 0o35, G4 = 0o36, H4 = 0o37,
    A5 = 0o40, B5 = 0o41, C5 = 0o42, D5 = 0o43, E5 = 0o44, F5 = 0o45, G5 = 0o46, H5 = 0o47,
    A6 = 0o50, B6 = 0o51, C6 = 0o52, D6 = 0o53, E6 = 0o54, F6 = 0o55, G6 = 0o56, H6 = 0o57,
    A7 = 0o60, B7 = 0o61, C7 = 0o62, D7 = 0o63, E7 = 0o64, F7 = 0o65, G7 = 0o66, H7 = 0o67,
    A8 = 0o70, B8 = 0o71, C8 = 0o72, D8 = 0o73, E8 = 0o74, F8 = 0o75, G8 = 0o76, H8 = 0o77,
}

impl Square {
    /// The number of squares
    pub const COUNT: usize = Square::H8 as usize + 1;

    /// Returns a square from its file and rank
    pub fn from_coord(file: File, rank: Rank) -> Square {
        Square::try_from(file as usize + ((rank as usize) << 3)).expect("INFALLIBLE")
    }

    /// Returns the square's file
    pub fn file(self) -> File {
        File::try_from((self as usize) & 7).expect("INFALLIBLE")
    }

    /// Returns the square's rank
    pub fn rank(self) -> Rank {
        Rank::try_from((self as usize) >> 3).expect("INFALLIBLE")
    }

    /// Returns the square's serial index, `file + rank * 8`
    pub fn serial(self) -> usize {
        self as usize
    }

    /// Returns the square `x` files and `y` ranks away, or `None` if that is off the board
    pub fn offset(self, x: i8, y: i8) -> Option<Square> {
        let f = self.file() as i8 + x;
        let r = self.rank() as i8 + y;

        if (0..8).contains(&f) && (0..8).contains(&r) {
            Some(Square::from_coord(
                File::try_from(f as usize).expect("INFALLIBLE"),
                Rank::try_from(r as usize).expect("INFALLIBLE"),
            ))
        } else {
            None
        }
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name: String = [self.file().to_char(), self.rank().to_char()].iter().collect();
        name.fmt(f)
    }
}

impl FromStr for Square {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(f), Some(r), None) => {
                match (File::from_char(f), Rank::from_char(r)) {
                    (Some(f), Some(r)) => Ok(Square::from_coord(f, r)),
                    _ => Err(Error::InvalidSquare),
                }
            },
            _ => Err(Error::InvalidSquare),
        }
    }
}

impl Default for Square {
    fn default() -> Self {
        Square::A1
    }
}

/// Implements `TryFrom<usize>` and `From<T> for usize` for `u8` enums whose discriminants run
/// from zero to `COUNT - 1`
macro_rules! index_conversions {
    ($($t:ident),*) => {$(
        impl TryFrom<usize> for $t {
            type Error = Error;

            fn try_from(value: usize) -> Result<Self> {
                if value < Self::COUNT {
                    unsafe { Ok(mem::transmute::<u8, $t>(value as u8)) }
                } else {
                    Err(Error::TryFromIntError)
                }
            }
        }

        impl From<$t> for usize {
            fn from(value: $t) -> Self {
                value as Self
            }
        }
    )*};
}

index_conversions!(Color, Piece, File, Rank, Square);

////////////////////////////////////////////////////////////////////////////////////////////////////
pub mod bitboard;
pub mod position;
pub mod moves;
pub mod variations;
pub mod error;

pub use error::{Error, Result};
pub use bitboard::Bitboard;
pub use position::{Position, PositionListener, BoardState, CastleSide};
pub use position::zobrist::{ZobristKeys, ZobristHasher, HashedPosition};
pub use moves::{MoveRecord, MoveKind};




#[cfg(test)]
mod square_tests {
    use std::convert::TryFrom;
    use super::*;

    #[test]
    fn serial_is_file_plus_eight_times_rank() {
        assert_eq!(Square::A1.serial(), 0);
        assert_eq!(Square::B1.serial(), 1);
        assert_eq!(Square::H1.serial(), 7);
        assert_eq!(Square::A2.serial(), 8);
        assert_eq!(Square::E4.serial(), 4 + 3 * 8);
        assert_eq!(Square::H8.serial(), 63);
    }

    #[test]
    fn file_and_rank_methods_match_from_coord() {
        for i in 0..Square::COUNT {
            let s = Square::try_from(i).unwrap();
            assert_eq!(Square::from_coord(s.file(), s.rank()), s);
            assert_eq!(s.file() as usize, i % 8);
            assert_eq!(s.rank() as usize, i / 8);
        }
    }

    #[test]
    fn display_and_fromstr_round_trip() {
        for i in 0..Square::COUNT {
            let s = Square::try_from(i).unwrap();
            assert_eq!(format!("{}", s).parse::<Square>().unwrap(), s);
        }
        assert_eq!(format!("{}", Square::E4), "e4");
    }

    #[test]
    fn fromstr_trait_produces_errors_when_it_should() {
        assert!("a".parse::<Square>().is_err());
        assert!("1".parse::<Square>().is_err());
        assert!("ax".parse::<Square>().is_err());
        assert!("x1".parse::<Square>().is_err());
        assert!("a1x".parse::<Square>().is_err());
        assert!("a9".parse::<Square>().is_err());
    }

    #[test]
    fn offset_stays_on_the_board() {
        assert_eq!(Square::E4.offset(1, 2), Some(Square::F6));
        assert_eq!(Square::A1.offset(-1, 0), None);
        assert_eq!(Square::H8.offset(0, 1), None);
        assert_eq!(Square::H1.offset(-7, 7), Some(Square::A8));
    }

    #[test]
    fn out_of_bound_usize_conversion_is_an_error() {
        assert!(Square::try_from(Square::COUNT).is_err());
    }
}
