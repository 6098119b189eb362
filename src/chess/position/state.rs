//! The board-state bitfield: castling history and en-passant availability
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::fmt;
use crate::chess::{Color, File};

const EP_FILE_MASK: u16 = 0b00_0000_0111;
const DOUBLE_PUSH: u16 = 0b00_0000_1000;
const KING_MOVED: [u16; Color::COUNT] = [0b00_0001_0000, 0b00_0010_0000];
const ROOK_MOVED: [[u16; 2]; Color::COUNT] = [
    [0b00_0100_0000, 0b00_1000_0000],
    [0b01_0000_0000, 0b10_0000_0000],
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The side of the board a castle happens on
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum CastleSide {
    /// Castling short, with the rook from the h-file
    King = 0,
    /// Castling long, with the rook from the a-file
    Queen = 1,
}

impl CastleSide {
    /// Both sides, king side first
    pub const BOTH: [CastleSide; 2] = [CastleSide::King, CastleSide::Queen];

    /// The file the rook starts on
    pub fn rook_origin(self) -> File {
        match self {
            CastleSide::King => File::H,
            CastleSide::Queen => File::A,
        }
    }

    /// The file the rook lands on
    pub fn rook_destination(self) -> File {
        match self {
            CastleSide::King => File::F,
            CastleSide::Queen => File::D,
        }
    }

    /// The file the king lands on
    pub fn king_destination(self) -> File {
        match self {
            CastleSide::King => File::G,
            CastleSide::Queen => File::C,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Packed board state.
///
/// | bits | meaning                                   |
/// |------|-------------------------------------------|
/// | 0-2  | file of the last double pawn push         |
/// | 3    | the last move was a double pawn push      |
/// | 4    | white king has moved                      |
/// | 5    | black king has moved                      |
/// | 6-7  | white king's rook, queen's rook has moved |
/// | 8-9  | black king's rook, queen's rook has moved |
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct BoardState(u16);

impl BoardState {
    /// The number of distinct board states
    pub const COUNT: usize = 1 << 10;

    /// Creates a board state from its raw bits
    pub fn from_bits(bits: u16) -> BoardState {
        debug_assert!((bits as usize) < Self::COUNT);
        BoardState(bits)
    }

    /// Returns the raw bits
    pub fn bits(self) -> u16 {
        self.0
    }

    /// Returns `true` if the last move was a double pawn push
    pub fn is_double_pawn_push(self) -> bool {
        self.0 & DOUBLE_PUSH != 0
    }

    /// Returns the file of the last move's double pawn push, if it was one
    pub fn en_passant_file(self) -> Option<File> {
        if self.is_double_pawn_push() {
            Some(File::try_from((self.0 & EP_FILE_MASK) as usize).expect("INFALLIBLE"))
        } else {
            None
        }
    }

    /// Records a double pawn push on `file`, or clears it
    pub fn set_double_pawn_push(&mut self, file: Option<File>) {
        self.0 &= !(EP_FILE_MASK | DOUBLE_PUSH);
        if let Some(file) = file {
            self.0 |= DOUBLE_PUSH | file as u16;
        }
    }

    /// Returns `true` if the king of color `c` has moved
    pub fn king_moved(self, c: Color) -> bool {
        self.0 & KING_MOVED[c as usize] != 0
    }

    /// Marks the king of color `c` as having moved
    pub fn set_king_moved(&mut self, c: Color) {
        self.0 |= KING_MOVED[c as usize];
    }

    /// Returns `true` if the rook of color `c` on `side` has moved (or been captured)
    pub fn rook_moved(self, c: Color, side: CastleSide) -> bool {
        self.0 & ROOK_MOVED[c as usize][side as usize] != 0
    }

    /// Marks the rook of color `c` on `side` as having moved
    pub fn set_rook_moved(&mut self, c: Color, side: CastleSide) {
        self.0 |= ROOK_MOVED[c as usize][side as usize];
    }

    /// Returns `true` if either piece needed to castle on `side` has moved
    pub fn castle_pieces_moved(self, c: Color, side: CastleSide) -> bool {
        self.king_moved(c) || self.rook_moved(c, side)
    }
}

impl fmt::Display for BoardState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:#012b}", self.0)
    }
}
