//! Provides a representation of sets of squares, one bit per square
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryInto;
use std::iter::FusedIterator;
use std::iter::{FromIterator, Extend};
use std::ops;
use std::fmt;
use super::*;

mod attacks;
pub use attacks::*;

const FILE_A: u64 = 0x0101_0101_0101_0101;
const RANK_1: u64 = 0x0000_0000_0000_00ff;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A set of squares with each bit representing one square
///
/// Bit `i` is the square with serial index `i`, that is file `i % 8` and rank `i / 8`.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct Bitboard(u64);

impl Bitboard {
    /// Creates a new, empty bitboard
    pub fn new() -> Bitboard {
        Default::default()
    }

    /// Returns the raw 64-bit mask
    pub fn bits(self) -> u64 {
        self.0
    }

    /// Returns the number of squares in the bitboard
    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Returns `true` if the bitboard is empty
    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    /// Returns `true` if the bitboard contains `sq`
    pub fn contains(self, sq: Square) -> bool {
        !(self & sq.into()).is_empty()
    }

    /// Returns `true` if `self` intersects `other`
    pub fn intersects(self, other: Bitboard) -> bool {
        !(self & other).is_empty()
    }

    /// Returns `true` if `self` does not intersect `other`
    pub fn is_disjoint(self, other: Bitboard) -> bool {
        (self & other).is_empty()
    }

    /// Adds a square to the bitboard if it is not already present
    pub fn insert(&mut self, sq: Square) {
        *self |= sq.into();
    }

    /// Removes a square from the bitboard if it is present
    pub fn remove(&mut self, sq: Square) {
        *self &= !Bitboard::from(sq);
    }

    /// Removes a square from the bitboard and returns it
    pub fn pop(&mut self) -> Option<Square> {
        if self.0 > 0 {
            // get the least significant bit
            let sq: Square = (self.0.trailing_zeros() as usize).try_into().expect("INFALLIBLE");
            // clear the least significant bit
            self.0 &= self.0 - 1;

            Some(sq)
        } else {
            None
        }
    }

    /// Returns the square that would be removed by a pop command
    pub fn peek(self) -> Option<Square> {
        if self.0 > 0 {
            Some((self.0.trailing_zeros() as usize).try_into().expect("INFALLIBLE"))
        } else {
            None
        }
    }

    /// Toggles a square in the bitboard
    pub fn toggle(&mut self, sq: Square) {
        *self ^= sq.into();
    }

    /// Returns a bitboard with all squares shifted by `x` files and `y` ranks.
    ///
    /// Squares shifted past any edge of the board are dropped rather than wrapped.
    pub fn shift_xy(self, x: i8, y: i8) -> Bitboard {
        let keep = (0..File::COUNT as i8)
            .filter(|f| (0..File::COUNT as i8).contains(&(f + x)))
            .fold(0, |mask, f| mask | FILE_A << f);
        let bits = self.0 & keep;
        let shift = i32::from(y) * 8 + i32::from(x);

        if shift >= 64 || shift <= -64 {
            Bitboard(0)
        } else if shift > 0 {
            Bitboard(bits << shift)
        } else {
            Bitboard(bits >> -shift)
        }
    }

    /// Returns a bitboard flipped vertically, so `Rank::R1` becomes `Rank::R8`
    pub fn swap_ranks(self) -> Bitboard {
        Bitboard(self.0.swap_bytes())
    }
}

impl ops::Not for Bitboard {
    type Output = Self;

    fn not(self) -> Self::Output {
        Bitboard(!self.0)
    }
}

macro_rules! set_ops {
    ($($op:ident::$method:ident, $assign:ident::$assign_method:ident, $sym:tt;)*) => {$(
        impl ops::$op for Bitboard {
            type Output = Self;

            fn $method(self, rhs: Self) -> Self::Output {
                Bitboard(self.0 $sym rhs.0)
            }
        }

        impl ops::$assign for Bitboard {
            fn $assign_method(&mut self, rhs: Self) {
                self.0 = self.0 $sym rhs.0;
            }
        }
    )*};
}

set_ops! {
    BitAnd::bitand, BitAndAssign::bitand_assign, &;
    BitOr::bitor, BitOrAssign::bitor_assign, |;
    BitXor::bitxor, BitXorAssign::bitxor_assign, ^;
}

impl fmt::Display for Bitboard {
    /// Draws the board with rank 8 at the top, `1` for a member square and `.` otherwise
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for r in (0..Rank::COUNT).rev() {
            let row: String = (0..File::COUNT)
                .map(|file| if self.0 & (1 << (r * 8 + file)) != 0 { '1' } else { '.' })
                .collect();
            writeln!(f, "{}", row)?;
        }
        Ok(())
    }
}

impl fmt::LowerHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl fmt::UpperHex for Bitboard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<u64> for Bitboard {
    fn from(val: u64) -> Bitboard {
        Bitboard(val)
    }
}

impl From<Bitboard> for u64 {
    fn from(bb: Bitboard) -> u64 {
        bb.0
    }
}

impl From<Square> for Bitboard {
    fn from(sq: Square) -> Bitboard {
        Bitboard(1 << sq as u64)
    }
}

impl From<File> for Bitboard {
    fn from(f: File) -> Bitboard {
        Bitboard(FILE_A << f as u64)
    }
}

impl From<Rank> for Bitboard {
    fn from(r: Rank) -> Bitboard {
        Bitboard(RANK_1 << (8 * r as u64))
    }
}

impl IntoIterator for Bitboard {
    type Item = Square;
    type IntoIter = IntoIter;

    fn into_iter(self) -> Self::IntoIter {
        IntoIter(self)
    }
}

impl FromIterator<Square> for Bitboard {
    fn from_iter<I: IntoIterator<Item=Square>>(iter: I) -> Self {
        let mut bd = Bitboard::new();
        bd.extend(iter);
        bd
    }
}

impl Extend<Square> for Bitboard {
    fn extend<I: IntoIterator<Item=Square>>(&mut self, iter: I) {
        for sq in iter {
            self.insert(sq);
        }
    }
}

/// Iterator over the squares of a `Bitboard`, lowest serial index first
#[derive(Debug, Copy, Clone)]
pub struct IntoIter(Bitboard);

impl Iterator for IntoIter {
    type Item = Square;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.pop()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.0.len(), Some(self.0.len()))
    }
}

impl ExactSizeIterator for IntoIter { }

impl FusedIterator for IntoIter { }

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_bitboard_is_empty() {
        assert_eq!(Bitboard::new(), Bitboard(0));
        assert_eq!(Bitboard::new().len(), 0);
        assert!(Bitboard::new().is_empty());
        assert_eq!(Bitboard(0xffff_ffff_ffff_ffff).len(), 64);
    }

    #[test]
    fn square_masks_follow_serial_index() {
        assert_eq!(Bitboard::from(Square::A1).bits(), 1);
        assert_eq!(Bitboard::from(Square::B1).bits(), 2);
        assert_eq!(Bitboard::from(Square::A2).bits(), 0x100);
        assert_eq!(Bitboard::from(Square::H8).bits(), 1 << 63);
        assert_eq!(Bitboard::from(File::E).bits(), 0x1010_1010_1010_1010);
        assert_eq!(Bitboard::from(Rank::R2).bits(), 0x0000_0000_0000_ff00);
    }

    #[test]
    fn insert_remove_and_toggle() {
        let mut bb = Bitboard::new();
        bb.insert(Square::C3);
        assert!(bb.contains(Square::C3));
        bb.toggle(Square::D4);
        assert_eq!(bb.len(), 2);
        bb.remove(Square::C3);
        bb.toggle(Square::D4);
        assert!(bb.is_empty());
    }

    #[test]
    fn iteration_is_in_serial_order() {
        let bb: Bitboard = vec![Square::H8, Square::A1, Square::E4].into_iter().collect();
        let squares: Vec<_> = bb.into_iter().collect();
        assert_eq!(squares, vec![Square::A1, Square::E4, Square::H8]);
    }

    #[test]
    fn shift_drops_squares_instead_of_wrapping() {
        let edge = Bitboard::from(Square::H4) | Square::A5.into();
        assert_eq!(edge.shift_xy(1, 0), Bitboard::from(Square::B5));
        assert_eq!(edge.shift_xy(-1, 0), Bitboard::from(Square::G4));
        assert_eq!(Bitboard::from(Square::E8).shift_xy(0, 1), Bitboard::new());
        assert_eq!(Bitboard::from(Square::E2).shift_xy(1, 1), Bitboard::from(Square::F3));
        assert_eq!(Bitboard::from(Square::E2).shift_xy(0, -2), Bitboard::new());
    }

    #[test]
    fn swap_ranks_mirrors_the_board() {
        assert_eq!(Bitboard::from(Square::C2).swap_ranks(), Bitboard::from(Square::C7));
    }

    #[test]
    fn display_draws_rank_eight_first() {
        let text = format!("{}", Bitboard::from(Square::A8) | Square::H1.into());
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "1.......");
        assert_eq!(lines[7], ".......1");
    }

    #[test]
    fn hex_formatting() {
        assert_eq!(format!("{:x}", Bitboard::from(0x0123456789abcdef)), "123456789abcdef");
        assert_eq!(format!("{:016X}", Bitboard::from(0x0123456789ABCDEF)), "0123456789ABCDEF");
    }
}
