//! Provides data and functions used to compute attacks
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

const KING_DELTAS: [(i32, i32); 8] = [
    (-1, -1), (0, -1), (1, -1), (-1, 0), (1, 0), (-1, 1), (0, 1), (1, 1),
];
const KNIGHT_DELTAS: [(i32, i32); 8] = [
    (-1, -2), (1, -2), (-2, -1), (2, -1), (-2, 1), (2, 1), (-1, 2), (1, 2),
];
const WHITE_PAWN_DELTAS: [(i32, i32); 2] = [(-1, 1), (1, 1)];
const BLACK_PAWN_DELTAS: [(i32, i32); 2] = [(-1, -1), (1, -1)];

const KING_ATTACKS: [u64; Square::COUNT] = leaper_table(&KING_DELTAS);
const KNIGHT_ATTACKS: [u64; Square::COUNT] = leaper_table(&KNIGHT_DELTAS);
const PAWN_ATTACKS: [[u64; Square::COUNT]; Color::COUNT] = [
    leaper_table(&WHITE_PAWN_DELTAS),
    leaper_table(&BLACK_PAWN_DELTAS),
];
const DIAGONAL_MASK: [u64; Square::COUNT] = line_table(1);
const ANTIDIAG_MASK: [u64; Square::COUNT] = line_table(-1);
const RANK_ATTACKS: [[u8; 64]; File::COUNT] = rank_table();

/// Builds a table of the squares reachable from each square by one of the `deltas` (file, rank)
const fn leaper_table(deltas: &[(i32, i32)]) -> [u64; Square::COUNT] {
    let mut table = [0; Square::COUNT];
    let mut sq = 0;
    while sq < Square::COUNT {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut i = 0;
        while i < deltas.len() {
            let f = file + deltas[i].0;
            let r = rank + deltas[i].1;
            if f >= 0 && f < 8 && r >= 0 && r < 8 {
                table[sq] |= 1 << (r * 8 + f);
            }
            i += 1;
        }
        sq += 1;
    }
    table
}

/// Builds the diagonal through each square: `slope` 1 for a1-h8 diagonals, -1 for a8-h1
const fn line_table(slope: i32) -> [u64; Square::COUNT] {
    let mut table = [0; Square::COUNT];
    let mut sq = 0;
    while sq < Square::COUNT {
        let file = (sq % 8) as i32;
        let rank = (sq / 8) as i32;
        let mut f = 0;
        while f < 8 {
            let r = rank + (f - file) * slope;
            if r >= 0 && r < 8 {
                table[sq] |= 1 << (r * 8 + f);
            }
            f += 1;
        }
        sq += 1;
    }
    table
}

/// Builds the attacks along a single rank, indexed by the slider's file and the occupancy of the
/// six inner squares (files b through g) of that rank
const fn rank_table() -> [[u8; 64]; File::COUNT] {
    let mut table = [[0; 64]; File::COUNT];
    let mut file = 0;
    while file < File::COUNT {
        let mut inner = 0;
        while inner < 64 {
            let occ = (inner << 1) as u8;
            let mut att = 0u8;

            let mut f = file + 1;
            while f < 8 {
                att |= 1 << f;
                if occ & (1 << f) != 0 {
                    break;
                }
                f += 1;
            }

            let mut f = file;
            while f > 0 {
                f -= 1;
                att |= 1 << f;
                if occ & (1 << f) != 0 {
                    break;
                }
            }

            table[file][inner] = att;
            inner += 1;
        }
        file += 1;
    }
    table
}

/// Attacks along a line holding at most one square per rank, using the byte-swap trick: reversing
/// the bytes of the mask reverses the order of the line's squares, so one subtraction finds the
/// nearest blocker in each direction.
fn line_attacks(sq: Square, occ: Bitboard, line: u64) -> Bitboard {
    let sq_mask = Bitboard::from(sq).0;
    let line_ex = line & !sq_mask;

    let masked = occ.0 & line_ex;
    let forward = masked.wrapping_sub(sq_mask);
    let reverse = masked.swap_bytes().wrapping_sub(sq_mask.swap_bytes());

    Bitboard((forward ^ reverse.swap_bytes()) & line_ex)
}

/// Computes attacks along the rank of `sq` based on the occupied squares given by `occ`
///
/// # Example
/// ```
/// use chesscore::chess::{Square, bitboard::*};
///
/// // rooks on a1 and h1
/// let rooks = Bitboard::from(Square::A1) | Square::H1.into();
/// // occupied squares (those on the first rank, anyway)
/// let occ = rooks | Square::D1.into() | Square::E1.into();
/// // rooks with no pieces between them and the king on e1
/// let mut visible_rooks = rank_attacks(Square::E1, occ) & rooks;
/// assert_eq!(visible_rooks.pop(), Some(Square::H1));
/// assert_eq!(visible_rooks.pop(), None);
/// ```
pub fn rank_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    let shift = sq.rank() as usize * 8;
    let inner = ((occ.0 >> (shift + 1)) & 0x3f) as usize;

    Bitboard(u64::from(RANK_ATTACKS[sq.file() as usize][inner]) << shift)
}

/// Computes attacks along the file of `sq` based on the occupied squares given by `occ`
pub fn file_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    line_attacks(sq, occ, Bitboard::from(sq.file()).0)
}

/// Computes knight-like attacks to or from `sq`
#[inline]
pub fn knight_attacks(sq: Square) -> Bitboard {
    Bitboard(KNIGHT_ATTACKS[sq as usize])
}

/// Computes the squares a pawn of color `c` on `sq` attacks.
///
/// Read the other way around, these are the squares from which a pawn of the opposite color
/// attacks `sq`.
#[inline]
pub fn pawn_attacks(sq: Square, c: Color) -> Bitboard {
    Bitboard(PAWN_ATTACKS[c as usize][sq as usize])
}

/// Computes bishop-like attacks to or from `sq` based on the occupied squares
/// given by `occ`
pub fn bishop_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    line_attacks(sq, occ, DIAGONAL_MASK[sq as usize])
        | line_attacks(sq, occ, ANTIDIAG_MASK[sq as usize])
}

/// Computes rook-like attacks to or from `sq` based on the occupied squares
/// given by `occ`
pub fn rook_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rank_attacks(sq, occ) | file_attacks(sq, occ)
}

/// Computes queen-like attacks to or from square based on the occupied squares
/// given by `occ`
#[inline]
pub fn queen_attacks(sq: Square, occ: Bitboard) -> Bitboard {
    rook_attacks(sq, occ) | bishop_attacks(sq, occ)
}

/// Computes king-like attacks to or from `sq`
#[inline]
pub fn king_attacks(sq: Square) -> Bitboard {
    Bitboard(KING_ATTACKS[sq as usize])
}
