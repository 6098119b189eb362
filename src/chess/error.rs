//! Defines the error types needed by the chess module
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Error type used by methods in the `chess` module
///
/// None of these errors leave a `Position` modified: moves are parsed and validated before
/// anything is applied to the board.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Error {
    /// Cannot parse string
    ParseError,
    /// Failed to convert an integer to an another type
    TryFromIntError,
    /// Move text is empty
    EmptyMove,
    /// Move text has characters that don't fit the move notation
    MalformedMove,
    /// A square name is not a file letter followed by a rank digit
    InvalidSquare,
    /// Piece letter is not one of `K`, `Q`, `R`, `B`, `N` or `P`
    UnknownPiece,
    /// Pawns may only promote to a queen, rook, bishop or knight
    InvalidPromotion,
    /// No piece of the stated type can reach the destination
    NoPieceCanReach,
    /// More than one piece can reach the destination and the move text doesn't say which
    AmbiguousMove,
    /// The move would leave the mover's own king in check
    KingInCheck,
    /// Illegal move
    IllegalMove,
    /// Missing king or multiple kings of the same color
    InvalidKingCount,
    /// Pawn on first or last rank
    InvalidPawnRank,
    /// Player can capture opponent's king
    KingCapturable,
    /// Castling flags aren't valid for this position
    InvalidCastlingFlags,
    /// En-passant square without capturable pawn, or with a piece on it
    InvalidEnPassant,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Error::*;

        match self {
            ParseError => "cannot parse string",
            TryFromIntError => "integer out of range",
            EmptyMove => "move is empty",
            MalformedMove => "superfluous characters in move text",
            InvalidSquare => "invalid square name",
            UnknownPiece => "invalid piece type",
            InvalidPromotion => "can only promote to queen, rook, bishop, or knight",
            NoPieceCanReach => "no piece of this type can move to the specified square",
            AmbiguousMove => "ambiguous move",
            KingInCheck => "illegal move: king is in check",
            IllegalMove => "illegal move",
            InvalidKingCount => "missing king or multiple kings of the same color",
            InvalidPawnRank => "pawn on first or last rank",
            KingCapturable => "king is under attack on opponent's move",
            InvalidCastlingFlags => "castling flags aren't valid for this position",
            InvalidEnPassant => "en-passant square without capturable pawn",
        }.fmt(f)
    }
}

impl std::error::Error for Error { }

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Result type used by methods in the `chess` module
pub type Result<T> = std::result::Result<T, Error>;
