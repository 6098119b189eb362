//! Contains structures related to the `Position`
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::convert::TryFrom;
use super::*;

use bitboard::*;

use Color::*;
use Piece::*;

mod state;
mod movegen;
mod fen;
pub mod zobrist;

pub use state::{BoardState, CastleSide};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Receives every change made to a `Position`.
///
/// A listener is attached to a position when it is created and must, at that moment, describe an
/// empty board with White to move and a default board state; the position then reports every
/// piece it places. All methods default to doing nothing, which is what `()` does.
pub trait PositionListener: Clone {
    /// A piece of color `c` and type `p` was placed on `sq`
    fn on_add(&mut self, _c: Color, _p: Piece, _sq: Square) { }

    /// A piece of color `c` and type `p` was removed from `sq`
    fn on_remove(&mut self, _c: Color, _p: Piece, _sq: Square) { }

    /// The board state changed from `old` to `new`
    fn on_state_change(&mut self, _old: BoardState, _new: BoardState) { }

    /// The side to move changed
    fn on_turn_change(&mut self) { }

    /// A value identifying the current position, stored on each move record once it is made
    fn fingerprint(&self) -> u64 {
        0
    }
}

impl PositionListener for () { }

// squares strictly between king and rook
const CASTLE_SPACE: [[u64; 2]; Color::COUNT] = [
    [0x0000_0000_0000_0060, 0x0000_0000_0000_000e],
    [0x6000_0000_0000_0000, 0x0e00_0000_0000_0000],
];
// the king's square and the squares it passes through or lands on
const CASTLE_KING_PATH: [[u64; 2]; Color::COUNT] = [
    [0x0000_0000_0000_0070, 0x0000_0000_0000_001c],
    [0x7000_0000_0000_0000, 0x1c00_0000_0000_0000],
];

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of the arrangement of pieces on the board at a given point in the game, as well
/// as castling history, en passant legality and the moves that led here.
///
/// Pieces are stored as six type-masks and two color-masks. They change only through
/// [`add_piece`](#method.add_piece) and [`remove_piece`](#method.remove_piece), which keeps the
/// masks consistent and lets the attached [`PositionListener`](trait.PositionListener.html) see
/// every change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position<L = ()> {
    by_piece: [Bitboard; Piece::COUNT],
    by_color: [Bitboard; Color::COUNT],
    state: BoardState,
    ply: usize,
    history: Vec<MoveRecord>,
    listener: L,
}

impl Position {
    /// Returns the standard starting Position
    pub fn new() -> Position {
        Position::start_with(())
    }
}

impl<L: PositionListener> Position<L> {
    /// Returns an empty board with White to move on ply 1
    pub fn empty_with(listener: L) -> Position<L> {
        Position {
            by_piece: [Bitboard::new(); Piece::COUNT],
            by_color: [Bitboard::new(); Color::COUNT],
            state: BoardState::default(),
            ply: 1,
            history: Vec::new(),
            listener,
        }
    }

    /// Returns the standard starting position with `listener` attached
    pub fn start_with(listener: L) -> Position<L> {
        const BACK_RANK: [Piece; File::COUNT] = [Rook, Knight, Bishop, Queen, King, Bishop, Knight, Rook];

        let mut pos = Position::empty_with(listener);
        for (f, &piece) in BACK_RANK.iter().enumerate() {
            let file = File::try_from(f).expect("INFALLIBLE");
            pos.add_piece(Square::from_coord(file, Rank::R1), White, piece);
            pos.add_piece(Square::from_coord(file, Rank::R2), White, Pawn);
            pos.add_piece(Square::from_coord(file, Rank::R7), Black, Pawn);
            pos.add_piece(Square::from_coord(file, Rank::R8), Black, piece);
        }

        pos
    }

    /// Returns a copy of the board, state and ply, without the move history or the listener.
    ///
    /// This is the cheap clone used for speculative lines of play.
    pub fn snapshot(&self) -> Position {
        Position {
            by_piece: self.by_piece,
            by_color: self.by_color,
            state: self.state,
            ply: self.ply,
            history: Vec::new(),
            listener: (),
        }
    }

    /// Returns the attached listener
    pub fn listener(&self) -> &L {
        &self.listener
    }

    /// Places a piece on an empty square.
    ///
    /// Placing a piece on an occupied square is a bug in the caller; it is only checked in debug
    /// builds.
    pub fn add_piece(&mut self, sq: Square, c: Color, p: Piece) {
        debug_assert!(!self.occupied().contains(sq), "add_piece: {} is occupied", sq);

        self.by_piece[p as usize].insert(sq);
        self.by_color[c as usize].insert(sq);
        self.listener.on_add(c, p, sq);
    }

    /// Removes a piece from its square.
    ///
    /// Removing a piece which isn't there is a bug in the caller; it is only checked in debug
    /// builds.
    pub fn remove_piece(&mut self, sq: Square, c: Color, p: Piece) {
        debug_assert!(self.pieces(c, p).contains(sq), "remove_piece: no {}{} on {}", c, p, sq);

        self.by_piece[p as usize].remove(sq);
        self.by_color[c as usize].remove(sq);
        self.listener.on_remove(c, p, sq);
    }

    /// Replaces the board state
    pub(crate) fn set_state(&mut self, state: BoardState) {
        let old = self.state;
        if old != state {
            self.state = state;
            self.listener.on_state_change(old, state);
        }
    }

    /// Sets the ply, notifying the listener if the side to move changes
    pub(crate) fn set_ply(&mut self, ply: usize) {
        debug_assert!(ply > 0);

        let old = self.ply;
        self.ply = ply;
        if old % 2 != ply % 2 {
            self.listener.on_turn_change();
        }
    }

    /// Returns the pieces of color `c` and type `p`
    pub fn pieces(&self, c: Color, p: Piece) -> Bitboard {
        self.by_piece[p as usize] & self.by_color[c as usize]
    }

    /// Returns all pieces of type `p`, regardless of color
    pub fn type_mask(&self, p: Piece) -> Bitboard {
        self.by_piece[p as usize]
    }

    /// Returns all pieces of color `c`
    pub fn color_mask(&self, c: Color) -> Bitboard {
        self.by_color[c as usize]
    }

    /// Returns all occupied squares
    pub fn occupied(&self) -> Bitboard {
        self.by_color[White as usize] | self.by_color[Black as usize]
    }

    /// Returns the color of the piece on `sq`, if any
    pub fn piece_color_at(&self, sq: Square) -> Option<Color> {
        [White, Black].iter().cloned().find(|&c| self.by_color[c as usize].contains(sq))
    }

    /// Returns the type of the piece on `sq`, if any
    pub fn piece_type_at(&self, sq: Square) -> Option<Piece> {
        Piece::ALL.iter().cloned().find(|&p| self.by_piece[p as usize].contains(sq))
    }

    /// Returns the color and type of piece, if any, at the given location
    pub fn piece_at(&self, sq: Square) -> Option<(Color, Piece)> {
        match (self.piece_color_at(sq), self.piece_type_at(sq)) {
            (Some(c), Some(p)) => Some((c, p)),
            _ => None,
        }
    }

    /// Returns the square of the king of color `c`, or `None` on a board without one
    pub fn king_square(&self, c: Color) -> Option<Square> {
        self.pieces(c, King).peek()
    }

    /// Returns the board state
    pub fn state(&self) -> BoardState {
        self.state
    }

    /// Returns the current ply. The first move of the game is played on ply 1.
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Returns the full-move number, as used in FEN and move lists
    pub fn move_number(&self) -> usize {
        (self.ply + 1) / 2
    }

    /// Returns the color whose turn it is
    pub fn turn(&self) -> Color {
        Color::from_ply(self.ply)
    }

    /// Returns the moves made on this position, oldest first
    pub fn history(&self) -> &[MoveRecord] {
        &self.history
    }

    /// Returns the most recent move, if any
    pub fn last_move(&self) -> Option<&MoveRecord> {
        self.history.last()
    }

    /// Returns `true` if the last move was a double pawn push
    pub fn last_move_is_double_pawn_push(&self) -> bool {
        self.state.is_double_pawn_push()
    }

    /// Returns the square a pawn lands on when capturing en passant, if that is possible
    pub fn en_passant_destination(&self) -> Option<Square> {
        let rank = if self.turn() == White { Rank::R6 } else { Rank::R3 };
        self.state.en_passant_file().map(|f| Square::from_coord(f, rank))
    }

    /// Returns the square of the pawn which may be captured en passant, if any
    pub fn en_passant_capture_square(&self) -> Option<Square> {
        let rank = if self.turn() == White { Rank::R5 } else { Rank::R4 };
        self.state.en_passant_file().map(|f| Square::from_coord(f, rank))
    }

    /// Returns `true` if the king or the rook needed for castling on `side` has moved
    pub fn castle_pieces_have_moved(&self, c: Color, side: CastleSide) -> bool {
        self.state.castle_pieces_moved(c, side)
    }

    /// Returns `true` if there are no pieces between the king and rook on `side`
    pub fn castle_space_is_empty(&self, c: Color, side: CastleSide) -> bool {
        self.occupied().is_disjoint(CASTLE_SPACE[c as usize][side as usize].into())
    }

    /// Returns `true` if the king of color `c` is in check or would pass through or land on an
    /// attacked square when castling on `side`.
    ///
    /// Only the king's path is tested, not the whole castle space: the rook's square and the
    /// b-file square on the queen side may be attacked.
    pub fn castle_space_or_king_attacked(&self, c: Color, side: CastleSide) -> bool {
        Bitboard::from(CASTLE_KING_PATH[c as usize][side as usize])
            .into_iter()
            .any(|sq| self.is_attacked(sq, c))
    }

    /// Returns `true` if color `c` may castle on `side` right now
    pub fn can_castle(&self, c: Color, side: CastleSide) -> bool {
        let home = c.home_rank();

        !self.castle_pieces_have_moved(c, side)
            && self.pieces(c, King).contains(Square::from_coord(File::E, home))
            && self.pieces(c, Rook).contains(Square::from_coord(side.rook_origin(), home))
            && self.castle_space_is_empty(c, side)
            && !self.castle_space_or_king_attacked(c, side)
    }

    /// Returns `true` if `sq` is attacked by the opponent of `defender`.
    ///
    /// Each piece type of the defending color is placed on `sq` in turn: if it could move to a
    /// square holding an enemy piece of the same type, that enemy piece attacks `sq`.
    pub fn is_attacked(&self, sq: Square, defender: Color) -> bool {
        let attacker = !defender;
        let occ = self.occupied();

        king_attacks(sq).intersects(self.pieces(attacker, King))
            || knight_attacks(sq).intersects(self.pieces(attacker, Knight))
            || pawn_attacks(sq, defender).intersects(self.pieces(attacker, Pawn))
            || bishop_attacks(sq, occ).intersects(self.pieces(attacker, Bishop))
            || rook_attacks(sq, occ).intersects(self.pieces(attacker, Rook))
            || queen_attacks(sq, occ).intersects(self.pieces(attacker, Queen))
    }

    /// Returns `true` if the king of color `c` is attacked
    pub fn in_check(&self, c: Color) -> bool {
        match self.king_square(c) {
            Some(sq) => self.is_attacked(sq, c),
            None => false,
        }
    }

    /// Returns `false` if neither side can possibly deliver checkmate, so the game is a draw.
    ///
    /// Any queen, rook or pawn is enough, as are two bishops or a bishop and a knight on the same
    /// side.
    pub fn sufficient_material_to_checkmate(&self) -> bool {
        if !(self.type_mask(Queen) | self.type_mask(Rook) | self.type_mask(Pawn)).is_empty() {
            return true;
        }

        [White, Black].iter().any(|&c| {
            let bishops = self.pieces(c, Bishop).len();
            bishops >= 2 || (bishops >= 1 && !self.pieces(c, Knight).is_empty())
        })
    }

    /// Applies `record` to the board, appends it to the history and advances the ply.
    ///
    /// The record must have been built for this position; the listener's fingerprint of the
    /// resulting position is stored on it.
    pub fn make_move(&mut self, record: MoveRecord) {
        record.make(self);
        self.history.push(record);
        self.set_ply(self.ply + 1);

        let fingerprint = self.listener.fingerprint();
        if let Some(last) = self.history.last_mut() {
            last.set_hash(fingerprint);
        }
    }

    /// Reverses the last move and returns it, or returns `None` if no moves have been made
    pub fn undo_last_move(&mut self) -> Option<MoveRecord> {
        let record = self.history.pop()?;
        self.set_ply(self.ply - 1);
        record.undo(self);

        Some(record)
    }

    /// Parses `text` as a move in algebraic notation for the side to move
    pub fn parse_move(&self, text: &str) -> Result<MoveRecord> {
        MoveRecord::from_san(self, text)
    }

    /// Parses `text` and plays it. The position is unchanged if the move can't be parsed or is
    /// illegal.
    pub fn play(&mut self, text: &str) -> Result<()> {
        let record = self.parse_move(text)?;
        self.make_move(record);
        Ok(())
    }

    /// Returns the moves played so far in algebraic notation, oldest first
    pub fn history_text(&self) -> Vec<String> {
        let mut pos = Position {
            history: self.history.clone(),
            ..self.snapshot()
        };
        let mut text = Vec::with_capacity(self.history.len());

        while let Some(record) = pos.undo_last_move() {
            text.push(record.to_san(&pos));
        }

        text.reverse();
        text
    }
}

impl Default for Position {
    /// Returns the standard starting Position
    fn default() -> Self {
        Position::new()
    }
}

impl<L: PositionListener> fmt::Display for Position<L> {
    /// Writes out the position using FEN
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.to_fen_str().fmt(f)
    }
}
