//! Contains structure and data for Zobrist hash keys
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::fmt;
use std::sync::Arc;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use super::*;

/// Seed used when no other seed is configured
pub const DEFAULT_SEED: u64 = 42;

const PIECE_CODES: usize = Piece::COUNT * Color::COUNT;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Random keys for every piece placement, every board state and the side to move.
///
/// Keys are drawn from a seeded generator, so the same seed always gives the same keys. They are
/// immutable once built and are meant to be shared between positions through an `Arc`.
pub struct ZobristKeys {
    pieces: Vec<u64>,
    states: Vec<u64>,
    turn: u64,
}

impl ZobristKeys {
    /// Draws a new set of keys from a generator seeded with `seed`
    pub fn new(seed: u64) -> ZobristKeys {
        let mut rng = StdRng::seed_from_u64(seed);

        let pieces = (0..PIECE_CODES * Square::COUNT).map(|_| rng.gen()).collect();
        let states = (0..BoardState::COUNT).map(|_| rng.gen()).collect();
        let turn = rng.gen();

        ZobristKeys { pieces, states, turn }
    }

    /// Returns the key for a piece of color `c` and type `p` on `sq`
    #[inline]
    pub fn piece(&self, c: Color, p: Piece, sq: Square) -> u64 {
        self.pieces[p.code(c) * Square::COUNT + sq as usize]
    }

    /// Returns the key for a board state
    #[inline]
    pub fn state(&self, state: BoardState) -> u64 {
        self.states[state.bits() as usize]
    }

    /// Returns the key toggled whenever the side to move changes
    #[inline]
    pub fn turn(&self) -> u64 {
        self.turn
    }

    /// Computes the hash of `pos` from scratch.
    ///
    /// This is the XOR of the key of every piece on the board, the key of the board state and, if
    /// Black is to move, the turn key.
    pub fn full_hash<L: PositionListener>(&self, pos: &Position<L>) -> u64 {
        let mut hash = self.state(pos.state());

        for &c in [White, Black].iter() {
            for &p in Piece::ALL.iter() {
                for sq in pos.pieces(c, p) {
                    hash ^= self.piece(c, p, sq);
                }
            }
        }

        if pos.turn() == Black {
            hash ^= self.turn;
        }

        hash
    }
}

impl Default for ZobristKeys {
    fn default() -> Self {
        ZobristKeys::new(DEFAULT_SEED)
    }
}

impl fmt::Debug for ZobristKeys {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ZobristKeys")
            .field("turn", &format_args!("{:#018x}", self.turn))
            .finish()
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A `PositionListener` which keeps a running Zobrist hash of the position it is attached to
#[derive(Debug, Clone)]
pub struct ZobristHasher {
    keys: Arc<ZobristKeys>,
    hash: u64,
}

impl ZobristHasher {
    /// Creates a hasher describing an empty board with White to move
    pub fn new(keys: Arc<ZobristKeys>) -> ZobristHasher {
        let hash = keys.state(BoardState::default());
        ZobristHasher { keys, hash }
    }

    /// Returns the running hash
    pub fn hash(&self) -> u64 {
        self.hash
    }

    /// Returns the keys the hash is built from
    pub fn keys(&self) -> &Arc<ZobristKeys> {
        &self.keys
    }
}

impl PartialEq for ZobristHasher {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
    }
}

impl Eq for ZobristHasher { }

impl PositionListener for ZobristHasher {
    fn on_add(&mut self, c: Color, p: Piece, sq: Square) {
        self.hash ^= self.keys.piece(c, p, sq);
    }

    fn on_remove(&mut self, c: Color, p: Piece, sq: Square) {
        self.hash ^= self.keys.piece(c, p, sq);
    }

    fn on_state_change(&mut self, old: BoardState, new: BoardState) {
        self.hash ^= self.keys.state(old) ^ self.keys.state(new);
    }

    fn on_turn_change(&mut self) {
        self.hash ^= self.keys.turn;
    }

    fn fingerprint(&self) -> u64 {
        self.hash
    }
}

/// A `Position` which keeps its Zobrist hash current with every change
pub type HashedPosition = Position<ZobristHasher>;

impl Position<ZobristHasher> {
    /// Returns the standard starting position, hashed with `keys`
    pub fn with_hasher(keys: Arc<ZobristKeys>) -> HashedPosition {
        Position::start_with(ZobristHasher::new(keys))
    }

    /// Parses a FEN string into a position hashed with `keys`
    pub fn from_fen_hashed(s: &str, keys: Arc<ZobristKeys>) -> Result<HashedPosition> {
        Position::from_fen_with(s, ZobristHasher::new(keys))
    }

    /// Returns the incrementally maintained hash
    pub fn hash(&self) -> u64 {
        self.listener().hash()
    }

    /// Recomputes the hash from scratch. It always equals [`hash`](#method.hash).
    pub fn full_hash(&self) -> u64 {
        self.listener().keys().full_hash(self)
    }

    /// Returns `true` if moves have produced the current position at least `limit` times, judged
    /// by the hashes stored on the move history. The move that produced it just now counts.
    pub fn is_repetition(&self, limit: usize) -> bool {
        let hash = self.hash();
        let count = self.history().iter().filter(|m| m.hash() == hash).count();
        count >= limit
    }
}
