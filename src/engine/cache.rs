//! The result cache: search results keyed by position hash
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::HashMap;
use std::convert::TryFrom;
use std::num::NonZeroU16;
use log::debug;
use serde::{Deserialize, Serialize};
use crate::chess::{Error, MoveRecord, Piece, Position, PositionListener, Result, Square};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A representation of a move that fits in 16 bits.
///
/// `Option<CachedMove>` is also guaranteed to be only 16 bits.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct CachedMove(NonZeroU16);

impl CachedMove {
    /// Returns the square the piece moves from
    pub fn origin(self) -> Square {
        Square::try_from(((self.0.get() >> 9) & 0o77) as usize).expect("INFALLIBLE")
    }

    /// Returns the square the piece moves to
    pub fn destination(self) -> Square {
        Square::try_from(((self.0.get() >> 3) & 0o77) as usize).expect("INFALLIBLE")
    }

    /// Returns the piece promoted to, if any
    pub fn promotion(self) -> Option<Piece> {
        match self.0.get() & 0o7 {
            1 => Some(Piece::Knight),
            2 => Some(Piece::Bishop),
            3 => Some(Piece::Rook),
            4 => Some(Piece::Queen),
            _ => None,
        }
    }

    /// Rebuilds the move as a record for `pos`, provided it is legal there.
    ///
    /// Two positions can share a hash, so a cached move is never trusted blindly.
    pub fn to_record<L: PositionListener>(self, pos: &Position<L>) -> Result<MoveRecord> {
        let (orig, dest) = (self.origin(), self.destination());
        if !pos.pseudo_legal_targets(orig).contains(dest) {
            return Err(Error::IllegalMove);
        }

        let record = match self.promotion() {
            Some(promotion) => MoveRecord::with_promotion(pos, orig, dest, promotion)?,
            None => MoveRecord::new(pos, orig, dest)?,
        };
        if record.kind().is_promotion() != self.promotion().is_some() || !pos.is_legal(&record) {
            return Err(Error::IllegalMove);
        }

        Ok(record)
    }
}

impl From<&MoveRecord> for CachedMove {
    fn from(record: &MoveRecord) -> CachedMove {
        let promotion = match record.kind().promotion_piece() {
            Some(Piece::Knight) => 1,
            Some(Piece::Bishop) => 2,
            Some(Piece::Rook) => 3,
            Some(Piece::Queen) => 4,
            _ => 0,
        };

        // origin and destination always differ, so the value is never zero
        CachedMove(NonZeroU16::new(
            ((record.origin() as u16) << 9)
            | ((record.destination() as u16) << 3)
            | promotion
        ).expect("INFALLIBLE"))
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// How a cached score relates to the true value of the position.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreType {
    /// The score is the exact value
    Exact,
    /// The search failed high: the true value is at least the score
    FailHigh,
    /// The search failed low: the true value is at most the score
    FailLow,
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// An entry in the result cache.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    score: i32,
    depth: usize,
    best_move: Option<CachedMove>,
    serial: u64,
    score_type: ScoreType,
}

impl CacheEntry {
    /// Creates an entry. Its serial is assigned when it is stored.
    pub fn new(score: i32, depth: usize, score_type: ScoreType, best_move: Option<&MoveRecord>)
        -> CacheEntry
    {
        CacheEntry {
            score,
            depth,
            best_move: best_move.map(CachedMove::from),
            serial: 0,
            score_type,
        }
    }

    /// Returns the score found by the search
    pub fn score(&self) -> i32 {
        self.score
    }

    /// Returns the depth the position was searched to
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the best move found, if any
    pub fn best_move(&self) -> Option<CachedMove> {
        self.best_move
    }

    /// Returns the value of the cache's counter when this entry was last stored or read
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Returns how the score should be interpreted
    pub fn score_type(&self) -> ScoreType {
        self.score_type
    }

    /// Returns the score if it can stand in for a search of `depth` with the window
    /// `alpha..beta`: the entry must be at least that deep, and a bound must fall outside the
    /// window on its own side.
    pub fn usable_score(&self, depth: usize, alpha: i32, beta: i32) -> Option<i32> {
        if self.depth < depth {
            return None;
        }

        match self.score_type {
            ScoreType::Exact => Some(self.score),
            ScoreType::FailHigh if self.score >= beta => Some(self.score),
            ScoreType::FailLow if self.score <= alpha => Some(self.score),
            _ => None,
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Sizing and eviction settings for a `ResultCache`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheConfig {
    /// The most entries the cache holds
    pub capacity: usize,
    /// How many recency buckets the observed serial range is split into
    pub buckets: u64,
    /// How many of the oldest buckets are open to eviction
    pub evict_buckets: u64,
    /// How many of the deepest search levels are protected from eviction
    pub protected_levels: usize,
    /// The deepest search depth in use
    pub max_depth: usize,
}

impl Default for CacheConfig {
    fn default() -> Self {
        CacheConfig {
            capacity: 20_000_000,
            buckets: 9,
            evict_buckets: 7,
            protected_levels: 2,
            max_depth: 6,
        }
    }
}

impl CacheConfig {
    /// Entries searched shallower than this are not protected
    pub fn protected_depth(&self) -> usize {
        self.max_depth.saturating_sub(self.protected_levels)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Search results keyed by position hash, with a bounded size.
///
/// Every `get` hit and every `put` advances a counter and stamps the entry with it, so serials
/// track approximate recency. When a new key would push the cache past its capacity, entries are
/// evicted oldest-and-shallowest first:
///
/// 1. The serials from the oldest entry up to the counter are split into `buckets` equal ranges
///    (boundaries rounded down). Entries in the oldest `evict_buckets` ranges that are shallower
///    than the protected depth are removed.
/// 2. If the cache is still full, every shallow entry is removed.
/// 3. If it is still full, old entries are removed regardless of depth.
/// 4. If the cache is still full, the single oldest entry is removed.
#[derive(Debug)]
pub struct ResultCache {
    entries: HashMap<u64, CacheEntry>,
    serial: u64,
    config: CacheConfig,
}

impl ResultCache {
    /// Creates an empty cache
    pub fn new(config: CacheConfig) -> ResultCache {
        debug_assert!(config.capacity > 0);
        debug_assert!(config.evict_buckets <= config.buckets && config.buckets > 0);

        ResultCache {
            entries: HashMap::new(),
            serial: 0,
            config,
        }
    }

    /// Returns the entry stored for `hash`, marking it as recently used
    pub fn get(&mut self, hash: u64) -> Option<CacheEntry> {
        let serial = &mut self.serial;
        self.entries.get_mut(&hash).map(|entry| {
            *serial += 1;
            entry.serial = *serial;
            *entry
        })
    }

    /// Stores `entry` for `hash`, replacing any previous entry
    pub fn put(&mut self, hash: u64, mut entry: CacheEntry) {
        self.serial += 1;
        entry.serial = self.serial;

        if !self.entries.contains_key(&hash) && self.entries.len() >= self.config.capacity {
            self.evict();
        }
        self.entries.insert(hash, entry);
    }

    /// Returns the number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if there are no entries
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the most entries the cache holds
    pub fn capacity(&self) -> usize {
        self.config.capacity
    }

    /// Returns the current value of the recency counter
    pub fn serial(&self) -> u64 {
        self.serial
    }

    /// Returns the settings the cache was created with
    pub fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Removes every entry. The recency counter keeps counting.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    fn evict(&mut self) {
        let before = self.entries.len();
        let oldest = self.entries.values().map(|e| e.serial).min().unwrap_or(self.serial);
        let span = self.serial - oldest + 1;
        let old_limit = oldest + span * self.config.evict_buckets / self.config.buckets;
        let protected = self.config.protected_depth();
        let capacity = self.config.capacity;

        self.entries.retain(|_, e| e.serial >= old_limit || e.depth >= protected);
        if self.entries.len() >= capacity {
            self.entries.retain(|_, e| e.depth >= protected);
        }
        if self.entries.len() >= capacity {
            self.entries.retain(|_, e| e.serial >= old_limit);
        }
        if self.entries.len() >= capacity {
            let stalest = self.entries.iter().min_by_key(|(_, e)| e.serial).map(|(&k, _)| k);
            if let Some(hash) = stalest {
                self.entries.remove(&hash);
            }
        }

        debug!("result cache evicted {} of {} entries (serials before {} and depth below {} first)",
            before - self.entries.len(), before, old_limit, protected);
    }
}

impl Default for ResultCache {
    fn default() -> Self {
        ResultCache::new(CacheConfig::default())
    }
}
