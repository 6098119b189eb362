//! Opening book lookups: aggregate game results for the moves that follow a sequence of moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::cmp::Ordering;
use std::collections::HashMap;
use log::{debug, warn};
use serde::{Deserialize, Serialize};
use crate::chess::{Color, MoveRecord, Position, PositionListener};

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The results of the games in which `movetext` was played. `wins` counts games White won and
/// `losses` games Black won.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResults {
    /// The move in SAN
    pub movetext: String,
    /// Games won by White
    #[serde(default)]
    pub wins: u32,
    /// Games won by Black
    #[serde(default)]
    pub losses: u32,
    /// Drawn games
    #[serde(default)]
    pub draws: u32,
}

impl MoveResults {
    /// Creates a new set of results
    pub fn new(movetext: &str, wins: u32, losses: u32, draws: u32) -> MoveResults {
        MoveResults { movetext: movetext.to_string(), wins, losses, draws }
    }

    /// Returns the number of games
    pub fn games(&self) -> u64 {
        u64::from(self.wins) + u64::from(self.losses) + u64::from(self.draws)
    }

    /// Returns the points scored by `color`, counted in half points
    pub fn half_points(&self, color: Color) -> u64 {
        let won = match color {
            Color::White => self.wins,
            Color::Black => self.losses,
        };
        2 * u64::from(won) + u64::from(self.draws)
    }

    /// Compares the fraction of points `color` scored after each move. Moves never played rank
    /// lowest.
    pub fn cmp_for(&self, other: &MoveResults, color: Color) -> Ordering {
        match (self.games(), other.games()) {
            (0, 0) => Ordering::Equal,
            (0, _) => Ordering::Less,
            (_, 0) => Ordering::Greater,
            (games, other_games) => (self.half_points(color) * other_games)
                .cmp(&(other.half_points(color) * games)),
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A read-only source of opening statistics
pub trait OpeningBook {
    /// Returns the results of every move played after the moves in `prefix`, which are in SAN.
    /// An empty list means the sequence is not in the book.
    fn lookup(&self, prefix: &[String]) -> Vec<MoveResults>;
}

/// An opening book held in memory, keyed by the space-separated moves leading to each position.
/// The starting position's key is the empty string.
///
/// In YAML, a book looks like:
///
/// ```yaml
/// "":
///   - { movetext: e4, wins: 30, losses: 20, draws: 10 }
///   - { movetext: d4, wins: 25, losses: 15, draws: 20 }
/// "e4":
///   - { movetext: c5, wins: 10, losses: 12, draws: 5 }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MemoryBook {
    lines: HashMap<String, Vec<MoveResults>>,
}

impl MemoryBook {
    /// Creates an empty book
    pub fn new() -> MemoryBook {
        MemoryBook::default()
    }

    /// Reads a book from YAML
    pub fn from_yaml(s: &str) -> Result<MemoryBook, serde_yaml::Error> {
        serde_yaml::from_str(s)
    }

    /// Writes the book as YAML
    pub fn to_yaml(&self) -> Result<String, serde_yaml::Error> {
        serde_yaml::to_string(self)
    }

    /// Adds the results of `results.movetext` played after `prefix`, merging them with any results
    /// already recorded for that move
    pub fn insert(&mut self, prefix: &[&str], results: MoveResults) {
        let line = self.lines.entry(prefix.join(" ")).or_insert_with(Vec::new);
        match line.iter_mut().find(|r| r.movetext == results.movetext) {
            Some(existing) => {
                existing.wins += results.wins;
                existing.losses += results.losses;
                existing.draws += results.draws;
            },
            None => line.push(results),
        }
    }

    /// Returns the number of move sequences in the book
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Returns `true` if the book has no entries
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

impl OpeningBook for MemoryBook {
    fn lookup(&self, prefix: &[String]) -> Vec<MoveResults> {
        self.lines.get(&prefix.join(" ")).cloned().unwrap_or_default()
    }
}

/// Looks up the moves played so far in `book` and returns the legal move that scored best for
/// the side to move, or `None` if the book has nothing playable.
pub fn suggest_move<B, L>(book: &B, pos: &Position<L>) -> Option<MoveRecord>
where
    B: OpeningBook + ?Sized,
    L: PositionListener,
{
    let prefix = pos.history_text();
    let turn = pos.turn();
    let mut candidates = book.lookup(&prefix);
    debug!("opening book has {} moves after {:?}", candidates.len(), prefix);

    candidates.sort_by(|a, b| b.cmp_for(a, turn));
    candidates.iter().find_map(|results| match pos.parse_move(&results.movetext) {
        Ok(record) => Some(record),
        Err(err) => {
            warn!("opening book move {} after {:?}: {}", results.movetext, prefix, err);
            None
        },
    })
}
