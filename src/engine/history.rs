//! History heuristic for ordering moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::collections::VecDeque;
use std::convert::TryFrom;
use crate::chess::{MoveRecord, Square};
use crate::chess::moves::sort_by_evaluation;

type Counters = [[u32; Square::COUNT]; Square::COUNT];

/// Weight of the counter on the move's own ply, relative to the counters two plies away
const OWN_PLY_WEIGHT: u64 = 4;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// Counts of the moves that caused cutoffs, by origin and destination, for a window of plies.
///
/// The window starts one ply before the current ply and holds `depth + 2` plies, so it covers
/// everything a search of `depth` plies can reach. Counters two plies apart belong to the same
/// player and contribute to each other's scores.
#[derive(Debug, Clone)]
pub struct MoveOrderingHistory {
    slices: VecDeque<Box<Counters>>,
    current_ply: usize,
}

impl MoveOrderingHistory {
    /// Creates an empty history for searches of up to `depth` plies, starting at ply 1
    pub fn new(depth: usize) -> MoveOrderingHistory {
        MoveOrderingHistory {
            slices: (0..depth + 2).map(|_| Self::empty_slice()).collect(),
            current_ply: 1,
        }
    }

    fn empty_slice() -> Box<Counters> {
        Box::new([[0; Square::COUNT]; Square::COUNT])
    }

    fn slot(&self, ply: usize) -> Option<usize> {
        (ply + 1).checked_sub(self.current_ply).filter(|&slot| slot < self.slices.len())
    }

    /// Returns the ply the window is positioned at
    pub fn current_ply(&self) -> usize {
        self.current_ply
    }

    /// Returns the number of plies in the window
    pub fn window(&self) -> usize {
        self.slices.len()
    }

    /// Records a cutoff caused by `record`. Moves outside the window are ignored.
    pub fn add_move(&mut self, record: &MoveRecord) {
        if let Some(slot) = self.slot(record.ply()) {
            let counter = &mut self.slices[slot][record.origin() as usize][record.destination() as usize];
            *counter = counter.saturating_add(1);
        }
    }

    /// Moves the window forward by one ply, dropping the oldest ply and adding an empty one
    pub fn increment_ply(&mut self) {
        self.current_ply += 1;
        self.slices.pop_front();
        self.slices.push_back(Self::empty_slice());
    }

    /// Scores `record` from the cutoffs recorded for the same origin and destination on its own
    /// ply and on the plies two away from it.
    pub fn score(&self, record: &MoveRecord) -> u64 {
        let own = match self.slot(record.ply()) {
            Some(slot) => slot,
            None => return 0,
        };
        let (orig, dest) = (record.origin() as usize, record.destination() as usize);
        let count = |slot: usize| u64::from(self.slices[slot][orig][dest]);

        let mut score = OWN_PLY_WEIGHT * count(own);
        if own >= 2 {
            score += count(own - 2);
        }
        if own + 2 < self.slices.len() {
            score += count(own + 2);
        }

        score
    }

    /// Sets each record's evaluation to its score and sorts the highest scores first
    pub fn sort_moves(&self, records: &mut [MoveRecord]) {
        for record in records.iter_mut() {
            record.set_evaluation(i32::try_from(self.score(record)).unwrap_or(i32::max_value()));
        }
        sort_by_evaluation(records);
    }

    /// Resets every counter, keeping the current ply
    pub fn clear(&mut self) {
        for slice in self.slices.iter_mut() {
            **slice = [[0; Square::COUNT]; Square::COUNT];
        }
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::Position;

    fn record_at(moves: &[&str], text: &str) -> MoveRecord {
        let mut pos = Position::new();
        for m in moves {
            pos.play(m).unwrap();
        }
        pos.parse_move(text).unwrap()
    }

    #[test]
    fn new_history_is_empty() {
        let history = MoveOrderingHistory::new(4);
        assert_eq!(history.window(), 6);
        assert_eq!(history.current_ply(), 1);
        assert_eq!(history.score(&record_at(&[], "e4")), 0);
    }

    #[test]
    fn own_ply_weighs_four_times() {
        let mut history = MoveOrderingHistory::new(4);
        let e4 = record_at(&[], "e4");
        history.add_move(&e4);
        history.add_move(&e4);
        assert_eq!(history.score(&e4), 8);
        assert_eq!(history.score(&record_at(&[], "d4")), 0);
    }

    #[test]
    fn same_player_plies_contribute() {
        let mut history = MoveOrderingHistory::new(4);
        let nf3_first = record_at(&[], "Nf3");
        let nf3_third = record_at(&["e4", "e5"], "Nf3");
        assert_eq!(nf3_third.ply(), 3);

        history.add_move(&nf3_first);
        assert_eq!(history.score(&nf3_third), 1);
        assert_eq!(history.score(&nf3_first), 4);
    }

    #[test]
    fn shift_keeps_scores_of_moves_still_in_the_window() {
        let mut history = MoveOrderingHistory::new(4);
        let later = record_at(&["e4", "e5"], "Nf3");
        history.add_move(&later);
        let before = history.score(&later);

        history.increment_ply();
        assert_eq!(history.current_ply(), 2);
        assert_eq!(history.score(&later), before);

        // recording the same move again after the shift adds the same contribution
        history.add_move(&later);
        assert_eq!(history.score(&later), 2 * before);
    }

    #[test]
    fn moves_outside_the_window_are_ignored() {
        let mut history = MoveOrderingHistory::new(0);
        let far = record_at(&["e4", "e5", "Nf3"], "Nc6");
        assert_eq!(far.ply(), 4);
        history.add_move(&far);
        assert_eq!(history.score(&far), 0);

        let first = record_at(&[], "e4");
        history.add_move(&first);
        history.increment_ply();
        history.increment_ply();
        assert_eq!(history.score(&first), 0);
    }

    #[test]
    fn sort_moves_puts_cutoff_moves_first() {
        let mut history = MoveOrderingHistory::new(2);
        let pos = Position::new();
        let mut moves = pos.legal_moves();
        let d4 = pos.parse_move("d4").unwrap();
        let nc3 = pos.parse_move("Nc3").unwrap();
        for _ in 0..3 {
            history.add_move(&d4);
        }
        history.add_move(&nc3);

        history.sort_moves(&mut moves);
        assert_eq!(moves[0].to_san(&pos), "d4");
        assert_eq!(moves[0].evaluation(), 12);
        assert_eq!(moves[1].to_san(&pos), "Nc3");
        assert!(moves[2..].iter().all(|m| m.evaluation() == 0));
    }

    #[test]
    fn clear_resets_counters() {
        let mut history = MoveOrderingHistory::new(2);
        let e4 = record_at(&[], "e4");
        history.add_move(&e4);
        history.increment_ply();
        history.clear();
        assert_eq!(history.score(&e4), 0);
        assert_eq!(history.current_ply(), 2);
    }
}
