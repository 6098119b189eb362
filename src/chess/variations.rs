//! Module for counting and printing the number of variations from a given position
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use crate::chess::*;

/// Print the number of variations of the given `depth` for each legal move from `pos`
pub fn print<L: PositionListener>(pos: &mut Position<L>, depth: usize) -> usize {
    if depth < 1 {
        return 1;
    }

    let mut total = 0;

    for m in pos.legal_moves() {
        let san = m.to_san(pos);
        pos.make_move(m);
        let count = count(pos, depth - 1);
        total += count;
        println!("\t{:7}\t{:12}\t{}", san, count, pos);
        pos.undo_last_move();
    }

    total
}

/// Count the number of variations of the given `depth` from `pos`
pub fn count<L: PositionListener>(pos: &mut Position<L>, depth: usize) -> usize {
    count_until(pos, depth, &|| false).unwrap_or(0)
}

/// Count the number of variations of the given `depth` from `pos`, giving up and returning `None`
/// as soon as `stop` returns `true`. `stop` is polled once per node.
///
/// Either way `pos` is left as it was found.
pub fn count_until<L, F>(pos: &mut Position<L>, depth: usize, stop: &F) -> Option<usize>
where
    L: PositionListener,
    F: Fn() -> bool,
{
    if stop() {
        return None;
    }
    if depth < 1 {
        return Some(1);
    }

    let mover = pos.turn();
    let mut total = 0;

    for m in pos.pseudo_legal_moves() {
        pos.make_move(m);
        let sub = if pos.in_check(mover) {
            Some(0)
        } else {
            count_until(pos, depth - 1, stop)
        };
        pos.undo_last_move();

        total += sub?;
    }

    Some(total)
}
