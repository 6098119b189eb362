//! Tests that playing and taking back moves restores positions exactly, and that hashes follow
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryFrom;
use std::sync::Arc;
use rand::{Rng, SeedableRng};
use rand::rngs::StdRng;
use chesscore::chess::{
    Color, HashedPosition, MoveRecord, Piece, Position, PositionListener, Square, ZobristKeys,
};
use chesscore::engine::{CacheEntry, MoveOrderingHistory, ResultCache, CacheConfig, ScoreType};

const POSITIONS: [&str; 5] = [
    "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1",
    "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1",
    "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - - 0 1",
    "r3k2r/Pppp1ppp/1b3nbN/nP6/BBP1P3/q4N2/Pp1P2PP/R2Q1RK1 w kq - 0 1",
    "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1",
];

/// Plays up to `plies` random legal moves, checking `check` after each one. Returns the number of
/// moves played.
fn random_game<L, F>(pos: &mut Position<L>, rng: &mut StdRng, plies: usize, mut check: F) -> usize
where
    L: PositionListener,
    F: FnMut(&Position<L>),
{
    for played in 0..plies {
        let moves = pos.legal_moves();
        if moves.is_empty() {
            return played;
        }
        let record = moves[rng.gen_range(0, moves.len())];
        pos.make_move(record);
        check(pos);
    }
    plies
}

#[test]
fn undo_restores_every_position() {
    let mut rng = StdRng::seed_from_u64(2020);

    for fen in POSITIONS.iter() {
        for _ in 0..10 {
            let mut pos: Position = fen.parse().unwrap();
            let mut seen = vec![pos.clone()];
            let played = random_game(&mut pos, &mut rng, 80, |pos| seen.push(pos.clone()));
            assert_eq!(seen.len(), played + 1);

            seen.pop();
            while let Some(expected) = seen.pop() {
                pos.undo_last_move().expect("a move to undo");
                assert_eq!(pos, expected, "{}", fen);
                assert_eq!(pos.to_fen_str(), expected.to_fen_str());
            }
            assert!(pos.undo_last_move().is_none());
        }
    }
}

#[test]
fn masks_stay_consistent() {
    let mut rng = StdRng::seed_from_u64(7);

    for fen in POSITIONS.iter() {
        let mut pos: Position = fen.parse().unwrap();
        random_game(&mut pos, &mut rng, 120, |pos| {
            let by_type = Piece::ALL.iter()
                .fold(0, |acc, &p| acc | u64::from(pos.type_mask(p)));
            let by_color = u64::from(pos.color_mask(Color::White))
                | u64::from(pos.color_mask(Color::Black));
            assert_eq!(by_type, by_color);
            assert_eq!(by_color, u64::from(pos.occupied()));
            assert!(!pos.color_mask(Color::White).intersects(pos.color_mask(Color::Black)));
            assert_eq!(pos.pieces(Color::White, Piece::King).len(), 1);
            assert_eq!(pos.pieces(Color::Black, Piece::King).len(), 1);
        });
    }
}

#[test]
fn hash_always_matches_full_hash() {
    let keys = Arc::new(ZobristKeys::default());
    let mut rng = StdRng::seed_from_u64(42);

    for fen in POSITIONS.iter() {
        for _ in 0..10 {
            let mut pos = HashedPosition::from_fen_hashed(fen, Arc::clone(&keys)).unwrap();
            let start = pos.hash();
            random_game(&mut pos, &mut rng, 80, |pos| {
                assert_eq!(pos.hash(), pos.full_hash());
            });
            while pos.undo_last_move().is_some() {
                assert_eq!(pos.hash(), pos.full_hash());
            }
            assert_eq!(pos.hash(), start);
        }
    }
}

#[test]
fn attacks_are_symmetric() {
    let mut rng = StdRng::seed_from_u64(99);

    for fen in POSITIONS.iter() {
        let mut pos: Position = fen.parse().unwrap();
        random_game(&mut pos, &mut rng, 40, |pos| {
            for &color in [Color::White, Color::Black].iter() {
                for &piece in [Piece::Knight, Piece::Bishop, Piece::Rook, Piece::Queen].iter() {
                    for sq in pos.pieces(color, piece) {
                        // a piece attacks a square exactly when the square's occupant is attacked
                        for target in pos.pseudo_legal_targets(sq) {
                            if pos.piece_color_at(target) == Some(!color) {
                                assert!(pos.is_attacked(target, !color), "{} {}", pos, target);
                            }
                        }
                    }
                }
            }
            if let Some(king) = pos.king_square(pos.turn()) {
                let attacked = pos.is_attacked(king, pos.turn());
                assert_eq!(attacked, pos.in_check(pos.turn()));
            }
        });
    }
}

#[test]
fn every_legal_move_reads_back_from_its_algebraic_text() {
    let mut rng = StdRng::seed_from_u64(1234);

    for fen in POSITIONS.iter() {
        for _ in 0..5 {
            let mut pos: Position = fen.parse().unwrap();
            let mut check = |pos: &Position| {
                for record in pos.legal_moves() {
                    let text = record.to_san(pos);
                    assert_eq!(MoveRecord::from_san(pos, &text), Ok(record),
                        "{} in {}", text, pos.to_fen_str());
                }
            };
            check(&pos);
            random_game(&mut pos, &mut rng, 60, &mut check);

            let text = pos.history_text();
            let mut replayed: Position = fen.parse().unwrap();
            for san in &text {
                replayed.play(san).unwrap();
            }
            assert_eq!(replayed, pos);
        }
    }
}

#[test]
fn search_structures_survive_a_game() {
    let keys = Arc::new(ZobristKeys::default());
    let mut rng = StdRng::seed_from_u64(5);
    let mut cache = ResultCache::new(CacheConfig { capacity: 64, ..CacheConfig::default() });
    let mut history = MoveOrderingHistory::new(4);
    let mut pos = HashedPosition::with_hasher(keys);

    for _ in 0..100 {
        let mut moves = pos.legal_moves();
        if moves.is_empty() {
            break;
        }
        history.sort_moves(&mut moves);
        assert!(moves.windows(2).all(|w| w[0].evaluation() >= w[1].evaluation()));

        let record = moves[rng.gen_range(0, moves.len())];
        history.add_move(&record);
        cache.put(pos.hash(), CacheEntry::new(0, rng.gen_range(0, 6), ScoreType::Exact, Some(&record)));
        assert!(cache.len() <= cache.capacity());

        let cached = cache.get(pos.hash()).expect("just stored");
        let best = cached.best_move().expect("stored with a move");
        let rebuilt = best.to_record(&pos).expect("legal here");
        assert_eq!((rebuilt.origin(), rebuilt.destination(), rebuilt.kind()),
            (record.origin(), record.destination(), record.kind()));

        pos.make_move(record);
        history.increment_ply();
    }
}

#[test]
fn square_names_round_trip() {
    for serial in 0..Square::COUNT {
        let sq = Square::try_from(serial).unwrap();
        let name = sq.to_string();
        assert_eq!(name.parse::<Square>().unwrap(), sq);
        assert_eq!(usize::from(sq), serial);
    }
}
