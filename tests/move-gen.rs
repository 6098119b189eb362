//! Tests the move generator (chess module)
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////

mod move_gen {
    use chesscore::chess::{Position, variations};

    mod start {
        use super::count;

        const FEN: &str = "rnbqkbnr/pppppppp/8/8/8/8/PPPPPPPP/RNBQKBNR w KQkq - 0 1";

        #[test]
        fn shallow() {
            assert_eq!(count(FEN, 1), 20);
            assert_eq!(count(FEN, 2), 400);
            assert_eq!(count(FEN, 3), 8902);
        }

        #[test]
        fn depth_4() { assert_eq!(count(FEN, 4), 197281); }

        #[test]
        #[ignore]
        fn depth_5() { assert_eq!(count(FEN, 5), 4865609); }
    }

    mod kiwipete {
        use super::count;

        const FEN: &str = "r3k2r/p1ppqpb1/bn2pnp1/3PN3/1p2P3/2N2Q1p/PPPBBPPP/R3K2R w KQkq - 0 1";

        #[test]
        fn shallow() {
            assert_eq!(count(FEN, 1), 48);
            assert_eq!(count(FEN, 2), 2039);
        }

        #[test]
        fn depth_3() { assert_eq!(count(FEN, 3), 97862); }

        #[test]
        #[ignore]
        fn depth_4() { assert_eq!(count(FEN, 4), 4085603); }
    }

    mod pins_and_en_passant {
        use super::count;

        const FEN: &str = "8/2p5/3p4/KP5r/1R3p1k/8/4P1P1/8 w - -";

        #[test]
        fn shallow() {
            assert_eq!(count(FEN, 1), 14);
            assert_eq!(count(FEN, 2), 191);
            assert_eq!(count(FEN, 3), 2812);
        }

        #[test]
        fn depth_4() { assert_eq!(count(FEN, 4), 43238); }

        #[test]
        #[ignore]
        fn depth_5() { assert_eq!(count(FEN, 5), 674624); }
    }

    #[test]
    fn position_003() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R w K - 0 1", 6), 764643); }

    #[test]
    fn position_004() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K3 w Q - 0 1", 6), 846648); }

    #[test]
    fn position_005() { assert_eq!(count("4k2r/8/8/8/8/8/8/4K3 w k - 0 1", 6), 899442); }

    #[test]
    fn position_006() { assert_eq!(count("r3k3/8/8/8/8/8/8/4K3 w q - 0 1", 6), 1001523); }

    #[test]
    #[ignore]
    fn position_007() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K2R w KQ - 0 1", 6), 2788982); }

    #[test]
    #[ignore]
    fn position_008() { assert_eq!(count("r3k2r/8/8/8/8/8/8/4K3 w kq - 0 1", 6), 3517770); }

    #[test]
    fn position_009() { assert_eq!(count("8/8/8/8/8/8/6k1/4K2R w K - 0 1", 6), 185867); }

    #[test]
    fn position_010() { assert_eq!(count("8/8/8/8/8/8/1k6/R3K3 w Q - 0 1", 6), 413018); }

    #[test]
    fn position_011() { assert_eq!(count("4k2r/6K1/8/8/8/8/8/8 w k - 0 1", 6), 179869); }

    #[test]
    fn position_012() { assert_eq!(count("r3k3/1K6/8/8/8/8/8/8 w q - 0 1", 6), 367724); }

    #[test]
    #[ignore]
    fn position_013() { assert_eq!(count("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1", 6), 179862938); }

    #[test]
    fn position_020() { assert_eq!(count("4k3/8/8/8/8/8/8/4K2R b K - 0 1", 6), 899442); }

    #[test]
    fn position_021() { assert_eq!(count("4k3/8/8/8/8/8/8/R3K3 b Q - 0 1", 6), 1001523); }

    #[test]
    fn position_022() { assert_eq!(count("4k2r/8/8/8/8/8/8/4K3 b k - 0 1", 6), 764643); }

    #[test]
    fn position_023() { assert_eq!(count("r3k3/8/8/8/8/8/8/4K3 b q - 0 1", 6), 846648); }

    #[test]
    fn position_026() { assert_eq!(count("8/8/8/8/8/8/6k1/4K2R b K - 0 1", 6), 179869); }

    #[test]
    fn position_027() { assert_eq!(count("8/8/8/8/8/8/1k6/R3K3 b Q - 0 1", 6), 367724); }

    #[test]
    fn position_028() { assert_eq!(count("4k2r/6K1/8/8/8/8/8/8 b k - 0 1", 6), 185867); }

    #[test]
    fn position_029() { assert_eq!(count("r3k3/1K6/8/8/8/8/8/8 b q - 0 1", 6), 413018); }

    #[test]
    #[ignore]
    fn position_030() { assert_eq!(count("r3k2r/8/8/8/8/8/8/R3K2R b KQkq - 0 1", 6), 179862938); }

    #[test]
    fn position_040() { assert_eq!(count("K7/8/2n5/1n6/8/8/8/k6N w - - 0 1", 6), 588695); }

    #[test]
    fn position_041() { assert_eq!(count("k7/8/2N5/1N6/8/8/8/K6n w - - 0 1", 6), 688780); }

    #[test]
    fn position_045() { assert_eq!(count("K7/8/2n5/1n6/8/8/8/k6N b - - 0 1", 6), 688780); }

    #[test]
    fn position_046() { assert_eq!(count("k7/8/2N5/1N6/8/8/8/K6n b - - 0 1", 6), 588695); }

    #[test]
    #[ignore]
    fn position_055() { assert_eq!(count("7k/RR6/8/8/8/8/rr6/7K w - - 0 1", 6), 44956585); }

    #[test]
    fn position_123() { assert_eq!(count("8/Pk6/8/8/8/8/6Kp/8 b - - 0 1", 6), 1030499); }

    #[test]
    #[ignore]
    fn position_126() { assert_eq!(count("n1n5/PPPk4/8/8/8/8/4Kppp/5N1N b - - 0 1", 6), 71179139); }

    fn count(fen: &str, depth: usize) -> usize {
        println!("\n{}", fen);
        let mut pos: Position = fen.parse().unwrap();
        let before = pos.clone();

        let count = variations::print(&mut pos, depth);
        println!("Depth {} total:\t{:12}", depth, count);
        assert_eq!(pos, before);

        count
    }
}
