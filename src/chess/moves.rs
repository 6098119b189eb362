//! Contains structures to represent, apply and parse moves
//
//  Copyright 2020 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::cmp::Ordering;
use std::fmt;
use lazy_static::lazy_static;
use regex::Regex;
use super::*;
use Piece::*;

/// Evaluation given to a record before the search scores it
pub const UNSCORED: i32 = i32::MIN + 1;

lazy_static! {
    static ref SAN_MOVE: Regex = Regex::new(
        r"^(?P<piece>[A-Z])?(?P<from>[a-h]?[1-8]?)(?P<sep>[x-])?(?P<to>[a-z][0-9])(?:=?(?P<promo>[A-Za-z]))?[+#!?]*$"
    ).expect("INFALLIBLE");
    static ref SAN_CASTLE: Regex = Regex::new(
        r"^(?:O-O(?P<long>-O)?|0-0(?P<long0>-0)?)[+#!?]*$"
    ).expect("INFALLIBLE");
}

////////////////////////////////////////////////////////////////////////////////////////////////////
/// The kind of move, packed as a 4-bit field
///
/// | value    | kind                               |
/// |----------|------------------------------------|
/// | `0`      | quiet move (castling included)     |
/// | `1`      | double pawn push                   |
/// | `4`      | capture                            |
/// | `5`      | en-passant capture                 |
/// | `8..=11` | promotion to queen, rook, bishop, knight |
/// | `12..=15`| capture with promotion             |
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default)]
pub struct MoveKind(u8);

impl MoveKind {
    /// A move which neither captures nor promotes
    pub const QUIET: MoveKind = MoveKind(0);
    /// A pawn advancing two squares
    pub const DOUBLE_PAWN_PUSH: MoveKind = MoveKind(1);
    /// A capture on the destination square
    pub const CAPTURE: MoveKind = MoveKind(CAPTURE_BIT);
    /// A pawn capturing en passant
    pub const EN_PASSANT: MoveKind = MoveKind(CAPTURE_BIT | 1);

    /// Returns the kind for a promotion to `piece`, which must be a queen, rook, bishop or knight
    pub fn promotion(piece: Piece, capture: bool) -> MoveKind {
        let selector = match piece {
            Queen => 0,
            Rook => 1,
            Bishop => 2,
            Knight => 3,
            _ => {
                debug_assert!(false, "cannot promote to {:?}", piece);
                0
            },
        };
        let capture = if capture { CAPTURE_BIT } else { 0 };

        MoveKind(PROMOTION_BIT | capture | selector)
    }

    /// Returns the raw bits
    pub fn bits(self) -> u8 {
        self.0
    }

    /// Returns `true` if the move is a capture, en passant and capturing promotions included
    pub fn is_capture(self) -> bool {
        self.0 & CAPTURE_BIT != 0
    }

    /// Returns `true` if the move is a double pawn push
    pub fn is_double_pawn_push(self) -> bool {
        self == Self::DOUBLE_PAWN_PUSH
    }

    /// Returns `true` if the move is an en-passant capture
    pub fn is_en_passant(self) -> bool {
        self == Self::EN_PASSANT
    }

    /// Returns `true` if the move is a promotion
    pub fn is_promotion(self) -> bool {
        self.0 & PROMOTION_BIT != 0
    }

    /// Returns the piece promoted to, if any
    pub fn promotion_piece(self) -> Option<Piece> {
        if self.is_promotion() {
            Some(Piece::PROMOTIONS[(self.0 & SELECTOR_MASK) as usize])
        } else {
            None
        }
    }
}

const CAPTURE_BIT: u8 = 0b0100;
const PROMOTION_BIT: u8 = 0b1000;
const SELECTOR_MASK: u8 = 0b0011;

////////////////////////////////////////////////////////////////////////////////////////////////////
/// A move together with everything needed to apply and reverse it exactly.
///
/// A record is built for a specific position, before it is played: it captures the mover, the
/// captured piece and the board state at that moment. Only the evaluation and the post-move hash
/// change afterwards.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct MoveRecord {
    origin: Square,
    destination: Square,
    ply: usize,
    color: Color,
    piece: Piece,
    captured: Option<Piece>,
    kind: MoveKind,
    prior_state: BoardState,
    hash: u64,
    evaluation: i32,
}

impl MoveRecord {
    /// Builds a record for the piece of the side to move on `origin`, classifying the move from
    /// the board. Pawns reaching the last rank promote to a queen.
    ///
    /// The move is not checked for legality.
    pub fn new<L: PositionListener>(pos: &Position<L>, origin: Square, destination: Square)
        -> Result<MoveRecord>
    {
        match pos.piece_at(origin) {
            Some((c, p)) if c == pos.turn() => {
                Ok(MoveRecord::build(pos, origin, destination, c, p, None))
            },
            _ => Err(Error::IllegalMove),
        }
    }

    /// Builds a promotion to `promotion` for the pawn of the side to move on `origin`
    pub fn with_promotion<L: PositionListener>(
        pos: &Position<L>,
        origin: Square,
        destination: Square,
        promotion: Piece,
    ) -> Result<MoveRecord> {
        let c = pos.turn();
        if !Piece::PROMOTIONS.contains(&promotion)
            || !pos.pieces(c, Pawn).contains(origin)
            || destination.rank() != c.promotion_rank()
        {
            return Err(Error::InvalidPromotion);
        }

        Ok(MoveRecord::build(pos, origin, destination, c, Pawn, Some(promotion)))
    }

    pub(crate) fn build<L: PositionListener>(
        pos: &Position<L>,
        origin: Square,
        destination: Square,
        color: Color,
        piece: Piece,
        promotion: Option<Piece>,
    ) -> MoveRecord {
        let mut kind = MoveKind::QUIET;
        let mut captured = None;

        if piece == Pawn
            && origin.file() != destination.file()
            && pos.en_passant_destination() == Some(destination)
        {
            kind = MoveKind::EN_PASSANT;
            captured = Some(Pawn);
        } else if let Some((c, p)) = pos.piece_at(destination) {
            debug_assert!(c != color, "{} cannot capture its own piece on {}", color, destination);
            kind = MoveKind::CAPTURE;
            captured = Some(p);
        }

        if piece == Pawn {
            let distance = (destination.rank() as i8 - origin.rank() as i8).abs();
            if distance == 2 {
                kind = MoveKind::DOUBLE_PAWN_PUSH;
            } else if destination.rank() == color.promotion_rank() {
                kind = MoveKind::promotion(promotion.unwrap_or(Queen), captured.is_some());
            }
        }

        MoveRecord {
            origin,
            destination,
            ply: pos.ply(),
            color,
            piece,
            captured,
            kind,
            prior_state: pos.state(),
            hash: 0,
            evaluation: UNSCORED,
        }
    }

    /// Parses a move in standard algebraic notation for the side to move.
    ///
    /// Check and mate suffixes are accepted but not verified. Coordinate notation such as `e2e4`
    /// or `e7e8q` is accepted too, since it is a fully disambiguated pawn or piece move.
    pub fn from_san<L: PositionListener>(pos: &Position<L>, text: &str) -> Result<MoveRecord> {
        let text = text.trim();
        if text.is_empty() {
            return Err(Error::EmptyMove);
        }

        let c = pos.turn();
        let record = if let Some(caps) = SAN_CASTLE.captures(text) {
            let side = if caps.name("long").is_some() || caps.name("long0").is_some() {
                CastleSide::Queen
            } else {
                CastleSide::King
            };
            let home = c.home_rank();
            let origin = Square::from_coord(File::E, home);
            let destination = Square::from_coord(side.king_destination(), home);

            if !pos.pieces(c, King).contains(origin)
                || !pos.pseudo_legal_targets(origin).contains(destination)
            {
                return Err(Error::IllegalMove);
            }

            MoveRecord::build(pos, origin, destination, c, King, None)
        } else if let Some(caps) = SAN_MOVE.captures(text) {
            let piece: Piece = match caps.name("piece") {
                Some(m) => m.as_str().parse()?,
                None => Pawn,
            };
            let destination: Square = caps["to"].parse()?;

            let promotion = match caps.name("promo") {
                Some(m) => {
                    let p: Piece = m.as_str().parse()?;
                    if !Piece::PROMOTIONS.contains(&p)
                        || piece != Pawn
                        || destination.rank() != c.promotion_rank()
                    {
                        return Err(Error::InvalidPromotion);
                    }
                    Some(p)
                },
                None => None,
            };

            let from = &caps["from"];
            let capture = caps.name("sep").map_or(false, |m| m.as_str() == "x");

            let mut candidates: Vec<Square> = pos.pieces(c, piece)
                .into_iter()
                .filter(|&sq| pos.pseudo_legal_targets(sq).contains(destination))
                .collect();

            // without a capture marker, a pawn named only by its destination is pushed
            if piece == Pawn && from.is_empty() && !capture {
                candidates.retain(|sq| sq.file() == destination.file());
            }

            let mut from_chars = from.chars();
            match (from_chars.next(), from_chars.next()) {
                (None, _) => {},
                (Some(_), Some(_)) => {
                    let sq: Square = from.parse()?;
                    candidates.retain(|&s| s == sq);
                },
                (Some(ch), None) if ch.is_ascii_digit() => {
                    let rank = Rank::from_char(ch).ok_or(Error::InvalidSquare)?;
                    candidates.retain(|s| s.rank() == rank);
                },
                (Some(ch), None) => {
                    let file = File::from_char(ch).ok_or(Error::InvalidSquare)?;
                    candidates.retain(|s| s.file() == file);
                },
            }

            // a pinned rival doesn't make the move ambiguous
            if candidates.len() > 1 {
                let legal: Vec<Square> = candidates.iter()
                    .copied()
                    .filter(|&sq| {
                        pos.is_legal(&MoveRecord::build(pos, sq, destination, c, piece, promotion))
                    })
                    .collect();
                if !legal.is_empty() {
                    candidates = legal;
                }
            }

            let origin = match candidates.as_slice() {
                [] => return Err(Error::NoPieceCanReach),
                [origin] => *origin,
                _ => return Err(Error::AmbiguousMove),
            };

            let record = MoveRecord::build(pos, origin, destination, c, piece, promotion);
            if capture && !record.kind.is_capture() {
                return Err(Error::MalformedMove);
            }
            record
        } else {
            return Err(Error::MalformedMove);
        };

        if !pos.is_legal(&record) {
            return Err(Error::KingInCheck);
        }

        Ok(record)
    }

    /// Renders the move in standard algebraic notation. `pos` must be the position the move is
    /// played from.
    ///
    /// Disambiguation is minimal: a file if that is enough, otherwise a rank, otherwise the whole
    /// origin square. Check and mate suffixes are not added.
    pub fn to_san<L: PositionListener>(&self, pos: &Position<L>) -> String {
        match self.castle_side() {
            Some(CastleSide::King) => return "O-O".to_string(),
            Some(CastleSide::Queen) => return "O-O-O".to_string(),
            None => {},
        }

        let mut s = String::new();

        if self.piece == Pawn {
            if self.kind.is_capture() {
                s.push(self.origin.file().to_char());
            }
        } else {
            s += &self.piece.to_string();

            let rivals: Vec<Square> = pos.pieces(self.color, self.piece)
                .into_iter()
                .filter(|&sq| sq != self.origin)
                .filter(|&sq| pos.pseudo_legal_targets(sq).contains(self.destination))
                .filter(|&sq| {
                    let rival = MoveRecord::build(
                        pos, sq, self.destination, self.color, self.piece, None);
                    pos.is_legal(&rival)
                })
                .collect();

            if !rivals.is_empty() {
                if rivals.iter().all(|sq| sq.file() != self.origin.file()) {
                    s.push(self.origin.file().to_char());
                } else if rivals.iter().all(|sq| sq.rank() != self.origin.rank()) {
                    s.push(self.origin.rank().to_char());
                } else {
                    s += &self.origin.to_string();
                }
            }
        }

        if self.kind.is_capture() {
            s.push('x');
        }
        s += &self.destination.to_string();

        if let Some(promotion) = self.kind.promotion_piece() {
            s.push('=');
            s += &promotion.to_string();
        }

        s
    }

    /// Applies the move to `pos`. The record must have been built for `pos` as it stands.
    pub(crate) fn make<L: PositionListener>(&self, pos: &mut Position<L>) {
        let (c, home) = (self.color, self.color.home_rank());
        let mut state = self.prior_state;

        // has-moved flags for the king and for rooks leaving (or captured on) their corners
        state.set_double_pawn_push(None);
        if self.piece == King && self.origin == Square::from_coord(File::E, home) {
            state.set_king_moved(c);
        }
        for &side in CastleSide::BOTH.iter() {
            if self.piece == Rook && self.origin == Square::from_coord(side.rook_origin(), home) {
                state.set_rook_moved(c, side);
            }
            let their_corner = Square::from_coord(side.rook_origin(), (!c).home_rank());
            if self.captured == Some(Rook) && self.destination == their_corner {
                state.set_rook_moved(!c, side);
            }
        }
        if self.kind.is_double_pawn_push() {
            state.set_double_pawn_push(Some(self.origin.file()));
        }
        pos.set_state(state);

        if let Some(side) = self.castle_side() {
            pos.remove_piece(Square::from_coord(side.rook_origin(), home), c, Rook);
            pos.add_piece(Square::from_coord(side.rook_destination(), home), c, Rook);
        }

        pos.remove_piece(self.origin, c, self.piece);
        if self.kind.is_en_passant() {
            pos.remove_piece(self.en_passant_victim(), !c, Pawn);
        } else if let Some(captured) = self.captured {
            pos.remove_piece(self.destination, !c, captured);
        }
        pos.add_piece(self.destination, c, self.kind.promotion_piece().unwrap_or(self.piece));
    }

    /// Reverses the move on `pos`, which must be the position `make` left behind
    pub(crate) fn undo<L: PositionListener>(&self, pos: &mut Position<L>) {
        let (c, home) = (self.color, self.color.home_rank());

        pos.remove_piece(self.destination, c, self.kind.promotion_piece().unwrap_or(self.piece));
        if self.kind.is_en_passant() {
            pos.add_piece(self.en_passant_victim(), !c, Pawn);
        } else if let Some(captured) = self.captured {
            pos.add_piece(self.destination, !c, captured);
        }
        pos.add_piece(self.origin, c, self.piece);

        if let Some(side) = self.castle_side() {
            pos.remove_piece(Square::from_coord(side.rook_destination(), home), c, Rook);
            pos.add_piece(Square::from_coord(side.rook_origin(), home), c, Rook);
        }

        pos.set_state(self.prior_state);
    }

    // the pawn taken en passant stands beside the origin, on the destination file
    fn en_passant_victim(&self) -> Square {
        Square::from_coord(self.destination.file(), self.origin.rank())
    }

    /// Returns the side castled on, if this is a castling move
    pub fn castle_side(&self) -> Option<CastleSide> {
        if self.piece != King || self.origin.file() != File::E {
            return None;
        }
        match self.destination.file() {
            File::G => Some(CastleSide::King),
            File::C => Some(CastleSide::Queen),
            _ => None,
        }
    }

    /// Returns the square the piece moves from
    pub fn origin(&self) -> Square {
        self.origin
    }

    /// Returns the square the piece moves to
    pub fn destination(&self) -> Square {
        self.destination
    }

    /// Returns the ply the move is played on
    pub fn ply(&self) -> usize {
        self.ply
    }

    /// Returns the color of the moving piece
    pub fn color(&self) -> Color {
        self.color
    }

    /// Returns the type of the moving piece
    pub fn piece(&self) -> Piece {
        self.piece
    }

    /// Returns the type of the captured piece, if any
    pub fn captured(&self) -> Option<Piece> {
        self.captured
    }

    /// Returns the kind of move
    pub fn kind(&self) -> MoveKind {
        self.kind
    }

    /// Returns the board state from before the move
    pub fn prior_state(&self) -> BoardState {
        self.prior_state
    }

    /// Returns the hash of the position after the move, or `0` if it hasn't been made or the
    /// position doesn't hash
    pub fn hash(&self) -> u64 {
        self.hash
    }

    pub(crate) fn set_hash(&mut self, hash: u64) {
        self.hash = hash;
    }

    /// Returns the evaluation used to order moves
    pub fn evaluation(&self) -> i32 {
        self.evaluation
    }

    /// Sets the evaluation used to order moves
    pub fn set_evaluation(&mut self, evaluation: i32) {
        self.evaluation = evaluation;
    }

    /// Compares two records so that the higher evaluation comes first
    pub fn cmp_by_evaluation(&self, other: &MoveRecord) -> Ordering {
        other.evaluation.cmp(&self.evaluation)
    }
}

/// Sorts `records` by evaluation, highest first. Records with equal evaluations keep their order.
pub fn sort_by_evaluation(records: &mut [MoveRecord]) {
    records.sort_by(MoveRecord::cmp_by_evaluation);
}

impl fmt::Display for MoveRecord {
    /// Writes the move in coordinate notation (eg `g1f3`, `e7e8q` or `e1g1`)
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = format!("{}{}", self.origin, self.destination);
        if let Some(promotion) = self.kind.promotion_piece() {
            s += &promotion.to_string().to_lowercase();
        }
        s.fmt(f)
    }
}

////////////////////////////////////////////////////////////////////////////////////////////////////
#[cfg(test)]
mod tests {
    use super::*;
    use Color::*;

    fn fen(s: &str) -> Position {
        s.parse().expect("valid fen")
    }

    #[test]
    fn move_kind_bits() {
        assert_eq!(MoveKind::QUIET.bits(), 0);
        assert_eq!(MoveKind::DOUBLE_PAWN_PUSH.bits(), 1);
        assert_eq!(MoveKind::CAPTURE.bits(), 4);
        assert_eq!(MoveKind::EN_PASSANT.bits(), 5);
        assert_eq!(MoveKind::promotion(Queen, false).bits(), 8);
        assert_eq!(MoveKind::promotion(Knight, false).bits(), 11);
        assert_eq!(MoveKind::promotion(Rook, true).bits(), 13);
        assert!(MoveKind::EN_PASSANT.is_capture());
        assert_eq!(MoveKind::promotion(Bishop, true).promotion_piece(), Some(Bishop));
        assert_eq!(MoveKind::CAPTURE.promotion_piece(), None);
    }

    #[test]
    fn double_push_is_classified() {
        let pos = Position::new();
        let record = MoveRecord::new(&pos, Square::E2, Square::E4).unwrap();
        assert!(record.kind().is_double_pawn_push());
        assert_eq!(record.ply(), 1);
        assert_eq!(record.color(), White);
        assert_eq!(record.captured(), None);
        assert_eq!(MoveRecord::from_san(&pos, "e2-e4"), Ok(record));
        assert_eq!(MoveRecord::from_san(&pos, "e2e4"), Ok(record));
    }

    #[test]
    fn new_rejects_empty_or_enemy_origin() {
        let pos = Position::new();
        assert_eq!(MoveRecord::new(&pos, Square::E4, Square::E5), Err(Error::IllegalMove));
        assert_eq!(MoveRecord::new(&pos, Square::E7, Square::E5), Err(Error::IllegalMove));
    }

    #[test]
    fn promotion_round_trip() {
        let mut pos = fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1");
        let before = pos.clone();

        let record = pos.parse_move("e8=Q").unwrap();
        assert_eq!(record.kind().promotion_piece(), Some(Queen));
        assert!(!record.kind().is_capture());
        pos.make_move(record);
        assert_eq!(pos.piece_at(Square::E8), Some((White, Queen)));
        assert!(pos.pieces(White, Pawn).is_empty());

        pos.undo_last_move();
        assert_eq!(pos, before);

        assert_eq!(pos.parse_move("e8").unwrap().kind().promotion_piece(), Some(Queen));
        assert_eq!(pos.parse_move("e8=N").unwrap().kind().promotion_piece(), Some(Knight));
        assert_eq!(pos.parse_move("e7e8r").unwrap().kind().promotion_piece(), Some(Rook));
        assert_eq!(
            MoveRecord::with_promotion(&pos, Square::E7, Square::E8, Bishop)
                .unwrap().kind().promotion_piece(),
            Some(Bishop));
        assert_eq!(MoveRecord::with_promotion(&pos, Square::E7, Square::E8, King),
            Err(Error::InvalidPromotion));
    }

    #[test]
    fn parse_errors() {
        let pos = Position::new();
        assert_eq!(pos.parse_move(""), Err(Error::EmptyMove));
        assert_eq!(pos.parse_move("   "), Err(Error::EmptyMove));
        assert_eq!(pos.parse_move("Xe4"), Err(Error::UnknownPiece));
        assert_eq!(pos.parse_move("e9"), Err(Error::InvalidSquare));
        assert_eq!(pos.parse_move("z4"), Err(Error::InvalidSquare));
        assert_eq!(pos.parse_move("e4=K"), Err(Error::InvalidPromotion));
        assert_eq!(pos.parse_move("e4=Q"), Err(Error::InvalidPromotion));
        assert_eq!(pos.parse_move("Qh4h5e1"), Err(Error::MalformedMove));
        assert_eq!(pos.parse_move("e5"), Err(Error::NoPieceCanReach));
        assert_eq!(pos.parse_move("Nc4"), Err(Error::NoPieceCanReach));
        assert_eq!(pos.parse_move("O-O"), Err(Error::IllegalMove));
    }

    #[test]
    fn check_suffixes_are_ignored() {
        let pos = Position::new();
        assert_eq!(pos.parse_move("Nf3+"), pos.parse_move("Nf3"));
        assert_eq!(pos.parse_move("Nf3#"), pos.parse_move("Nf3"));
    }

    #[test]
    fn file_disambiguation() {
        let pos = fen("4k3/8/8/8/8/8/4K3/R6R w - - 0 1");
        assert_eq!(pos.parse_move("Rd1"), Err(Error::AmbiguousMove));
        assert_eq!(pos.parse_move("Rad1").unwrap().origin(), Square::A1);
        assert_eq!(pos.parse_move("Rhd1").unwrap().origin(), Square::H1);
        assert_eq!(pos.parse_move("Rbd1"), Err(Error::NoPieceCanReach));

        let record = pos.parse_move("Rhd1").unwrap();
        assert_eq!(record.to_san(&pos), "Rhd1");
    }

    #[test]
    fn rank_disambiguation() {
        let pos = fen("4k3/8/8/R7/8/8/4K3/R7 w - - 0 1");
        assert_eq!(pos.parse_move("Ra3"), Err(Error::AmbiguousMove));
        assert_eq!(pos.parse_move("R1a3").unwrap().origin(), Square::A1);
        assert_eq!(pos.parse_move("R5a3").unwrap().origin(), Square::A5);
        assert_eq!(pos.parse_move("R5a3").unwrap().to_san(&pos), "R5a3");
    }

    #[test]
    fn square_disambiguation() {
        let pos = fen("4k3/8/8/8/8/Q7/4K3/Q1Q5 w - - 0 1");
        assert_eq!(pos.parse_move("Qb2"), Err(Error::AmbiguousMove));
        assert_eq!(pos.parse_move("Qab2"), Err(Error::AmbiguousMove));
        let record = pos.parse_move("Qa1b2").unwrap();
        assert_eq!(record.origin(), Square::A1);
        assert_eq!(record.to_san(&pos), "Qa1b2");
    }

    #[test]
    fn pinned_pieces_do_not_need_disambiguation() {
        // the knight on e2 is pinned against the king
        let pos = fen("4k3/4r3/8/8/8/1N6/4N3/4K3 w - - 0 1");
        let record = pos.parse_move("Nbd4").unwrap();
        assert_eq!(record.to_san(&pos), "Nd4");
        assert_eq!(pos.parse_move("Nd4"), Ok(record));
        assert_eq!(pos.parse_move("Nc3"), Err(Error::KingInCheck));
    }

    #[test]
    fn piece_captures() {
        let mut pos = Position::new();
        for text in &["e4", "e5", "Nf3", "Nc6"] {
            pos.play(text).unwrap();
        }
        let record = pos.parse_move("Nxe5").unwrap();
        assert_eq!(record.origin(), Square::F3);
        assert_eq!(record.captured(), Some(Pawn));
        assert_eq!(record.to_san(&pos), "Nxe5");
        assert_eq!(pos.parse_move("Ne5"), Ok(record));
        assert_eq!(pos.parse_move("Nfxe5"), Ok(record));
        assert_eq!(pos.parse_move("Nf3xe5"), Ok(record));

        let pos = fen("r5k1/5ppp/8/8/8/8/8/R5K1 w - - 0 1");
        assert_eq!(pos.parse_move("Rxa8#").unwrap().captured(), Some(Rook));
    }

    #[test]
    fn capture_marker_must_match_the_board() {
        let mut pos = Position::new();
        assert_eq!(pos.parse_move("Nxf3"), Err(Error::MalformedMove));
        assert_eq!(pos.parse_move("Nf3").unwrap().to_san(&pos), "Nf3");
        for text in &["e4", "d5"] {
            pos.play(text).unwrap();
        }
        assert_eq!(pos.parse_move("Qxh5"), Err(Error::MalformedMove));
        assert!(pos.parse_move("Qh5").is_ok());
        assert!(pos.parse_move("exd5").is_ok());
    }

    #[test]
    fn pawn_pushes_and_captures() {
        let mut pos = Position::new();
        for text in &["e4", "d5", "c4", "e5"] {
            pos.play(text).unwrap();
        }
        // d5 can be taken from c4 or e4, and "d5" alone would be a push that nothing can make
        assert_eq!(pos.parse_move("d5"), Err(Error::NoPieceCanReach));
        assert_eq!(pos.parse_move("xd5"), Err(Error::AmbiguousMove));
        let record = pos.parse_move("cxd5").unwrap();
        assert_eq!(record.captured(), Some(Pawn));
        assert_eq!(record.to_san(&pos), "cxd5");
    }

    #[test]
    fn castling_text() {
        let pos = fen("r3k2r/8/8/8/8/8/8/R3K2R w KQkq - 0 1");
        let short = pos.parse_move("O-O").unwrap();
        assert_eq!(short.castle_side(), Some(CastleSide::King));
        assert_eq!(short.to_san(&pos), "O-O");
        assert_eq!(pos.parse_move("0-0"), Ok(short));
        assert_eq!(pos.parse_move("Kg1"), Ok(short));

        let long = pos.parse_move("0-0-0").unwrap();
        assert_eq!(long.destination(), Square::C1);
        assert_eq!(long.to_san(&pos), "O-O-O");
        assert_eq!(format!("{}", long), "e1c1");
    }

    #[test]
    fn display_is_coordinate_notation() {
        let pos = fen("k7/4P3/8/8/8/8/8/K7 w - - 0 1");
        assert_eq!(pos.parse_move("e8=N").unwrap().to_string(), "e7e8n");
        assert_eq!(Position::new().parse_move("Nf3").unwrap().to_string(), "g1f3");
    }

    #[test]
    fn sorting_is_descending_by_evaluation() {
        let mut records = Position::new().legal_moves();
        for (i, record) in records.iter_mut().enumerate() {
            record.set_evaluation((i as i32 * 7) % 11);
        }
        sort_by_evaluation(&mut records);
        assert!(records.windows(2).all(|w| w[0].evaluation() >= w[1].evaluation()));
        assert_ne!(records[0].cmp_by_evaluation(&records[1]), Ordering::Greater);
        assert_eq!(MoveRecord::new(&Position::new(), Square::A2, Square::A3).unwrap().evaluation(),
            UNSCORED);
    }
}
