//! Move generation: pseudo-legal targets, pseudo-legal moves and legal moves
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use super::*;

impl<L: PositionListener> Position<L> {
    /// Returns the squares the piece on `sq` could move to, ignoring whether the move would leave
    /// its own king in check.
    ///
    /// Castling destinations are only included when castling is fully legal. En-passant captures
    /// are only included for pawns of the side to move.
    pub fn pseudo_legal_targets(&self, sq: Square) -> Bitboard {
        let (c, p) = match self.piece_at(sq) {
            Some(cp) => cp,
            None => return Bitboard::new(),
        };
        let occ = self.occupied();

        let targets = match p {
            Pawn => self.pawn_targets(sq, c),
            Knight => knight_attacks(sq),
            Bishop => bishop_attacks(sq, occ),
            Rook => rook_attacks(sq, occ),
            Queen => queen_attacks(sq, occ),
            King => king_attacks(sq) | self.castle_targets(sq, c),
        };

        targets & !self.color_mask(c)
    }

    fn pawn_targets(&self, sq: Square, c: Color) -> Bitboard {
        let occ = self.occupied();
        let fwd = c.forward();
        let mut targets = pawn_attacks(sq, c) & self.color_mask(!c);

        if let Some(one) = sq.offset(0, fwd).filter(|&s| !occ.contains(s)) {
            targets.insert(one);
            let start = if c == White { Rank::R2 } else { Rank::R7 };
            if sq.rank() == start {
                if let Some(two) = sq.offset(0, 2 * fwd).filter(|&s| !occ.contains(s)) {
                    targets.insert(two);
                }
            }
        }

        if c == self.turn() {
            if let Some(ep) = self.en_passant_destination() {
                if pawn_attacks(sq, c).contains(ep) {
                    targets.insert(ep);
                }
            }
        }

        targets
    }

    fn castle_targets(&self, sq: Square, c: Color) -> Bitboard {
        let home = c.home_rank();
        if sq != Square::from_coord(File::E, home) {
            return Bitboard::new();
        }

        CastleSide::BOTH.iter()
            .filter(|&&side| self.can_castle(c, side))
            .map(|&side| Square::from_coord(side.king_destination(), home))
            .collect()
    }

    /// Returns every pseudo-legal move for the side to move.
    ///
    /// Captures and promotions come first, then castling, then everything else. Each pawn move to
    /// the last rank appears once per promotion piece.
    pub fn pseudo_legal_moves(&self) -> Vec<MoveRecord> {
        let c = self.turn();
        let mut forcing = Vec::new();
        let mut quiet = Vec::new();

        for orig in self.color_mask(c) {
            let p = match self.piece_type_at(orig) {
                Some(p) => p,
                None => continue,
            };

            for dest in self.pseudo_legal_targets(orig) {
                if p == Pawn && dest.rank() == c.promotion_rank() {
                    for &promo in Piece::PROMOTIONS.iter() {
                        forcing.push(MoveRecord::build(self, orig, dest, c, p, Some(promo)));
                    }
                } else {
                    let record = MoveRecord::build(self, orig, dest, c, p, None);
                    if record.kind().is_capture() {
                        forcing.push(record);
                    } else if record.castle_side().is_some() {
                        forcing.push(record);
                    } else {
                        quiet.push(record);
                    }
                }
            }
        }

        forcing.append(&mut quiet);
        forcing
    }

    /// Returns every legal move for the side to move
    pub fn legal_moves(&self) -> Vec<MoveRecord> {
        let c = self.turn();
        let mut scratch = self.snapshot();

        self.pseudo_legal_moves()
            .into_iter()
            .filter(|&record| {
                scratch.make_move(record);
                let legal = !scratch.in_check(c);
                scratch.undo_last_move();
                legal
            })
            .collect()
    }

    /// Returns `true` if playing `record` would not leave the mover's king in check.
    ///
    /// The record is assumed to be pseudo-legal for this position.
    pub fn is_legal(&self, record: &MoveRecord) -> bool {
        let mut scratch = self.snapshot();
        scratch.make_move(*record);
        !scratch.in_check(record.color())
    }

    /// Returns `true` if the side to move has no legal moves and is in check
    pub fn is_checkmate(&self) -> bool {
        self.in_check(self.turn()) && self.legal_moves().is_empty()
    }

    /// Returns `true` if the side to move has no legal moves but is not in check
    pub fn is_stalemate(&self) -> bool {
        !self.in_check(self.turn()) && self.legal_moves().is_empty()
    }
}
