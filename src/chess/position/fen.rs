//! Reading and writing positions in Forsyth-Edwards Notation
//
//  Copyright 2019 Michael Leany
//
//  This Source Code Form is subject to the terms of the Mozilla Public
//  License, v. 2.0. If a copy of the MPL was not distributed with this
//  file, You can obtain one at http://mozilla.org/MPL/2.0/.
//
////////////////////////////////////////////////////////////////////////////////////////////////////
use std::convert::TryInto;
use std::str::FromStr;
use super::*;

impl Position {
    /// Parse a position from a FEN string
    pub fn from_fen_str(s: &str) -> Result<Position> {
        Position::from_fen_with(s, ())
    }
}

impl<L: PositionListener> Position<L> {
    /// Parse a position from a FEN string, reporting every placed piece to `listener`.
    ///
    /// Castling flags become has-moved flags: a missing `K`, for instance, marks White's king's
    /// rook as moved, and a side with no flags at all has its king marked as moved. The half-move
    /// clock is checked for syntax but otherwise ignored.
    pub fn from_fen_with(s: &str, listener: L) -> Result<Position<L>> {
        let mut pos = Position::empty_with(listener);
        let mut fields = s.trim().split_whitespace();

        // parse the board
        let board = fields.next().ok_or(Error::ParseError)?;
        let mut r = Rank::COUNT - 1;
        let mut f = 0;
        for c in board.chars() {
            match c {
                '1' ..= '8' => {
                    f += c.to_digit(10).expect("INFALLIBLE") as usize;
                    if f > File::COUNT {
                        return Err(Error::ParseError);
                    }
                }
                '/' => {
                    if f == File::COUNT && r > 0 {
                        r -= 1;
                        f = 0;
                    } else {
                        return Err(Error::ParseError);
                    }
                }
                _ => {
                    let sq = match (f.try_into(), r.try_into()) {
                        (Ok(f), Ok(r)) => Square::from_coord(f, r),
                        _ => return Err(Error::ParseError),
                    };
                    let color = if c.is_uppercase() { White } else { Black };
                    let piece: Piece = c.to_string().parse().map_err(|_| Error::ParseError)?;

                    pos.add_piece(sq, color, piece);
                    f += 1;
                }
            }
        }
        if r > 0 || f < File::COUNT {
            return Err(Error::ParseError);
        }

        // parse the turn
        let turn: Color = fields.next().ok_or(Error::ParseError)?.parse()?;

        // parse the castling flags
        let mut rights = [[false; 2]; Color::COUNT];
        match fields.next() {
            Some("-") => {},
            Some(flags) => {
                for c in flags.chars() {
                    match c {
                        'K' => rights[White as usize][CastleSide::King as usize] = true,
                        'Q' => rights[White as usize][CastleSide::Queen as usize] = true,
                        'k' => rights[Black as usize][CastleSide::King as usize] = true,
                        'q' => rights[Black as usize][CastleSide::Queen as usize] = true,
                        _ => return Err(Error::ParseError),
                    }
                }
            },
            None => return Err(Error::ParseError),
        }

        // parse en passant square
        let ep_square: Option<Square> = match fields.next() {
            Some("-") => None,
            Some(sq) => Some(sq.parse().map_err(|_| Error::ParseError)?),
            None => return Err(Error::ParseError),
        };

        // the half-move clock isn't tracked, but it must be a number if present
        if let Some(plies) = fields.next() {
            plies.parse::<usize>().map_err(|_| Error::ParseError)?;
        }

        // parse move number, if present
        let move_num = match fields.next() {
            Some(n) => match n.parse::<usize>() {
                Ok(n) if n > 0 => n,
                _ => return Err(Error::ParseError),
            },
            None => 1,
        };

        if fields.next().is_some() {
            return Err(Error::ParseError);
        }

        let mut state = BoardState::default();
        for &c in [White, Black].iter() {
            let home = c.home_rank();
            let c_rights = rights[c as usize];

            if c_rights.iter().all(|&right| !right) {
                state.set_king_moved(c);
            } else if !pos.pieces(c, King).contains(Square::from_coord(File::E, home)) {
                return Err(Error::InvalidCastlingFlags);
            }

            for &side in CastleSide::BOTH.iter() {
                if !c_rights[side as usize] {
                    state.set_rook_moved(c, side);
                } else if !pos.pieces(c, Rook).contains(Square::from_coord(side.rook_origin(), home)) {
                    return Err(Error::InvalidCastlingFlags);
                }
            }
        }
        state.set_double_pawn_push(ep_square.map(Square::file));

        pos.set_state(state);
        pos.set_ply(2 * (move_num - 1) + 1 + turn as usize);

        // validate position legality
        for &c in [White, Black].iter() {
            // Step 1: verify exactly one king per side
            if pos.pieces(c, King).len() != 1 {
                return Err(Error::InvalidKingCount);
            }
            // Step 2: no pawns on ranks 1 and 8
            if pos.pieces(c, Pawn).intersects(Bitboard::from(Rank::R1) | Rank::R8.into()) {
                return Err(Error::InvalidPawnRank);
            }
        }
        // Step 3: opponent's king is not attacked
        if pos.in_check(!turn) {
            return Err(Error::KingCapturable);
        }
        // Step 4: the EP square must be empty, behind a pawn that just made a double push
        if let Some(ep_square) = ep_square {
            let valid = Some(ep_square) == pos.en_passant_destination()
                && !pos.occupied().contains(ep_square)
                && pos.en_passant_capture_square()
                    .map_or(false, |sq| pos.pieces(!turn, Pawn).contains(sq));
            if !valid {
                return Err(Error::InvalidEnPassant);
            }
        }

        Ok(pos)
    }

    /// Converts the position to a FEN string.
    ///
    /// The half-move clock is always written as `0`.
    pub fn to_fen_str(&self) -> String {
        // the board
        let mut board = String::new();
        for r in (0..Rank::COUNT).rev() {
            let mut count = 0;
            for f in 0..File::COUNT {
                let sq = Square::from_coord(
                    f.try_into().expect("INFALLIBLE"),
                    r.try_into().expect("INFALLIBLE"),
                );
                if let Some((c, p)) = self.piece_at(sq) {
                    if count > 0 {
                        board += &count.to_string();
                        count = 0;
                    }

                    if c == White {
                        board += &p.to_string();
                    } else {
                        board += &p.to_string().to_lowercase();
                    }
                } else {
                    count += 1;
                }
            }
            if count > 0 {
                board += &count.to_string();
            }
            if r > 0 {
                board += "/";
            }
        }

        // castling rights
        let mut castling = String::new();
        for &(c, side, flag) in &[
            (White, CastleSide::King, 'K'),
            (White, CastleSide::Queen, 'Q'),
            (Black, CastleSide::King, 'k'),
            (Black, CastleSide::Queen, 'q'),
        ] {
            let home = c.home_rank();
            if !self.castle_pieces_have_moved(c, side)
                && self.pieces(c, King).contains(Square::from_coord(File::E, home))
                && self.pieces(c, Rook).contains(Square::from_coord(side.rook_origin(), home))
            {
                castling.push(flag);
            }
        }
        if castling.is_empty() {
            castling.push('-');
        }

        // en passant square
        let ep_square = match self.en_passant_destination() {
            Some(sq) => sq.to_string(),
            None => "-".to_string(),
        };

        format!("{} {} {} {} 0 {}", board, self.turn(), castling, ep_square, self.move_number())
    }
}

impl FromStr for Position {
    type Err = Error;

    /// Parse a position from a FEN string
    fn from_str(s: &str) -> Result<Self> {
        Position::from_fen_str(s)
    }
}
