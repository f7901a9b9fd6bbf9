/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{is_attacked, Board, File, Hypothetical, Occupancy, PieceId, Player, Rank, Square};

/// A castling attempt: the King moving two files toward one of its Rooks, which then hops over it.
///
/// A [`Castler`] only describes the attempt. Whether it is allowed is decided by the [`Evaluator`](crate::Evaluator).
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Castler {
    king: PieceId,
    rook: PieceId,
    king_square: Square,
    king_landing: Square,
    rook_square: Square,
}

impl Castler {
    /// Detects whether moving `king` to `landing` is an attempt to castle.
    ///
    /// That is the case when `king` is `player`'s King standing on its home square (the e-file of its first rank),
    /// `landing` is two files away on the same rank, and a Rook of the same color stands in the corner on that side.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Board, Castler, Color, Player, Square};
    /// let board = Board::standard();
    /// let white = Player::from_board(&board, Color::White).unwrap();
    ///
    /// let castler = Castler::detect(&board, &white, white.king(), Square::G1).unwrap();
    /// assert_eq!(castler.rook_square(), Square::H1);
    /// assert_eq!(castler.rook_destination(), Square::F1);
    ///
    /// assert!(Castler::detect(&board, &white, white.king(), Square::F1).is_none());
    /// ```
    pub fn detect(board: &Board, player: &Player, king: PieceId, landing: Square) -> Option<Self> {
        if king != player.king() {
            return None;
        }

        let king_square = board.piece(king).current();
        let home = Square::new(File::E, Rank::first(player.color()));
        if king_square != home
            || landing.rank() != home.rank()
            || king_square.distance_files(landing) != 2
        {
            return None;
        }

        let corner = if landing.file() > king_square.file() {
            File::H
        } else {
            File::A
        };
        let rook_square = Square::new(corner, home.rank());

        let rook = board.occupant(rook_square)?;
        let piece = board.piece(rook);
        if !piece.is_rook() || piece.color() != player.color() {
            return None;
        }

        Some(Self {
            king,
            rook,
            king_square,
            king_landing: landing,
            rook_square,
        })
    }

    #[inline(always)]
    pub const fn king(&self) -> PieceId {
        self.king
    }

    #[inline(always)]
    pub const fn rook(&self) -> PieceId {
        self.rook
    }

    /// The square the King lands on.
    #[inline(always)]
    pub const fn king_landing(&self) -> Square {
        self.king_landing
    }

    /// The corner the Rook starts in.
    #[inline(always)]
    pub const fn rook_square(&self) -> Square {
        self.rook_square
    }

    /// The square the Rook lands on: the one the King crosses.
    pub fn rook_destination(&self) -> Square {
        // The King always moves exactly two files, so exactly one square lies between
        self.transit()[0]
    }

    /// Every square between the King and the Rook, all of which must be empty.
    pub fn between(&self) -> Vec<Square> {
        self.king_square.between_on_rank(self.rook_square)
    }

    /// The squares the King passes over on its way to its landing square.
    pub fn transit(&self) -> Vec<Square> {
        self.king_square.between_on_rank(self.king_landing)
    }

    /// Returns `true` if a piece stands between the King and the Rook.
    pub fn is_obstructed(&self, board: &Board) -> bool {
        self.between()
            .into_iter()
            .any(|square| board.is_occupied(square))
    }

    /// Returns `true` if `opponent` attacks any square the King passes over.
    pub fn jumped_square_under_attack(&self, board: &Board, opponent: &Player) -> bool {
        let view = Hypothetical::new(board);
        self.transit()
            .into_iter()
            .any(|square| is_attacked(&view, opponent, square))
    }

    /// A view of `board` with both the King and the Rook moved to their castled squares.
    pub fn castled<'a>(&self, board: &'a Board) -> Hypothetical<'a> {
        Hypothetical::new(board)
            .with_move(self.king_square, self.king_landing)
            .with_move(self.rook_square, self.rook_destination())
    }
}
