/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use anyhow::{bail, Result};

use crate::{Board, Color, File, PieceId, Square};

/// One side of the game: its pieces still in play, the pieces it has lost, and whether its King is in check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Player {
    color: Color,
    pieces: Vec<PieceId>,
    graveyard: Vec<PieceId>,
    king: PieceId,
    in_check: bool,
}

impl Player {
    /// Collects every piece of `color` on `board` into a new [`Player`].
    ///
    /// Fails unless `color` has exactly one King on the board.
    pub fn from_board(board: &Board, color: Color) -> Result<Self> {
        let pieces = board
            .live_pieces()
            .filter(|(_, piece)| piece.color() == color)
            .map(|(id, _)| id)
            .collect::<Vec<_>>();

        let kings = pieces
            .iter()
            .copied()
            .filter(|&id| board.piece(id).is_king())
            .collect::<Vec<_>>();

        let &[king] = kings.as_slice() else {
            bail!(
                "{} must have exactly one king on the board. Found {}",
                color.name(),
                kings.len()
            );
        };

        Ok(Self {
            color,
            pieces,
            graveyard: Vec::new(),
            king,
            in_check: false,
        })
    }

    /// The side of `color` on a board fresh from [`Board::standard`].
    pub(crate) fn standard(board: &Board, color: Color) -> Self {
        // Each side's back rank is registered from the a-file, followed by its pawns
        let king = PieceId((color.index() * 2 * File::COUNT + File::E.index()) as u8);
        debug_assert!(board.piece(king).is_king() && board.piece(king).color() == color);

        let pieces = board
            .live_pieces()
            .filter(|(_, piece)| piece.color() == color)
            .map(|(id, _)| id)
            .collect();

        Self {
            color,
            pieces,
            graveyard: Vec::new(),
            king,
            in_check: false,
        }
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// Ids of this player's pieces that are still in play.
    #[inline(always)]
    pub fn pieces(&self) -> &[PieceId] {
        &self.pieces
    }

    /// Ids of this player's pieces that have been captured, in the order they were taken.
    #[inline(always)]
    pub fn graveyard(&self) -> &[PieceId] {
        &self.graveyard
    }

    #[inline(always)]
    pub const fn king(&self) -> PieceId {
        self.king
    }

    /// The square this player's King stands on.
    #[inline(always)]
    pub fn king_square(&self, board: &Board) -> Square {
        board.piece(self.king).current()
    }

    #[inline(always)]
    pub const fn is_in_check(&self) -> bool {
        self.in_check
    }

    /// Returns `true` if this player's King has been captured.
    #[inline(always)]
    pub fn has_lost_king(&self) -> bool {
        self.graveyard.contains(&self.king)
    }

    pub(crate) fn set_in_check(&mut self, in_check: bool) {
        self.in_check = in_check;
    }

    /// Moves `id` from the live pieces to the graveyard.
    pub(crate) fn piece_taken(&mut self, id: PieceId) {
        self.pieces.retain(|&live| live != id);
        self.graveyard.push(id);
    }
}
