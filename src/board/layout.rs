/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::fmt;

use anyhow::{bail, Result};
use arrayvec::ArrayVec;

use super::{Color, File, Piece, PieceId, PieceKind, Rank, Square};

/// Back-rank layout of the standard starting position, from the a-file to the h-file.
const BACK_RANK: [PieceKind; File::COUNT] = [
    PieceKind::Rook,
    PieceKind::Knight,
    PieceKind::Bishop,
    PieceKind::Queen,
    PieceKind::King,
    PieceKind::Bishop,
    PieceKind::Knight,
    PieceKind::Rook,
];

/// Read-only access to which piece stands on which square.
///
/// Implemented by [`Board`] itself and by [`Hypothetical`], so the rules can be asked the same
/// questions about the real board and about a board where a move has been played in imagination.
pub trait Occupancy {
    /// The piece standing on `square`, if any.
    fn occupant(&self, square: Square) -> Option<PieceId>;

    /// Returns `true` if a piece stands on `square`.
    #[inline(always)]
    fn is_occupied(&self, square: Square) -> bool {
        self.occupant(square).is_some()
    }
}

/// The chess board: which piece occupies each square, plus every piece created for the game.
///
/// Pieces are never removed from the board's storage; a captured piece is merely detached from its square.
/// Both sides of the square/piece relationship are only ever updated together, by [`Board::relocate`] and [`Board::capture`].
#[derive(Clone, PartialEq, Eq)]
pub struct Board {
    pieces: Vec<Piece>,
    squares: [Option<PieceId>; Square::COUNT],
}

impl Board {
    /// Creates an empty [`Board`].
    pub fn empty() -> Self {
        Self {
            pieces: Vec::with_capacity(32),
            squares: [None; Square::COUNT],
        }
    }

    /// Creates a [`Board`] with the standard starting position.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Board, PieceKind, Square};
    /// let board = Board::standard();
    /// assert_eq!(board.piece_at(Square::E1).unwrap().kind(), PieceKind::King);
    /// assert_eq!(board.piece_at(Square::D8).unwrap().kind(), PieceKind::Queen);
    /// assert!(board.piece_at(Square::E4).is_none());
    /// ```
    pub fn standard() -> Self {
        let mut board = Self::empty();

        for color in Color::all() {
            for (file, kind) in File::iter().zip(BACK_RANK) {
                let square = Square::new(file, Rank::first(color));
                let id = board.register(Piece::new(kind, color, square));
                board.squares[square] = Some(id);
            }

            for file in File::iter() {
                let square = Square::new(file, Rank::second(color));
                let id = board.register(Piece::new(PieceKind::Pawn, color, square));
                board.squares[square] = Some(id);
            }
        }

        board
    }

    /// Places `piece` on its current square, returning its id.
    ///
    /// Fails if the square is already occupied.
    pub fn place(&mut self, piece: Piece) -> Result<PieceId> {
        let square = piece.current();
        if let Some(occupant) = self.piece_at(square) {
            bail!("Cannot place {piece}: {square} is already occupied by {occupant}");
        }

        let id = self.register(piece);
        self.squares[square] = Some(id);
        Ok(id)
    }

    /// Fetches the piece with the provided id.
    ///
    /// # Panics
    ///
    /// If `id` was not issued by this board.
    #[inline(always)]
    pub fn piece(&self, id: PieceId) -> &Piece {
        &self.pieces[id.index()]
    }

    /// Fetches the piece standing on `square`, if any.
    #[inline(always)]
    pub fn piece_at(&self, square: Square) -> Option<&Piece> {
        self.occupant(square).map(|id| self.piece(id))
    }

    /// Iterates over every piece on the board along with its id, in no particular order.
    pub fn live_pieces(&self) -> impl Iterator<Item = (PieceId, &Piece)> + '_ {
        self.squares
            .iter()
            .flatten()
            .map(|&id| (id, self.piece(id)))
    }

    /// Moves the piece `id` to `to`, vacating its previous square.
    ///
    /// Whatever stood on `to` is overwritten, so captures must go through [`Board::capture`] first.
    pub(crate) fn relocate(&mut self, id: PieceId, to: Square) {
        let from = self.piece(id).current();
        debug_assert_eq!(self.squares[from], Some(id), "{id:?} is not on {from}");

        self.squares[from] = None;
        self.squares[to] = Some(id);
        self.pieces[id.index()].relocate(to);
    }

    /// Detaches whatever piece stands on `square` from the board, returning its id.
    pub(crate) fn capture(&mut self, square: Square) -> Option<PieceId> {
        self.squares[square].take()
    }

    /// Replaces the kind of the (pawn) piece `id`.
    pub(crate) fn promote(&mut self, id: PieceId, kind: PieceKind) {
        self.pieces[id.index()].promote(kind);
    }

    fn register(&mut self, piece: Piece) -> PieceId {
        let id = PieceId(self.pieces.len() as u8);
        self.pieces.push(piece);
        id
    }
}

impl Occupancy for Board {
    #[inline(always)]
    fn occupant(&self, square: Square) -> Option<PieceId> {
        self.squares[square]
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for rank in Rank::iter().rev() {
            write!(f, "{rank}| ")?;

            for file in File::iter() {
                let occupant = self
                    .piece_at(Square::new(file, rank))
                    .map_or('.', Piece::symbol);
                write!(f, "{occupant} ")?;
            }

            writeln!(f)?;
        }

        write!(f, " +")?;
        for _ in File::iter() {
            write!(f, "--")?;
        }
        write!(f, "\n   ")?;
        for file in File::iter() {
            write!(f, "{file} ")?;
        }

        Ok(())
    }
}

impl fmt::Debug for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self}")
    }
}

/// A view of a [`Board`] on which some pieces have been moved without touching the board itself.
///
/// Used to ask "would my King be attacked if I played this?" while keeping the rules read-only.
/// A relocation onto an occupied square hides the piece that stood there, as a capture would.
///
/// Only the rules build views with relocations; outside the crate a view always mirrors its board.
/// ```compile_fail
/// # use arbiter::{Board, Hypothetical, Square};
/// let board = Board::standard();
/// let view = Hypothetical::new(&board).with_move(Square::E2, Square::E4);
/// ```
#[derive(Clone, Debug)]
pub struct Hypothetical<'a> {
    board: &'a Board,
    relocations: ArrayVec<(PieceId, Square, Square), 2>,
}

impl<'a> Hypothetical<'a> {
    /// A view identical to `board`.
    pub fn new(board: &'a Board) -> Self {
        Self {
            board,
            relocations: ArrayVec::new(),
        }
    }

    /// Adds the relocation of whatever piece stands on `from` to `to`.
    ///
    /// Does nothing if `from` is empty. At most two relocations fit, which covers castling.
    pub(crate) fn with_move(mut self, from: Square, to: Square) -> Self {
        if let Some(id) = self.board.occupant(from) {
            self.relocations.push((id, from, to));
        }
        self
    }

    /// Where the piece `id` stands in this view.
    ///
    /// Returns `None` if the piece has been captured, either on the real board or in this view.
    pub fn position_of(&self, id: PieceId) -> Option<Square> {
        let square = self
            .relocations
            .iter()
            .find_map(|&(moved, _, to)| (moved == id).then_some(to))
            .unwrap_or_else(|| self.board.piece(id).current());

        (self.occupant(square) == Some(id)).then_some(square)
    }

    /// The board this view was built on.
    #[inline(always)]
    pub fn board(&self) -> &'a Board {
        self.board
    }
}

impl Occupancy for Hypothetical<'_> {
    fn occupant(&self, square: Square) -> Option<PieceId> {
        // Later relocations win, so a destination always shows its newest arrival
        if let Some(&(id, _, _)) = self.relocations.iter().rfind(|(_, _, to)| *to == square) {
            return Some(id);
        }

        if self.relocations.iter().any(|(_, from, _)| *from == square) {
            return None;
        }

        self.board.occupant(square)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_layout() {
        let board = Board::standard();
        assert_eq!(board.live_pieces().count(), 32);
        for file in File::iter() {
            let white = board.piece_at(Square::new(file, Rank::TWO)).unwrap();
            let black = board.piece_at(Square::new(file, Rank::SEVEN)).unwrap();
            assert!(white.is_pawn() && white.color() == Color::White);
            assert!(black.is_pawn() && black.color() == Color::Black);
        }
        assert_eq!(board.piece_at(Square::A8).unwrap().kind(), PieceKind::Rook);
    }

    #[test]
    fn test_place_rejects_occupied_square() {
        let mut board = Board::empty();
        board
            .place(Piece::new(PieceKind::Rook, Color::White, Square::A1))
            .unwrap();
        assert!(board
            .place(Piece::new(PieceKind::Knight, Color::Black, Square::A1))
            .is_err());
    }

    #[test]
    fn test_relocate_keeps_both_sides_consistent() {
        let mut board = Board::empty();
        let id = board
            .place(Piece::new(PieceKind::Queen, Color::White, Square::D1))
            .unwrap();

        board.relocate(id, Square::D5);
        assert_eq!(board.occupant(Square::D5), Some(id));
        assert_eq!(board.occupant(Square::D1), None);
        assert_eq!(board.piece(id).current(), Square::D5);
        assert_eq!(board.piece(id).start(), Square::D1);
        assert!(board.piece(id).has_moved());
    }

    #[test]
    fn test_hypothetical_leaves_board_untouched() {
        let mut board = Board::empty();
        let rook = board
            .place(Piece::new(PieceKind::Rook, Color::White, Square::A1))
            .unwrap();
        let knight = board
            .place(Piece::new(PieceKind::Knight, Color::Black, Square::A5))
            .unwrap();
        let before = board.clone();

        let view = Hypothetical::new(&board).with_move(Square::A1, Square::A5);
        assert_eq!(view.occupant(Square::A1), None);
        assert_eq!(view.occupant(Square::A5), Some(rook));
        assert_eq!(view.position_of(rook), Some(Square::A5));
        assert_eq!(view.position_of(knight), None);

        assert_eq!(board, before);
    }

    #[test]
    fn test_display() {
        let rendered = Board::standard().to_string();
        let first = rendered.lines().next().unwrap();
        assert_eq!(first, "8| r n b q k b n r ");
        assert!(rendered.ends_with("a b c d e f g h "));
    }
}
