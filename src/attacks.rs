/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{path_to, reaches, Hypothetical, Occupancy, PieceId, Player, Rays, Square};

/// Checks whether a piece with the provided `rays` can travel to `target` without jumping over anything.
///
/// Every square on the path to `target` except `target` itself must be empty, or occupied by `mover`.
/// If no ray contains `target` there is no path to obstruct, and this returns `true`.
///
/// Knight and King rays are one square long, so for them this is always `true`.
pub fn is_path_clear(
    rays: &Rays,
    target: Square,
    mover: Option<PieceId>,
    occupancy: &impl Occupancy,
) -> bool {
    let Some((_, before_target)) = path_to(rays, target).and_then(<[Square]>::split_last) else {
        return true;
    };

    before_target
        .iter()
        .all(|&square| match occupancy.occupant(square) {
            None => true,
            occupant => occupant == mover,
        })
}

/// Returns `true` if any of `attacker`'s pieces still in play within `view` attacks `target`.
///
/// A piece attacks a square if that square lies on one of its attack rays and the path to it is clear.
pub fn is_attacked(view: &Hypothetical<'_>, attacker: &Player, target: Square) -> bool {
    attackers(view, attacker, target).next().is_some()
}

/// Iterates over every piece of `attacker` that attacks `target` within `view`.
pub fn attackers<'a>(
    view: &'a Hypothetical<'a>,
    attacker: &'a Player,
    target: Square,
) -> impl Iterator<Item = PieceId> + 'a {
    attacker.pieces().iter().copied().filter(move |&id| {
        let Some(position) = view.position_of(id) else {
            // Captured in this view
            return false;
        };

        let mut piece = *view.board().piece(id);
        if position != piece.current() {
            piece.relocate(position);
        }

        let rays = piece.attack_rays();
        reaches(&rays, target) && is_path_clear(&rays, target, Some(id), view)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Board, Color, Piece, PieceKind};

    fn rook_board() -> (Board, PieceId) {
        let mut board = Board::empty();
        let rook = board
            .place(Piece::new(PieceKind::Rook, Color::White, Square::A1))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Pawn, Color::Black, Square::A4))
            .unwrap();
        (board, rook)
    }

    #[test]
    fn test_path_blocked_beyond_obstacle() {
        let (board, rook) = rook_board();
        let rays = board.piece(rook).rays();

        assert!(is_path_clear(&rays, Square::A3, Some(rook), &board));
        // The obstacle itself is the target, so it doesn't block
        assert!(is_path_clear(&rays, Square::A4, Some(rook), &board));
        assert!(!is_path_clear(&rays, Square::A5, Some(rook), &board));
        assert!(!is_path_clear(&rays, Square::A8, Some(rook), &board));
        assert!(is_path_clear(&rays, Square::H1, Some(rook), &board));
    }

    #[test]
    fn test_path_clear_is_idempotent_and_read_only() {
        let (board, rook) = rook_board();
        let before = board.clone();
        let rays = board.piece(rook).rays();

        let first = is_path_clear(&rays, Square::A8, Some(rook), &board);
        for _ in 0..3 {
            assert_eq!(is_path_clear(&rays, Square::A8, Some(rook), &board), first);
        }
        assert_eq!(board, before);
    }

    #[test]
    fn test_mover_does_not_block_itself() {
        // A Queen on d4 checking whether a Rook on d1 can reach d8 through her square
        let mut board = Board::empty();
        let rook = board
            .place(Piece::new(PieceKind::Rook, Color::White, Square::D1))
            .unwrap();
        let queen = board
            .place(Piece::new(PieceKind::Queen, Color::White, Square::D4))
            .unwrap();
        let rays = board.piece(rook).rays();

        assert!(!is_path_clear(&rays, Square::D8, Some(rook), &board));
        assert!(is_path_clear(&rays, Square::D8, Some(queen), &board));
    }

    #[test]
    fn test_attacks_respect_blockers_and_captures() {
        let mut board = Board::empty();
        board
            .place(Piece::new(PieceKind::King, Color::White, Square::E1))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Bishop, Color::White, Square::E2))
            .unwrap();
        board
            .place(Piece::new(PieceKind::King, Color::Black, Square::H8))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Rook, Color::Black, Square::E8))
            .unwrap();
        let black = Player::from_board(&board, Color::Black).unwrap();

        let view = Hypothetical::new(&board);
        assert!(!is_attacked(&view, &black, Square::E1));
        assert!(is_attacked(&view, &black, Square::E2));

        // Moving the Bishop off the file exposes the King
        let view = Hypothetical::new(&board).with_move(Square::E2, Square::D3);
        assert!(is_attacked(&view, &black, Square::E1));

        // Capturing the Rook removes the threat entirely
        let mut board = board.clone();
        let queen = board
            .place(Piece::new(PieceKind::Queen, Color::White, Square::A8))
            .unwrap();
        let view = Hypothetical::new(&board)
            .with_move(Square::E2, Square::D3)
            .with_move(Square::A8, Square::E8);
        assert_eq!(view.position_of(queen), Some(Square::E8));
        assert!(!is_attacked(&view, &black, Square::E1));
    }

    #[test]
    fn test_pawns_attack_diagonally_only() {
        let mut board = Board::empty();
        board
            .place(Piece::new(PieceKind::King, Color::Black, Square::E8))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Pawn, Color::Black, Square::D7))
            .unwrap();
        let black = Player::from_board(&board, Color::Black).unwrap();
        let view = Hypothetical::new(&board);

        assert!(is_attacked(&view, &black, Square::C6));
        assert!(is_attacked(&view, &black, Square::E6));
        assert!(!is_attacked(&view, &black, Square::D6));
        assert!(!is_attacked(&view, &black, Square::D5));
    }
}
