/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use log::debug;

use crate::{
    is_attacked, is_path_clear, reaches, Board, Castler, Hypothetical, Move, Occupancy, Piece,
    PieceId, Player, Violation,
};

/// Decides whether a [`Move`] is legal for `player` on the current board.
///
/// The evaluator only ever holds shared references, so asking it anything cannot change the game.
/// Checks run in a fixed order and the first rule broken is the one reported:
///
/// 1. **Elemental**: there must be a piece on the origin, and it must be the player's.
/// 2. **Castling**: only for a King attempting to castle. This stage is final: if it passes, the move is legal.
/// 3. **General**: the piece must be able to reach the destination, unobstructed, without landing on a friendly piece.
/// 4. **Check**: the move must not leave the player's King attacked.
/// 5. **Pawn**: Pawns only move diagonally to capture, and only move straight onto empty squares.
#[derive(Debug)]
pub struct Evaluator<'a> {
    board: &'a Board,
    player: &'a Player,
    opponent: &'a Player,
    mv: Move,
    castler: Option<Castler>,
}

impl<'a> Evaluator<'a> {
    /// Prepares to evaluate `mv` as played by `player` against `opponent`.
    pub fn new(board: &'a Board, player: &'a Player, opponent: &'a Player, mv: &Move) -> Self {
        let castler = board
            .occupant(mv.from())
            .and_then(|id| Castler::detect(board, player, id, mv.to()));

        Self {
            board,
            player,
            opponent,
            mv: *mv,
            castler,
        }
    }

    /// The castling attempt this move represents, if any.
    #[inline(always)]
    pub fn castler(&self) -> Option<&Castler> {
        self.castler.as_ref()
    }

    /// Returns the first rule `mv` breaks, or `None` if it is legal.
    pub fn evaluate(&self) -> Option<Violation> {
        let violation = match self.elemental() {
            Err(violation) => Some(violation),

            Ok(_) if self.castler.is_some() => self.castling(),

            Ok((id, piece)) => self
                .general(id, piece)
                .or_else(|| self.check())
                .or_else(|| self.pawn(piece)),
        };

        if let Some(violation) = violation {
            debug!(
                "{} cannot play {}: {violation:?}",
                self.player.color(),
                self.mv
            );
        }

        violation
    }

    /// Fetches the moving piece, if there is one and it belongs to the player.
    fn elemental(&self) -> Result<(PieceId, &'a Piece), Violation> {
        let id = self
            .board
            .occupant(self.mv.from())
            .ok_or(Violation::NoPiece)?;
        let piece = self.board.piece(id);

        if piece.color() != self.player.color() {
            return Err(Violation::WrongColor(self.player.color()));
        }

        Ok((id, piece))
    }

    fn castling(&self) -> Option<Violation> {
        let castler = self.castler.as_ref()?;
        let king = self.board.piece(castler.king());
        let rook = self.board.piece(castler.rook());

        if king.has_moved() {
            return Some(Violation::KingsMoved);
        }

        if rook.has_moved() {
            return Some(Violation::RooksMoved);
        }

        if castler.is_obstructed(self.board) {
            return Some(Violation::ObstructedPath(self.mv.to()));
        }

        if self.player.is_in_check() {
            return Some(Violation::CastlingInCheck);
        }

        let view = castler.castled(self.board);
        if is_attacked(&view, self.opponent, castler.king_landing()) {
            return Some(Violation::ChecksSelf);
        }

        if castler.jumped_square_under_attack(self.board, self.opponent) {
            return Some(Violation::IllegalJump);
        }

        None
    }

    fn general(&self, id: PieceId, piece: &Piece) -> Option<Violation> {
        let to = self.mv.to();
        let rays = piece.rays();

        if !reaches(&rays, to) {
            return Some(Violation::InvalidMovement(piece.kind()));
        }

        if !is_path_clear(&rays, to, Some(id), self.board) {
            return Some(Violation::ObstructedPath(to));
        }

        let friendly = self
            .board
            .piece_at(to)
            .is_some_and(|occupant| occupant.color() == self.player.color());
        if friendly {
            return Some(Violation::OccupiedLanding);
        }

        None
    }

    /// Plays the move on a [`Hypothetical`] board and looks for attacks on the player's King.
    fn check(&self) -> Option<Violation> {
        let view = Hypothetical::new(self.board).with_move(self.mv.from(), self.mv.to());
        let king = view.position_of(self.player.king())?;

        if !is_attacked(&view, self.opponent, king) {
            return None;
        }

        if self.player.is_in_check() {
            Some(Violation::InCheck)
        } else {
            Some(Violation::ChecksSelf)
        }
    }

    fn pawn(&self, piece: &Piece) -> Option<Violation> {
        if !piece.is_pawn() {
            return None;
        }

        let from = self.mv.from();
        let to = self.mv.to();
        let diagonal = from.file() != to.file();

        if diagonal {
            let captures = self
                .board
                .piece_at(to)
                .is_some_and(|occupant| occupant.color() != piece.color());
            (!captures).then_some(Violation::IllegalPawn)
        } else {
            self.board.is_occupied(to).then_some(Violation::Blocked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Color, PieceKind, Square};

    fn evaluate(board: &Board, color: Color, from: Square, to: Square) -> Option<Violation> {
        let player = Player::from_board(board, color).unwrap();
        let opponent = Player::from_board(board, color.opponent()).unwrap();
        Evaluator::new(board, &player, &opponent, &Move::new(from, to)).evaluate()
    }

    fn kings() -> Board {
        let mut board = Board::empty();
        board
            .place(Piece::new(PieceKind::King, Color::White, Square::E1))
            .unwrap();
        board
            .place(Piece::new(PieceKind::King, Color::Black, Square::E8))
            .unwrap();
        board
    }

    #[test]
    fn test_elemental_comes_first() {
        let board = Board::standard();
        assert_eq!(
            evaluate(&board, Color::White, Square::E4, Square::E5),
            Some(Violation::NoPiece)
        );
        assert_eq!(
            evaluate(&board, Color::White, Square::E7, Square::E5),
            Some(Violation::WrongColor(Color::White))
        );
    }

    #[test]
    fn test_general_precedence() {
        let board = Board::standard();

        // A Bishop cannot move straight, even though the path is also blocked
        assert_eq!(
            evaluate(&board, Color::White, Square::C1, Square::C3),
            Some(Violation::InvalidMovement(PieceKind::Bishop))
        );
        assert_eq!(
            evaluate(&board, Color::White, Square::C1, Square::E3),
            Some(Violation::ObstructedPath(Square::E3))
        );
        assert_eq!(
            evaluate(&board, Color::White, Square::G1, Square::E2),
            Some(Violation::OccupiedLanding)
        );
        assert_eq!(evaluate(&board, Color::White, Square::G1, Square::F3), None);
        assert_eq!(evaluate(&board, Color::White, Square::E2, Square::E4), None);
    }

    #[test]
    fn test_pinned_piece_checks_self() {
        let mut board = kings();
        board
            .place(Piece::new(PieceKind::Knight, Color::White, Square::E2))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Rook, Color::Black, Square::E7))
            .unwrap();

        assert_eq!(
            evaluate(&board, Color::White, Square::E2, Square::C3),
            Some(Violation::ChecksSelf)
        );
    }

    #[test]
    fn test_in_check_must_be_resolved() {
        let mut board = kings();
        board
            .place(Piece::new(PieceKind::Rook, Color::Black, Square::E5))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Knight, Color::White, Square::B1))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Bishop, Color::White, Square::C3))
            .unwrap();

        let mut player = Player::from_board(&board, Color::White).unwrap();
        player.set_in_check(true);
        let opponent = Player::from_board(&board, Color::Black).unwrap();
        let eval = |from, to| {
            let mv = Move::new(from, to);
            Evaluator::new(&board, &player, &opponent, &mv).evaluate()
        };

        assert_eq!(eval(Square::B1, Square::A3), Some(Violation::InCheck));
        // Capturing the attacker resolves the check
        assert_eq!(eval(Square::C3, Square::E5), None);
        assert_eq!(eval(Square::B1, Square::D2), Some(Violation::InCheck));
        // Stepping off the file works, stepping along it doesn't
        assert_eq!(eval(Square::E1, Square::D1), None);
        assert_eq!(eval(Square::E1, Square::E2), Some(Violation::InCheck));
    }

    #[test]
    fn test_pawn_rules() {
        let mut board = kings();
        board
            .place(Piece::new(PieceKind::Pawn, Color::White, Square::D4))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Pawn, Color::Black, Square::D5))
            .unwrap();
        board
            .place(Piece::new(PieceKind::Knight, Color::Black, Square::C5))
            .unwrap();

        assert_eq!(
            evaluate(&board, Color::White, Square::D4, Square::E5),
            Some(Violation::IllegalPawn)
        );
        assert_eq!(
            evaluate(&board, Color::White, Square::D4, Square::D5),
            Some(Violation::Blocked)
        );
        assert_eq!(evaluate(&board, Color::White, Square::D4, Square::C5), None);
        assert_eq!(
            evaluate(&board, Color::White, Square::D4, Square::D6),
            Some(Violation::InvalidMovement(PieceKind::Pawn))
        );
    }

    #[test]
    fn test_castling_is_final() {
        let mut board = kings();
        board
            .place(Piece::new(PieceKind::Rook, Color::White, Square::H1))
            .unwrap();

        let player = Player::from_board(&board, Color::White).unwrap();
        let opponent = Player::from_board(&board, Color::Black).unwrap();
        let evaluator = Evaluator::new(
            &board,
            &player,
            &opponent,
            &Move::new(Square::E1, Square::G1),
        );

        assert!(evaluator.castler().is_some());
        // A King's rays never include g1 from e1, but castling never reaches the general stage
        assert_eq!(evaluator.evaluate(), None);
    }

    #[test]
    fn test_evaluation_does_not_mutate() {
        let board = Board::standard();
        let before = board.clone();
        for (from, to) in [(Square::E2, Square::E4), (Square::D1, Square::D4)] {
            evaluate(&board, Color::White, from, to);
        }
        assert_eq!(board, before);
    }
}
