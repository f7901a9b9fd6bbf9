/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use crate::{Color, PieceKind, Square};

/// A rule of chess that a proposed move breaks.
///
/// None of these are fatal: the move is simply refused and the same player may try again.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, thiserror::Error)]
pub enum Violation {
    #[error("There is no piece on that square")]
    NoPiece,

    #[error("That piece does not belong to {0}")]
    WrongColor(Color),

    #[error("A {0} cannot move like that")]
    InvalidMovement(PieceKind),

    #[error("The path to {0} is obstructed")]
    ObstructedPath(Square),

    #[error("One of your own pieces occupies that square")]
    OccupiedLanding,

    #[error("Your king is in check and that move does not get it out")]
    InCheck,

    #[error("That move would leave your king in check")]
    ChecksSelf,

    #[error("Pawns may only move diagonally when capturing")]
    IllegalPawn,

    #[error("The pawn is blocked")]
    Blocked,

    #[error("Cannot castle: the king has already moved")]
    KingsMoved,

    #[error("Cannot castle: the rook has already moved")]
    RooksMoved,

    #[error("Cannot castle out of check")]
    CastlingInCheck,

    #[error("Cannot castle through an attacked square")]
    IllegalJump,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_violation_messages_name_their_payload() {
        assert_eq!(
            Violation::WrongColor(Color::Black).to_string(),
            "That piece does not belong to black"
        );
        assert_eq!(
            Violation::InvalidMovement(PieceKind::Knight).to_string(),
            "A knight cannot move like that"
        );
        assert_eq!(
            Violation::ObstructedPath(Square::A8).to_string(),
            "The path to a8 is obstructed"
        );
    }
}
