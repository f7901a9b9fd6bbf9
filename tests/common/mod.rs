/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

#![allow(dead_code)]

use arbiter::{Board, Color, File, Game, GameConfig, Piece, PieceKind, Rank, Square};

/// Builds a board from a piece placement like `"r3k2r/8/8/8/8/8/8/R3K2R"`, listing ranks 8 to 1.
///
/// Pieces are unmoved only where they could still make a first move: Pawns on their second rank,
/// and Kings and Rooks on their home squares. Everything else is marked as having moved.
pub fn board(placement: &str) -> Board {
    let mut board = Board::empty();

    for (row, rank) in placement.split('/').zip(Rank::iter().rev()) {
        let mut file = 0;
        for c in row.chars() {
            if let Some(skip) = c.to_digit(10) {
                file += skip as u8;
                continue;
            }

            let color = if c.is_ascii_uppercase() {
                Color::White
            } else {
                Color::Black
            };
            let kind = PieceKind::from_char(c).unwrap();
            let square = Square::new(File::new(file).unwrap(), rank);

            let mut piece = Piece::new(kind, color, square);
            if !is_home(&piece) {
                piece = piece.moved();
            }
            board.place(piece).unwrap();
            file += 1;
        }
    }

    board
}

/// A game starting from `placement` with `color` to move.
pub fn game(placement: &str, color: Color, config: GameConfig) -> Game {
    Game::with_board(board(placement), config)
        .unwrap()
        .with_side_to_move(color)
}

fn is_home(piece: &Piece) -> bool {
    let square = piece.current();
    let color = piece.color();

    match piece.kind() {
        PieceKind::Pawn => square.rank() == Rank::second(color),
        PieceKind::King => square == Square::new(File::E, Rank::first(color)),
        PieceKind::Rook => {
            square.rank() == Rank::first(color)
                && (square.file() == File::A || square.file() == File::H)
        }
        _ => false,
    }
}
