/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

mod common;

use arbiter::{Color, Game, GameConfig, Move, Square};

/// Counts the leaves of the legal move tree of `game`, `depth` moves deep.
fn perft(game: &Game, depth: usize) -> u64 {
    if depth == 0 {
        return 1;
    }

    let moves = game.legal_moves();
    if depth == 1 {
        return moves.len() as u64;
    }

    moves
        .into_iter()
        .map(|mv| {
            let mut next = game.clone();
            next.play(mv)
                .unwrap_or_else(|e| panic!("Enumerated {mv} but playing it failed: {e}"));
            perft(&next, depth - 1)
        })
        .sum()
}

fn test_perft_nodes(game: &Game, results: &[u64]) {
    for (depth, expected) in results.iter().enumerate() {
        let nodes = perft(game, depth + 1);
        assert_eq!(nodes, *expected, "PERFT({}) failed", depth + 1);
    }
}

#[test]
fn test_startpos_perft() {
    test_perft_nodes(&Game::default(), &[20, 400, 8902]);
}

#[test]
fn test_castling_perft() {
    let game = common::game(
        "r3k2r/8/8/8/8/8/8/R3K2R",
        Color::White,
        GameConfig::default(),
    );
    test_perft_nodes(&game, &[26, 568]);
}

#[test]
fn test_promotion_perft() {
    let game = common::game(
        "n1n5/PPPk4/8/8/8/8/4Kppp/5N1N",
        Color::Black,
        GameConfig::default(),
    );
    test_perft_nodes(&game, &[24, 496]);
}

#[test]
fn test_en_passant_perft() {
    let mut game = common::game(
        "4k3/3p4/8/2P1P3/8/8/8/4K3",
        Color::Black,
        GameConfig::default(),
    );
    game.play(Move::new(Square::D7, Square::D5)).unwrap();

    // Both pawns may take en passant on d6
    test_perft_nodes(&game, &[9, 47]);
}
