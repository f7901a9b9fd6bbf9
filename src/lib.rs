/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// Path tracing and threat detection.
mod attacks;

/// Squares, pieces, and the board they live on.
mod board;

/// Detection of castling attempts.
mod castling;

/// Command-line arguments and in-game commands.
mod cli;

/// The terminal session that drives a game.
mod engine;

/// The ordered legality checks run against every proposed move.
mod evaluator;

/// The game itself: executing moves and tracking their consequences.
mod game;

/// Moves as typed by a player.
mod moves;

/// Each side's pieces, captured pieces, and check status.
mod player;

/// Rules a move can break.
mod violation;

pub use attacks::*;
pub use board::*;
pub use castling::*;
pub use cli::*;
pub use engine::*;
pub use evaluator::*;
pub use game::*;
pub use moves::*;
pub use player::*;
pub use violation::*;
