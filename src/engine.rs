/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::io::{BufRead, Lines, Write};

use anyhow::{Context, Result};
use log::debug;

use crate::{EngineCommand, Game, GameConfig, Move, PieceKind, PlayError, Report};

/// Whether the session should keep soliciting input after a line has been handled.
enum Flow {
    Continue,
    Exit,
}

/// A terminal session: asks the side to move for a move until the game ends or the input runs out.
///
/// Illegal moves are reported and the same player is asked again.
#[derive(Debug, Default)]
pub struct Engine {
    game: Game,
}

impl Engine {
    /// Constructs a new [`Engine`] with a standard game, to be executed with [`Engine::run`].
    pub fn new(config: GameConfig) -> Self {
        Self {
            game: Game::new(config),
        }
    }

    /// Constructs an [`Engine`] that continues an existing game.
    pub fn with_game(game: Game) -> Self {
        Self { game }
    }

    /// Returns a string of the engine's name and current version.
    pub fn name(&self) -> String {
        format!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
    }

    #[inline(always)]
    pub fn game(&self) -> &Game {
        &self.game
    }

    /// Execute the main loop of the session, reading from `input` and writing to `output`.
    ///
    /// Returns once the game is over, an `exit` command is given, or `input` is exhausted.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> Result<()> {
        writeln!(output, "{}\n\n{}", self.name(), self.game.board())?;
        let mut lines = input.lines();

        while !self.game.is_over() {
            write!(output, "{} to move: ", self.game.side_to_move())?;
            output.flush()?;

            // For ctrl + d
            let Some(line) = lines.next() else {
                writeln!(output)?;
                break;
            };
            let line = line.context("Failed to read input")?;

            // Ignore empty lines
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            if let Flow::Exit = self.handle_line(line, &mut lines, &mut output)? {
                break;
            }
        }

        Ok(())
    }

    /// Handles a single line of input, which is either a move or an [`EngineCommand`].
    fn handle_line<R: BufRead, W: Write>(
        &mut self,
        line: &str,
        lines: &mut Lines<R>,
        output: &mut W,
    ) -> Result<Flow> {
        match line.parse::<Move>() {
            Ok(mv) => self.play(mv, lines, output)?,

            // If it's not a move, check if it's a command
            Err(move_err) => match line.parse::<EngineCommand>() {
                Ok(cmd) => return self.execute(cmd, output),

                Err(cmd_err) => {
                    debug!("{line:?} is not a command either: {cmd_err}");
                    writeln!(output, "{move_err:#}")?;
                }
            },
        }

        Ok(Flow::Continue)
    }

    fn execute<W: Write>(&mut self, cmd: EngineCommand, output: &mut W) -> Result<Flow> {
        match cmd {
            EngineCommand::Display => writeln!(output, "{}", self.game.board())?,

            EngineCommand::Moves { square } => {
                // Get the legal moves
                let moves = if let Some(square) = square {
                    self.game.legal_moves_from(square)
                } else {
                    self.game.legal_moves()
                };

                // If there are none, print "(none)"
                let moves_string = if moves.is_empty() {
                    String::from("(none)")
                } else {
                    // Otherwise, join them by comma-space
                    moves
                        .into_iter()
                        .map(|mv| mv.to_string())
                        .collect::<Vec<_>>()
                        .join(", ")
                };
                writeln!(output, "{moves_string}")?;
            }

            EngineCommand::Turn => writeln!(output, "{} to move", self.game.side_to_move())?,

            EngineCommand::Exit => return Ok(Flow::Exit),
        }

        Ok(Flow::Continue)
    }

    /// Plays `mv`, asking which piece to promote to if it is a promotion and none was given.
    fn play<R: BufRead, W: Write>(
        &mut self,
        mut mv: Move,
        lines: &mut Lines<R>,
        output: &mut W,
    ) -> Result<()> {
        if mv.promotion().is_none()
            && self.game.is_promotion(&mv)
            && self.game.evaluate(&mv).is_none()
        {
            if let Some(kind) = prompt_promotion(lines, output)? {
                mv = mv.with_promotion(kind);
            }
        }

        match self.game.play(mv) {
            Ok(report) => self.report(&report, output)?,

            Err(PlayError::Illegal(violation)) => writeln!(output, "Illegal move: {violation}")?,

            Err(err) => writeln!(output, "{err}")?,
        }

        Ok(())
    }

    fn report<W: Write>(&self, report: &Report, output: &mut W) -> Result<()> {
        writeln!(output, "{}", self.game.board())?;

        if let Some(captured) = report.captured {
            writeln!(output, "Captured {captured}")?;
        }

        if let Some(outcome) = report.outcome {
            writeln!(output, "*** Game over: {outcome} ***")?;
        } else if report.check {
            writeln!(output, "*** {} is in check ***", self.game.side_to_move())?;
        }

        Ok(())
    }
}

/// Asks which piece a Pawn should promote to, until a valid choice is given.
///
/// Returns `None` if the input runs out, in which case the Pawn becomes a Queen.
fn prompt_promotion<R: BufRead, W: Write>(
    lines: &mut Lines<R>,
    output: &mut W,
) -> Result<Option<PieceKind>> {
    loop {
        write!(output, "Promote to (queen, rook, bishop, knight): ")?;
        output.flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line.context("Failed to read promotion choice")?;

        match line.trim().parse::<PieceKind>() {
            Ok(kind) if kind.is_promotion_target() => return Ok(Some(kind)),
            Ok(kind) => writeln!(output, "A pawn cannot promote to a {kind}")?,
            Err(err) => writeln!(output, "{err}")?,
        }
    }
}
