/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::str::FromStr;

use clap::{builder::PossibleValue, Parser, ValueEnum};

use crate::{GameConfig, MateRule, Square};

/// Command-line arguments of the `arbiter` binary.
#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// How the game is decided.
    #[arg(short, long, value_enum, default_value = "king-capture")]
    pub mate_rule: MateRule,

    /// Enable debug logging.
    #[arg(short, long)]
    pub debug: bool,
}

impl Cli {
    /// The [`GameConfig`] these arguments describe.
    pub fn config(&self) -> GameConfig {
        GameConfig {
            mate_rule: self.mate_rule,
        }
    }
}

/// A command typed during a game instead of a move.
#[derive(Debug, Clone, PartialEq, Eq, Parser)]
#[command(
    multicall = true,
    about,
    rename_all = "lower",
    override_usage("<MOVE> | <COMMAND>")
)]
pub enum EngineCommand {
    /// Print a visual representation of the current board state.
    #[command(alias = "d")]
    Display,

    /// Shows all legal moves in the current position, or for a specific piece.
    Moves { square: Option<Square> },

    /// Print whose turn it is.
    Turn,

    /// Quit the game.
    #[command(alias = "quit")]
    Exit,
}

impl FromStr for EngineCommand {
    type Err = clap::Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::try_parse_from(s.split_ascii_whitespace())
    }
}

impl ValueEnum for MateRule {
    fn value_variants<'a>() -> &'a [Self] {
        &[MateRule::KingCapture, MateRule::Checkmate]
    }

    fn to_possible_value(&self) -> Option<PossibleValue> {
        let value = match self {
            MateRule::KingCapture => PossibleValue::new("king-capture")
                .aliases(["capture", "king"])
                .help("The game ends when a king is captured"),
            MateRule::Checkmate => PossibleValue::new("checkmate")
                .aliases(["mate", "standard"])
                .help("The game also ends on checkmate or stalemate"),
        };

        Some(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_engine_commands() {
        assert_eq!(
            "d".parse::<EngineCommand>().unwrap(),
            EngineCommand::Display
        );
        assert_eq!(
            "quit".parse::<EngineCommand>().unwrap(),
            EngineCommand::Exit
        );
        assert_eq!(
            "moves e2".parse::<EngineCommand>().unwrap(),
            EngineCommand::Moves {
                square: Some(Square::E2)
            }
        );
        assert_eq!(
            "moves".parse::<EngineCommand>().unwrap(),
            EngineCommand::Moves { square: None }
        );
        assert!("e2 e4".parse::<EngineCommand>().is_err());
    }

    #[test]
    fn test_cli_args() {
        let cli = Cli::try_parse_from(["arbiter"]).unwrap();
        assert_eq!(cli.config(), GameConfig::default());
        assert!(!cli.debug);

        let cli = Cli::try_parse_from(["arbiter", "--mate-rule", "mate", "-d"]).unwrap();
        assert_eq!(cli.mate_rule, MateRule::Checkmate);
        assert!(cli.debug);
    }
}
