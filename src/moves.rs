/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Context, Result};

use crate::{PieceKind, Square};

/// A proposed move: where a piece comes from, where it goes, and what it becomes if it is a promoting Pawn.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Move {
    from: Square,
    to: Square,
    promotion: Option<PieceKind>,
}

impl Move {
    #[inline(always)]
    pub const fn new(from: Square, to: Square) -> Self {
        Self {
            from,
            to,
            promotion: None,
        }
    }

    /// Attaches the kind a promoting Pawn should become.
    #[inline(always)]
    pub const fn with_promotion(mut self, kind: PieceKind) -> Self {
        self.promotion = Some(kind);
        self
    }

    #[inline(always)]
    pub const fn from(&self) -> Square {
        self.from
    }

    #[inline(always)]
    pub const fn to(&self) -> Square {
        self.to
    }

    #[inline(always)]
    pub const fn promotion(&self) -> Option<PieceKind> {
        self.promotion
    }
}

impl FromStr for Move {
    type Err = anyhow::Error;

    /// Parses two coordinates, optionally followed by a promotion.
    ///
    /// Accepts `"e2 e4"`, `"e2e4"`, `"e7 e8 q"`, `"e7 e8 queen"` and `"e7e8q"`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Move, PieceKind, Square};
    /// let mv: Move = "e2 e4".parse().unwrap();
    /// assert_eq!((mv.from(), mv.to()), (Square::E2, Square::E4));
    ///
    /// let mv: Move = "b7b8n".parse().unwrap();
    /// assert_eq!(mv.promotion(), Some(PieceKind::Knight));
    ///
    /// assert!("e2".parse::<Move>().is_err());
    /// ```
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let tokens = s.split_ascii_whitespace().collect::<Vec<_>>();

        let (from, to, promotion) = match tokens.as_slice() {
            [compact] => {
                let (Some(from), Some(to), Some(rest)) =
                    (compact.get(..2), compact.get(2..4), compact.get(4..))
                else {
                    bail!("Invalid move {s:?}: expected two squares, like \"e2 e4\"");
                };
                (from, to, (!rest.is_empty()).then_some(rest))
            }
            [from, to] => (*from, *to, None),
            [from, to, promotion] => (*from, *to, Some(*promotion)),
            _ => bail!("Invalid move {s:?}: expected two squares, like \"e2 e4\""),
        };

        let from = from
            .parse()
            .with_context(|| format!("Invalid origin square in move {s:?}"))?;
        let to = to
            .parse()
            .with_context(|| format!("Invalid destination square in move {s:?}"))?;
        let mut mv = Self::new(from, to);

        if let Some(promotion) = promotion {
            let kind = promotion.parse::<PieceKind>()?;
            if !kind.is_promotion_target() {
                bail!("A pawn cannot promote to a {kind}");
            }
            mv = mv.with_promotion(kind);
        }

        Ok(mv)
    }
}

impl fmt::Display for Move {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.from, self.to)?;
        if let Some(kind) = self.promotion {
            write!(f, "{}", kind.char())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_move_parsing() {
        let expected = Move::new(Square::E2, Square::E4);
        assert_eq!("e2 e4".parse::<Move>().unwrap(), expected);
        assert_eq!("e2e4".parse::<Move>().unwrap(), expected);
        assert_eq!("  e2   e4 ".parse::<Move>().unwrap(), expected);

        let promotion = Move::new(Square::E7, Square::E8).with_promotion(PieceKind::Rook);
        assert_eq!("e7 e8 r".parse::<Move>().unwrap(), promotion);
        assert_eq!("e7 e8 rook".parse::<Move>().unwrap(), promotion);
        assert_eq!("e7e8r".parse::<Move>().unwrap(), promotion);
    }

    #[test]
    fn test_move_parsing_rejects_garbage() {
        assert!("".parse::<Move>().is_err());
        assert!("e9 e4".parse::<Move>().is_err());
        assert!("e2 e4 e5 e6".parse::<Move>().is_err());
        assert!("e7 e8 k".parse::<Move>().is_err());
        assert!("e7 e8 p".parse::<Move>().is_err());
        assert!("é2e4".parse::<Move>().is_err());
    }

    #[test]
    fn test_move_display() {
        assert_eq!(Move::new(Square::G1, Square::F3).to_string(), "g1f3");
        assert_eq!(
            Move::new(Square::A2, Square::A1)
                .with_promotion(PieceKind::Knight)
                .to_string(),
            "a2a1n"
        );
    }
}
