/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{fmt, str::FromStr};

use anyhow::{bail, Result};

use super::{
    rays::{
        slide, slider_rays, ALL_DELTAS, DIAGONAL_DELTAS, KNIGHT_DELTAS, MAX_RAY_LEN,
        ORTHOGONAL_DELTAS,
    },
    Rank, Ray, Rays, Square,
};

/// Represents the color of a player or piece.
///
/// White moves first, and therefore [`Color`] defaults to [`Color::White`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum Color {
    #[default]
    White,
    Black,
}

impl Color {
    /// Number of color variants.
    pub const COUNT: usize = 2;

    /// An array of both colors, starting with White.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        [Self::White, Self::Black]
    }

    /// Returns this [`Color`]'s opposite.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Color;
    /// assert_eq!(Color::White.opponent(), Color::Black);
    /// assert_eq!(Color::Black.opponent(), Color::White);
    /// ```
    #[inline(always)]
    pub const fn opponent(&self) -> Self {
        match self {
            Self::White => Self::Black,
            Self::Black => Self::White,
        }
    }

    /// Returns a multiplier for negating numbers relative to this color.
    ///
    /// White pawns advance up the board (`+1`), Black pawns down it (`-1`).
    #[inline(always)]
    pub const fn negation_multiplier(&self) -> i8 {
        match self {
            Self::White => 1,
            Self::Black => -1,
        }
    }

    /// Will be `0` for White, `1` for Black. Useful for indexing.
    #[inline(always)]
    pub const fn index(&self) -> usize {
        *self as usize
    }

    /// Fetches a human-readable name for this [`Color`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::White => "white",
            Self::Black => "black",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// Represents the kind (or "role") that a chess piece can be.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(u8)]
pub enum PieceKind {
    Pawn,
    Knight,
    Bishop,
    Rook,
    Queen,
    King,
}

impl PieceKind {
    /// Number of piece variants.
    pub const COUNT: usize = 6;

    /// The kinds a Pawn may promote to.
    pub const PROMOTIONS: [Self; 4] = [Self::Queen, Self::Rook, Self::Bishop, Self::Knight];

    /// An array of all 6 [`PieceKind`]s.
    #[inline(always)]
    pub const fn all() -> [Self; Self::COUNT] {
        use PieceKind::*;
        [Pawn, Knight, Bishop, Rook, Queen, King]
    }

    /// Creates a [`PieceKind`] from its letter (case-insensitive).
    ///
    /// # Example
    /// ```
    /// # use arbiter::PieceKind;
    /// assert_eq!(PieceKind::from_char('Q').unwrap(), PieceKind::Queen);
    /// assert_eq!(PieceKind::from_char('n').unwrap(), PieceKind::Knight);
    /// assert!(PieceKind::from_char('x').is_err());
    /// ```
    pub fn from_char(kind: char) -> Result<Self> {
        match kind {
            'P' | 'p' => Ok(Self::Pawn),
            'N' | 'n' => Ok(Self::Knight),
            'B' | 'b' => Ok(Self::Bishop),
            'R' | 'r' => Ok(Self::Rook),
            'Q' | 'q' => Ok(Self::Queen),
            'K' | 'k' => Ok(Self::King),
            _ => bail!("Invalid char for PieceKind: Got {kind}."),
        }
    }

    /// Returns `true` if a Pawn may promote to this kind.
    #[inline(always)]
    pub const fn is_promotion_target(&self) -> bool {
        matches!(self, Self::Knight | Self::Bishop | Self::Rook | Self::Queen)
    }

    /// Fetches a human-readable name for this [`PieceKind`].
    #[inline(always)]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Pawn => "pawn",
            Self::Knight => "knight",
            Self::Bishop => "bishop",
            Self::Rook => "rook",
            Self::Queen => "queen",
            Self::King => "king",
        }
    }

    /// The lowercase letter of this [`PieceKind`].
    #[inline(always)]
    pub const fn char(&self) -> char {
        match self {
            Self::Pawn => 'p',
            Self::Knight => 'n',
            Self::Bishop => 'b',
            Self::Rook => 'r',
            Self::Queen => 'q',
            Self::King => 'k',
        }
    }
}

impl FromStr for PieceKind {
    type Err = anyhow::Error;
    /// Accepts a single letter (`"q"`) or a full name (`"queen"`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return Self::from_char(c);
        }

        Self::all()
            .into_iter()
            .find(|kind| kind.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| anyhow::anyhow!("Invalid str for PieceKind: Got {s:?}"))
    }
}

impl fmt::Display for PieceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.name().fmt(f)
    }
}

/// Identifies a piece for the lifetime of a game, whether it is on the board or captured.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[repr(transparent)]
pub struct PieceId(pub(crate) u8);

impl PieceId {
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }
}

/// A chess piece: its kind, owner, where it started, where it is now, and whether it has moved.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub struct Piece {
    kind: PieceKind,
    color: Color,
    start: Square,
    current: Square,
    has_moved: bool,
}

impl Piece {
    /// Creates a new, unmoved [`Piece`] standing on `square`.
    #[inline(always)]
    pub const fn new(kind: PieceKind, color: Color, square: Square) -> Self {
        Self {
            kind,
            color,
            start: square,
            current: square,
            has_moved: false,
        }
    }

    /// Marks this piece as having moved already, for setting up positions mid-game.
    #[inline(always)]
    pub const fn moved(mut self) -> Self {
        self.has_moved = true;
        self
    }

    #[inline(always)]
    pub const fn kind(&self) -> PieceKind {
        self.kind
    }

    #[inline(always)]
    pub const fn color(&self) -> Color {
        self.color
    }

    /// The square this piece was placed on when the game was set up.
    #[inline(always)]
    pub const fn start(&self) -> Square {
        self.start
    }

    /// The square this piece currently stands on (or last stood on, if captured).
    #[inline(always)]
    pub const fn current(&self) -> Square {
        self.current
    }

    #[inline(always)]
    pub const fn has_moved(&self) -> bool {
        self.has_moved
    }

    /// Returns `true` if this piece has not moved yet.
    #[inline(always)]
    pub const fn is_first_move(&self) -> bool {
        !self.has_moved
    }

    #[inline(always)]
    pub const fn is_pawn(&self) -> bool {
        matches!(self.kind, PieceKind::Pawn)
    }

    #[inline(always)]
    pub const fn is_rook(&self) -> bool {
        matches!(self.kind, PieceKind::Rook)
    }

    #[inline(always)]
    pub const fn is_king(&self) -> bool {
        matches!(self.kind, PieceKind::King)
    }

    /// All candidate rays of this piece from its current square.
    ///
    /// These describe raw geometric reach: they stay on the board but ignore every other piece.
    /// A Pawn's rays are its forward push (two squares on its first move) and both capture diagonals.
    /// Castling is not part of the King's rays.
    pub fn rays(&self) -> Rays {
        let from = self.current;
        match self.kind {
            PieceKind::Pawn => {
                let mut rays = self.pawn_diagonals();
                let step = (0, self.color.negation_multiplier());
                let forward = slide(from, step, self.pawn_reach());
                if !forward.is_empty() {
                    rays.insert(0, forward);
                }
                rays
            }
            PieceKind::Knight => slider_rays(from, &KNIGHT_DELTAS, 1),
            PieceKind::Bishop => slider_rays(from, &DIAGONAL_DELTAS, MAX_RAY_LEN),
            PieceKind::Rook => slider_rays(from, &ORTHOGONAL_DELTAS, MAX_RAY_LEN),
            PieceKind::Queen => slider_rays(from, &ALL_DELTAS, MAX_RAY_LEN),
            PieceKind::King => slider_rays(from, &ALL_DELTAS, 1),
        }
    }

    /// The rays along which this piece threatens other squares.
    ///
    /// Identical to [`Piece::rays`] except for Pawns, which only attack diagonally.
    pub fn attack_rays(&self) -> Rays {
        if self.is_pawn() {
            self.pawn_diagonals()
        } else {
            self.rays()
        }
    }

    /// Returns `true` if this Pawn just advanced two ranks from `origin`, giving the opponent an en passant capture.
    #[inline(always)]
    pub fn gives_en_passant(&self, origin: Square) -> bool {
        self.is_pawn() && origin.distance_ranks(self.current) == 2
    }

    /// Returns `true` if this is a Pawn standing on its last rank, where it must promote.
    #[inline(always)]
    pub fn reaches_last_rank(&self) -> bool {
        self.is_pawn() && self.current.rank() == Rank::eighth(self.color)
    }

    /// Letter used to render this piece: uppercase for White, lowercase for Black.
    #[inline(always)]
    pub const fn symbol(&self) -> char {
        match self.color {
            Color::White => self.kind.char().to_ascii_uppercase(),
            Color::Black => self.kind.char(),
        }
    }

    pub(crate) fn relocate(&mut self, to: Square) {
        self.current = to;
        self.has_moved = true;
    }

    pub(crate) fn promote(&mut self, kind: PieceKind) {
        debug_assert!(self.is_pawn() && kind.is_promotion_target());
        self.kind = kind;
    }

    /// A Pawn pushes two squares only from its starting rank, before it has moved.
    fn pawn_reach(&self) -> usize {
        if self.is_first_move() && self.current.rank() == Rank::second(self.color) {
            2
        } else {
            1
        }
    }

    fn pawn_diagonals(&self) -> Rays {
        let forward = self.color.negation_multiplier();
        [(-1, forward), (1, forward)]
            .into_iter()
            .filter_map(|(df, dr)| self.current.offset(df, dr))
            .map(|square| Ray::from_iter([square]))
            .collect()
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} on {}", self.color, self.kind, self.current)
    }
}
