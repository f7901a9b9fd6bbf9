/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use std::{
    fmt,
    ops::{Index, IndexMut},
    str::FromStr,
};

use anyhow::{bail, Context, Result};

use super::Color;

/// Represents a single square (a coordinate) on an `8x8` chess board.
///
/// Squares are encoded with [Least Significant File Mapping](https://www.chessprogramming.org/Square_Mapping_Considerations#Deduction_on_Files_and_Ranks),
/// so `square = file + rank * 8`:
/// ```text
/// 8| 56 57 58 59 60 61 62 63
/// 7| 48 49 50 51 52 53 54 55
/// 6| 40 41 42 43 44 45 46 47
/// 5| 32 33 34 35 36 37 38 39
/// 4| 24 25 26 27 28 29 30 31
/// 3| 16 17 18 19 20 21 22 23
/// 2|  8  9 10 11 12 13 14 15
/// 1|  0  1  2  3  4  5  6  7
///  +------------------------
///    a  b  c  d  e  f  g  h
/// ```
///
/// A [`Square`] is a plain value; once created it never changes.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
#[repr(transparent)]
pub struct Square(pub(crate) u8);

macro_rules! impl_square_consts {
    ($($rank:ident => [$($name:ident = $file:ident),+]),+ $(,)?) => {
        impl Square {
            $($(pub const $name: Self = Self::new(File::$file, Rank::$rank);)+)+
        }
    };
}

impl_square_consts! {
    ONE => [A1 = A, B1 = B, C1 = C, D1 = D, E1 = E, F1 = F, G1 = G, H1 = H],
    TWO => [A2 = A, B2 = B, C2 = C, D2 = D, E2 = E, F2 = F, G2 = G, H2 = H],
    THREE => [A3 = A, B3 = B, C3 = C, D3 = D, E3 = E, F3 = F, G3 = G, H3 = H],
    FOUR => [A4 = A, B4 = B, C4 = C, D4 = D, E4 = E, F4 = F, G4 = G, H4 = H],
    FIVE => [A5 = A, B5 = B, C5 = C, D5 = D, E5 = E, F5 = F, G5 = G, H5 = H],
    SIX => [A6 = A, B6 = B, C6 = C, D6 = D, E6 = E, F6 = F, G6 = G, H6 = H],
    SEVEN => [A7 = A, B7 = B, C7 = C, D7 = D, E7 = E, F7 = F, G7 = G, H7 = H],
    EIGHT => [A8 = A, B8 = B, C8 = C, D8 = D, E8 = E, F8 = F, G8 = G, H8 = H],
}

impl Square {
    pub const COUNT: usize = 64;

    const FILE_MASK: u8 = 0b0000_0111;

    /// Creates a new [`Square`] from the provided [`File`] and [`Rank`].
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Square, File, Rank};
    /// assert_eq!(Square::new(File::C, Rank::FOUR), Square::C4);
    /// ```
    #[inline(always)]
    pub const fn new(file: File, rank: Rank) -> Self {
        Self(file.0 | rank.0 << 3)
    }

    /// Fetches the [`File`] of this [`Square`].
    #[inline(always)]
    pub const fn file(&self) -> File {
        File(self.0 & Self::FILE_MASK)
    }

    /// Fetches the [`Rank`] of this [`Square`].
    #[inline(always)]
    pub const fn rank(&self) -> Rank {
        Rank(self.0 >> 3)
    }

    /// Fetches the index of this [`Square`], for indexing into arrays of 64 elements.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::C4.index(), 26);
    /// ```
    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    /// Returns the number of files between `self` and `other`.
    #[inline(always)]
    pub const fn distance_files(&self, other: Self) -> u8 {
        self.file().0.abs_diff(other.file().0)
    }

    /// Returns the number of ranks between `self` and `other`.
    #[inline(always)]
    pub const fn distance_ranks(&self, other: Self) -> u8 {
        self.rank().0.abs_diff(other.rank().0)
    }

    /// Attempt to offset this [`Square`] by the file and rank deltas.
    ///
    /// Returns `None` if the result would leave the board.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::C4.offset(1, 1), Some(Square::D5));
    /// assert_eq!(Square::C4.offset(-1, -1), Some(Square::B3));
    /// assert_eq!(Square::A1.offset(-1, 0), None);
    /// ```
    #[inline(always)]
    pub const fn offset(&self, file_delta: i8, rank_delta: i8) -> Option<Self> {
        let Some(file) = self.file().offset(file_delta) else {
            return None;
        };

        let Some(rank) = self.rank().offset(rank_delta) else {
            return None;
        };

        Some(Self::new(file, rank))
    }

    /// Moves this [`Square`] `n` ranks toward the opponent of `color`, if possible.
    ///
    /// # Example
    /// ```
    /// # use arbiter::{Square, Color};
    /// assert_eq!(Square::C4.forward_by(Color::White, 1), Some(Square::C5));
    /// assert_eq!(Square::C4.forward_by(Color::Black, 2), Some(Square::C2));
    /// ```
    #[inline(always)]
    pub fn forward_by(&self, color: Color, n: u8) -> Option<Self> {
        self.offset(0, n as i8 * color.negation_multiplier())
    }

    /// All squares strictly between `self` and `other` on a shared rank.
    ///
    /// Empty if the squares are adjacent or not on the same rank.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::E1.between_on_rank(Square::H1), vec![Square::F1, Square::G1]);
    /// assert_eq!(Square::E1.between_on_rank(Square::A1), vec![Square::D1, Square::C1, Square::B1]);
    /// assert!(Square::E1.between_on_rank(Square::E2).is_empty());
    /// ```
    pub fn between_on_rank(&self, other: Self) -> Vec<Self> {
        if self.rank() != other.rank() || *self == other {
            return Vec::new();
        }

        let step = if other.file() > self.file() { 1 } else { -1 };
        let mut squares = Vec::new();
        let mut current = *self;
        while let Some(next) = current.offset(step, 0) {
            if next == other {
                break;
            }
            squares.push(next);
            current = next;
        }
        squares
    }

    /// Creates a [`Square`] from algebraic notation like `"e4"`.
    ///
    /// # Example
    /// ```
    /// # use arbiter::Square;
    /// assert_eq!(Square::from_algebraic("c4").unwrap(), Square::C4);
    /// assert!(Square::from_algebraic("z0").is_err());
    /// ```
    pub fn from_algebraic(square: &str) -> Result<Self> {
        let mut chars = square.chars();
        let (Some(file), Some(rank), None) = (chars.next(), chars.next(), chars.next()) else {
            bail!("Invalid Square string: String must contain exactly 2 characters. Got {square:?}")
        };

        Ok(Self::new(File::from_char(file)?, Rank::from_char(rank)?))
    }
}

impl FromStr for Square {
    type Err = anyhow::Error;
    /// Wrapper for [`Square::from_algebraic`].
    #[inline(always)]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_algebraic(s)
    }
}

impl<T> Index<Square> for [T; Square::COUNT] {
    type Output = T;
    /// A [`Square`] can be used to index into an array of 64 elements.
    #[inline(always)]
    fn index(&self, index: Square) -> &Self::Output {
        &self[index.index()]
    }
}

impl<T> IndexMut<Square> for [T; Square::COUNT] {
    #[inline(always)]
    fn index_mut(&mut self, index: Square) -> &mut Self::Output {
        &mut self[index.index()]
    }
}

impl fmt::Display for Square {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.file(), self.rank())
    }
}

impl fmt::Debug for Square {
    /// Displays the square and its internal index.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{self} ({})", self.0)
    }
}

/// Represents one of eight ranks on a chess board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct Rank(pub(crate) u8);

impl Rank {
    pub const ONE: Self = Self(0);
    pub const TWO: Self = Self(1);
    pub const THREE: Self = Self(2);
    pub const FOUR: Self = Self(3);
    pub const FIVE: Self = Self(4);
    pub const SIX: Self = Self(5);
    pub const SEVEN: Self = Self(6);
    pub const EIGHT: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all ranks, in ascending order.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    /// Construct a new [`Rank`] from a zero-based value.
    #[inline(always)]
    pub fn new(rank: u8) -> Result<Self> {
        if rank > Self::MAX {
            bail!(
                "Invalid int for Rank: Must be between [{}, {}]. Got {rank}",
                Self::MIN,
                Self::MAX
            );
        }

        Ok(Self(rank))
    }

    /// First rank relative to `color`: where its pieces start.
    #[inline(always)]
    pub const fn first(color: Color) -> Self {
        [Self::ONE, Self::EIGHT][color.index()]
    }

    /// Rank a pawn of `color` starts on.
    #[inline(always)]
    pub const fn second(color: Color) -> Self {
        [Self::TWO, Self::SEVEN][color.index()]
    }

    /// Rank a pawn of `color` promotes on.
    #[inline(always)]
    pub const fn eighth(color: Color) -> Self {
        [Self::EIGHT, Self::ONE][color.index()]
    }

    pub fn from_char(rank: char) -> Result<Self> {
        let rank_int = rank.to_digit(10).context(format!(
            "Invalid char for Rank: Must be between [1, 8]. Got {rank}"
        ))?;

        let rank = rank_int.checked_sub(1).context(format!(
            "Invalid char for Rank: Must be between [1, 8]. Got {rank}"
        ))?;

        Self::new(rank as u8)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'1') as char
    }

    /// Attempt to offset this [`Rank`] by `delta`, returning `None` if it leaves the board.
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        if let Some(bits) = self.0.checked_add_signed(delta) {
            if bits <= Self::MAX {
                return Some(Self(bits));
            }
        }

        None
    }
}

impl fmt::Display for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for Rank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}

/// Represents one of eight files on a chess board.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(transparent)]
pub struct File(pub(crate) u8);

impl File {
    pub const A: Self = Self(0);
    pub const B: Self = Self(1);
    pub const C: Self = Self(2);
    pub const D: Self = Self(3);
    pub const E: Self = Self(4);
    pub const F: Self = Self(5);
    pub const G: Self = Self(6);
    pub const H: Self = Self(7);

    pub const MIN: u8 = 0;
    pub const MAX: u8 = 7;
    pub const COUNT: usize = 8;

    /// Returns an iterator over all files, in ascending order.
    #[inline(always)]
    pub fn iter() -> impl ExactSizeIterator<Item = Self> + DoubleEndedIterator<Item = Self> {
        (Self::MIN..=Self::MAX).map(Self)
    }

    #[inline(always)]
    pub fn new(file: u8) -> Result<Self> {
        if file > Self::MAX {
            bail!(
                "Invalid int for File: Must be between [{}, {}]. Got {file}",
                Self::MIN,
                Self::MAX
            );
        }
        Ok(Self(file))
    }

    pub fn from_char(file: char) -> Result<Self> {
        if !file.is_ascii_alphabetic() {
            bail!("Invalid char for File: Must be between [a, h]. Got {file}");
        }

        // Zero the number by subtracting `a`
        let file_int = file.to_ascii_lowercase() as u8 - b'a';

        if file_int > Self::MAX {
            bail!("Invalid char for File: Must be between [a, h]. Got {file}");
        }

        Self::new(file_int)
    }

    #[inline(always)]
    pub const fn index(&self) -> usize {
        self.0 as usize
    }

    #[inline(always)]
    pub const fn char(&self) -> char {
        (self.0 + b'a') as char
    }

    /// Attempt to offset this [`File`] by `delta`, returning `None` if it leaves the board.
    ///
    /// # Example
    /// ```
    /// # use arbiter::File;
    /// assert_eq!(File::C.offset(1), Some(File::D));
    /// assert_eq!(File::A.offset(-1), None);
    /// ```
    #[inline(always)]
    pub const fn offset(self, delta: i8) -> Option<Self> {
        if let Some(bits) = self.0.checked_add_signed(delta) {
            if bits <= Self::MAX {
                return Some(Self(bits));
            }
        }

        None
    }
}

impl fmt::Display for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.char().fmt(f)
    }
}

impl fmt::Debug for File {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.char(), self.0)
    }
}
