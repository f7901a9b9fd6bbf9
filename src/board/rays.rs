/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

use arrayvec::ArrayVec;

use super::Square;

/// Longest possible ray: a slider crossing the whole board.
pub const MAX_RAY_LEN: usize = 7;

/// Most rays a single piece can have (Queen, King and Knight all have 8).
pub const MAX_RAYS: usize = 8;

/// An ordered line of travel for a piece, from the nearest square to the farthest.
///
/// The piece's own square is never part of its rays.
pub type Ray = ArrayVec<Square, MAX_RAY_LEN>;

/// Every candidate [`Ray`] of a piece.
pub type Rays = ArrayVec<Ray, MAX_RAYS>;

/// Deltas for the movement of the Rook.
pub(crate) const ORTHOGONAL_DELTAS: [(i8, i8); 4] = [(1, 0), (0, -1), (-1, 0), (0, 1)];

/// Deltas for the movement of the Bishop.
pub(crate) const DIAGONAL_DELTAS: [(i8, i8); 4] = [(1, 1), (1, -1), (-1, -1), (-1, 1)];

/// Deltas for the movement of the Queen and the King.
pub(crate) const ALL_DELTAS: [(i8, i8); 8] = [
    ORTHOGONAL_DELTAS[0],
    ORTHOGONAL_DELTAS[1],
    ORTHOGONAL_DELTAS[2],
    ORTHOGONAL_DELTAS[3],
    DIAGONAL_DELTAS[0],
    DIAGONAL_DELTAS[1],
    DIAGONAL_DELTAS[2],
    DIAGONAL_DELTAS[3],
];

/// Deltas for the movement of the Knight.
pub(crate) const KNIGHT_DELTAS: [(i8, i8); 8] = [
    (1, 2),
    (1, -2),
    (2, 1),
    (2, -1),
    (-1, 2),
    (-1, -2),
    (-2, 1),
    (-2, -1),
];

/// Walks from `from` in the direction of `delta` for at most `limit` steps, stopping at the edge of the board.
pub(crate) fn slide(from: Square, (df, dr): (i8, i8), limit: usize) -> Ray {
    let mut ray = Ray::new();
    let mut current = from;

    while ray.len() < limit {
        let Some(next) = current.offset(df, dr) else {
            break;
        };
        ray.push(next);
        current = next;
    }

    ray
}

/// Casts one sliding ray per delta, dropping directions that immediately leave the board.
pub(crate) fn slider_rays(from: Square, deltas: &[(i8, i8)], limit: usize) -> Rays {
    deltas
        .iter()
        .map(|&delta| slide(from, delta, limit))
        .filter(|ray| !ray.is_empty())
        .collect()
}

/// Returns the path a piece travels to reach `target`: the prefix of the ray containing `target`, ending at `target` (inclusive).
///
/// Returns `None` if no ray contains `target`.
///
/// # Example
/// ```
/// # use arbiter::{path_to, Color, Piece, PieceKind, Square};
/// let rook = Piece::new(PieceKind::Rook, Color::White, Square::A1);
/// let rays = rook.rays();
/// assert_eq!(path_to(&rays, Square::A4), Some(&[Square::A2, Square::A3, Square::A4][..]));
/// assert_eq!(path_to(&rays, Square::B2), None);
/// ```
pub fn path_to(rays: &Rays, target: Square) -> Option<&[Square]> {
    rays.iter().find_map(|ray| {
        let index = ray.iter().position(|&square| square == target)?;
        Some(&ray[..=index])
    })
}

/// Returns `true` if `target` lies on any of `rays`.
#[inline(always)]
pub fn reaches(rays: &Rays, target: Square) -> bool {
    rays.iter().any(|ray| ray.contains(&target))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slide_stops_at_edge() {
        let ray = slide(Square::F6, (1, 1), MAX_RAY_LEN);
        assert_eq!(ray.as_slice(), &[Square::G7, Square::H8]);

        let ray = slide(Square::A1, (-1, 0), MAX_RAY_LEN);
        assert!(ray.is_empty());
    }

    #[test]
    fn test_slide_respects_limit() {
        let ray = slide(Square::E2, (0, 1), 2);
        assert_eq!(ray.as_slice(), &[Square::E3, Square::E4]);
    }

    #[test]
    fn test_path_is_truncated_at_target() {
        let rays = slider_rays(Square::A1, &ORTHOGONAL_DELTAS, MAX_RAY_LEN);
        assert_eq!(rays.len(), 2);

        let path = path_to(&rays, Square::D1).unwrap();
        assert_eq!(path, &[Square::B1, Square::C1, Square::D1]);
        assert!(path_to(&rays, Square::A1).is_none());
        assert!(reaches(&rays, Square::A8));
        assert!(!reaches(&rays, Square::B2));
    }
}
