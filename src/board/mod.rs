/*
 * This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/.
 */

/// The board itself: square occupancy, piece storage, and hypothetical views.
mod layout;

/// Colors, piece kinds, and pieces with their movement rays.
mod piece;

/// Rays of travel and path tracing along them.
mod rays;

/// Squares, files, and ranks.
mod square;

pub use layout::*;
pub use piece::*;
pub use rays::*;
pub use square::*;
