//! Map positions.
//!
//! A `Vector` is a tile coordinate. Positions are ordered row-major
//! (`y` first, then `x`), which is the map traversal order used everywhere
//! a deterministic iteration over units or buildings matters.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

/// A tile coordinate on the map.
///
/// ```
/// use tactics_rules::core::Vector;
///
/// let a = Vector::new(3, 1);
/// let b = Vector::new(1, 2);
///
/// // Row-major: everything in row 1 comes before row 2.
/// assert!(a < b);
/// assert_eq!(a.adjacent().len(), 4);
/// ```
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Vector {
    pub x: u16,
    pub y: u16,
}

impl Vector {
    /// Create a position.
    #[must_use]
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }

    /// Orthogonally adjacent positions.
    ///
    /// Coordinates outside the `u16` range are skipped. Map bounds are the
    /// caller's concern.
    #[must_use]
    pub fn adjacent(self) -> SmallVec<[Vector; 4]> {
        let mut out = SmallVec::new();
        if let Some(y) = self.y.checked_sub(1) {
            out.push(Vector::new(self.x, y));
        }
        if let Some(x) = self.x.checked_add(1) {
            out.push(Vector::new(x, self.y));
        }
        if let Some(y) = self.y.checked_add(1) {
            out.push(Vector::new(self.x, y));
        }
        if let Some(x) = self.x.checked_sub(1) {
            out.push(Vector::new(x, self.y));
        }
        out
    }

    /// Manhattan distance to another position.
    #[must_use]
    pub fn distance(self, other: Vector) -> u32 {
        u32::from(self.x.abs_diff(other.x)) + u32::from(self.y.abs_diff(other.y))
    }
}

impl Ord for Vector {
    fn cmp(&self, other: &Self) -> Ordering {
        self.y.cmp(&other.y).then(self.x.cmp(&other.x))
    }
}

impl PartialOrd for Vector {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl std::fmt::Display for Vector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{},{}", self.x, self.y)
    }
}
