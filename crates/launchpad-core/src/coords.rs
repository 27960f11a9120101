//! Coordinates and helpers for coordinate lists.
//!
//! Every addressing form (groups, patterns, map paintings, key events)
//! resolves to [`Coordinate`] values. Whether a coordinate names a real
//! button is only checked when it is resolved against the topology.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An `(x, y)` position on the 9×9 logical grid.
///
/// `x` is the column (8 = scene column), `y` the row (8 = automap row).
/// Ordering is lexicographic by `x`, then `y`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coordinate {
    pub x: u8,
    pub y: u8,
}

impl Coordinate {
    #[must_use]
    pub const fn new(x: u8, y: u8) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(u8, u8)> for Coordinate {
    fn from((x, y): (u8, u8)) -> Self {
        Self { x, y }
    }
}

impl From<[u8; 2]> for Coordinate {
    fn from([x, y]: [u8; 2]) -> Self {
        Self { x, y }
    }
}

impl From<Coordinate> for (u8, u8) {
    fn from(c: Coordinate) -> Self {
        (c.x, c.y)
    }
}

/// Sort by `(x, y)` and remove every duplicate, not only adjacent ones.
pub fn dedup_sort(mut coords: Vec<Coordinate>) -> Vec<Coordinate> {
    coords.sort();
    coords.dedup();
    coords
}

/// Flatten coordinate lists, preserving order.
pub fn concat<I>(lists: I) -> Vec<Coordinate>
where
    I: IntoIterator,
    I::Item: IntoIterator<Item = Coordinate>,
{
    lists.into_iter().flatten().collect()
}
