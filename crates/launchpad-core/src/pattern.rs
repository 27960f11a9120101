//! Row, column and painting notations for selecting buttons.
//!
//! A pattern is a two-character prefix followed by a selection string:
//!
//! | Prefix | Fixed axis | Varies |
//! |--------|------------|--------|
//! | `rN`   | `y = N`    | `x`    |
//! | `cN`   | `x = N`    | `y`    |
//! | `am`   | `y = 8`    | `x`    |
//! | `sc`   | `x = 8`    | `y`    |
//!
//! Prefixes are case-insensitive. In the selection string `x` or `X` marks a
//! slot and any other character is a placeholder. Position 0 is the round
//! button (slot 8), since it is drawn first; position `i > 0` is slot `i - 1`.
//!
//! Unknown prefixes select nothing. Patterns are often typed incrementally,
//! so they never fail.

use crate::coords::{concat, dedup_sort, Coordinate};
use crate::topology::{GRID_SIZE, ROUND_INDEX};

/// Generator combining a fixed axis value with selected slots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    /// Fixed `y`, slots give `x`.
    Row(u8),
    /// Fixed `x`, slots give `y`.
    Column(u8),
}

impl Axis {
    /// Parse a two-character prefix.
    ///
    /// The digit after `r`/`c` may be 9 even though the device stops at 8;
    /// such coordinates fail later, when resolved to buttons.
    pub fn parse(prefix: &str) -> Option<Self> {
        let mut chars = prefix.chars().map(|c| c.to_ascii_lowercase());
        let (first, second) = (chars.next()?, chars.next()?);
        if chars.next().is_some() {
            return None;
        }

        match (first, second) {
            ('s', 'c') => Some(Axis::Column(ROUND_INDEX)),
            ('a', 'm') => Some(Axis::Row(ROUND_INDEX)),
            ('r', digit) => digit.to_digit(10).map(|n| Axis::Row(n as u8)),
            ('c', digit) => digit.to_digit(10).map(|n| Axis::Column(n as u8)),
            _ => None,
        }
    }

    pub fn coordinate(self, slot: u8) -> Coordinate {
        match self {
            Axis::Row(y) => Coordinate::new(slot, y),
            Axis::Column(x) => Coordinate::new(x, slot),
        }
    }

    /// One coordinate per slot, in slot order.
    pub fn coordinates(self, slots: &[u8]) -> Vec<Coordinate> {
        slots.iter().map(|&slot| self.coordinate(slot)).collect()
    }
}

/// Map a selection string to the selected slots, in string order.
pub fn selection_slots(selection: &str) -> Vec<u8> {
    selection
        .chars()
        .enumerate()
        .filter(|&(_, c)| c == 'x' || c == 'X')
        // Positions past 255 cannot name a slot; they would wrap otherwise.
        .filter_map(|(position, _)| match position {
            0 => Some(ROUND_INDEX),
            p => u8::try_from(p - 1).ok(),
        })
        .collect()
}

/// Decode one pattern, in generation order and without deduplication.
pub fn decode_pattern(pattern: &str) -> Vec<Coordinate> {
    let split = pattern
        .char_indices()
        .nth(2)
        .map_or(pattern.len(), |(index, _)| index);
    let (prefix, selection) = pattern.split_at(split);

    match Axis::parse(prefix) {
        Some(axis) => axis.coordinates(&selection_slots(selection)),
        None => Vec::new(),
    }
}

/// Decode several patterns into one sorted list without duplicates.
pub fn decode_patterns<S: AsRef<str>>(patterns: &[S]) -> Vec<Coordinate> {
    dedup_sort(concat(
        patterns.iter().map(|pattern| decode_pattern(pattern.as_ref())),
    ))
}

/// Decode a 9×9 painting.
///
/// Characters are read row by row from `y = 0`, nine per row with the scene
/// button last; the ninth row is the automap row. Only a lowercase `x`
/// selects. Cells that are not buttons, such as `(8, 8)` or anything past
/// the 81st character, are dropped.
pub fn from_map(map: &str) -> Vec<Coordinate> {
    let size = usize::from(GRID_SIZE);
    map.chars()
        .enumerate()
        .filter(|&(_, c)| c == 'x')
        .map(|(index, _)| (index % size, index / size))
        .filter(|&(x, y)| y < size && !(x == size - 1 && y == size - 1))
        .map(|(x, y)| Coordinate::new(x as u8, y as u8))
        .collect()
}
