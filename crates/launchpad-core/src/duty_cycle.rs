//! Duty-cycle table for brightness multiplexing.
//!
//! The device dims non-full LEDs by lighting them for `numerator /
//! denominator` of each refresh cycle, with the numerator in `1..=16` and
//! the denominator in `3..=18`. The table holds every distinct fraction
//! `<= 1` in ascending order; when several pairs give the same fraction,
//! the one with the smallest numerator is kept.

use serde::Serialize;
use std::cmp::Ordering;
use std::sync::OnceLock;

pub const NUMERATOR_MIN: u8 = 1;
pub const NUMERATOR_MAX: u8 = 16;
pub const DENOMINATOR_MIN: u8 = 3;
pub const DENOMINATOR_MAX: u8 = 18;

/// One achievable brightness fraction.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DutyCycle {
    pub numerator: u8,
    pub denominator: u8,
    pub fraction: f64,
}

impl DutyCycle {
    fn new(numerator: u8, denominator: u8) -> Self {
        Self {
            numerator,
            denominator,
            fraction: f64::from(numerator) / f64::from(denominator),
        }
    }

    /// Exact comparison of the two ratios, without going through floats.
    fn cmp_ratio(&self, other: &Self) -> Ordering {
        let lhs = u16::from(self.numerator) * u16::from(other.denominator);
        let rhs = u16::from(other.numerator) * u16::from(self.denominator);
        lhs.cmp(&rhs)
    }
}

/// Sorted, deduplicated set of duty cycles.
#[derive(Debug, Clone)]
pub struct DutyCycleTable {
    entries: Vec<DutyCycle>,
}

impl DutyCycleTable {
    /// Build the table. Prefer [`DutyCycleTable::global`], which builds it once.
    pub fn build() -> Self {
        let mut entries: Vec<DutyCycle> = (NUMERATOR_MIN..=NUMERATOR_MAX)
            .flat_map(|num| {
                (DENOMINATOR_MIN..=DENOMINATOR_MAX)
                    .filter(move |&den| num <= den)
                    .map(move |den| DutyCycle::new(num, den))
            })
            .collect();

        // Stable sort: among equal fractions, generation order (smallest
        // numerator first) survives and the first one is kept.
        entries.sort_by(DutyCycle::cmp_ratio);
        entries.dedup_by(|later, earlier| later.cmp_ratio(earlier) == Ordering::Equal);

        Self { entries }
    }

    /// The process-wide table.
    pub fn global() -> &'static Self {
        static TABLE: OnceLock<DutyCycleTable> = OnceLock::new();
        TABLE.get_or_init(Self::build)
    }

    pub fn entries(&self) -> &[DutyCycle] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Pick the entry for a brightness in `[0, 1]`.
    ///
    /// The lookup is by rank, not by value: `round(brightness * len)`
    /// indexes the table, clamped to its bounds. Each entry gets an equal
    /// share of the brightness range regardless of its fraction. NaN maps
    /// to the first entry.
    pub fn nearest(&self, brightness: f64) -> DutyCycle {
        let last = self.entries.len().saturating_sub(1);
        let position = (brightness * self.entries.len() as f64).round();
        // `as` saturates, and maps NaN to 0.
        let index = (position.max(0.0) as usize).min(last);
        self.entries[index]
    }
}

/// Look up the duty cycle for `brightness` in the global table.
pub fn nearest_duty_cycle(brightness: f64) -> DutyCycle {
    DutyCycleTable::global().nearest(brightness)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pair(entry: DutyCycle) -> (u8, u8) {
        (entry.numerator, entry.denominator)
    }

    #[test]
    fn table_has_every_distinct_fraction() {
        let table = DutyCycleTable::build();
        assert_eq!(table.len(), 101);
    }

    #[test]
    fn table_is_strictly_ascending() {
        let table = DutyCycleTable::build();
        for window in table.entries().windows(2) {
            assert!(window[0].fraction < window[1].fraction);
        }
    }

    #[test]
    fn duplicates_keep_smallest_pair() {
        let table = DutyCycleTable::build();
        let half = table
            .entries()
            .iter()
            .find(|e| e.fraction == 0.5)
            .copied()
            .unwrap();
        assert_eq!(pair(half), (2, 4));

        let one = table.entries().last().copied().unwrap();
        assert_eq!(pair(one), (3, 3));
    }

    #[test]
    fn every_pair_is_represented() {
        let table = DutyCycleTable::build();
        for num in NUMERATOR_MIN..=NUMERATOR_MAX {
            for den in DENOMINATOR_MIN..=DENOMINATOR_MAX {
                if num > den {
                    continue;
                }
                let probe = DutyCycle::new(num, den);
                let found = table
                    .entries()
                    .iter()
                    .find(|e| e.cmp_ratio(&probe) == Ordering::Equal)
                    .unwrap();
                assert!(found.numerator <= num, "{}/{} kept {:?}", num, den, found);
            }
        }
    }

    #[test]
    fn nearest_bounds() {
        let table = DutyCycleTable::global();
        assert_eq!(pair(nearest_duty_cycle(0.0)), pair(table.entries()[0]));
        assert_eq!(pair(nearest_duty_cycle(0.0)), (1, 18));
        assert_eq!(pair(nearest_duty_cycle(1.0)), (3, 3));
    }

    #[test]
    fn nearest_is_by_rank() {
        // 0.5 * 101 = 50.5 rounds up to index 51.
        assert_eq!(pair(nearest_duty_cycle(0.5)), (9, 17));
        assert_eq!(pair(nearest_duty_cycle(0.2)), (3, 14));
    }

    #[test]
    fn nearest_clamps_out_of_range_input() {
        assert_eq!(pair(nearest_duty_cycle(-3.0)), (1, 18));
        assert_eq!(pair(nearest_duty_cycle(7.5)), (3, 3));
        assert_eq!(pair(nearest_duty_cycle(f64::NAN)), (1, 18));
    }
}
