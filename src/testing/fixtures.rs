//! Pre-built datasets for exercising stream pipelines.

use serde::{Deserialize, Serialize};
use std::ops::Range;

/// A postal address with a natural three-level grouping hierarchy.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Address {
    pub country: String,
    pub state: String,
    pub city: String,
}

impl Address {
    pub fn new(country: &str, state: &str, city: &str) -> Self {
        Self {
            country: country.to_string(),
            state: state.to_string(),
            city: city.to_string(),
        }
    }
}

/// Addresses spread over two countries, with repeated states and cities.
///
/// # Example
///
/// ```
/// use streamline::testing::sample_addresses;
/// use streamline::Stream;
///
/// let by_country = Stream::new(sample_addresses()).group_by(|a| a.country.clone()).unwrap();
/// assert_eq!(by_country.len(), 2);
/// ```
#[must_use]
pub fn sample_addresses() -> Vec<Address> {
    [
        ("India", "Karnataka", "Bangalore"),
        ("India", "Karnataka", "Mysore"),
        ("India", "Maharashtra", "Pune"),
        ("India", "Maharashtra", "Mumbai"),
        ("India", "Karnataka", "Bangalore"),
        ("USA", "California", "San Jose"),
        ("USA", "California", "Los Angeles"),
        ("USA", "Texas", "Austin"),
        ("USA", "California", "San Jose"),
        ("India", "Maharashtra", "Pune"),
    ]
    .into_iter()
    .map(|(country, state, city)| Address::new(country, state, city))
    .collect()
}

/// A student record for sorting and aggregation tests.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Student {
    pub name: String,
    pub grade: u8,
    pub score: u32,
}

/// Students across three grades; some scores tie.
#[must_use]
pub fn sample_students() -> Vec<Student> {
    [
        ("asha", 10, 88),
        ("bilal", 11, 92),
        ("chen", 10, 75),
        ("dana", 12, 92),
        ("eli", 11, 64),
        ("farah", 12, 81),
        ("gopal", 10, 88),
    ]
    .into_iter()
    .map(|(name, grade, score)| Student {
        name: name.to_string(),
        grade,
        score,
    })
    .collect()
}

/// Deterministic SplitMix64 generator; the same seed always yields the same sequence.
#[derive(Debug, Clone)]
pub struct SeededInts {
    state: u64,
    range: Range<i64>,
}

impl SeededInts {
    /// Integers drawn uniformly enough from `range`, which must be non-empty.
    pub fn new(seed: u64, range: Range<i64>) -> Self {
        assert!(!range.is_empty(), "SeededInts needs a non-empty range, got {range:?}");
        Self { state: seed, range }
    }

    const fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    pub fn next_int(&mut self) -> i64 {
        let span = self.range.end.abs_diff(self.range.start);
        self.range.start.wrapping_add((self.next_u64() % span) as i64)
    }
}

impl Iterator for SeededInts {
    type Item = i64;

    fn next(&mut self) -> Option<i64> {
        Some(self.next_int())
    }
}

/// `size` seeded integers from `range`.
///
/// ```
/// use streamline::testing::random_ints;
///
/// let a = random_ints(42, -10..10, 100);
/// assert_eq!(a, random_ints(42, -10..10, 100));
/// assert!(a.iter().all(|x| (-10..10).contains(x)));
/// ```
#[must_use]
pub fn random_ints(seed: u64, range: Range<i64>, size: usize) -> Vec<i64> {
    SeededInts::new(seed, range).take(size).collect()
}

/// A supplier closure for [`Stream::from_supplier`](crate::Stream::from_supplier).
pub fn int_supplier(seed: u64, range: Range<i64>) -> impl FnMut() -> i64 {
    let mut ints = SeededInts::new(seed, range);
    move || ints.next_int()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn seeds_diverge() {
        assert_ne!(random_ints(1, 0..1_000_000, 8), random_ints(2, 0..1_000_000, 8));
    }

    #[test]
    fn single_value_range() {
        assert_eq!(random_ints(9, 5..6, 4), vec![5; 4]);
    }
}
