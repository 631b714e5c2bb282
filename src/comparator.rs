//! Comparator helpers for `sort_by`, `min_by`/`max_by` and the `MinBy`/`MaxBy` collectors.
//!
//! ```
//! use streamline::comparator::{comparing, reversed};
//! use streamline::Stream;
//!
//! let words = Stream::new(vec!["ccc", "a", "bb"])
//!     .sort_by(reversed(comparing(|w: &&str| w.len())))
//!     .to_vec()
//!     .unwrap();
//! assert_eq!(words, vec!["ccc", "bb", "a"]);
//! ```

use std::cmp::Ordering;

/// Natural ordering.
pub fn natural<T: Ord>(a: &T, b: &T) -> Ordering {
    a.cmp(b)
}

/// Compare by a derived key.
pub fn comparing<T, K, F>(key: F) -> impl Fn(&T, &T) -> Ordering + Clone
where
    K: Ord,
    F: Fn(&T) -> K + Clone,
{
    move |a, b| key(a).cmp(&key(b))
}

/// Flip a comparator.
pub fn reversed<T, C>(cmp: C) -> impl Fn(&T, &T) -> Ordering + Clone
where
    C: Fn(&T, &T) -> Ordering + Clone,
{
    move |a, b| cmp(b, a)
}

/// Break ties of `first` with `second`.
pub fn then_comparing<T, C1, C2>(first: C1, second: C2) -> impl Fn(&T, &T) -> Ordering + Clone
where
    C1: Fn(&T, &T) -> Ordering + Clone,
    C2: Fn(&T, &T) -> Ordering + Clone,
{
    move |a, b| first(a, b).then_with(|| second(a, b))
}

/// A wrapper around f64 that implements `Ord` by using `total_cmp`.
///
/// Lets float keys drive `sort_by_key` and `min_by_key`/`max_by_key`.
///
/// ```
/// use streamline::comparator::OrdF64;
/// use streamline::Stream;
///
/// let lowest = Stream::new(vec![2.5_f64, -1.0, 0.3])
///     .min_by_key(|x| OrdF64(*x))
///     .unwrap();
/// assert_eq!(lowest.into_value().unwrap(), -1.0);
/// ```
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OrdF64(pub f64);

impl Eq for OrdF64 {}

impl PartialOrd for OrdF64 {
    #[inline]
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for OrdF64 {
    #[inline]
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl From<f64> for OrdF64 {
    fn from(value: f64) -> Self {
        Self(value)
    }
}

impl From<OrdF64> for f64 {
    fn from(value: OrdF64) -> Self {
        value.0
    }
}
