//! Assertion functions for stream outputs.

use crate::collectors::Grouped;
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// Assert that two collections are equal in order and content.
///
/// # Panics
///
/// Panics with the first differing index if the collections differ.
///
/// # Example
///
/// ```
/// use streamline::testing::assert_collections_equal;
/// use streamline::Stream;
///
/// let actual = Stream::new(vec![3, 1, 2]).sort(false).to_vec().unwrap();
/// assert_collections_equal(&actual, &[1, 2, 3]);
/// ```
pub fn assert_collections_equal<T: Debug + PartialEq>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    for (i, (a, e)) in actual.iter().zip(expected.iter()).enumerate() {
        assert_eq!(
            a, e,
            "Collection mismatch at index {i}:\n  Expected: {e:?}\n  Actual: {a:?}\n  Full expected: {expected:?}\n  Full actual: {actual:?}"
        );
    }
}

fn multiset<T: Eq + Hash>(items: &[T]) -> HashMap<&T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Assert that two collections hold the same elements with the same multiplicities,
/// in any order.
///
/// Concurrent operators yield results in completion order; this is the comparison to
/// use for them.
///
/// # Panics
///
/// Panics listing missing and unexpected elements if the contents differ.
pub fn assert_collections_unordered_equal<T: Debug + Eq + Hash>(actual: &[T], expected: &[T]) {
    assert_eq!(
        actual.len(),
        expected.len(),
        "Collection length mismatch:\n  Expected length: {}\n  Actual length: {}\n  Expected: {expected:?}\n  Actual: {actual:?}",
        expected.len(),
        actual.len()
    );

    let actual_counts = multiset(actual);
    let expected_counts = multiset(expected);
    if actual_counts != expected_counts {
        let missing: Vec<_> = expected_counts
            .iter()
            .filter(|(e, n)| actual_counts.get(*e).copied().unwrap_or(0) < **n)
            .map(|(e, _)| e)
            .collect();
        let extra: Vec<_> = actual_counts
            .iter()
            .filter(|(a, n)| expected_counts.get(*a).copied().unwrap_or(0) < **n)
            .map(|(a, _)| a)
            .collect();

        panic!(
            "Collection content mismatch:\n  Missing elements: {missing:?}\n  Extra elements: {extra:?}\n  Expected: {expected:?}\n  Actual: {actual:?}"
        );
    }
}

/// Assert that a grouping result has exactly the keys and values of a reference map.
///
/// Key order is not compared; use `==` on two [`Grouped`] values for that.
///
/// # Example
///
/// ```
/// use std::collections::HashMap;
/// use streamline::testing::assert_grouped_equal;
/// use streamline::Stream;
///
/// let groups = Stream::new(0..6).group_by(|x| x % 2).unwrap();
/// let expected = HashMap::from([(0, vec![0, 2, 4]), (1, vec![1, 3, 5])]);
/// assert_grouped_equal(&groups, &expected);
/// ```
pub fn assert_grouped_equal<K, V, S>(actual: &Grouped<K, V>, expected: &HashMap<K, V, S>)
where
    K: Debug + Eq + Hash + Clone,
    V: Debug + PartialEq,
    S: BuildHasher,
{
    for (k, v) in actual {
        match expected.get(k) {
            Some(e) => assert_eq!(
                v, e,
                "Value mismatch for key {k:?}:\n  Expected: {e:?}\n  Actual: {v:?}"
            ),
            None => panic!("Unexpected key {k:?} with value {v:?}"),
        }
    }
    for (k, e) in expected {
        assert!(
            actual.contains_key(k),
            "Missing key {k:?}:\n  Expected value: {e:?}"
        );
    }
}

/// Assert that every element satisfies `predicate`.
///
/// # Panics
///
/// Panics naming the first element that fails.
pub fn assert_all<T: Debug>(collection: &[T], predicate: impl Fn(&T) -> bool) {
    for (i, item) in collection.iter().enumerate() {
        assert!(
            predicate(item),
            "Predicate failed for element at index {i}:\n  Element: {item:?}\n  Collection: {collection:?}"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unordered_equality_counts_duplicates() {
        assert_collections_unordered_equal(&[1, 2, 2, 3], &[2, 3, 2, 1]);
        let r = std::panic::catch_unwind(|| assert_collections_unordered_equal(&[1, 1, 2], &[1, 2, 2]));
        assert!(r.is_err());
    }

    #[test]
    #[should_panic(expected = "Missing key")]
    fn grouped_missing_key_panics() {
        let actual: Grouped<i32, i32> = vec![(1, 1)].into_iter().collect();
        let expected = HashMap::from([(1, 1), (2, 2)]);
        assert_grouped_equal(&actual, &expected);
    }
}
