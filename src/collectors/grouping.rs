//! Partitioning elements into keyed buckets.
//!
//! [`GroupingBy`] classifies every element, creates a bucket (a fresh copy of the
//! downstream collector) the first time a key is seen and forwards the element to it.
//! Results come back as a [`Grouped`] map, which remembers the order in which keys
//! were first seen.

use super::Collector;
use super::containers::ToList;
use crate::error::Result;
use std::borrow::Borrow;
use std::collections::HashMap;
use std::hash::Hash;
use std::ops::Index;
use std::sync::Arc;

/// Insertion-ordered map produced by grouping.
///
/// Equality is order-sensitive: two `Grouped` values are equal only if they hold the
/// same entries in the same key order.
#[derive(Debug, Clone)]
pub struct Grouped<K, V> {
    entries: Vec<(K, V)>,
    index: HashMap<K, usize>,
}

impl<K, V> Default for Grouped<K, V> {
    fn default() -> Self {
        Self { entries: Vec::new(), index: HashMap::new() }
    }
}

impl<K, V> Grouped<K, V> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &K> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub fn values(&self) -> impl Iterator<Item = &V> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&K, &V)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }

    /// Entries in first-seen key order.
    pub fn into_vec(self) -> Vec<(K, V)> {
        self.entries
    }
}

impl<K: Eq + Hash + Clone, V> Grouped<K, V> {
    pub fn get<Q>(&self, key: &Q) -> Option<&V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub fn get_mut<Q>(&mut self, key: &Q) -> Option<&mut V>
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    pub fn contains_key<Q>(&self, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: Eq + Hash + ?Sized,
    {
        self.index.contains_key(key)
    }

    /// Insert or replace; a replaced key keeps its original position.
    pub fn insert(&mut self, key: K, value: V) -> Option<V> {
        match self.index.get(&key) {
            Some(&i) => Some(std::mem::replace(&mut self.entries[i].1, value)),
            None => {
                self.index.insert(key.clone(), self.entries.len());
                self.entries.push((key, value));
                None
            }
        }
    }

    /// The bucket for `key`, created with `make` on first access.
    pub fn get_or_insert_with(&mut self, key: K, make: impl FnOnce() -> V) -> &mut V {
        let i = match self.index.get(&key) {
            Some(&i) => i,
            None => {
                let i = self.entries.len();
                self.index.insert(key.clone(), i);
                self.entries.push((key, make()));
                i
            }
        };
        &mut self.entries[i].1
    }

    pub fn map_values<W>(self, mut f: impl FnMut(V) -> W) -> Grouped<K, W> {
        Grouped {
            entries: self.entries.into_iter().map(|(k, v)| (k, f(v))).collect(),
            index: self.index,
        }
    }

    pub fn into_hash_map(self) -> HashMap<K, V> {
        self.entries.into_iter().collect()
    }
}

impl<K: PartialEq, V: PartialEq> PartialEq for Grouped<K, V> {
    fn eq(&self, other: &Self) -> bool {
        self.entries == other.entries
    }
}

impl<K: Eq, V: Eq> Eq for Grouped<K, V> {}

impl<K, Q, V> Index<&Q> for Grouped<K, V>
where
    K: Eq + Hash + Clone + Borrow<Q>,
    Q: Eq + Hash + ?Sized,
{
    type Output = V;

    fn index(&self, key: &Q) -> &V {
        self.get(key).expect("key not present in Grouped")
    }
}

impl<K: Eq + Hash + Clone, V> FromIterator<(K, V)> for Grouped<K, V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut out = Grouped::new();
        for (k, v) in iter {
            out.insert(k, v);
        }
        out
    }
}

impl<K, V> IntoIterator for Grouped<K, V> {
    type Item = (K, V);
    type IntoIter = std::vec::IntoIter<(K, V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.into_iter()
    }
}

impl<'g, K, V> IntoIterator for &'g Grouped<K, V> {
    type Item = (&'g K, &'g V);
    type IntoIter = std::iter::Map<std::slice::Iter<'g, (K, V)>, fn(&'g (K, V)) -> (&'g K, &'g V)>;

    fn into_iter(self) -> Self::IntoIter {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

/// Group elements by a classifier, accumulating each bucket with a downstream collector.
///
/// ```
/// use streamline::collectors::GroupingBy;
/// use streamline::Stream;
///
/// let groups = Stream::new(0..10).collect(GroupingBy::new(|x: &i32| x % 3)).unwrap();
/// assert_eq!(groups[&0], vec![0, 3, 6, 9]);
/// assert_eq!(groups[&1], vec![1, 4, 7]);
/// assert_eq!(groups[&2], vec![2, 5, 8]);
/// ```
#[derive(Debug)]
pub struct GroupingBy<K, F, C> {
    classifier: Arc<F>,
    downstream: C,
    buckets: Grouped<K, C>,
}

impl<K, F, T> GroupingBy<K, F, ToList<T>> {
    /// Group into lists.
    pub fn new(classifier: F) -> Self {
        Self::with(classifier, ToList::new())
    }
}

impl<K, F, C> GroupingBy<K, F, C> {
    /// Group with `downstream` as the per-bucket collector.
    pub fn with(classifier: F, downstream: C) -> Self {
        Self { classifier: Arc::new(classifier), downstream, buckets: Grouped::new() }
    }
}

impl<E, K, F, C> Collector<E> for GroupingBy<K, F, C>
where
    K: Eq + Hash + Clone,
    F: Fn(&E) -> K,
    C: Collector<E>,
{
    type Output = Grouped<K, C::Output>;

    fn supply(&self) -> Self {
        Self {
            classifier: Arc::clone(&self.classifier),
            downstream: self.downstream.supply(),
            buckets: Grouped::new(),
        }
    }

    fn consume(&mut self, e: E) -> Result<()> {
        let key = (self.classifier)(&e);
        let template = &self.downstream;
        self.buckets.get_or_insert_with(key, || template.supply()).consume(e)
    }

    fn finish(self) -> Self::Output {
        self.buckets.map_values(|bucket| bucket.finish())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_keep_first_seen_order() {
        let mut g: Grouped<&str, i32> = Grouped::new();
        g.insert("b", 1);
        g.insert("a", 2);
        assert_eq!(g.insert("b", 3), Some(1));
        assert_eq!(g.keys().copied().collect::<Vec<_>>(), vec!["b", "a"]);
        assert_eq!(g["b"], 3);
    }

    #[test]
    fn equality_is_order_sensitive() {
        let ab: Grouped<i32, i32> = vec![(1, 1), (2, 2)].into_iter().collect();
        let ba: Grouped<i32, i32> = vec![(2, 2), (1, 1)].into_iter().collect();
        assert_ne!(ab, ba);
        assert_eq!(ab.clone().into_hash_map(), ba.into_hash_map());
    }
}
