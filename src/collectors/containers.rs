//! Collectors that hold elements in a container.
//!
//! Containers plug in through the [`Bucket`] capability. The concrete container is
//! chosen either by type (via `Default`) or by passing a factory function to
//! [`ToContainer::with_factory`].

use super::Collector;
use crate::error::Result;
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::hash::{BuildHasher, Hash};

/// Anything elements can be inserted into.
pub trait Bucket<E> {
    fn insert(&mut self, e: E);
}

impl<E> Bucket<E> for Vec<E> {
    fn insert(&mut self, e: E) {
        self.push(e);
    }
}

impl<E> Bucket<E> for VecDeque<E> {
    fn insert(&mut self, e: E) {
        self.push_back(e);
    }
}

impl<E: Eq + Hash, S: BuildHasher> Bucket<E> for HashSet<E, S> {
    fn insert(&mut self, e: E) {
        HashSet::insert(self, e);
    }
}

impl<E: Ord> Bucket<E> for BTreeSet<E> {
    fn insert(&mut self, e: E) {
        BTreeSet::insert(self, e);
    }
}

/// Collects elements into a container built by a factory.
#[derive(Debug, Clone)]
pub struct ToContainer<C> {
    holder: C,
    factory: fn() -> C,
}

/// Collect into a `Vec`.
pub type ToList<E> = ToContainer<Vec<E>>;
/// Collect into a `VecDeque`.
pub type ToLinkedList<E> = ToContainer<VecDeque<E>>;
/// Collect into a `HashSet`.
pub type ToSet<E> = ToContainer<HashSet<E>>;
/// Collect into a `BTreeSet`.
pub type ToSortedSet<E> = ToContainer<BTreeSet<E>>;

impl<C: Default> ToContainer<C> {
    pub fn new() -> Self {
        Self::with_factory(C::default)
    }
}

impl<C: Default> Default for ToContainer<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> ToContainer<C> {
    /// Use `factory` to build the container, here and in every supplied copy.
    ///
    /// ```
    /// use streamline::collectors::ToContainer;
    /// use streamline::Stream;
    ///
    /// let v = Stream::new(0..4)
    ///     .collect(ToContainer::with_factory(|| Vec::with_capacity(16)))
    ///     .unwrap();
    /// assert_eq!(v, vec![0, 1, 2, 3]);
    /// assert!(v.capacity() >= 16);
    /// ```
    pub fn with_factory(factory: fn() -> C) -> Self {
        Self { holder: factory(), factory }
    }
}

impl<E, C: Bucket<E>> Collector<E> for ToContainer<C> {
    type Output = C;

    fn supply(&self) -> Self {
        Self::with_factory(self.factory)
    }

    fn consume(&mut self, e: E) -> Result<()> {
        self.holder.insert(e);
        Ok(())
    }

    fn finish(self) -> C {
        self.holder
    }
}
