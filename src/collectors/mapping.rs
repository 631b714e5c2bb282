//! Collectors that transform elements or results on the way to a downstream collector.

use super::Collector;
use super::containers::ToList;
use crate::error::{Result, StreamError};
use std::collections::HashMap;
use std::fmt::Debug;
use std::hash::Hash;
use std::sync::Arc;

/// Collect with `downstream`, then apply `then` to its output.
///
/// ```
/// use streamline::collectors::{CollectAndThen, ToSet};
/// use streamline::Stream;
///
/// let distinct_sum = Stream::new(vec![1, 4, 2, 6, 1, 5, 6])
///     .collect(CollectAndThen::new(ToSet::new(), |s: std::collections::HashSet<i32>| {
///         s.into_iter().sum::<i32>()
///     }))
///     .unwrap();
/// assert_eq!(distinct_sum, 18);
/// ```
#[derive(Debug)]
pub struct CollectAndThen<C, F> {
    downstream: C,
    then: Arc<F>,
}

impl<C, F> CollectAndThen<C, F> {
    pub fn new(downstream: C, then: F) -> Self {
        Self { downstream, then: Arc::new(then) }
    }
}

impl<E, R, C, F> Collector<E> for CollectAndThen<C, F>
where
    C: Collector<E>,
    F: Fn(C::Output) -> R,
{
    type Output = R;

    fn supply(&self) -> Self {
        Self { downstream: self.downstream.supply(), then: Arc::clone(&self.then) }
    }

    fn consume(&mut self, e: E) -> Result<()> {
        self.downstream.consume(e)
    }

    fn finish(self) -> R {
        (self.then)(self.downstream.finish())
    }
}

/// Build a `HashMap` from elements.
///
/// Producing the same key twice fails with [`StreamError::DuplicateKey`] unless a
/// resolver was installed with [`ToMap::on_conflict`], in which case the resolver
/// combines the old and new values.
///
/// ```
/// use streamline::collectors::ToMap;
/// use streamline::Stream;
///
/// let squares = Stream::new(vec![1, 4, 2, 6, 1])
///     .collect(ToMap::new(|x: &i32| *x, |x: i32| x * x).on_conflict(|old: i32, _new: i32| old))
///     .unwrap();
/// assert_eq!(squares.len(), 4);
/// assert_eq!(squares[&6], 36);
/// ```
pub struct ToMap<K, V, KF, VF, M> {
    key_fn: Arc<KF>,
    value_fn: Arc<VF>,
    resolver: Option<Arc<M>>,
    entries: HashMap<K, V>,
}

impl<K, V, KF, VF> ToMap<K, V, KF, VF, fn(V, V) -> V> {
    pub fn new(key_fn: KF, value_fn: VF) -> Self {
        Self {
            key_fn: Arc::new(key_fn),
            value_fn: Arc::new(value_fn),
            resolver: None,
            entries: HashMap::new(),
        }
    }
}

impl<K, E, KF> ToMap<K, E, KF, fn(E) -> E, fn(E, E) -> E> {
    /// Key every element by `key_fn` and keep the element itself as the value.
    pub fn by_key(key_fn: KF) -> Self {
        Self::new(key_fn, std::convert::identity::<E>)
    }
}

impl<K, V, KF, VF, M> ToMap<K, V, KF, VF, M> {
    /// Resolve duplicate keys with `resolver(old, new)`.
    pub fn on_conflict<M2>(self, resolver: M2) -> ToMap<K, V, KF, VF, M2>
    where
        M2: Fn(V, V) -> V,
    {
        ToMap {
            key_fn: self.key_fn,
            value_fn: self.value_fn,
            resolver: Some(Arc::new(resolver)),
            entries: self.entries,
        }
    }
}

impl<E, K, V, KF, VF, M> Collector<E> for ToMap<K, V, KF, VF, M>
where
    K: Eq + Hash + Debug,
    KF: Fn(&E) -> K,
    VF: Fn(E) -> V,
    M: Fn(V, V) -> V,
{
    type Output = HashMap<K, V>;

    fn supply(&self) -> Self {
        Self {
            key_fn: Arc::clone(&self.key_fn),
            value_fn: Arc::clone(&self.value_fn),
            resolver: self.resolver.clone(),
            entries: HashMap::new(),
        }
    }

    fn consume(&mut self, e: E) -> Result<()> {
        let key = (self.key_fn)(&e);
        let Some(old) = self.entries.remove(&key) else {
            let value = (self.value_fn)(e);
            self.entries.insert(key, value);
            return Ok(());
        };
        match &self.resolver {
            Some(resolve) => {
                let merged = resolve(old, (self.value_fn)(e));
                self.entries.insert(key, merged);
                Ok(())
            }
            None => {
                let err = StreamError::DuplicateKey { key: format!("{key:?}") };
                self.entries.insert(key, old);
                Err(err)
            }
        }
    }

    fn finish(self) -> HashMap<K, V> {
        self.entries
    }
}

/// Transform each element with `f`, then hand it to `downstream`.
///
/// ```
/// use streamline::collectors::{Mapping, Summing};
/// use streamline::Stream;
///
/// let sum_of_squares = Stream::new(0..5)
///     .collect(Mapping::new(|x: i32| x * x, Summing::new()))
///     .unwrap();
/// assert_eq!(sum_of_squares, 30);
/// ```
#[derive(Debug)]
pub struct Mapping<F, C> {
    f: Arc<F>,
    downstream: C,
}

impl<F, C> Mapping<F, C> {
    pub fn new(f: F, downstream: C) -> Self {
        Self { f: Arc::new(f), downstream }
    }
}

impl<F, T> Mapping<F, ToList<T>> {
    /// Map into a list.
    pub fn to_list(f: F) -> Self {
        Self::new(f, ToList::new())
    }
}

impl<E, T, F, C> Collector<E> for Mapping<F, C>
where
    F: Fn(E) -> T,
    C: Collector<T>,
{
    type Output = C::Output;

    fn supply(&self) -> Self {
        Self { f: Arc::clone(&self.f), downstream: self.downstream.supply() }
    }

    fn consume(&mut self, e: E) -> Result<()> {
        self.downstream.consume((self.f)(e))
    }

    fn finish(self) -> C::Output {
        self.downstream.finish()
    }
}
