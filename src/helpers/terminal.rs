//! Terminal operators.
//!
//! Every operator here closes the stream before pulling anything, so calling any of
//! them twice, or after [`Stream::iter`], fails with
//! [`StreamError::PipelineClosed`](crate::StreamError::PipelineClosed).

use crate::collectors::{Collector, Grouped, GroupingBy};
use crate::comparator::natural;
use crate::error::Result;
use crate::optional::Optional;
use crate::runner::ExecutionMode;
use crate::stream::Stream;
use std::cmp::Ordering;
use std::hash::Hash;
use std::ops::Add;

/// The element no later element beats under `wins(candidate, best)`; earlier elements win ties.
fn select<X>(it: impl Iterator<Item = X>, mut wins: impl FnMut(&X, &X) -> bool) -> Optional<X> {
    it.reduce(|best, x| if wins(&x, &best) { x } else { best }).into()
}

impl<'a, X: 'a, M: ExecutionMode> Stream<'a, X, M> {
    pub fn count(&mut self) -> Result<usize> {
        self.terminal("count", |c| Ok(c.count()))
    }

    /// Smallest element; the first of several equal minima wins.
    pub fn min(&mut self) -> Result<Optional<X>>
    where
        X: Ord,
    {
        self.min_by(natural)
    }

    /// Largest element; the first of several equal maxima wins.
    pub fn max(&mut self) -> Result<Optional<X>>
    where
        X: Ord,
    {
        self.max_by(natural)
    }

    pub fn min_by(&mut self, mut cmp: impl FnMut(&X, &X) -> Ordering) -> Result<Optional<X>> {
        self.terminal("min_by", |c| Ok(select(c, |x, best| cmp(x, best) == Ordering::Less)))
    }

    pub fn max_by(&mut self, mut cmp: impl FnMut(&X, &X) -> Ordering) -> Result<Optional<X>> {
        self.terminal("max_by", |c| Ok(select(c, |x, best| cmp(x, best) == Ordering::Greater)))
    }

    /// Element with the smallest key; `key` runs once per element.
    pub fn min_by_key<K: Ord>(&mut self, mut key: impl FnMut(&X) -> K) -> Result<Optional<X>> {
        self.terminal("min_by_key", |c| {
            let keyed = c.map(|x| (key(&x), x));
            Ok(select(keyed, |(k, _), (best, _)| k < best).map(|(_, x)| x))
        })
    }

    /// Element with the largest key; `key` runs once per element.
    pub fn max_by_key<K: Ord>(&mut self, mut key: impl FnMut(&X) -> K) -> Result<Optional<X>> {
        self.terminal("max_by_key", |c| {
            let keyed = c.map(|x| (key(&x), x));
            Ok(select(keyed, |(k, _), (best, _)| k > best).map(|(_, x)| x))
        })
    }

    /// `true` when every element satisfies `pred`, including when there are none.
    pub fn all(&mut self, mut pred: impl FnMut(&X) -> bool) -> Result<bool> {
        self.terminal("all", |mut c| Ok(c.all(|x| pred(&x))))
    }

    /// `true` when some element satisfies `pred`; `false` on an empty stream.
    pub fn any(&mut self, mut pred: impl FnMut(&X) -> bool) -> Result<bool> {
        self.terminal("any", |mut c| Ok(c.any(|x| pred(&x))))
    }

    /// `true` when no element satisfies `pred`.
    pub fn none_match(&mut self, mut pred: impl FnMut(&X) -> bool) -> Result<bool> {
        self.terminal("none_match", |mut c| Ok(!c.any(|x| pred(&x))))
    }

    pub fn find_first(&mut self) -> Result<Optional<X>> {
        self.terminal("find_first", |mut c| Ok(c.next().into()))
    }

    pub fn for_each(&mut self, consumer: impl FnMut(X)) -> Result<()> {
        self.terminal("for_each", |c| {
            c.for_each(consumer);
            Ok(())
        })
    }

    /// Fold with `combine`; absent exactly when the stream is empty.
    pub fn reduce(&mut self, combine: impl FnMut(X, X) -> X) -> Result<Optional<X>> {
        self.terminal("reduce", |c| Ok(c.reduce(combine).into()))
    }

    /// Fold starting from `init`; always present.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let total = Stream::<i32>::empty().reduce_from(10, |a, b| a + b).unwrap();
    /// assert_eq!(total.into_value().unwrap(), 10);
    /// ```
    pub fn reduce_from<Y>(&mut self, init: Y, combine: impl FnMut(Y, X) -> Y) -> Result<Optional<Y>> {
        self.terminal("reduce_from", |c| Ok(Optional::of(c.fold(init, combine))))
    }

    /// Feed every element to `collector` and return its result.
    pub fn collect<C: Collector<X>>(&mut self, collector: C) -> Result<C::Output> {
        self.terminal("collect", |c| {
            let mut collector = collector;
            for x in c {
                collector.consume(x)?;
            }
            Ok(collector.finish())
        })
    }

    /// `start + e1 + e2 + ...`.
    pub fn sum(&mut self, start: X) -> Result<X>
    where
        X: Add<Output = X>,
    {
        self.terminal("sum", |c| Ok(c.fold(start, |acc, x| acc + x)))
    }

    /// Group elements into lists keyed by `classifier`, in first-seen key order.
    ///
    /// Shorthand for `collect(GroupingBy::new(classifier))`.
    pub fn group_by<K>(&mut self, classifier: impl Fn(&X) -> K) -> Result<Grouped<K, Vec<X>>>
    where
        K: Eq + Hash + Clone,
    {
        self.collect(GroupingBy::new(classifier))
    }

    pub fn to_vec(&mut self) -> Result<Vec<X>> {
        self.terminal("to_vec", |c| Ok(c.collect()))
    }

    /// Drain the stream for the side effects of its operators.
    pub fn done(&mut self) -> Result<()> {
        self.terminal("done", |c| {
            c.for_each(drop);
            Ok(())
        })
    }
}
