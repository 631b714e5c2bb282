use crate::runner::ExecutionMode;
use crate::stream::{Cursor, Stream};
use std::cmp::{Ordering, Reverse};
use std::collections::HashSet;
use std::hash::Hash;

/// Defer materializing `cursor` until the first pull, then rearrange it in one go.
fn materialize<'a, X: 'a>(
    cursor: Cursor<'a, X>,
    arrange: impl FnOnce(&mut Vec<X>) + 'a,
) -> impl Iterator<Item = X> + 'a {
    let mut pending = Some((cursor, arrange));
    std::iter::once(()).flat_map(move |()| match pending.take() {
        Some((cursor, arrange)) => {
            let mut buf: Vec<X> = cursor.collect();
            arrange(&mut buf);
            buf
        }
        None => Vec::new(),
    })
}

impl<'a, X: 'a, M: ExecutionMode> Stream<'a, X, M> {
    /// Stable sort in natural order, or descending when `reverse` is set.
    ///
    /// Equal elements keep their original relative order in both directions.
    pub fn sort(self, reverse: bool) -> Self
    where
        X: Ord,
    {
        self.rewrap("sort", move |c| {
            materialize(c, move |buf| {
                if reverse {
                    buf.sort_by(|a, b| b.cmp(a));
                } else {
                    buf.sort();
                }
            })
        })
    }

    /// Stable sort by a derived key; `key` is computed once per element.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let by_len = Stream::new(vec!["ccc", "a", "bb", "d"])
    ///     .sort_by_key(|w| w.len(), true)
    ///     .to_vec()
    ///     .unwrap();
    /// assert_eq!(by_len, vec!["ccc", "bb", "a", "d"]);
    /// ```
    pub fn sort_by_key<K: Ord + 'a>(self, mut key: impl FnMut(&X) -> K + 'a, reverse: bool) -> Self {
        self.rewrap("sort_by_key", move |c| {
            materialize(c, move |buf| {
                if reverse {
                    buf.sort_by_cached_key(|x| Reverse(key(x)));
                } else {
                    buf.sort_by_cached_key(key);
                }
            })
        })
    }

    /// Stable sort with an explicit comparator, see [`comparator`](crate::comparator).
    pub fn sort_by(self, cmp: impl FnMut(&X, &X) -> Ordering + 'a) -> Self {
        self.rewrap("sort_by", move |c| materialize(c, move |buf| buf.sort_by(cmp)))
    }

    /// Drop repeats, keeping first occurrences in order.
    ///
    /// Streams lazily, so it can follow an unbounded source:
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let mut i = 0;
    /// let firsts = Stream::from_supplier(move || { i += 1; i % 4 })
    ///     .distinct()
    ///     .limit(4)
    ///     .to_vec()
    ///     .unwrap();
    /// assert_eq!(firsts, vec![1, 2, 3, 0]);
    /// ```
    pub fn distinct(self) -> Self
    where
        X: Eq + Hash + Clone,
    {
        self.rewrap("distinct", |c| {
            let mut seen = HashSet::new();
            c.filter(move |x| seen.insert(x.clone()))
        })
    }
}
