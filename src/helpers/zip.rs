//! Zipping operators.
//!
//! The `after` flag used by the many-way variants says where the stream's own element
//! goes in each row: first (`after = true`, the other sequences come after it) or last.
//! The pairwise operators spell the placement in their names instead
//! ([`zip`](Stream::zip) vs. [`zip_before`](Stream::zip_before)).

use crate::runner::ExecutionMode;
use crate::stream::Stream;

impl<'a, X: 'a, M: ExecutionMode> Stream<'a, X, M> {
    /// Pair elements with `other`, stopping at the shorter of the two.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let pairs = Stream::new(100..100_000).zip(0..3).to_vec().unwrap();
    /// assert_eq!(pairs, vec![(100, 0), (101, 1), (102, 2)]);
    /// ```
    pub fn zip<I>(self, other: I) -> Stream<'a, (X, I::Item), M>
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: 'a,
    {
        self.rewrap("zip", move |c| c.zip(other))
    }

    /// Pair elements with `other`, the other sequence's element first.
    pub fn zip_before<I>(self, other: I) -> Stream<'a, (I::Item, X), M>
    where
        I: IntoIterator,
        I::IntoIter: 'a,
        I::Item: 'a,
    {
        self.rewrap("zip_before", move |c| other.into_iter().zip(c))
    }

    /// Zip with any number of same-typed sequences into rows.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let rows = Stream::new(0..10).zip_many(vec![10..12, 20..30], false).to_vec().unwrap();
    /// assert_eq!(rows, vec![vec![10, 20, 0], vec![11, 21, 1]]);
    /// ```
    pub fn zip_many<I>(self, others: Vec<I>, after: bool) -> Stream<'a, Vec<X>, M>
    where
        I: IntoIterator<Item = X>,
        I::IntoIter: 'a,
    {
        self.rewrap("zip_many", move |mut c| {
            let mut others: Vec<I::IntoIter> = others.into_iter().map(IntoIterator::into_iter).collect();
            std::iter::from_fn(move || {
                let mut row = Vec::with_capacity(others.len() + 1);
                if after {
                    row.push(c.next()?);
                }
                for o in others.iter_mut() {
                    row.push(o.next()?);
                }
                if !after {
                    row.push(c.next()?);
                }
                Some(row)
            })
        })
    }

    /// Pair elements with `other` until both run out, padding the shorter with `fill`.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let padded = Stream::new(11..13).zip_longest(0..4, false, -1).to_vec().unwrap();
    /// assert_eq!(padded, vec![(0, 11), (1, 12), (2, -1), (3, -1)]);
    /// ```
    pub fn zip_longest<I>(self, other: I, after: bool, fill: X) -> Stream<'a, (X, X), M>
    where
        X: Clone,
        I: IntoIterator<Item = X>,
        I::IntoIter: 'a,
    {
        self.rewrap("zip_longest", move |c| {
            let mut mine = c.fuse();
            let mut theirs = other.into_iter().fuse();
            std::iter::from_fn(move || {
                let (x, y) = match (mine.next(), theirs.next()) {
                    (None, None) => return None,
                    (x, y) => (
                        x.unwrap_or_else(|| fill.clone()),
                        y.unwrap_or_else(|| fill.clone()),
                    ),
                };
                Some(if after { (x, y) } else { (y, x) })
            })
        })
    }

    /// Many-way [`zip_longest`](Self::zip_longest).
    pub fn zip_longest_many<I>(self, others: Vec<I>, after: bool, fill: X) -> Stream<'a, Vec<X>, M>
    where
        X: Clone,
        I: IntoIterator<Item = X>,
        I::IntoIter: 'a,
    {
        self.rewrap("zip_longest_many", move |c| {
            let mut inputs: Vec<Box<dyn Iterator<Item = X> + 'a>> = Vec::with_capacity(others.len() + 1);
            let others = others.into_iter().map(|o| Box::new(o.into_iter().fuse()) as Box<dyn Iterator<Item = X> + 'a>);
            if after {
                inputs.push(Box::new(c.fuse()));
                inputs.extend(others);
            } else {
                inputs.extend(others);
                inputs.push(Box::new(c.fuse()));
            }
            std::iter::from_fn(move || {
                let row: Vec<Option<X>> = inputs.iter_mut().map(Iterator::next).collect();
                if row.iter().all(Option::is_none) {
                    return None;
                }
                Some(row.into_iter().map(|x| x.unwrap_or_else(|| fill.clone())).collect())
            })
        })
    }

    /// Pair elements with `other` repeated endlessly; ends with the stream.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let tagged = Stream::new(11..16).cycle_before(0..3).to_vec().unwrap();
    /// assert_eq!(tagged, vec![(0, 11), (1, 12), (2, 13), (0, 14), (1, 15)]);
    /// ```
    pub fn cycle<I>(self, other: I) -> Stream<'a, (X, I::Item), M>
    where
        I: IntoIterator,
        I::IntoIter: Clone + 'a,
        I::Item: 'a,
    {
        self.zip(other.into_iter().cycle())
    }

    /// [`cycle`](Self::cycle) with the repeated sequence's element first.
    pub fn cycle_before<I>(self, other: I) -> Stream<'a, (I::Item, X), M>
    where
        I: IntoIterator,
        I::IntoIter: Clone + 'a,
        I::Item: 'a,
    {
        self.zip_before(other.into_iter().cycle())
    }
}
