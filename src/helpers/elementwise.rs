use crate::condition::ChainedCondition;
use crate::error::{Result, StreamError, ensure_positive};
use crate::runner::ExecutionMode;
use crate::stream::Stream;

impl<'a, X: 'a, M: ExecutionMode> Stream<'a, X, M> {
    pub fn map<Y: 'a>(self, f: impl FnMut(X) -> Y + 'a) -> Stream<'a, Y, M> {
        self.rewrap("map", move |c| c.map(f))
    }

    pub fn filter(self, pred: impl FnMut(&X) -> bool + 'a) -> Self {
        self.rewrap("filter", move |c| c.filter(pred))
    }

    /// Drop the elements `pred` accepts.
    pub fn exclude(self, mut pred: impl FnMut(&X) -> bool + 'a) -> Self {
        self.rewrap("exclude", move |c| c.filter(move |x| !pred(x)))
    }

    /// Replace every element by the elements of `f(x)`.
    pub fn flat_map<I>(self, f: impl FnMut(X) -> I + 'a) -> Stream<'a, I::Item, M>
    where
        I: IntoIterator + 'a,
        I::IntoIter: 'a,
        I::Item: 'a,
    {
        self.rewrap("flat_map", move |c| c.flat_map(f))
    }

    /// Splice a stream of iterables into one stream.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let flat = Stream::new(vec![vec![1, 2], vec![], vec![3, 4, 5]]).flatten().to_vec().unwrap();
    /// assert_eq!(flat, vec![1, 2, 3, 4, 5]);
    /// ```
    pub fn flatten(self) -> Stream<'a, X::Item, M>
    where
        X: IntoIterator,
        X::IntoIter: 'a,
        X::Item: 'a,
    {
        self.rewrap("flatten", |c| c.flatten())
    }

    /// Observe elements as they pass.
    pub fn peek(self, consumer: impl FnMut(&X) + 'a) -> Self {
        self.rewrap("peek", move |c| c.inspect(consumer))
    }

    /// Observe every `n`-th element (the `n`-th, `2n`-th, ...).
    ///
    /// ```
    /// use streamline::Stream;
    /// use std::cell::RefCell;
    ///
    /// let seen = RefCell::new(Vec::new());
    /// let all = Stream::new(0..10)
    ///     .peek_after_each(|x| seen.borrow_mut().push(*x), 3)?
    ///     .to_vec()?;
    /// assert_eq!(all.len(), 10);
    /// assert_eq!(seen.into_inner(), vec![2, 5, 8]);
    /// # Ok::<(), streamline::StreamError>(())
    /// ```
    pub fn peek_after_each(self, mut consumer: impl FnMut(&X) + 'a, n: usize) -> Result<Self> {
        self.try_rewrap("peek_after_each", move |c| {
            let n = ensure_positive("n", n)?;
            Ok(c.enumerate().map(move |(i, x)| {
                if (i + 1) % n == 0 {
                    consumer(&x);
                }
                x
            }))
        })
    }

    /// Pair every element with a running index starting at `start`.
    pub fn enumerate(self, start: usize) -> Stream<'a, (usize, X), M> {
        self.rewrap("enumerate", move |c| (start..).zip(c))
    }

    pub fn take_while(self, pred: impl FnMut(&X) -> bool + 'a) -> Self {
        self.rewrap("take_while", move |c| c.take_while(pred))
    }

    pub fn drop_while(self, pred: impl FnMut(&X) -> bool + 'a) -> Self {
        self.rewrap("drop_while", move |c| c.skip_while(pred))
    }

    /// Keep at most the first `n` elements.
    pub fn limit(self, n: usize) -> Self {
        self.rewrap("limit", move |c| c.take(n))
    }

    pub fn skip(self, n: usize) -> Self {
        self.rewrap("skip", move |c| c.skip(n))
    }

    /// `then(x)` where `pred(x)` holds, `else_(x)` elsewhere.
    pub fn if_else<Y: 'a>(
        self,
        mut pred: impl FnMut(&X) -> bool + 'a,
        mut then: impl FnMut(X) -> Y + 'a,
        mut else_: impl FnMut(X) -> Y + 'a,
    ) -> Stream<'a, Y, M> {
        self.rewrap("if_else", move |c| {
            c.map(move |x| if pred(&x) { then(x) } else { else_(x) })
        })
    }

    /// `then(x)` where `pred(x)` holds; other elements pass unchanged.
    pub fn if_then(
        self,
        mut pred: impl FnMut(&X) -> bool + 'a,
        mut then: impl FnMut(X) -> X + 'a,
    ) -> Self {
        self.rewrap("if_then", move |c| c.map(move |x| if pred(&x) { then(x) } else { x }))
    }

    /// Transform every element with a closed [`ChainedCondition`].
    pub fn conditional<Y: 'a>(self, condition: ChainedCondition<'a, X, Y>) -> Result<Stream<'a, Y, M>> {
        self.try_rewrap("conditional", move |c| {
            if !condition.is_closed() {
                return Err(StreamError::ConditionNotClosed);
            }
            // A closed chain always has a fallback, so evaluation never comes back empty.
            Ok(c.map_while(move |x| condition.evaluate(x)))
        })
    }

    /// Running fold; the first output is the first element.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let sums = Stream::new(0..6).accumulate(|a, b| a + b).to_vec().unwrap();
    /// assert_eq!(sums, vec![0, 1, 3, 6, 10, 15]);
    /// ```
    pub fn accumulate(self, mut combine: impl FnMut(X, X) -> X + 'a) -> Self
    where
        X: Clone,
    {
        self.rewrap("accumulate", move |c| {
            c.scan(None, move |acc: &mut Option<X>, x| {
                let next = match acc.take() {
                    Some(prev) => combine(prev, x),
                    None => x,
                };
                *acc = Some(next.clone());
                Some(next)
            })
        })
    }
}
