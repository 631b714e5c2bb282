//! Collectors that fold the whole input into a single value.

use super::Collector;
use crate::comparator::natural;
use crate::error::Result;
use crate::optional::Optional;
use std::cmp::Ordering;
use std::fmt;
use std::ops::Add;
use std::sync::Arc;

/* ===================== MaxBy / MinBy ===================== */

/// Largest element under a comparator; the first of several equal maxima wins.
///
/// - Output: `Optional<E>`, absent when nothing was consumed.
#[derive(Debug)]
pub struct MaxBy<E, C> {
    best: Option<E>,
    cmp: Arc<C>,
}

impl<E: Ord> MaxBy<E, fn(&E, &E) -> Ordering> {
    pub fn natural() -> Self {
        Self::new(natural::<E>)
    }
}

impl<E, C> MaxBy<E, C>
where
    C: Fn(&E, &E) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self { best: None, cmp: Arc::new(cmp) }
    }
}

impl<E, C> Collector<E> for MaxBy<E, C>
where
    C: Fn(&E, &E) -> Ordering,
{
    type Output = Optional<E>;

    fn supply(&self) -> Self {
        Self { best: None, cmp: Arc::clone(&self.cmp) }
    }

    fn consume(&mut self, e: E) -> Result<()> {
        let replace = match &self.best {
            Some(cur) => (self.cmp)(&e, cur) == Ordering::Greater,
            None => true,
        };
        if replace {
            self.best = Some(e);
        }
        Ok(())
    }

    fn finish(self) -> Optional<E> {
        self.best.into()
    }
}

/// Smallest element under a comparator; the first of several equal minima wins.
///
/// - Output: `Optional<E>`, absent when nothing was consumed.
#[derive(Debug)]
pub struct MinBy<E, C> {
    best: Option<E>,
    cmp: Arc<C>,
}

impl<E: Ord> MinBy<E, fn(&E, &E) -> Ordering> {
    pub fn natural() -> Self {
        Self::new(natural::<E>)
    }
}

impl<E, C> MinBy<E, C>
where
    C: Fn(&E, &E) -> Ordering,
{
    pub fn new(cmp: C) -> Self {
        Self { best: None, cmp: Arc::new(cmp) }
    }
}

impl<E, C> Collector<E> for MinBy<E, C>
where
    C: Fn(&E, &E) -> Ordering,
{
    type Output = Optional<E>;

    fn supply(&self) -> Self {
        Self { best: None, cmp: Arc::clone(&self.cmp) }
    }

    fn consume(&mut self, e: E) -> Result<()> {
        let replace = match &self.best {
            Some(cur) => (self.cmp)(&e, cur) == Ordering::Less,
            None => true,
        };
        if replace {
            self.best = Some(e);
        }
        Ok(())
    }

    fn finish(self) -> Optional<E> {
        self.best.into()
    }
}

/* ===================== Joining ===================== */

/// Concatenate string-like elements as `prefix + e1 + sep + e2 + ... + suffix`.
///
/// ```
/// use streamline::collectors::Joining;
/// use streamline::Stream;
///
/// let s = Stream::new(vec!["A", "B", "C"]).collect(Joining::with(",", "<", ">")).unwrap();
/// assert_eq!(s, "<A,B,C>");
/// ```
#[derive(Debug, Clone, Default)]
pub struct Joining {
    sep: String,
    prefix: String,
    suffix: String,
    parts: Vec<String>,
}

impl Joining {
    pub fn new(sep: impl Into<String>) -> Self {
        Self::with(sep, "", "")
    }

    pub fn with(sep: impl Into<String>, prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            sep: sep.into(),
            prefix: prefix.into(),
            suffix: suffix.into(),
            parts: Vec::new(),
        }
    }
}

impl<E: AsRef<str>> Collector<E> for Joining {
    type Output = String;

    fn supply(&self) -> Self {
        Self::with(self.sep.clone(), self.prefix.clone(), self.suffix.clone())
    }

    fn consume(&mut self, e: E) -> Result<()> {
        self.parts.push(e.as_ref().to_owned());
        Ok(())
    }

    fn finish(self) -> String {
        format!("{}{}{}", self.prefix, self.parts.join(&self.sep), self.suffix)
    }
}

/* ===================== Counting / Summing / Averaging ===================== */

/// Number of consumed elements.
#[derive(Debug, Clone, Copy, Default)]
pub struct Counting {
    count: usize,
}

impl Counting {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E> Collector<E> for Counting {
    type Output = usize;

    fn supply(&self) -> Self {
        Self::new()
    }

    fn consume(&mut self, _e: E) -> Result<()> {
        self.count += 1;
        Ok(())
    }

    fn finish(self) -> usize {
        self.count
    }
}

/// Sum of consumed elements, starting from `E::default()`.
#[derive(Debug, Clone, Copy, Default)]
pub struct Summing<E> {
    sum: E,
}

impl<E: Default> Summing<E> {
    pub fn new() -> Self {
        Self { sum: E::default() }
    }
}

impl<E> Collector<E> for Summing<E>
where
    E: Add<Output = E> + Default,
{
    type Output = E;

    fn supply(&self) -> Self {
        Self::new()
    }

    fn consume(&mut self, e: E) -> Result<()> {
        self.sum = std::mem::take(&mut self.sum) + e;
        Ok(())
    }

    fn finish(self) -> E {
        self.sum
    }
}

/// Arithmetic mean of consumed elements.
///
/// - Output: `Optional<f64>`, absent when nothing was consumed.
#[derive(Debug, Clone, Copy, Default)]
pub struct Averaging {
    sum: f64,
    count: usize,
}

impl Averaging {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<E: Into<f64>> Collector<E> for Averaging {
    type Output = Optional<f64>;

    fn supply(&self) -> Self {
        Self::new()
    }

    fn consume(&mut self, e: E) -> Result<()> {
        self.sum += e.into();
        self.count += 1;
        Ok(())
    }

    fn finish(self) -> Optional<f64> {
        if self.count == 0 {
            Optional::EMPTY
        } else {
            Optional::of(self.sum / self.count as f64)
        }
    }
}

/* ===================== Reduce ===================== */

/// Fold consumed elements with a binary function.
///
/// Without an initial value the output is absent exactly when nothing was consumed.
/// With one ([`Reduce::with_initial`]) the output is always present.
///
/// ```
/// use streamline::collectors::Reduce;
/// use streamline::Stream;
///
/// let product = Stream::new(1..5).collect(Reduce::new(|a: i32, b: i32| a * b)).unwrap();
/// assert_eq!(product.into_value().unwrap(), 24);
/// ```
pub struct Reduce<E, F, S = fn() -> Option<E>> {
    seed: Arc<S>,
    acc: Option<E>,
    combine: Arc<F>,
}

impl<E, F> Reduce<E, F>
where
    F: Fn(E, E) -> E,
{
    pub fn new(combine: F) -> Self {
        let seed: fn() -> Option<E> = || None;
        Self { seed: Arc::new(seed), acc: None, combine: Arc::new(combine) }
    }

    /// Start every accumulator, including supplied copies, from `initial`.
    pub fn with_initial(initial: E, combine: F) -> Reduce<E, F, impl Fn() -> Option<E>>
    where
        E: Clone,
    {
        Reduce {
            acc: Some(initial.clone()),
            seed: Arc::new(move || Some(initial.clone())),
            combine: Arc::new(combine),
        }
    }
}

impl<E: fmt::Debug, F, S> fmt::Debug for Reduce<E, F, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Reduce").field("acc", &self.acc).finish_non_exhaustive()
    }
}

impl<E, F, S> Collector<E> for Reduce<E, F, S>
where
    F: Fn(E, E) -> E,
    S: Fn() -> Option<E>,
{
    type Output = Optional<E>;

    fn supply(&self) -> Self {
        Self {
            seed: Arc::clone(&self.seed),
            acc: (self.seed)(),
            combine: Arc::clone(&self.combine),
        }
    }

    fn consume(&mut self, e: E) -> Result<()> {
        self.acc = Some(match self.acc.take() {
            Some(acc) => (self.combine)(acc, e),
            None => e,
        });
        Ok(())
    }

    fn finish(self) -> Optional<E> {
        self.acc.into()
    }
}
