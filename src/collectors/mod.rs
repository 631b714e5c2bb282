//! Composable terminal aggregation.
//!
//! A [`Collector`] is a small state machine driven by [`Stream::collect`](crate::Stream::collect):
//! it is fed every element through [`Collector::consume`] and converted into a result by
//! [`Collector::finish`]. Collectors nest: a collector may hold a *downstream* collector and
//! forward to it after a local transform, and [`Collector::supply`] hands out fresh copies
//! so grouping can give every bucket its own accumulator.
//!
//! | Collector | Output |
//! |---|---|
//! | [`ToList`], [`ToLinkedList`], [`ToSet`], [`ToSortedSet`], [`ToContainer`] | the container |
//! | [`CollectAndThen`] | `then(downstream output)` |
//! | [`ToMap`] | `HashMap<K, V>` |
//! | [`Mapping`] | downstream output |
//! | [`MaxBy`], [`MinBy`], [`Reduce`] | [`Optional`](crate::Optional) |
//! | [`Joining`] | `String` |
//! | [`Counting`] | `usize` |
//! | [`Summing`] | the element type |
//! | [`Averaging`] | `Optional<f64>` |
//! | [`GroupingBy`] | [`Grouped<K, downstream output>`](Grouped) |
//!
//! # Example
//!
//! ```
//! use streamline::collectors::{Counting, GroupingBy};
//! use streamline::Stream;
//!
//! let codes = vec!["AB", "BD", "AC", "DE", "BD", "BW", "AB"];
//! let nested = Stream::new(codes)
//!     .collect(GroupingBy::with(
//!         |s: &&str| s[..1].to_string(),
//!         GroupingBy::with(|s: &&str| s[1..].to_string(), Counting::new()),
//!     ))
//!     .unwrap();
//!
//! assert_eq!(nested["A"]["B"], 2);
//! assert_eq!(nested["B"]["W"], 1);
//! assert_eq!(nested.keys().cloned().collect::<Vec<_>>(), vec!["A", "B", "D"]);
//! ```

use crate::error::Result;

pub mod containers;
pub mod grouping;
pub mod mapping;
pub mod reducing;

pub use containers::{Bucket, ToContainer, ToLinkedList, ToList, ToSet, ToSortedSet};
pub use grouping::{Grouped, GroupingBy};
pub use mapping::{CollectAndThen, Mapping, ToMap};
pub use reducing::{Averaging, Counting, Joining, MaxBy, MinBy, Reduce, Summing};

/// Stateful, composable aggregation of elements of type `E`.
pub trait Collector<E>: Sized {
    type Output;

    /// A fresh collector with the same configuration and empty state.
    fn supply(&self) -> Self;

    /// Fold one element into the accumulator.
    fn consume(&mut self, e: E) -> Result<()>;

    /// Convert the accumulated state into the result.
    fn finish(self) -> Self::Output;
}
