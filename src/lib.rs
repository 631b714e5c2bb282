//! # Streamline
//!
//! Lazily-evaluated, **single-pass data pipelines** for Rust. A [`Stream`] wraps any
//! iterator or supplier, chains intermediate operators without running them, and produces a
//! result when exactly one terminal operator drives it.
//!
//! ## Key Features
//!
//! - **Fluent, lazy operators** - map, filter, flat_map, sort, distinct, zip, window functions
//! - **Composable collectors** - lists, sets, maps, joining, counting, averaging, nested grouping
//! - **Conditional transforms** - `if` / `elif` / `else` chains built from predicates
//! - **Single-use lifecycle** - any operation after consumption fails with
//!   [`StreamError::PipelineClosed`]
//! - **Concurrent execution** - ship elements to a worker pool; queued work is cancelled when
//!   the consumer stops early (feature `concurrent`, on by default)
//!
//! ## Quick Start
//!
//! ```
//! use streamline::collectors::{Counting, GroupingBy};
//! use streamline::Stream;
//!
//! let words = vec!["apple", "avocado", "banana", "blueberry", "cherry", "apricot"];
//!
//! let by_letter = Stream::new(words)
//!     .map(|w| w.to_uppercase())
//!     .collect(GroupingBy::with(|w: &String| w.chars().next(), Counting::new()))?;
//!
//! assert_eq!(by_letter[&Some('A')], 3);
//! assert_eq!(by_letter.keys().copied().collect::<Vec<_>>(), vec![Some('A'), Some('B'), Some('C')]);
//! # Ok::<(), streamline::StreamError>(())
//! ```
//!
//! ## Core Concepts
//!
//! ### Stream
//!
//! A [`Stream`] is consumed exactly once. Intermediate operators take `self` and return a new
//! stream; terminal operators take `&mut self`, close the stream, and return
//! [`Result`]. Errors raised while the pipeline runs (a window that cannot be filled, a
//! failed worker unit) are reported by the terminal operator.
//!
//! ### Collectors
//!
//! A [`Collector`] is fed every element and then finished into a value. Collectors nest, so
//! `GroupingBy::with(key, Mapping::new(f, ToSet::new()))` groups, transforms, and
//! deduplicates in one pass. See [`collectors`].
//!
//! ### Optional
//!
//! Terminal operators that may have nothing to return (`min`, `reduce`, `find_first`) yield
//! an [`Optional`].
//!
//! ### Execution Modes
//!
//! - **Sequential** - the default; everything runs on the calling thread, in order
//! - **Concurrent** - [`ParallelStream`] adds `map_concurrent`, `filter_concurrent`,
//!   `batch_processor` and `for_each_concurrent`, configured by [`ExecConfig`]
//!
//! ## Feature Flags
//!
//! - `concurrent` - worker pool execution (rayon + crossbeam)
//!
//! ## Module Overview
//!
//! - [`stream`] - the [`Stream`] type, construction and the draining iterator
//! - [`collectors`] - the [`Collector`] trait and built-in collectors
//! - [`condition`] - [`ChainedCondition`]
//! - [`runner`] - execution modes and [`ExecConfig`]
//! - [`concurrent`] - the worker pool behind [`ParallelStream`]
//! - [`chunk`] - fixed-size chunking of iterators
//! - [`comparator`] - comparator combinators
//! - [`testing`] - assertions and fixtures for tests

pub mod chunk;
pub mod collectors;
pub mod comparator;
pub mod condition;
pub mod error;
pub mod lifecycle;
pub mod optional;
pub mod runner;
pub mod stream;
pub mod testing;

mod helpers;

#[cfg(feature = "concurrent")]
pub mod concurrent;

pub use collectors::{Collector, Grouped};
pub use condition::ChainedCondition;
pub use error::{ErrorKind, Result, StreamError};
pub use optional::Optional;
pub use runner::{DispatchOptions, ExecConfig, ExecutionMode, PoolKind, Sequential};
pub use stream::{Drain, Stream};

#[cfg(feature = "concurrent")]
pub use concurrent::{Concurrent, Executor, ParallelStream};
