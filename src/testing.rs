//! Helpers for testing code built on streams.
//!
//! - **Assertions** compare stream outputs with expectations, in or out of order, and
//!   compare [`Grouped`](crate::collectors::Grouped) results against plain maps.
//! - **Fixtures** provide small record sets with natural grouping keys and seeded
//!   pseudo-random integers.
//!
//! ```
//! use streamline::testing::*;
//! use streamline::{DispatchOptions, ExecConfig, ParallelStream};
//!
//! let data = random_ints(7, 1..100, 50);
//! let doubled = ParallelStream::concurrent(data.clone(), ExecConfig::default().with_workers(2))?
//!     .map_concurrent(|x| x * 2, DispatchOptions::new())?
//!     .to_vec()?;
//!
//! let expected: Vec<i64> = data.iter().map(|x| x * 2).collect();
//! assert_collections_unordered_equal(&doubled, &expected);
//! # Ok::<(), streamline::StreamError>(())
//! ```

pub mod assertions;
pub mod fixtures;

pub use assertions::*;
pub use fixtures::*;
