//! Operators on [`Stream`](crate::Stream), one file per concern.
//!
//! Intermediate operators live in `elementwise`, `ordering`, `batches` and `zip`;
//! everything that ends a stream lives in `terminal`.

pub(crate) mod batches;
pub(crate) mod elementwise;
pub(crate) mod ordering;
pub(crate) mod terminal;
pub(crate) mod zip;
