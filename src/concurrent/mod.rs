//! Concurrent execution on a worker pool.
//!
//! A [`ParallelStream`] is a [`Stream`] in the [`Concurrent`] execution mode. It keeps
//! every sequential operator and adds concurrent ones that ship elements to an
//! [`Executor`]. Results of concurrent operators arrive in completion order, not source
//! order.
//!
//! The pool lives for exactly one consumption: when the terminal operator finishes, every
//! unit still queued is cancelled and the pool shuts down.
//!
//! ```
//! use streamline::{DispatchOptions, ExecConfig, ParallelStream};
//!
//! let cfg = ExecConfig::default().with_workers(4);
//! let mut squares = ParallelStream::concurrent(0..100_u64, cfg)?
//!     .map_concurrent(|x| x * x, DispatchOptions::new())?
//!     .to_vec()?;
//! squares.sort();
//! assert_eq!(squares[..4], [0, 1, 4, 9]);
//! # Ok::<(), streamline::StreamError>(())
//! ```

mod dispatch;
pub mod executor;
pub mod unit;

pub use executor::Executor;
pub use unit::{Unit, UnitStats, UnitStatus};

use crate::error::Result;
use crate::runner::{DispatchOptions, ExecConfig, ExecutionMode, Sequential};
use crate::stream::Stream;
use dispatch::Dispatch;
use std::sync::Arc;
use std::time::Duration;

/// Execution mode of a stream backed by a worker pool.
#[derive(Debug, Clone)]
pub struct Concurrent {
    executor: Arc<Executor>,
}

impl Concurrent {
    pub fn new(config: ExecConfig) -> Result<Self> {
        Ok(Self { executor: Arc::new(Executor::new(config)?) })
    }

    pub fn executor(&self) -> &Arc<Executor> {
        &self.executor
    }
}

impl ExecutionMode for Concurrent {
    fn on_close(&self) {
        self.executor.shutdown();
    }
}

pub type ParallelStream<'a, X> = Stream<'a, X, Concurrent>;

impl<'a, X: 'a> Stream<'a, X, Sequential> {
    /// Switch to concurrent execution on a fresh pool built from `config`.
    pub fn into_concurrent(self, config: ExecConfig) -> Result<ParallelStream<'a, X>> {
        self.ensure_open()?;
        Ok(self.into_mode(Concurrent::new(config)?))
    }
}

impl<'a, X: 'a> Stream<'a, X, Concurrent> {
    pub fn concurrent<I>(source: I, config: ExecConfig) -> Result<Self>
    where
        I: IntoIterator<Item = X>,
        I::IntoIter: 'a,
    {
        Stream::new(source).into_concurrent(config)
    }

    pub fn concurrent_from_supplier(supplier: impl FnMut() -> X + 'a, config: ExecConfig) -> Result<Self> {
        Stream::from_supplier(supplier).into_concurrent(config)
    }

    pub fn executor(&self) -> &Arc<Executor> {
        self.mode().executor()
    }

    fn dispatch<R, F>(self, op: &'static str, work: F, opts: DispatchOptions) -> Result<ParallelStream<'a, R>>
    where
        X: Send + 'static,
        R: Send + 'static,
        F: Fn(X) -> anyhow::Result<R> + Send + Sync + 'static,
    {
        let executor = Arc::clone(self.executor());
        let fault = self.fault().clone();
        self.try_rewrap(op, move |c| {
            let (wave, timeout) = opts.resolve(executor.config())?;
            Ok(Dispatch::new(c, executor, Arc::new(work), wave, timeout, fault))
        })
    }

    /// Apply `f` to every element on the pool; results arrive in completion order.
    pub fn map_concurrent<Y, F>(self, f: F, opts: DispatchOptions) -> Result<ParallelStream<'a, Y>>
    where
        X: Send + 'static,
        Y: Send + 'static,
        F: Fn(X) -> Y + Send + Sync + 'static,
    {
        self.dispatch("map_concurrent", move |x| Ok(f(x)), opts)
    }

    /// Like [`map_concurrent`](Self::map_concurrent) for fallible work.
    ///
    /// The first `Err` to be received ends the stream; the terminal operator reports it
    /// as [`StreamError::UnitFailed`](crate::StreamError::UnitFailed).
    pub fn try_map_concurrent<Y, F>(self, f: F, opts: DispatchOptions) -> Result<ParallelStream<'a, Y>>
    where
        X: Send + 'static,
        Y: Send + 'static,
        F: Fn(X) -> anyhow::Result<Y> + Send + Sync + 'static,
    {
        self.dispatch("try_map_concurrent", f, opts)
    }

    /// Evaluate `pred` on the pool and keep the accepted elements.
    pub fn filter_concurrent<P>(self, pred: P, opts: DispatchOptions) -> Result<Self>
    where
        X: Send + 'static,
        P: Fn(&X) -> bool + Send + Sync + 'static,
    {
        let tagged = self.dispatch("filter_concurrent", move |x| Ok((pred(&x), x)), opts)?;
        Ok(tagged.rewrap("filter_concurrent", |c| c.filter_map(|(keep, x)| keep.then_some(x))))
    }

    /// Send elements to workers `dispatch_size` at a time and apply `f` to each batch
    /// there. Order is kept within a batch but not across batches.
    pub fn batch_processor<Y, F>(
        self,
        f: F,
        dispatch_size: usize,
        timeout: Option<Duration>,
    ) -> Result<ParallelStream<'a, Y>>
    where
        X: Send + 'static,
        Y: Send + 'static,
        F: Fn(X) -> Y + Send + Sync + 'static,
    {
        let opts = DispatchOptions { batch_size: None, timeout };
        let batches = self
            .batch(dispatch_size)?
            .map_concurrent(move |batch: Vec<X>| batch.into_iter().map(&f).collect::<Vec<Y>>(), opts)?;
        Ok(batches.flatten())
    }

    /// Terminal: run `consumer` on every element on the pool.
    pub fn for_each_concurrent<C>(&mut self, consumer: C, opts: DispatchOptions) -> Result<()>
    where
        X: Send + 'static,
        C: Fn(X) + Send + Sync + 'static,
    {
        let executor = Arc::clone(self.executor());
        let fault = self.fault().clone();
        self.terminal("for_each_concurrent", move |c| {
            let (wave, timeout) = opts.resolve(executor.config())?;
            let work = Arc::new(move |x: X| -> anyhow::Result<()> {
                consumer(x);
                Ok(())
            });
            Dispatch::new(c, executor, work, wave, timeout, fault).for_each(drop);
            Ok(())
        })
    }
}
