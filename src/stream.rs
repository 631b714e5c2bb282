//! The single-pass pipeline.
//!
//! A [`Stream`] wraps a pull cursor. Intermediate operators (see the `helpers` modules)
//! consume the stream and hand back a new one whose cursor wraps the old; nothing runs
//! until a terminal operator drives the cursor. Terminal operators take `&mut self`,
//! close the stream *before* pulling the first element, and run the execution mode's
//! close hook once they are done, even when a user closure panics.
//!
//! ```
//! use streamline::Stream;
//!
//! let mut s = Stream::new(0..10).filter(|x| x % 2 == 0).map(|x| x * x);
//! assert_eq!(s.to_vec()?, vec![0, 4, 16, 36, 64]);
//!
//! // A stream is consumed exactly once.
//! assert!(s.count().unwrap_err().is_lifecycle_violation());
//! # Ok::<(), streamline::StreamError>(())
//! ```

use crate::error::{Result, StreamError};
use crate::lifecycle::{Fault, Lifecycle};
use crate::runner::{ExecutionMode, Sequential};
use std::fmt;

pub(crate) type Cursor<'a, X> = Box<dyn Iterator<Item = X> + 'a>;

pub struct Stream<'a, X, M: ExecutionMode = Sequential> {
    cursor: Cursor<'a, X>,
    lifecycle: Lifecycle,
    fault: Fault,
    mode: M,
}

/* ===================== Construction ===================== */

impl<'a, X: 'a> Stream<'a, X, Sequential> {
    /// Stream over a finite (or at least externally bounded) source.
    pub fn new<I>(source: I) -> Self
    where
        I: IntoIterator<Item = X>,
        I::IntoIter: 'a,
    {
        Self::with_mode(Box::new(source.into_iter()), Sequential)
    }

    /// Unbounded stream of values produced by repeatedly calling `supplier`.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let mut n = 0;
    /// let evens = Stream::from_supplier(move || { n += 2; n }).limit(3).to_vec().unwrap();
    /// assert_eq!(evens, vec![2, 4, 6]);
    /// ```
    pub fn from_supplier(supplier: impl FnMut() -> X + 'a) -> Self {
        Self::with_mode(Box::new(std::iter::repeat_with(supplier)), Sequential)
    }

    pub fn empty() -> Self {
        Self::with_mode(Box::new(std::iter::empty()), Sequential)
    }
}

impl<'a, X: 'a, M: ExecutionMode> Stream<'a, X, M> {
    pub(crate) fn with_mode(cursor: Cursor<'a, X>, mode: M) -> Self {
        Self { cursor, lifecycle: Lifecycle::new(), fault: Fault::default(), mode }
    }

    pub fn is_closed(&self) -> bool {
        self.lifecycle.is_closed()
    }

    pub(crate) fn mode(&self) -> &M {
        &self.mode
    }

    pub(crate) fn fault(&self) -> &Fault {
        &self.fault
    }

    /// Fail fast for operators that report misuse at the call.
    pub(crate) fn ensure_open(&self) -> Result<()> {
        self.lifecycle.ensure_open(|| StreamError::PipelineClosed)
    }

    /// Replace the cursor with `wrap(cursor)`, keeping lifecycle, fault slot and mode.
    ///
    /// # Panics
    ///
    /// If the stream is already closed: an infallible intermediate has no way to report
    /// [`StreamError::PipelineClosed`] other than at the call.
    pub(crate) fn rewrap<Y, I, F>(self, op: &'static str, wrap: F) -> Stream<'a, Y, M>
    where
        Y: 'a,
        I: Iterator<Item = Y> + 'a,
        F: FnOnce(Cursor<'a, X>) -> I,
    {
        if self.lifecycle.is_closed() {
            panic!("`{op}` called on a closed stream: {}", StreamError::PipelineClosed);
        }
        let Stream { cursor, lifecycle, fault, mode } = self;
        let cursor: Cursor<'a, Y> = Box::new(wrap(cursor));
        Stream { cursor, lifecycle, fault, mode }
    }

    /// Like [`rewrap`](Self::rewrap) for operators that validate their arguments or
    /// refuse a closed stream at the call.
    pub(crate) fn try_rewrap<Y, I, F>(self, op: &'static str, wrap: F) -> Result<Stream<'a, Y, M>>
    where
        Y: 'a,
        I: Iterator<Item = Y> + 'a,
        F: FnOnce(Cursor<'a, X>) -> Result<I>,
    {
        if let Err(err) = self.ensure_open() {
            log::warn!("`{op}` called on a closed stream");
            return Err(err);
        }
        let Stream { cursor, lifecycle, fault, mode } = self;
        let cursor: Cursor<'a, Y> = Box::new(wrap(cursor)?);
        Ok(Stream { cursor, lifecycle, fault, mode })
    }

    /// Move the stream into another execution mode; used when going concurrent.
    #[cfg(feature = "concurrent")]
    pub(crate) fn into_mode<N: ExecutionMode>(self, mode: N) -> Stream<'a, X, N> {
        let Stream { cursor, lifecycle, fault, .. } = self;
        Stream { cursor, lifecycle, fault, mode }
    }

    /// Drive the cursor with `drive` as a terminal operation.
    ///
    /// The stream is closed first. The mode's close hook runs when `drive` returns or
    /// unwinds. A fault recorded by a lazy operator takes precedence over `drive`'s result.
    pub(crate) fn terminal<R>(
        &mut self,
        op: &'static str,
        drive: impl FnOnce(Cursor<'a, X>) -> Result<R>,
    ) -> Result<R> {
        self.lifecycle.close(|| StreamError::PipelineClosed)?;
        log::trace!("terminal `{op}` started");
        let cursor = std::mem::replace(&mut self.cursor, Box::new(std::iter::empty()));
        let outcome = {
            let _guard = CloseGuard(&self.mode);
            drive(cursor)
        };
        match self.fault.take() {
            Some(err) => Err(err),
            None => outcome,
        }
    }
}

impl<'a, X: 'a, M: ExecutionMode + Clone> Stream<'a, X, M> {
    /// Hand the remaining elements out one at a time.
    ///
    /// This is a terminal operation: the stream is closed when `iter` is called, and the
    /// close hook runs when the returned [`Drain`] is dropped. Each item is `Ok(x)`;
    /// an error recorded by a lazy operator is yielded once, as the last item.
    ///
    /// ```
    /// use streamline::Stream;
    ///
    /// let mut s = Stream::new(vec![3, 1, 2]).sort(false);
    /// let mut seen = Vec::new();
    /// for x in s.iter()? {
    ///     seen.push(x?);
    /// }
    /// assert_eq!(seen, vec![1, 2, 3]);
    /// assert!(s.iter().is_err());
    /// # Ok::<(), streamline::StreamError>(())
    /// ```
    pub fn iter(&mut self) -> Result<Drain<'a, X, M>> {
        self.lifecycle.close(|| StreamError::PipelineClosed)?;
        let cursor = std::mem::replace(&mut self.cursor, Box::new(std::iter::empty()));
        Ok(Drain { cursor: Some(cursor), fault: self.fault.clone(), mode: self.mode.clone() })
    }
}

impl<X, M: ExecutionMode> fmt::Debug for Stream<'_, X, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Stream")
            .field("closed", &self.lifecycle.is_closed())
            .field("faulted", &self.fault.is_raised())
            .field("mode", &std::any::type_name::<M>())
            .finish()
    }
}

struct CloseGuard<'m, M: ExecutionMode>(&'m M);

impl<M: ExecutionMode> Drop for CloseGuard<'_, M> {
    fn drop(&mut self) {
        self.0.on_close();
    }
}

/// Draining iterator returned by [`Stream::iter`].
pub struct Drain<'a, X, M: ExecutionMode> {
    cursor: Option<Cursor<'a, X>>,
    fault: Fault,
    mode: M,
}

impl<X, M: ExecutionMode> Iterator for Drain<'_, X, M> {
    type Item = Result<X>;

    fn next(&mut self) -> Option<Self::Item> {
        let cursor = self.cursor.as_mut()?;
        match cursor.next() {
            Some(x) => Some(Ok(x)),
            None => {
                self.cursor = None;
                self.fault.take().map(Err)
            }
        }
    }
}

impl<X, M: ExecutionMode> Drop for Drain<'_, X, M> {
    fn drop(&mut self) {
        self.cursor = None;
        self.mode.on_close();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;
    use std::rc::Rc;

    #[derive(Clone, Default)]
    struct Counted(Rc<Cell<usize>>);

    impl ExecutionMode for Counted {
        fn on_close(&self) {
            self.0.set(self.0.get() + 1);
        }
    }

    fn counted<'a>(data: Vec<i32>) -> (Stream<'a, i32, Counted>, Rc<Cell<usize>>) {
        let mode = Counted::default();
        let hits = Rc::clone(&mode.0);
        (Stream::with_mode(Box::new(data.into_iter()), mode), hits)
    }

    #[test]
    fn close_hook_runs_once_per_terminal() {
        let (mut s, hits) = counted(vec![1, 2, 3]);
        assert_eq!(s.terminal("count", |c| Ok(c.count())).unwrap(), 3);
        assert_eq!(hits.get(), 1);
        assert!(s.terminal("count", |c| Ok(c.count())).is_err());
        assert_eq!(hits.get(), 1);
    }

    #[test]
    fn close_hook_runs_on_panic() {
        let (mut s, hits) = counted(vec![1]);
        let r = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _ = s.terminal("for_each", |c| -> Result<()> {
                c.for_each(|_| panic!("consumer failed"));
                Ok(())
            });
        }));
        assert!(r.is_err());
        assert_eq!(hits.get(), 1);
        assert!(s.is_closed());
    }

    #[test]
    fn drain_closes_on_drop() {
        let (mut s, hits) = counted(vec![1, 2, 3]);
        {
            let mut it = s.iter().unwrap();
            assert_eq!(it.next().unwrap().unwrap(), 1);
        }
        assert_eq!(hits.get(), 1);
        assert!(matches!(s.iter(), Err(StreamError::PipelineClosed)));
    }

    #[test]
    #[should_panic(expected = "`map` called on a closed stream: pipeline is already closed")]
    fn rewrap_refuses_a_closed_stream() {
        let (mut s, _) = counted(vec![1, 2]);
        let _ = s.terminal("count", |c| Ok(c.count()));
        let _ = s.rewrap("map", |c| c.map(|x| x + 1));
    }

    #[test]
    fn fault_wins_over_result() {
        let (mut s, _) = counted(vec![1, 2]);
        let fault = s.fault().clone();
        let r = s.terminal("count", move |c| {
            fault.raise(StreamError::AbsentValue);
            Ok(c.count())
        });
        assert!(matches!(r, Err(StreamError::AbsentValue)));
    }
}
