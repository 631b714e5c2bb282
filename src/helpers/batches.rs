//! Batching and windowing operators for [`Stream`].
//!
//! - [`Stream::batch`] groups consecutive elements into fixed-size `Vec`s.
//! - [`Stream::window_function`] evaluates a function over a sliding window, or over
//!   the growing prefix of everything seen so far.

use crate::chunk::{divide_in_chunks, get_chunk};
use crate::error::{Result, StreamError, ensure_positive};
use crate::lifecycle::Fault;
use crate::runner::ExecutionMode;
use crate::stream::{Cursor, Stream};
use std::collections::VecDeque;

impl<'a, X: 'a, M: ExecutionMode> Stream<'a, X, M> {
    /// Group elements into batches of `n`.
    ///
    /// # Arguments
    /// - `n`: Batch size. Every batch holds exactly `n` elements except possibly the
    ///   last, which holds whatever remained.
    ///
    /// # Errors
    /// [`StreamError::InvalidArgument`] when `n == 0`, [`StreamError::PipelineClosed`]
    /// when the stream was already consumed.
    ///
    /// # Example
    /// ```
    /// use streamline::Stream;
    ///
    /// let batches = Stream::new(0..10).batch(3)?.to_vec()?;
    /// assert_eq!(batches, vec![vec![0, 1, 2], vec![3, 4, 5], vec![6, 7, 8], vec![9]]);
    /// # Ok::<(), streamline::StreamError>(())
    /// ```
    pub fn batch(self, n: usize) -> Result<Stream<'a, Vec<X>, M>> {
        self.try_rewrap("batch", move |c| divide_in_chunks(c, n))
    }

    /// Apply `f` to a window of elements, producing one output per position.
    ///
    /// With `Some(n)` the window is the last `n` elements, current one included; the
    /// first output appears once `n` elements have been seen. With `None` the window is
    /// every element seen so far, held in a single buffer that grows by one per call.
    ///
    /// # Errors
    /// [`StreamError::InvalidArgument`] at the call when `n == Some(0)`. A source with
    /// fewer than `n` elements makes the terminal operator fail with
    /// [`StreamError::InsufficientData`].
    ///
    /// # Example
    /// ```
    /// use streamline::Stream;
    ///
    /// let mean = |w: &[i32]| w.iter().sum::<i32>() as f64 / w.len() as f64;
    ///
    /// let moving = Stream::new(vec![1, 6, 2, 7, 3]).window_function(mean, Some(3))?.to_vec()?;
    /// assert_eq!(moving, vec![3.0, 5.0, 4.0]);
    ///
    /// let running = Stream::new(1..5).window_function(mean, None)?.to_vec()?;
    /// assert_eq!(running, vec![1.0, 1.5, 2.0, 2.5]);
    /// # Ok::<(), streamline::StreamError>(())
    /// ```
    pub fn window_function<Y: 'a>(
        self,
        mut f: impl FnMut(&[X]) -> Y + 'a,
        n: Option<usize>,
    ) -> Result<Stream<'a, Y, M>> {
        let fault = self.fault().clone();
        match n {
            Some(n) => self.try_rewrap("window_function", move |c| {
                let size = ensure_positive("window size", n)?;
                let mut sliding = Sliding {
                    inner: c,
                    window: VecDeque::with_capacity(size),
                    size,
                    primed: false,
                    fault,
                };
                Ok(std::iter::from_fn(move || {
                    sliding.advance()?;
                    Some(f(sliding.window.make_contiguous()))
                }))
            }),
            None => self.try_rewrap("window_function", move |c| {
                Ok(c.scan(Vec::new(), move |seen: &mut Vec<X>, x| {
                    seen.push(x);
                    Some(f(seen.as_slice()))
                }))
            }),
        }
    }
}

/// Sliding window over a cursor.
struct Sliding<'a, X> {
    inner: Cursor<'a, X>,
    window: VecDeque<X>,
    size: usize,
    primed: bool,
    fault: Fault,
}

impl<X> Sliding<'_, X> {
    /// Move the window one element forward; `None` once exhausted or short.
    fn advance(&mut self) -> Option<()> {
        if !self.primed {
            self.primed = true;
            match get_chunk(&mut self.inner, self.size) {
                Ok(first) => self.window.extend(first),
                Err(err) => {
                    self.fault.raise(err);
                    return None;
                }
            }
            if self.window.len() < self.size {
                self.fault.raise(StreamError::InsufficientData {
                    expected: self.size,
                    found: self.window.len(),
                });
                return None;
            }
            return Some(());
        }
        let next = self.inner.next()?;
        self.window.pop_front();
        self.window.push_back(next);
        Some(())
    }
}
