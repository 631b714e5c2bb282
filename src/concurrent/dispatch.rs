//! Wave-by-wave dispatch of stream elements to the pool.
//!
//! The cursor pulls up to `wave` elements from its source, submits one unit per element,
//! and hands results out in the order units complete. Only when every unit of a wave
//! has been collected does it pull and submit the next wave, so at most one wave is in
//! flight and an early terminal leaves at most a wave's worth of work to cancel.

use super::executor::{Executor, Outcome};
use crate::chunk::get_chunk;
use crate::error::StreamError;
use crate::lifecycle::Fault;
use crate::stream::Cursor;
use crossbeam_channel::{Receiver, RecvTimeoutError, unbounded};
use std::sync::Arc;
use std::time::Duration;

pub(crate) struct Dispatch<'a, X, R, F> {
    source: Cursor<'a, X>,
    executor: Arc<Executor>,
    work: Arc<F>,
    wave: usize,
    timeout: Option<Duration>,
    results: Option<Receiver<Outcome<R>>>,
    outstanding: usize,
    fault: Fault,
    stopped: bool,
}

impl<'a, X, R, F> Dispatch<'a, X, R, F>
where
    X: Send + 'static,
    R: Send + 'static,
    F: Fn(X) -> anyhow::Result<R> + Send + Sync + 'static,
{
    pub(crate) fn new(
        source: Cursor<'a, X>,
        executor: Arc<Executor>,
        work: Arc<F>,
        wave: usize,
        timeout: Option<Duration>,
        fault: Fault,
    ) -> Self {
        Self {
            source,
            executor,
            work,
            wave,
            timeout,
            results: None,
            outstanding: 0,
            fault,
            stopped: false,
        }
    }

    fn stop(&mut self, err: StreamError) -> Option<R> {
        if matches!(err, StreamError::Timeout(_) | StreamError::UnitFailed { .. }) {
            self.executor.abandon_running();
        }
        self.stopped = true;
        self.results = None;
        self.fault.raise(err);
        None
    }

    /// Submit the next wave; `false` when the source is exhausted.
    fn submit_wave(&mut self) -> Result<bool, StreamError> {
        let items = get_chunk(&mut self.source, self.wave)?;
        if items.is_empty() {
            return Ok(false);
        }
        let (tx, rx) = unbounded();
        for x in items {
            let work = Arc::clone(&self.work);
            self.executor.submit(move || work(x), tx.clone())?;
            self.outstanding += 1;
        }
        log::trace!("dispatched a wave of {} units", self.outstanding);
        self.results = Some(rx);
        Ok(true)
    }

    fn receive(&self, rx: &Receiver<Outcome<R>>) -> Result<Outcome<R>, StreamError> {
        match self.timeout {
            Some(limit) => rx.recv_timeout(limit).map_err(|e| match e {
                RecvTimeoutError::Timeout => StreamError::Timeout(limit),
                RecvTimeoutError::Disconnected => StreamError::PoolShutdown,
            }),
            None => rx.recv().map_err(|_| StreamError::PoolShutdown),
        }
    }
}

impl<X, R, F> Iterator for Dispatch<'_, X, R, F>
where
    X: Send + 'static,
    R: Send + 'static,
    F: Fn(X) -> anyhow::Result<R> + Send + Sync + 'static,
{
    type Item = R;

    fn next(&mut self) -> Option<R> {
        if self.stopped {
            return None;
        }
        if self.outstanding == 0 {
            match self.submit_wave() {
                Ok(true) => {}
                Ok(false) => {
                    self.stopped = true;
                    return None;
                }
                Err(err) => return self.stop(err),
            }
        }
        let received = match &self.results {
            Some(rx) => self.receive(rx),
            None => Err(StreamError::PoolShutdown),
        };
        self.outstanding = self.outstanding.saturating_sub(1);
        match received {
            Ok((_, Ok(r))) => Some(r),
            Ok((unit, Err(source))) => self.stop(StreamError::unit_failed(unit, source)),
            Err(err) => self.stop(err),
        }
    }
}
