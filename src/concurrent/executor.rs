//! The worker pool behind a concurrent stream.
//!
//! An [`Executor`] owns one rayon pool for one consumption of one stream. Every unit of
//! work it runs gets a [`Unit`] handle that stays in the executor's registry until the
//! pool is shut down, so the terminal operator can cancel whatever is still queued.

use super::unit::{Unit, UnitStats};
use crate::error::{Result, StreamError};
use crate::runner::ExecConfig;
use crossbeam_channel::Sender;
use crossbeam_utils::sync::WaitGroup;
use rayon::{ThreadPool, ThreadPoolBuilder};
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

/// What a unit sends back: its id and the result of its work.
pub(crate) type Outcome<R> = (usize, anyhow::Result<R>);

fn lock<T>(m: &Mutex<T>) -> MutexGuard<'_, T> {
    m.lock().unwrap_or_else(PoisonError::into_inner)
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic payload".to_string()
    }
}

pub struct Executor {
    config: ExecConfig,
    workers: usize,
    pool: Mutex<Option<ThreadPool>>,
    units: Mutex<Vec<Arc<Unit>>>,
    in_flight: Mutex<Option<WaitGroup>>,
    abandoned: AtomicBool,
    next_id: AtomicUsize,
}

impl Executor {
    pub fn new(config: ExecConfig) -> Result<Self> {
        config.validate()?;
        let workers = config.resolved_workers()?;
        let prefix = config.thread_name_prefix.clone();
        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(move |i| format!("{prefix}-{i}"))
            .build()?;
        log::debug!("worker pool started: {workers} {:?} workers", config.kind);
        Ok(Self {
            config,
            workers,
            pool: Mutex::new(Some(pool)),
            units: Mutex::new(Vec::new()),
            in_flight: Mutex::new(Some(WaitGroup::new())),
            abandoned: AtomicBool::new(false),
            next_id: AtomicUsize::new(0),
        })
    }

    pub fn config(&self) -> &ExecConfig {
        &self.config
    }

    pub fn workers(&self) -> usize {
        self.workers
    }

    pub fn is_shut_down(&self) -> bool {
        lock(&self.pool).is_none()
    }

    /// Queue `work` on the pool; its outcome is sent on `done` once it ran.
    ///
    /// A panic inside `work` is caught and reported as a failed outcome. Work whose unit
    /// was cancelled before a worker claimed it never runs and sends nothing.
    pub(crate) fn submit<R, F>(&self, work: F, done: Sender<Outcome<R>>) -> Result<Arc<Unit>>
    where
        R: Send + 'static,
        F: FnOnce() -> anyhow::Result<R> + Send + 'static,
    {
        let pool = lock(&self.pool);
        let pool = pool.as_ref().ok_or(StreamError::PoolShutdown)?;
        let guard = lock(&self.in_flight).clone().ok_or(StreamError::PoolShutdown)?;

        let unit = Arc::new(Unit::new(self.next_id.fetch_add(1, Ordering::Relaxed)));
        lock(&self.units).push(Arc::clone(&unit));

        let handle = Arc::clone(&unit);
        pool.spawn(move || {
            let _guard = guard;
            if !handle.start() {
                return;
            }
            let outcome = match panic::catch_unwind(AssertUnwindSafe(work)) {
                Ok(result) => result,
                Err(payload) => Err(anyhow::anyhow!("unit panicked: {}", panic_message(payload.as_ref()))),
            };
            handle.finish(outcome.is_ok());
            // The receiver is gone when the terminal operator stopped early.
            let _ = done.send((handle.id(), outcome));
        });
        Ok(unit)
    }

    /// Cancel every unit no worker has claimed yet; returns how many were cancelled.
    pub(crate) fn cancel_pending(&self) -> usize {
        let cancelled = lock(&self.units).iter().filter(|u| u.cancel()).count();
        if cancelled > 0 {
            log::debug!("cancelled {cancelled} pending units");
        }
        cancelled
    }

    /// Stop waiting for units that are already running.
    ///
    /// Called when the consumption ended on a timeout or a failed unit: the caller gets
    /// the error right away and running units finish on their own.
    pub(crate) fn abandon_running(&self) {
        if !self.abandoned.swap(true, Ordering::AcqRel) {
            log::debug!("running units abandoned; shutdown will not wait for them");
        }
    }

    /// Cancel pending units and release the pool.
    ///
    /// With `await_termination` this blocks until units already running have finished,
    /// unless they were abandoned after a timeout or a failed unit. Calling it again is
    /// a no-op.
    pub fn shutdown(&self) {
        let Some(pool) = lock(&self.pool).take() else {
            return;
        };
        self.cancel_pending();
        drop(pool);
        let in_flight = lock(&self.in_flight).take();
        if let Some(wg) = in_flight {
            if self.config.await_termination && !self.abandoned.load(Ordering::Acquire) {
                wg.wait();
            }
        }
        log::debug!("worker pool shut down: {:?}", self.stats());
    }

    /// Snapshot of every unit submitted so far.
    pub fn units(&self) -> Vec<Arc<Unit>> {
        lock(&self.units).clone()
    }

    pub fn stats(&self) -> UnitStats {
        let mut stats = UnitStats::default();
        for unit in lock(&self.units).iter() {
            stats.record(unit.status());
        }
        stats
    }
}

impl Drop for Executor {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl std::fmt::Debug for Executor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Executor")
            .field("workers", &self.workers)
            .field("kind", &self.config.kind)
            .field("shut_down", &self.is_shut_down())
            .field("stats", &self.stats())
            .finish()
    }
}
