//! Open/closed bookkeeping shared by pipelines and conditional chains, plus the
//! deferred-fault slot lazy operators use to report errors discovered mid-iteration.

use crate::error::{Result, StreamError};
use std::cell::RefCell;
use std::rc::Rc;

/// Guard consulted at the top of every operator.
///
/// A `Lifecycle` starts open and can be closed exactly once. The error reported on
/// misuse is chosen by the owner (pipelines report [`StreamError::PipelineClosed`],
/// conditional chains report [`StreamError::ConditionClosed`]).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Lifecycle {
    closed: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_closed(&self) -> bool {
        self.closed
    }

    /// Fail with `err()` if already closed.
    pub fn ensure_open(&self, err: impl FnOnce() -> StreamError) -> Result<()> {
        if self.closed { Err(err()) } else { Ok(()) }
    }

    /// Check, then close. Fails with `err()` if the guard was already closed.
    pub fn close(&mut self, err: impl FnOnce() -> StreamError) -> Result<()> {
        self.ensure_open(err)?;
        self.closed = true;
        Ok(())
    }

    pub(crate) fn mark_closed(&mut self) {
        self.closed = true;
    }
}

/// Slot for the first error raised by a lazy operator.
///
/// Cursors cannot return errors through `Iterator::next`, so an operator that hits an
/// error records it here and ends its iteration. The terminal operator inspects the slot
/// after driving the cursor. Only the first error is kept.
#[derive(Debug, Clone, Default)]
pub(crate) struct Fault(Rc<RefCell<Option<StreamError>>>);

impl Fault {
    pub(crate) fn raise(&self, err: StreamError) {
        let mut slot = self.0.borrow_mut();
        if slot.is_none() {
            log::debug!("pipeline fault recorded: {err}");
            *slot = Some(err);
        }
    }

    pub(crate) fn take(&self) -> Option<StreamError> {
        self.0.borrow_mut().take()
    }

    pub(crate) fn is_raised(&self) -> bool {
        self.0.borrow().is_some()
    }
}
