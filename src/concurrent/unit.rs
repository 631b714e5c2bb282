//! Handles for dispatched units of work.

use std::sync::atomic::{AtomicU8, Ordering};

/// Lifecycle of a unit: `Pending -> Running -> {Completed, Failed}`, or
/// `Pending -> Cancelled` when cancelled before a worker picked it up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum UnitStatus {
    Pending = 0,
    Running = 1,
    Completed = 2,
    Cancelled = 3,
    Failed = 4,
}

impl UnitStatus {
    fn from_u8(raw: u8) -> Self {
        match raw {
            0 => UnitStatus::Pending,
            1 => UnitStatus::Running,
            2 => UnitStatus::Completed,
            3 => UnitStatus::Cancelled,
            _ => UnitStatus::Failed,
        }
    }

    pub fn is_finished(self) -> bool {
        !matches!(self, UnitStatus::Pending | UnitStatus::Running)
    }
}

#[derive(Debug)]
pub struct Unit {
    id: usize,
    status: AtomicU8,
}

impl Unit {
    pub(crate) fn new(id: usize) -> Self {
        Self { id, status: AtomicU8::new(UnitStatus::Pending as u8) }
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn status(&self) -> UnitStatus {
        UnitStatus::from_u8(self.status.load(Ordering::Acquire))
    }

    /// Claim the unit for execution. Fails if it was cancelled first.
    pub(crate) fn start(&self) -> bool {
        self.transition(UnitStatus::Pending, UnitStatus::Running)
    }

    /// Cancel the unit if no worker has claimed it yet.
    pub(crate) fn cancel(&self) -> bool {
        self.transition(UnitStatus::Pending, UnitStatus::Cancelled)
    }

    pub(crate) fn finish(&self, succeeded: bool) {
        let to = if succeeded { UnitStatus::Completed } else { UnitStatus::Failed };
        self.transition(UnitStatus::Running, to);
    }

    fn transition(&self, from: UnitStatus, to: UnitStatus) -> bool {
        self.status
            .compare_exchange(from as u8, to as u8, Ordering::AcqRel, Ordering::Acquire)
            .is_ok()
    }
}

/// Snapshot of unit counts by status.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UnitStats {
    pub submitted: usize,
    pub pending: usize,
    pub running: usize,
    pub completed: usize,
    pub cancelled: usize,
    pub failed: usize,
}

impl UnitStats {
    pub(crate) fn record(&mut self, status: UnitStatus) {
        self.submitted += 1;
        match status {
            UnitStatus::Pending => self.pending += 1,
            UnitStatus::Running => self.running += 1,
            UnitStatus::Completed => self.completed += 1,
            UnitStatus::Cancelled => self.cancelled += 1,
            UnitStatus::Failed => self.failed += 1,
        }
    }
}
