//! Error taxonomy for pipelines, collectors, conditions and the worker pool.
//!
//! Every fallible operation in the crate reports a [`StreamError`]. Errors are grouped
//! into broad categories via [`StreamError::kind`] so callers can branch on the
//! category without matching every variant.

use std::error::Error as StdError;
use std::time::Duration;
use thiserror::Error;

/// Crate-wide result alias.
pub type Result<T, E = StreamError> = std::result::Result<T, E>;

/// Broad category of a [`StreamError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Operating on a closed pipeline, or misusing a conditional chain.
    Lifecycle,
    /// A size or count argument that can never be valid.
    InvalidArgument,
    /// Two elements mapped to the same key and no resolver was supplied.
    Conflict,
    /// A fixed-size window could not be filled.
    InsufficientData,
    /// `get` on an absent [`Optional`](crate::Optional).
    Absent,
    /// A dispatched unit of work panicked or returned an error.
    UnitFailure,
    /// A unit's result was not available before the deadline.
    Timeout,
    /// The worker pool could not be built or was already shut down.
    Pool,
    /// A configuration document could not be parsed.
    Config,
}

#[derive(Debug, Error)]
pub enum StreamError {
    #[error("pipeline is already closed")]
    PipelineClosed,

    #[error("chained condition is not closed; call `otherwise` or `done` before applying it")]
    ConditionNotClosed,

    #[error("chained condition is already closed")]
    ConditionClosed,

    #[error("no `if` clause was added before `otherwise`")]
    MissingIfClause,

    #[error("invalid argument `{name}`: {reason}")]
    InvalidArgument { name: &'static str, reason: String },

    #[error("key {key} is already present")]
    DuplicateKey { key: String },

    #[error("stream has fewer than {expected} elements (found {found})")]
    InsufficientData { expected: usize, found: usize },

    #[error("value is not present")]
    AbsentValue,

    #[error("unit {unit} failed: {source}")]
    UnitFailed {
        unit: usize,
        #[source]
        source: Box<dyn StdError + Send + Sync + 'static>,
    },

    #[error("unit result not available within {0:?}")]
    Timeout(Duration),

    #[cfg(feature = "concurrent")]
    #[error("failed to build worker pool: {0}")]
    PoolBuild(#[from] rayon::ThreadPoolBuildError),

    #[error("worker pool has been shut down")]
    PoolShutdown,

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),
}

impl StreamError {
    /// Shorthand for [`StreamError::InvalidArgument`].
    pub fn invalid_argument(name: &'static str, reason: impl Into<String>) -> Self {
        StreamError::InvalidArgument { name, reason: reason.into() }
    }

    pub(crate) fn unit_failed(unit: usize, source: anyhow::Error) -> Self {
        StreamError::UnitFailed { unit, source: source.into() }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            StreamError::PipelineClosed
            | StreamError::ConditionNotClosed
            | StreamError::ConditionClosed
            | StreamError::MissingIfClause => ErrorKind::Lifecycle,
            StreamError::InvalidArgument { .. } => ErrorKind::InvalidArgument,
            StreamError::DuplicateKey { .. } => ErrorKind::Conflict,
            StreamError::InsufficientData { .. } => ErrorKind::InsufficientData,
            StreamError::AbsentValue => ErrorKind::Absent,
            StreamError::UnitFailed { .. } => ErrorKind::UnitFailure,
            StreamError::Timeout(_) => ErrorKind::Timeout,
            #[cfg(feature = "concurrent")]
            StreamError::PoolBuild(_) => ErrorKind::Pool,
            StreamError::PoolShutdown => ErrorKind::Pool,
            StreamError::Config(_) => ErrorKind::Config,
        }
    }

    pub fn is_lifecycle_violation(&self) -> bool {
        self.kind() == ErrorKind::Lifecycle
    }
}

/// Reject a zero size argument.
pub(crate) fn ensure_positive(name: &'static str, n: usize) -> Result<usize> {
    if n == 0 {
        return Err(StreamError::invalid_argument(name, "must be a positive integer"));
    }
    Ok(n)
}
