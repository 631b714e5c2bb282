//! Execution modes and worker-pool configuration.
//!
//! A [`Stream`](crate::Stream) carries its execution mode as a type parameter. The mode
//! decides what happens when the stream's single consumption ends: [`Sequential`] does
//! nothing, while the concurrent mode cancels outstanding units and tears its pool down.
//!
//! [`ExecConfig`] describes the pool a concurrent stream builds. It can be assembled with
//! builder methods or loaded from JSON:
//!
//! ```
//! use streamline::{ExecConfig, PoolKind};
//! use std::time::Duration;
//!
//! let cfg = ExecConfig::from_json(r#"{ "kind": "thread", "workers": 8, "timeout_ms": 250 }"#)?;
//! assert_eq!(cfg.kind, PoolKind::Io);
//! assert_eq!(cfg.resolved_workers()?, 8);
//! assert_eq!(cfg.timeout, Some(Duration::from_millis(250)));
//! assert!(cfg.await_termination);
//! # Ok::<(), streamline::StreamError>(())
//! ```

use crate::error::{Result, ensure_positive};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Hook run exactly once when a stream's consumption ends, even on panic.
pub trait ExecutionMode {
    fn on_close(&self);
}

/// Plain single-threaded pull iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Sequential;

impl ExecutionMode for Sequential {
    fn on_close(&self) {}
}

/// Flavor of worker pool.
///
/// Both are thread pools; they differ in default size. `Compute` suits CPU-bound work,
/// `Io` oversubscribes the cores for work that mostly waits.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PoolKind {
    #[default]
    #[serde(alias = "process")]
    Compute,
    #[serde(alias = "thread")]
    Io,
}

impl PoolKind {
    /// Workers used when [`ExecConfig::workers`] is unset.
    pub fn default_workers(self) -> usize {
        let cores = num_cpus::get().max(1);
        match self {
            PoolKind::Compute => cores,
            PoolKind::Io => cores * 5,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExecConfig {
    /// Pool size; `None` picks [`PoolKind::default_workers`].
    pub workers: Option<usize>,
    pub kind: PoolKind,
    /// Dispatch wave size; `None` uses the worker count.
    pub batch_size: Option<usize>,
    /// Bound on waiting for a single unit's result.
    #[serde(rename = "timeout_ms", with = "millis")]
    pub timeout: Option<Duration>,
    /// Block on shutdown until running units finish.
    pub await_termination: bool,
    pub thread_name_prefix: String,
}

impl Default for ExecConfig {
    fn default() -> Self {
        Self {
            workers: None,
            kind: PoolKind::Compute,
            batch_size: None,
            timeout: None,
            await_termination: true,
            thread_name_prefix: "streamline-worker".to_string(),
        }
    }
}

impl ExecConfig {
    pub fn new(kind: PoolKind) -> Self {
        Self { kind, ..Self::default() }
    }

    /// Parse a JSON document; absent fields take their defaults.
    pub fn from_json(s: &str) -> Result<Self> {
        let cfg: ExecConfig = serde_json::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_workers(mut self, workers: usize) -> Self {
        self.workers = Some(workers);
        self
    }

    pub fn with_kind(mut self, kind: PoolKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = Some(batch_size);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn with_await_termination(mut self, await_termination: bool) -> Self {
        self.await_termination = await_termination;
        self
    }

    pub fn with_thread_name_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.thread_name_prefix = prefix.into();
        self
    }

    /// Reject zero sizes.
    pub fn validate(&self) -> Result<()> {
        self.resolved_workers()?;
        self.resolved_batch_size()?;
        Ok(())
    }

    pub fn resolved_workers(&self) -> Result<usize> {
        match self.workers {
            Some(n) => ensure_positive("workers", n),
            None => Ok(self.kind.default_workers()),
        }
    }

    pub fn resolved_batch_size(&self) -> Result<usize> {
        match self.batch_size {
            Some(n) => ensure_positive("batch size", n),
            None => self.resolved_workers(),
        }
    }
}

/// Per-operator overrides of the pool's dispatch settings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOptions {
    pub batch_size: Option<usize>,
    pub timeout: Option<Duration>,
}

impl DispatchOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn batch_size(mut self, n: usize) -> Self {
        self.batch_size = Some(n);
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Effective wave size and timeout, falling back to `cfg`.
    pub(crate) fn resolve(&self, cfg: &ExecConfig) -> Result<(usize, Option<Duration>)> {
        let size = match self.batch_size {
            Some(n) => ensure_positive("batch size", n)?,
            None => cfg.resolved_batch_size()?,
        };
        Ok((size, self.timeout.or(cfg.timeout)))
    }
}

mod millis {
    use serde::{Deserialize, Deserializer, Serialize, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, s: S) -> Result<S::Ok, S::Error> {
        value
            .map(|d| u64::try_from(d.as_millis()).unwrap_or(u64::MAX))
            .serialize(s)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Option<Duration>, D::Error> {
        Ok(Option::<u64>::deserialize(d)?.map(Duration::from_millis))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn defaults_follow_pool_kind() {
        let cores = num_cpus::get().max(1);
        assert_eq!(ExecConfig::default().resolved_workers().unwrap(), cores);
        assert_eq!(ExecConfig::new(PoolKind::Io).resolved_workers().unwrap(), cores * 5);
        assert_eq!(
            ExecConfig::default().with_workers(3).resolved_batch_size().unwrap(),
            3
        );
    }

    #[test]
    fn zero_sizes_are_rejected() {
        let err = ExecConfig::from_json(r#"{ "batch_size": 0 }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
        let err = DispatchOptions::new().batch_size(0).resolve(&ExecConfig::default()).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn malformed_json_is_a_config_error() {
        let err = ExecConfig::from_json(r#"{ "kind": "fiber" }"#).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::Config);
    }

    #[test]
    fn dispatch_options_override_config() {
        let cfg = ExecConfig::default().with_batch_size(4).with_timeout(Duration::from_secs(1));
        let (size, timeout) = DispatchOptions::new()
            .timeout(Duration::from_millis(10))
            .resolve(&cfg)
            .unwrap();
        assert_eq!(size, 4);
        assert_eq!(timeout, Some(Duration::from_millis(10)));
    }
}
