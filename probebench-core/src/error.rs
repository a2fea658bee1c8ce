//! Error taxonomy for the execution pipeline.
//!
//! Configuration problems are detected before any pool work starts and carry
//! zero side effects; execution problems are detected after work has
//! partially run.

use thiserror::Error;

/// Invalid run configuration, rejected before any submission.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A pool with zero workers can never make progress.
    #[error("worker count must be at least 1")]
    NoWorkers,

    /// The underlying thread pool could not be constructed.
    #[error("failed to build worker pool: {0}")]
    PoolBuild(String),
}

/// Failure of a single probe invocation.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The operation under measurement reported a failure.
    #[error("{0}")]
    Operation(String),

    /// The probe panicked on its worker thread. The pool and the other
    /// workers are unaffected; the panic message is carried here.
    #[error("probe panicked: {0}")]
    Panic(String),

    /// The worker dropped its result channel without delivering a result.
    #[error("probe result was lost before it could be collected")]
    Lost,
}

impl ProbeError {
    /// Convenience constructor for operation-level failures.
    pub fn operation(message: impl Into<String>) -> Self {
        Self::Operation(message.into())
    }
}

/// Fail-fast collection error: the first failing iteration aborts the run.
#[derive(Debug, Error)]
#[error("iteration {iteration} failed: {source}")]
pub struct ExecutionError {
    /// Zero-based index of the first failing iteration, in submission order.
    pub iteration: usize,
    /// The underlying probe failure.
    #[source]
    pub source: ProbeError,
}
