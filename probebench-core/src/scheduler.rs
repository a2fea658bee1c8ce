//! Iteration scheduling: N submissions in, N ordered handles out.

use crate::collector::FailurePolicy;
use crate::error::ConfigError;
use crate::pool::{Handle, WorkerPool};
use crate::probe::Probe;
use std::sync::Arc;

/// One benchmark run's execution parameters.
///
/// Iterations and workers are independent: the worker count bounds
/// concurrency, never correctness — collected results are identical for any
/// worker count given the same probe behavior.
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Number of probe invocations to submit.
    pub iterations: usize,
    /// Worker thread count; must be at least 1.
    pub workers: usize,
    /// How the collector reacts to a failing iteration.
    pub failure_policy: FailurePolicy,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            iterations: 20,
            workers: 5,
            failure_policy: FailurePolicy::FailFast,
        }
    }
}

/// Submits a run's iterations to a worker pool, preserving the 1:1 order
/// correspondence between iteration index and returned handle.
pub struct Scheduler {
    pool: WorkerPool,
    iterations: usize,
}

impl Scheduler {
    /// Validates the configuration and builds the pool. A zero worker count
    /// fails here, before any submission.
    pub fn new(config: &RunConfig) -> Result<Self, ConfigError> {
        let pool = WorkerPool::new(config.workers)?;
        Ok(Self {
            pool,
            iterations: config.iterations,
        })
    }

    /// Submits every iteration in one non-blocking loop.
    ///
    /// The returned handles are ordered by submission; completion order
    /// across workers is unspecified and irrelevant to callers, which is why
    /// the collector indexes into this sequence rather than draining a
    /// completion queue. Zero iterations yields an empty vector.
    pub fn submit_all(&self, probe: Arc<dyn Probe>) -> Vec<Handle> {
        tracing::debug!(
            iterations = self.iterations,
            workers = self.pool.workers(),
            "submitting iterations"
        );
        (0..self.iterations)
            .map(|_| self.pool.submit(Arc::clone(&probe)))
            .collect()
    }

    /// Drains the pool gracefully; in-flight iterations run to completion.
    pub fn shutdown(self) {
        self.pool.shutdown();
    }
}
