//! Fixed-size worker pool with per-submission handles.
//!
//! The pool bounds concurrency to its worker count while accepting any
//! number of queued submissions. Each submission resolves through a
//! [`Handle`] exactly once; a probe failure or panic travels through the
//! handle instead of tearing down the pool.

use crate::error::{ConfigError, ProbeError};
use crate::probe::Probe;
use crate::row::MetricRow;
use rayon::ThreadPoolBuilder;
use std::panic::{self, AssertUnwindSafe};
use std::sync::mpsc;
use std::sync::{Arc, Condvar, Mutex, PoisonError};

/// Resolves one submission to its result.
///
/// `wait` blocks the calling thread, never a worker. Dropping a handle
/// without waiting abandons the result but not the work: the submission
/// still runs to completion inside the pool.
pub struct Handle {
    rx: mpsc::Receiver<Result<MetricRow, ProbeError>>,
}

impl Handle {
    /// Blocks until the submission has executed and returns its outcome.
    pub fn wait(self) -> Result<MetricRow, ProbeError> {
        // A closed channel means the worker died without sending, which the
        // catch_unwind in the job body makes unreachable in practice.
        self.rx.recv().unwrap_or(Err(ProbeError::Lost))
    }
}

/// Tracks submissions that have not finished executing yet, so shutdown can
/// wait for a full drain.
#[derive(Default)]
struct DrainState {
    pending: Mutex<usize>,
    drained: Condvar,
}

impl DrainState {
    fn job_started(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending += 1;
    }

    fn job_finished(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        *pending -= 1;
        if *pending == 0 {
            self.drained.notify_all();
        }
    }

    fn wait_for_drain(&self) {
        let mut pending = self.pending.lock().unwrap_or_else(PoisonError::into_inner);
        while *pending > 0 {
            pending = self
                .drained
                .wait(pending)
                .unwrap_or_else(PoisonError::into_inner);
        }
    }
}

/// A fixed set of worker threads executing submitted probe invocations.
///
/// `submit` is non-blocking and safe for concurrent callers; submissions
/// beyond the worker count queue until a slot frees. The queue is unbounded,
/// which is acceptable because the iteration count is operator-specified and
/// finite.
pub struct WorkerPool {
    inner: rayon::ThreadPool,
    state: Arc<DrainState>,
    workers: usize,
}

impl WorkerPool {
    /// Builds a pool of exactly `workers` threads. Zero workers is invalid
    /// configuration and fails before any thread is spawned.
    pub fn new(workers: usize) -> Result<Self, ConfigError> {
        if workers == 0 {
            return Err(ConfigError::NoWorkers);
        }
        let inner = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|index| format!("probe-worker-{index}"))
            .build()
            .map_err(|e| ConfigError::PoolBuild(e.to_string()))?;
        tracing::debug!(workers, "worker pool ready");
        Ok(Self {
            inner,
            state: Arc::new(DrainState::default()),
            workers,
        })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Queues one probe invocation and returns its handle.
    ///
    /// The invocation executes exactly once, on a worker thread distinct
    /// from the submitter. Panics inside the probe are caught and delivered
    /// through the handle as [`ProbeError::Panic`].
    pub fn submit(&self, probe: Arc<dyn Probe>) -> Handle {
        let (tx, rx) = mpsc::channel();
        self.state.job_started();
        let state = Arc::clone(&self.state);
        self.inner.spawn(move || {
            let outcome = panic::catch_unwind(AssertUnwindSafe(|| probe.execute()));
            let result =
                outcome.unwrap_or_else(|payload| Err(ProbeError::Panic(panic_message(&payload))));
            // The receiver may already be gone after a fail-fast abort.
            let _ = tx.send(result);
            state.job_finished();
        });
        Handle { rx }
    }

    /// Stops accepting submissions and blocks until every queued and
    /// in-flight invocation has completed. In-flight work is never aborted.
    pub fn shutdown(self) {
        self.state.wait_for_drain();
        tracing::debug!("worker pool drained");
    }
}

/// Extracts a human-readable message from a panic payload.
fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
