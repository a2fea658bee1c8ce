//! Resolves handles into an ordered result set.
//!
//! Handles are awaited strictly in issue order, never completion order.
//! Worker scheduling decides which iteration finishes first; the emitted
//! [`ResultSet`] ordering is always submission order, so reports are
//! reproducible for any worker count.

use crate::error::{ExecutionError, ProbeError};
use crate::pool::Handle;
use crate::row::ResultSet;

/// Reaction to a failing iteration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FailurePolicy {
    /// Abort on the first failure, discarding unresolved handles.
    #[default]
    FailFast,
    /// Keep collecting; record each failure alongside its iteration index.
    Continue,
}

/// A failure recorded under [`FailurePolicy::Continue`].
#[derive(Debug)]
pub struct IterationFailure {
    /// Zero-based iteration index, in submission order.
    pub iteration: usize,
    /// The underlying probe failure.
    pub error: ProbeError,
}

/// Everything a run produced: rows in submission order plus any per-iteration
/// failures. Under fail-fast the failure list is always empty, since the
/// first failure aborts collection instead.
#[derive(Debug, Default)]
pub struct Collection {
    /// Rows of successful iterations, in submission order.
    pub rows: ResultSet,
    /// Failures of unsuccessful iterations, in submission order.
    pub failures: Vec<IterationFailure>,
}

/// Collects with the default fail-fast policy.
///
/// Blocking on handle `i` does not require handle `i + 1` to have completed;
/// total collection time is bounded by pool throughput. On the first failing
/// handle the error propagates immediately with that iteration's index, and
/// the remaining handles are dropped — their work still runs to completion
/// during pool shutdown.
pub fn collect(handles: Vec<Handle>) -> Result<ResultSet, ExecutionError> {
    let mut rows = ResultSet::with_capacity(handles.len());
    for (iteration, handle) in handles.into_iter().enumerate() {
        match handle.wait() {
            Ok(row) => rows.push(row),
            Err(source) => {
                tracing::debug!(iteration, error = %source, "aborting collection");
                return Err(ExecutionError { iteration, source });
            }
        }
    }
    Ok(rows)
}

/// Collects under an explicit failure policy.
///
/// With [`FailurePolicy::Continue`] every handle is resolved and the call
/// always succeeds; failed iterations contribute a recorded
/// [`IterationFailure`] instead of a row.
pub fn collect_with_policy(
    handles: Vec<Handle>,
    policy: FailurePolicy,
) -> Result<Collection, ExecutionError> {
    match policy {
        FailurePolicy::FailFast => collect(handles).map(|rows| Collection {
            rows,
            failures: Vec::new(),
        }),
        FailurePolicy::Continue => {
            let mut collection = Collection::default();
            for (iteration, handle) in handles.into_iter().enumerate() {
                match handle.wait() {
                    Ok(row) => collection.rows.push(row),
                    Err(error) => {
                        tracing::debug!(iteration, %error, "recording iteration failure");
                        collection.failures.push(IterationFailure { iteration, error });
                    }
                }
            }
            Ok(collection)
        }
    }
}
