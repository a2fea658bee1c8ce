//! Shared HTTP plumbing for the built-in probes.

use probebench_core::ProbeError;
use reqwest::blocking::{Client, Response};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Builds the shared blocking client. One client per probe, reused across
/// iterations; connection pooling lives in the client, not the harness.
pub(crate) fn build_client(timeout: Duration) -> Result<Client, ProbeError> {
    Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| ProbeError::operation(format!("failed to build HTTP client: {e}")))
}

/// Maps a non-2xx status to an operation error naming the failing phase.
pub(crate) fn ensure_success(phase: &str, response: Response) -> Result<Response, ProbeError> {
    let status = response.status();
    if status.is_success() {
        Ok(response)
    } else {
        Err(ProbeError::operation(format!(
            "{phase}: server returned {status}"
        )))
    }
}

/// Maps a transport-level failure to an operation error naming the phase.
pub(crate) fn transport_error(phase: &str, error: reqwest::Error) -> ProbeError {
    ProbeError::operation(format!("{phase}: {error}"))
}

/// Process-unique marker for generated resource names. Process id plus an
/// atomic sequence keeps concurrent iterations from colliding without
/// reaching for an RNG.
pub(crate) fn unique_marker() -> String {
    static SEQUENCE: AtomicU64 = AtomicU64::new(0);
    let seq = SEQUENCE.fetch_add(1, Ordering::Relaxed);
    format!("{}-{}", std::process::id(), seq)
}

/// Joins a base URL and a path without doubling the separator.
pub(crate) fn join_url(base: &str, path: &str) -> String {
    format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
}
