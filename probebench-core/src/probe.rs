//! The probe capability: one unit of work under measurement.

use crate::error::ProbeError;
use crate::row::MetricRow;

/// A probe executes one unit of work and returns its timing metrics.
///
/// Probes are opaque to the harness: the scheduler submits them, the pool
/// runs them, and the collector gathers whatever named metrics they produce.
/// A probe carries all of its own configuration; `execute` takes no
/// arguments and may be called from any worker thread, concurrently with
/// other invocations of the same probe.
pub trait Probe: Send + Sync {
    /// Runs one iteration, returning its metric row or a probe-specific
    /// error. The harness never retries a failed invocation.
    fn execute(&self) -> Result<MetricRow, ProbeError>;
}

/// Closures double as probes, which keeps test probes cheap to write.
impl<F> Probe for F
where
    F: Fn() -> Result<MetricRow, ProbeError> + Send + Sync,
{
    fn execute(&self) -> Result<MetricRow, ProbeError> {
        self()
    }
}

/// Wraps a closure as a shareable probe.
///
/// Pins the closure's signature so callers don't need a type annotation at
/// every use site.
pub fn from_fn<F>(f: F) -> std::sync::Arc<dyn Probe>
where
    F: Fn() -> Result<MetricRow, ProbeError> + Send + Sync + 'static,
{
    std::sync::Arc::new(f)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn closures_are_probes() {
        let probe = || {
            let mut row = MetricRow::new();
            row.insert("noop", 0);
            Ok(row)
        };
        let row = probe.execute().unwrap();
        assert_eq!(row.get("noop"), Some(0));
    }
}
