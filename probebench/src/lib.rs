#![warn(missing_docs)]
//! # probebench
//!
//! Concurrent micro-benchmark harness for pluggable HTTP probes.
//!
//! probebench fans N iterations of a probe across a bounded pool of W
//! worker threads, gathers one ordered metric row per iteration, and renders
//! the result set as CSV or JSON:
//! - **Deterministic ordering**: rows are collected in submission order, not
//!   completion order, so reports are reproducible for any worker count
//! - **Pluggable probes**: anything implementing [`Probe`] can be measured;
//!   account-lifecycle and OAuth2-token probes ship in
//!   [`probebench_probes`]
//! - **Fail-fast by default**: the first failing iteration aborts the run
//!   with its index; continue-on-error collection is available as a policy
//! - **Schema-checked CSV**: value order always derives from the header, and
//!   rows with divergent keys fail rendering instead of misaligning columns
//!
//! ## Quick Start
//!
//! ```
//! use probebench::{collect, probe, RunConfig, Scheduler};
//!
//! let config = RunConfig { iterations: 4, workers: 2, ..RunConfig::default() };
//! let scheduler = Scheduler::new(&config).unwrap();
//! let handles = scheduler.submit_all(probe::from_fn(|| {
//!     let mut row = probebench::MetricRow::new();
//!     row.insert("noop", 0);
//!     Ok(row)
//! }));
//! let rows = collect(handles).unwrap();
//! scheduler.shutdown();
//! assert_eq!(rows.len(), 4);
//! ```

// Re-export core types
pub use probebench_core::{
    collect, collect_with_policy, probe, Collection, ConfigError, ExecutionError, FailurePolicy,
    Handle, IterationFailure, MetricRow, Probe, ProbeError, ResultSet, RunConfig, Scheduler,
    WorkerPool,
};

// Re-export the built-in probes
pub use probebench_probes::{
    EntityCreationConfig, EntityCreationProbe, TokenAcquisitionConfig, TokenAcquisitionProbe,
};

// Re-export reporting
pub use probebench_report::{render, write_report, OutputFormat, ReportError};

/// Run the probebench CLI harness.
///
/// Call this from a binary's `main()`:
/// ```ignore
/// fn main() {
///     if let Err(error) = probebench::run() {
///         eprintln!("probebench: {error:#}");
///         std::process::exit(1);
///     }
/// }
/// ```
pub use probebench_cli::run;
