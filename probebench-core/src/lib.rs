#![warn(missing_docs)]
//! probebench core - Execution Pipeline
//!
//! This crate provides the scheduling/execution/collection pipeline:
//! - [`Probe`] capability trait for pluggable units of work
//! - [`MetricRow`]/[`ResultSet`] ordered result model
//! - [`WorkerPool`] bounding concurrency with per-submission handles
//! - [`Scheduler`] fanning a run's iterations across the pool
//! - [`collector`] resolving handles in submission order
//!
//! The pipeline's central invariant: result ordering is always submission
//! order, independent of which worker finished first. Handles are collected
//! by index, never by completion.

pub mod collector;
mod error;
pub mod pool;
pub mod probe;
mod row;
mod scheduler;

pub use collector::{collect, collect_with_policy, Collection, FailurePolicy, IterationFailure};
pub use error::{ConfigError, ExecutionError, ProbeError};
pub use pool::{Handle, WorkerPool};
pub use probe::Probe;
pub use row::{MetricRow, ResultSet};
pub use scheduler::{RunConfig, Scheduler};
