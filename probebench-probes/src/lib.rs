#![warn(missing_docs)]
//! probebench probes - Built-in HTTP Probes
//!
//! Two probe kinds drive a REST identity service:
//! - [`EntityCreationProbe`] — account lifecycle (create, fetch, delete)
//! - [`TokenAcquisitionProbe`] — OAuth2 password grant (acquire, verify)
//!
//! Both implement [`probebench_core::Probe`]; adding a probe kind touches
//! neither the scheduler, the collector nor the reporter. Each probe owns a
//! blocking HTTP client with a bounded per-request timeout and times its
//! phases into a [`probebench_core::MetricRow`] in whole milliseconds.

mod account;
mod http;
mod token;

pub use account::{EntityCreationConfig, EntityCreationProbe};
pub use token::{TokenAcquisitionConfig, TokenAcquisitionProbe};
