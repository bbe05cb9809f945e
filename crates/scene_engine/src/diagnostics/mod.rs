//! Diagnostics for resource accounting
//!
//! The engine does not keep any global diagnostic state; a [`Counters`]
//! handle is created by the application and passed to the engine explicitly.

pub mod counters;

pub use counters::{Counters, ReleaseRecord, Report, ResourceGuard, ResourceKind, Tally};
