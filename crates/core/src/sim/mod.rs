//! Trace replay.
//!
//! Provides the trace reader and the driver that feeds trace records into a
//! [`CacheModel`](crate::cache::CacheModel).

/// Text trace parsing.
pub mod trace;

/// Trace-driven simulation run.
pub mod simulator;

pub use simulator::Simulator;
pub use trace::{TraceReader, TraceRecord};
