//! Common types shared across the cache simulator.
//!
//! This module provides the small building blocks used by every other part
//! of the crate. It includes:
//! 1. **Address Decoding:** Splitting a byte address into set index and tag.
//! 2. **Constants:** Word size used for traffic accounting.
//! 3. **Access Kinds:** Classification of trace records (fetch/load/store).
//! 4. **Error Handling:** Configuration, trace and invariant errors.

/// Address decomposition into set index and tag.
pub mod addr;

/// Common constants used throughout the simulator.
pub mod constants;

/// Memory access kind and statistic stream definitions.
pub mod data;

/// Error types for configuration, trace parsing and cache invariants.
pub mod error;

pub use addr::{Decoded, decode, log2};
pub use constants::WORD_SIZE;
pub use data::{AccessKind, Stream};
pub use error::{CacheError, ConfigError, TraceError};
