//! Trace-driven cache simulator library.
//!
//! This crate models a set-associative cache replayed against a captured
//! memory-access trace. It provides:
//! 1. **Cache:** Unified or split banks with per-set LRU lists and write-back/through,
//!    allocate/no-allocate store policies.
//! 2. **Statistics:** Accesses, misses, replacements, demand fetches and copy-backs per stream.
//! 3. **Configuration:** Validated cache geometry, loadable from JSON.
//! 4. **Simulation:** Trace parsing and replay.
//!
//! ```
//! use cachesim_core::cache::configure;
//! use cachesim_core::common::AccessKind;
//! use cachesim_core::config::CacheOptions;
//!
//! let mut model = configure(&CacheOptions::default()).unwrap();
//! assert!(!model.access(0x1000, AccessKind::DataLoad).unwrap().is_hit());
//! assert!(model.access(0x1004, AccessKind::DataLoad).unwrap().is_hit());
//! assert_eq!(model.stats().data.accesses, 2);
//! assert_eq!(model.stats().data.misses, 1);
//! ```

/// Cache model, banks and LRU lists.
pub mod cache;
/// Common types (address decoding, access kinds, errors).
pub mod common;
/// Cache options and validated configuration.
pub mod config;
/// Trace reading and replay.
pub mod sim;
/// Statistics collection.
pub mod stats;

/// Model type; build one with [`cache::configure`].
pub use crate::cache::CacheModel;
/// Raw option set; validate into a [`config::CacheConfig`].
pub use crate::config::CacheOptions;
/// Per-run statistics.
pub use crate::stats::CacheStats;
