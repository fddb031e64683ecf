//! Error definitions.
//!
//! This module defines the failure modes of the simulator. It provides:
//! 1. **Configuration Errors:** Rejected cache geometries and unreadable option files.
//! 2. **Trace Errors:** I/O failures and malformed trace records, tagged with line numbers.
//! 3. **Cache Errors:** Internal invariant breaches surfaced as values instead of panics.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Invalid cache configuration, reported when options are validated.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A size, block size or associativity of zero.
    #[error("{cache}: {field} must be greater than zero")]
    Zero {
        /// Cache the parameter belongs to (`unified`, `instruction`, `data`).
        cache: &'static str,
        /// Name of the offending parameter.
        field: &'static str,
    },

    /// Block size that is not a power of two.
    #[error("block size {0} is not a power of two")]
    BlockNotPowerOfTwo(usize),

    /// Cache size not evenly divisible into `block_size × associativity`.
    #[error(
        "{cache}: size {size} is not a multiple of block size {block_size} × associativity {associativity}"
    )]
    Indivisible {
        /// Cache the size belongs to.
        cache: &'static str,
        /// Configured size in bytes.
        size: usize,
        /// Configured block size in bytes.
        block_size: usize,
        /// Configured associativity.
        associativity: usize,
    },

    /// `block_size × associativity` does not fit in the address space.
    #[error("block size {block_size} × associativity {associativity} overflows the address space")]
    SetTooLarge {
        /// Configured block size in bytes.
        block_size: usize,
        /// Configured associativity.
        associativity: usize,
    },

    /// Derived set count that is not a power of two.
    #[error("{cache}: set count {sets} is not a power of two")]
    SetsNotPowerOfTwo {
        /// Cache the set count was derived for.
        cache: &'static str,
        /// Derived number of sets.
        sets: usize,
    },

    /// JSON options document could not be parsed.
    #[error("invalid options document: {0}")]
    Parse(#[from] serde_json::Error),

    /// JSON options file could not be read.
    #[error("cannot read options file {}: {source}", path.display())]
    Io {
        /// Path of the options file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },
}

/// Failure while reading a trace.
#[derive(Debug, Error)]
pub enum TraceError {
    /// Trace file could not be opened.
    #[error("trace read failed: {0}")]
    Io(#[from] io::Error),

    /// A line could not be read (I/O failure or invalid UTF-8).
    #[error("line {line}: {source}")]
    Read {
        /// 1-based line number.
        line: usize,
        /// Underlying I/O error.
        #[source]
        source: io::Error,
    },

    /// Record does not have the `<label> <address>` shape.
    #[error("line {line}: expected `<label> <hex address>`, found `{text}`")]
    Malformed {
        /// 1-based line number.
        line: usize,
        /// Offending line content.
        text: String,
    },

    /// Access label outside `0..=2`.
    #[error("line {line}: unknown access label `{label}`")]
    UnknownKind {
        /// 1-based line number.
        line: usize,
        /// Offending label token.
        label: String,
    },

    /// Address token that is not a hexadecimal number.
    #[error("line {line}: invalid hex address `{text}`")]
    BadAddress {
        /// 1-based line number.
        line: usize,
        /// Offending address token.
        text: String,
    },
}

/// Error raised while driving the cache model.
#[derive(Debug, Error)]
pub enum CacheError {
    /// Internal state no longer satisfies a structural invariant.
    #[error("cache invariant violated: {0}")]
    InvariantViolation(&'static str),

    /// The trace feeding the model could not be read.
    #[error(transparent)]
    Trace(#[from] TraceError),
}
