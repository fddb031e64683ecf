//! Memory Access Kinds.
//!
//! This module defines the classification of trace records. These types are used for:
//! 1. **Bank Selection:** Routing fetches and data accesses in a split cache.
//! 2. **Write Policy:** Distinguishing stores from reads.
//! 3. **Statistics Tracking:** Attributing every event to the instruction or data stream.

use std::fmt;

use serde::Serialize;

/// Kind of memory access carried by a trace record.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AccessKind {
    /// Instruction fetch (trace label `2`).
    InstructionFetch,
    /// Data read (trace label `0`).
    DataLoad,
    /// Data write (trace label `1`).
    DataStore,
}

impl AccessKind {
    /// Maps a numeric trace label onto an access kind.
    ///
    /// # Returns
    ///
    /// `None` for any label other than `0`, `1` or `2`.
    pub const fn from_label(label: u32) -> Option<Self> {
        match label {
            0 => Some(Self::DataLoad),
            1 => Some(Self::DataStore),
            2 => Some(Self::InstructionFetch),
            _ => None,
        }
    }

    /// Returns `true` for stores.
    #[inline]
    pub const fn is_write(self) -> bool {
        matches!(self, Self::DataStore)
    }

    /// Statistic stream this access is accounted against.
    #[inline]
    pub const fn stream(self) -> Stream {
        match self {
            Self::InstructionFetch => Stream::Instruction,
            Self::DataLoad | Self::DataStore => Stream::Data,
        }
    }
}

impl fmt::Display for AccessKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::InstructionFetch => "ifetch",
            Self::DataLoad => "load",
            Self::DataStore => "store",
        };
        f.write_str(name)
    }
}

/// Statistic stream an event is counted against.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum Stream {
    /// Instruction fetches.
    Instruction,
    /// Data loads and stores, plus end-of-run flush traffic.
    Data,
}
