//! Store policy decision table.
//!
//! The write-hit and write-miss behaviour of the model is fully determined by
//! the `(WritePolicy, AllocPolicy)` pair:
//!
//! | policy pair                   | store hit       | store miss              |
//! |-------------------------------|-----------------|-------------------------|
//! | write-back, write-allocate    | mark dirty      | fetch, install dirty    |
//! | write-through, write-allocate | copy one word   | fetch, install clean, copy one word |
//! | write-back, no-allocate       | mark dirty      | copy one word, bypass   |
//! | write-through, no-allocate    | copy one word   | copy one word, bypass   |
//!
//! Installing on a full set also counts a replacement and a block copy-back
//! when the victim is dirty.

use crate::config::{AllocPolicy, WritePolicy};

/// Effect of a store that hits a resident line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreHit {
    /// Set the dirty bit.
    MarkDirty,
    /// Copy the stored word to backing storage; the line stays clean.
    WriteThrough,
}

/// Effect of a store that misses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StoreMiss {
    /// Fetch the block and install it dirty.
    AllocateDirty,
    /// Fetch the block, install it clean and copy the stored word.
    AllocateWriteThrough,
    /// Copy the stored word to backing storage without installing a line.
    Bypass,
}

/// Store handling for one policy pair.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct WriteRule {
    /// Store-hit action.
    pub hit: StoreHit,
    /// Store-miss action.
    pub miss: StoreMiss,
}

impl WriteRule {
    /// Looks up the rule for a policy pair.
    pub const fn new(write: WritePolicy, alloc: AllocPolicy) -> Self {
        match (write, alloc) {
            (WritePolicy::WriteBack, AllocPolicy::WriteAllocate) => Self {
                hit: StoreHit::MarkDirty,
                miss: StoreMiss::AllocateDirty,
            },
            (WritePolicy::WriteThrough, AllocPolicy::WriteAllocate) => Self {
                hit: StoreHit::WriteThrough,
                miss: StoreMiss::AllocateWriteThrough,
            },
            (WritePolicy::WriteBack, AllocPolicy::NoWriteAllocate) => Self {
                hit: StoreHit::MarkDirty,
                miss: StoreMiss::Bypass,
            },
            (WritePolicy::WriteThrough, AllocPolicy::NoWriteAllocate) => Self {
                hit: StoreHit::WriteThrough,
                miss: StoreMiss::Bypass,
            },
        }
    }
}
