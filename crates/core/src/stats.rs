//! Cache statistics collection.
//!
//! This module tracks the events produced by the cache model. It provides:
//! 1. **Per-stream counters:** Accesses, misses, replacements, demand fetches and copy-backs
//!    for the instruction and data streams independently.
//! 2. **Traffic:** Words moved between the cache and backing storage in each direction.
//! 3. **Derived metrics:** Miss and hit rates.
//!
//! Counters only grow during a run; they are reset by building a new model.

use serde::Serialize;

use crate::common::data::Stream;

/// Counters for one access stream.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct StreamStats {
    /// Accesses issued.
    pub accesses: u64,
    /// Accesses that did not find their block resident.
    pub misses: u64,
    /// Resident lines evicted to make room.
    pub replacements: u64,
    /// Blocks fetched from backing storage on a miss.
    pub demand_fetches: u64,
    /// Writes to backing storage (dirty evictions, write-through stores, flush).
    pub copies_back: u64,
    /// Words fetched from backing storage.
    pub fetch_words: u64,
    /// Words written to backing storage.
    pub copy_back_words: u64,
}

impl StreamStats {
    /// Fraction of accesses that missed, `0.0` when nothing was accessed.
    pub fn miss_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            self.misses as f64 / self.accesses as f64
        }
    }

    /// Fraction of accesses that hit, `0.0` when nothing was accessed.
    pub fn hit_rate(&self) -> f64 {
        if self.accesses == 0 {
            0.0
        } else {
            1.0 - self.miss_rate()
        }
    }

    /// Accesses that found their block resident.
    pub const fn hits(&self) -> u64 {
        self.accesses - self.misses
    }

    pub(crate) const fn record_access(&mut self) {
        self.accesses += 1;
    }

    pub(crate) const fn record_miss(&mut self) {
        self.misses += 1;
    }

    pub(crate) const fn record_replacement(&mut self) {
        self.replacements += 1;
    }

    pub(crate) const fn record_fetch(&mut self, words: u64) {
        self.demand_fetches += 1;
        self.fetch_words += words;
    }

    pub(crate) const fn record_copy_back(&mut self, words: u64) {
        self.copies_back += 1;
        self.copy_back_words += words;
    }
}

/// Counters for both streams of a run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Instruction fetches.
    pub instruction: StreamStats,
    /// Data loads, stores and flush traffic.
    pub data: StreamStats,
}

impl CacheStats {
    /// Counters of `stream`.
    pub const fn stream(&self, stream: Stream) -> &StreamStats {
        match stream {
            Stream::Instruction => &self.instruction,
            Stream::Data => &self.data,
        }
    }

    pub(crate) const fn stream_mut(&mut self, stream: Stream) -> &mut StreamStats {
        match stream {
            Stream::Instruction => &mut self.instruction,
            Stream::Data => &mut self.data,
        }
    }

    /// Accesses over both streams.
    pub const fn total_accesses(&self) -> u64 {
        self.instruction.accesses + self.data.accesses
    }

    /// Misses over both streams.
    pub const fn total_misses(&self) -> u64 {
        self.instruction.misses + self.data.misses
    }

    /// Demand fetches over both streams.
    pub const fn total_demand_fetches(&self) -> u64 {
        self.instruction.demand_fetches + self.data.demand_fetches
    }

    /// Copy-backs over both streams.
    pub const fn total_copies_back(&self) -> u64 {
        self.instruction.copies_back + self.data.copies_back
    }

    /// Words fetched over both streams.
    pub const fn total_fetch_words(&self) -> u64 {
        self.instruction.fetch_words + self.data.fetch_words
    }

    /// Words copied back over both streams.
    pub const fn total_copy_back_words(&self) -> u64 {
        self.instruction.copy_back_words + self.data.copy_back_words
    }
}
