//! Cache bank: one array of per-set recency lists.
//!
//! A bank is the storage of a single cache (the unified cache, or one half
//! of a split instruction/data pair). It answers "is this tag resident in
//! this set" and carries out the admission and eviction the model decides on.
//! Occupancy counters mirror the length of every set's list.

use crate::common::addr::{Decoded, decode, log2};
use crate::common::error::CacheError;

use super::line_list::{CacheLine, LineList, SlotId};

/// Result of probing a set for a tag.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Lookup {
    /// The tag is resident in the given slot.
    Hit(SlotId),
    /// The tag is absent and the set still has a free slot.
    ColdMiss,
    /// The tag is absent and the set is full; the slot is the LRU victim.
    EvictMiss(SlotId),
}

/// Set-associative storage for one cache.
#[derive(Clone, Debug)]
pub struct CacheBank {
    name: &'static str,
    ways: usize,
    block_size: usize,
    index_shift: u32,
    index_mask: u64,
    sets: Vec<LineList>,
    occupancy: Vec<usize>,
    total_occupied: usize,
}

impl CacheBank {
    /// Allocates an empty bank.
    ///
    /// # Arguments
    ///
    /// * `name` - Label used in logs (`unified`, `instruction`, `data`).
    /// * `n_sets` - Number of sets (power of two).
    /// * `ways` - Lines per set.
    /// * `block_size` - Block size in bytes (power of two).
    pub fn new(name: &'static str, n_sets: usize, ways: usize, block_size: usize) -> Self {
        Self {
            name,
            ways,
            block_size,
            index_shift: log2(block_size),
            index_mask: n_sets as u64 - 1,
            sets: (0..n_sets).map(|_| LineList::new(ways)).collect(),
            occupancy: vec![0; n_sets],
            total_occupied: 0,
        }
    }

    /// Label of this bank.
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Number of sets.
    pub const fn set_count(&self) -> usize {
        self.occupancy.len()
    }

    /// Lines per set.
    pub const fn ways(&self) -> usize {
        self.ways
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Number of block-offset bits stripped before indexing.
    pub const fn index_shift(&self) -> u32 {
        self.index_shift
    }

    /// Mask selecting the set index from a block number.
    pub const fn index_mask(&self) -> u64 {
        self.index_mask
    }

    /// Splits `addr` into set index and tag for this bank's geometry.
    #[inline]
    pub const fn decode(&self, addr: u64) -> Decoded {
        decode(addr, self.block_size, self.occupancy.len())
    }

    /// Lines currently resident in `set`.
    pub fn occupancy(&self, set: usize) -> usize {
        self.occupancy[set]
    }

    /// Lines currently resident in the whole bank.
    pub const fn total_occupied(&self) -> usize {
        self.total_occupied
    }

    /// Recency list of `set`.
    pub fn set(&self, set: usize) -> &LineList {
        &self.sets[set]
    }

    /// Line behind `slot` in `set`.
    pub fn line(&self, set: usize, slot: SlotId) -> &CacheLine {
        self.sets[set].line(slot)
    }

    /// Line behind `slot` in `set`, mutably.
    pub fn line_mut(&mut self, set: usize, slot: SlotId) -> &mut CacheLine {
        self.sets[set].line_mut(slot)
    }

    /// Probes `set` for `tag`.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvariantViolation`] if the set is accounted full but
    /// has no tail line.
    pub fn lookup_or_reserve(&self, set: usize, tag: u64) -> Result<Lookup, CacheError> {
        let list = &self.sets[set];
        if let Some(slot) = list.find(tag) {
            return Ok(Lookup::Hit(slot));
        }
        if self.occupancy[set] < self.ways {
            return Ok(Lookup::ColdMiss);
        }
        list.tail()
            .map(Lookup::EvictMiss)
            .ok_or(CacheError::InvariantViolation("full set without an LRU line"))
    }

    /// Installs a new line at the head of `set` after a [`Lookup::ColdMiss`].
    ///
    /// # Errors
    ///
    /// [`CacheError::InvariantViolation`] if the set has no free slot.
    pub fn commit_admit(&mut self, set: usize, line: CacheLine) -> Result<SlotId, CacheError> {
        let slot = self.sets[set].insert_front(line)?;
        self.occupancy[set] += 1;
        self.total_occupied += 1;
        debug_assert_eq!(self.occupancy[set], self.sets[set].len());
        Ok(slot)
    }

    /// Replaces the LRU `victim` of `set` by `line` after a [`Lookup::EvictMiss`].
    ///
    /// The new line lands at the head; occupancy is unchanged.
    ///
    /// # Returns
    ///
    /// The slot of the new line and the evicted line.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvariantViolation`] if `victim` is not the tail of the set.
    pub fn commit_evict_replace(
        &mut self,
        set: usize,
        victim: SlotId,
        line: CacheLine,
    ) -> Result<(SlotId, CacheLine), CacheError> {
        let list = &mut self.sets[set];
        if list.tail() != Some(victim) {
            return Err(CacheError::InvariantViolation("victim is not the LRU line"));
        }
        let evicted = list.evict_tail()?;
        let slot = list.insert_front(line)?;
        Ok((slot, evicted))
    }

    /// Marks `slot` as most recently used after a [`Lookup::Hit`].
    pub fn touch(&mut self, set: usize, slot: SlotId) {
        self.sets[set].move_to_front(slot);
    }

    /// Clears every dirty bit in the bank and returns how many lines were dirty.
    pub fn clean_all(&mut self) -> usize {
        self.sets.iter_mut().map(LineList::clean_all).sum()
    }
}
