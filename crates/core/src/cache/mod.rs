//! Set-Associative Cache Model.
//!
//! This module drives replayed memory accesses through one or two cache banks
//! and accounts for the resulting traffic. Every access goes through the same
//! steps:
//! 1. **Bank selection:** The unified bank, or the instruction/data bank in split mode.
//! 2. **Decode:** Set index and tag for the selected bank's geometry.
//! 3. **Lookup:** Hit, cold miss (free slot) or eviction miss (LRU victim).
//! 4. **Policy:** Reads fetch on miss; stores follow the [`WriteRule`] of the
//!    configured write and allocation policies.
//!
//! No data is stored; only tags and dirty bits are tracked.

/// Cache bank storage and set lookup.
pub mod bank;

/// Per-set LRU recency list.
pub mod line_list;

/// Store policy decision table.
pub mod policy;

use tracing::{debug, trace};

use self::bank::{CacheBank, Lookup};
use self::line_list::CacheLine;
use self::policy::{StoreHit, StoreMiss, WriteRule};
use crate::common::addr::Decoded;
use crate::common::data::AccessKind;
use crate::common::error::{CacheError, ConfigError};
use crate::config::{CacheConfig, CacheLayout, CacheOptions};
use crate::stats::CacheStats;

/// Classification of a single access.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AccessOutcome {
    /// The block was resident.
    Hit,
    /// The block was installed into a free slot.
    ColdMiss,
    /// The block replaced the LRU line of a full set.
    EvictMiss {
        /// Tag of the evicted line.
        victim_tag: u64,
        /// The evicted line was dirty.
        victim_dirty: bool,
    },
    /// A store miss under no-write-allocate; no line was installed.
    Bypass,
}

impl AccessOutcome {
    /// Returns `true` for [`AccessOutcome::Hit`].
    pub const fn is_hit(self) -> bool {
        matches!(self, Self::Hit)
    }
}

/// Cache banks of a model, fixed at construction.
#[derive(Clone, Debug)]
pub enum Banks {
    /// One bank serving every access.
    Unified(CacheBank),
    /// Fetches go to `instruction`, loads and stores to `data`.
    Split {
        /// Instruction cache.
        instruction: CacheBank,
        /// Data cache.
        data: CacheBank,
    },
}

impl Banks {
    fn new(config: &CacheConfig) -> Self {
        let bank = |name, size| {
            CacheBank::new(
                name,
                config.sets_for(size),
                config.associativity(),
                config.block_size(),
            )
        };
        match config.layout() {
            CacheLayout::Unified { size } => Self::Unified(bank("unified", size)),
            CacheLayout::Split { instruction, data } => Self::Split {
                instruction: bank("instruction", instruction),
                data: bank("data", data),
            },
        }
    }

    /// Bank serving accesses of `kind`.
    pub const fn select(&self, kind: AccessKind) -> &CacheBank {
        match self {
            Self::Unified(bank) => bank,
            Self::Split { instruction, data } => match kind {
                AccessKind::InstructionFetch => instruction,
                AccessKind::DataLoad | AccessKind::DataStore => data,
            },
        }
    }

    const fn select_mut(&mut self, kind: AccessKind) -> &mut CacheBank {
        match self {
            Self::Unified(bank) => bank,
            Self::Split { instruction, data } => match kind {
                AccessKind::InstructionFetch => instruction,
                AccessKind::DataLoad | AccessKind::DataStore => data,
            },
        }
    }

    /// Iterates over every bank.
    pub fn iter(&self) -> impl Iterator<Item = &CacheBank> {
        let (first, second) = match self {
            Self::Unified(bank) => (bank, None),
            Self::Split { instruction, data } => (instruction, Some(data)),
        };
        std::iter::once(first).chain(second)
    }

    fn iter_mut(&mut self) -> impl Iterator<Item = &mut CacheBank> {
        let (first, second) = match self {
            Self::Unified(bank) => (bank, None),
            Self::Split { instruction, data } => (instruction, Some(data)),
        };
        std::iter::once(first).chain(second)
    }
}

/// Trace-driven cache model.
#[derive(Clone, Debug)]
pub struct CacheModel {
    config: CacheConfig,
    rule: WriteRule,
    banks: Banks,
    stats: CacheStats,
}

/// Validates `options` and builds a model from them.
///
/// # Errors
///
/// Any [`ConfigError`] reported by [`CacheOptions::validate`].
pub fn configure(options: &CacheOptions) -> Result<CacheModel, ConfigError> {
    Ok(CacheModel::new(options.validate()?))
}

impl CacheModel {
    /// Allocates empty banks for `config` and zeroes the statistics.
    pub fn new(config: CacheConfig) -> Self {
        let banks = Banks::new(&config);
        for bank in banks.iter() {
            debug!(
                bank = bank.name(),
                sets = bank.set_count(),
                ways = bank.ways(),
                block_size = bank.block_size(),
                "cache bank allocated"
            );
        }
        Self {
            rule: WriteRule::new(config.write_policy(), config.alloc_policy()),
            config,
            banks,
            stats: CacheStats::default(),
        }
    }

    /// Active configuration.
    pub const fn config(&self) -> &CacheConfig {
        &self.config
    }

    /// Statistics accumulated so far.
    pub const fn stats(&self) -> &CacheStats {
        &self.stats
    }

    /// Cache banks.
    pub const fn banks(&self) -> &Banks {
        &self.banks
    }

    /// Bank that serves accesses of `kind`.
    pub const fn bank(&self, kind: AccessKind) -> &CacheBank {
        self.banks.select(kind)
    }

    /// Replays one access.
    ///
    /// # Arguments
    ///
    /// * `addr` - Byte address of the access.
    /// * `kind` - Fetch, load or store.
    ///
    /// # Returns
    ///
    /// How the access was resolved.
    ///
    /// # Errors
    ///
    /// [`CacheError::InvariantViolation`] if bank state is inconsistent. This
    /// does not happen for any trace.
    pub fn access(&mut self, addr: u64, kind: AccessKind) -> Result<AccessOutcome, CacheError> {
        let words = self.config.words_per_block();
        let rule = self.rule;
        let bank = self.banks.select_mut(kind);
        let Decoded { set, tag } = bank.decode(addr);
        let stats = self.stats.stream_mut(kind.stream());
        stats.record_access();

        let is_write = kind.is_write();
        let fill = CacheLine::new(tag, is_write && rule.miss == StoreMiss::AllocateDirty);

        let outcome = match bank.lookup_or_reserve(set, tag)? {
            Lookup::Hit(slot) => {
                if is_write {
                    match rule.hit {
                        StoreHit::MarkDirty => bank.line_mut(set, slot).dirty = true,
                        StoreHit::WriteThrough => stats.record_copy_back(1),
                    }
                }
                bank.touch(set, slot);
                AccessOutcome::Hit
            }
            _ if is_write && rule.miss == StoreMiss::Bypass => {
                stats.record_miss();
                stats.record_copy_back(1);
                AccessOutcome::Bypass
            }
            Lookup::ColdMiss => {
                stats.record_miss();
                stats.record_fetch(words);
                let _ = bank.commit_admit(set, fill)?;
                AccessOutcome::ColdMiss
            }
            Lookup::EvictMiss(victim) => {
                stats.record_miss();
                stats.record_fetch(words);
                stats.record_replacement();
                let (_, evicted) = bank.commit_evict_replace(set, victim, fill)?;
                if evicted.dirty {
                    stats.record_copy_back(words);
                }
                trace!(
                    bank = bank.name(),
                    set,
                    victim = evicted.tag,
                    dirty = evicted.dirty,
                    "evicted"
                );
                AccessOutcome::EvictMiss {
                    victim_tag: evicted.tag,
                    victim_dirty: evicted.dirty,
                }
            }
        };

        // The stored word itself still goes out under write-through.
        if is_write && !outcome.is_hit() && rule.miss == StoreMiss::AllocateWriteThrough {
            stats.record_copy_back(1);
        }

        trace!(%kind, addr, set, tag, ?outcome, "access");
        Ok(outcome)
    }

    /// Writes back every dirty line at the end of a run.
    ///
    /// Each dirty line counts one copy-back against the data stream and is
    /// left resident and clean. A second flush without intervening stores
    /// counts nothing.
    ///
    /// # Returns
    ///
    /// Number of lines written back.
    pub fn flush(&mut self) -> u64 {
        let words = self.config.words_per_block();
        let mut flushed = 0;
        for bank in self.banks.iter_mut() {
            let cleaned = bank.clean_all() as u64;
            for _ in 0..cleaned {
                self.stats.data.record_copy_back(words);
            }
            flushed += cleaned;
        }
        debug!(lines = flushed, "cache flushed");
        flushed
    }
}
