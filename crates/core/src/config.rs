//! Configuration system for the cache simulator.
//!
//! This module defines the structures used to parameterize a simulation run. It provides:
//! 1. **Defaults:** Baseline cache geometry and write policies.
//! 2. **Options:** The raw, deserialisable option set supplied by the CLI or a JSON file.
//! 3. **Validation:** Conversion into an immutable [`CacheConfig`] that the model is built from.
//!
//! Options are validated once; a [`CacheConfig`] can only be obtained through
//! [`CacheOptions::validate`], so every model runs on a legal geometry.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::common::constants::WORD_SIZE;
use crate::common::error::ConfigError;

/// Default configuration constants for the simulator.
mod defaults {
    /// Default cache size in bytes (8 KiB), used for unified and split caches alike.
    pub const CACHE_SIZE: usize = 8 * 1024;

    /// Default block size in bytes (4 words).
    pub const BLOCK_SIZE: usize = 16;

    /// Default associativity (1 way = direct-mapped).
    pub const ASSOCIATIVITY: usize = 1;
}

/// Policy applied to store hits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum WritePolicy {
    /// Stores update the cached block only; dirty blocks are copied back on
    /// eviction or flush.
    #[default]
    #[serde(alias = "writeback", alias = "write_back")]
    WriteBack,
    /// Every store is immediately copied back; cached blocks never become dirty.
    #[serde(alias = "writethrough", alias = "write_through")]
    WriteThrough,
}

/// Policy applied to store misses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AllocPolicy {
    /// The missing block is fetched and installed before the store is applied.
    #[default]
    #[serde(alias = "writealloc", alias = "write_allocate")]
    WriteAllocate,
    /// The store goes straight to backing storage and no block is installed.
    #[serde(alias = "nowritealloc", alias = "no_write_allocate")]
    NoWriteAllocate,
}

/// Raw cache options, as supplied by a caller or a JSON document.
///
/// Supplying either `instruction_size` or `data_size` switches the model to
/// split instruction/data caches; the one left out takes the default size.
///
/// # Examples
///
/// ```
/// use cachesim_core::config::{CacheOptions, WritePolicy};
///
/// let json = r#"{ "instruction_size": 4096, "associativity": 2, "write_policy": "WriteThrough" }"#;
/// let options = CacheOptions::from_json(json).unwrap();
/// assert!(options.is_split());
/// assert_eq!(options.data_size, None);
/// assert_eq!(options.write_policy, WritePolicy::WriteThrough);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CacheOptions {
    /// Size of the unified cache in bytes (ignored in split mode).
    #[serde(default = "CacheOptions::default_size")]
    pub unified_size: usize,

    /// Size of the instruction cache in bytes.
    #[serde(default)]
    pub instruction_size: Option<usize>,

    /// Size of the data cache in bytes.
    #[serde(default)]
    pub data_size: Option<usize>,

    /// Block size in bytes.
    #[serde(default = "CacheOptions::default_block")]
    pub block_size: usize,

    /// Lines per set.
    #[serde(default = "CacheOptions::default_assoc")]
    pub associativity: usize,

    /// Store-hit policy.
    #[serde(default)]
    pub write_policy: WritePolicy,

    /// Store-miss policy.
    #[serde(default)]
    pub alloc_policy: AllocPolicy,
}

impl CacheOptions {
    fn default_size() -> usize {
        defaults::CACHE_SIZE
    }

    fn default_block() -> usize {
        defaults::BLOCK_SIZE
    }

    fn default_assoc() -> usize {
        defaults::ASSOCIATIVITY
    }

    /// Parses options from a JSON document. Missing fields take their defaults.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Parse`] if the document is not valid JSON or names an
    /// unknown field.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Reads and parses a JSON options file.
    ///
    /// # Errors
    ///
    /// [`ConfigError::Io`] if the file cannot be read, otherwise as
    /// [`CacheOptions::from_json`].
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json(&text)
    }

    /// Returns `true` if split instruction/data caches are requested.
    pub const fn is_split(&self) -> bool {
        self.instruction_size.is_some() || self.data_size.is_some()
    }

    /// Validates the options and freezes them into a [`CacheConfig`].
    ///
    /// # Errors
    ///
    /// - [`ConfigError::Zero`] for a zero size, block size or associativity.
    /// - [`ConfigError::BlockNotPowerOfTwo`] for an irregular block size.
    /// - [`ConfigError::SetTooLarge`] if `block_size × associativity` overflows.
    /// - [`ConfigError::Indivisible`] if a size is not a multiple of
    ///   `block_size × associativity`.
    /// - [`ConfigError::SetsNotPowerOfTwo`] if the derived set count is not a
    ///   power of two.
    pub fn validate(&self) -> Result<CacheConfig, ConfigError> {
        if self.block_size == 0 {
            return Err(ConfigError::Zero {
                cache: "cache",
                field: "block size",
            });
        }
        if !self.block_size.is_power_of_two() {
            return Err(ConfigError::BlockNotPowerOfTwo(self.block_size));
        }
        if self.associativity == 0 {
            return Err(ConfigError::Zero {
                cache: "cache",
                field: "associativity",
            });
        }
        let set_bytes = self.block_size.checked_mul(self.associativity).ok_or(
            ConfigError::SetTooLarge {
                block_size: self.block_size,
                associativity: self.associativity,
            },
        )?;

        let layout = if self.is_split() {
            let instruction = self.instruction_size.unwrap_or(defaults::CACHE_SIZE);
            let data = self.data_size.unwrap_or(defaults::CACHE_SIZE);
            self.check_size("instruction", instruction, set_bytes)?;
            self.check_size("data", data, set_bytes)?;
            CacheLayout::Split { instruction, data }
        } else {
            self.check_size("unified", self.unified_size, set_bytes)?;
            CacheLayout::Unified {
                size: self.unified_size,
            }
        };

        Ok(CacheConfig {
            layout,
            block_size: self.block_size,
            associativity: self.associativity,
            set_bytes,
            write_policy: self.write_policy,
            alloc_policy: self.alloc_policy,
        })
    }

    /// Checks one cache size against the bytes covered by one set.
    fn check_size(
        &self,
        cache: &'static str,
        size: usize,
        set_bytes: usize,
    ) -> Result<(), ConfigError> {
        if size == 0 {
            return Err(ConfigError::Zero {
                cache,
                field: "size",
            });
        }
        if size % set_bytes != 0 {
            return Err(ConfigError::Indivisible {
                cache,
                size,
                block_size: self.block_size,
                associativity: self.associativity,
            });
        }
        let sets = size / set_bytes;
        if !sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo { cache, sets });
        }
        Ok(())
    }
}

impl Default for CacheOptions {
    /// Unified 8 KiB direct-mapped cache, 16-byte blocks, write-back with write-allocate.
    fn default() -> Self {
        Self {
            unified_size: defaults::CACHE_SIZE,
            instruction_size: None,
            data_size: None,
            block_size: defaults::BLOCK_SIZE,
            associativity: defaults::ASSOCIATIVITY,
            write_policy: WritePolicy::default(),
            alloc_policy: AllocPolicy::default(),
        }
    }
}

/// Organisation of the cache banks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum CacheLayout {
    /// One bank serving fetches and data accesses.
    Unified {
        /// Size in bytes.
        size: usize,
    },
    /// Separate instruction and data banks.
    Split {
        /// Instruction cache size in bytes.
        instruction: usize,
        /// Data cache size in bytes.
        data: usize,
    },
}

/// Validated, immutable cache configuration.
///
/// Obtained from [`CacheOptions::validate`]; a model never sees an illegal geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CacheConfig {
    layout: CacheLayout,
    block_size: usize,
    associativity: usize,
    #[serde(skip)]
    set_bytes: usize,
    write_policy: WritePolicy,
    alloc_policy: AllocPolicy,
}

impl CacheConfig {
    /// Bank organisation and sizes.
    pub const fn layout(&self) -> CacheLayout {
        self.layout
    }

    /// Returns `true` for split instruction/data caches.
    pub const fn is_split(&self) -> bool {
        matches!(self.layout, CacheLayout::Split { .. })
    }

    /// Block size in bytes.
    pub const fn block_size(&self) -> usize {
        self.block_size
    }

    /// Lines per set.
    pub const fn associativity(&self) -> usize {
        self.associativity
    }

    /// Store-hit policy.
    pub const fn write_policy(&self) -> WritePolicy {
        self.write_policy
    }

    /// Store-miss policy.
    pub const fn alloc_policy(&self) -> AllocPolicy {
        self.alloc_policy
    }

    /// Returns `true` under [`WritePolicy::WriteBack`].
    pub const fn is_write_back(&self) -> bool {
        matches!(self.write_policy, WritePolicy::WriteBack)
    }

    /// Returns `true` under [`AllocPolicy::WriteAllocate`].
    pub const fn is_write_allocate(&self) -> bool {
        matches!(self.alloc_policy, AllocPolicy::WriteAllocate)
    }

    /// Words moved by one block transfer (never less than one).
    pub const fn words_per_block(&self) -> u64 {
        let words = self.block_size / WORD_SIZE;
        if words == 0 { 1 } else { words as u64 }
    }

    /// Number of sets in a bank of `size` bytes.
    pub const fn sets_for(&self, size: usize) -> usize {
        size / self.set_bytes
    }
}
