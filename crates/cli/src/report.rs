//! Settings and statistics report.
//!
//! Renders the validated configuration and the final counters of a run in
//! the classic text layout:
//!
//! ```text
//! *** CACHE SETTINGS ***
//!   Unified I- D-cache
//!   Size:     8192
//!   ...
//! *** CACHE STATISTICS ***
//!  INSTRUCTIONS
//!   accesses:  ...
//! ```

use std::fmt;

use cachesim_core::config::{AllocPolicy, CacheConfig, CacheLayout, WritePolicy};
use cachesim_core::stats::{CacheStats, StreamStats};
use serde::Serialize;

/// Section names for selective report output.
///
/// Pass an empty slice to [`Report::new`] to render all sections.
pub const SECTIONS: &[&str] = &["settings", "instructions", "data", "traffic"];

/// Text report over one finished run.
#[derive(Debug)]
pub struct Report<'a> {
    config: &'a CacheConfig,
    stats: &'a CacheStats,
    sections: &'a [String],
}

impl<'a> Report<'a> {
    /// Creates a report restricted to `sections` (empty = everything).
    pub const fn new(config: &'a CacheConfig, stats: &'a CacheStats, sections: &'a [String]) -> Self {
        Self {
            config,
            stats,
            sections,
        }
    }

    fn wants(&self, section: &str) -> bool {
        self.sections.is_empty() || self.sections.iter().any(|s| s == section)
    }

    fn write_settings(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "*** CACHE SETTINGS ***")?;
        match self.config.layout() {
            CacheLayout::Split { instruction, data } => {
                writeln!(f, "  Split I- D-cache")?;
                writeln!(f, "  I-cache size: \t{instruction}")?;
                writeln!(f, "  D-cache size: \t{data}")?;
            }
            CacheLayout::Unified { size } => {
                writeln!(f, "  Unified I- D-cache")?;
                writeln!(f, "  Size: \t{size}")?;
            }
        }
        writeln!(f, "  Associativity: \t{}", self.config.associativity())?;
        writeln!(f, "  Block size: \t{}", self.config.block_size())?;
        let write = match self.config.write_policy() {
            WritePolicy::WriteBack => "WRITE BACK",
            WritePolicy::WriteThrough => "WRITE THROUGH",
        };
        let alloc = match self.config.alloc_policy() {
            AllocPolicy::WriteAllocate => "WRITE ALLOCATE",
            AllocPolicy::NoWriteAllocate => "WRITE NO ALLOCATE",
        };
        writeln!(f, "  Write policy: \t{write}")?;
        writeln!(f, "  Allocation policy: \t{alloc}")
    }
}

fn write_stream(f: &mut fmt::Formatter<'_>, title: &str, stats: &StreamStats) -> fmt::Result {
    writeln!(f, " {title}")?;
    writeln!(f, "  accesses:  {}", stats.accesses)?;
    writeln!(f, "  misses:    {}", stats.misses)?;
    if stats.accesses == 0 {
        writeln!(f, "  miss rate: 0 (0)")?;
    } else {
        writeln!(
            f,
            "  miss rate: {:.4} (hit rate {:.4})",
            stats.miss_rate(),
            stats.hit_rate()
        )?;
    }
    writeln!(f, "  replace:   {}", stats.replacements)
}

impl fmt::Display for Report<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.wants("settings") {
            self.write_settings(f)?;
        }
        let body = ["instructions", "data", "traffic"];
        if body.iter().any(|s| self.wants(s)) {
            writeln!(f)?;
            writeln!(f, "*** CACHE STATISTICS ***")?;
        }
        if self.wants("instructions") {
            write_stream(f, "INSTRUCTIONS", &self.stats.instruction)?;
        }
        if self.wants("data") {
            write_stream(f, "DATA", &self.stats.data)?;
        }
        if self.wants("traffic") {
            writeln!(f, " TRAFFIC (in words)")?;
            writeln!(f, "  demand fetch:  {}", self.stats.total_fetch_words())?;
            writeln!(f, "  copies back:   {}", self.stats.total_copy_back_words())?;
        }
        Ok(())
    }
}

/// Machine-readable form of a run, emitted with `--json`.
#[derive(Debug, Serialize)]
pub struct JsonReport<'a> {
    /// Trace records replayed.
    pub records: u64,
    /// Validated configuration.
    pub config: &'a CacheConfig,
    /// Final statistics.
    pub stats: &'a CacheStats,
}
