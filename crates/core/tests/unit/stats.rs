//! # Statistics Tests
//!
//! Derived rates and cross-stream totals of the counters produced by a run.

use cachesim_core::common::{AccessKind, Stream};
use cachesim_core::stats::{CacheStats, StreamStats};
use pretty_assertions::assert_eq;

use crate::common::{FETCH, LOAD, STORE, replay, write_back_model};

#[test]
fn test_defaults_are_zero() {
    let stats = CacheStats::default();
    assert_eq!(stats.instruction, StreamStats::default());
    assert_eq!(stats.data, StreamStats::default());
    assert_eq!(stats.total_accesses(), 0);
    assert_eq!(stats.total_copy_back_words(), 0);
}

#[test]
fn test_rates_without_accesses() {
    let stats = StreamStats::default();
    assert!(stats.miss_rate().abs() < f64::EPSILON);
    assert!(stats.hit_rate().abs() < f64::EPSILON);
    assert_eq!(stats.hits(), 0);
}

#[test]
fn test_rates() {
    let stats = StreamStats {
        accesses: 8,
        misses: 2,
        ..StreamStats::default()
    };
    assert!((stats.miss_rate() - 0.25).abs() < f64::EPSILON);
    assert!((stats.hit_rate() - 0.75).abs() < f64::EPSILON);
    assert_eq!(stats.hits(), 6);
}

#[test]
fn test_all_misses() {
    let stats = StreamStats {
        accesses: 3,
        misses: 3,
        ..StreamStats::default()
    };
    assert!((stats.miss_rate() - 1.0).abs() < f64::EPSILON);
    assert!(stats.hit_rate().abs() < f64::EPSILON);
}

#[test]
fn test_stream_selection() {
    let stats = CacheStats {
        instruction: StreamStats {
            accesses: 5,
            ..StreamStats::default()
        },
        data: StreamStats {
            accesses: 7,
            ..StreamStats::default()
        },
    };
    assert_eq!(stats.stream(Stream::Instruction).accesses, 5);
    assert_eq!(stats.stream(Stream::Data).accesses, 7);
    assert_eq!(stats.stream(AccessKind::DataStore.stream()).accesses, 7);
    assert_eq!(stats.total_accesses(), 12);
}

/// 8 KiB direct-mapped with 16-byte blocks: 4 words per block.
#[test]
fn test_totals_after_run() {
    let mut cache = write_back_model(8192, 16, 1);
    let _ = replay(
        &mut cache,
        &[
            (0x0000, FETCH),
            (0x0004, FETCH),
            (0x1000, LOAD),
            (0x1004, STORE),
            (0x3000, LOAD),
        ],
    );
    let stats = *cache.stats();
    assert_eq!(stats.instruction.accesses, 2);
    assert_eq!(stats.instruction.misses, 1);
    assert_eq!(stats.data.accesses, 3);
    assert_eq!(stats.data.misses, 2);
    assert_eq!(stats.data.replacements, 1);

    assert_eq!(stats.total_accesses(), 5);
    assert_eq!(stats.total_misses(), 3);
    assert_eq!(stats.total_demand_fetches(), 3);
    assert_eq!(stats.total_fetch_words(), 12);
    assert_eq!(stats.total_copies_back(), 1);
    assert_eq!(stats.total_copy_back_words(), 4);
}

#[test]
fn test_serializes_counters() {
    let stats = StreamStats {
        accesses: 4,
        misses: 1,
        copy_back_words: 8,
        ..StreamStats::default()
    };
    let json = serde_json::to_value(stats).unwrap();
    assert_eq!(json["accesses"], 4);
    assert_eq!(json["misses"], 1);
    assert_eq!(json["copy_back_words"], 8);
    assert_eq!(json["replacements"], 0);
}
