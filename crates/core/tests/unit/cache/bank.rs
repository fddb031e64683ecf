//! Cache Bank Tests.
//!
//! Lookup classification (hit / cold miss / eviction miss), occupancy
//! accounting and the commit operations that follow each lookup.

use cachesim_core::cache::bank::{CacheBank, Lookup};
use cachesim_core::cache::line_list::CacheLine;
use cachesim_core::common::Decoded;

/// 4 sets × 2 ways × 16-byte blocks.
fn bank() -> CacheBank {
    CacheBank::new("test", 4, 2, 16)
}

#[test]
fn geometry_accessors() {
    let bank = bank();
    assert_eq!(bank.name(), "test");
    assert_eq!(bank.set_count(), 4);
    assert_eq!(bank.ways(), 2);
    assert_eq!(bank.block_size(), 16);
    assert_eq!(bank.index_shift(), 4);
    assert_eq!(bank.index_mask(), 3);
    assert_eq!(bank.total_occupied(), 0);
}

#[test]
fn decode_uses_bank_geometry() {
    assert_eq!(bank().decode(0x74), Decoded { set: 3, tag: 1 });
}

#[test]
fn empty_set_reports_cold_miss() {
    assert_eq!(bank().lookup_or_reserve(0, 5).unwrap(), Lookup::ColdMiss);
}

#[test]
fn admitted_tag_hits() {
    let mut bank = bank();
    let slot = bank.commit_admit(1, CacheLine::new(5, false)).unwrap();
    assert_eq!(bank.lookup_or_reserve(1, 5).unwrap(), Lookup::Hit(slot));
    assert_eq!(bank.occupancy(1), 1);
    assert_eq!(bank.total_occupied(), 1);
    // Other sets are untouched.
    assert_eq!(bank.lookup_or_reserve(0, 5).unwrap(), Lookup::ColdMiss);
}

#[test]
fn partially_filled_set_still_cold_misses() {
    let mut bank = bank();
    let _ = bank.commit_admit(2, CacheLine::new(1, false)).unwrap();
    assert_eq!(bank.lookup_or_reserve(2, 9).unwrap(), Lookup::ColdMiss);
}

#[test]
fn full_set_reports_lru_victim() {
    let mut bank = bank();
    let first = bank.commit_admit(0, CacheLine::new(1, false)).unwrap();
    let _ = bank.commit_admit(0, CacheLine::new(2, false)).unwrap();
    assert_eq!(bank.lookup_or_reserve(0, 3).unwrap(), Lookup::EvictMiss(first));
}

#[test]
fn touch_changes_victim() {
    let mut bank = bank();
    let first = bank.commit_admit(0, CacheLine::new(1, false)).unwrap();
    let second = bank.commit_admit(0, CacheLine::new(2, false)).unwrap();
    bank.touch(0, first);
    assert_eq!(bank.lookup_or_reserve(0, 3).unwrap(), Lookup::EvictMiss(second));
}

#[test]
fn evict_replace_keeps_occupancy() {
    let mut bank = bank();
    let _ = bank.commit_admit(0, CacheLine::new(1, true)).unwrap();
    let _ = bank.commit_admit(0, CacheLine::new(2, false)).unwrap();

    let Lookup::EvictMiss(victim) = bank.lookup_or_reserve(0, 3).unwrap() else {
        panic!("expected an eviction miss");
    };
    let (slot, evicted) = bank
        .commit_evict_replace(0, victim, CacheLine::new(3, false))
        .unwrap();

    assert_eq!(evicted, CacheLine::new(1, true));
    assert_eq!(bank.line(0, slot).tag, 3);
    assert_eq!(bank.set(0).tags(), vec![3, 2]);
    assert_eq!(bank.occupancy(0), 2);
    assert_eq!(bank.total_occupied(), 2);
}

#[test]
fn evict_replace_rejects_non_tail_victim() {
    let mut bank = bank();
    let _ = bank.commit_admit(0, CacheLine::new(1, false)).unwrap();
    let head = bank.commit_admit(0, CacheLine::new(2, false)).unwrap();
    assert!(
        bank.commit_evict_replace(0, head, CacheLine::new(3, false))
            .is_err()
    );
    assert_eq!(bank.set(0).tags(), vec![2, 1]);
}

#[test]
fn admit_into_full_set_fails() {
    let mut bank = CacheBank::new("direct", 2, 1, 4);
    let _ = bank.commit_admit(0, CacheLine::new(1, false)).unwrap();
    assert!(bank.commit_admit(0, CacheLine::new(2, false)).is_err());
    assert_eq!(bank.occupancy(0), 1);
}

#[test]
fn clean_all_spans_every_set() {
    let mut bank = bank();
    for set in 0..4 {
        let _ = bank.commit_admit(set, CacheLine::new(0, true)).unwrap();
    }
    let slot = bank.commit_admit(3, CacheLine::new(1, false)).unwrap();
    bank.line_mut(3, slot).dirty = true;
    assert_eq!(bank.clean_all(), 5);
    assert_eq!(bank.clean_all(), 0);
}
