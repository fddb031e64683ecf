//! Test harness: model builders and replay helpers.

use cachesim_core::cache::{AccessOutcome, CacheModel, configure};
use cachesim_core::common::AccessKind;
use cachesim_core::config::{AllocPolicy, CacheOptions, WritePolicy};

/// Shorthand for a data load.
pub const LOAD: AccessKind = AccessKind::DataLoad;
/// Shorthand for a data store.
pub const STORE: AccessKind = AccessKind::DataStore;
/// Shorthand for an instruction fetch.
pub const FETCH: AccessKind = AccessKind::InstructionFetch;

/// Options for a unified cache with the given geometry and policies.
pub fn unified(
    size: usize,
    block_size: usize,
    associativity: usize,
    write_policy: WritePolicy,
    alloc_policy: AllocPolicy,
) -> CacheOptions {
    CacheOptions {
        unified_size: size,
        instruction_size: None,
        data_size: None,
        block_size,
        associativity,
        write_policy,
        alloc_policy,
    }
}

/// Builds a unified model.
pub fn model(
    size: usize,
    block_size: usize,
    associativity: usize,
    write_policy: WritePolicy,
    alloc_policy: AllocPolicy,
) -> CacheModel {
    configure(&unified(
        size,
        block_size,
        associativity,
        write_policy,
        alloc_policy,
    ))
    .unwrap()
}

/// Builds a unified write-back, write-allocate model.
pub fn write_back_model(size: usize, block_size: usize, associativity: usize) -> CacheModel {
    model(
        size,
        block_size,
        associativity,
        WritePolicy::WriteBack,
        AllocPolicy::WriteAllocate,
    )
}

/// Replays `accesses` and returns every outcome in order.
pub fn replay(model: &mut CacheModel, accesses: &[(u64, AccessKind)]) -> Vec<AccessOutcome> {
    accesses
        .iter()
        .map(|&(addr, kind)| model.access(addr, kind).unwrap())
        .collect()
}

/// Resident tags of `set` in the bank serving `kind`, most recent first.
pub fn resident_tags(model: &CacheModel, kind: AccessKind, set: usize) -> Vec<u64> {
    model.bank(kind).set(set).tags()
}
