//! Store Policy Decision Table Tests.

use cachesim_core::cache::policy::{StoreHit, StoreMiss, WriteRule};
use cachesim_core::config::{AllocPolicy, WritePolicy};
use rstest::rstest;

#[rstest]
#[case(WritePolicy::WriteBack, AllocPolicy::WriteAllocate, StoreHit::MarkDirty, StoreMiss::AllocateDirty)]
#[case(
    WritePolicy::WriteThrough,
    AllocPolicy::WriteAllocate,
    StoreHit::WriteThrough,
    StoreMiss::AllocateWriteThrough
)]
#[case(WritePolicy::WriteBack, AllocPolicy::NoWriteAllocate, StoreHit::MarkDirty, StoreMiss::Bypass)]
#[case(WritePolicy::WriteThrough, AllocPolicy::NoWriteAllocate, StoreHit::WriteThrough, StoreMiss::Bypass)]
fn rule_per_policy_pair(
    #[case] write: WritePolicy,
    #[case] alloc: AllocPolicy,
    #[case] hit: StoreHit,
    #[case] miss: StoreMiss,
) {
    assert_eq!(WriteRule::new(write, alloc), WriteRule { hit, miss });
}
