//! # Address Decoding Tests
//!
//! Checks set index and tag extraction for several geometries, and that the
//! pair always reconstructs the block number.

use cachesim_core::common::{Decoded, decode, log2};
use proptest::prelude::*;
use rstest::rstest;

#[rstest]
#[case(1, 0)]
#[case(2, 1)]
#[case(4, 2)]
#[case(16, 4)]
#[case(4096, 12)]
fn log2_of_powers_of_two(#[case] value: usize, #[case] expected: u32) {
    assert_eq!(log2(value), expected);
}

#[test]
fn offset_bits_are_discarded() {
    // 16-byte blocks, 4 sets: every byte of block 0 maps to set 0, tag 0.
    for addr in 0..16 {
        assert_eq!(decode(addr, 16, 4), Decoded { set: 0, tag: 0 });
    }
}

#[test]
fn consecutive_blocks_walk_the_sets() {
    // Block n lands in set n % 4 with tag n / 4.
    assert_eq!(decode(0x10, 16, 4), Decoded { set: 1, tag: 0 });
    assert_eq!(decode(0x20, 16, 4), Decoded { set: 2, tag: 0 });
    assert_eq!(decode(0x30, 16, 4), Decoded { set: 3, tag: 0 });
    assert_eq!(decode(0x40, 16, 4), Decoded { set: 0, tag: 1 });
    assert_eq!(decode(0x1234, 16, 4), Decoded { set: 3, tag: 0x48 });
}

#[test]
fn single_set_keeps_whole_block_number_as_tag() {
    assert_eq!(decode(0x14, 4, 1), Decoded { set: 0, tag: 5 });
    assert_eq!(decode(u64::MAX, 4, 1), Decoded { set: 0, tag: u64::MAX >> 2 });
}

#[test]
fn word_blocks_two_sets() {
    assert_eq!(decode(0x0, 4, 2), Decoded { set: 0, tag: 0 });
    assert_eq!(decode(0x4, 4, 2), Decoded { set: 1, tag: 0 });
    assert_eq!(decode(0x8, 4, 2), Decoded { set: 0, tag: 1 });
}

proptest! {
    #[test]
    fn decode_reconstructs_block_number(
        addr in any::<u64>(),
        block_bits in 0u32..12,
        set_bits in 0u32..16,
    ) {
        let block_size = 1usize << block_bits;
        let n_sets = 1usize << set_bits;
        let Decoded { set, tag } = decode(addr, block_size, n_sets);
        prop_assert!(set < n_sets);
        prop_assert_eq!((tag << set_bits) | set as u64, addr >> block_bits);
        prop_assert_eq!(decode(addr, block_size, n_sets), Decoded { set, tag });
    }
}
