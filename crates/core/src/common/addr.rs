//! Address Decoder.
//!
//! Maps a byte address onto the geometry of a cache bank. With a block size
//! of `2^b` bytes and `2^s` sets:
//!
//! ```text
//!  63                      b+s        b          0
//! ┌──────────────────────────┬──────────┬──────────┐
//! │           tag            │  index   │  offset  │
//! └──────────────────────────┴──────────┴──────────┘
//! ```
//!
//! Both sizes must be powers of two; that is checked when the configuration
//! is validated, not here.

use serde::Serialize;

/// Set index and tag of a decoded address.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub struct Decoded {
    /// Index of the set the address maps to (`0..n_sets`).
    pub set: usize,
    /// Remaining high-order bits of the block number.
    pub tag: u64,
}

/// Returns `log2(value)` for a power of two.
///
/// For any other non-zero value this is the floor of the logarithm; the
/// caller is responsible for passing a power of two.
#[inline]
pub const fn log2(value: usize) -> u32 {
    usize::BITS - 1 - value.leading_zeros()
}

/// Decodes `addr` into its set index and tag.
///
/// # Arguments
///
/// * `addr` - Byte address of the access.
/// * `block_size` - Block size in bytes (power of two).
/// * `n_sets` - Number of sets in the bank (power of two).
///
/// # Returns
///
/// The `(set, tag)` pair such that
/// `(tag << log2(n_sets)) | set == addr >> log2(block_size)`.
#[inline]
pub const fn decode(addr: u64, block_size: usize, n_sets: usize) -> Decoded {
    let block = addr >> log2(block_size);
    Decoded {
        set: (block & (n_sets as u64 - 1)) as usize,
        tag: block >> log2(n_sets),
    }
}
