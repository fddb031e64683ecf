//! System-wide constants.

/// Size of a machine word in bytes.
///
/// Traffic between the cache and backing storage is reported in words:
/// a block transfer moves `block_size / WORD_SIZE` words, a write-through
/// store moves a single word.
pub const WORD_SIZE: usize = 4;
