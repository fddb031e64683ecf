//! Unit tests for the shared building blocks.

/// Address decode arithmetic.
pub mod addr;

/// Access kind classification.
pub mod data;
