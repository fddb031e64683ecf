//! # Access Kind Tests

use cachesim_core::common::{AccessKind, Stream};

#[test]
fn trace_labels_map_to_kinds() {
    assert_eq!(AccessKind::from_label(0), Some(AccessKind::DataLoad));
    assert_eq!(AccessKind::from_label(1), Some(AccessKind::DataStore));
    assert_eq!(AccessKind::from_label(2), Some(AccessKind::InstructionFetch));
    assert_eq!(AccessKind::from_label(3), None);
}

#[test]
fn only_stores_write() {
    assert!(AccessKind::DataStore.is_write());
    assert!(!AccessKind::DataLoad.is_write());
    assert!(!AccessKind::InstructionFetch.is_write());
}

#[test]
fn fetches_count_against_instruction_stream() {
    assert_eq!(AccessKind::InstructionFetch.stream(), Stream::Instruction);
    assert_eq!(AccessKind::DataLoad.stream(), Stream::Data);
    assert_eq!(AccessKind::DataStore.stream(), Stream::Data);
}

#[test]
fn display_names() {
    assert_eq!(AccessKind::InstructionFetch.to_string(), "ifetch");
    assert_eq!(AccessKind::DataLoad.to_string(), "load");
    assert_eq!(AccessKind::DataStore.to_string(), "store");
}
