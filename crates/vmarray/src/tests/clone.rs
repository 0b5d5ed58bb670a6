// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{ReservationBehaviour, VirtualArray, VirtualArrayConfig, VirtualArrayError, page_size};

// =============================================================================
// try_clone()
// =============================================================================

#[test]
fn test_try_clone_copies_len_and_capacity() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");

    source.resize(2500, 3).expect("Failed to resize(..)");
    source.push(4).expect("Failed to push(4)");

    let copy = source.try_clone().expect("Failed to try_clone()");

    assert_eq!(copy.len(), source.len());
    assert_eq!(copy.capacity(), source.capacity());
    assert_eq!(copy.reserved_bytes(), source.reserved_bytes());
    assert_eq!(copy, source);
}

#[test]
fn test_try_clone_is_independent() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");

    source.try_extend([1, 2, 3]).expect("Failed to try_extend(..)");

    let mut copy = source.try_clone().expect("Failed to try_clone()");

    copy[0] = 100;
    copy.push(4).expect("Failed to push(4)");
    source.erase(2).expect("Failed to erase(2)");

    assert_eq!(source.as_slice(), &[1, 2]);
    assert_eq!(copy.as_slice(), &[100, 2, 3, 4]);
    assert_ne!(source.as_ptr(), copy.as_ptr());
}

#[test]
fn test_try_clone_of_empty_array() {
    let source = VirtualArray::<u64>::new().expect("Failed to new()");

    let copy = source.try_clone().expect("Failed to try_clone()");

    assert!(copy.is_empty());
    assert_eq!(copy.capacity(), 0);
}

#[test]
fn test_try_clone_keeps_config() {
    let config = VirtualArrayConfig::new()
        .with_max_capacity_bytes(4 * page_size())
        .with_min_growth_elements(64);
    let source = VirtualArray::<u64>::with_config(config).expect("Failed to with_config(..)");

    let copy = source.try_clone().expect("Failed to try_clone()");

    assert_eq!(copy.config(), &config);
    assert_eq!(copy.max_len(), source.max_len());
}

#[test]
fn test_clone_trait_matches_try_clone() {
    let mut source = VirtualArray::<String>::new().expect("Failed to new()");

    source.push("a".to_string()).expect("Failed to push(..)");
    source.push("b".to_string()).expect("Failed to push(..)");

    let copy = source.clone();

    assert_eq!(copy, source);
    assert_eq!(copy.capacity(), source.capacity());
}

// =============================================================================
// try_clone_from()
// =============================================================================

#[test]
fn test_try_clone_from_larger_source_grows_to_source_capacity() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");
    let mut target = VirtualArray::<u64>::new().expect("Failed to new()");

    source.resize(10_000, 5).expect("Failed to resize(..)");
    target.try_extend([1, 2]).expect("Failed to try_extend(..)");

    target
        .try_clone_from(&source)
        .expect("Failed to try_clone_from(..)");

    assert_eq!(target, source);
    assert_eq!(target.capacity(), source.capacity());
}

#[test]
fn test_try_clone_from_smaller_source_keeps_capacity() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");
    let mut target = VirtualArray::<u64>::new().expect("Failed to new()");

    source.try_extend([1, 2]).expect("Failed to try_extend(..)");
    target.resize(10_000, 5).expect("Failed to resize(..)");
    let capacity = target.capacity();

    target
        .try_clone_from(&source)
        .expect("Failed to try_clone_from(..)");

    assert_eq!(target.as_slice(), &[1, 2]);
    assert_eq!(target.capacity(), capacity);
}

#[test]
fn test_try_clone_from_empty_source_clears() {
    let source = VirtualArray::<u64>::new().expect("Failed to new()");
    let mut target = VirtualArray::<u64>::new().expect("Failed to new()");

    target.try_extend([1, 2, 3]).expect("Failed to try_extend(..)");
    target
        .try_clone_from(&source)
        .expect("Failed to try_clone_from(..)");

    assert!(target.is_empty());
}

#[test]
fn test_try_clone_from_beyond_ceiling_fails_untouched() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");
    let config = VirtualArrayConfig::new().with_max_capacity_bytes(page_size());
    let mut target = VirtualArray::<u64>::with_config(config).expect("Failed to with_config(..)");
    let max = target.max_len();

    source.resize(max + 1, 1).expect("Failed to resize(..)");
    target.try_extend([7, 8]).expect("Failed to try_extend(..)");

    assert_eq!(
        target.try_clone_from(&source),
        Err(VirtualArrayError::LengthOutOfRange {
            requested: max + 1,
            max
        })
    );
    assert_eq!(target.as_slice(), &[7, 8]);
}

#[test]
fn test_try_clone_from_clamps_capacity_to_ceiling() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");
    let config = VirtualArrayConfig::new().with_max_capacity_bytes(2 * page_size());
    let mut target = VirtualArray::<u64>::with_config(config).expect("Failed to with_config(..)");

    source.reserve(100_000).expect("Failed to reserve(..)");
    source.try_extend([1, 2, 3]).expect("Failed to try_extend(..)");

    target
        .try_clone_from(&source)
        .expect("Failed to try_clone_from(..)");

    assert_eq!(target.as_slice(), &[1, 2, 3]);
    assert_eq!(target.capacity(), target.max_len());
}

#[test]
fn test_try_clone_from_commit_failure_keeps_elements() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");
    let mut target = VirtualArray::<u64>::new().expect("Failed to new()");

    source.resize(10_000, 5).expect("Failed to resize(..)");
    target.try_extend([1, 2]).expect("Failed to try_extend(..)");
    target.change_behaviour(ReservationBehaviour::FailAtCommit);

    assert!(matches!(
        target.try_clone_from(&source),
        Err(VirtualArrayError::Allocation(_))
    ));
    assert_eq!(target.as_slice(), &[1, 2]);
}

#[test]
fn test_clone_from_trait() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");
    let mut target = VirtualArray::<u64>::new().expect("Failed to new()");

    source.try_extend([4, 5, 6]).expect("Failed to try_extend(..)");
    target.clone_from(&source);

    assert_eq!(target, [4, 5, 6]);
}

#[test]
#[should_panic(expected = "VirtualArray::clone_from failed")]
fn test_clone_from_trait_panics_on_failure() {
    let mut source = VirtualArray::<u64>::new().expect("Failed to new()");
    let mut target = VirtualArray::<u64>::new().expect("Failed to new()");

    source.resize(10, 1).expect("Failed to resize(..)");
    target.change_behaviour(ReservationBehaviour::FailAtCommit);

    target.clone_from(&source);
}
