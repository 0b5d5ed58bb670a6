// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use crate::{ReservationBehaviour, VirtualArray, VirtualArrayConfig, VirtualArrayError, page_size};

#[test]
fn test_resize_grows_with_fill_value() {
    let mut array = VirtualArray::<u64>::new().expect("Failed to new()");

    array.resize(2500, 42).expect("Failed to resize(2500, 42)");

    assert_eq!(array.len(), 2500);
    assert!(array.capacity() >= 2500);
    assert!(array.iter().all(|v| *v == 42));
}

#[test]
fn test_resize_keeps_existing_elements() {
    let mut array = VirtualArray::<u64>::new().expect("Failed to new()");

    array.try_extend([1, 2, 3]).expect("Failed to try_extend(..)");
    array.resize(6, 9).expect("Failed to resize(6, 9)");

    assert_eq!(array.as_slice(), &[1, 2, 3, 9, 9, 9]);
}

#[test]
fn test_resize_shrink_keeps_capacity() {
    let mut array = VirtualArray::<u64>::new().expect("Failed to new()");

    array.resize(2500, 7).expect("Failed to resize(2500, 7)");
    let capacity = array.capacity();

    array.resize(500, 0).expect("Failed to resize(500, 0)");

    assert_eq!(array.len(), 500);
    assert_eq!(array.capacity(), capacity);
    assert!(array.iter().all(|v| *v == 7));
}

#[test]
fn test_resize_same_length_is_noop() {
    let mut array = VirtualArray::<u64>::new().expect("Failed to new()");

    array.try_extend([1, 2, 3]).expect("Failed to try_extend(..)");
    let capacity = array.capacity();

    array.resize(3, 100).expect("Failed to resize(3, 100)");

    assert_eq!(array.as_slice(), &[1, 2, 3]);
    assert_eq!(array.capacity(), capacity);
}

#[test]
fn test_resize_to_zero() {
    let mut array = VirtualArray::<u64>::new().expect("Failed to new()");

    array.resize(100, 1).expect("Failed to resize(100, 1)");
    array.resize(0, 1).expect("Failed to resize(0, 1)");

    assert!(array.is_empty());
    assert!(array.capacity() >= 100);
}

#[test]
fn test_resize_commits_exact_pages() {
    let mut array = VirtualArray::<u32>::new().expect("Failed to new()");
    let per_page = page_size() / 4;

    array.resize(per_page + 1, 0).expect("Failed to resize(..)");

    assert_eq!(array.committed_bytes(), 2 * page_size());
    assert_eq!(array.capacity(), 2 * per_page);
}

#[test]
fn test_resize_default() {
    let mut array = VirtualArray::<String>::new().expect("Failed to new()");

    array.push("head".to_string()).expect("Failed to push(..)");
    array.resize_default(3).expect("Failed to resize_default(3)");

    assert_eq!(array.as_slice(), &["head", "", ""]);
}

#[test]
fn test_resize_with_calls_closure_in_order() {
    let mut array = VirtualArray::<u32>::new().expect("Failed to new()");
    let mut next = 0;

    array
        .resize_with(5, || {
            next += 1;
            next
        })
        .expect("Failed to resize_with(..)");

    assert_eq!(array.as_slice(), &[1, 2, 3, 4, 5]);
}

#[test]
fn test_resize_beyond_max_fails() {
    let config = VirtualArrayConfig::new().with_max_capacity_bytes(page_size());
    let mut array = VirtualArray::<u64>::with_config(config).expect("Failed to with_config(..)");
    let max = array.max_len();

    array.push(1).expect("Failed to push(1)");

    assert_eq!(
        array.resize(max + 1, 0),
        Err(VirtualArrayError::LengthOutOfRange {
            requested: max + 1,
            max
        })
    );
    assert_eq!(array.as_slice(), &[1]);

    array.resize(max, 0).expect("Failed to resize(max, 0)");
    assert_eq!(array.len(), max);
}

#[test]
fn test_resize_fails_when_commit_fails() {
    let mut array = VirtualArray::<u64>::new().expect("Failed to new()");

    array.change_behaviour(ReservationBehaviour::FailAtCommit);

    assert!(matches!(
        array.resize(10, 1),
        Err(VirtualArrayError::Allocation(_))
    ));
    assert!(array.is_empty());
    assert_eq!(array.capacity(), 0);
}
