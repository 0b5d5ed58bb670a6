// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for vmarray.

use thiserror::Error;
use vmarray_vmem::VmError;

/// Error type for `VirtualArray` operations.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VirtualArrayError {
    /// The platform refused to reserve or commit memory.
    #[error("allocation failed: {0}")]
    Allocation(#[from] VmError),

    /// Growth would exceed the fixed address-space ceiling.
    #[error("capacity exceeded: requested {requested} elements, ceiling is {max}")]
    CapacityExceeded {
        /// Requested capacity in elements.
        requested: usize,
        /// Maximum number of elements the reservation can hold.
        max: usize,
    },

    /// An index outside `[0, len)`.
    #[error("index {index} out of range for length {len}")]
    IndexOutOfRange {
        /// Offending index.
        index: usize,
        /// Current length.
        len: usize,
    },

    /// An inclusive range `[begin, end]` that is inverted or reaches past `len`.
    #[error("range [{begin}, {end}] out of range for length {len}")]
    RangeOutOfBounds {
        /// First index of the range.
        begin: usize,
        /// Last index of the range (inclusive).
        end: usize,
        /// Current length.
        len: usize,
    },

    /// A requested length that can never fit in the reservation.
    #[error("length {requested} exceeds the maximum of {max} elements")]
    LengthOutOfRange {
        /// Requested length.
        requested: usize,
        /// Maximum number of elements the reservation can hold.
        max: usize,
    },

    /// Element alignment larger than the page size.
    #[error("element alignment {align} exceeds page size {page_size}")]
    UnsupportedAlignment {
        /// `align_of::<T>()`.
        align: usize,
        /// Platform page size.
        page_size: usize,
    },

    /// A configuration value that cannot produce a usable array.
    #[error("invalid configuration: {0}")]
    InvalidConfig(&'static str),
}
