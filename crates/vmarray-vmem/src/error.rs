// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for vmarray-vmem.
use thiserror::Error;

/// Errors from reserve/commit syscalls and range validation.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VmError {
    /// The platform refused to reserve the address range.
    #[error("failed to reserve {size} bytes of address space")]
    Reserve {
        /// Requested size in bytes (after page rounding).
        size: usize,
    },

    /// The platform refused to back the range with physical memory.
    #[error("failed to commit {size} bytes at offset {offset}")]
    Commit {
        /// Offset from the reservation base.
        offset: usize,
        /// Size in bytes (after page rounding).
        size: usize,
    },

    /// The requested range does not lie within the reservation.
    #[error("range of {size} bytes at offset {offset} exceeds reservation of {reserved} bytes")]
    OutOfBounds {
        /// Offset from the reservation base.
        offset: usize,
        /// Size in bytes (after page rounding).
        size: usize,
        /// Total reserved bytes.
        reserved: usize,
    },

    /// A commit offset that does not start on a page boundary.
    #[error("offset {offset} is not aligned to page size {page_size}")]
    Unaligned {
        /// Offset from the reservation base.
        offset: usize,
        /// Platform page size.
        page_size: usize,
    },
}
