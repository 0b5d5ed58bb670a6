// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Address-space reservation with on-demand commit.
//!
//! This crate is the thin platform layer under `vmarray`. It exposes the four
//! virtual-memory operations a growable in-place container needs:
//!
//! - **reserve**: claim a contiguous range of addresses with no physical backing
//!   and no access rights
//! - **commit**: back a page-aligned sub-range with physical memory, read/write
//! - **release**: give the whole range back in one call
//! - **page size**: the granularity every commit is rounded to
//!
//! # Platforms
//!
//! - Unix: `mmap(PROT_NONE)`, `mprotect(PROT_READ | PROT_WRITE)`, `munmap`,
//!   `sysconf(_SC_PAGESIZE)`
//! - Windows: `VirtualAlloc(MEM_RESERVE)`, `VirtualAlloc(MEM_COMMIT)`,
//!   `VirtualFree(MEM_RELEASE)`, `GetSystemInfo`
//!
//! # Example
//!
//! ```rust
//! use vmarray_vmem::{Reservation, VmError};
//!
//! fn example() -> Result<(), VmError> {
//!     let mut reservation = Reservation::reserve(16 * 1024 * 1024)?;
//!
//!     // Nothing is readable yet. Back the first page.
//!     reservation.commit(0, 1)?;
//!
//!     let first = reservation.base().as_ptr();
//!     unsafe {
//!         first.write(42);
//!         assert_eq!(first.read(), 42);
//!     }
//!
//!     // The whole range is released on drop
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod math;
mod reservation;
mod sys;

pub use error::VmError;
pub use math::{round_down_to_multiple, round_up_to_multiple};
pub use reservation::Reservation;

#[cfg(any(test, feature = "test_utils"))]
pub use reservation::ReservationBehaviour;

/// Returns the platform's page granularity in bytes.
///
/// Every commit is rounded up to a multiple of this value.
#[inline]
pub fn page_size() -> usize {
    sys::page_size()
}
