// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable array that never relocates its elements.
//!
//! `VirtualArray<T>` reserves a large, fixed range of virtual address space up
//! front (1 GiB by default) and commits physical pages at the end of it as
//! elements are appended. Growth never copies: existing elements stay where
//! they are, and the only cost of a capacity increase is one commit syscall.
//!
//! # Core Guarantees
//!
//! - **Fixed ceiling**: the reservation is chosen once at construction. Growth
//!   past `max_len()` fails with [`VirtualArrayError::CapacityExceeded`].
//! - **Monotonic capacity**: `push`, `reserve` and `resize` only ever add
//!   committed pages. Shrinking (`resize`, `truncate`, `erase*`, `clear`,
//!   `clone_from`) keeps the capacity.
//! - **Page granularity**: every commit is rounded up to the platform page size,
//!   so capacity grows in whole pages worth of slots.
//! - **Fallible operations**: every mutator returns a `Result` and leaves the
//!   array unchanged on error.
//! - **Ordered destruction**: elements are dropped in ascending index order,
//!   then the whole reservation is released in one call.
//!
//! # Example: Basic Usage
//!
//! ```rust
//! use vmarray::{VirtualArray, VirtualArrayError};
//!
//! fn example() -> Result<(), VirtualArrayError> {
//!     let mut array = VirtualArray::<u64>::new()?;
//!
//!     for i in 0..1000 {
//!         array.push(i)?;
//!     }
//!
//!     assert_eq!(array.len(), 1000);
//!     assert_eq!(array[999], 999);
//!
//!     // O(1) removal: the last element takes the hole
//!     array.erase_by_swap(0)?;
//!     assert_eq!(array[0], 999);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Example: Bounded Reservation
//!
//! ```rust
//! use vmarray::{VirtualArray, VirtualArrayConfig, VirtualArrayError};
//!
//! fn example() -> Result<(), VirtualArrayError> {
//!     let page_size = vmarray::page_size();
//!     let config = VirtualArrayConfig::new().with_max_capacity_bytes(page_size);
//!     let mut array = VirtualArray::<u8>::with_config(config)?;
//!
//!     array.resize(page_size, 0)?;
//!
//!     // The reservation is full
//!     assert!(matches!(
//!         array.push(1),
//!         Err(VirtualArrayError::CapacityExceeded { .. })
//!     ));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Test Utilities
//!
//! Enable the `test_utils` feature to inject commit failures:
//!
//! ```toml
//! [dev-dependencies]
//! vmarray = { version = "*", features = ["test_utils"] }
//! ```
//!
//! Then use [`ReservationBehaviour`] to test error scenarios:
//!
//! ```rust
//! // test_utils feature required in dev-dependencies
//! #[cfg(test)]
//! mod tests {
//!     use vmarray::{ReservationBehaviour, VirtualArray};
//!
//!     #[test]
//!     fn test_handles_commit_failure() {
//!         let mut array = VirtualArray::<u8>::new().unwrap();
//!         array.change_behaviour(ReservationBehaviour::FailAtCommit);
//!
//!         assert!(array.push(1).is_err());
//!     }
//! }
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

mod config;
mod error;
mod virtual_array;

#[cfg(test)]
mod tests;

pub use config::VirtualArrayConfig;
pub use error::VirtualArrayError;
pub use virtual_array::VirtualArray;
pub use vmarray_vmem::{VmError, page_size};

#[cfg(any(test, feature = "test_utils"))]
pub use vmarray_vmem::ReservationBehaviour;
