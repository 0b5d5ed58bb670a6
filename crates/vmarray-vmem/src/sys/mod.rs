// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Platform syscall wrappers.
//!
//! Each backend provides the same four functions:
//!
//! - `page_size() -> usize`
//! - `reserve(size) -> Option<NonNull<u8>>`
//! - `commit(addr, size) -> bool`
//! - `release(base, size)`

#[cfg(unix)]
mod unix;

#[cfg(windows)]
mod windows;

#[cfg(unix)]
pub(crate) use unix::{commit, page_size, release, reserve};

#[cfg(windows)]
pub(crate) use windows::{commit, page_size, release, reserve};

#[cfg(not(any(unix, windows)))]
compile_error!("vmarray-vmem supports Unix and Windows targets only");
