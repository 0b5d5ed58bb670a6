// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ptr::{self, NonNull};

#[cfg(any(target_os = "linux", target_os = "android"))]
const MAP_RESERVE_FLAGS: libc::c_int =
    libc::MAP_PRIVATE | libc::MAP_ANONYMOUS | libc::MAP_NORESERVE;

#[cfg(not(any(target_os = "linux", target_os = "android")))]
const MAP_RESERVE_FLAGS: libc::c_int = libc::MAP_PRIVATE | libc::MAP_ANONYMOUS;

pub(crate) fn page_size() -> usize {
    unsafe { libc::sysconf(libc::_SC_PAGESIZE) as usize }
}

/// Maps `size` bytes with `PROT_NONE`.
///
/// # Safety
/// `size` must be non-zero and a multiple of the page size.
pub(crate) unsafe fn reserve(size: usize) -> Option<NonNull<u8>> {
    let ptr = unsafe {
        libc::mmap(
            ptr::null_mut(),
            size,
            libc::PROT_NONE,
            MAP_RESERVE_FLAGS,
            -1,
            0,
        )
    };

    if ptr == libc::MAP_FAILED {
        return None;
    }

    NonNull::new(ptr as *mut u8)
}

/// Grants read/write access to `[addr, addr + size)`.
///
/// # Safety
/// The range must be page aligned and lie within a live reservation.
pub(crate) unsafe fn commit(addr: NonNull<u8>, size: usize) -> bool {
    let result = unsafe {
        libc::mprotect(
            addr.as_ptr() as *mut libc::c_void,
            size,
            libc::PROT_READ | libc::PROT_WRITE,
        )
    };

    result == 0
}

/// Unmaps the whole reservation.
///
/// # Safety
/// `base` and `size` must describe a live reservation; no pointer into it may
/// be used afterwards.
pub(crate) unsafe fn release(base: NonNull<u8>, size: usize) {
    unsafe { libc::munmap(base.as_ptr() as *mut libc::c_void, size) };
}
