// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::ffi::c_void;
use core::mem::MaybeUninit;
use core::ptr::{self, NonNull};

use windows_sys::Win32::System::Memory::{
    MEM_COMMIT, MEM_RELEASE, MEM_RESERVE, PAGE_NOACCESS, PAGE_READWRITE, VirtualAlloc,
    VirtualFree,
};
use windows_sys::Win32::System::SystemInformation::{GetSystemInfo, SYSTEM_INFO};

pub(crate) fn page_size() -> usize {
    let mut info = MaybeUninit::<SYSTEM_INFO>::uninit();

    unsafe {
        GetSystemInfo(info.as_mut_ptr());
        info.assume_init().dwPageSize as usize
    }
}

/// Reserves `size` bytes with `PAGE_NOACCESS`.
///
/// # Safety
/// `size` must be non-zero and a multiple of the page size.
pub(crate) unsafe fn reserve(size: usize) -> Option<NonNull<u8>> {
    let ptr = unsafe { VirtualAlloc(ptr::null(), size, MEM_RESERVE, PAGE_NOACCESS) };

    NonNull::new(ptr as *mut u8)
}

/// Commits `[addr, addr + size)` with `PAGE_READWRITE`.
///
/// # Safety
/// The range must be page aligned and lie within a live reservation.
pub(crate) unsafe fn commit(addr: NonNull<u8>, size: usize) -> bool {
    let ptr = unsafe {
        VirtualAlloc(
            addr.as_ptr() as *const c_void,
            size,
            MEM_COMMIT,
            PAGE_READWRITE,
        )
    };

    !ptr.is_null()
}

/// Releases the whole reservation.
///
/// # Safety
/// `base` must be the base of a live reservation; no pointer into it may be
/// used afterwards.
pub(crate) unsafe fn release(base: NonNull<u8>, _size: usize) {
    // MEM_RELEASE requires a zero size and frees every page in the region.
    unsafe { VirtualFree(base.as_ptr() as *mut c_void, 0, MEM_RELEASE) };
}
