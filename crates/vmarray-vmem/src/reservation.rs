// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Reservation - A reserved address range with on-demand commit.
//!
//! Wraps one reserve syscall with commit/release operations.
//! Each syscall is exposed separately for granular testing.

use core::ptr::NonNull;

use crate::error::VmError;
use crate::math::round_up_to_multiple;
use crate::sys;

/// Test behaviour for injecting failures in `Reservation` operations.
///
/// The behaviour is sticky - once set, it remains active until changed.
#[cfg(any(test, feature = "test_utils"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ReservationBehaviour {
    /// Normal behaviour - no injected failures.
    #[default]
    None,
    /// Every `commit()` call fails with `VmError::Commit` without touching the range.
    FailAtCommit,
}

/// A contiguous range of reserved, initially inaccessible address space.
///
/// The range is reserved once in [`Reservation::reserve`] and released exactly
/// once, either explicitly through [`Reservation::release`] or on drop.
/// Sub-ranges become readable and writable through [`Reservation::commit`].
#[derive(Debug)]
pub struct Reservation {
    base: NonNull<u8>,
    size: usize,
    page_size: usize,
    is_released: bool,
    #[cfg(any(test, feature = "test_utils"))]
    behaviour: ReservationBehaviour,
}

// Safety: Reservation is the sole owner of its address range.
unsafe impl Send for Reservation {}
unsafe impl Sync for Reservation {}

impl Reservation {
    /// Reserves `size` bytes of address space without committing any of it.
    ///
    /// `size` is rounded up to the page size.
    ///
    /// # Errors
    ///
    /// Returns [`VmError::Reserve`] if `size` is zero, overflows when rounded,
    /// or the platform refuses the reservation.
    pub fn reserve(size: usize) -> Result<Self, VmError> {
        let page_size = sys::page_size();
        let size = round_up_to_multiple(size, page_size)
            .filter(|size| *size != 0)
            .ok_or(VmError::Reserve { size })?;

        let base = unsafe { sys::reserve(size) }.ok_or(VmError::Reserve { size })?;

        log::trace!("reserved {size} bytes at {:p}", base);

        Ok(Self {
            base,
            size,
            page_size,
            is_released: false,
            #[cfg(any(test, feature = "test_utils"))]
            behaviour: ReservationBehaviour::default(),
        })
    }

    /// Backs `[offset, offset + len)` with physical memory and grants read/write access.
    ///
    /// `len` is rounded up to the page size. A zero `len` is a no-op. The whole
    /// range is committed by a single syscall, so on error nothing changed.
    ///
    /// # Errors
    ///
    /// - [`VmError::Unaligned`] if `offset` is not a multiple of the page size
    /// - [`VmError::OutOfBounds`] if the rounded range exceeds the reservation
    /// - [`VmError::Commit`] if the platform refuses to commit
    pub fn commit(&mut self, offset: usize, len: usize) -> Result<(), VmError> {
        if offset % self.page_size != 0 {
            return Err(VmError::Unaligned {
                offset,
                page_size: self.page_size,
            });
        }

        let out_of_bounds = VmError::OutOfBounds {
            offset,
            size: len,
            reserved: self.size,
        };

        let len = round_up_to_multiple(len, self.page_size).ok_or(out_of_bounds)?;
        let end = offset.checked_add(len).ok_or(out_of_bounds)?;

        if end > self.size || self.is_released {
            return Err(out_of_bounds);
        }

        if len == 0 {
            return Ok(());
        }

        #[cfg(any(test, feature = "test_utils"))]
        if matches!(self.behaviour, ReservationBehaviour::FailAtCommit) {
            return Err(VmError::Commit { offset, size: len });
        }

        // SAFETY: offset + len <= size, so the pointer stays inside the reservation.
        let addr = unsafe { self.base.add(offset) };
        let committed = unsafe { sys::commit(addr, len) };

        if !committed {
            return Err(VmError::Commit { offset, size: len });
        }

        Ok(())
    }

    /// Releases the whole reservation. Called in Drop.
    ///
    /// Idempotent: calls after the first are no-ops.
    pub fn release(&mut self) {
        if self.is_released {
            return;
        }

        unsafe { sys::release(self.base, self.size) };
        self.is_released = true;

        log::trace!("released {} bytes at {:p}", self.size, self.base);
    }

    /// Returns the first address of the reservation.
    #[inline]
    pub fn base(&self) -> NonNull<u8> {
        self.base
    }

    /// Returns the reserved size in bytes (a multiple of the page size).
    #[inline]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Returns the page size queried at reservation time.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Returns true once [`Reservation::release`] has run.
    #[inline]
    pub fn is_released(&self) -> bool {
        self.is_released
    }

    /// Changes the test behaviour for this reservation.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: ReservationBehaviour) {
        self.behaviour = behaviour;
    }
}

impl Drop for Reservation {
    fn drop(&mut self) {
        self.release();
    }
}
