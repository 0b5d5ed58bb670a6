// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::marker::PhantomData;
use core::mem::{align_of, size_of};
use core::ops::{Deref, DerefMut};
use core::ptr;
use core::slice;

use vmarray_vmem::{Reservation, round_down_to_multiple, round_up_to_multiple};

#[cfg(any(test, feature = "test_utils"))]
use vmarray_vmem::ReservationBehaviour;

use crate::config::VirtualArrayConfig;
use crate::error::VirtualArrayError;

/// A growable array backed by a fixed virtual address reservation.
///
/// The whole address range is reserved once at construction. Growth commits
/// further pages at the end of the committed prefix, so elements are never
/// relocated and capacity never shrinks. The reserved range and every live
/// element are released together on drop.
///
/// Layout of the reservation:
///
/// ```text
/// base                      base + committed_bytes          base + reserved_bytes
/// |--- len live elements ---|--- uninit slots ---|--- reserved, no access ---|
/// |<------------ capacity * stride ------------->|
/// ```
///
/// # Example
///
/// ```rust
/// use vmarray::{VirtualArray, VirtualArrayError};
///
/// fn example() -> Result<(), VirtualArrayError> {
///     let mut array = VirtualArray::<u64>::new()?;
///
///     array.push(123)?;
///     array.push(456)?;
///     array.push(789)?;
///
///     array.erase(1)?;
///     assert_eq!(array.as_slice(), &[123, 789]);
///
///     // The first push committed a whole page
///     assert!(array.capacity() >= 8);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct VirtualArray<T> {
    reservation: Reservation,
    committed_bytes: usize,
    len: usize,
    capacity: usize,
    config: VirtualArrayConfig,
    _marker: PhantomData<T>,
}

impl<T> VirtualArray<T> {
    const STRIDE: usize = {
        assert!(
            size_of::<T>() != 0,
            "VirtualArray does not support zero-sized element types"
        );
        size_of::<T>()
    };

    /// Creates an empty array over a 1 GiB reservation.
    ///
    /// No physical memory is committed until the first growth.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualArrayError::Allocation`] if the address range cannot be reserved.
    pub fn new() -> Result<Self, VirtualArrayError> {
        Self::with_config(VirtualArrayConfig::default())
    }

    /// Creates an empty array using the given configuration.
    ///
    /// # Errors
    ///
    /// - [`VirtualArrayError::InvalidConfig`] if the config fails validation
    /// - [`VirtualArrayError::UnsupportedAlignment`] if `T` is aligned beyond a page
    /// - [`VirtualArrayError::Allocation`] if the address range cannot be reserved
    ///
    /// # Example
    ///
    /// ```rust
    /// use vmarray::{VirtualArray, VirtualArrayConfig};
    ///
    /// let config = VirtualArrayConfig::new().with_max_capacity_bytes(64 * 1024);
    /// let array = VirtualArray::<u32>::with_config(config).unwrap();
    ///
    /// assert_eq!(array.capacity(), 0);
    /// assert!(array.max_len() >= 16 * 1024);
    /// ```
    pub fn with_config(config: VirtualArrayConfig) -> Result<Self, VirtualArrayError> {
        let stride = Self::STRIDE;

        config.validate()?;

        let page_size = vmarray_vmem::page_size();
        let align = align_of::<T>();

        if align > page_size {
            return Err(VirtualArrayError::UnsupportedAlignment { align, page_size });
        }

        let reservation = Reservation::reserve(config.max_capacity_bytes())?;

        log::trace!(
            "virtual array reserved {} bytes for elements of {stride} bytes",
            reservation.size()
        );

        Ok(Self {
            reservation,
            committed_bytes: 0,
            len: 0,
            capacity: 0,
            config,
            _marker: PhantomData,
        })
    }

    /// Returns a pointer to the slot at `index`.
    ///
    /// # Safety
    /// `index` must not exceed `max_len()`.
    #[inline(always)]
    unsafe fn slot(&self, index: usize) -> *mut T {
        let base = self.reservation.base().as_ptr();

        // SAFETY: index <= max_len keeps the byte offset inside the reservation.
        unsafe { base.add(index * Self::STRIDE).cast::<T>() }
    }

    /// Commits at least `additional_bytes` past the committed prefix.
    ///
    /// The request is rounded up to the page size and clamped to the space
    /// left in the reservation. On error nothing changed.
    #[cold]
    #[inline(never)]
    fn grow_by_bytes(&mut self, additional_bytes: usize) -> Result<(), VirtualArrayError> {
        if additional_bytes == 0 {
            return Ok(());
        }

        let page_size = self.reservation.page_size();
        let remaining = self.reservation.size() - self.committed_bytes;

        if remaining == 0 {
            return Err(VirtualArrayError::CapacityExceeded {
                requested: self
                    .capacity
                    .saturating_add(additional_bytes.div_ceil(Self::STRIDE)),
                max: self.max_len(),
            });
        }

        let mut grow_bytes = round_up_to_multiple(additional_bytes, page_size).unwrap_or(usize::MAX);

        if grow_bytes > remaining {
            let clamped = round_down_to_multiple(remaining, page_size);

            log::warn!(
                "growth of {grow_bytes} bytes clamped to the {clamped} bytes left in the reservation"
            );

            grow_bytes = clamped;
        }

        self.reservation.commit(self.committed_bytes, grow_bytes)?;

        self.committed_bytes += grow_bytes;
        // Floors any partial trailing element.
        self.capacity = self.committed_bytes / Self::STRIDE;

        log::debug!(
            "committed {grow_bytes} bytes, {} of {} bytes in use, capacity {}",
            self.committed_bytes,
            self.reservation.size(),
            self.capacity
        );

        Ok(())
    }

    /// Returns the number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the array holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots backed by committed memory.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Returns the largest number of elements the reservation can ever hold.
    #[inline]
    pub fn max_len(&self) -> usize {
        self.reservation.size() / Self::STRIDE
    }

    /// Returns the number of committed bytes.
    #[inline]
    pub fn committed_bytes(&self) -> usize {
        self.committed_bytes
    }

    /// Returns the number of reserved bytes (page rounded).
    #[inline]
    pub fn reserved_bytes(&self) -> usize {
        self.reservation.size()
    }

    /// Returns the page size every commit is rounded to.
    #[inline]
    pub fn page_size(&self) -> usize {
        self.reservation.page_size()
    }

    /// Returns the configuration this array was created with.
    #[inline]
    pub fn config(&self) -> &VirtualArrayConfig {
        &self.config
    }

    /// Appends `value`, committing more pages when the array is full.
    ///
    /// A full array grows by `max(capacity, min_growth_elements)` slots, rounded
    /// up to whole pages and clamped to the reservation.
    ///
    /// # Errors
    ///
    /// - [`VirtualArrayError::CapacityExceeded`] if the reservation is full
    /// - [`VirtualArrayError::Allocation`] if the platform refuses to commit
    ///
    /// On error `value` is dropped and the array is unchanged.
    pub fn push(&mut self, value: T) -> Result<(), VirtualArrayError> {
        if self.len == self.capacity {
            let max = self.max_len();

            if self.len == max {
                return Err(VirtualArrayError::CapacityExceeded {
                    requested: self.len + 1,
                    max,
                });
            }

            let additional = self.capacity.max(self.config.min_growth_elements());
            self.grow_by_bytes(additional.saturating_mul(Self::STRIDE))?;
        }

        // SAFETY: len < capacity, so the slot is committed and holds no value.
        unsafe { self.slot(self.len).write(value) };
        self.len += 1;

        Ok(())
    }

    /// Removes and returns the last element.
    pub fn pop(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        self.len -= 1;

        // SAFETY: the slot held a live value and is now outside len.
        Some(unsafe { self.slot(self.len).read() })
    }

    /// Ensures `capacity() >= capacity` without touching any element.
    ///
    /// Commits `(capacity - self.capacity()) * size_of::<T>()` bytes rounded up
    /// to the page size. Never decreases capacity.
    ///
    /// # Errors
    ///
    /// - [`VirtualArrayError::CapacityExceeded`] if `capacity > max_len()`
    /// - [`VirtualArrayError::Allocation`] if the platform refuses to commit
    ///
    /// # Example
    ///
    /// ```rust
    /// use vmarray::VirtualArray;
    ///
    /// let mut array = VirtualArray::<u32>::new().unwrap();
    /// array.reserve(100).unwrap();
    ///
    /// // One whole page worth of u32 slots
    /// assert_eq!(array.capacity(), array.page_size() / 4);
    /// ```
    pub fn reserve(&mut self, capacity: usize) -> Result<(), VirtualArrayError> {
        if capacity <= self.capacity {
            return Ok(());
        }

        let max = self.max_len();

        if capacity > max {
            return Err(VirtualArrayError::CapacityExceeded {
                requested: capacity,
                max,
            });
        }

        self.grow_by_bytes((capacity - self.capacity) * Self::STRIDE)
    }

    /// Resizes to `new_len`, cloning `value` into every new slot.
    ///
    /// Shrinking drops the trailing elements in ascending index order and keeps
    /// the capacity.
    ///
    /// # Errors
    ///
    /// - [`VirtualArrayError::LengthOutOfRange`] if `new_len > max_len()`
    /// - [`VirtualArrayError::Allocation`] if the platform refuses to commit
    pub fn resize(&mut self, new_len: usize, value: T) -> Result<(), VirtualArrayError>
    where
        T: Clone,
    {
        self.resize_with(new_len, || value.clone())
    }

    /// Resizes to `new_len`, filling new slots with `T::default()`.
    ///
    /// # Errors
    ///
    /// Same as [`VirtualArray::resize`].
    pub fn resize_default(&mut self, new_len: usize) -> Result<(), VirtualArrayError>
    where
        T: Default,
    {
        self.resize_with(new_len, T::default)
    }

    /// Resizes to `new_len`, filling new slots with values returned by `f`.
    ///
    /// `f` is called once per new slot, in index order.
    ///
    /// # Errors
    ///
    /// Same as [`VirtualArray::resize`].
    pub fn resize_with<F>(&mut self, new_len: usize, mut f: F) -> Result<(), VirtualArrayError>
    where
        F: FnMut() -> T,
    {
        let max = self.max_len();

        if new_len > max {
            return Err(VirtualArrayError::LengthOutOfRange {
                requested: new_len,
                max,
            });
        }

        if new_len <= self.len {
            self.truncate(new_len);
            return Ok(());
        }

        self.reserve(new_len)?;

        while self.len < new_len {
            let value = f();

            // SAFETY: len < new_len <= capacity.
            unsafe { self.slot(self.len).write(value) };
            self.len += 1;
        }

        Ok(())
    }

    /// Drops every element at index `>= len`, in ascending order. Keeps the capacity.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len {
            return;
        }

        let count = self.len - len;

        unsafe {
            // SAFETY: [len, self.len) are live and inside the committed prefix.
            let tail = ptr::slice_from_raw_parts_mut(self.slot(len), count);

            // A panicking drop leaks the rest of the tail instead of dropping twice.
            self.len = len;
            ptr::drop_in_place(tail);
        }
    }

    /// Drops every element. Keeps the capacity.
    pub fn clear(&mut self) {
        self.truncate(0);
    }

    /// Removes the element at `index`, shifting every later element one slot
    /// toward the front.
    ///
    /// Drops exactly one element and preserves order. O(len - index).
    ///
    /// # Errors
    ///
    /// Returns [`VirtualArrayError::IndexOutOfRange`] if `index >= len()`.
    pub fn erase(&mut self, index: usize) -> Result<(), VirtualArrayError> {
        if index >= self.len {
            return Err(VirtualArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let trailing = self.len - index - 1;

        unsafe {
            let hole = self.slot(index);
            let removed = hole.read();

            // SAFETY: [index + 1, len) are live; the move overlaps, hence copy.
            ptr::copy(hole.add(1), hole, trailing);
            self.len -= 1;

            drop(removed);
        }

        Ok(())
    }

    /// Removes the inclusive index range `[begin, end]`, shifting the trailing
    /// block toward the front.
    ///
    /// `erase_range(i, i)` removes exactly the element at `i`. Drops
    /// `end - begin + 1` elements in ascending order and preserves the order of
    /// the rest.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualArrayError::RangeOutOfBounds`] if `end < begin` or `end >= len()`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use vmarray::VirtualArray;
    ///
    /// let mut array = VirtualArray::<u64>::new().unwrap();
    /// array.try_extend([123, 456, 789, 123456789]).unwrap();
    ///
    /// array.erase_range(1, 2).unwrap();
    /// assert_eq!(array.as_slice(), &[123, 123456789]);
    /// ```
    pub fn erase_range(&mut self, begin: usize, end: usize) -> Result<(), VirtualArrayError> {
        if end < begin || end >= self.len {
            return Err(VirtualArrayError::RangeOutOfBounds {
                begin,
                end,
                len: self.len,
            });
        }

        let count = end - begin + 1;
        let trailing = self.len - end - 1;

        unsafe {
            let first = self.slot(begin);

            // A panicking drop leaks the trailing block instead of dropping twice.
            self.len = begin;
            ptr::drop_in_place(ptr::slice_from_raw_parts_mut(first, count));

            ptr::copy(first.add(count), first, trailing);
            self.len = begin + trailing;
        }

        Ok(())
    }

    /// Removes the element at `index` by moving the last element into its slot.
    ///
    /// O(1); does not preserve order.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualArrayError::IndexOutOfRange`] if `index >= len()`.
    pub fn erase_by_swap(&mut self, index: usize) -> Result<(), VirtualArrayError> {
        if index >= self.len {
            return Err(VirtualArrayError::IndexOutOfRange {
                index,
                len: self.len,
            });
        }

        let last = self.len - 1;

        unsafe {
            let hole = self.slot(index);
            let removed = hole.read();

            if index != last {
                ptr::copy_nonoverlapping(self.slot(last), hole, 1);
            }

            self.len = last;

            drop(removed);
        }

        Ok(())
    }

    /// Appends every value of `iter`.
    ///
    /// Reserves for the iterator's lower size bound first, then pushes.
    ///
    /// # Errors
    ///
    /// Same as [`VirtualArray::push`]. Values appended before the error stay.
    pub fn try_extend<I>(&mut self, iter: I) -> Result<(), VirtualArrayError>
    where
        I: IntoIterator<Item = T>,
    {
        let iter = iter.into_iter();
        let (lower, _) = iter.size_hint();

        self.reserve(self.len.saturating_add(lower).min(self.max_len()))?;

        for value in iter {
            self.push(value)?;
        }

        Ok(())
    }

    /// Creates a deep copy over a fresh reservation of the same size.
    ///
    /// The copy reserves the source's capacity first, then clones every element
    /// in order.
    ///
    /// # Errors
    ///
    /// Returns [`VirtualArrayError::Allocation`] if the platform refuses memory.
    pub fn try_clone(&self) -> Result<Self, VirtualArrayError>
    where
        T: Clone,
    {
        let mut copy = Self::with_config(self.config)?;

        copy.reserve(self.capacity)?;

        for value in self.iter() {
            copy.push(value.clone())?;
        }

        Ok(copy)
    }

    /// Replaces the contents with clones of `source`'s elements.
    ///
    /// Grows to `source.capacity()` (bounded by this array's ceiling) when that
    /// is larger; never shrinks. Every current element is dropped before the
    /// clones are appended.
    ///
    /// # Errors
    ///
    /// - [`VirtualArrayError::LengthOutOfRange`] if `source.len()` exceeds this array's ceiling
    /// - [`VirtualArrayError::Allocation`] if the platform refuses to commit
    ///
    /// Both are reported before any element is dropped.
    pub fn try_clone_from(&mut self, source: &Self) -> Result<(), VirtualArrayError>
    where
        T: Clone,
    {
        let max = self.max_len();

        if source.len > max {
            return Err(VirtualArrayError::LengthOutOfRange {
                requested: source.len,
                max,
            });
        }

        if source.capacity > self.capacity {
            self.reserve(source.capacity.min(max))?;
        }

        self.clear();

        for value in source.iter() {
            self.push(value.clone())?;
        }

        Ok(())
    }

    /// Returns a raw pointer to the first slot.
    #[inline]
    pub fn as_ptr(&self) -> *const T {
        self.reservation.base().as_ptr().cast::<T>()
    }

    /// Returns a raw mutable pointer to the first slot.
    #[inline]
    pub fn as_mut_ptr(&mut self) -> *mut T {
        self.reservation.base().as_ptr().cast::<T>()
    }

    /// Returns the live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: [0, len) are live; base is non-null and page aligned.
        unsafe { slice::from_raw_parts(self.as_ptr(), self.len) }
    }

    /// Returns the live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: [0, len) are live; &mut self guarantees exclusive access.
        unsafe { slice::from_raw_parts_mut(self.as_mut_ptr(), self.len) }
    }

    /// Changes the test behaviour of the underlying reservation.
    #[cfg(any(test, feature = "test_utils"))]
    pub fn change_behaviour(&mut self, behaviour: ReservationBehaviour) {
        self.reservation.change_behaviour(behaviour);
    }
}

impl<T> Drop for VirtualArray<T> {
    fn drop(&mut self) {
        self.truncate(0);
        self.reservation.release();
    }
}

impl<T: Clone> Clone for VirtualArray<T> {
    fn clone(&self) -> Self {
        match self.try_clone() {
            Ok(copy) => copy,
            Err(e) => panic!("VirtualArray::clone failed: {e}"),
        }
    }

    fn clone_from(&mut self, source: &Self) {
        if let Err(e) = self.try_clone_from(source) {
            panic!("VirtualArray::clone_from failed: {e}");
        }
    }
}

impl<T> Deref for VirtualArray<T> {
    type Target = [T];

    fn deref(&self) -> &Self::Target {
        self.as_slice()
    }
}

impl<T> DerefMut for VirtualArray<T> {
    fn deref_mut(&mut self) -> &mut Self::Target {
        self.as_mut_slice()
    }
}

impl<'a, T> IntoIterator for &'a VirtualArray<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut VirtualArray<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: PartialEq> PartialEq for VirtualArray<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Eq> Eq for VirtualArray<T> {}

impl<T: PartialEq> PartialEq<[T]> for VirtualArray<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: PartialEq, const N: usize> PartialEq<[T; N]> for VirtualArray<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: core::fmt::Debug> core::fmt::Debug for VirtualArray<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("VirtualArray")
            .field("data", &self.as_slice())
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("reserved_bytes", &self.reserved_bytes())
            .finish()
    }
}
