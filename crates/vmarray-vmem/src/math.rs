// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

/// Rounds `value` up to the next multiple of `multiple`.
///
/// Returns `value` unchanged when `multiple == 0`, and `None` if the result
/// does not fit in a `usize`.
///
/// # Example
///
/// ```rust
/// use vmarray_vmem::round_up_to_multiple;
///
/// assert_eq!(round_up_to_multiple(1, 4096), Some(4096));
/// assert_eq!(round_up_to_multiple(4096, 4096), Some(4096));
/// assert_eq!(round_up_to_multiple(usize::MAX, 4096), None);
/// ```
#[inline]
pub fn round_up_to_multiple(value: usize, multiple: usize) -> Option<usize> {
    if multiple == 0 {
        return Some(value);
    }

    match value % multiple {
        0 => Some(value),
        remainder => value.checked_add(multiple - remainder),
    }
}

/// Rounds `value` down to the previous multiple of `multiple`.
///
/// Returns `value` unchanged when `multiple == 0`.
///
/// # Example
///
/// ```rust
/// use vmarray_vmem::round_down_to_multiple;
///
/// assert_eq!(round_down_to_multiple(4097, 4096), 4096);
/// assert_eq!(round_down_to_multiple(4095, 4096), 0);
/// ```
#[inline]
pub fn round_down_to_multiple(value: usize, multiple: usize) -> usize {
    if multiple == 0 {
        return value;
    }

    value - value % multiple
}
