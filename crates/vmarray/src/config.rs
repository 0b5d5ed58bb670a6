// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! VirtualArray configuration parameters.

use crate::error::VirtualArrayError;

/// Configuration for a [`VirtualArray`](crate::VirtualArray).
///
/// Validated at construction; immutable for the lifetime of the array.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct VirtualArrayConfig {
    max_capacity_bytes: usize,
    min_growth_elements: usize,
}

impl VirtualArrayConfig {
    /// Default address-space ceiling: 1 GiB.
    pub const DEFAULT_MAX_CAPACITY_BYTES: usize = 1024 * 1024 * 1024;

    /// Default number of slots committed by the first push into an empty array.
    pub const DEFAULT_MIN_GROWTH_ELEMENTS: usize = 8;

    /// Creates a config with default values.
    pub const fn new() -> Self {
        Self {
            max_capacity_bytes: Self::DEFAULT_MAX_CAPACITY_BYTES,
            min_growth_elements: Self::DEFAULT_MIN_GROWTH_ELEMENTS,
        }
    }

    /// Sets the size of the reserved address range.
    ///
    /// Rounded up to the page size when the array reserves it.
    pub const fn with_max_capacity_bytes(mut self, max_capacity_bytes: usize) -> Self {
        self.max_capacity_bytes = max_capacity_bytes;
        self
    }

    /// Sets the minimum number of slots a push-triggered growth adds.
    pub const fn with_min_growth_elements(mut self, min_growth_elements: usize) -> Self {
        self.min_growth_elements = min_growth_elements;
        self
    }

    /// Size of the reserved address range in bytes, before page rounding.
    pub const fn max_capacity_bytes(&self) -> usize {
        self.max_capacity_bytes
    }

    /// Minimum number of slots a push-triggered growth adds.
    pub const fn min_growth_elements(&self) -> usize {
        self.min_growth_elements
    }

    pub(crate) fn validate(&self) -> Result<(), VirtualArrayError> {
        if self.max_capacity_bytes == 0 {
            return Err(VirtualArrayError::InvalidConfig(
                "max_capacity_bytes must be non-zero",
            ));
        }

        if self.min_growth_elements == 0 {
            return Err(VirtualArrayError::InvalidConfig(
                "min_growth_elements must be non-zero",
            ));
        }

        Ok(())
    }
}

impl Default for VirtualArrayConfig {
    fn default() -> Self {
        Self::new()
    }
}
