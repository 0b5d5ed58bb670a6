// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for vmarray crates.
//!
//! ## License
//!
//! GPL-3.0-only

mod lifecycle;
mod subprocess;

pub use lifecycle::{LifecycleCounters, Tracked};
pub use subprocess::run_test_as_subprocess;
