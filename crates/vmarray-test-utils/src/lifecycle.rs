// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Element lifecycle instrumentation.
//!
//! [`Tracked`] values report every construction, clone and drop into a
//! test-owned [`LifecycleCounters`]. Counters are shared explicitly through an
//! `Rc`, so tests never depend on process-wide statics and can run in parallel.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

/// Construction/clone/drop counters for [`Tracked`] elements.
#[derive(Debug, Default)]
pub struct LifecycleCounters {
    constructed: Cell<usize>,
    cloned: Cell<usize>,
    dropped: Cell<usize>,
    drop_order: RefCell<Vec<usize>>,
}

impl LifecycleCounters {
    /// Creates a fresh, shareable set of counters.
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Number of `Tracked::new` calls.
    pub fn constructed(&self) -> usize {
        self.constructed.get()
    }

    /// Number of `Tracked::clone` calls.
    pub fn cloned(&self) -> usize {
        self.cloned.get()
    }

    /// Number of drops.
    pub fn dropped(&self) -> usize {
        self.dropped.get()
    }

    /// Values of dropped elements, in drop order.
    pub fn drop_order(&self) -> Vec<usize> {
        self.drop_order.borrow().clone()
    }

    /// Number of constructed or cloned values not yet dropped.
    pub fn live(&self) -> usize {
        self.constructed() + self.cloned() - self.dropped()
    }

    /// Resets every counter to zero.
    pub fn reset(&self) {
        self.constructed.set(0);
        self.cloned.set(0);
        self.dropped.set(0);
        self.drop_order.borrow_mut().clear();
    }
}

/// An element type that reports its lifecycle into [`LifecycleCounters`].
#[derive(Debug)]
pub struct Tracked {
    /// Payload, also recorded on drop.
    pub value: usize,
    counters: Rc<LifecycleCounters>,
}

impl Tracked {
    /// Constructs a new tracked value.
    pub fn new(value: usize, counters: &Rc<LifecycleCounters>) -> Self {
        counters.constructed.set(counters.constructed.get() + 1);

        Self {
            value,
            counters: Rc::clone(counters),
        }
    }
}

impl Clone for Tracked {
    fn clone(&self) -> Self {
        self.counters.cloned.set(self.counters.cloned.get() + 1);

        Self {
            value: self.value,
            counters: Rc::clone(&self.counters),
        }
    }
}

impl PartialEq for Tracked {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Drop for Tracked {
    fn drop(&mut self) {
        self.counters.dropped.set(self.counters.dropped.get() + 1);
        self.counters.drop_order.borrow_mut().push(self.value);
    }
}
