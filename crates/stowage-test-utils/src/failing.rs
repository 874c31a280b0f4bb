// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use stowage_arena::{AllocError, RawAlloc, SystemAlloc};

/// Allocator wrapper that fails once a budget of successful requests is spent.
///
/// Both `allocate` and `reallocate` draw from the budget; `release` always
/// succeeds. The budget can be changed at any time, so a test can build a
/// container normally and then starve it.
#[derive(Debug)]
pub struct FailingAlloc<A = SystemAlloc> {
    inner: A,
    budget: Cell<Option<usize>>,
}

impl FailingAlloc<SystemAlloc> {
    /// Wraps the system allocator with an unlimited budget.
    pub fn new() -> Self {
        Self::wrap(SystemAlloc)
    }
}

impl Default for FailingAlloc<SystemAlloc> {
    fn default() -> Self {
        Self::new()
    }
}

impl<A: RawAlloc> FailingAlloc<A> {
    /// Wraps `inner` with an unlimited budget.
    pub fn wrap(inner: A) -> Self {
        Self {
            inner,
            budget: Cell::new(None),
        }
    }

    /// Allows `remaining` more successful requests, then fails.
    pub fn fail_after(&self, remaining: usize) {
        self.budget.set(Some(remaining));
    }

    /// Fails every subsequent request.
    pub fn fail_always(&self) {
        self.budget.set(Some(0));
    }

    /// Removes the budget.
    pub fn succeed_always(&self) {
        self.budget.set(None);
    }

    fn spend(&self, requested: usize) -> Result<(), AllocError> {
        match self.budget.get() {
            None => Ok(()),
            Some(0) => Err(AllocError::OutOfMemory { requested }),
            Some(n) => {
                self.budget.set(Some(n - 1));
                Ok(())
            }
        }
    }
}

unsafe impl<A: RawAlloc> RawAlloc for FailingAlloc<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        self.spend(layout.size())?;
        self.inner.allocate(layout)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        self.spend(new_size)?;
        // SAFETY: forwarded caller contract
        unsafe { self.inner.reallocate(ptr, old_layout, new_size) }
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract
        unsafe { self.inner.release(ptr, layout) }
    }
}
