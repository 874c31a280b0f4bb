// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::cell::Cell;
use core::ptr::NonNull;

use stowage_arena::{AllocError, RawAlloc, SystemAlloc};

/// Allocator wrapper that counts calls into the wrapped allocator.
///
/// Containers borrow it (`&CountingAlloc`), so the counters stay readable
/// while the container is alive and after it is dropped.
#[derive(Debug, Default)]
pub struct CountingAlloc<A = SystemAlloc> {
    inner: A,
    allocations: Cell<usize>,
    reallocations: Cell<usize>,
    releases: Cell<usize>,
}

impl CountingAlloc<SystemAlloc> {
    /// Counts calls into the system allocator.
    pub fn new() -> Self {
        Self::wrap(SystemAlloc)
    }
}

impl<A: RawAlloc> CountingAlloc<A> {
    /// Counts calls into `inner`.
    pub fn wrap(inner: A) -> Self {
        Self {
            inner,
            allocations: Cell::new(0),
            reallocations: Cell::new(0),
            releases: Cell::new(0),
        }
    }

    /// Successful `allocate` calls.
    pub fn allocations(&self) -> usize {
        self.allocations.get()
    }

    /// Successful `reallocate` calls.
    pub fn reallocations(&self) -> usize {
        self.reallocations.get()
    }

    /// `release` calls.
    pub fn releases(&self) -> usize {
        self.releases.get()
    }

    /// Allocations handed out and not yet released.
    pub fn live(&self) -> usize {
        self.allocations.get() - self.releases.get()
    }
}

unsafe impl<A: RawAlloc> RawAlloc for CountingAlloc<A> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        let ptr = self.inner.allocate(layout)?;
        self.allocations.set(self.allocations.get() + 1);
        Ok(ptr)
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: forwarded caller contract
        let new_ptr = unsafe { self.inner.reallocate(ptr, old_layout, new_size)? };
        self.reallocations.set(self.reallocations.get() + 1);
        Ok(new_ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        self.releases.set(self.releases.get() + 1);
        // SAFETY: forwarded caller contract
        unsafe { self.inner.release(ptr, layout) }
    }
}
