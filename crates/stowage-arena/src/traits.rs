// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;

/// The allocation primitives every stowage container is written against.
///
/// # Safety
///
/// Implementors must return pointers that are valid for reads and writes of
/// `layout.size()` bytes, aligned to `layout.align()`, and that do not alias
/// any other live allocation of the same allocator until released.
pub unsafe trait RawAlloc {
    /// Allocates a region for `layout`.
    ///
    /// The contents of the region are unspecified.
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError>;

    /// Moves an allocation to a region of `new_size` bytes.
    ///
    /// The first `min(old_layout.size(), new_size)` bytes are preserved. On
    /// error the original allocation is left untouched and still owned by
    /// the caller.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `old_layout` and
    /// not released since.
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError>;

    /// Returns a region to the allocator.
    ///
    /// # Safety
    ///
    /// `ptr` must have been returned by this allocator for `layout` and not
    /// released since. It must not be used afterwards.
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout);
}

unsafe impl<A> RawAlloc for &A
where
    A: RawAlloc + ?Sized,
{
    #[inline]
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        (**self).allocate(layout)
    }

    #[inline]
    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        // SAFETY: forwarded caller contract
        unsafe { (**self).reallocate(ptr, old_layout, new_size) }
    }

    #[inline]
    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        // SAFETY: forwarded caller contract
        unsafe { (**self).release(ptr, layout) }
    }
}
