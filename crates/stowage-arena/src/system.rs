// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! SystemAlloc - platform heap allocation
//!
//! Used when the target provides a global allocator.

use core::alloc::Layout;
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::traits::RawAlloc;

/// [`RawAlloc`] backed by the global allocator.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SystemAlloc;

#[inline(always)]
fn dangling(align: usize) -> NonNull<u8> {
    // Alignments are never zero, so this is a well-aligned non-null address.
    NonNull::new(core::ptr::without_provenance_mut(align)).unwrap_or(NonNull::dangling())
}

unsafe impl RawAlloc for SystemAlloc {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.size() == 0 {
            return Ok(dangling(layout.align()));
        }

        // SAFETY: layout has a non-zero size
        let ptr = unsafe { alloc::alloc::alloc(layout) };

        NonNull::new(ptr).ok_or(AllocError::OutOfMemory {
            requested: layout.size(),
        })
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        let new_layout = Layout::from_size_align(new_size, old_layout.align())
            .map_err(|_| AllocError::OutOfMemory {
                requested: new_size,
            })?;

        if old_layout.size() == 0 {
            return self.allocate(new_layout);
        }

        if new_size == 0 {
            // SAFETY: caller guarantees ptr was allocated with old_layout
            unsafe { self.release(ptr, old_layout) };
            return Ok(dangling(old_layout.align()));
        }

        // SAFETY: ptr was allocated with old_layout (caller contract), new_size
        // is non-zero and fits a valid Layout with the same alignment.
        let new_ptr = unsafe { alloc::alloc::realloc(ptr.as_ptr(), old_layout, new_size) };

        NonNull::new(new_ptr).ok_or(AllocError::OutOfMemory {
            requested: new_size,
        })
    }

    unsafe fn release(&self, ptr: NonNull<u8>, layout: Layout) {
        if layout.size() == 0 {
            return;
        }

        // SAFETY: caller guarantees ptr was allocated with layout
        unsafe { alloc::alloc::dealloc(ptr.as_ptr(), layout) };
    }
}
