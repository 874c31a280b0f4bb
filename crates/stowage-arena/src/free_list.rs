// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::cell::{Cell, UnsafeCell};
use core::mem::{MaybeUninit, size_of};
use core::ptr::NonNull;

use crate::error::AllocError;
use crate::fatal;
use crate::traits::RawAlloc;

/// Buffer size of [`DefaultArena`].
pub const DEFAULT_ARENA_SIZE: usize = 4000;

/// Largest alignment an arena payload is guaranteed to have.
pub const MAX_ALIGN: usize = 16;

/// Bytes of bookkeeping in front of every payload.
pub const HEADER_SIZE: usize = align_up(size_of::<Block>());

/// Arena sized for small embedded heaps.
pub type DefaultArena = FreeListArena<DEFAULT_ARENA_SIZE>;

const HEAD: usize = 0;
const NONE: usize = usize::MAX;

#[inline(always)]
const fn align_up(offset: usize) -> usize {
    (offset + MAX_ALIGN - 1) & !(MAX_ALIGN - 1)
}

/// Header stored in the buffer immediately before each payload.
#[repr(C)]
#[derive(Clone, Copy, Debug)]
struct Block {
    /// Payload length in bytes.
    len: usize,
    /// Offset of the next header, or `NONE` for the last block.
    next: usize,
}

#[repr(C, align(16))]
struct Storage<const N: usize>([MaybeUninit<u8>; N]);

/// First-fit allocator over a fixed in-place buffer of `N` bytes.
///
/// The buffer is partitioned into an address-ordered chain of blocks. Offset 0
/// always holds a zero-length head block, planted lazily on first use.
///
/// ```text
/// offset 0                                                              N
/// +------+  +------+---------+  +------+-----+         +------+------+
/// | head |->| hdr  | payload |->| hdr  | pay |-> ... ->| hdr  | pay  |  free
/// +------+  +------+---------+  +------+-----+         +------+------+
/// ```
///
/// Allocation scans for the first gap after a block's payload that fits a
/// header plus the request, and splices a new block into it. Release unlinks
/// the block; the space becomes a gap again. Blocks are never moved and gaps
/// are never merged, so fragmentation can produce `OutOfMemory` while the
/// aggregate free space would suffice.
///
/// Pointers returned by an arena point into its buffer: moving the arena
/// while allocations are outstanding invalidates them. Containers borrow the
/// arena (`&FreeListArena<N>`), which rules that out for them.
pub struct FreeListArena<const N: usize> {
    storage: UnsafeCell<Storage<N>>,
    initialized: Cell<bool>,
    available: Cell<usize>,
    blocks: Cell<usize>,
}

impl<const N: usize> FreeListArena<N> {
    /// Creates an arena. No bookkeeping is written until the first call.
    pub const fn new() -> Self {
        const {
            assert!(N >= HEADER_SIZE, "arena buffer cannot hold its head block");
        }

        Self {
            storage: UnsafeCell::new(Storage([MaybeUninit::uninit(); N])),
            initialized: Cell::new(false),
            available: Cell::new(N - HEADER_SIZE),
            blocks: Cell::new(0),
        }
    }

    /// Total size of the backing buffer in bytes.
    #[inline]
    pub const fn capacity(&self) -> usize {
        N
    }

    /// Free bytes, ignoring fragmentation and alignment padding.
    ///
    /// Diagnostic only; a request smaller than this can still fail.
    #[inline]
    pub fn available(&self) -> usize {
        self.available.get()
    }

    /// Number of live allocations.
    #[inline]
    pub fn block_count(&self) -> usize {
        self.blocks.get()
    }

    /// Returns `true` once the head block has been planted.
    #[inline]
    pub fn is_initialized(&self) -> bool {
        self.initialized.get()
    }

    /// Returns `true` if `ptr` points into this arena's buffer.
    pub fn contains(&self, ptr: *const u8) -> bool {
        let start = self.base() as usize;
        let addr = ptr as usize;
        addr >= start && addr < start + N
    }

    /// Payload length of the live allocation starting at `ptr`.
    pub fn allocation_size(&self, ptr: NonNull<u8>) -> Option<usize> {
        let offset = self.payload_offset(ptr.as_ptr())?;
        let prev = self.find_previous(offset)?;
        let target = self.read_block(prev).next;

        Some(self.read_block(target).len)
    }

    /// Largest request that would currently succeed.
    pub fn largest_gap(&self) -> usize {
        self.ensure_initialized();

        let mut largest = 0;
        let mut cursor = HEAD;

        loop {
            let block = self.read_block(cursor);
            let gap_start = align_up(cursor + HEADER_SIZE + block.len);
            let gap_end = if block.next == NONE { N } else { block.next };

            if gap_end >= gap_start + HEADER_SIZE {
                largest = largest.max(gap_end - gap_start - HEADER_SIZE);
            }

            if block.next == NONE {
                return largest;
            }

            cursor = block.next;
        }
    }

    #[inline(always)]
    fn base(&self) -> *mut u8 {
        self.storage.get().cast::<u8>()
    }

    #[inline(always)]
    fn read_block(&self, offset: usize) -> Block {
        debug_assert!(offset % MAX_ALIGN == 0 && offset + HEADER_SIZE <= N);
        // SAFETY: headers are only ever written at MAX_ALIGN-aligned offsets
        // inside the buffer, and the buffer itself is MAX_ALIGN-aligned.
        unsafe { self.base().add(offset).cast::<Block>().read() }
    }

    #[inline(always)]
    fn write_block(&self, offset: usize, block: Block) {
        debug_assert!(offset % MAX_ALIGN == 0 && offset + HEADER_SIZE <= N);
        // SAFETY: see read_block; the header region never overlaps a payload.
        unsafe { self.base().add(offset).cast::<Block>().write(block) }
    }

    fn ensure_initialized(&self) {
        if self.initialized.get() {
            return;
        }

        self.write_block(HEAD, Block { len: 0, next: NONE });
        self.initialized.set(true);
    }

    /// Offset of `ptr` relative to the buffer start.
    ///
    /// The end of the buffer is accepted: a zero-size block filling the last
    /// gap has its payload there. `find_previous` rejects anything that is
    /// not a real payload start.
    fn payload_offset(&self, ptr: *const u8) -> Option<usize> {
        let start = self.base() as usize;
        let addr = ptr as usize;

        if !self.initialized.get() || addr < start || addr > start + N {
            return None;
        }

        Some(addr - start)
    }

    /// Walks the chain for the block whose successor's payload starts at
    /// `payload`.
    fn find_previous(&self, payload: usize) -> Option<usize> {
        let mut cursor = HEAD;

        loop {
            let next = self.read_block(cursor).next;

            if next == NONE {
                return None;
            }

            if next + HEADER_SIZE == payload {
                return Some(cursor);
            }

            cursor = next;
        }
    }

    fn allocate_after_first_fit(&self, size: usize) -> Result<usize, AllocError> {
        self.ensure_initialized();

        let needed = size
            .checked_add(HEADER_SIZE)
            .ok_or(AllocError::OutOfMemory { requested: size })?;

        let mut cursor = HEAD;

        loop {
            let block = self.read_block(cursor);
            let gap_start = align_up(cursor + HEADER_SIZE + block.len);
            let gap_end = if block.next == NONE { N } else { block.next };

            if gap_end >= gap_start && gap_end - gap_start >= needed {
                self.write_block(
                    gap_start,
                    Block {
                        len: size,
                        next: block.next,
                    },
                );
                self.write_block(
                    cursor,
                    Block {
                        len: block.len,
                        next: gap_start,
                    },
                );

                self.available.set(self.available.get().saturating_sub(needed));
                self.blocks.set(self.blocks.get() + 1);

                tracing::trace!(
                    size,
                    header = HEADER_SIZE,
                    offset = gap_start + HEADER_SIZE,
                    available = self.available.get(),
                    "allocated"
                );

                return Ok(gap_start + HEADER_SIZE);
            }

            if block.next == NONE {
                tracing::debug!(
                    size,
                    available = self.available.get(),
                    "no gap large enough"
                );
                return Err(AllocError::OutOfMemory { requested: size });
            }

            cursor = block.next;
        }
    }
}

impl<const N: usize> Default for FreeListArena<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> core::fmt::Debug for FreeListArena<N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FreeListArena")
            .field("capacity", &N)
            .field("available", &self.available())
            .field("blocks", &self.block_count())
            .finish_non_exhaustive()
    }
}

unsafe impl<const N: usize> RawAlloc for FreeListArena<N> {
    fn allocate(&self, layout: Layout) -> Result<NonNull<u8>, AllocError> {
        if layout.align() > MAX_ALIGN {
            return Err(AllocError::UnsupportedAlignment {
                align: layout.align(),
                max: MAX_ALIGN,
            });
        }

        let offset = self.allocate_after_first_fit(layout.size())?;

        // SAFETY: offset + size <= N was checked by the first-fit scan
        Ok(unsafe { NonNull::new_unchecked(self.base().add(offset)) })
    }

    unsafe fn reallocate(
        &self,
        ptr: NonNull<u8>,
        old_layout: Layout,
        new_size: usize,
    ) -> Result<NonNull<u8>, AllocError> {
        let old_size = match self.allocation_size(ptr) {
            Some(size) => size,
            None => fatal::invalid_release(ptr.as_ptr()),
        };

        tracing::trace!(old_size, new_size, "reallocating");

        // There is no grow-in-place: the new block is always fresh, so the old
        // one stays intact if this fails.
        let new_layout = Layout::from_size_align(new_size, old_layout.align())
            .map_err(|_| AllocError::OutOfMemory {
                requested: new_size,
            })?;
        let new_ptr = self.allocate(new_layout)?;

        // SAFETY: both blocks are live and distinct, so they cannot overlap;
        // each is at least min(old_size, new_size) bytes long.
        unsafe {
            core::ptr::copy_nonoverlapping(
                ptr.as_ptr(),
                new_ptr.as_ptr(),
                old_size.min(new_size),
            );
            self.release(ptr, old_layout);
        }

        Ok(new_ptr)
    }

    unsafe fn release(&self, ptr: NonNull<u8>, _layout: Layout) {
        let Some(offset) = self.payload_offset(ptr.as_ptr()) else {
            fatal::invalid_release(ptr.as_ptr());
        };
        let Some(prev) = self.find_previous(offset) else {
            fatal::invalid_release(ptr.as_ptr());
        };

        let prev_block = self.read_block(prev);
        let target = self.read_block(prev_block.next);

        self.write_block(
            prev,
            Block {
                len: prev_block.len,
                next: target.next,
            },
        );

        self.available
            .set(self.available.get() + target.len + HEADER_SIZE);
        self.blocks.set(self.blocks.get() - 1);

        tracing::trace!(
            size = target.len,
            header = HEADER_SIZE,
            offset,
            available = self.available.get(),
            "released"
        );
    }
}
