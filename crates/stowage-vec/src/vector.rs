// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::mem::size_of;
use core::ops::{Deref, DerefMut};
use core::ptr::NonNull;

use stowage_arena::{RawAlloc, SystemAlloc};

use crate::error::VectorError;
use crate::hooks::{BitwiseHooks, Hooks, TryClone};

/// Capacity used when a constructor is given a hint below 2.
pub const DEFAULT_CAPACITY: usize = 16;

#[inline(always)]
fn initial_capacity(hint: usize, count: usize) -> usize {
    let hint = if hint < 2 { DEFAULT_CAPACITY } else { hint };

    if hint > count {
        hint
    } else {
        count.saturating_add(1)
    }
}

/// Growable array with injectable copy/destroy hooks.
///
/// The buffer always holds one slot more than the live elements: the slot at
/// index `len` is the sentinel, and its bytes are zero after every operation
/// that changes the length. Removed slots are zero-filled as well.
///
/// ```text
///  0         1         2         len       capacity
/// +---------+---------+---------+---------+---------+
/// |  elem   |  elem   |  elem   | 0 0 0 0 | (spare) |
/// +---------+---------+---------+---------+---------+
///                                sentinel
/// ```
///
/// Growth reallocates to `2 * (len + n + 1)` slots whenever `len + n + 1`
/// exceeds the capacity. Bulk operations reserve up front and are
/// all-or-nothing: a failing copy hook rolls back every element the call
/// already appended.
///
/// # Type Parameters
///
/// - `T`: The element type.
/// - `H`: The [`Hooks`] used to copy elements in and destroy them on removal.
/// - `A`: The [`RawAlloc`] the buffer lives in.
///
/// # Example
///
/// ```rust
/// use stowage_vec::{Vector, VectorError};
///
/// fn example() -> Result<(), VectorError> {
///     let mut vector = Vector::try_from_slice(&[1u32, 2, 3])?;
///     vector.add(&4)?;
///
///     assert_eq!(vector.as_slice(), &[1, 2, 3, 4]);
///     assert_eq!(vector.as_nul_terminated(), &[1, 2, 3, 4, 0]);
///     Ok(())
/// }
/// # example().unwrap();
/// ```
pub struct Vector<T, H = BitwiseHooks, A = SystemAlloc>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    ptr: NonNull<T>,
    len: usize,
    capacity: usize,
    hooks: H,
    alloc: A,
    _marker: PhantomData<T>,
}

// SAFETY: Vector uniquely owns its elements; moving it across threads moves
// them together with its hooks and allocator handle.
unsafe impl<T, H, A> Send for Vector<T, H, A>
where
    T: Send,
    H: Hooks<T> + Send,
    A: RawAlloc + Send,
{
}

// SAFETY: shared access only ever hands out `&T`, `&H` and `&A`.
unsafe impl<T, H, A> Sync for Vector<T, H, A>
where
    T: Sync,
    H: Hooks<T> + Sync,
    A: RawAlloc + Sync,
{
}

impl<T: Copy> Vector<T> {
    /// Creates an empty vector of plain-data elements on the system heap.
    pub fn try_new() -> Result<Self, VectorError> {
        Self::try_new_in(BitwiseHooks, SystemAlloc)
    }

    /// Creates a vector on the system heap holding a copy of `contents`.
    pub fn try_from_slice(contents: &[T]) -> Result<Self, VectorError> {
        Self::try_from_slice_in(contents, 0, BitwiseHooks, SystemAlloc)
    }
}

impl<T, H, A> Vector<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    /// Creates an empty vector with [`DEFAULT_CAPACITY`] slots.
    pub fn try_new_in(hooks: H, alloc: A) -> Result<Self, VectorError> {
        Self::try_with_capacity_in(0, hooks, alloc)
    }

    /// Creates an empty vector.
    ///
    /// A `capacity_hint` below 2 selects [`DEFAULT_CAPACITY`].
    pub fn try_with_capacity_in(capacity_hint: usize, hooks: H, alloc: A) -> Result<Self, VectorError> {
        Self::allocate_in(initial_capacity(capacity_hint, 0), hooks, alloc)
    }

    /// Creates a vector holding a hook-copy of every element of `contents`.
    ///
    /// The capacity is the hint (or [`DEFAULT_CAPACITY`] for a hint below 2),
    /// raised to `contents.len() + 1` when that is not larger. If a copy
    /// fails, the partially built vector is torn down and nothing leaks.
    pub fn try_from_slice_in(
        contents: &[T],
        capacity_hint: usize,
        hooks: H,
        alloc: A,
    ) -> Result<Self, VectorError> {
        let mut vector = Self::allocate_in(initial_capacity(capacity_hint, contents.len()), hooks, alloc)?;
        vector.cat_slice(contents)?;

        Ok(vector)
    }

    fn allocate_in(capacity: usize, hooks: H, alloc: A) -> Result<Self, VectorError> {
        let layout = Self::layout_for(capacity)?;
        let ptr = alloc.allocate(layout)?.cast::<T>();

        let mut vector = Self {
            ptr,
            len: 0,
            capacity,
            hooks,
            alloc,
            _marker: PhantomData,
        };
        vector.zero_sentinel();

        Ok(vector)
    }

    #[inline(always)]
    fn layout_for(capacity: usize) -> Result<Layout, VectorError> {
        Layout::array::<T>(capacity).map_err(|_| VectorError::OutOfMemory)
    }

    /// Number of live elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the vector holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the buffer, sentinel included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Width of one slot in bytes.
    #[inline]
    pub const fn element_size(&self) -> usize {
        size_of::<T>()
    }

    /// The hooks this vector copies and destroys with.
    #[inline]
    pub fn hooks(&self) -> &H {
        &self.hooks
    }

    /// The allocator holding the buffer.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    /// Live elements as a slice.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // SAFETY: slots 0..len are initialized and the buffer is live
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len) }
    }

    /// Live elements as a mutable slice.
    #[inline]
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        // SAFETY: slots 0..len are initialized and uniquely borrowed
        unsafe { core::slice::from_raw_parts_mut(self.ptr.as_ptr(), self.len) }
    }

    /// Returns `true` if every byte of the sentinel slot is zero.
    pub fn is_sentinel_zeroed(&self) -> bool {
        // SAFETY: the sentinel slot lies inside the buffer and its bytes were
        // written by zero_slot, so they are initialized.
        let bytes = unsafe {
            core::slice::from_raw_parts(self.ptr.as_ptr().add(self.len).cast::<u8>(), size_of::<T>())
        };

        bytes.iter().all(|&byte| byte == 0)
    }

    #[inline(always)]
    fn zero_slot(&mut self, index: usize) {
        debug_assert!(index < self.capacity);
        // SAFETY: index < capacity, so the slot lies inside the buffer
        unsafe { self.ptr.as_ptr().add(index).write_bytes(0, 1) }
    }

    #[inline(always)]
    fn zero_sentinel(&mut self) {
        self.zero_slot(self.len);
    }

    /// Ensures room for `additional` more elements plus the sentinel.
    ///
    /// When the buffer is too small it is reallocated to twice the required
    /// slot count. On failure the vector is unchanged.
    pub fn reserve(&mut self, additional: usize) -> Result<(), VectorError> {
        let required = self
            .len
            .checked_add(additional)
            .and_then(|slots| slots.checked_add(1))
            .ok_or(VectorError::OutOfMemory)?;

        if required <= self.capacity {
            return Ok(());
        }

        let new_capacity = required.checked_mul(2).ok_or(VectorError::OutOfMemory)?;
        self.grow_to(new_capacity)
    }

    #[cold]
    #[inline(never)]
    fn grow_to(&mut self, new_capacity: usize) -> Result<(), VectorError> {
        let old_layout = Self::layout_for(self.capacity)?;
        let new_layout = Self::layout_for(new_capacity)?;

        // SAFETY: ptr was allocated by self.alloc for old_layout and is live
        let ptr = unsafe {
            self.alloc
                .reallocate(self.ptr.cast::<u8>(), old_layout, new_layout.size())?
        };

        tracing::debug!(
            old_capacity = self.capacity,
            new_capacity,
            element_size = size_of::<T>(),
            "grew vector"
        );

        self.ptr = ptr.cast::<T>();
        self.capacity = new_capacity;

        Ok(())
    }

    fn push_within_capacity(&mut self, value: T) -> &mut T {
        debug_assert!(self.len + 1 < self.capacity);

        // SAFETY: len + 1 < capacity, so both the target slot and the new
        // sentinel slot lie inside the buffer.
        unsafe {
            let slot = self.ptr.as_ptr().add(self.len);
            slot.write(value);
            self.len += 1;
            self.zero_sentinel();
            &mut *slot
        }
    }

    /// Copies `src` through the copy hook and appends it. On failure, every
    /// element from `start` onwards is destroyed again.
    fn append_copy(&mut self, src: &T, start: usize) -> Result<(), VectorError> {
        match self.hooks.copy(src) {
            Ok(value) => {
                self.push_within_capacity(value);
                Ok(())
            }
            Err(err) => {
                self.destroy_from(start);
                Err(err)
            }
        }
    }

    /// Destroys the elements at `start..len` in index order and zero-fills
    /// their slots.
    fn destroy_from(&mut self, start: usize) {
        let end = self.len;
        // Shrink first: a panicking hook leaks the tail instead of exposing
        // moved-out slots.
        self.len = start;

        for index in start..end {
            // SAFETY: index < old len, so the slot holds a live element that
            // is no longer reachable through len.
            let value = unsafe { self.ptr.as_ptr().add(index).read() };
            self.hooks.destroy(value);
            self.zero_slot(index);
        }

        self.zero_sentinel();
    }

    /// Appends a hook-copy of `element` and returns the stored copy.
    ///
    /// If the copy hook fails the vector is left unchanged, although its
    /// capacity may already have grown.
    pub fn add(&mut self, element: &T) -> Result<&mut T, VectorError> {
        self.reserve(1)?;
        let value = self.hooks.copy(element)?;

        Ok(self.push_within_capacity(value))
    }

    /// Appends `value` without going through the copy hook.
    ///
    /// On error `value` is dropped.
    pub fn push(&mut self, value: T) -> Result<&mut T, VectorError> {
        self.reserve(1)?;

        Ok(self.push_within_capacity(value))
    }

    /// Element at `index`.
    pub fn at(&self, index: usize) -> Result<&T, VectorError> {
        let len = self.len;
        self.as_slice().get(index).ok_or(VectorError::Range { index, len })
    }

    /// Mutable element at `index`.
    pub fn at_mut(&mut self, index: usize) -> Result<&mut T, VectorError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(VectorError::Range { index, len })
    }

    /// Last live element.
    pub fn last(&self) -> Result<&T, VectorError> {
        self.as_slice().last().ok_or(VectorError::EmptyContainer)
    }

    /// Mutable last live element.
    pub fn last_mut(&mut self) -> Result<&mut T, VectorError> {
        self.as_mut_slice().last_mut().ok_or(VectorError::EmptyContainer)
    }

    /// Destroys the last element through the destroy hook.
    pub fn remove_last(&mut self) -> Result<(), VectorError> {
        if self.is_empty() {
            return Err(VectorError::EmptyContainer);
        }

        self.destroy_from(self.len - 1);
        Ok(())
    }

    /// Moves the last element out. The destroy hook is not called: ownership
    /// passes to the caller.
    pub fn pop(&mut self) -> Result<T, VectorError> {
        if self.is_empty() {
            return Err(VectorError::EmptyContainer);
        }

        self.len -= 1;
        // SAFETY: the slot at the old last index holds a live element that is
        // no longer reachable through len.
        let value = unsafe { self.ptr.as_ptr().add(self.len).read() };
        self.zero_sentinel();

        Ok(value)
    }

    /// Destroys every element past `len`. No-op if `len >= self.len()`.
    pub fn truncate(&mut self, len: usize) {
        if len < self.len {
            self.destroy_from(len);
        }
    }

    /// Destroys every element in index order. Capacity is retained.
    pub fn clear(&mut self) {
        self.destroy_from(0);
    }

    /// Appends a hook-copy of every element of `src`.
    ///
    /// All-or-nothing: capacity is reserved up front, and if a copy fails the
    /// elements appended by this call are destroyed again.
    pub fn cat_slice(&mut self, src: &[T]) -> Result<(), VectorError> {
        if src.is_empty() {
            return Ok(());
        }

        self.reserve(src.len())?;
        let start = self.len;

        for item in src {
            self.append_copy(item, start)?;
        }

        Ok(())
    }

    /// Appends a hook-copy of every element of `src`, which may use other
    /// hooks and another allocator.
    pub fn cat<H2, A2>(&mut self, src: &Vector<T, H2, A2>) -> Result<(), VectorError>
    where
        H2: Hooks<T>,
        A2: RawAlloc,
    {
        self.cat_slice(src.as_slice())
    }

    /// Copies every element of `self` into `dest` with `dest`'s hooks, last
    /// element first.
    ///
    /// `dest` keeps its existing contents; the reversed copies follow them.
    /// All-or-nothing like [`cat_slice`](Self::cat_slice).
    pub fn reverse_into<H2, A2>(&self, dest: &mut Vector<T, H2, A2>) -> Result<(), VectorError>
    where
        H2: Hooks<T>,
        A2: RawAlloc,
    {
        dest.reserve(self.len)?;
        let start = dest.len;

        for item in self.as_slice().iter().rev() {
            dest.append_copy(item, start)?;
        }

        Ok(())
    }
}

impl<T, H, A> Vector<T, H, A>
where
    T: bytemuck::Pod,
    H: Hooks<T>,
    A: RawAlloc,
{
    /// Appends elements decoded from a raw byte region whose elements are
    /// `element_size` bytes wide.
    ///
    /// Fails with [`VectorError::IncompatibleElementSize`] if `element_size`
    /// differs from this vector's element width (`found` is the offending
    /// width), or if `bytes` does not split into whole elements (`found` is
    /// the number of leftover bytes). Each decoded element goes through the
    /// copy hook; all-or-nothing like [`cat_slice`](Self::cat_slice).
    pub fn cat_raw(&mut self, bytes: &[u8], element_size: usize) -> Result<(), VectorError> {
        let expected = size_of::<T>();

        if element_size != expected {
            return Err(VectorError::IncompatibleElementSize {
                expected,
                found: element_size,
            });
        }

        if expected == 0 {
            return match bytes.len() {
                0 => Ok(()),
                found => Err(VectorError::IncompatibleElementSize { expected, found }),
            };
        }

        let leftover = bytes.len() % expected;
        if leftover != 0 {
            return Err(VectorError::IncompatibleElementSize {
                expected,
                found: leftover,
            });
        }

        self.reserve(bytes.len() / expected)?;
        let start = self.len;

        for chunk in bytes.chunks_exact(expected) {
            let value: T = bytemuck::pod_read_unaligned(chunk);
            self.append_copy(&value, start)?;
        }

        Ok(())
    }

    /// Live elements as raw bytes.
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(self.as_slice())
    }
}

impl<T, H, A> Vector<T, H, A>
where
    T: bytemuck::Zeroable,
    H: Hooks<T>,
    A: RawAlloc,
{
    /// Live elements followed by the zeroed sentinel, for consumers that
    /// expect a terminator.
    pub fn as_nul_terminated(&self) -> &[T] {
        // SAFETY: slots 0..len are initialized; the sentinel slot holds zero
        // bytes, which are a valid T because T: Zeroable.
        unsafe { core::slice::from_raw_parts(self.ptr.as_ptr(), self.len + 1) }
    }
}

impl<T, H, A> TryClone for Vector<T, H, A>
where
    H: Hooks<T> + Clone,
    A: RawAlloc + Clone,
{
    fn try_clone(&self) -> Result<Self, VectorError> {
        Self::try_from_slice_in(self.as_slice(), self.capacity, self.hooks.clone(), self.alloc.clone())
    }
}

impl<T, H, A> Drop for Vector<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    fn drop(&mut self) {
        self.clear();

        if let Ok(layout) = Self::layout_for(self.capacity) {
            // SAFETY: ptr was allocated by self.alloc for this layout and is
            // released exactly once here.
            unsafe { self.alloc.release(self.ptr.cast::<u8>(), layout) }
        }
    }
}

impl<T, H, A> Deref for Vector<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    type Target = [T];

    #[inline]
    fn deref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T, H, A> DerefMut for Vector<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    #[inline]
    fn deref_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<T, H, A> AsRef<[T]> for Vector<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<'a, T, H, A> IntoIterator for &'a Vector<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    type Item = &'a T;
    type IntoIter = core::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_slice().iter()
    }
}

impl<'a, T, H, A> IntoIterator for &'a mut Vector<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    type Item = &'a mut T;
    type IntoIter = core::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.as_mut_slice().iter_mut()
    }
}

impl<T, H, A, H2, A2> PartialEq<Vector<T, H2, A2>> for Vector<T, H, A>
where
    T: PartialEq,
    H: Hooks<T>,
    A: RawAlloc,
    H2: Hooks<T>,
    A2: RawAlloc,
{
    fn eq(&self, other: &Vector<T, H2, A2>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, H, A> Eq for Vector<T, H, A>
where
    T: Eq,
    H: Hooks<T>,
    A: RawAlloc,
{
}

impl<T, H, A> fmt::Debug for Vector<T, H, A>
where
    T: fmt::Debug,
    H: Hooks<T>,
    A: RawAlloc,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Vector")
            .field("len", &self.len)
            .field("capacity", &self.capacity)
            .field("elements", &self.as_slice())
            .finish_non_exhaustive()
    }
}
