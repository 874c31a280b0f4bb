// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::alloc::Layout;
use core::fmt;
use core::marker::PhantomData;
use core::ptr::NonNull;

use stowage_arena::{RawAlloc, SystemAlloc};
use stowage_vec::{BitwiseHooks, Hooks, TryClone, VectorError};

use crate::iter::{Iter, IterMut};

pub(crate) struct Node<T> {
    pub(crate) value: T,
    pub(crate) next: Option<NonNull<Node<T>>>,
}

/// Singly linked list with a tail pointer.
///
/// Appending and prepending are O(1); [`remove_last`](Self::remove_last) walks
/// the chain. Node memory is zero-filled before an element lands in it and
/// after the element is destroyed.
pub struct LinkedList<T, H = BitwiseHooks, A = SystemAlloc>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    head: Option<NonNull<Node<T>>>,
    tail: Option<NonNull<Node<T>>>,
    len: usize,
    hooks: H,
    alloc: A,
    _marker: PhantomData<Node<T>>,
}

// SAFETY: the list uniquely owns its nodes.
unsafe impl<T, H, A> Send for LinkedList<T, H, A>
where
    T: Send,
    H: Hooks<T> + Send,
    A: RawAlloc + Send,
{
}

// SAFETY: shared access only ever hands out `&T`.
unsafe impl<T, H, A> Sync for LinkedList<T, H, A>
where
    T: Sync,
    H: Hooks<T> + Sync,
    A: RawAlloc + Sync,
{
}

impl<T: Copy> LinkedList<T> {
    /// Creates an empty list of plain-data elements on the system heap.
    pub const fn new() -> Self {
        Self::new_in(BitwiseHooks, SystemAlloc)
    }
}

impl<T: Copy> Default for LinkedList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, H, A> LinkedList<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    /// Creates an empty list. Nothing is allocated until the first insert.
    pub const fn new_in(hooks: H, alloc: A) -> Self {
        Self {
            head: None,
            tail: None,
            len: 0,
            hooks,
            alloc,
            _marker: PhantomData,
        }
    }

    /// Number of elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list holds no elements.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The allocator nodes are taken from.
    #[inline]
    pub fn allocator(&self) -> &A {
        &self.alloc
    }

    fn allocate_node(&self) -> Result<NonNull<Node<T>>, VectorError> {
        let node = self.alloc.allocate(Layout::new::<Node<T>>())?.cast::<Node<T>>();
        // SAFETY: fresh allocation sized and aligned for one node
        unsafe { node.as_ptr().write_bytes(0, 1) };

        Ok(node)
    }

    /// # Safety
    ///
    /// `node` must come from `allocate_node`, be unlinked, and hold no live
    /// element.
    unsafe fn release_node(&self, node: NonNull<Node<T>>) {
        // SAFETY: caller contract; the node is exclusively ours
        unsafe {
            node.as_ptr().write_bytes(0, 1);
            self.alloc.release(node.cast::<u8>(), Layout::new::<Node<T>>());
        }
    }

    fn link_back(&mut self, node: NonNull<Node<T>>, value: T) -> &mut T {
        // SAFETY: node is a fresh allocation owned by this list, and tail
        // (if any) is a live node of this list.
        unsafe {
            node.as_ptr().write(Node { value, next: None });

            match self.tail {
                Some(tail) => (*tail.as_ptr()).next = Some(node),
                None => self.head = Some(node),
            }

            self.tail = Some(node);
            self.len += 1;

            &mut (*node.as_ptr()).value
        }
    }

    fn link_front(&mut self, node: NonNull<Node<T>>, value: T) -> &mut T {
        // SAFETY: node is a fresh allocation owned by this list
        unsafe {
            node.as_ptr().write(Node { value, next: self.head });

            if self.tail.is_none() {
                self.tail = Some(node);
            }

            self.head = Some(node);
            self.len += 1;

            &mut (*node.as_ptr()).value
        }
    }

    fn copy_into_node(&self, element: &T) -> Result<(NonNull<Node<T>>, T), VectorError> {
        let node = self.allocate_node()?;

        match self.hooks.copy(element) {
            Ok(value) => Ok((node, value)),
            Err(err) => {
                // SAFETY: the node was never linked and holds no element
                unsafe { self.release_node(node) };
                Err(err)
            }
        }
    }

    /// Appends a hook-copy of `element` and returns the stored copy.
    ///
    /// On failure the list is unchanged.
    pub fn append(&mut self, element: &T) -> Result<&mut T, VectorError> {
        let (node, value) = self.copy_into_node(element)?;
        Ok(self.link_back(node, value))
    }

    /// Appends `value` without going through the copy hook.
    pub fn push_back(&mut self, value: T) -> Result<&mut T, VectorError> {
        let node = self.allocate_node()?;
        Ok(self.link_back(node, value))
    }

    /// Appends an all-zero element for the caller to fill in.
    pub fn append_zeroed(&mut self) -> Result<&mut T, VectorError>
    where
        T: bytemuck::Zeroable,
    {
        self.push_back(T::zeroed())
    }

    /// Prepends a hook-copy of `element`.
    pub fn prepend(&mut self, element: &T) -> Result<&mut T, VectorError> {
        let (node, value) = self.copy_into_node(element)?;
        Ok(self.link_front(node, value))
    }

    /// Prepends `value` without going through the copy hook.
    pub fn push_front(&mut self, value: T) -> Result<&mut T, VectorError> {
        let node = self.allocate_node()?;
        Ok(self.link_front(node, value))
    }

    /// First element.
    pub fn first(&self) -> Result<&T, VectorError> {
        // SAFETY: head is a live node of this list
        self.head
            .map(|node| unsafe { &(*node.as_ptr()).value })
            .ok_or(VectorError::EmptyContainer)
    }

    /// Mutable first element.
    pub fn first_mut(&mut self) -> Result<&mut T, VectorError> {
        // SAFETY: head is a live node, uniquely borrowed through self
        self.head
            .map(|node| unsafe { &mut (*node.as_ptr()).value })
            .ok_or(VectorError::EmptyContainer)
    }

    /// Last element.
    pub fn last(&self) -> Result<&T, VectorError> {
        // SAFETY: tail is a live node of this list
        self.tail
            .map(|node| unsafe { &(*node.as_ptr()).value })
            .ok_or(VectorError::EmptyContainer)
    }

    /// Mutable last element.
    pub fn last_mut(&mut self) -> Result<&mut T, VectorError> {
        // SAFETY: tail is a live node, uniquely borrowed through self
        self.tail
            .map(|node| unsafe { &mut (*node.as_ptr()).value })
            .ok_or(VectorError::EmptyContainer)
    }

    fn unlink_first(&mut self) -> Option<T> {
        let node = self.head?;
        // SAFETY: head is a live node; reading it moves the element out and
        // the node is released right after.
        let Node { value, next } = unsafe { node.as_ptr().read() };

        self.head = next;
        if next.is_none() {
            self.tail = None;
        }
        self.len -= 1;

        // SAFETY: unlinked above, element moved out
        unsafe { self.release_node(node) };

        Some(value)
    }

    fn unlink_last(&mut self) -> Option<T> {
        let tail = self.tail?;
        let mut previous = None;
        let mut cursor = self.head;

        while let Some(node) = cursor {
            if node == tail {
                break;
            }
            previous = Some(node);
            // SAFETY: every node reachable from head is live
            cursor = unsafe { (*node.as_ptr()).next };
        }

        match previous {
            // SAFETY: previous is a live node of this list
            Some(node) => unsafe { (*node.as_ptr()).next = None },
            None => self.head = None,
        }
        self.tail = previous;
        self.len -= 1;

        // SAFETY: tail is unlinked now; reading moves the element out
        let Node { value, .. } = unsafe { tail.as_ptr().read() };
        // SAFETY: unlinked above, element moved out
        unsafe { self.release_node(tail) };

        Some(value)
    }

    /// Destroys the first element.
    pub fn remove_first(&mut self) -> Result<(), VectorError> {
        let value = self.unlink_first().ok_or(VectorError::EmptyContainer)?;
        self.hooks.destroy(value);
        Ok(())
    }

    /// Destroys the last element.
    pub fn remove_last(&mut self) -> Result<(), VectorError> {
        let value = self.unlink_last().ok_or(VectorError::EmptyContainer)?;
        self.hooks.destroy(value);
        Ok(())
    }

    /// Moves the first element out without calling the destroy hook.
    pub fn pop_front(&mut self) -> Result<T, VectorError> {
        self.unlink_first().ok_or(VectorError::EmptyContainer)
    }

    /// Destroys every element, first to last, and releases every node.
    pub fn clear(&mut self) {
        while let Some(value) = self.unlink_first() {
            self.hooks.destroy(value);
        }
    }

    /// First element matching `predicate`.
    pub fn find<P>(&self, mut predicate: P) -> Option<&T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter().find(|value| predicate(value))
    }

    /// Mutable first element matching `predicate`.
    pub fn find_mut<P>(&mut self, mut predicate: P) -> Option<&mut T>
    where
        P: FnMut(&T) -> bool,
    {
        self.iter_mut().find(|value| predicate(value))
    }

    /// Iterates first to last.
    pub fn iter(&self) -> Iter<'_, T> {
        Iter::new(self.head, self.len)
    }

    /// Iterates first to last with mutable access.
    pub fn iter_mut(&mut self) -> IterMut<'_, T> {
        IterMut::new(self.head, self.len)
    }
}

impl<T, H, A> TryClone for LinkedList<T, H, A>
where
    H: Hooks<T> + Clone,
    A: RawAlloc + Clone,
{
    fn try_clone(&self) -> Result<Self, VectorError> {
        let mut list = Self::new_in(self.hooks.clone(), self.alloc.clone());

        for value in self {
            list.append(value)?;
        }

        Ok(list)
    }
}

impl<T, H, A> Drop for LinkedList<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    fn drop(&mut self) {
        self.clear();
    }
}

impl<'a, T, H, A> IntoIterator for &'a LinkedList<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Iter<'a, T> {
        self.iter()
    }
}

impl<'a, T, H, A> IntoIterator for &'a mut LinkedList<T, H, A>
where
    H: Hooks<T>,
    A: RawAlloc,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T>;

    fn into_iter(self) -> IterMut<'a, T> {
        self.iter_mut()
    }
}

impl<T, H, A, H2, A2> PartialEq<LinkedList<T, H2, A2>> for LinkedList<T, H, A>
where
    T: PartialEq,
    H: Hooks<T>,
    A: RawAlloc,
    H2: Hooks<T>,
    A2: RawAlloc,
{
    fn eq(&self, other: &LinkedList<T, H2, A2>) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T, H, A> fmt::Debug for LinkedList<T, H, A>
where
    T: fmt::Debug,
    H: Hooks<T>,
    A: RawAlloc,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}
