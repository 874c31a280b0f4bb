// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Copy and destroy hooks.
//!
//! A [`Vector`](crate::Vector) never duplicates or tears down an element on
//! its own. Every element that enters the vector through a copying operation
//! goes through [`Hooks::copy`], and every element that leaves it through
//! removal goes through [`Hooks::destroy`]. The vector zero-fills the slot in
//! both directions: before the copy lands and after the destroy returns.

use crate::error::VectorError;

/// Per-vector strategy for duplicating and tearing down elements.
pub trait Hooks<T> {
    /// Produces an owned copy of `src` for a freshly zeroed slot.
    ///
    /// A failure leaves the slot zeroed and the vector unchanged.
    fn copy(&self, src: &T) -> Result<T, VectorError>;

    /// Releases whatever `value` owns. The slot it came from is zero-filled
    /// by the vector afterwards.
    fn destroy(&self, value: T);
}

/// Fallible deep copy, used by [`DeepHooks`] and by containers that nest.
pub trait TryClone: Sized {
    /// Duplicates `self`, reporting allocation failure instead of aborting.
    fn try_clone(&self) -> Result<Self, VectorError>;
}

/// Raw copy for plain-data elements. Destroy only zero-fills the slot.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct BitwiseHooks;

impl<T: Copy> Hooks<T> for BitwiseHooks {
    #[inline(always)]
    fn copy(&self, src: &T) -> Result<T, VectorError> {
        Ok(*src)
    }

    #[inline(always)]
    fn destroy(&self, _value: T) {}
}

/// Infallible copy through [`Clone`], teardown through [`Drop`].
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct CloneHooks;

impl<T: Clone> Hooks<T> for CloneHooks {
    #[inline]
    fn copy(&self, src: &T) -> Result<T, VectorError> {
        Ok(src.clone())
    }

    #[inline]
    fn destroy(&self, value: T) {
        drop(value);
    }
}

/// Fallible copy through [`TryClone`], teardown through [`Drop`].
///
/// Use for elements that own storage themselves, such as vectors of vectors
/// or vectors of byte strings.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct DeepHooks;

impl<T: TryClone> Hooks<T> for DeepHooks {
    #[inline]
    fn copy(&self, src: &T) -> Result<T, VectorError> {
        src.try_clone()
    }

    #[inline]
    fn destroy(&self, value: T) {
        drop(value);
    }
}

fn bitwise_copy<T: Copy>(src: &T) -> Result<T, VectorError> {
    Ok(*src)
}

/// Hooks assembled from plain function pointers.
///
/// Either half can be left at its default: a raw copy for `Copy` elements, or
/// a plain drop.
pub struct FnHooks<T> {
    copy: fn(&T) -> Result<T, VectorError>,
    destroy: fn(T),
}

impl<T> FnHooks<T> {
    /// Hooks with both halves supplied.
    pub const fn new(copy: fn(&T) -> Result<T, VectorError>, destroy: fn(T)) -> Self {
        Self { copy, destroy }
    }

    /// Custom copy, plain drop.
    pub const fn copy_only(copy: fn(&T) -> Result<T, VectorError>) -> Self {
        Self {
            copy,
            destroy: core::mem::drop::<T>,
        }
    }
}

impl<T: Copy> FnHooks<T> {
    /// Raw copy, custom destroy.
    pub const fn destroy_only(destroy: fn(T)) -> Self {
        Self {
            copy: bitwise_copy::<T>,
            destroy,
        }
    }
}

impl<T> Clone for FnHooks<T> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<T> Copy for FnHooks<T> {}

impl<T> core::fmt::Debug for FnHooks<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("FnHooks").finish_non_exhaustive()
    }
}

impl<T> Hooks<T> for FnHooks<T> {
    #[inline]
    fn copy(&self, src: &T) -> Result<T, VectorError> {
        (self.copy)(src)
    }

    #[inline]
    fn destroy(&self, value: T) {
        (self.destroy)(value)
    }
}

impl<T, H: Hooks<T> + ?Sized> Hooks<T> for &H {
    #[inline]
    fn copy(&self, src: &T) -> Result<T, VectorError> {
        (**self).copy(src)
    }

    #[inline]
    fn destroy(&self, value: T) {
        (**self).destroy(value)
    }
}
