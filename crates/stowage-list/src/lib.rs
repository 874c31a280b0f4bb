// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Singly linked list over a stowage allocator.
//!
//! Every node is a separate allocation from the list's [`RawAlloc`], and
//! elements go through the same [`Hooks`] as a `Vector`: copied in by
//! [`LinkedList::append`] and [`LinkedList::prepend`], destroyed by the
//! removal operations. Errors reuse [`VectorError`].
//!
//! [`RawAlloc`]: stowage_arena::RawAlloc
//! [`Hooks`]: stowage_vec::Hooks
//! [`VectorError`]: stowage_vec::VectorError
//!
//! # Example
//!
//! ```rust
//! use stowage_list::LinkedList;
//! use stowage_vec::VectorError;
//!
//! fn example() -> Result<(), VectorError> {
//!     let mut list = LinkedList::new();
//!     list.append(&2u8)?;
//!     list.prepend(&1)?;
//!
//!     assert_eq!(list.first(), Ok(&1));
//!     assert_eq!(list.find(|v| *v > 1), Some(&2));
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod iter;
mod list;

pub use iter::{Iter, IterMut};
pub use list::LinkedList;
