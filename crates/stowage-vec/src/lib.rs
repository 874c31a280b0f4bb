// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable array with copy/destroy hooks over a pluggable allocator.
//!
//! [`Vector`] is the engine the other stowage containers are built on. It
//! differs from `alloc::vec::Vec` in three ways:
//!
//! - Every fallible operation returns a [`VectorError`] instead of aborting
//! - Elements are copied in and destroyed through per-vector [`Hooks`]
//! - The slot after the last element is kept zeroed as a terminator
//!
//! ## Hooks
//!
//! | Hooks            | copy               | destroy          |
//! |------------------|--------------------|------------------|
//! | [`BitwiseHooks`] | raw copy (`Copy`)  | zero-fill only   |
//! | [`CloneHooks`]   | `Clone::clone`     | `Drop`           |
//! | [`DeepHooks`]    | [`TryClone`]       | `Drop`           |
//! | [`FnHooks`]      | function pointer   | function pointer |
//!
//! Destroyed slots are zero-filled whichever hooks are in use.
//!
//! # Example
//!
//! ```rust
//! use stowage_arena::FreeListArena;
//! use stowage_vec::{BitwiseHooks, Vector, VectorError};
//!
//! fn example() -> Result<(), VectorError> {
//!     let arena = FreeListArena::<1024>::new();
//!     let mut vector = Vector::try_from_slice_in(&[1u16, 2, 3], 0, BitwiseHooks, &arena)?;
//!
//!     let mut reversed = Vector::try_new_in(BitwiseHooks, &arena)?;
//!     vector.reverse_into(&mut reversed)?;
//!     assert_eq!(reversed.as_slice(), &[3, 2, 1]);
//!
//!     vector.remove_last()?;
//!     assert_eq!(vector.as_slice(), &[1, 2]);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod error;
mod hooks;
mod vector;

pub use error::VectorError;
pub use hooks::{BitwiseHooks, CloneHooks, DeepHooks, FnHooks, Hooks, TryClone};
pub use vector::{DEFAULT_CAPACITY, Vector};
