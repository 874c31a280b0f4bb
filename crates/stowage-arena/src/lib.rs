// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Raw allocation primitives for stowage containers.
//!
//! Every stowage container obtains its memory through the [`RawAlloc`] trait,
//! which exposes exactly three primitives: allocate, reallocate and release.
//! Two implementations ship with this crate:
//!
//! ## SystemAlloc
//!
//! Delegates to the platform heap (`alloc::alloc`):
//! - Available wherever `alloc` is available
//! - Zero-sized requests never touch the heap
//!
//! ## FreeListArena
//!
//! Serves allocations from a fixed in-place buffer, for targets without a
//! platform heap:
//! - First-fit scan over an address-ordered block chain
//! - Block headers live inside the buffer itself
//! - No compaction and no coalescing of neighbouring free space
//! - Releasing a pointer the arena never handed out is fatal
//!
//! # Example
//!
//! ```rust
//! use core::alloc::Layout;
//! use stowage_arena::{AllocError, FreeListArena, RawAlloc};
//!
//! fn example() -> Result<(), AllocError> {
//!     let arena = FreeListArena::<512>::new();
//!     let layout = Layout::from_size_align(64, 8).expect("valid layout");
//!
//!     let ptr = arena.allocate(layout)?;
//!     assert_eq!(arena.block_count(), 1);
//!
//!     unsafe { arena.release(ptr, layout) };
//!     assert_eq!(arena.block_count(), 0);
//!     Ok(())
//! }
//! # example().unwrap();
//! ```
//!
//! # Threading
//!
//! `FreeListArena` is `!Sync`. Hold one arena per thread; containers borrow it
//! through `&FreeListArena<N>`, which also implements [`RawAlloc`].

#![cfg_attr(not(test), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

extern crate alloc;

#[cfg(test)]
mod tests;

mod error;
mod fatal;
mod free_list;
mod system;
mod traits;

pub use error::AllocError;
pub use free_list::{DEFAULT_ARENA_SIZE, DefaultArena, FreeListArena, HEADER_SIZE, MAX_ALIGN};
pub use system::SystemAlloc;
pub use traits::RawAlloc;
