// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Hook-driven containers and a fixed-buffer arena allocator.
//!
//! Stowage is a small family of containers for targets that may have no
//! platform heap at all. Every container takes its memory from a
//! [`RawAlloc`](arena::RawAlloc) and reports allocation failure as a value
//! instead of aborting.
//!
//! # Crates
//!
//! | Module     | Contents                                                      |
//! |------------|---------------------------------------------------------------|
//! | [`arena`]  | `RawAlloc`, `SystemAlloc`, first-fit `FreeListArena<N>`       |
//! | [`vec`]    | `Vector<T, H, A>` with copy/destroy hooks and a zeroed sentinel |
//! | [`string`] | `ByteString<A>`, a nul-terminated byte string over `Vector<u8>` |
//! | [`list`]   | `LinkedList<T, H, A>`, singly linked with the same hooks      |
//!
//! # Quick Start
//!
//! ```rust
//! use stowage::arena::DefaultArena;
//! use stowage::string::{ByteString, StringError};
//! use stowage::vec::{BitwiseHooks, Vector};
//!
//! fn main() -> Result<(), StringError> {
//!     let arena = DefaultArena::new();
//!
//!     let mut numbers = Vector::try_new_in(BitwiseHooks, &arena)?;
//!     for n in [1i32, 2, 3] {
//!         numbers.add(&n)?;
//!     }
//!
//!     let mut reversed = Vector::try_new_in(BitwiseHooks, &arena)?;
//!     numbers.reverse_into(&mut reversed)?;
//!     assert_eq!(reversed.as_slice(), &[3, 2, 1]);
//!
//!     let name = ByteString::try_from_str_in("abc", &arena)?;
//!     assert_eq!(name.as_c_str(), c"abc");
//!     Ok(())
//! }
//! ```
//!
//! # Features
//!
//! - `std`: enables `ByteString::read_line` over any `std::io::BufRead`

#![cfg_attr(not(test), no_std)]

pub use stowage_arena as arena;
pub use stowage_list as list;
pub use stowage_string as string;
pub use stowage_vec as vec;
