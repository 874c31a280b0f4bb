// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Growable byte string with C-string conveniences.
//!
//! [`ByteString`] is a `Vector<u8>` whose zeroed sentinel slot doubles as
//! the C terminator, so the contents are always readable as a [`CStr`]
//! without copying. On top of the vector it adds:
//!
//! - `strcmp`-ordering ([`Ord`] over the bytes before the first nul)
//! - Formatting into the string ([`core::fmt::Write`], [`ByteString::cat_fmt`])
//! - Integer parsing in bases 2 to 36 ([`ByteString::to_int`])
//! - `strtok`-style splitting ([`ByteString::tokenize`])
//! - Line reading from any `BufRead` (feature `std`)
//!
//! [`CStr`]: core::ffi::CStr
//!
//! # Example
//!
//! ```rust
//! use stowage_string::{ByteString, StringError};
//!
//! fn example() -> Result<(), StringError> {
//!     let mut greeting = ByteString::try_from_str("abc")?;
//!     assert_eq!(greeting.len(), 3);
//!     assert_eq!(greeting.as_c_str(), c"abc");
//!
//!     greeting.cat_fmt(format_args!("-{}", 42))?;
//!     assert_eq!(greeting.as_bytes(), b"abc-42");
//!     Ok(())
//! }
//! # example().unwrap();
//! ```

#![cfg_attr(not(any(test, feature = "std")), no_std)]
#![warn(missing_docs)]
#![warn(unsafe_op_in_unsafe_fn)]

#[cfg(test)]
mod tests;

mod byte_string;
mod error;
mod format;
#[cfg(any(test, feature = "std"))]
mod io;
mod parse;

pub use byte_string::{ByteString, DEFAULT_STRING_CAPACITY};
pub use error::StringError;
