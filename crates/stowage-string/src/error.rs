// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stowage-string.

use stowage_vec::VectorError;
use thiserror::Error;

/// Error type for [`ByteString`](crate::ByteString) operations.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum StringError {
    /// The underlying vector operation failed.
    #[error(transparent)]
    Vector(#[from] VectorError),

    /// A byte is not a digit of the requested base.
    #[error("Invalid digit {byte:#04x} at index {index} for base {base}")]
    InvalidDigit {
        /// Offending byte.
        byte: u8,
        /// Position of the offending byte.
        index: usize,
        /// Base the string was parsed in.
        base: u32,
    },

    /// Bases outside `2..=36` have no digit set.
    #[error("Unsupported base {0}: expected 2..=36")]
    UnsupportedBase(u32),

    /// The parsed value does not fit in a `u64`.
    #[error("Integer overflow: value exceeds u64::MAX")]
    Overflow,

    /// A `Display` implementation reported an error while formatting.
    #[error("Formatter error")]
    Format,

    /// Reading from the underlying source failed.
    #[cfg(any(test, feature = "std"))]
    #[error("I/O error: {0}")]
    Io(std::io::ErrorKind),
}
