// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stowage-vec.

use stowage_arena::AllocError;
use thiserror::Error;

/// Error type for [`Vector`](crate::Vector) operations.
///
/// Shared with the containers built on top of `Vector`, and the only error a
/// copy hook may report.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum VectorError {
    /// The allocator could not provide the requested storage, or the slot
    /// count would overflow the address space.
    #[error("Out of memory")]
    OutOfMemory,

    /// Index past the last live element.
    #[error("Index {index} out of range for length {len}")]
    Range {
        /// Requested index.
        index: usize,
        /// Number of live elements at the time of the call.
        len: usize,
    },

    /// A raw region does not consist of whole elements of this vector's width.
    #[error("Incompatible element size: expected {expected} bytes, found {found}")]
    IncompatibleElementSize {
        /// Element width of the receiving vector.
        expected: usize,
        /// Offending width reported for (or left over in) the source region.
        found: usize,
    },

    /// The operation needs at least one element.
    #[error("Container is empty")]
    EmptyContainer,
}

impl From<AllocError> for VectorError {
    fn from(err: AllocError) -> Self {
        tracing::trace!(%err, "allocation failed");
        Self::OutOfMemory
    }
}
