// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Error types for stowage-arena.

use thiserror::Error;

/// Recoverable allocation failures.
///
/// Releasing an untracked pointer is not represented here: it is a fatal
/// error and never returned to the caller.
#[derive(Debug, Error, Clone, Copy, Eq, PartialEq)]
pub enum AllocError {
    /// No free region can hold the request.
    #[error("out of memory: requested {requested} bytes")]
    OutOfMemory {
        /// Number of payload bytes requested.
        requested: usize,
    },

    /// The requested alignment exceeds what the allocator can guarantee.
    #[error("unsupported alignment {align} (max {max})")]
    UnsupportedAlignment {
        /// Requested alignment.
        align: usize,
        /// Largest alignment this allocator honours.
        max: usize,
    },
}
