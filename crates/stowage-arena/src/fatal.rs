// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Unrecoverable allocator faults.
//!
//! These indicate a corrupted block chain or a release of memory the arena
//! never handed out. Continuing would silently corrupt live allocations, so
//! the fault is logged and escalated to a panic (an abort on targets built
//! with `panic = "abort"`).

/// Marked #[cold] to keep it out of the release hot path.
#[cold]
#[inline(never)]
#[track_caller]
pub(crate) fn invalid_release(ptr: *const u8) -> ! {
    tracing::error!(?ptr, "invalid pointer to release");
    panic!("invalid pointer to release @ {ptr:p}");
}
