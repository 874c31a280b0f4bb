// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Test utilities for stowage crates.
//!
//! - [`CountingAlloc`]: records every allocate / reallocate / release call
//! - [`FailingAlloc`]: starts returning `OutOfMemory` once a budget is spent
//! - [`init_tracing`]: installs a test-friendly subscriber once per process
//!
//! ## License
//!
//! GPL-3.0-only

mod counting;
mod failing;
mod logging;

pub use counting::CountingAlloc;
pub use failing::FailingAlloc;
pub use logging::init_tracing;
