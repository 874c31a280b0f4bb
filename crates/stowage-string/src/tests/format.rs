// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::fmt::{self, Write};

use stowage_test_utils::FailingAlloc;
use stowage_vec::VectorError;

use crate::{ByteString, StringError};

struct Refuses;

impl fmt::Display for Refuses {
    fn fmt(&self, _f: &mut fmt::Formatter<'_>) -> fmt::Result {
        Err(fmt::Error)
    }
}

// =============================================================================
// cat_fmt() / format_into()
// =============================================================================

#[test]
fn test_write_macro_appends() {
    let mut string = ByteString::try_from_str("n=").expect("Failed to try_from_str(..)");

    write!(string, "{}-{:03}", 7, 5).expect("Failed to write!(..)");

    assert_eq!(string, "n=7-005");
    assert_eq!(string.as_bytes_with_nul(), b"n=7-005\0");
}

#[test]
fn test_cat_fmt_grows_past_capacity() {
    let mut string = ByteString::try_new().expect("Failed to try_new()");
    let long = "y".repeat(150);

    string.cat_fmt(format_args!("[{long}]")).expect("Failed to cat_fmt(..)");

    assert_eq!(string.len(), 152);
    assert!(string.capacity() > 152);
}

#[test]
fn test_format_into_replaces_contents() {
    let mut string = ByteString::try_from_str("old").expect("Failed to try_from_str(..)");

    string.format_into(format_args!("{:x}", 255)).expect("Failed to format_into(..)");

    assert_eq!(string, "ff");
}

#[test]
fn test_cat_nfmt_truncates_like_snprintf() {
    let mut string = ByteString::try_from_str(">").expect("Failed to try_from_str(..)");

    string.cat_nfmt(4, format_args!("{}", "abcdef")).expect("Failed to cat_nfmt(..)");
    assert_eq!(string, ">abc");

    string.nformat_into(1, format_args!("ignored")).expect("Failed to nformat_into(..)");
    assert!(string.is_empty());
}

#[test]
fn test_cat_fmt_out_of_memory_is_all_or_nothing() {
    let alloc = FailingAlloc::new();
    let mut string = ByteString::try_from_str_in("keep", &alloc).expect("Failed to try_from_str_in(..)");
    let long = "z".repeat(100);

    alloc.fail_always();
    let result = string.cat_fmt(format_args!("{}{long}", "short"));

    assert_eq!(result, Err(StringError::Vector(VectorError::OutOfMemory)));
    assert_eq!(string, "keep");
}

#[test]
fn test_cat_fmt_display_error() {
    let mut string = ByteString::try_from_str("keep").expect("Failed to try_from_str(..)");

    let result = string.cat_fmt(format_args!("partial{}", Refuses));

    assert_eq!(result, Err(StringError::Format));
    assert_eq!(string, "keep");
}
