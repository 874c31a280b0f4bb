// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp::Ordering;

use proptest::prelude::*;
use stowage_arena::FreeListArena;
use stowage_test_utils::FailingAlloc;
use stowage_vec::{TryClone, VectorError};

use crate::{ByteString, DEFAULT_STRING_CAPACITY, StringError};

// =============================================================================
// construction
// =============================================================================

#[test]
fn test_from_str_is_nul_terminated() {
    let string = ByteString::try_from_str("abc").expect("Failed to try_from_str(..)");

    assert_eq!(string.len(), 3);
    assert_eq!(string.capacity(), DEFAULT_STRING_CAPACITY);
    assert_eq!(string.as_bytes_with_nul(), b"abc\0");
    assert_eq!(string.as_c_str(), c"abc");
    assert_eq!(string.as_str(), Ok("abc"));
}

#[test]
fn test_empty_string() {
    let string = ByteString::try_new().expect("Failed to try_new()");

    assert!(string.is_empty());
    assert_eq!(string.as_c_str(), c"");
    assert_eq!(string.as_bytes_with_nul(), b"\0");
}

#[test]
fn test_long_contents_raise_capacity() {
    let text = "x".repeat(100);
    let string = ByteString::try_from_str(&text).expect("Failed to try_from_str(..)");

    assert_eq!(string.capacity(), 101);
    assert_eq!(string.as_bytes(), text.as_bytes());
}

#[test]
fn test_construction_without_memory() {
    let alloc = FailingAlloc::new();
    alloc.fail_always();

    let result = ByteString::try_from_str_in("abc", &alloc);

    assert!(matches!(result, Err(StringError::Vector(VectorError::OutOfMemory))));
}

#[test]
fn test_try_clone_keeps_capacity_and_bytes() {
    let mut original = ByteString::try_from_str("copy me").expect("Failed to try_from_str(..)");
    let copy = original.try_clone().expect("Failed to try_clone()");

    original.cat_str("!").expect("Failed to cat_str(..)");

    assert_eq!(copy, "copy me");
    assert_eq!(copy.capacity(), DEFAULT_STRING_CAPACITY);
    assert_eq!(original, "copy me!");
}

// =============================================================================
// access
// =============================================================================

#[test]
fn test_char_at() {
    let string = ByteString::try_from_str("hey").expect("Failed to try_from_str(..)");

    assert_eq!(string.char_at(1), Ok(b'e'));
    assert_eq!(string.char_at(3), Err(VectorError::Range { index: 3, len: 3 }));
}

#[test]
fn test_interior_nul_ends_c_str_view() {
    let string = ByteString::try_from_bytes_in(b"ab\0cd", stowage_arena::SystemAlloc)
        .expect("Failed to try_from_bytes_in(..)");

    assert_eq!(string.len(), 5);
    assert_eq!(string.as_c_str(), c"ab");
}

#[test]
fn test_invalid_utf8_is_reported() {
    let string = ByteString::try_from_bytes_in(&[b'a', 0xff], stowage_arena::SystemAlloc)
        .expect("Failed to try_from_bytes_in(..)");

    assert!(string.as_str().is_err());
    assert_eq!(string.to_string(), "a\u{FFFD}");
    assert_eq!(format!("{string:?}"), "ByteString(\"a\\xff\")");
}

// =============================================================================
// mutation
// =============================================================================

#[test]
fn test_cat_and_push_byte() {
    let mut string = ByteString::try_from_str("ab").expect("Failed to try_from_str(..)");
    let tail = ByteString::try_from_str("cd").expect("Failed to try_from_str(..)");

    string.cat(&tail).expect("Failed to cat(..)");
    string.push_byte(b'e').expect("Failed to push_byte(..)");

    assert_eq!(string, "abcde");
    assert_eq!(string.as_bytes_with_nul(), b"abcde\0");
}

#[test]
fn test_clear_keeps_capacity() {
    let mut string = ByteString::try_from_str("abc").expect("Failed to try_from_str(..)");

    string.clear();

    assert!(string.is_empty());
    assert_eq!(string.capacity(), DEFAULT_STRING_CAPACITY);
    assert_eq!(string.as_c_str(), c"");
}

#[test]
fn test_failed_growth_keeps_contents() {
    let alloc = FailingAlloc::new();
    let mut string = ByteString::try_from_str_in("abc", &alloc).expect("Failed to try_from_str_in(..)");

    alloc.fail_always();
    let result = string.cat_str(&"z".repeat(200));

    assert_eq!(result, Err(StringError::Vector(VectorError::OutOfMemory)));
    assert_eq!(string, "abc");
}

// =============================================================================
// comparison
// =============================================================================

#[test]
fn test_ordering_matches_strcmp() {
    let a = ByteString::try_from_str("abc").expect("Failed to try_from_str(..)");
    let b = ByteString::try_from_str("abd").expect("Failed to try_from_str(..)");
    let prefix = ByteString::try_from_str("ab").expect("Failed to try_from_str(..)");

    assert_eq!(a.cmp(&b), Ordering::Less);
    assert_eq!(b.cmp(&a), Ordering::Greater);
    assert_eq!(prefix.cmp(&a), Ordering::Less);
    assert_eq!(a.cmp(&a.try_clone().expect("Failed to try_clone()")), Ordering::Equal);
}

#[test]
fn test_ordering_is_unsigned() {
    let high = ByteString::try_from_bytes_in(&[0x80], stowage_arena::SystemAlloc)
        .expect("Failed to try_from_bytes_in(..)");
    let low = ByteString::try_from_str("z").expect("Failed to try_from_str(..)");

    assert_eq!(high.cmp(&low), Ordering::Greater);
}

#[test]
fn test_str_equality_stops_at_interior_nul() {
    let with_nul = ByteString::try_from_bytes_in(b"ab\0cd", stowage_arena::SystemAlloc)
        .expect("Failed to try_from_bytes_in(..)");
    let plain = ByteString::try_from_str("ab").expect("Failed to try_from_str(..)");

    assert_eq!(with_nul, plain);
    assert_eq!(with_nul, "ab");
    assert_eq!(plain, "ab\0zz");
    assert_eq!(with_nul, "ab\0cd\0");
    assert_ne!(with_nul, "abc");
    assert_eq!(with_nul == plain, with_nul == *"ab");
}

// =============================================================================
// tokenize()
// =============================================================================

#[test]
fn test_tokenize_skips_empty_tokens() {
    let string = ByteString::try_from_str(",,alpha, beta,,gamma ,").expect("Failed to try_from_str(..)");

    let tokens = string.tokenize(", ").expect("Failed to tokenize(..)");

    assert_eq!(tokens.len(), 3);
    assert_eq!(tokens[0], "alpha");
    assert_eq!(tokens[1], "beta");
    assert_eq!(tokens[2], "gamma");
}

#[test]
fn test_tokenize_only_delimiters() {
    let string = ByteString::try_from_str("   ").expect("Failed to try_from_str(..)");

    let tokens = string.tokenize(" ").expect("Failed to tokenize(..)");

    assert!(tokens.is_empty());
}

#[test]
fn test_tokenize_in_arena_releases_everything() {
    let arena = FreeListArena::<4000>::new();

    {
        let string = ByteString::try_from_str_in("a b c", &arena).expect("Failed to try_from_str_in(..)");
        let tokens = string.tokenize(" ").expect("Failed to tokenize(..)");

        assert_eq!(tokens.len(), 3);
        assert_eq!(arena.block_count(), 5);
    }

    assert_eq!(arena.block_count(), 0);
}

#[test]
fn test_tokenize_out_of_memory() {
    let arena = FreeListArena::<512>::new();
    let string = ByteString::try_from_str_in("a b c d e f g h", &arena).expect("Failed to try_from_str_in(..)");

    let result = string.tokenize(" ");

    assert!(matches!(result, Err(StringError::Vector(VectorError::OutOfMemory))));
    assert_eq!(arena.block_count(), 1);
}

proptest! {
    #[test]
    fn ordering_agrees_with_byte_ordering(a in "[a-z]{0,12}", b in "[a-z]{0,12}") {
        let left = ByteString::try_from_str(&a).expect("Failed to try_from_str(..)");
        let right = ByteString::try_from_str(&b).expect("Failed to try_from_str(..)");

        prop_assert_eq!(left.cmp(&right), a.as_bytes().cmp(b.as_bytes()));
        prop_assert_eq!(left == right, a == b);
    }

    #[test]
    fn tokens_match_split_filter(text in "[a-c ,]{0,40}") {
        let string = ByteString::try_from_str(&text).expect("Failed to try_from_str(..)");
        let tokens = string.tokenize(" ,").expect("Failed to tokenize(..)");

        let expected: Vec<&str> = text.split([' ', ',']).filter(|t| !t.is_empty()).collect();

        prop_assert_eq!(tokens.len(), expected.len());
        for (token, expected) in tokens.iter().zip(expected) {
            prop_assert_eq!(token.as_str(), Ok(expected));
        }
    }
}
