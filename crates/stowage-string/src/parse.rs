// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use stowage_arena::RawAlloc;

use crate::byte_string::ByteString;
use crate::error::StringError;

#[inline(always)]
fn digit_value(byte: u8) -> Option<u32> {
    match byte {
        b'0'..=b'9' => Some(u32::from(byte - b'0')),
        b'A'..=b'Z' => Some(u32::from(byte - b'A') + 10),
        _ => None,
    }
}

impl<A: RawAlloc> ByteString<A> {
    /// Parses the whole string as an unsigned integer in `base`.
    ///
    /// Digits are `0-9` followed by upper-case `A-Z`. There is no sign, no
    /// prefix and no surrounding whitespace. The empty string parses as 0.
    pub fn to_int(&self, base: u32) -> Result<u64, StringError> {
        if !(2..=36).contains(&base) {
            return Err(StringError::UnsupportedBase(base));
        }

        self.as_bytes()
            .iter()
            .enumerate()
            .try_fold(0u64, |value, (index, &byte)| {
                let digit = digit_value(byte)
                    .filter(|&digit| digit < base)
                    .ok_or(StringError::InvalidDigit { byte, index, base })?;

                value
                    .checked_mul(u64::from(base))
                    .and_then(|value| value.checked_add(u64::from(digit)))
                    .ok_or(StringError::Overflow)
            })
    }
}
