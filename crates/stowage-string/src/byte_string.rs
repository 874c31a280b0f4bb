// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use core::cmp::Ordering;
use core::ffi::CStr;
use core::fmt;
use core::ops::Deref;

use stowage_arena::{RawAlloc, SystemAlloc};
use stowage_vec::{BitwiseHooks, DeepHooks, TryClone, Vector, VectorError};

use crate::error::StringError;

/// Capacity hint used by the `ByteString` constructors.
pub const DEFAULT_STRING_CAPACITY: usize = 64;

/// Growable byte string backed by a [`Vector<u8>`](Vector).
///
/// The byte after the last one is always zero, so [`as_c_str`](Self::as_c_str)
/// is a view, not a copy. Interior nul bytes are stored like any other byte,
/// but C-string views, comparison and tokenizing stop at the first one.
pub struct ByteString<A = SystemAlloc>
where
    A: RawAlloc,
{
    bytes: Vector<u8, BitwiseHooks, A>,
}

impl ByteString<SystemAlloc> {
    /// Creates an empty string on the system heap.
    pub fn try_new() -> Result<Self, StringError> {
        Self::try_new_in(SystemAlloc)
    }

    /// Creates a string on the system heap holding the bytes of `contents`.
    pub fn try_from_str(contents: &str) -> Result<Self, StringError> {
        Self::try_from_str_in(contents, SystemAlloc)
    }
}

impl<A: RawAlloc> ByteString<A> {
    /// Creates an empty string with [`DEFAULT_STRING_CAPACITY`] bytes reserved.
    pub fn try_new_in(alloc: A) -> Result<Self, StringError> {
        Self::try_from_bytes_in(&[], alloc)
    }

    /// Creates a string holding the bytes of `contents`.
    pub fn try_from_str_in(contents: &str, alloc: A) -> Result<Self, StringError> {
        Self::try_from_bytes_in(contents.as_bytes(), alloc)
    }

    /// Creates a string holding `contents`.
    pub fn try_from_bytes_in(contents: &[u8], alloc: A) -> Result<Self, StringError> {
        let bytes = Vector::try_from_slice_in(contents, DEFAULT_STRING_CAPACITY, BitwiseHooks, alloc)?;
        Ok(Self { bytes })
    }

    /// Number of bytes, terminator excluded.
    #[inline]
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns `true` if the string holds no bytes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Reserved bytes, terminator included.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.bytes.capacity()
    }

    /// The allocator holding the bytes.
    #[inline]
    pub fn allocator(&self) -> &A {
        self.bytes.allocator()
    }

    /// Byte at `index`.
    pub fn char_at(&self, index: usize) -> Result<u8, VectorError> {
        self.bytes.at(index).copied()
    }

    /// The bytes, terminator excluded.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        self.bytes.as_slice()
    }

    /// The bytes followed by the zero terminator.
    #[inline]
    pub fn as_bytes_with_nul(&self) -> &[u8] {
        self.bytes.as_nul_terminated()
    }

    /// The contents up to the first nul byte, as a C string.
    pub fn as_c_str(&self) -> &CStr {
        // The sentinel guarantees a nul, so this never falls back.
        CStr::from_bytes_until_nul(self.as_bytes_with_nul()).unwrap_or_default()
    }

    /// The bytes as UTF-8 text.
    pub fn as_str(&self) -> Result<&str, core::str::Utf8Error> {
        core::str::from_utf8(self.as_bytes())
    }

    /// The underlying vector.
    #[inline]
    pub fn as_vector(&self) -> &Vector<u8, BitwiseHooks, A> {
        &self.bytes
    }

    /// Appends the bytes of `text`.
    pub fn cat_str(&mut self, text: &str) -> Result<(), StringError> {
        self.cat_bytes(text.as_bytes())
    }

    /// Appends `bytes`. All-or-nothing.
    pub fn cat_bytes(&mut self, bytes: &[u8]) -> Result<(), StringError> {
        self.bytes.cat_slice(bytes)?;
        Ok(())
    }

    /// Appends another string's bytes.
    pub fn cat<A2: RawAlloc>(&mut self, other: &ByteString<A2>) -> Result<(), StringError> {
        self.cat_bytes(other.as_bytes())
    }

    /// Appends a single byte.
    pub fn push_byte(&mut self, byte: u8) -> Result<(), StringError> {
        self.bytes.push(byte)?;
        Ok(())
    }

    /// Ensures room for `additional` more bytes plus the terminator.
    pub fn reserve(&mut self, additional: usize) -> Result<(), StringError> {
        self.bytes.reserve(additional)?;
        Ok(())
    }

    /// Drops every byte past `len`.
    pub fn truncate(&mut self, len: usize) {
        self.bytes.truncate(len);
    }

    /// Empties the string. Capacity is retained.
    pub fn clear(&mut self) {
        self.bytes.clear();
    }

    /// Splits the C-string contents at any byte of `delimiters`.
    ///
    /// Runs of delimiters count as one separator and empty tokens are
    /// skipped, as `strtok` does. Each token is a new string in the same
    /// allocator.
    pub fn tokenize(&self, delimiters: &str) -> Result<Vector<ByteString<A>, DeepHooks, A>, StringError>
    where
        A: Clone,
    {
        let delimiters = delimiters.as_bytes();
        let mut tokens = Vector::try_new_in(DeepHooks, self.allocator().clone())?;

        for token in self
            .as_c_str()
            .to_bytes()
            .split(|byte| delimiters.contains(byte))
            .filter(|token| !token.is_empty())
        {
            let token = ByteString::try_from_bytes_in(token, self.allocator().clone())?;
            tokens.push(token)?;
        }

        tracing::trace!(tokens = tokens.len(), "tokenized");

        Ok(tokens)
    }
}

impl<A> TryClone for ByteString<A>
where
    A: RawAlloc + Clone,
{
    fn try_clone(&self) -> Result<Self, VectorError> {
        Ok(Self {
            bytes: self.bytes.try_clone()?,
        })
    }
}

impl<A: RawAlloc> Deref for ByteString<A> {
    type Target = [u8];

    #[inline]
    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: RawAlloc> AsRef<[u8]> for ByteString<A> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<A: RawAlloc, A2: RawAlloc> PartialEq<ByteString<A2>> for ByteString<A> {
    fn eq(&self, other: &ByteString<A2>) -> bool {
        self.as_c_str() == other.as_c_str()
    }
}

impl<A: RawAlloc> Eq for ByteString<A> {}

impl<A: RawAlloc> PartialOrd for ByteString<A> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<A: RawAlloc> Ord for ByteString<A> {
    /// Orders like `strcmp`: unsigned bytes up to the first nul.
    fn cmp(&self, other: &Self) -> Ordering {
        self.as_c_str().cmp(other.as_c_str())
    }
}

/// Compares the C-string view with `text` up to its own first nul, the same
/// basis as comparing two byte strings.
impl<A: RawAlloc> PartialEq<str> for ByteString<A> {
    fn eq(&self, other: &str) -> bool {
        let text = other.as_bytes();
        let text = text.split(|&byte| byte == 0).next().unwrap_or(text);

        self.as_c_str().to_bytes() == text
    }
}

impl<A: RawAlloc> PartialEq<&str> for ByteString<A> {
    fn eq(&self, other: &&str) -> bool {
        *self == **other
    }
}

impl<A: RawAlloc> fmt::Debug for ByteString<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("ByteString")
            .field(&format_args!("\"{}\"", self.as_bytes().escape_ascii()))
            .finish()
    }
}

impl<A: RawAlloc> fmt::Display for ByteString<A> {
    /// Invalid UTF-8 sequences are shown as U+FFFD.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.as_bytes().utf8_chunks() {
            f.write_str(chunk.valid())?;

            if !chunk.invalid().is_empty() {
                f.write_str("\u{FFFD}")?;
            }
        }

        Ok(())
    }
}
