// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

//! Formatting into a [`ByteString`].
//!
//! `core::fmt::Write` can only report a unit error, so the `cat_fmt` family
//! runs the formatter through an [`Appender`] that remembers the vector
//! error behind a failed write and truncates the partial output.

use core::fmt;

use stowage_arena::RawAlloc;
use stowage_vec::VectorError;

use crate::byte_string::ByteString;
use crate::error::StringError;

struct Appender<'a, A: RawAlloc> {
    target: &'a mut ByteString<A>,
    remaining: Option<usize>,
    error: Option<VectorError>,
}

impl<A: RawAlloc> fmt::Write for Appender<'_, A> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        let mut bytes = text.as_bytes();

        if let Some(remaining) = self.remaining.as_mut() {
            bytes = &bytes[..bytes.len().min(*remaining)];
            *remaining -= bytes.len();
        }

        self.target.cat_bytes(bytes).map_err(|err| {
            if let StringError::Vector(err) = err {
                self.error = Some(err);
            }
            fmt::Error
        })
    }
}

impl<A: RawAlloc> ByteString<A> {
    fn append_formatted(&mut self, limit: Option<usize>, args: fmt::Arguments<'_>) -> Result<(), StringError> {
        let start = self.len();
        let mut appender = Appender {
            target: &mut *self,
            remaining: limit,
            error: None,
        };

        if fmt::write(&mut appender, args).is_ok() {
            return Ok(());
        }

        let error = appender.error;
        self.truncate(start);

        match error {
            Some(err) => Err(err.into()),
            None => Err(StringError::Format),
        }
    }

    /// Appends formatted text.
    ///
    /// All-or-nothing: if growth fails midway, the partial output is removed
    /// and the error is [`VectorError::OutOfMemory`].
    pub fn cat_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), StringError> {
        self.append_formatted(None, args)
    }

    /// Appends at most `n - 1` bytes of formatted text, leaving room for the
    /// terminator like `snprintf` does.
    pub fn cat_nfmt(&mut self, n: usize, args: fmt::Arguments<'_>) -> Result<(), StringError> {
        self.append_formatted(Some(n.saturating_sub(1)), args)
    }

    /// Replaces the contents with formatted text.
    pub fn format_into(&mut self, args: fmt::Arguments<'_>) -> Result<(), StringError> {
        self.clear();
        self.cat_fmt(args)
    }

    /// Replaces the contents with at most `n - 1` bytes of formatted text.
    pub fn nformat_into(&mut self, n: usize, args: fmt::Arguments<'_>) -> Result<(), StringError> {
        self.clear();
        self.cat_nfmt(n, args)
    }
}

impl<A: RawAlloc> fmt::Write for ByteString<A> {
    fn write_str(&mut self, text: &str) -> fmt::Result {
        self.cat_str(text).map_err(|_| fmt::Error)
    }
}
