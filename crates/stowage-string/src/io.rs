// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::io::{BufRead, ErrorKind};

use stowage_arena::RawAlloc;

use crate::byte_string::ByteString;
use crate::error::StringError;

impl<A: RawAlloc> ByteString<A> {
    /// Replaces the contents with the next line of `reader`.
    ///
    /// Reads up to and including `\n`, or to end of input. Returns the number
    /// of bytes read; 0 means end of input. Unlike a fixed-size `fgets`
    /// buffer, the line is never split.
    ///
    /// On error the string is left empty. Bytes already taken from `reader`
    /// for this line are lost.
    pub fn read_line<R: BufRead>(&mut self, reader: &mut R) -> Result<usize, StringError> {
        self.clear();

        loop {
            let available = match reader.fill_buf() {
                Ok(available) => available,
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(StringError::Io(err.kind())),
            };

            if available.is_empty() {
                return Ok(self.len());
            }

            let (line, done) = match available.iter().position(|&byte| byte == b'\n') {
                Some(newline) => (&available[..=newline], true),
                None => (available, false),
            };
            let consumed = line.len();

            if let Err(err) = self.cat_bytes(line) {
                self.clear();
                return Err(err);
            }
            reader.consume(consumed);

            if done {
                return Ok(self.len());
            }
        }
    }
}
