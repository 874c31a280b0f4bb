// Copyright (c) 2025-2026 Federico Hoerth <memparanoid@gmail.com>
// SPDX-License-Identifier: GPL-3.0-only
// See LICENSE in the repository root for full license text.

use std::cell::RefCell;
use std::rc::Rc;

use crate::{Hooks, VectorError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Event {
    Copy(u32),
    Destroy(u32),
}

/// Hooks that log every call and can be told to reject one value.
#[derive(Debug, Clone, Default)]
pub(crate) struct Recorder {
    log: Rc<RefCell<Vec<Event>>>,
    reject: Option<u32>,
}

impl Recorder {
    pub(crate) fn rejecting(value: u32) -> Self {
        Self {
            log: Rc::default(),
            reject: Some(value),
        }
    }

    pub(crate) fn events(&self) -> Vec<Event> {
        self.log.borrow().clone()
    }

    pub(crate) fn forget(&self) {
        self.log.borrow_mut().clear();
    }
}

impl Hooks<u32> for Recorder {
    fn copy(&self, src: &u32) -> Result<u32, VectorError> {
        if self.reject == Some(*src) {
            return Err(VectorError::OutOfMemory);
        }

        self.log.borrow_mut().push(Event::Copy(*src));
        Ok(*src)
    }

    fn destroy(&self, value: u32) {
        self.log.borrow_mut().push(Event::Destroy(value));
    }
}
