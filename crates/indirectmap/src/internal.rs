// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Validation support, used by tests to check map invariants explicitly.

use core::fmt;

/// An invariant violation found by `IndirectMap::validate`.
#[derive(Debug)]
pub struct ValidationError(String);

impl ValidationError {
    pub(crate) fn new(msg: impl Into<String>) -> Self {
        ValidationError(msg.into())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl std::error::Error for ValidationError {}
