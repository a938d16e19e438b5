// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Error types for this crate.

use core::fmt;

/// A key rejected by [`insert_unique`] because a content-equal key is
/// already present.
///
/// The error owns the rejected value and the rejected key reference, so a
/// caller that treats duplicates as recoverable can take both back. The
/// existing map entry is left untouched.
///
/// [`insert_unique`]: crate::IndirectMap::insert_unique
#[derive(Debug)]
pub struct DuplicateEntry<'k, K, T> {
    key: &'k K,
    value: T,
}

impl<'k, K, T> DuplicateEntry<'k, K, T> {
    pub(crate) fn new(key: &'k K, value: T) -> Self {
        Self { key, value }
    }

    /// Returns the rejected key reference.
    #[inline]
    pub fn key(&self) -> &'k K {
        self.key
    }

    /// Returns the rejected value.
    #[inline]
    pub fn value(&self) -> &T {
        &self.value
    }

    /// Converts self into the rejected value.
    pub fn into_value(self) -> T {
        self.value
    }

    /// Converts self into its constituent parts.
    pub fn into_parts(self) -> (&'k K, T) {
        (self.key, self.value)
    }
}

impl<K: fmt::Debug, T> fmt::Display for DuplicateEntry<'_, K, T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "key {:?} conflicts with an existing content-equal key",
            self.key
        )
    }
}

impl<K: fmt::Debug, T: fmt::Debug> core::error::Error
    for DuplicateEntry<'_, K, T>
{
}
