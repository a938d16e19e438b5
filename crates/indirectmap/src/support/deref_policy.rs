// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Adapters that turn reference-based table operations into content-based
//! ones.
//!
//! Every bucket selection, in-bucket comparison, and growth rehash in the map
//! funnels through these two functions, so reference identity can never leak
//! into table placement.

use crate::IndirectKey;

/// Hashes a borrowed key by its pointed-to content.
#[inline]
pub(crate) fn deref_hash<K: IndirectKey>(key: &K) -> u64 {
    key.cheap_hash()
}

/// Compares two borrowed keys by their pointed-to content.
#[inline]
pub(crate) fn deref_eq<K: IndirectKey>(a: &K, b: &K) -> bool {
    *a == *b
}
