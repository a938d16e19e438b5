// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{IndirectKey, IndirectMap};
use serde::{Serialize, Serializer};

/// An `IndirectMap` serializes to the sequence of `(key, value)` pairs, in
/// arbitrary order.
///
/// Serializing as a sequence rather than as a map works around the lack of
/// non-string keys in formats like JSON. Keys are serialized through the
/// stored reference, so the output carries full key content, not addresses.
///
/// There is no `Deserialize` implementation: entries borrow their keys from
/// external owners, and references into those owners cannot be fabricated
/// from serialized data. Callers that need to restore a map must
/// re-[`insert`](IndirectMap::insert) against their own key storage.
///
/// # Examples
///
/// ```
/// use indirectmap::{IndirectKey, IndirectMap};
///
/// #[derive(Debug, PartialEq, Eq, serde::Serialize)]
/// struct Tag(u32);
///
/// impl IndirectKey for Tag {
///     fn cheap_hash(&self) -> u64 {
///         u64::from(self.0)
///     }
/// }
///
/// let tag = Tag(7);
/// let mut map = IndirectMap::new();
/// map.insert(&tag, "seven");
///
/// assert_eq!(serde_json::to_string(&map).unwrap(), r#"[[7,"seven"]]"#);
/// ```
impl<'k, K, T> Serialize for IndirectMap<'k, K, T>
where
    K: IndirectKey + Serialize,
    T: Serialize,
{
    fn serialize<S: Serializer>(
        &self,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.iter())
    }
}
