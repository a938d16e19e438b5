// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

/// A key type usable with an [`IndirectMap`].
///
/// This trait pairs content equality (the `Eq` supertrait) with a cheap,
/// deterministic hash over the same content. The map dereferences stored key
/// references and delegates to these two operations for all bucket selection
/// and in-bucket disambiguation; reference identity never participates.
///
/// # Contract
///
/// - `cheap_hash` must be pure: it depends only on the current content, with
///   no hidden state and no randomness.
/// - `cheap_hash` must be consistent with `Eq`: content-equal objects return
///   equal hashes. The converse is not required -- the hash may be a fast,
///   partial, non-cryptographic digest, and unequal objects may collide. The
///   map resolves collisions through full content equality, so a weak hash
///   affects performance, never correctness.
/// - While an object is referenced by a live map entry, it must not be
///   mutated (e.g. through interior mutability) in any way that changes its
///   equality outcome or its cheap hash. Violating this leaves the entry
///   unreachable or misclassified; it is a logic error, not memory unsafety,
///   on par with mutating a `HashMap` key through a `Cell`.
///
/// # Examples
///
/// ```
/// use indirectmap::{IndirectKey, IndirectMap};
///
/// #[derive(Debug, PartialEq, Eq)]
/// struct Outpoint {
///     txid: [u8; 32],
///     vout: u32,
/// }
///
/// impl IndirectKey for Outpoint {
///     fn cheap_hash(&self) -> u64 {
///         let mut first = [0u8; 8];
///         first.copy_from_slice(&self.txid[..8]);
///         u64::from_le_bytes(first) ^ u64::from(self.vout)
///     }
/// }
///
/// let out = Outpoint { txid: [0xab; 32], vout: 0 };
/// let mut spenders = IndirectMap::new();
/// spenders.insert(&out, "tx 42");
///
/// // Any content-equal object resolves to the same entry.
/// let probe = Outpoint { txid: [0xab; 32], vout: 0 };
/// assert_eq!(spenders.get(&probe), Some(&"tx 42"));
/// ```
///
/// [`IndirectMap`]: crate::IndirectMap
pub trait IndirectKey: Eq {
    /// Returns a cheap, deterministic hash of this object's content.
    fn cheap_hash(&self) -> u64;
}
