// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Maps that borrow their keys and compare them by content.
//!
//! # Motivation
//!
//! Consider a lookup structure keyed on large, uniquely-owned domain objects:
//! transactions in a pool, records in an arena, interned descriptors. A plain
//! `HashMap` forces a choice between copying each key into the map:
//!
//! ```
//! use std::collections::HashMap;
//!
//! #[derive(Clone, Hash, PartialEq, Eq)]
//! struct Transaction {
//!     // Large: id plus the full serialized payload.
//!     txid: [u8; 32],
//!     raw: Vec<u8>,
//! }
//!
//! // Every insert duplicates the whole transaction.
//! let map: HashMap<Transaction, u64> = HashMap::new();
//! ```
//!
//! or keying on the objects' addresses, which breaks as soon as a caller looks
//! up through a different but content-equal reference:
//!
//! ```
//! # use std::collections::HashMap;
//! # struct Transaction;
//! // Two content-equal transactions at different addresses are two
//! // different keys here.
//! let map: HashMap<*const Transaction, u64> = HashMap::new();
//! ```
//!
//! [`IndirectMap`] closes that gap. It stores a *reference* to each key
//! object, but hashes and compares the *dereferenced content*: any reference
//! to equal content resolves to the same entry, and nothing is copied. The
//! borrow checker guarantees that every key object outlives its map entry.
//!
//! Key types opt in through the [`IndirectKey`] trait, which pairs content
//! equality with a cheap, deterministic content hash. The hash is used as-is
//! for bucketing; it does not need to be collision-free, because the map
//! always falls back to full content equality within a bucket.
//!
//! ```
//! use indirectmap::{IndirectKey, IndirectMap};
//!
//! #[derive(Debug, PartialEq, Eq)]
//! struct Transaction {
//!     txid: [u8; 32],
//!     raw: Vec<u8>,
//! }
//!
//! impl IndirectKey for Transaction {
//!     fn cheap_hash(&self) -> u64 {
//!         // The leading id bytes are already uniformly distributed.
//!         let mut first = [0u8; 8];
//!         first.copy_from_slice(&self.txid[..8]);
//!         u64::from_le_bytes(first)
//!     }
//! }
//!
//! // The transaction store owns the objects; the map only borrows them.
//! let store = vec![
//!     Transaction { txid: [0x11; 32], raw: vec![1, 2, 3] },
//!     Transaction { txid: [0x22; 32], raw: vec![4, 5, 6] },
//! ];
//!
//! let mut fee_deltas: IndirectMap<Transaction, i64> = IndirectMap::new();
//! for (i, tx) in store.iter().enumerate() {
//!     fee_deltas.insert(tx, 1000 * (i as i64 + 1));
//! }
//!
//! // Lookups go through content, not addresses: a separately built
//! // transaction with the same content finds the stored entry.
//! let probe = Transaction { txid: [0x22; 32], raw: vec![4, 5, 6] };
//! assert_eq!(fee_deltas.get(&probe), Some(&2000));
//! ```

#![warn(missing_docs)]

pub mod errors;
pub mod indirect_map;
#[doc(hidden)]
pub mod internal;
mod support;

pub use indirect_map::{imp::IndirectMap, trait_defs::IndirectKey};
