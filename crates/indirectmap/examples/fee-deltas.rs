// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! Tracks fee deltas for externally owned transactions without copying them.

use indirectmap::{IndirectKey, IndirectMap};

#[derive(Debug, PartialEq, Eq)]
struct Transaction {
    txid: [u8; 32],
    raw: Vec<u8>,
}

impl Transaction {
    fn new(seed: u8, raw: Vec<u8>) -> Self {
        let mut txid = [0u8; 32];
        for (i, byte) in txid.iter_mut().enumerate() {
            *byte = seed.wrapping_mul(31).wrapping_add(i as u8);
        }
        Self { txid, raw }
    }
}

impl IndirectKey for Transaction {
    fn cheap_hash(&self) -> u64 {
        let mut first = [0u8; 8];
        first.copy_from_slice(&self.txid[..8]);
        u64::from_le_bytes(first)
    }
}

fn main() {
    // The store owns the transactions; the map only borrows them.
    let store: Vec<Transaction> =
        (0..4).map(|seed| Transaction::new(seed, vec![seed; 100])).collect();

    let mut deltas: IndirectMap<Transaction, i64> = IndirectMap::new();
    for (i, tx) in store.iter().enumerate() {
        deltas.insert(tx, 1000 * (i as i64 + 1));
    }

    // Look up through a content-equal copy rather than the stored reference.
    let probe = Transaction::new(2, vec![2; 100]);
    println!("delta for txid {:02x?}...: {:?}", &probe.txid[..4], deltas.get(&probe));

    deltas.retain(|_, delta| *delta >= 2000);
    println!("{} deltas at or above 2000 retained", deltas.len());
}
