use indirectmap::IndirectKey;

/// A transaction-like record for exercising maps keyed on large domain
/// objects.
///
/// The cheap hash is the first 8 id bytes interpreted as a little-endian
/// `u64`, so two ids that agree on those bytes collide while remaining
/// unequal. [`colliding`](TestTx::colliding) builds such an id on purpose.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TestTx {
    txid: [u8; 32],
}

impl TestTx {
    /// Derives an id from a label. Labels differing within their first 8
    /// bytes produce distinct cheap hashes.
    pub fn new(label: &str) -> Self {
        let bytes = label.as_bytes();
        let mut txid = [0u8; 32];
        for (i, slot) in txid.iter_mut().enumerate() {
            let byte = if bytes.is_empty() {
                0
            } else {
                bytes[i % bytes.len()]
            };
            *slot = byte.wrapping_add(i as u8);
        }
        Self { txid }
    }

    /// Builds a tx from a raw id.
    pub fn from_txid(txid: [u8; 32]) -> Self {
        Self { txid }
    }

    /// Returns the raw id.
    pub fn txid(&self) -> &[u8; 32] {
        &self.txid
    }

    /// Derives a tx whose cheap hash collides with `self` but whose content
    /// always differs. Distinct salts give distinct ids.
    pub fn colliding(&self, salt: u8) -> Self {
        let mut txid = self.txid;
        // Leave the first 8 bytes (the cheap-hash input) untouched.
        txid[30] ^= 0xa5;
        txid[31] = txid[31].wrapping_add(salt);
        Self { txid }
    }
}

impl IndirectKey for TestTx {
    fn cheap_hash(&self) -> u64 {
        let mut first = [0u8; 8];
        first.copy_from_slice(&self.txid[..8]);
        u64::from_le_bytes(first)
    }
}

/// Height and time thresholds at which a pool entry becomes final.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub struct LockPoints {
    pub height: i32,
    pub time: i64,
    /// Height of the entry's highest input block, when known.
    pub max_input_height: Option<u32>,
}

/// A fully-populated pool entry: an owned copy of the transaction plus its
/// pool metadata. Produced by [`PoolEntryBuilder`].
#[derive(Clone, Debug, PartialEq)]
pub struct PoolEntry {
    tx: TestTx,
    fee: i64,
    time: i64,
    priority: f64,
    height: u32,
    had_no_dependencies: bool,
    spends_coinbase: bool,
    sig_op_cost: u32,
    lock_points: LockPoints,
}

impl PoolEntry {
    pub fn tx(&self) -> &TestTx {
        &self.tx
    }

    pub fn fee(&self) -> i64 {
        self.fee
    }

    pub fn time(&self) -> i64 {
        self.time
    }

    pub fn priority(&self) -> f64 {
        self.priority
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn had_no_dependencies(&self) -> bool {
        self.had_no_dependencies
    }

    pub fn spends_coinbase(&self) -> bool {
        self.spends_coinbase
    }

    pub fn sig_op_cost(&self) -> u32 {
        self.sig_op_cost
    }

    pub fn lock_points(&self) -> LockPoints {
        self.lock_points
    }
}

/// Accumulates pool-entry field values and produces entries from
/// transactions.
///
/// Every field starts at a documented default (zero fee, zero time, zero
/// priority, height 1, no flags set, sig-op cost 4, zero lock points) and
/// can be overridden through chained setters. Each setter consumes and
/// returns the configuration, so overrides accumulate without hidden state:
///
/// ```
/// use indirectmap_test_utils::pool_entry::{PoolEntryBuilder, TestTx};
///
/// let builder = PoolEntryBuilder::new().fee(1000).height(11);
/// let entry = builder.from_tx(&TestTx::new("tx"));
/// assert_eq!(entry.fee(), 1000);
/// assert_eq!(entry.height(), 11);
/// assert_eq!(entry.sig_op_cost(), 4);
/// ```
#[derive(Clone, Debug)]
pub struct PoolEntryBuilder {
    fee: i64,
    time: i64,
    priority: f64,
    height: u32,
    had_no_dependencies: bool,
    spends_coinbase: bool,
    sig_op_cost: u32,
    lock_points: LockPoints,
}

impl Default for PoolEntryBuilder {
    fn default() -> Self {
        Self {
            fee: 0,
            time: 0,
            priority: 0.0,
            height: 1,
            had_no_dependencies: false,
            spends_coinbase: false,
            sig_op_cost: 4,
            lock_points: LockPoints::default(),
        }
    }
}

impl PoolEntryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fee(mut self, fee: i64) -> Self {
        self.fee = fee;
        self
    }

    pub fn time(mut self, time: i64) -> Self {
        self.time = time;
        self
    }

    pub fn priority(mut self, priority: f64) -> Self {
        self.priority = priority;
        self
    }

    pub fn height(mut self, height: u32) -> Self {
        self.height = height;
        self
    }

    pub fn had_no_dependencies(mut self, had_no_dependencies: bool) -> Self {
        self.had_no_dependencies = had_no_dependencies;
        self
    }

    pub fn spends_coinbase(mut self, spends_coinbase: bool) -> Self {
        self.spends_coinbase = spends_coinbase;
        self
    }

    pub fn sig_op_cost(mut self, sig_op_cost: u32) -> Self {
        self.sig_op_cost = sig_op_cost;
        self
    }

    pub fn lock_points(mut self, lock_points: LockPoints) -> Self {
        self.lock_points = lock_points;
        self
    }

    /// Produces an entry from a borrowed transaction, copying it in.
    pub fn from_tx(&self, tx: &TestTx) -> PoolEntry {
        self.from_tx_owned(tx.clone())
    }

    /// Produces an entry that takes ownership of the transaction.
    pub fn from_tx_owned(&self, tx: TestTx) -> PoolEntry {
        PoolEntry {
            tx,
            fee: self.fee,
            time: self.time,
            priority: self.priority,
            height: self.height,
            had_no_dependencies: self.had_no_dependencies,
            spends_coinbase: self.spends_coinbase,
            sig_op_cost: self.sig_op_cost,
            lock_points: self.lock_points,
        }
    }
}
