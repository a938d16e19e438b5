use indirectmap::IndirectKey;
use proptest::{collection, prelude::*, sample::SizeRange};
use test_strategy::Arbitrary;

/// A key with a deliberately weak cheap hash: only `bucket` feeds the hash,
/// so any two keys sharing a bucket collide while remaining unequal.
///
/// Both fields are `u8` to keep the content space small, which makes
/// proptests routinely produce content-equal keys at distinct addresses as
/// well as hash collisions.
#[derive(
    Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd, Arbitrary,
)]
pub struct TestKey {
    pub bucket: u8,
    pub lane: u8,
}

impl TestKey {
    pub fn new(bucket: u8, lane: u8) -> Self {
        Self { bucket, lane }
    }
}

impl IndirectKey for TestKey {
    fn cheap_hash(&self) -> u64 {
        u64::from(self.bucket)
    }
}

/// Strategy producing a universe of externally owned keys for map proptests.
///
/// The universe routinely contains content-equal keys at distinct slots
/// (exercising lookups through references other than the stored one) as well
/// as cheap-hash collisions.
pub fn key_universe_strategy(
    size: impl Into<SizeRange>,
) -> impl Strategy<Value = Vec<TestKey>> {
    collection::vec(any::<TestKey>(), size.into())
}
