use indirectmap::{indirect_map::Entry, IndirectKey, IndirectMap};
use indirectmap_test_utils::{
    eq_props::{assert_eq_props, assert_ne_props},
    naive_map::NaiveMap,
    test_key::{key_universe_strategy, TestKey},
};
use proptest::prelude::*;
use test_strategy::{proptest, Arbitrary};

#[test]
fn insert_finds_by_content_not_address() {
    let k1 = TestKey::new(1, 1);
    let k2 = TestKey::new(1, 1);
    assert!(!std::ptr::eq(&k1, &k2));

    let mut map = IndirectMap::new();
    let (value, inserted) = map.insert(&k1, 10);
    assert!(inserted);
    assert_eq!(*value, 10);

    // A different reference with equal content resolves to the entry.
    assert_eq!(map.get(&k2), Some(&10));
    assert!(map.contains_key(&k2));

    // The stored reference is the one passed to insert, not a copy.
    let (stored, _) = map.get_key_value(&k2).unwrap();
    assert!(std::ptr::eq(stored, &k1));
}

#[test]
fn duplicate_insert_leaves_entry_untouched() {
    let k1 = TestKey::new(3, 7);
    let k2 = TestKey::new(3, 7);

    let mut map = IndirectMap::new();
    assert!(map.insert(&k1, "first").1);

    let (value, inserted) = map.insert(&k2, "second");
    assert!(!inserted);
    assert_eq!(*value, "first");
    assert_eq!(map.len(), 1);

    // The original key reference survives the rejected insert.
    let (stored, _) = map.get_key_value(&k2).unwrap();
    assert!(std::ptr::eq(stored, &k1));
}

#[test]
fn insert_unique_rejects_content_equal_key() {
    let k1 = TestKey::new(5, 5);
    let k2 = TestKey::new(5, 5);

    let mut map = IndirectMap::new();
    map.insert_unique(&k1, 1).unwrap();

    let error = map.insert_unique(&k2, 2).unwrap_err();
    assert!(std::ptr::eq(error.key(), &k2));
    assert_eq!(*error.value(), 2);
    assert_eq!(error.into_value(), 2);

    assert_eq!(map.len(), 1);
    assert_eq!(map.get(&k1), Some(&1));
}

#[test]
fn remove_by_content() {
    let keys: Vec<TestKey> = (0..4).map(|i| TestKey::new(i, 0)).collect();
    let mut map = IndirectMap::new();
    for (i, key) in keys.iter().enumerate() {
        map.insert(key, i);
    }
    assert_eq!(map.len(), 4);

    // Remove through a content-equal probe built on the stack.
    assert_eq!(map.remove(&TestKey::new(2, 0)), Some(2));
    assert_eq!(map.len(), 3);
    assert_eq!(map.get(&TestKey::new(2, 0)), None);

    // Removing an absent key is a no-op.
    assert_eq!(map.remove(&TestKey::new(2, 0)), None);
    assert_eq!(map.len(), 3);

    let (stored, value) = map.remove_entry(&TestKey::new(0, 0)).unwrap();
    assert!(std::ptr::eq(stored, &keys[0]));
    assert_eq!(value, 0);

    map.validate().unwrap();
}

#[test]
fn colliding_cheap_hashes_stay_distinct() {
    let k1 = TestKey::new(9, 0);
    let k2 = TestKey::new(9, 1);
    assert_eq!(k1.cheap_hash(), k2.cheap_hash());
    assert_ne!(k1, k2);

    let mut map = IndirectMap::new();
    map.insert(&k1, "a");
    map.insert(&k2, "b");
    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&"a"));
    assert_eq!(map.get(&k2), Some(&"b"));

    // Removing one of the colliding entries must not disturb the other.
    assert_eq!(map.remove(&k1), Some("a"));
    assert_eq!(map.get(&k1), None);
    assert_eq!(map.get(&k2), Some(&"b"));

    map.validate().unwrap();
}

#[test]
fn entry_api() {
    let k1 = TestKey::new(1, 2);
    let k2 = TestKey::new(1, 2);

    let mut map = IndirectMap::new();
    *map.entry(&k1).or_insert(0) += 5;
    // Content-equal key: reuses the same entry.
    *map.entry(&k2).or_insert(0) += 5;
    assert_eq!(map.get(&k1), Some(&10));

    map.entry(&k1).and_modify(|v| *v += 1).or_insert(100);
    assert_eq!(map.get(&k1), Some(&11));

    match map.entry(&k1) {
        Entry::Occupied(entry) => {
            // The first-inserted reference wins.
            assert!(std::ptr::eq(entry.key(), &k1));
            assert_eq!(entry.remove(), 11);
        }
        Entry::Vacant(_) => panic!("entry should be occupied"),
    }
    assert!(map.is_empty());

    match map.entry(&k2) {
        Entry::Vacant(entry) => {
            assert!(std::ptr::eq(entry.key(), &k2));
            entry.insert(1);
        }
        Entry::Occupied(_) => panic!("entry should be vacant"),
    }
    assert_eq!(map.get(&k1), Some(&1));
    map.validate().unwrap();
}

#[test]
fn iteration_matches_live_entries() {
    let keys: Vec<TestKey> = (0..8).map(|i| TestKey::new(i / 2, i)).collect();
    let mut map = IndirectMap::new();
    for (i, key) in keys.iter().enumerate() {
        map.insert(key, i);
    }

    let mut seen: Vec<(TestKey, usize)> =
        map.iter().map(|(k, v)| (*k, *v)).collect();
    seen.sort();
    let mut expected: Vec<(TestKey, usize)> =
        keys.iter().enumerate().map(|(i, k)| (*k, i)).collect();
    expected.sort();
    assert_eq!(seen, expected);

    // Iteration is restartable: a fresh iterator sees the same entries.
    assert_eq!(map.iter().count(), map.len());
    assert_eq!(map.keys().count(), map.len());
    assert_eq!(map.values().sum::<usize>(), (0..8).sum());

    // Mutating through iter_mut is visible afterwards.
    for (_, value) in map.iter_mut() {
        *value += 100;
    }
    for value in map.values_mut() {
        *value += 1000;
    }
    let total: usize = map.values().sum();
    assert_eq!(total, (0..8).sum::<usize>() + 8 * 1100);

    // Consuming iteration yields the stored references.
    let consumed: Vec<(&TestKey, usize)> = map.into_iter().collect();
    assert_eq!(consumed.len(), keys.len());
    for (stored, _) in consumed {
        assert!(keys.iter().any(|key| std::ptr::eq(stored, key)));
    }
}

#[test]
fn retain_removes_during_traversal() {
    let keys: Vec<TestKey> = (0..10).map(|i| TestKey::new(i, 0)).collect();
    let mut map = IndirectMap::new();
    for (i, key) in keys.iter().enumerate() {
        map.insert(key, i);
    }

    // Mutate every value, then drop the odd buckets mid-traversal.
    map.retain(|key, value| {
        *value += 1;
        key.bucket % 2 == 0
    });

    assert_eq!(map.len(), 5);
    for key in &keys {
        if key.bucket % 2 == 0 {
            assert_eq!(map.get(key), Some(&(key.bucket as usize + 1)));
        } else {
            assert!(!map.contains_key(key));
        }
    }
    map.validate().unwrap();
}

#[test]
fn capacity_and_clear() {
    let keys: Vec<TestKey> = (0..3).map(|i| TestKey::new(i, i)).collect();

    let mut map = IndirectMap::with_capacity(16);
    assert!(map.capacity() >= 16);

    for key in &keys {
        map.insert(key, u32::from(key.bucket));
    }

    // Growth re-buckets by content: entries stay reachable.
    map.reserve(100);
    assert!(map.capacity() >= 103);
    assert_eq!(map.get(&keys[1]), Some(&1));
    map.validate().unwrap();

    map.clear();
    assert!(map.is_empty());
    assert_eq!(map.len(), 0);
    assert_eq!(map.get(&keys[1]), None);

    // The cleared map is reusable.
    map.insert(&keys[0], 7);
    assert_eq!(map.len(), 1);
}

#[test]
fn growth_rehash_keeps_entries_reachable() {
    // Push well past the default capacity so several rehashes occur, with
    // every key sharing one of two cheap-hash buckets.
    let keys: Vec<TestKey> = (0..=255u8)
        .map(|i| TestKey::new(i % 2, i))
        .collect();

    let mut map = IndirectMap::new();
    for (i, key) in keys.iter().enumerate() {
        map.insert(key, i);
    }

    assert_eq!(map.len(), keys.len());
    for (i, key) in keys.iter().enumerate() {
        assert_eq!(map.get(key), Some(&i));
    }
    map.validate().unwrap();
}

#[test]
fn map_equality_is_content_keyed() {
    let a1 = TestKey::new(1, 1);
    let a2 = TestKey::new(1, 1);
    let b = TestKey::new(2, 2);

    let mut m1 = IndirectMap::new();
    m1.insert(&a1, 1);
    m1.insert(&b, 2);

    // Same contents through different references, inserted in a different
    // order.
    let mut m2 = IndirectMap::new();
    m2.insert(&b, 2);
    m2.insert(&a2, 1);

    assert_eq_props(m1.clone(), m2.clone());

    let mut m3 = m2.clone();
    m3.remove(&b);
    assert_ne_props(m1.clone(), m3);

    let mut m4 = m2.clone();
    *m4.get_mut(&a1).unwrap() = 9;
    assert_ne_props(m1, m4);
}

#[test]
fn from_iterator_first_wins() {
    let k1 = TestKey::new(4, 4);
    let k2 = TestKey::new(4, 4);
    let k3 = TestKey::new(5, 5);

    let map: IndirectMap<TestKey, u32> =
        vec![(&k1, 1), (&k2, 2), (&k3, 3)].into_iter().collect();

    assert_eq!(map.len(), 2);
    assert_eq!(map.get(&k1), Some(&1), "first insertion wins");
    assert!(std::ptr::eq(map.get_key_value(&k2).unwrap().0, &k1));
    assert_eq!(map.get(&k3), Some(&3));
}

#[derive(Debug, Arbitrary)]
enum Operation {
    // Make inserts more common to try and fill up the map.
    #[weight(3)]
    Insert(prop::sample::Index, u32),
    InsertUnique(prop::sample::Index, u32),
    Get(prop::sample::Index),
    ContainsKey(prop::sample::Index),
    #[weight(2)]
    Remove(prop::sample::Index),
}

#[proptest(cases = 64)]
fn proptest_ops_match_naive_map(
    #[strategy(key_universe_strategy(1..24usize))] universe: Vec<TestKey>,
    #[strategy(prop::collection::vec(any::<Operation>(), 0..256))] ops: Vec<
        Operation,
    >,
) {
    let mut map = IndirectMap::new();
    let mut naive = NaiveMap::new();

    for op in ops {
        match op {
            Operation::Insert(ix, value) => {
                let key = &universe[ix.index(universe.len())];
                let (_, inserted) = map.insert(key, value);
                assert_eq!(inserted, naive.insert(key, value));
                map.validate().unwrap();
            }
            Operation::InsertUnique(ix, value) => {
                let key = &universe[ix.index(universe.len())];
                let expect_ok = !naive.contains_key(key);
                let result = map.insert_unique(key, value);
                assert_eq!(result.is_ok(), expect_ok);
                if expect_ok {
                    naive.insert(key, value);
                }
                map.validate().unwrap();
            }
            Operation::Get(ix) => {
                let key = &universe[ix.index(universe.len())];
                assert_eq!(map.get(key), naive.get(key));
            }
            Operation::ContainsKey(ix) => {
                let key = &universe[ix.index(universe.len())];
                assert_eq!(map.contains_key(key), naive.contains_key(key));
            }
            Operation::Remove(ix) => {
                let key = &universe[ix.index(universe.len())];
                assert_eq!(map.remove(key), naive.remove(key));
                map.validate().unwrap();
            }
        }
        assert_eq!(map.len(), naive.len());
        assert_eq!(map.is_empty(), naive.is_empty());
    }

    // Iteration observes exactly the live entries.
    let mut seen: Vec<(TestKey, u32)> =
        map.iter().map(|(k, v)| (*k, *v)).collect();
    seen.sort();
    let mut expected: Vec<(TestKey, u32)> =
        naive.entries().map(|(k, v)| (*k, *v)).collect();
    expected.sort();
    assert_eq!(seen, expected);
}

#[cfg(feature = "serde")]
mod serde_tests {
    use indirectmap::{IndirectKey, IndirectMap};

    #[derive(Debug, Eq, PartialEq, serde::Serialize)]
    struct Tag(u32);

    impl IndirectKey for Tag {
        fn cheap_hash(&self) -> u64 {
            u64::from(self.0)
        }
    }

    #[test]
    fn serializes_as_pairs() {
        let tags = [Tag(1), Tag(2)];
        let mut map = IndirectMap::new();
        map.insert(&tags[0], "one");
        map.insert(&tags[1], "two");

        // Order is arbitrary, so parse the output back into pairs.
        let json = serde_json::to_string(&map).unwrap();
        let mut pairs: Vec<(u32, String)> =
            serde_json::from_str(&json).unwrap();
        pairs.sort();
        assert_eq!(
            pairs,
            vec![(1, "one".to_string()), (2, "two".to_string())]
        );
    }
}
