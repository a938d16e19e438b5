// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::{
    Entry, IndirectKey, IntoIter, Iter, IterMut, Keys, OccupiedEntry,
    VacantEntry, Values, ValuesMut,
};
use crate::{
    errors::DuplicateEntry,
    internal::ValidationError,
    support::deref_policy::{deref_eq, deref_hash},
};
use core::fmt;
use hashbrown::{hash_table, HashTable};

/// A hash map that stores references to externally owned keys, but hashes and
/// compares them by their dereferenced content.
///
/// Entries are `(&'k K, T)` pairs: the key object stays wherever it is owned,
/// and the map keeps a borrow of it for as long as the entry is live. Bucket
/// placement uses the key's [cheap hash] directly, and in-bucket
/// disambiguation uses full content equality, so any reference to
/// content-equal data -- not just the stored reference -- resolves to the
/// same entry.
///
/// Content-equal keys are unique within the map: [`insert`] does not
/// overwrite an existing entry, matching the usual hash-map insertion
/// contract.
///
/// Iteration order is arbitrary: not insertion order, and not stable across
/// mutations.
///
/// [cheap hash]: IndirectKey::cheap_hash
/// [`insert`]: IndirectMap::insert
pub struct IndirectMap<'k, K: IndirectKey, T> {
    entries: HashTable<(&'k K, T)>,
}

impl<'k, K: IndirectKey, T> IndirectMap<'k, K, T> {
    /// Creates a new, empty `IndirectMap`.
    #[inline]
    pub fn new() -> Self {
        Self { entries: HashTable::new() }
    }

    /// Creates a new `IndirectMap` with the given capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self { entries: HashTable::with_capacity(capacity) }
    }

    /// Returns the currently allocated capacity of the map.
    pub fn capacity(&self) -> usize {
        self.entries.capacity()
    }

    /// Reserves capacity for at least `additional` more entries.
    ///
    /// Any rehash triggered by the reservation re-buckets every live entry by
    /// its key's content hash.
    pub fn reserve(&mut self, additional: usize) {
        self.entries.reserve(additional, |&(stored, _)| deref_hash(stored));
    }

    /// Returns true if the map is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Returns the number of entries in the map.
    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Drops every entry, destroying the values and releasing the key
    /// borrows. The key objects themselves are untouched.
    pub fn clear(&mut self) {
        self.entries.clear();
    }

    /// Inserts a value for `key` unless a content-equal key is already
    /// present.
    ///
    /// Returns a reference to the entry's value together with a flag that is
    /// true if this call inserted the entry. On a duplicate the existing
    /// entry -- including its original key reference -- is left untouched,
    /// the flag is false, and `value` is dropped.
    ///
    /// # Examples
    ///
    /// ```
    /// # use indirectmap::{IndirectKey, IndirectMap};
    /// # #[derive(Debug, PartialEq, Eq)]
    /// # struct Label(String);
    /// # impl IndirectKey for Label {
    /// #     fn cheap_hash(&self) -> u64 {
    /// #         self.0.len() as u64
    /// #     }
    /// # }
    /// let first = Label("genesis".to_owned());
    /// let second = Label("genesis".to_owned());
    ///
    /// let mut map = IndirectMap::new();
    /// let (_, inserted) = map.insert(&first, 0);
    /// assert!(inserted);
    ///
    /// // `second` is content-equal, so the slot is already taken.
    /// let (height, inserted) = map.insert(&second, 99);
    /// assert!(!inserted);
    /// assert_eq!(*height, 0);
    /// ```
    pub fn insert(&mut self, key: &'k K, value: T) -> (&mut T, bool) {
        match self.entry(key) {
            Entry::Occupied(entry) => (entry.into_mut(), false),
            Entry::Vacant(entry) => (entry.insert(value), true),
        }
    }

    /// Inserts a value for `key`, returning an error if a content-equal key
    /// is already present.
    ///
    /// Unlike [`insert`](IndirectMap::insert), a duplicate is reported as a
    /// [`DuplicateEntry`] carrying the rejected key reference and value, so
    /// callers that treat duplicates as a bug can recover both.
    pub fn insert_unique(
        &mut self,
        key: &'k K,
        value: T,
    ) -> Result<(), DuplicateEntry<'k, K, T>> {
        match self.entry(key) {
            Entry::Occupied(_) => Err(DuplicateEntry::new(key, value)),
            Entry::Vacant(entry) => {
                entry.insert(value);
                Ok(())
            }
        }
    }

    /// Returns true if the map holds an entry whose key is content-equal to
    /// `key`.
    pub fn contains_key(&self, key: &K) -> bool {
        self.get(key).is_some()
    }

    /// Gets a reference to the value whose key is content-equal to `key`.
    ///
    /// `key` does not need to be the stored reference; any object with equal
    /// content resolves to the same entry.
    pub fn get(&self, key: &K) -> Option<&T> {
        self.entries
            .find(deref_hash(key), |&(stored, _)| deref_eq(stored, key))
            .map(|(_, value)| value)
    }

    /// Gets the stored key reference and value for `key`.
    ///
    /// The returned reference is the one passed to the original insertion,
    /// which may outlive `key` itself.
    pub fn get_key_value(&self, key: &K) -> Option<(&'k K, &T)> {
        self.entries
            .find(deref_hash(key), |&(stored, _)| deref_eq(stored, key))
            .map(|&(stored, ref value)| (stored, value))
    }

    /// Gets a mutable reference to the value whose key is content-equal to
    /// `key`.
    pub fn get_mut(&mut self, key: &K) -> Option<&mut T> {
        self.entries
            .find_mut(deref_hash(key), |&(stored, _)| deref_eq(stored, key))
            .map(|(_, value)| value)
    }

    /// Removes the entry whose key is content-equal to `key`, returning its
    /// value.
    ///
    /// Returns `None` (and leaves the map unchanged) if no such entry exists.
    pub fn remove(&mut self, key: &K) -> Option<T> {
        self.remove_entry(key).map(|(_, value)| value)
    }

    /// Removes the entry whose key is content-equal to `key`, returning the
    /// stored key reference and the value.
    pub fn remove_entry(&mut self, key: &K) -> Option<(&'k K, T)> {
        match self
            .entries
            .find_entry(deref_hash(key), |&(stored, _)| deref_eq(stored, key))
        {
            Ok(entry) => {
                let ((stored, value), _) = entry.remove();
                Some((stored, value))
            }
            Err(_) => None,
        }
    }

    /// Retrieves the entry for `key`, occupied or vacant.
    ///
    /// This is the handle-based surface: an [`OccupiedEntry`] supports
    /// in-place access and single-entry removal without a second lookup.
    ///
    /// # Examples
    ///
    /// ```
    /// # use indirectmap::{IndirectKey, IndirectMap};
    /// # #[derive(Debug, PartialEq, Eq)]
    /// # struct Label(String);
    /// # impl IndirectKey for Label {
    /// #     fn cheap_hash(&self) -> u64 {
    /// #         self.0.len() as u64
    /// #     }
    /// # }
    /// let label = Label("seen".to_owned());
    /// let mut counts = IndirectMap::new();
    ///
    /// *counts.entry(&label).or_insert(0) += 1;
    /// *counts.entry(&label).or_insert(0) += 1;
    /// assert_eq!(counts.get(&label), Some(&2));
    /// ```
    pub fn entry(&mut self, key: &'k K) -> Entry<'_, 'k, K, T> {
        match self.entries.entry(
            deref_hash(key),
            |&(stored, _)| deref_eq(stored, key),
            |&(stored, _)| deref_hash(stored),
        ) {
            hash_table::Entry::Occupied(inner) => {
                Entry::Occupied(OccupiedEntry::new(inner))
            }
            hash_table::Entry::Vacant(inner) => {
                Entry::Vacant(VacantEntry::new(key, inner))
            }
        }
    }

    /// Retains only the entries for which `keep` returns true.
    ///
    /// This is the traversal-safe removal surface: each live entry is visited
    /// exactly once, and entries removed mid-traversal do not disturb the
    /// rest of the iteration.
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&'k K, &mut T) -> bool,
    {
        self.entries.retain(|&mut (key, ref mut value)| keep(key, value));
    }

    /// Iterates over the entries as `(key reference, value)` pairs.
    #[inline]
    pub fn iter(&self) -> Iter<'_, 'k, K, T> {
        Iter::new(&self.entries)
    }

    /// Iterates over the entries, with mutable access to the values.
    ///
    /// Keys are never handed out mutably: changing a stored key's content
    /// would invalidate its bucket.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, 'k, K, T> {
        IterMut::new(&mut self.entries)
    }

    /// Iterates over the stored key references.
    #[inline]
    pub fn keys(&self) -> Keys<'_, 'k, K, T> {
        Keys::new(&self.entries)
    }

    /// Iterates over the values.
    #[inline]
    pub fn values(&self) -> Values<'_, 'k, K, T> {
        Values::new(&self.entries)
    }

    /// Iterates over the values mutably.
    #[inline]
    pub fn values_mut(&mut self) -> ValuesMut<'_, 'k, K, T> {
        ValuesMut::new(&mut self.entries)
    }

    /// Checks general invariants of the map.
    ///
    /// The code above always upholds these invariants, but it's useful to
    /// have an explicit check for tests.
    #[doc(hidden)]
    pub fn validate(&self) -> Result<(), ValidationError> {
        let mut visited = 0usize;
        for (key, _) in self.iter() {
            visited += 1;

            // Every entry must be reachable under its own content hash, and
            // the entry it resolves to must be itself (anything else means
            // two content-equal keys are live at once).
            let Some((stored, _)) = self.get_key_value(key) else {
                return Err(ValidationError::new(format!(
                    "entry with cheap hash {:#x} is unreachable by its own key",
                    key.cheap_hash()
                )));
            };
            if !core::ptr::eq(stored, key) {
                return Err(ValidationError::new(format!(
                    "two live entries share content (cheap hash {:#x})",
                    key.cheap_hash()
                )));
            }
        }

        if visited != self.len() {
            return Err(ValidationError::new(format!(
                "iteration visited {visited} entries, but len() is {}",
                self.len()
            )));
        }

        Ok(())
    }
}

impl<'k, K: IndirectKey, T> Default for IndirectMap<'k, K, T> {
    #[inline]
    fn default() -> Self {
        Self::new()
    }
}

impl<'k, K: IndirectKey, T: Clone> Clone for IndirectMap<'k, K, T> {
    fn clone(&self) -> Self {
        Self { entries: self.entries.clone() }
    }
}

impl<K: IndirectKey + fmt::Debug, T: fmt::Debug> fmt::Debug
    for IndirectMap<'_, K, T>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'k, K: IndirectKey, T: PartialEq> PartialEq for IndirectMap<'k, K, T> {
    fn eq(&self, other: &Self) -> bool {
        // Two maps are equal if they hold the same set of (key content,
        // value) pairs. Iteration order is arbitrary, so walk one map and
        // look each entry up in the other by content.
        if self.len() != other.len() {
            return false;
        }
        self.iter()
            .all(|(key, value)| other.get(key).is_some_and(|v| v == value))
    }
}

// The Eq bound on T ensures that map equality forms an equivalence class.
impl<'k, K: IndirectKey, T: Eq> Eq for IndirectMap<'k, K, T> {}

impl<'a, 'k, K: IndirectKey, T> IntoIterator for &'a IndirectMap<'k, K, T> {
    type Item = (&'k K, &'a T);
    type IntoIter = Iter<'a, 'k, K, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, 'k, K: IndirectKey, T> IntoIterator
    for &'a mut IndirectMap<'k, K, T>
{
    type Item = (&'k K, &'a mut T);
    type IntoIter = IterMut<'a, 'k, K, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<'k, K: IndirectKey, T> IntoIterator for IndirectMap<'k, K, T> {
    type Item = (&'k K, T);
    type IntoIter = IntoIter<'k, K, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter::new(self.entries)
    }
}

/// Duplicate pairs are dropped: the first insertion of a given key content
/// wins, matching [`IndirectMap::insert`].
impl<'k, K: IndirectKey, T> Extend<(&'k K, T)> for IndirectMap<'k, K, T> {
    fn extend<I: IntoIterator<Item = (&'k K, T)>>(&mut self, iter: I) {
        for (key, value) in iter {
            self.insert(key, value);
        }
    }
}

/// Duplicate pairs are dropped: the first insertion of a given key content
/// wins, matching [`IndirectMap::insert`].
impl<'k, K: IndirectKey, T> FromIterator<(&'k K, T)>
    for IndirectMap<'k, K, T>
{
    fn from_iter<I: IntoIterator<Item = (&'k K, T)>>(iter: I) -> Self {
        let mut map = IndirectMap::new();
        map.extend(iter);
        map
    }
}
