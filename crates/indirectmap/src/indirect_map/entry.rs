// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

use super::IndirectKey;
use core::fmt;
use hashbrown::hash_table;

/// An implementation of the Entry API for [`IndirectMap`].
///
/// Created by [`IndirectMap::entry`]. An occupied entry doubles as the
/// map's removal handle: it can be deleted in place without a second lookup.
///
/// [`IndirectMap`]: crate::IndirectMap
/// [`IndirectMap::entry`]: crate::IndirectMap::entry
pub enum Entry<'a, 'k, K: IndirectKey, T> {
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, 'k, K, T>),
    /// A vacant entry.
    Vacant(VacantEntry<'a, 'k, K, T>),
}

impl<'a, 'k, K: IndirectKey, T> Entry<'a, 'k, K, T> {
    /// Ensures a value is in the entry by inserting the default if vacant,
    /// and returns a mutable reference to the value.
    #[inline]
    pub fn or_insert(self, default: T) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Ensures a value is in the entry by inserting the result of `default`
    /// if vacant, and returns a mutable reference to the value.
    #[inline]
    pub fn or_insert_with<F: FnOnce() -> T>(self, default: F) -> &'a mut T {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts into the map.
    #[inline]
    pub fn and_modify<F: FnOnce(&mut T)>(self, f: F) -> Self {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns the key reference associated with this entry.
    ///
    /// For an occupied entry this is the stored reference, which may differ
    /// in identity (but never in content) from the reference passed to
    /// [`IndirectMap::entry`].
    ///
    /// [`IndirectMap::entry`]: crate::IndirectMap::entry
    pub fn key(&self) -> &'k K {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<K: IndirectKey + fmt::Debug, T: fmt::Debug> fmt::Debug
    for Entry<'_, '_, K, T>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Entry::Occupied(entry) => {
                f.debug_tuple("Occupied").field(entry).finish()
            }
            Entry::Vacant(entry) => {
                f.debug_tuple("Vacant").field(entry).finish()
            }
        }
    }
}

/// A view into an occupied entry in an [`IndirectMap`]. Part of the
/// [`Entry`] enum.
///
/// [`IndirectMap`]: crate::IndirectMap
pub struct OccupiedEntry<'a, 'k, K: IndirectKey, T> {
    inner: hash_table::OccupiedEntry<'a, (&'k K, T)>,
}

impl<'a, 'k, K: IndirectKey, T> OccupiedEntry<'a, 'k, K, T> {
    pub(super) fn new(
        inner: hash_table::OccupiedEntry<'a, (&'k K, T)>,
    ) -> Self {
        Self { inner }
    }

    /// Returns the stored key reference.
    pub fn key(&self) -> &'k K {
        self.inner.get().0
    }

    /// Gets a reference to the value.
    pub fn get(&self) -> &T {
        &self.inner.get().1
    }

    /// Gets a mutable reference to the value.
    ///
    /// If a reference outliving the destruction of the `Entry` value is
    /// needed, see [`into_mut`](Self::into_mut).
    pub fn get_mut(&mut self) -> &mut T {
        &mut self.inner.get_mut().1
    }

    /// Converts self into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut T {
        &mut self.inner.into_mut().1
    }

    /// Removes the entry, returning its value.
    ///
    /// The value is the only thing destroyed: the key object, owned
    /// elsewhere, is merely no longer borrowed.
    pub fn remove(self) -> T {
        self.remove_entry().1
    }

    /// Removes the entry, returning the stored key reference and the value.
    pub fn remove_entry(self) -> (&'k K, T) {
        let ((key, value), _) = self.inner.remove();
        (key, value)
    }
}

impl<K: IndirectKey + fmt::Debug, T: fmt::Debug> fmt::Debug
    for OccupiedEntry<'_, '_, K, T>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OccupiedEntry")
            .field("key", self.key())
            .field("value", self.get())
            .finish_non_exhaustive()
    }
}

/// A view into a vacant entry in an [`IndirectMap`]. Part of the [`Entry`]
/// enum.
///
/// [`IndirectMap`]: crate::IndirectMap
pub struct VacantEntry<'a, 'k, K: IndirectKey, T> {
    key: &'k K,
    inner: hash_table::VacantEntry<'a, (&'k K, T)>,
}

impl<'a, 'k, K: IndirectKey, T> VacantEntry<'a, 'k, K, T> {
    pub(super) fn new(
        key: &'k K,
        inner: hash_table::VacantEntry<'a, (&'k K, T)>,
    ) -> Self {
        Self { key, inner }
    }

    /// Returns the key reference that would be stored on insertion.
    pub fn key(&self) -> &'k K {
        self.key
    }

    /// Inserts a value, storing the key reference alongside it, and returns
    /// a mutable reference to the value.
    pub fn insert(self, value: T) -> &'a mut T {
        &mut self.inner.insert((self.key, value)).into_mut().1
    }
}

impl<K: IndirectKey + fmt::Debug, T> fmt::Debug
    for VacantEntry<'_, '_, K, T>
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VacantEntry")
            .field("key", self.key)
            .finish_non_exhaustive()
    }
}
