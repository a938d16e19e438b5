// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! A hash map that borrows its keys and compares them by content.
//!
//! See [`IndirectMap`] for details.

mod entry;
pub(crate) mod imp;
mod iter;
#[cfg(feature = "serde")]
mod serde_impls;
pub(crate) mod trait_defs;

pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use imp::IndirectMap;
pub use iter::{IntoIter, Iter, IterMut, Keys, Values, ValuesMut};
pub use trait_defs::IndirectKey;
