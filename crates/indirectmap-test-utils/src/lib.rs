//! Test scaffolding for the `indirectmap` crate.
//!
//! Nothing here is part of the container's contract: this crate only builds
//! the key and value objects the container is exercised with, plus a naive
//! oracle for property-based tests.

pub mod eq_props;
pub mod naive_map;
pub mod pool_entry;
pub mod test_key;
