//! A dictionary for fixed-width keys, backed by a byte-indexed radix trie.
//!
//! This crate provides [`ByteDict`], a key-value container that descends one
//! key byte per level through nodes of fan-out 256, so lookup cost is
//! bounded by the key's byte width rather than by the number of stored
//! pairs.
//!
//! # Features
//!
//! - O(W) lookups where W is the fixed byte width of the key type
//! - Any [`FixedKey`] works as a key: fixed-width integers, `[u8; N]`, or a
//!   [`Digest`] fabricated from variable-length data
//! - Pool-backed storage with stable indices; deep copies are plain pool
//!   clones
//! - Entry API for single-descent read-modify-write
//! - Accounting hooks: node count, allocated/used byte estimates, and a
//!   per-key depth probe

mod byte_dict;
mod entry;
mod hash;
mod key;
mod node;
mod pool;

pub use byte_dict::ByteDict;
pub use entry::{Entry, OccupiedEntry, VacantEntry};
pub use hash::Fnv1a64;
pub use key::{Digest, FixedKey};

#[cfg(test)]
mod proptest_dict;
