//! Stable combination of field hashes

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

/// Multiplier applied to the running hash before each field is mixed in
pub const HASH_PRIME: u64 = 92821;

/// Starting value of every combined hash
pub const HASH_SEED: u64 = 46411;

/// Accumulates representing fields into a single hash code.
///
/// Each step computes `result * HASH_PRIME + hash(field)` with wrapping
/// arithmetic, so the outcome depends on field order as well as on values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RepresentingHash {
    result: u64,
}

impl RepresentingHash {
    pub fn new() -> Self {
        Self { result: HASH_SEED }
    }

    #[must_use]
    pub fn field<T: Hash + ?Sized>(self, value: &T) -> Self {
        let mut hasher = DefaultHasher::new();
        value.hash(&mut hasher);
        Self {
            result: self
                .result
                .wrapping_mul(HASH_PRIME)
                .wrapping_add(hasher.finish()),
        }
    }

    pub fn finish(self) -> u64 {
        self.result
    }
}

impl Default for RepresentingHash {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
#[path = "hashing/hashing_tests.rs"]
mod hashing_tests;
