//! `std::hash` integration
//!
//! Lets `Murmur3` key standard collections. Each written byte is fed as one
//! code unit, so byte strings hash the same as the equivalent Latin-1 text.

use crate::Murmur3;
use std::hash::{BuildHasher, Hasher};

impl Hasher for Murmur3 {
    fn write(&mut self, bytes: &[u8]) {
        self.absorb(bytes.len(), bytes.iter().map(|&b| u16::from(b)));
    }

    fn finish(&self) -> u64 {
        u64::from(self.result())
    }
}

/// `BuildHasher` producing seeded `Murmur3` hashers
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Murmur3BuildHasher {
    seed: u32,
}

impl Murmur3BuildHasher {
    /// Build hashers starting from `seed`
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self { seed }
    }

    /// The seed given to every hasher
    #[must_use]
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

impl BuildHasher for Murmur3BuildHasher {
    type Hasher = Murmur3;

    fn build_hasher(&self) -> Murmur3 {
        Murmur3::with_seed(self.seed)
    }
}
