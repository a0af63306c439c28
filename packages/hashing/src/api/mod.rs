//! Fluent hashing API
//!
//! Usage: `Hash::murmur3().with_seed(seed).compute(text).await`

pub mod murmur3_builder;

pub use murmur3_builder::{Murmur3Builder, Murmur3BuilderWithError, Murmur3BuilderWithHandler};

/// Entry point for hash operations
pub struct Hash;

impl Hash {
    /// Use MurmurHash3 x86-32
    #[must_use]
    pub fn murmur3() -> Murmur3Builder {
        Murmur3Builder::new()
    }
}
