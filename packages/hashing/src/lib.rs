//! Incremental MurmurHash3 x86-32 (r136) over UTF-16 text
//!
//! Feed text in any number of chunks and read the 32-bit hash at any point:
//!
//! ```
//! use imurmur_hashing::Murmur3;
//!
//! let mut hasher = Murmur3::new();
//! hasher.feed("hello ").feed("world");
//! assert_eq!(hasher.result(), imurmur_hashing::murmur3_32("hello world", 0));
//! ```
//!
//! Not a cryptographic hash.

#![forbid(unsafe_code)]

pub mod api;
pub mod async_result;
pub mod error;
pub mod hash_result;
pub mod murmur3;
pub mod pool;
pub mod std_hash;
pub mod streaming;

// Re-export error types
pub use error::{HashError, Result};

// Core hasher
pub use murmur3::{Murmur3, murmur3_32};

// Async builder API
pub use api::{Hash, Murmur3Builder};

// Re-export hash result types
pub use async_result::{AsyncHashResult, AsyncHashResultWithError, AsyncHashResultWithHandler};
pub use hash_result::HashResult;

pub use pool::{HasherPool, PoolStats, PooledHasher};
pub use std_hash::Murmur3BuildHasher;
pub use streaming::{StreamHashChunk, StreamHashResult, StreamingHasher, collect_hash, stream_murmur3};
