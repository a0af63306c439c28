//! Opt-in reuse of hasher instances
//!
//! There is no shared default hasher. Callers that want to avoid constructing
//! a fresh `Murmur3` per input check one out of a `HasherPool`; the returned
//! guard owns it exclusively until dropped.

use crate::Murmur3;
use std::ops::{Deref, DerefMut};
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};
use tracing::trace;

/// Pool of idle hashers
pub struct HasherPool {
    /// Hashers waiting for reuse
    available: Mutex<Vec<Murmur3>>,
    /// Maximum number of idle hashers kept
    max_pool_size: usize,
    created_count: AtomicU64,
    reused_count: AtomicU64,
}

/// Snapshot of pool counters
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Hashers constructed because the pool was empty
    pub created: u64,
    /// Acquisitions served from an idle hasher
    pub reused: u64,
    /// Idle hashers currently held
    pub available: usize,
}

impl HasherPool {
    /// Create a pool keeping at most `max_pool_size` idle hashers
    #[must_use]
    pub fn new(max_pool_size: usize) -> Self {
        Self {
            available: Mutex::new(Vec::new()),
            max_pool_size,
            created_count: AtomicU64::new(0),
            reused_count: AtomicU64::new(0),
        }
    }

    /// Check out a hasher reset with `seed`
    pub fn acquire(&self, seed: impl Into<Option<u32>>) -> PooledHasher<'_> {
        let seed = seed.into();
        let idle = self.available.lock().ok().and_then(|mut pool| pool.pop());

        let hasher = match idle {
            Some(mut hasher) => {
                hasher.reset(seed);
                self.reused_count.fetch_add(1, Ordering::Relaxed);
                trace!("Reused hasher from pool");
                hasher
            }
            None => {
                self.created_count.fetch_add(1, Ordering::Relaxed);
                trace!("Created new hasher");
                Murmur3::with_seed(seed.unwrap_or(0))
            }
        };

        PooledHasher {
            pool: self,
            hasher,
            detached: false,
        }
    }

    fn release(&self, hasher: Murmur3) {
        if let Ok(mut pool) = self.available.lock() {
            if pool.len() < self.max_pool_size {
                pool.push(hasher);
                trace!("Returned hasher to pool");
            } else {
                trace!("Pool full, dropping hasher");
            }
        }
    }

    /// Get pool statistics
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            created: self.created_count.load(Ordering::Relaxed),
            reused: self.reused_count.load(Ordering::Relaxed),
            available: self.available.lock().map(|pool| pool.len()).unwrap_or(0),
        }
    }
}

impl Default for HasherPool {
    fn default() -> Self {
        Self::new(16)
    }
}

/// Exclusive handle to a pooled hasher; returns it to the pool on drop
pub struct PooledHasher<'a> {
    pool: &'a HasherPool,
    hasher: Murmur3,
    detached: bool,
}

impl PooledHasher<'_> {
    /// Take the hasher out of the pool for good
    #[must_use]
    pub fn detach(mut self) -> Murmur3 {
        self.detached = true;
        std::mem::take(&mut self.hasher)
    }
}

impl Deref for PooledHasher<'_> {
    type Target = Murmur3;

    fn deref(&self) -> &Murmur3 {
        &self.hasher
    }
}

impl DerefMut for PooledHasher<'_> {
    fn deref_mut(&mut self) -> &mut Murmur3 {
        &mut self.hasher
    }
}

impl Drop for PooledHasher<'_> {
    fn drop(&mut self) {
        if !self.detached {
            self.pool.release(std::mem::take(&mut self.hasher));
        }
    }
}
