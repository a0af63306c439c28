//! MurmurHash3 builder - `Hash::murmur3().with_seed(..).compute(..)`

use crate::{AsyncHashResult, AsyncHashResultWithError, HashError, HashResult, Murmur3, Result};
use tokio::sync::oneshot;
use tracing::debug;

/// Units hashed between yield points; a multiple of the 4-unit block size
const CHUNK_UNITS: usize = 8192;

/// MurmurHash3 x86-32 builder
#[derive(Clone, Copy, Debug, Default)]
pub struct Murmur3Builder {
    seed: u32,
}

/// MurmurHash3 builder with result handler
pub struct Murmur3BuilderWithHandler<F, T> {
    seed: u32,
    result_handler: F,
    _phantom: std::marker::PhantomData<T>,
}

/// MurmurHash3 builder with error handler
pub struct Murmur3BuilderWithError<E> {
    seed: u32,
    error_handler: E,
}

impl Murmur3Builder {
    /// Create new MurmurHash3 builder with seed 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the seed
    #[must_use]
    pub fn with_seed(self, seed: u32) -> Self {
        Self { seed }
    }

    /// Add `on_result` handler
    pub fn on_result<F, T>(self, handler: F) -> Murmur3BuilderWithHandler<F, T>
    where
        F: FnOnce(Result<HashResult>) -> T + Send + 'static,
        T: Send + 'static,
    {
        Murmur3BuilderWithHandler {
            seed: self.seed,
            result_handler: handler,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Add `on_error` handler - transforms errors but passes through success
    pub fn on_error<E>(self, handler: E) -> Murmur3BuilderWithError<E>
    where
        E: Fn(HashError) -> HashError + Send + Sync + 'static,
    {
        Murmur3BuilderWithError {
            seed: self.seed,
            error_handler: handler,
        }
    }

    /// Compute the hash of `data` on the tokio runtime
    ///
    /// Must be called from within a tokio runtime.
    pub fn compute<D: Into<String>>(self, data: D) -> AsyncHashResult {
        self.compute_units(encode(data))
    }

    /// Compute the hash of raw UTF-16 code units on the tokio runtime
    pub fn compute_units<D: Into<Vec<u16>>>(self, units: D) -> AsyncHashResult {
        AsyncHashResult::new(spawn_hash(self.seed, units.into()))
    }
}

impl<F, T> Murmur3BuilderWithHandler<F, T>
where
    F: FnOnce(Result<HashResult>) -> T + Send + 'static,
    T: Send + 'static,
{
    /// Compute hash with handler
    pub async fn compute<D: Into<String>>(self, data: D) -> T {
        let hash = murmur3_hash(self.seed, &encode(data)).await;
        (self.result_handler)(Ok(hash))
    }
}

impl<E> Murmur3BuilderWithError<E>
where
    E: Fn(HashError) -> HashError + Send + Sync + 'static,
{
    /// Add `on_result` handler after error handler
    pub fn on_result<F, T>(self, handler: F) -> Murmur3BuilderWithHandler<F, T>
    where
        F: FnOnce(Result<HashResult>) -> T + Send + 'static,
        T: Send + 'static,
    {
        Murmur3BuilderWithHandler {
            seed: self.seed,
            result_handler: handler,
            _phantom: std::marker::PhantomData,
        }
    }

    /// Compute hash with error handler
    pub fn compute<D: Into<String>>(self, data: D) -> AsyncHashResultWithError<E> {
        AsyncHashResultWithError::new(spawn_hash(self.seed, encode(data)), self.error_handler)
    }
}

fn encode<D: Into<String>>(data: D) -> Vec<u16> {
    data.into().encode_utf16().collect()
}

fn spawn_hash(seed: u32, units: Vec<u16>) -> oneshot::Receiver<Result<HashResult>> {
    let (tx, rx) = oneshot::channel();

    tokio::spawn(async move {
        let result = murmur3_hash(seed, &units).await;
        let _ = tx.send(Ok(result));
    });

    rx
}

/// Internal MurmurHash3 with chunked async processing
async fn murmur3_hash(seed: u32, units: &[u16]) -> HashResult {
    let mut hasher = Murmur3::with_seed(seed);

    // The last piece keeps at least one whole chunk so the trailing units are
    // packed in the same call as a complete block, exactly as a single feed
    // would pack them.
    let split = units.len().saturating_sub(CHUNK_UNITS) / CHUNK_UNITS * CHUNK_UNITS;
    let (body, last) = units.split_at(split);

    for chunk in body.chunks(CHUNK_UNITS) {
        hasher.feed_units(chunk);
        tokio::task::yield_now().await;
    }
    hasher.feed_units(last);

    let hash = hasher.result();
    debug!(units = units.len(), hash, "MurmurHash3 computation complete");
    HashResult::new(hash)
}
