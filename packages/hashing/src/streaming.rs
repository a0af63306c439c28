//! True streaming hash computation
//!
//! Feeds each text chunk of an input stream into one `Murmur3` and reports
//! progress per chunk. Because reading the hash does not finalize it, every
//! progress event carries the running hash of everything seen so far.

use crate::{HashError, HashResult, Murmur3, Result};
use futures::Stream;
use pin_project_lite::pin_project;
use std::pin::Pin;
use std::task::{Context, Poll};
use tracing::{debug, trace};

pin_project! {
    /// Streaming hasher that processes text chunks incrementally
    ///
    /// Yields `Ok` for every event; errors only arise in `collect_hash`.
    pub struct StreamingHasher<S> {
        #[pin]
        input: S,
        seed: u32,
        hasher: Murmur3,
        finished: bool,
    }
}

impl<S> StreamingHasher<S>
where
    S: Stream,
    S::Item: AsRef<str>,
{
    /// Create a new streaming hasher with the given seed
    pub fn new(input: S, seed: u32) -> Self {
        Self {
            input,
            seed,
            hasher: Murmur3::with_seed(seed),
            finished: false,
        }
    }

    /// Total code units processed so far
    pub fn total_units(&self) -> u64 {
        self.hasher.length()
    }

    /// Seed the hasher was started with
    pub fn seed(&self) -> u32 {
        self.seed
    }
}

/// Result of streaming hash computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHashResult {
    /// The final hash value
    pub hash: HashResult,
    /// Total code units processed
    pub total_units: u64,
    /// Seed used
    pub seed: u32,
}

/// Progress event from streaming hash computation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StreamHashChunk {
    /// Code units in this chunk
    pub units_processed: u64,
    /// Code units processed so far
    pub total_units: u64,
    /// Whether the input stream has ended
    pub is_final: bool,
    /// Hash of everything processed so far
    pub running_hash: HashResult,
}

impl<S> Stream for StreamingHasher<S>
where
    S: Stream,
    S::Item: AsRef<str>,
{
    // Hashing text cannot fail, so every item is `Ok`; the `Result` keeps the
    // item type uniform with the rest of the crate's fallible surfaces.
    type Item = Result<StreamHashChunk>;

    fn poll_next(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        let this = self.project();

        if *this.finished {
            return Poll::Ready(None);
        }

        match this.input.poll_next(cx) {
            Poll::Ready(Some(chunk)) => {
                let before = this.hasher.length();
                this.hasher.feed(chunk.as_ref());
                let units_processed = this.hasher.length() - before;
                trace!(units_processed, "Hashed stream chunk");

                Poll::Ready(Some(Ok(StreamHashChunk {
                    units_processed,
                    total_units: this.hasher.length(),
                    is_final: false,
                    running_hash: this.hasher.result().into(),
                })))
            }
            Poll::Ready(None) => {
                *this.finished = true;
                let hash = this.hasher.result();
                debug!(total_units = this.hasher.length(), hash, "Stream hash finalized");

                Poll::Ready(Some(Ok(StreamHashChunk {
                    units_processed: 0,
                    total_units: this.hasher.length(),
                    is_final: true,
                    running_hash: hash.into(),
                })))
            }
            Poll::Pending => Poll::Pending,
        }
    }
}

/// Create a streaming MurmurHash3 hasher from any stream of text chunks
pub fn stream_murmur3<S>(input: S, seed: u32) -> StreamingHasher<S>
where
    S: Stream,
    S::Item: AsRef<str>,
{
    StreamingHasher::new(input, seed)
}

/// Collect the final hash result from a streaming hasher
///
/// # Errors
///
/// Returns `HashError::HashComputation` if the stream ends without a final
/// chunk, which happens when the hasher was already drained. Individual
/// chunks are always `Ok`.
pub async fn collect_hash<S>(mut hasher: StreamingHasher<S>) -> Result<StreamHashResult>
where
    S: Stream + Unpin,
    S::Item: AsRef<str>,
{
    use futures::StreamExt;

    let seed = hasher.seed;
    let mut final_chunk = None;

    while let Some(chunk_result) = hasher.next().await {
        let chunk = chunk_result?;
        if chunk.is_final {
            final_chunk = Some(chunk);
            break;
        }
    }

    let chunk = final_chunk.ok_or_else(|| {
        HashError::HashComputation("Stream ended without producing final hash".to_string())
    })?;

    Ok(StreamHashResult {
        hash: chunk.running_hash,
        total_units: chunk.total_units,
        seed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::murmur3_32;
    use futures::stream;
    use tokio_stream::StreamExt;

    #[tokio::test]
    async fn test_streaming_matches_one_shot() -> Result<()> {
        let chunks = vec!["Hello ", "streaming ", "world!"];
        let result = collect_hash(stream_murmur3(stream::iter(chunks.clone()), 17)).await?;

        let combined: String = chunks.concat();
        assert_eq!(result.hash.value(), murmur3_32(&combined, 17));
        assert_eq!(result.total_units, combined.len() as u64);
        assert_eq!(result.seed, 17);
        Ok(())
    }

    #[tokio::test]
    async fn test_streaming_chunk_processing() -> Result<()> {
        let chunks = vec!["chunk1", "chunk2", ""];
        let prefixes = ["chunk1", "chunk1chunk2", "chunk1chunk2"];
        let mut hasher = stream_murmur3(stream::iter(chunks), 0);
        let mut events = Vec::new();

        while let Some(chunk) = hasher.next().await {
            events.push(chunk?);
        }

        assert_eq!(events.len(), 4);
        for (event, prefix) in events.iter().zip(prefixes) {
            assert!(!event.is_final);
            assert_eq!(event.running_hash.value(), murmur3_32(prefix, 0));
            assert_eq!(event.total_units, prefix.len() as u64);
        }
        assert_eq!(events[2].units_processed, 0);

        let last = &events[3];
        assert!(last.is_final);
        assert_eq!(last.units_processed, 0);
        assert_eq!(last.running_hash.value(), murmur3_32("chunk1chunk2", 0));
        assert_eq!(hasher.total_units(), 12);
        Ok(())
    }

    #[tokio::test]
    async fn test_empty_stream() -> Result<()> {
        let result = collect_hash(stream_murmur3(stream::iter(Vec::<&str>::new()), 0)).await?;
        assert_eq!(result.hash.value(), 0);
        assert_eq!(result.total_units, 0);
        Ok(())
    }

    #[tokio::test]
    async fn test_every_event_is_ok() {
        let chunks = vec!["\u{8000}", "wide ", "", "\u{ffff}units"];
        let events: Vec<_> = stream_murmur3(stream::iter(chunks), 3).collect().await;
        assert_eq!(events.len(), 5);
        assert!(events.iter().all(Result::is_ok));
    }

    #[tokio::test]
    async fn test_drained_hasher_errors() {
        let mut hasher = stream_murmur3(stream::iter(vec!["abc"]), 0);
        while hasher.next().await.is_some() {}

        let result = collect_hash(hasher).await;
        assert!(matches!(result, Err(HashError::HashComputation(_))));
    }
}
