//! Every surface agrees with the core hasher

use imurmur_hashing::{
    Hash, HashResult, HasherPool, Murmur3, Murmur3BuildHasher, collect_hash, murmur3_32,
    stream_murmur3,
};
use std::hash::{BuildHasher, Hasher};

const TEXT: &str = "The quick brown fox jumps over the lazy dog";

#[tokio::test]
async fn test_builder_matches_core() {
    let hash = Hash::murmur3()
        .with_seed(0x9747_b28c)
        .compute(TEXT)
        .await
        .expect("MurmurHash3 computation should succeed");
    assert_eq!(hash.value(), murmur3_32(TEXT, 0x9747_b28c));
}

#[tokio::test]
async fn test_stream_matches_core() {
    let chunks = TEXT.split_inclusive(' ').collect::<Vec<_>>();
    let result = collect_hash(stream_murmur3(futures::stream::iter(chunks), 5))
        .await
        .expect("stream should produce a final hash");
    assert_eq!(result.hash, HashResult::new(murmur3_32(TEXT, 5)));
    assert_eq!(result.total_units, TEXT.len() as u64);
}

#[test]
fn test_pool_matches_core() {
    let pool = HasherPool::default();
    for seed in [0, 1, 2] {
        let mut hasher = pool.acquire(seed);
        hasher.feed(TEXT);
        assert_eq!(hasher.result(), murmur3_32(TEXT, seed));
    }
    assert_eq!(pool.stats().created, 1);
    assert_eq!(pool.stats().reused, 2);
}

#[test]
fn test_std_hasher_matches_core() {
    let mut hasher = Murmur3BuildHasher::with_seed(77).build_hasher();
    hasher.write(TEXT.as_bytes());
    assert_eq!(hasher.finish(), u64::from(murmur3_32(TEXT, 77)));
}

#[test]
fn test_hello_vector_everywhere() {
    let hash = HashResult::new(Murmur3::from_key("hello", None).result());
    assert_eq!(hash.to_hex(), "248bfa47");
    assert_eq!(HashResult::from_hex("248bfa47").ok(), Some(hash));
}
