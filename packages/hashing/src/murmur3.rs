//! Incremental MurmurHash3 x86-32 (r136)
//!
//! Input is modelled as UTF-16 code units. Text can be fed in any number of
//! chunks and the running hash read at any point without finalizing.

const C1: u32 = 0xcc9e_2d51;
const C2: u32 = 0x1b87_3593;

/// Incremental MurmurHash3 x86-32 hasher
///
/// Owns the accumulator, the pending partial block and the unit count.
/// `result()` is a pure read, so a hasher can keep absorbing input after
/// any number of intermediate results.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Murmur3 {
    h1: u32,
    k1: u32,
    remainder: usize,
    length: u64,
}

impl Murmur3 {
    /// Create a hasher with seed 0
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a hasher with the given seed
    #[must_use]
    pub fn with_seed(seed: u32) -> Self {
        Self {
            h1: seed,
            ..Self::default()
        }
    }

    /// Create a hasher and immediately feed `key` into it
    ///
    /// An empty key leaves the hasher in its freshly seeded state.
    #[must_use]
    pub fn from_key(key: &str, seed: impl Into<Option<u32>>) -> Self {
        let mut hasher = Self::with_seed(seed.into().unwrap_or(0));
        hasher.feed(key);
        hasher
    }

    /// Discard all accumulated input and reseed
    ///
    /// A missing seed means 0.
    pub fn reset(&mut self, seed: impl Into<Option<u32>>) -> &mut Self {
        *self = Self::with_seed(seed.into().unwrap_or(0));
        self
    }

    /// Feed text, encoded as UTF-16 code units
    pub fn feed(&mut self, text: &str) -> &mut Self {
        self.absorb(text.encode_utf16().count(), text.encode_utf16())
    }

    /// Feed raw UTF-16 code units
    pub fn feed_units(&mut self, units: &[u16]) -> &mut Self {
        self.absorb(units.len(), units.iter().copied())
    }

    /// Hash of everything fed since the last reset
    ///
    /// Does not modify the hasher. The pending block is mixed in whenever it is
    /// non-zero. The JS imurmurhash reference tests it as a signed value, so
    /// it skips the mix when a pending unit >= 0x8000 sits at position 2
    /// (e.g. units `[1, 2, 0x8000]`); such inputs hash differently there.
    #[must_use]
    pub fn result(&self) -> u32 {
        let mut h1 = self.h1;
        if self.k1 != 0 {
            h1 ^= mix_k1(self.k1);
        }
        // only the low 32 bits of the unit count take part
        fmix32(h1 ^ self.length as u32)
    }

    /// Number of code units fed since the last reset
    #[must_use]
    pub fn length(&self) -> u64 {
        self.length
    }

    /// Number of code units buffered in the pending partial block (0..=3)
    #[must_use]
    pub fn remainder(&self) -> usize {
        self.remainder
    }

    /// Core block loop. `len` must be the exact number of items in `units`.
    pub(crate) fn absorb<I>(&mut self, len: usize, mut units: I) -> &mut Self
    where
        I: Iterator<Item = u16>,
    {
        if len == 0 {
            return self;
        }
        self.length = self.length.wrapping_add(len as u64);

        // Top up the carried partial block
        let mut k1 = self.k1;
        let mut consumed = 0;
        for position in self.remainder..4 {
            let Some(unit) = units.next() else { break };
            k1 ^= lane(unit, position);
            consumed += 1;
        }

        let remainder = (len + self.remainder) & 3;
        self.remainder = remainder;
        // No whole block completes within this chunk
        if len <= remainder {
            self.k1 = k1;
            return self;
        }
        let ready = len - remainder;

        let mut h1 = self.h1;
        loop {
            h1 = fold_block(h1, k1);
            if consumed >= ready {
                break;
            }
            k1 = 0;
            for (position, unit) in units.by_ref().take(4).enumerate() {
                k1 ^= lane(unit, position);
            }
            consumed += 4;
        }

        // Trailing units keep only their low byte
        k1 = 0;
        for (position, unit) in units.take(remainder).enumerate() {
            k1 ^= u32::from(unit & 0xff) << (8 * position);
        }

        self.h1 = h1;
        self.k1 = k1;
        self
    }
}

/// One-shot MurmurHash3 x86-32 of `text` (as UTF-16 code units)
#[must_use]
pub fn murmur3_32(text: &str, seed: u32) -> u32 {
    Murmur3::with_seed(seed).feed(text).result()
}

/// Place a code unit at its position within a 4-unit block.
///
/// Positions 0..=2 take the whole 16-bit unit; the top position splits the
/// unit into its low byte at bit 24 and its high byte at bit 0. Both quirks
/// are part of the reference output and must not be normalized.
#[inline]
fn lane(unit: u16, position: usize) -> u32 {
    if position < 3 {
        u32::from(unit) << (8 * position)
    } else {
        (u32::from(unit & 0x00ff) << 24) ^ (u32::from(unit & 0xff00) >> 8)
    }
}

#[inline]
fn mix_k1(k1: u32) -> u32 {
    k1.wrapping_mul(C1).rotate_left(15).wrapping_mul(C2)
}

#[inline]
fn fold_block(h1: u32, k1: u32) -> u32 {
    (h1 ^ mix_k1(k1))
        .rotate_left(13)
        .wrapping_mul(5)
        .wrapping_add(0xe654_6b64)
}

#[inline]
fn fmix32(mut h: u32) -> u32 {
    h ^= h >> 16;
    h = h.wrapping_mul(0x85eb_ca6b);
    h ^= h >> 13;
    h = h.wrapping_mul(0xc2b2_ae35);
    h ^= h >> 16;
    h
}
