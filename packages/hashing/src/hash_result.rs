//! Hash result type with encoding support

use crate::{HashError, Result};
use serde::{Deserialize, Serialize};

/// A 32-bit MurmurHash3 digest with encoding options
///
/// Byte-oriented encodings use big-endian order, so `to_hex` reads the same
/// as the `{:08x}` rendering of the value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HashResult(u32);

impl HashResult {
    /// Wrap a raw hash value
    #[must_use]
    pub fn new(value: u32) -> Self {
        Self(value)
    }

    /// The raw 32-bit value
    #[must_use]
    pub fn value(&self) -> u32 {
        self.0
    }

    /// Big-endian bytes of the hash
    #[must_use]
    pub fn to_be_bytes(&self) -> [u8; 4] {
        self.0.to_be_bytes()
    }

    /// Get the hash as a hexadecimal string
    #[must_use]
    pub fn to_hex(&self) -> String {
        hex::encode(self.to_be_bytes())
    }

    /// Get the hash as a base64 string
    #[must_use]
    pub fn to_base64(&self) -> String {
        use base64::{Engine as _, engine::general_purpose};
        general_purpose::STANDARD.encode(self.to_be_bytes())
    }

    /// Get the hash as a base64url string (URL-safe)
    #[must_use]
    pub fn to_base64url(&self) -> String {
        base64_url::encode(&self.to_be_bytes())
    }

    /// Parse a hash from its hexadecimal form
    ///
    /// # Errors
    ///
    /// Returns `HashError::InvalidEncoding` if `encoded` is not valid hexadecimal
    /// or does not decode to exactly four bytes.
    pub fn from_hex(encoded: &str) -> Result<Self> {
        let bytes = hex::decode(encoded)?;
        let bytes: [u8; 4] = bytes.as_slice().try_into().map_err(|_| {
            HashError::invalid_encoding(format!(
                "expected 4 bytes for a 32-bit hash, got {}",
                bytes.len()
            ))
        })?;
        Ok(Self(u32::from_be_bytes(bytes)))
    }
}

impl From<u32> for HashResult {
    fn from(value: u32) -> Self {
        Self::new(value)
    }
}

impl From<HashResult> for u32 {
    fn from(result: HashResult) -> Self {
        result.0
    }
}

impl std::fmt::Display for HashResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encodings() {
        let result = HashResult::new(0x248b_fa47);
        assert_eq!(result.to_hex(), "248bfa47");
        assert_eq!(result.to_string(), format!("{:08x}", result.value()));
        assert_eq!(result.to_base64(), "JIv6Rw==");
        assert_eq!(result.to_base64url(), "JIv6Rw");
    }

    #[test]
    fn test_from_hex() -> Result<()> {
        let result = HashResult::from_hex("248bfa47")?;
        assert_eq!(u32::from(result), 0x248b_fa47);
        assert_eq!(HashResult::from_hex(&result.to_hex())?, result);
        Ok(())
    }

    #[test]
    fn test_from_hex_rejects_bad_input() {
        assert!(matches!(
            HashResult::from_hex("xyz0"),
            Err(HashError::InvalidEncoding(_))
        ));
        assert!(matches!(
            HashResult::from_hex("248bfa"),
            Err(HashError::InvalidEncoding(_))
        ));
    }

    #[test]
    fn test_serde_is_transparent() -> std::result::Result<(), serde_json::Error> {
        let json = serde_json::to_string(&HashResult::new(7))?;
        assert_eq!(json, "7");
        let back: HashResult = serde_json::from_str(&json)?;
        assert_eq!(back.value(), 7);
        Ok(())
    }
}
