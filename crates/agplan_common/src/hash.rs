//! Payload checksums for stored floorplans.

use serde::{Deserialize, Serialize};
use std::fmt;

/// XXH3-128 digest of a result payload, kept in the artifact header.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ContentHash([u8; 16]);

impl ContentHash {
    /// Hashes `data`.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self(xxhash_rust::xxh3::xxh3_128(data).to_le_bytes())
    }

    /// Re-hashes `data` and returns the digest when it differs from `self`.
    pub fn verify(&self, data: &[u8]) -> Result<(), ContentHash> {
        let actual = Self::from_bytes(data);
        if actual == *self {
            Ok(())
        } else {
            Err(actual)
        }
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.iter().try_for_each(|b| write!(f, "{b:02x}"))
    }
}

impl fmt::Debug for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ContentHash({self})")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verify_detects_a_flipped_byte() {
        let payload = b"areagroups".to_vec();
        let sum = ContentHash::from_bytes(&payload);
        assert!(sum.verify(&payload).is_ok());

        let mut tampered = payload.clone();
        tampered[0] ^= 1;
        let actual = sum.verify(&tampered).unwrap_err();
        assert_ne!(actual, sum);
    }

    #[test]
    fn displays_as_32_hex_digits() {
        let s = ContentHash::from_bytes(b"payload").to_string();
        assert_eq!(s.len(), 32);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
