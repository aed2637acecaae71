//! Master and per-account vault keys.

use std::fmt;

use hkdf::Hkdf;
use sha2::Sha256;
use uuid::Uuid;

use super::error::{CryptoError, CryptoResult};

/// Size of an XChaCha20-Poly1305 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Domain separation string for account key derivation.
const ACCOUNT_KEY_INFO: &[u8] = b"cybershield vault entry";

/// A 256-bit key; either the master key or one derived from it.
#[derive(Clone, PartialEq, Eq)]
pub struct VaultKey {
    bytes: [u8; KEY_SIZE],
}

impl VaultKey {
    /// Creates a key from exactly 32 raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> CryptoResult<Self> {
        let actual = bytes.len();
        let bytes: [u8; KEY_SIZE] = bytes.try_into().map_err(|_| CryptoError::InvalidKeyLength {
            expected: KEY_SIZE,
            actual,
        })?;
        Ok(Self { bytes })
    }

    /// Parses a key from 64 hexadecimal characters.
    pub fn from_hex(encoded: &str) -> CryptoResult<Self> {
        let bytes = hex::decode(encoded.trim())
            .map_err(|e| CryptoError::InvalidKeyEncoding(e.to_string()))?;
        Self::from_bytes(&bytes)
    }

    #[inline]
    #[must_use]
    pub fn as_bytes(&self) -> &[u8; KEY_SIZE] {
        &self.bytes
    }

    /// Derives the key protecting the vault of `account_id`.
    pub fn derive_account_key(&self, account_id: Uuid) -> CryptoResult<Self> {
        let hkdf = Hkdf::<Sha256>::new(Some(account_id.as_bytes()), &self.bytes);

        let mut derived_key = [0u8; KEY_SIZE];
        hkdf.expand(ACCOUNT_KEY_INFO, &mut derived_key)
            .map_err(|_| CryptoError::KeyDerivation)?;

        Ok(Self { bytes: derived_key })
    }
}

impl fmt::Debug for VaultKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VaultKey")
            .field("bytes", &"[REDACTED]")
            .finish()
    }
}
