//! XChaCha20-Poly1305 encryption of vault passwords.
//!
//! # Wire Format
//!
//! Stored ciphertext is `nonce (24 bytes) || ciphertext || tag (16 bytes)`.

use std::sync::Arc;

use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{XChaCha20Poly1305, XNonce};
use uuid::Uuid;

use super::error::{CryptoError, CryptoResult};
use super::key::VaultKey;

/// Size of the XChaCha20-Poly1305 nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Size of the Poly1305 authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

/// Minimum size of valid ciphertext (nonce + tag, no plaintext).
pub const MIN_CIPHERTEXT_SIZE: usize = NONCE_SIZE + TAG_SIZE;

/// Encrypts and decrypts vault passwords with per-account keys.
#[derive(Debug, Clone)]
pub struct VaultCipher {
    master_key: Arc<VaultKey>,
}

impl VaultCipher {
    pub fn new(master_key: VaultKey) -> Self {
        Self {
            master_key: Arc::new(master_key),
        }
    }

    /// Encrypts `password` for the vault of `account_id`.
    pub fn encrypt(&self, account_id: Uuid, password: &str) -> CryptoResult<Vec<u8>> {
        let key = self.master_key.derive_account_key(account_id)?;
        let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext = cipher
            .encrypt(&nonce, password.as_bytes())
            .map_err(|_| CryptoError::EncryptionFailed)?;

        let mut result = Vec::with_capacity(NONCE_SIZE + ciphertext.len());
        result.extend_from_slice(&nonce);
        result.extend_from_slice(&ciphertext);

        Ok(result)
    }

    /// Decrypts a password stored in the vault of `account_id`.
    pub fn decrypt(&self, account_id: Uuid, ciphertext: &[u8]) -> CryptoResult<String> {
        if ciphertext.len() < MIN_CIPHERTEXT_SIZE {
            return Err(CryptoError::CiphertextTooShort);
        }

        let key = self.master_key.derive_account_key(account_id)?;
        let cipher = XChaCha20Poly1305::new(key.as_bytes().into());

        let (nonce, encrypted) = ciphertext.split_at(NONCE_SIZE);
        let plaintext = cipher
            .decrypt(XNonce::from_slice(nonce), encrypted)
            .map_err(|_| CryptoError::DecryptionFailed)?;

        String::from_utf8(plaintext).map_err(|_| CryptoError::InvalidUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cipher() -> VaultCipher {
        VaultCipher::new(VaultKey::from_bytes(&[7u8; 32]).expect("32-byte key"))
    }

    #[test]
    fn encrypts_and_decrypts_for_the_same_account() -> anyhow::Result<()> {
        let cipher = cipher();
        let account = Uuid::from_u128(42);

        let stored = cipher.encrypt(account, "correct horse battery staple")?;
        assert_eq!(
            stored.len(),
            NONCE_SIZE + "correct horse battery staple".len() + TAG_SIZE
        );
        assert_eq!(cipher.decrypt(account, &stored)?, "correct horse battery staple");
        Ok(())
    }

    #[test]
    fn other_accounts_cannot_decrypt() -> anyhow::Result<()> {
        let cipher = cipher();
        let stored = cipher.encrypt(Uuid::from_u128(1), "hunter2")?;

        assert_eq!(
            cipher.decrypt(Uuid::from_u128(2), &stored),
            Err(CryptoError::DecryptionFailed)
        );
        Ok(())
    }

    #[test]
    fn nonces_are_fresh() -> anyhow::Result<()> {
        let cipher = cipher();
        let account = Uuid::from_u128(3);

        let first = cipher.encrypt(account, "same")?;
        let second = cipher.encrypt(account, "same")?;
        assert_ne!(first, second);
        Ok(())
    }

    #[test]
    fn tampering_is_detected() -> anyhow::Result<()> {
        let cipher = cipher();
        let account = Uuid::from_u128(4);

        let mut stored = cipher.encrypt(account, "secret data")?;
        stored[NONCE_SIZE + 2] ^= 0xFF;
        assert_eq!(
            cipher.decrypt(account, &stored),
            Err(CryptoError::DecryptionFailed)
        );

        let short = vec![0u8; MIN_CIPHERTEXT_SIZE - 1];
        assert_eq!(
            cipher.decrypt(account, &short),
            Err(CryptoError::CiphertextTooShort)
        );
        Ok(())
    }
}
