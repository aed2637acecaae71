use thiserror::Error;

/// Result type for vault cryptography.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Failures of key handling, encryption or decryption.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CryptoError {
    #[error("master key must be {expected} bytes, got {actual}")]
    InvalidKeyLength { expected: usize, actual: usize },

    #[error("master key is not valid hex: {0}")]
    InvalidKeyEncoding(String),

    #[error("failed to derive account key")]
    KeyDerivation,

    #[error("encryption failed")]
    EncryptionFailed,

    #[error("ciphertext is shorter than nonce and tag")]
    CiphertextTooShort,

    /// Wrong key, wrong account or tampered ciphertext.
    #[error("decryption failed")]
    DecryptionFailed,

    #[error("decrypted password is not valid UTF-8")]
    InvalidUtf8,
}
