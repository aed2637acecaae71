//! Encryption of vault passwords at rest.
//!
//! Every account gets its own XChaCha20-Poly1305 key, derived from the
//! operator-supplied master key with HKDF-SHA256 and the account id as salt.

mod cipher;
mod error;
mod key;

pub use self::cipher::{MIN_CIPHERTEXT_SIZE, NONCE_SIZE, TAG_SIZE, VaultCipher};
pub use self::error::{CryptoError, CryptoResult};
pub use self::key::{KEY_SIZE, VaultKey};
