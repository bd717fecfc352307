//! Crypto error types.

use thiserror::Error;

/// Result type for crypto operations.
pub type CryptoResult<T> = Result<T, CryptoError>;

/// Errors that can occur in the encryption core.
#[derive(Debug, Error)]
pub enum CryptoError {
    #[error("invalid key configuration: {0}")]
    InvalidKeyConfiguration(String),

    #[error("unknown key version: {0}")]
    UnknownKeyVersion(String),

    #[error("invalid key material: expected {expected} bytes, got {got}")]
    InvalidKeyMaterial { expected: usize, got: usize },

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    // Deliberately carries no detail: the message must not distinguish
    // tag mismatch from any other integrity failure.
    #[error("decryption failed (wrong key or tampered data)")]
    DecryptionFailed,

    #[error("malformed envelope: {0}")]
    MalformedEnvelope(String),
}
