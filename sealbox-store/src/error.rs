//! Store error types.

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur in the encrypted object store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Key ring, cipher, or envelope failure. Includes the fatal
    /// `UnknownKeyVersion` case: an object encrypted under a version no
    /// longer present in configuration.
    #[error(transparent)]
    Crypto(#[from] sealbox_crypto::CryptoError),

    /// Transport failure, propagated verbatim. No retries at this layer.
    #[error("transport operation failed: {0}")]
    Transport(String),

    #[error("invalid configuration: {0}")]
    Config(String),
}
