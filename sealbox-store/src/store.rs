//! Encrypted object store orchestration.
//!
//! Composes the key ring, cipher, and envelope codec against an
//! injected [`ObjectTransport`]. Stateless beyond the immutable key
//! ring: every operation is a single transport round trip and may run
//! concurrently with any other.

use crate::error::StoreResult;
use crate::transport::ObjectTransport;
use sealbox_crypto::envelope::Envelope;
use sealbox_crypto::{cipher, KeyRing, KeyVersion};
use tracing::debug;

/// Object store with transparent envelope encryption.
///
/// Writes encrypt under the key ring's primary version; reads decrypt
/// with the version stamped in the stored envelope, which may differ
/// after rotation. Paths are opaque and passed through to the
/// transport unchanged.
pub struct SealedObjectStore<T: ObjectTransport> {
    keyring: KeyRing,
    transport: T,
}

impl<T: ObjectTransport> SealedObjectStore<T> {
    /// Creates a store over a validated key ring and transport.
    pub fn new(keyring: KeyRing, transport: T) -> Self {
        Self { keyring, transport }
    }

    /// Returns the key version used for new writes.
    pub fn primary_version(&self) -> &KeyVersion {
        self.keyring.primary_version()
    }

    /// Encrypts `plaintext` under the primary key and writes it to
    /// `path`, overwriting any existing object.
    pub async fn put(&self, path: &str, plaintext: &[u8]) -> StoreResult<()> {
        let version = self.keyring.primary_version().clone();
        let (nonce, ciphertext, auth_tag) =
            cipher::encrypt(self.keyring.primary_key(), plaintext)?;

        let envelope = Envelope {
            key_version: version,
            nonce,
            ciphertext,
            auth_tag,
        };

        self.transport.put_object(path, envelope.frame()).await?;
        debug!("put {path} under key version {}", envelope.key_version);
        Ok(())
    }

    /// Reads and decrypts the object at `path`.
    ///
    /// Returns `Ok(None)` when no object exists — the only expected
    /// failure path. Decryption uses the key version embedded in the
    /// object's envelope, not the current primary; an object whose
    /// version is missing from the ring fails with `UnknownKeyVersion`
    /// and is unreadable until that key is restored.
    pub async fn get(&self, path: &str) -> StoreResult<Option<Vec<u8>>> {
        let Some(bytes) = self.transport.get_object(path).await? else {
            debug!("get {path}: not found");
            return Ok(None);
        };

        let envelope = Envelope::unframe(&bytes)?;
        let key = self.keyring.resolve(&envelope.key_version)?;
        let plaintext = cipher::decrypt(
            key,
            &envelope.nonce,
            &envelope.ciphertext,
            &envelope.auth_tag,
        )?;

        debug!("get {path}: decrypted under key version {}", envelope.key_version);
        Ok(Some(plaintext))
    }

    /// Lists object paths under `prefix`, in lexicographic order.
    /// Pure passthrough: no envelopes are fetched or inspected.
    pub async fn list(&self, prefix: &str) -> StoreResult<Vec<String>> {
        self.transport.list_objects(prefix).await
    }

    /// Deletes the object at `path`. Idempotent: deleting an absent
    /// path succeeds.
    pub async fn delete(&self, path: &str) -> StoreResult<()> {
        self.transport.delete_object(path).await
    }

    /// Returns whether an object exists at `path`, without decrypting.
    pub async fn exists(&self, path: &str) -> StoreResult<bool> {
        self.transport.exists(path).await
    }
}
