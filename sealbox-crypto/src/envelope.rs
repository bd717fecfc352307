//! Self-describing encrypted envelope and its binary codec.
//!
//! Wire format v1:
//!
//! ```text
//! [1 byte: format version = 1]
//! [1 byte: key version length]
//! [key version bytes (UTF-8)]
//! [24 bytes: nonce]
//! [16 bytes: Poly1305 tag]
//! [remaining bytes: ciphertext]
//! ```
//!
//! Each envelope carries the key version that encrypted it, so stored
//! objects stay decryptable after rotation without any out-of-band
//! metadata. This layout is a bit-exact compatibility contract: objects
//! framed by one release must unframe on every later release.

use crate::cipher::{NONCE_SIZE, TAG_SIZE};
use crate::error::{CryptoError, CryptoResult};
use crate::keyring::KeyVersion;

/// Current envelope format version byte.
pub const FORMAT_VERSION: u8 = 1;

/// Fixed overhead: format version, key-version length prefix, nonce, tag.
const FIXED_OVERHEAD: usize = 2 + NONCE_SIZE + TAG_SIZE;

/// One encrypted object, ready for framing or just unframed.
///
/// Produced only by the cipher on `put` and consumed only by it on
/// `get`; nothing else inspects the ciphertext.
#[derive(Clone, Debug)]
pub struct Envelope {
    /// Key version that encrypted this payload.
    pub key_version: KeyVersion,
    /// XChaCha20 nonce, unique per encryption.
    pub nonce: [u8; NONCE_SIZE],
    /// Encrypted payload bytes.
    pub ciphertext: Vec<u8>,
    /// Poly1305 tag binding ciphertext, nonce, and key.
    pub auth_tag: [u8; TAG_SIZE],
}

impl Envelope {
    /// Serializes the envelope into the v1 wire layout.
    pub fn frame(&self) -> Vec<u8> {
        // KeyVersion validation caps the identifier at 255 bytes.
        let version_bytes = self.key_version.as_str().as_bytes();

        let mut out = Vec::with_capacity(FIXED_OVERHEAD + version_bytes.len() + self.ciphertext.len());
        out.push(FORMAT_VERSION);
        out.push(version_bytes.len() as u8);
        out.extend_from_slice(version_bytes);
        out.extend_from_slice(&self.nonce);
        out.extend_from_slice(&self.auth_tag);
        out.extend_from_slice(&self.ciphertext);
        out
    }

    /// Parses a framed envelope.
    ///
    /// Fails with [`CryptoError::MalformedEnvelope`] on truncated input,
    /// an unrecognized format version, or a declared key-version length
    /// that exceeds the available bytes.
    pub fn unframe(bytes: &[u8]) -> CryptoResult<Self> {
        if bytes.len() < FIXED_OVERHEAD {
            return Err(CryptoError::MalformedEnvelope(format!(
                "{} bytes is below the {FIXED_OVERHEAD}-byte minimum",
                bytes.len()
            )));
        }

        let format = bytes[0];
        if format != FORMAT_VERSION {
            return Err(CryptoError::MalformedEnvelope(format!(
                "unrecognized format version {format}"
            )));
        }

        let version_len = bytes[1] as usize;
        if version_len == 0 {
            return Err(CryptoError::MalformedEnvelope(
                "key version length is zero".to_string(),
            ));
        }
        if bytes.len() < FIXED_OVERHEAD + version_len {
            return Err(CryptoError::MalformedEnvelope(format!(
                "declared key version length {version_len} exceeds available bytes"
            )));
        }

        let mut offset = 2;
        let version_str = std::str::from_utf8(&bytes[offset..offset + version_len])
            .map_err(|_| {
                CryptoError::MalformedEnvelope("key version is not valid UTF-8".to_string())
            })?;
        let key_version = KeyVersion::new(version_str).map_err(|_| {
            CryptoError::MalformedEnvelope("invalid key version identifier".to_string())
        })?;
        offset += version_len;

        let mut nonce = [0u8; NONCE_SIZE];
        nonce.copy_from_slice(&bytes[offset..offset + NONCE_SIZE]);
        offset += NONCE_SIZE;

        let mut auth_tag = [0u8; TAG_SIZE];
        auth_tag.copy_from_slice(&bytes[offset..offset + TAG_SIZE]);
        offset += TAG_SIZE;

        Ok(Self {
            key_version,
            nonce,
            ciphertext: bytes[offset..].to_vec(),
            auth_tag,
        })
    }
}
