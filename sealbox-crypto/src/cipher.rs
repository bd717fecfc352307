//! XChaCha20-Poly1305 authenticated encryption.
//!
//! Pure primitive boundary: no knowledge of key versions, object paths,
//! or transports. Every encryption draws a fresh random 24-byte nonce,
//! large enough that random collision over any realistic object count
//! is negligible. The Poly1305 tag is kept detached so the envelope
//! codec can place it at a fixed offset.

use crate::error::{CryptoError, CryptoResult};
use crate::keyring::KeyMaterial;
use chacha20poly1305::aead::{AeadCore, AeadInPlace, KeyInit, OsRng};
use chacha20poly1305::{Tag, XChaCha20Poly1305, XNonce};

/// Size of an XChaCha20 key in bytes.
pub const KEY_SIZE: usize = 32;

/// Size of an XChaCha20 nonce in bytes.
pub const NONCE_SIZE: usize = 24;

/// Size of a Poly1305 authentication tag in bytes.
pub const TAG_SIZE: usize = 16;

fn cipher_for(key: &KeyMaterial) -> CryptoResult<XChaCha20Poly1305> {
    if key.len() != KEY_SIZE {
        return Err(CryptoError::InvalidKeyMaterial {
            expected: KEY_SIZE,
            got: key.len(),
        });
    }
    XChaCha20Poly1305::new_from_slice(key.as_bytes()).map_err(|_| {
        CryptoError::InvalidKeyMaterial {
            expected: KEY_SIZE,
            got: key.len(),
        }
    })
}

/// Encrypts plaintext under the given key with a fresh random nonce.
///
/// Returns `(nonce, ciphertext, tag)`. The nonce source is the OS RNG,
/// safe for concurrent callers.
pub fn encrypt(
    key: &KeyMaterial,
    plaintext: &[u8],
) -> CryptoResult<([u8; NONCE_SIZE], Vec<u8>, [u8; TAG_SIZE])> {
    let cipher = cipher_for(key)?;
    let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);

    let mut buffer = plaintext.to_vec();
    let tag = cipher
        .encrypt_in_place_detached(&nonce, b"", &mut buffer)
        .map_err(|e| CryptoError::EncryptionFailed(e.to_string()))?;

    Ok((nonce.into(), buffer, tag.into()))
}

/// Decrypts and verifies a ciphertext.
///
/// Any bit flip in the nonce, ciphertext, or tag fails with
/// [`CryptoError::DecryptionFailed`]; altered plaintext is never
/// returned. The tag comparison inside Poly1305 is constant-time.
pub fn decrypt(
    key: &KeyMaterial,
    nonce: &[u8; NONCE_SIZE],
    ciphertext: &[u8],
    tag: &[u8; TAG_SIZE],
) -> CryptoResult<Vec<u8>> {
    let cipher = cipher_for(key)?;

    let mut buffer = ciphertext.to_vec();
    cipher
        .decrypt_in_place_detached(
            XNonce::from_slice(nonce),
            b"",
            &mut buffer,
            Tag::from_slice(tag),
        )
        .map_err(|_| CryptoError::DecryptionFailed)?;

    Ok(buffer)
}
