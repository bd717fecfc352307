//! Encryption core for sealbox.
//!
//! Provides versioned-key envelope encryption:
//! - A [`KeyRing`] of concurrently valid key versions with one primary
//! - XChaCha20-Poly1305 authenticated encryption
//! - A self-describing binary [`Envelope`] carrying the key version
//!   used at write time
//!
//! # Key rotation
//!
//! Writes always encrypt under the ring's primary version; reads always
//! decrypt with the version stamped into the object's own envelope.
//! Introducing a new primary therefore never invalidates existing
//! ciphertext — each object carries proof of which key decrypts it.
//!
//! This crate is pure computation: no I/O, no async, no logging.

pub mod cipher;
pub mod envelope;
mod error;
pub mod keyring;

pub use cipher::{decrypt, encrypt, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
pub use envelope::{Envelope, FORMAT_VERSION};
pub use error::{CryptoError, CryptoResult};
pub use keyring::{KeyMaterial, KeyRing, KeyVersion, MAX_VERSION_LEN};
