//! Adversarial tests for the XChaCha20-Poly1305 cipher boundary.
//!
//! Validates that:
//! - Round-trips preserve plaintext for any payload, including empty
//! - Every bit flip in nonce, ciphertext, or tag is detected
//! - Wrong keys and wrong key lengths are rejected
//! - Nonces never repeat across many encryptions

use proptest::prelude::*;
use sealbox_crypto::keyring::KeyMaterial;
use sealbox_crypto::{cipher, CryptoError, KEY_SIZE, NONCE_SIZE, TAG_SIZE};
use std::collections::HashSet;

fn test_key() -> KeyMaterial {
    KeyMaterial::new(vec![7u8; KEY_SIZE])
}

#[test]
fn encrypt_decrypt_roundtrip() {
    let key = test_key();
    let plaintext = b"the quick brown fox";

    let (nonce, ciphertext, tag) = cipher::encrypt(&key, plaintext).unwrap();
    assert_eq!(nonce.len(), NONCE_SIZE);
    assert_eq!(tag.len(), TAG_SIZE);
    assert_eq!(ciphertext.len(), plaintext.len());
    assert_ne!(&ciphertext[..], &plaintext[..]);

    let decrypted = cipher::decrypt(&key, &nonce, &ciphertext, &tag).unwrap();
    assert_eq!(decrypted, plaintext);
}

#[test]
fn empty_plaintext_roundtrip() {
    let key = test_key();
    let (nonce, ciphertext, tag) = cipher::encrypt(&key, b"").unwrap();
    assert!(ciphertext.is_empty());

    let decrypted = cipher::decrypt(&key, &nonce, &ciphertext, &tag).unwrap();
    assert!(decrypted.is_empty());
}

#[test]
fn wrong_key_length_rejected_on_encrypt() {
    let short_key = KeyMaterial::new(vec![7u8; 16]);
    let err = cipher::encrypt(&short_key, b"data").unwrap_err();
    match err {
        CryptoError::InvalidKeyMaterial { expected, got } => {
            assert_eq!(expected, KEY_SIZE);
            assert_eq!(got, 16);
        }
        other => panic!("expected InvalidKeyMaterial, got: {other:?}"),
    }
}

#[test]
fn wrong_key_length_rejected_on_decrypt() {
    let key = test_key();
    let (nonce, ciphertext, tag) = cipher::encrypt(&key, b"data").unwrap();

    let long_key = KeyMaterial::new(vec![7u8; 64]);
    let err = cipher::decrypt(&long_key, &nonce, &ciphertext, &tag).unwrap_err();
    assert!(matches!(err, CryptoError::InvalidKeyMaterial { got: 64, .. }));
}

#[test]
fn decrypt_with_wrong_key_fails() {
    let key = test_key();
    let other_key = KeyMaterial::new(vec![8u8; KEY_SIZE]);

    let (nonce, ciphertext, tag) = cipher::encrypt(&key, b"secret").unwrap();
    let err = cipher::decrypt(&other_key, &nonce, &ciphertext, &tag).unwrap_err();
    assert!(matches!(err, CryptoError::DecryptionFailed));
}

#[test]
fn every_ciphertext_bit_flip_detected() {
    let key = test_key();
    let (nonce, ciphertext, tag) = cipher::encrypt(&key, b"integrity").unwrap();

    for byte_idx in 0..ciphertext.len() {
        for bit in 0..8 {
            let mut tampered = ciphertext.clone();
            tampered[byte_idx] ^= 1 << bit;

            let err = cipher::decrypt(&key, &nonce, &tampered, &tag).unwrap_err();
            assert!(
                matches!(err, CryptoError::DecryptionFailed),
                "flip of byte {byte_idx} bit {bit} was not detected"
            );
        }
    }
}

#[test]
fn every_tag_bit_flip_detected() {
    let key = test_key();
    let (nonce, ciphertext, tag) = cipher::encrypt(&key, b"integrity").unwrap();

    for byte_idx in 0..TAG_SIZE {
        for bit in 0..8 {
            let mut tampered = tag;
            tampered[byte_idx] ^= 1 << bit;

            let err = cipher::decrypt(&key, &nonce, &ciphertext, &tampered).unwrap_err();
            assert!(
                matches!(err, CryptoError::DecryptionFailed),
                "flip of tag byte {byte_idx} bit {bit} was not detected"
            );
        }
    }
}

#[test]
fn tampered_nonce_detected() {
    let key = test_key();
    let (mut nonce, ciphertext, tag) = cipher::encrypt(&key, b"integrity").unwrap();
    nonce[0] ^= 0x01;

    let err = cipher::decrypt(&key, &nonce, &ciphertext, &tag).unwrap_err();
    assert!(matches!(err, CryptoError::DecryptionFailed));
}

#[test]
fn decryption_failure_message_carries_no_tamper_detail() {
    let key = test_key();
    let (nonce, ciphertext, mut tag) = cipher::encrypt(&key, b"oracle").unwrap();
    tag[0] ^= 0xFF;

    let err = cipher::decrypt(&key, &nonce, &ciphertext, &tag).unwrap_err();
    // One fixed message for all integrity failures.
    assert_eq!(err.to_string(), "decryption failed (wrong key or tampered data)");
}

#[test]
fn nonces_never_repeat_across_many_encryptions() {
    let key = test_key();
    let plaintext = b"same plaintext every time";

    let mut nonces = HashSet::new();
    let mut ciphertexts = HashSet::new();
    for _ in 0..1000 {
        let (nonce, ciphertext, _) = cipher::encrypt(&key, plaintext).unwrap();
        nonces.insert(nonce);
        ciphertexts.insert(ciphertext);
    }

    assert_eq!(nonces.len(), 1000, "nonce collision under the same key");
    assert_eq!(ciphertexts.len(), 1000, "identical ciphertexts for distinct nonces");
}

proptest! {
    #[test]
    fn roundtrip_preserves_arbitrary_plaintext(
        plaintext in proptest::collection::vec(any::<u8>(), 0..2048),
        key_fill in any::<u8>(),
    ) {
        let key = KeyMaterial::new(vec![key_fill; KEY_SIZE]);
        let (nonce, ciphertext, tag) = cipher::encrypt(&key, &plaintext).unwrap();
        let decrypted = cipher::decrypt(&key, &nonce, &ciphertext, &tag).unwrap();
        prop_assert_eq!(decrypted, plaintext);
    }
}
