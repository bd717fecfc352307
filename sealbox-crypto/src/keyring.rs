//! Versioned key ring.
//!
//! A [`KeyRing`] holds every key version that may still be needed to
//! decrypt stored objects, plus the designated primary version used for
//! all new writes. It is built once from configuration, validated at
//! construction, and never mutated afterwards; rotation is performed by
//! building a new ring with an additional entry and a new primary while
//! retaining all prior entries.

use crate::error::{CryptoError, CryptoResult};
use std::collections::HashMap;
use std::fmt;
use zeroize::{Zeroize, ZeroizeOnDrop};

/// Maximum byte length of a key version identifier.
///
/// The envelope format stores the identifier behind a one-byte length
/// prefix, so identifiers longer than 255 bytes cannot be framed.
pub const MAX_VERSION_LEN: usize = 255;

/// Validated key version identifier (e.g. `"v1"`, `"2024-q3"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyVersion(String);

impl KeyVersion {
    /// Validates and wraps an identifier.
    ///
    /// Identifiers must be 1..=255 bytes so they fit the envelope's
    /// length prefix.
    pub fn new(id: impl Into<String>) -> CryptoResult<Self> {
        let id = id.into();
        if id.is_empty() {
            return Err(CryptoError::InvalidKeyConfiguration(
                "key version identifier must not be empty".to_string(),
            ));
        }
        if id.len() > MAX_VERSION_LEN {
            return Err(CryptoError::InvalidKeyConfiguration(format!(
                "key version identifier exceeds {MAX_VERSION_LEN} bytes: {} bytes",
                id.len()
            )));
        }
        Ok(Self(id))
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for KeyVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for KeyVersion {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Raw key bytes, zeroized on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct KeyMaterial(Vec<u8>);

impl KeyMaterial {
    pub fn new(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

// Never print key bytes.
impl fmt::Debug for KeyMaterial {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "KeyMaterial({} bytes)", self.0.len())
    }
}

/// Immutable set of retained key versions plus the primary for writes.
///
/// Thread-safe by immutability: lookups take `&self` and nothing
/// mutates after construction.
pub struct KeyRing {
    keys: HashMap<KeyVersion, KeyMaterial>,
    primary: KeyVersion,
}

impl KeyRing {
    /// Builds a ring from a version → key-material mapping and the
    /// designated primary version.
    ///
    /// Fails with [`CryptoError::InvalidKeyConfiguration`] if the
    /// mapping is empty, any identifier is invalid, any key material is
    /// empty, or the primary is absent from the mapping.
    pub fn new(
        keys: HashMap<String, Vec<u8>>,
        primary: impl Into<String>,
    ) -> CryptoResult<Self> {
        if keys.is_empty() {
            return Err(CryptoError::InvalidKeyConfiguration(
                "key mapping must contain at least one entry".to_string(),
            ));
        }

        let mut validated = HashMap::with_capacity(keys.len());
        for (id, material) in keys {
            let version = KeyVersion::new(id)?;
            if material.is_empty() {
                return Err(CryptoError::InvalidKeyConfiguration(format!(
                    "key material for version {version} must not be empty"
                )));
            }
            validated.insert(version, KeyMaterial::new(material));
        }

        let primary = KeyVersion::new(primary)?;
        if !validated.contains_key(&primary) {
            return Err(CryptoError::InvalidKeyConfiguration(format!(
                "primary key version {primary} is not present in the key mapping"
            )));
        }

        Ok(Self {
            keys: validated,
            primary,
        })
    }

    /// Resolves the key material for a specific version.
    ///
    /// Fails with [`CryptoError::UnknownKeyVersion`] if the version has
    /// been removed from configuration. For stored objects this is
    /// unrecoverable unless the key is restored.
    pub fn resolve(&self, version: &KeyVersion) -> CryptoResult<&KeyMaterial> {
        self.keys
            .get(version)
            .ok_or_else(|| CryptoError::UnknownKeyVersion(version.to_string()))
    }

    /// Returns the version used for all new writes.
    ///
    /// Never fails: construction guarantees the primary exists.
    pub fn primary_version(&self) -> &KeyVersion {
        &self.primary
    }

    /// Resolves the primary key material.
    pub fn primary_key(&self) -> &KeyMaterial {
        // Present by construction invariant.
        &self.keys[&self.primary]
    }

    /// Returns the number of retained key versions.
    pub fn len(&self) -> usize {
        self.keys.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keys.is_empty()
    }
}

impl fmt::Debug for KeyRing {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("KeyRing")
            .field("versions", &self.keys.len())
            .field("primary", &self.primary.as_str())
            .finish()
    }
}
