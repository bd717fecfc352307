//! Store configuration.
//!
//! Configuration is collected once, up front, into immutable values
//! passed to the store constructor — never re-read per operation. Key
//! material is supplied base64-encoded and decoded during key ring
//! construction.

use crate::error::{StoreError, StoreResult};
use base64::engine::general_purpose::STANDARD as BASE64;
use base64::Engine;
use sealbox_crypto::KeyRing;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// S3 connection settings.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct S3Config {
    /// Bucket name.
    pub bucket: String,

    /// AWS region.
    pub region: String,

    /// Optional endpoint override (for MinIO in testing).
    pub endpoint_override: Option<String>,

    /// Static credentials. When absent, the default AWS provider chain
    /// is used.
    pub access_key_id: Option<String>,
    pub secret_access_key: Option<String>,
}

/// Encryption key set: version identifiers mapped to base64 key bytes,
/// plus the primary version used for new writes.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct KeySetConfig {
    pub keys: HashMap<String, String>,
    pub primary: String,
}

impl KeySetConfig {
    /// Decodes the key material and builds a validated [`KeyRing`].
    pub fn build_keyring(&self) -> StoreResult<KeyRing> {
        let mut decoded = HashMap::with_capacity(self.keys.len());
        for (version, encoded) in &self.keys {
            let material = BASE64.decode(encoded).map_err(|e| {
                StoreError::Config(format!("key material for version {version} is not valid base64: {e}"))
            })?;
            decoded.insert(version.clone(), material);
        }

        Ok(KeyRing::new(decoded, self.primary.clone())?)
    }
}

/// Complete store configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StoreConfig {
    pub s3: S3Config,
    pub keys: KeySetConfig,
}

impl StoreConfig {
    /// Loads configuration from environment variables.
    ///
    /// Required: `S3_BUCKET`, plus either `ENCRYPTION_KEY` (base64,
    /// registered under the version id `primary`) or the pair
    /// `ENCRYPTION_KEYS` (JSON map of version id to base64 key) and
    /// `ENCRYPTION_PRIMARY_KEY`. Optional: `AWS_REGION` (default
    /// `us-east-1`), `AWS_ACCESS_KEY_ID` / `AWS_SECRET_ACCESS_KEY`,
    /// `S3_ENDPOINT`.
    pub fn from_env() -> StoreResult<Self> {
        let bucket = std::env::var("S3_BUCKET")
            .map_err(|_| StoreError::Config("S3_BUCKET environment variable is required".to_string()))?;
        let region = std::env::var("AWS_REGION").unwrap_or_else(|_| "us-east-1".to_string());
        let access_key_id = std::env::var("AWS_ACCESS_KEY_ID").ok();
        let secret_access_key = std::env::var("AWS_SECRET_ACCESS_KEY").ok();
        let endpoint_override = std::env::var("S3_ENDPOINT").ok();

        let keys = match std::env::var("ENCRYPTION_KEYS") {
            Ok(json) => {
                let keys: HashMap<String, String> = serde_json::from_str(&json).map_err(|e| {
                    StoreError::Config(format!("ENCRYPTION_KEYS is not a valid JSON map: {e}"))
                })?;
                let primary = std::env::var("ENCRYPTION_PRIMARY_KEY").map_err(|_| {
                    StoreError::Config(
                        "ENCRYPTION_PRIMARY_KEY is required when ENCRYPTION_KEYS is set".to_string(),
                    )
                })?;
                KeySetConfig { keys, primary }
            }
            Err(_) => {
                let key = std::env::var("ENCRYPTION_KEY").map_err(|_| {
                    StoreError::Config(
                        "ENCRYPTION_KEY (or ENCRYPTION_KEYS) environment variable is required"
                            .to_string(),
                    )
                })?;
                KeySetConfig {
                    keys: HashMap::from([("primary".to_string(), key)]),
                    primary: "primary".to_string(),
                }
            }
        };

        Ok(Self {
            s3: S3Config {
                bucket,
                region,
                endpoint_override,
                access_key_id,
                secret_access_key,
            },
            keys,
        })
    }
}
