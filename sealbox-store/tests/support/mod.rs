//! Shared test helpers for integration tests against real MinIO.

use sealbox_crypto::KeyRing;
use sealbox_store::config::S3Config;
use sealbox_store::s3::S3Transport;
use std::collections::HashMap;
use uuid::Uuid;

/// S3 settings pointing at local MinIO (docker-compose, port 9000),
/// using its root access/secret pair.
pub fn minio_config() -> S3Config {
    S3Config {
        bucket: "sealbox-test".into(),
        region: "us-east-1".into(),
        endpoint_override: Some("http://localhost:9000".into()),
        access_key_id: Some("sealbox-test".into()),
        secret_access_key: Some("sealbox-test-secret".into()),
    }
}

/// S3Transport connected to local MinIO.
pub async fn minio_transport() -> S3Transport {
    S3Transport::connect(&minio_config()).await
}

/// Per-test unique S3 prefix to prevent collisions.
pub fn unique_prefix() -> String {
    format!("test-runs/{}", Uuid::new_v4())
}

/// Two-version ring with `v1` as primary.
pub fn test_keyring() -> KeyRing {
    KeyRing::new(
        HashMap::from([
            ("v1".to_string(), vec![0x11; 32]),
            ("v2".to_string(), vec![0x22; 32]),
        ]),
        "v1",
    )
    .expect("valid test keyring")
}
