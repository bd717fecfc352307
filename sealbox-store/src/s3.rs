//! S3 transport for encrypted object bytes.
//!
//! Implements [`ObjectTransport`] over an S3-compatible endpoint.
//! Credentials come from explicit configuration or, when absent, the
//! default AWS provider chain. The endpoint override (with path-style
//! addressing) supports MinIO in testing.

use crate::config::S3Config;
use crate::error::{StoreError, StoreResult};
use crate::transport::ObjectTransport;
use aws_sdk_s3::Client as S3Client;
use aws_sdk_s3::primitives::ByteStream;
use tracing::debug;

/// S3-backed transport, scoped to one bucket.
pub struct S3Transport {
    bucket: String,
    client: S3Client,
}

impl S3Transport {
    /// Builds the transport and its S3 client from configuration.
    pub async fn connect(config: &S3Config) -> Self {
        let client = match (&config.access_key_id, &config.secret_access_key) {
            (Some(access_key), Some(secret_key)) => {
                let credentials = aws_credential_types::Credentials::new(
                    access_key,
                    secret_key,
                    None,
                    None,
                    "sealbox-static",
                );

                let mut builder = aws_sdk_s3::Config::builder()
                    .region(aws_types::region::Region::new(config.region.clone()))
                    .credentials_provider(credentials)
                    .behavior_version_latest();

                if let Some(ref endpoint) = config.endpoint_override {
                    builder = builder.endpoint_url(endpoint).force_path_style(true);
                }

                S3Client::from_conf(builder.build())
            }
            _ => {
                let shared = aws_config::defaults(aws_config::BehaviorVersion::latest())
                    .region(aws_types::region::Region::new(config.region.clone()))
                    .load()
                    .await;

                let mut builder = aws_sdk_s3::config::Builder::from(&shared);
                if let Some(ref endpoint) = config.endpoint_override {
                    builder = builder.endpoint_url(endpoint).force_path_style(true);
                }

                S3Client::from_conf(builder.build())
            }
        };

        Self {
            bucket: config.bucket.clone(),
            client,
        }
    }
}

impl ObjectTransport for S3Transport {
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> StoreResult<()> {
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(path)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("upload failed for {path}: {e}")))?;

        debug!("uploaded {size} bytes to s3://{}/{path}", self.bucket);
        Ok(())
    }

    async fn get_object(&self, path: &str) -> StoreResult<Option<Vec<u8>>> {
        let resp = match self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(resp) => resp,
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_no_such_key() {
                    return Ok(None);
                }
                return Err(StoreError::Transport(format!(
                    "download failed for {path}: {service_err}"
                )));
            }
        };

        let body = resp
            .body
            .collect()
            .await
            .map_err(|e| StoreError::Transport(format!("failed to read body for {path}: {e}")))?;

        let bytes = body.into_bytes().to_vec();
        debug!("downloaded {} bytes from s3://{}/{path}", bytes.len(), self.bucket);
        Ok(Some(bytes))
    }

    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let mut paths = Vec::new();
        let mut continuation: Option<String> = None;

        // S3 caps each page at 1000 keys; follow continuation tokens so
        // the full ordered listing is returned.
        loop {
            let mut req = self
                .client
                .list_objects_v2()
                .bucket(&self.bucket)
                .prefix(prefix);
            if let Some(token) = continuation.take() {
                req = req.continuation_token(token);
            }

            let resp = req
                .send()
                .await
                .map_err(|e| StoreError::Transport(format!("list failed for prefix {prefix}: {e}")))?;

            paths.extend(
                resp.contents()
                    .iter()
                    .filter_map(|obj| obj.key().map(|k| k.to_string())),
            );

            match resp.next_continuation_token() {
                Some(token) => continuation = Some(token.to_string()),
                None => break,
            }
        }

        Ok(paths)
    }

    async fn delete_object(&self, path: &str) -> StoreResult<()> {
        // S3 DeleteObject succeeds for absent keys, so idempotency
        // comes for free.
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
            .map_err(|e| StoreError::Transport(format!("delete failed for {path}: {e}")))?;

        debug!("deleted s3://{}/{path}", self.bucket);
        Ok(())
    }

    async fn exists(&self, path: &str) -> StoreResult<bool> {
        match self
            .client
            .head_object()
            .bucket(&self.bucket)
            .key(path)
            .send()
            .await
        {
            Ok(_) => Ok(true),
            Err(e) => {
                let service_err = e.into_service_error();
                if service_err.is_not_found() {
                    Ok(false)
                } else {
                    Err(StoreError::Transport(format!(
                        "head object failed for {path}: {service_err}"
                    )))
                }
            }
        }
    }
}
