//! Object transport seam.
//!
//! The encrypted store delegates raw byte movement to an
//! [`ObjectTransport`], already scoped to one bucket or namespace.
//! Implementations own their retry and connection policy; the store
//! issues exactly one logical request per operation and never retries.

use crate::error::StoreResult;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// Transport collaborator for raw object bytes, keyed by logical path.
#[allow(async_fn_in_trait)]
pub trait ObjectTransport {
    /// Writes an object, overwriting any existing bytes at `path`.
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> StoreResult<()>;

    /// Reads an object. Returns `Ok(None)` when no object exists at
    /// `path` — absence is an expected outcome, not an error.
    async fn get_object(&self, path: &str) -> StoreResult<Option<Vec<u8>>>;

    /// Lists object paths under a prefix, in lexicographic order.
    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>>;

    /// Deletes an object. Idempotent: deleting an absent path succeeds.
    async fn delete_object(&self, path: &str) -> StoreResult<()>;

    /// Returns whether an object exists at `path`.
    async fn exists(&self, path: &str) -> StoreResult<bool>;
}

/// In-memory transport for tests and local development.
///
/// Clones share the same underlying map. BTreeMap keeps listings in
/// lexicographic order, matching S3 semantics.
#[derive(Clone, Default)]
pub struct MemoryTransport {
    objects: Arc<RwLock<BTreeMap<String, Vec<u8>>>>,
}

impl MemoryTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored objects.
    pub async fn len(&self) -> usize {
        self.objects.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.objects.read().await.is_empty()
    }
}

impl ObjectTransport for MemoryTransport {
    async fn put_object(&self, path: &str, bytes: Vec<u8>) -> StoreResult<()> {
        self.objects.write().await.insert(path.to_string(), bytes);
        Ok(())
    }

    async fn get_object(&self, path: &str) -> StoreResult<Option<Vec<u8>>> {
        Ok(self.objects.read().await.get(path).cloned())
    }

    async fn list_objects(&self, prefix: &str) -> StoreResult<Vec<String>> {
        let objects = self.objects.read().await;
        Ok(objects
            .range(prefix.to_string()..)
            .take_while(|(path, _)| path.starts_with(prefix))
            .map(|(path, _)| path.clone())
            .collect())
    }

    async fn delete_object(&self, path: &str) -> StoreResult<()> {
        self.objects.write().await.remove(path);
        Ok(())
    }

    async fn exists(&self, path: &str) -> StoreResult<bool> {
        Ok(self.objects.read().await.contains_key(path))
    }
}
