//! Encrypted object store for S3-compatible storage.
//!
//! Provides transparent, key-rotatable encryption over an object
//! transport:
//! - `put` encrypts under the current primary key version and frames a
//!   self-describing envelope before upload
//! - `get` recovers the key version recorded in the envelope at write
//!   time, so rotation never strands old objects
//! - `list` and `delete` pass through to the transport
//!
//! The transport is a seam: [`S3Transport`] for real storage,
//! [`MemoryTransport`] for tests and local development.

pub mod config;
pub mod error;
pub mod s3;
pub mod store;
pub mod transport;

pub use config::{KeySetConfig, S3Config, StoreConfig};
pub use error::{StoreError, StoreResult};
pub use s3::S3Transport;
pub use store::SealedObjectStore;
pub use transport::{MemoryTransport, ObjectTransport};
