//! Storage provider trait for blob backends.

use std::pin::Pin;

use async_trait::async_trait;
use bytes::Bytes;
use futures::Stream;
use tokio::io::AsyncWrite;

use crate::result::AppResult;

/// A byte stream type used for reading blob contents.
pub type ByteStream = Pin<Box<dyn Stream<Item = Result<Bytes, std::io::Error>> + Send>>;

/// A sequential writer for a freshly created blob.
pub type BlobWriter = Pin<Box<dyn AsyncWrite + Send>>;

/// Trait for blob storage backends.
///
/// Blobs are addressed by a flat relative path. The trait is defined here
/// and implemented in `stowage-storage`.
#[async_trait]
pub trait StorageProvider: Send + Sync + std::fmt::Debug + 'static {
    /// Create (or truncate) a blob and return a writer for it.
    async fn create(&self, path: &str) -> AppResult<BlobWriter>;

    /// Open a blob and stream it back in chunks of at most `chunk_size` bytes.
    async fn read(&self, path: &str, chunk_size: usize) -> AppResult<ByteStream>;

    /// Return the byte length of a blob.
    async fn size(&self, path: &str) -> AppResult<u64>;

    /// Delete a blob. Deleting a missing blob is not an error.
    async fn delete(&self, path: &str) -> AppResult<()>;
}
