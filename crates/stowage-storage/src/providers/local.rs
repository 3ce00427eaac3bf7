//! Local filesystem storage provider.

use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio_util::io::ReaderStream;
use tracing::debug;

use stowage_core::error::{AppError, ErrorKind};
use stowage_core::result::AppResult;
use stowage_core::traits::storage::{BlobWriter, ByteStream, StorageProvider};

/// Blobs stored as flat files under a single root directory.
#[derive(Debug, Clone)]
pub struct LocalStorageProvider {
    /// Root directory for all stored blobs.
    root: PathBuf,
}

impl LocalStorageProvider {
    /// Create a new local storage provider rooted at the given path.
    pub async fn new(root_path: &str) -> AppResult<Self> {
        let root = PathBuf::from(root_path);
        fs::create_dir_all(&root).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create storage root: {}", root.display()),
                e,
            )
        })?;
        Ok(Self { root })
    }

    /// Resolve a blob name to a path directly under the root.
    ///
    /// Names containing separators or parent references are rejected so a
    /// blob can never escape the root.
    fn resolve(&self, path: &str) -> AppResult<PathBuf> {
        let clean = path.trim_start_matches('/');
        if clean.is_empty() || clean.contains(['/', '\\']) || clean == "." || clean == ".." {
            return Err(AppError::validation(format!("Invalid blob name: {path}")));
        }
        Ok(self.root.join(clean))
    }
}

/// Map an open/stat failure, turning a missing file into `NotFound`.
fn map_missing(err: std::io::Error, path: &str, action: &str) -> AppError {
    if err.kind() == std::io::ErrorKind::NotFound {
        AppError::not_found(format!("Blob not found: {path}"))
    } else {
        AppError::with_source(ErrorKind::Storage, format!("Failed to {action}: {path}"), err)
    }
}

#[async_trait]
impl StorageProvider for LocalStorageProvider {
    async fn create(&self, path: &str) -> AppResult<BlobWriter> {
        let full_path = self.resolve(path)?;
        let file = fs::File::create(&full_path).await.map_err(|e| {
            AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to create blob: {path}"),
                e,
            )
        })?;

        debug!(path, "Created blob");
        Ok(Box::pin(file))
    }

    async fn read(&self, path: &str, chunk_size: usize) -> AppResult<ByteStream> {
        let full_path = self.resolve(path)?;
        let file = fs::File::open(&full_path)
            .await
            .map_err(|e| map_missing(e, path, "open blob"))?;

        Ok(Box::pin(ReaderStream::with_capacity(file, chunk_size.max(1))))
    }

    async fn size(&self, path: &str) -> AppResult<u64> {
        let full_path = self.resolve(path)?;
        let meta = fs::metadata(&full_path)
            .await
            .map_err(|e| map_missing(e, path, "stat blob"))?;
        Ok(meta.len())
    }

    async fn delete(&self, path: &str) -> AppResult<()> {
        let full_path = self.resolve(path)?;
        match fs::remove_file(&full_path).await {
            Ok(()) => {
                debug!(path, "Deleted blob");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(AppError::with_source(
                ErrorKind::Storage,
                format!("Failed to delete blob: {path}"),
                e,
            )),
        }
    }
}
