//! File download service: resolves a record to a streamed blob.

use std::sync::Arc;

use tracing::{info, warn};

use stowage_core::error::{AppError, ErrorKind};
use stowage_core::result::AppResult;
use stowage_core::traits::StorageProvider;
use stowage_core::traits::storage::ByteStream;
use stowage_core::types::FileId;
use stowage_database::repositories::FileRepository;
use stowage_entity::file::FileFilter;

use crate::context::RequestContext;

/// Content type used for every download.
pub const DOWNLOAD_CONTENT_TYPE: &str = "application/octet-stream";

/// Handles file downloads scoped to the caller.
#[derive(Clone)]
pub struct DownloadService {
    /// File metadata repository.
    file_repo: Arc<dyn FileRepository>,
    /// Blob store.
    storage: Arc<dyn StorageProvider>,
    /// Chunk size for the response stream.
    chunk_size: usize,
}

impl std::fmt::Debug for DownloadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadService").finish()
    }
}

/// Result containing file metadata and a content stream.
pub struct DownloadResult {
    /// Blob contents.
    pub stream: ByteStream,
    /// Exact blob length for `Content-Length`.
    pub size: u64,
    /// MIME type for `Content-Type`.
    pub content_type: String,
    /// Suggested filename for `Content-Disposition`.
    pub filename: String,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("size", &self.size)
            .field("content_type", &self.content_type)
            .field("filename", &self.filename)
            .finish()
    }
}

impl DownloadService {
    /// Creates a new download service.
    pub fn new(
        file_repo: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageProvider>,
        chunk_size: usize,
    ) -> Self {
        Self {
            file_repo,
            storage,
            chunk_size,
        }
    }

    /// Open a downloadable file owned by the caller.
    ///
    /// Files that do not exist, are not downloadable, or belong to someone
    /// else are all reported as `NotFound`.
    pub async fn download(&self, ctx: &RequestContext, id: FileId) -> AppResult<DownloadResult> {
        let filter = FileFilter::owned_by(ctx.user_id)
            .with_id(id)
            .downloadable(true);

        let file = self
            .file_repo
            .find_one(&filter)
            .await?
            .ok_or_else(|| AppError::not_found(format!("File {id} not found")))?;

        let blob = file.blob_name();
        let size = match self.storage.size(&blob).await {
            Ok(size) => size,
            Err(e) if e.kind == ErrorKind::NotFound => {
                warn!(
                    file_id = %file.id,
                    blob = %blob,
                    "File record exists but its blob is missing"
                );
                return Err(AppError::not_found(format!("File {id} not found")));
            }
            Err(e) => return Err(e),
        };
        let stream = self.storage.read(&blob, self.chunk_size).await?;

        info!(user_id = %ctx.user_id, file_id = %file.id, size, "Download started");

        Ok(DownloadResult {
            filename: file.display_name,
            stream,
            size,
            content_type: DOWNLOAD_CONTENT_TYPE.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use futures::TryStreamExt;

    use stowage_core::config::StorageConfig;
    use stowage_core::types::UserId;
    use stowage_database::repositories::MemoryFileRepository;
    use stowage_entity::file::{CreateFileRecord, FileRecord};
    use stowage_storage::LocalStorageProvider;

    use super::*;
    use crate::file::upload::{UploadParams, UploadService};

    struct Harness {
        _dir: tempfile::TempDir,
        repo: Arc<MemoryFileRepository>,
        storage: Arc<LocalStorageProvider>,
        upload: UploadService,
        download: DownloadService,
    }

    async fn harness() -> Harness {
        let dir = tempfile::tempdir().unwrap();
        let repo = Arc::new(MemoryFileRepository::new());
        let storage = Arc::new(
            LocalStorageProvider::new(dir.path().to_str().unwrap())
                .await
                .unwrap(),
        );
        let upload = UploadService::new(repo.clone(), storage.clone(), StorageConfig::default());
        let download = DownloadService::new(repo.clone(), storage.clone(), 3);
        Harness {
            _dir: dir,
            repo,
            storage,
            upload,
            download,
        }
    }

    async fn put(h: &Harness, ctx: &RequestContext, name: &str, body: &[u8]) -> FileRecord {
        h.upload
            .upload(
                ctx,
                UploadParams {
                    path: "dir".into(),
                    file_name: name.into(),
                },
                body,
            )
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_round_trip_returns_same_bytes() {
        let h = harness().await;
        let ctx = RequestContext::new(UserId::new());
        let file = put(&h, &ctx, "notes.txt", b"hello stowage").await;

        let result = h.download.download(&ctx, file.id).await.unwrap();
        assert_eq!(result.filename, "notes.txt");
        assert_eq!(result.size, 13);
        assert_eq!(result.content_type, DOWNLOAD_CONTENT_TYPE);

        let chunks: Vec<_> = result.stream.try_collect().await.unwrap();
        assert!(chunks.iter().all(|c| c.len() <= 3));
        assert_eq!(chunks.concat(), b"hello stowage");
    }

    #[tokio::test]
    async fn test_other_owner_gets_not_found() {
        let h = harness().await;
        let owner = RequestContext::new(UserId::new());
        let other = RequestContext::new(UserId::new());
        let file = put(&h, &owner, "secret.txt", b"mine").await;

        let err = h.download.download(&other, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_not_downloadable_gets_not_found() {
        let h = harness().await;
        let ctx = RequestContext::new(UserId::new());
        let id = FileId::new();
        h.repo
            .create(&CreateFileRecord {
                id,
                owner_id: ctx.user_id,
                display_name: "locked.bin".into(),
                logical_path: "dir/locked.bin".into(),
                size_bytes: 0,
                is_downloadable: false,
            })
            .await
            .unwrap();

        let err = h.download.download(&ctx, id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_missing_blob_gets_not_found() {
        let h = harness().await;
        let ctx = RequestContext::new(UserId::new());
        let file = put(&h, &ctx, "gone.txt", b"soon gone").await;
        h.storage.delete(&file.blob_name()).await.unwrap();

        let err = h.download.download(&ctx, file.id).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_unknown_id_gets_not_found() {
        let h = harness().await;
        let ctx = RequestContext::new(UserId::new());

        let err = h.download.download(&ctx, FileId::new()).await.unwrap_err();
        assert_eq!(err.kind, ErrorKind::NotFound);
    }
}
