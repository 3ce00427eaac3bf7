//! Streaming upload with a hard size cap.
//!
//! The incoming body is copied to a fresh blob one bounded chunk at a time.
//! The running byte count is checked before each chunk is written, so an
//! oversized upload never lands more than the cap on disk. Any failure after
//! the blob exists removes it again, and the metadata record is only
//! inserted once the stream has been fully written.

use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tracing::{info, warn};

use stowage_core::config::StorageConfig;
use stowage_core::error::{AppError, ErrorKind};
use stowage_core::result::AppResult;
use stowage_core::traits::StorageProvider;
use stowage_core::traits::storage::BlobWriter;
use stowage_core::types::FileId;
use stowage_database::repositories::FileRepository;
use stowage_entity::file::model::{
    blob_name, logical_path, validate_display_name, validate_logical_path,
};
use stowage_entity::file::{CreateFileRecord, FileRecord};

use crate::context::RequestContext;

/// Handles single-request streaming uploads.
#[derive(Clone)]
pub struct UploadService {
    /// File metadata repository.
    file_repo: Arc<dyn FileRepository>,
    /// Blob store.
    storage: Arc<dyn StorageProvider>,
    /// Size cap and chunk size.
    config: StorageConfig,
}

impl std::fmt::Debug for UploadService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadService")
            .field("max_upload_size_bytes", &self.config.max_upload_size_bytes)
            .field("chunk_size_bytes", &self.config.chunk_size_bytes)
            .finish()
    }
}

/// Client-supplied naming for an upload.
#[derive(Debug, Clone)]
pub struct UploadParams {
    /// Virtual directory the file is filed under.
    pub path: String,
    /// Original file name.
    pub file_name: String,
}

impl UploadService {
    /// Creates a new upload service.
    pub fn new(
        file_repo: Arc<dyn FileRepository>,
        storage: Arc<dyn StorageProvider>,
        config: StorageConfig,
    ) -> Self {
        Self {
            file_repo,
            storage,
            config,
        }
    }

    /// Stream `body` into a new blob and record it for the caller.
    ///
    /// Fails with `PayloadTooLarge` as soon as the byte count passes the
    /// configured maximum. On any failure no record is created and the
    /// partial blob is removed.
    pub async fn upload<R>(
        &self,
        ctx: &RequestContext,
        params: UploadParams,
        body: R,
    ) -> AppResult<FileRecord>
    where
        R: AsyncRead + Send,
    {
        validate_display_name(&params.file_name)?;
        let logical_path = logical_path(&params.path, &params.file_name);
        validate_logical_path(&logical_path)?;

        let id = FileId::new();
        let blob = blob_name(id, &params.file_name);
        let mut writer = self.storage.create(&blob).await?;

        let size_bytes = match self.copy_bounded(body, &mut writer).await {
            Ok(n) => n,
            Err(e) => {
                drop(writer);
                warn!(
                    user_id = %ctx.user_id,
                    file_id = %id,
                    error = %e,
                    "Upload aborted"
                );
                self.discard(&blob).await;
                return Err(e);
            }
        };
        drop(writer);

        let data = CreateFileRecord {
            id,
            owner_id: ctx.user_id,
            display_name: params.file_name,
            logical_path,
            size_bytes: i64::try_from(size_bytes)
                .map_err(|_| AppError::internal("Upload size overflows i64"))?,
            is_downloadable: true,
        };

        let file = match self.file_repo.create(&data).await {
            Ok(file) => file,
            Err(e) => {
                self.discard(&blob).await;
                return Err(e);
            }
        };

        info!(
            user_id = %ctx.user_id,
            file_id = %file.id,
            path = %file.logical_path,
            size = file.size_bytes,
            "Upload completed"
        );

        Ok(file)
    }

    /// Copy `body` into `writer` chunk by chunk, enforcing the size cap.
    async fn copy_bounded<R>(&self, body: R, writer: &mut BlobWriter) -> AppResult<u64>
    where
        R: AsyncRead + Send,
    {
        tokio::pin!(body);

        let max = self.config.max_upload_size_bytes;
        let mut buf = vec![0u8; self.config.chunk_size_bytes.max(1)];
        let mut total: u64 = 0;

        loop {
            let n = body.read(&mut buf).await.map_err(|e| {
                AppError::with_source(ErrorKind::Validation, "Failed to read upload body", e)
            })?;
            if n == 0 {
                break;
            }

            total += n as u64;
            if total > max {
                return Err(AppError::payload_too_large(format!(
                    "File exceeds the maximum upload size of {max} bytes"
                )));
            }

            writer.write_all(&buf[..n]).await.map_err(|e| {
                AppError::with_source(ErrorKind::Storage, "Failed to write chunk", e)
            })?;
        }

        writer
            .flush()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to flush blob", e))?;
        writer
            .shutdown()
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Storage, "Failed to close blob", e))?;

        Ok(total)
    }

    /// Best-effort removal of a blob that has no metadata record.
    async fn discard(&self, blob: &str) {
        if let Err(e) = self.storage.delete(blob).await {
            warn!(blob, error = %e, "Failed to remove partial blob");
        }
    }
}
