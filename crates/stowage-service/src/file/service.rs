//! File listing scoped to the authenticated user.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use stowage_core::result::AppResult;
use stowage_core::types::{UserId, Window};
use stowage_database::repositories::FileRepository;
use stowage_entity::file::{FileFilter, FileRecord};

use crate::context::RequestContext;

/// Read-only access to the caller's file records.
#[derive(Debug, Clone)]
pub struct FileService {
    file_repo: Arc<dyn FileRepository>,
}

/// One window of the caller's files.
#[derive(Debug, Clone, Serialize)]
pub struct FileListing {
    /// Owner of every listed file.
    pub account_id: UserId,
    /// Records in creation order.
    pub files: Vec<FileRecord>,
}

impl FileService {
    /// Creates a new file service.
    pub fn new(file_repo: Arc<dyn FileRepository>) -> Self {
        Self { file_repo }
    }

    /// List the caller's files in creation order.
    pub async fn list(&self, ctx: &RequestContext, window: Window) -> AppResult<FileListing> {
        let files = self
            .file_repo
            .list(&FileFilter::owned_by(ctx.user_id), window)
            .await?;

        debug!(
            user_id = %ctx.user_id,
            skip = window.skip,
            limit = window.limit,
            count = files.len(),
            "Listed files"
        );

        Ok(FileListing {
            account_id: ctx.user_id,
            files,
        })
    }
}

#[cfg(test)]
mod tests {
    use stowage_core::types::FileId;
    use stowage_database::repositories::MemoryFileRepository;
    use stowage_entity::file::CreateFileRecord;

    use super::*;

    async fn seed(repo: &MemoryFileRepository, owner: UserId, count: usize) {
        for i in 0..count {
            repo.create(&CreateFileRecord {
                id: FileId::new(),
                owner_id: owner,
                display_name: format!("{i}.txt"),
                logical_path: format!("{owner}/{i}.txt"),
                size_bytes: 1,
                is_downloadable: true,
            })
            .await
            .unwrap();
        }
    }

    #[tokio::test]
    async fn test_list_only_returns_callers_files() {
        let repo = Arc::new(MemoryFileRepository::new());
        let ctx = RequestContext::new(UserId::new());
        seed(&repo, ctx.user_id, 3).await;
        seed(&repo, UserId::new(), 2).await;

        let service = FileService::new(repo);
        let listing = service.list(&ctx, Window::default()).await.unwrap();

        assert_eq!(listing.account_id, ctx.user_id);
        assert_eq!(listing.files.len(), 3);
        assert!(listing.files.iter().all(|f| f.owner_id == ctx.user_id));
    }

    #[tokio::test]
    async fn test_default_window_caps_at_one_hundred() {
        let repo = Arc::new(MemoryFileRepository::new());
        let ctx = RequestContext::new(UserId::new());
        seed(&repo, ctx.user_id, 120).await;

        let service = FileService::new(repo);
        let first = service.list(&ctx, Window::default()).await.unwrap();
        let rest = service.list(&ctx, Window::new(100, 100)).await.unwrap();

        assert_eq!(first.files.len(), 100);
        assert_eq!(rest.files.len(), 20);
        assert_eq!(first.files[0].display_name, "0.txt");
        assert_eq!(rest.files[0].display_name, "100.txt");
    }

    #[tokio::test]
    async fn test_listing_serializes_wire_names() {
        let repo = Arc::new(MemoryFileRepository::new());
        let ctx = RequestContext::new(UserId::new());
        seed(&repo, ctx.user_id, 1).await;

        let listing = FileService::new(repo)
            .list(&ctx, Window::default())
            .await
            .unwrap();
        let json = serde_json::to_value(&listing).unwrap();

        assert_eq!(json["account_id"], ctx.user_id.to_string());
        assert_eq!(json["files"][0]["name"], "0.txt");
        assert_eq!(json["files"][0]["size"], 1);
    }
}
