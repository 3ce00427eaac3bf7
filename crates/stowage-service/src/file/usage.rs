//! Storage usage totals for the authenticated user.

use std::sync::Arc;

use stowage_core::result::AppResult;
use stowage_database::repositories::FileRepository;
use stowage_entity::file::{FileFilter, StorageUsage};

use crate::context::RequestContext;

/// Reports how many files a user has and how many bytes they occupy.
#[derive(Debug, Clone)]
pub struct UsageService {
    file_repo: Arc<dyn FileRepository>,
}

impl UsageService {
    /// Creates a new usage service.
    pub fn new(file_repo: Arc<dyn FileRepository>) -> Self {
        Self { file_repo }
    }

    /// Aggregate over every record the caller owns.
    pub async fn usage(&self, ctx: &RequestContext) -> AppResult<StorageUsage> {
        self.file_repo
            .usage(&FileFilter::owned_by(ctx.user_id))
            .await
    }
}
