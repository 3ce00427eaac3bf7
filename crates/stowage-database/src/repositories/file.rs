//! File metadata repository.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};

use stowage_core::error::{AppError, ErrorKind};
use stowage_core::result::AppResult;
use stowage_core::types::Window;
use stowage_entity::file::{CreateFileRecord, FileFilter, FileRecord, StorageUsage};

const FILE_COLUMNS: &str =
    "id, owner_id, display_name, logical_path, size_bytes, is_downloadable, created_at";

/// Append-only store of file records.
#[async_trait]
pub trait FileRepository: Send + Sync + std::fmt::Debug + 'static {
    /// Insert exactly one record. A duplicate id or logical path is a conflict.
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord>;

    /// Records matching `filter`, ordered by creation time, within `window`.
    async fn list(&self, filter: &FileFilter, window: Window) -> AppResult<Vec<FileRecord>>;

    /// The first record matching `filter`, if any.
    async fn find_one(&self, filter: &FileFilter) -> AppResult<Option<FileRecord>>;

    /// Count and total size of all records matching `filter`.
    async fn usage(&self, filter: &FileFilter) -> AppResult<StorageUsage>;
}

/// PostgreSQL-backed file repository.
#[derive(Debug, Clone)]
pub struct PgFileRepository {
    pool: PgPool,
}

impl PgFileRepository {
    /// Create a new file repository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Append `WHERE` predicates for every set field of the filter.
fn push_filter(query: &mut QueryBuilder<'_, Postgres>, filter: &FileFilter) {
    query.push(" WHERE TRUE");
    if let Some(id) = filter.id {
        query.push(" AND id = ").push_bind(id);
    }
    if let Some(owner_id) = filter.owner_id {
        query.push(" AND owner_id = ").push_bind(owner_id);
    }
    if let Some(flag) = filter.is_downloadable {
        query.push(" AND is_downloadable = ").push_bind(flag);
    }
}

#[async_trait]
impl FileRepository for PgFileRepository {
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        let mut tx = self.pool.begin().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to begin transaction", e)
        })?;

        let record = sqlx::query_as::<_, FileRecord>(&format!(
            "INSERT INTO files (id, owner_id, display_name, logical_path, size_bytes, is_downloadable) \
             VALUES ($1, $2, $3, $4, $5, $6) RETURNING {FILE_COLUMNS}"
        ))
        .bind(data.id)
        .bind(data.owner_id)
        .bind(&data.display_name)
        .bind(&data.logical_path)
        .bind(data.size_bytes)
        .bind(data.is_downloadable)
        .fetch_one(&mut *tx)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db_err)
                if db_err.constraint() == Some("files_logical_path_key") =>
            {
                AppError::conflict(format!("Path '{}' already exists", data.logical_path))
            }
            sqlx::Error::Database(ref db_err) if db_err.constraint() == Some("files_pkey") => {
                AppError::conflict(format!("File {} already exists", data.id))
            }
            _ => AppError::with_source(ErrorKind::Database, "Failed to create file", e),
        })?;

        tx.commit().await.map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to commit file record", e)
        })?;

        Ok(record)
    }

    async fn list(&self, filter: &FileFilter, window: Window) -> AppResult<Vec<FileRecord>> {
        let mut query = QueryBuilder::new(format!("SELECT {FILE_COLUMNS} FROM files"));
        push_filter(&mut query, filter);
        query
            .push(" ORDER BY created_at ASC, id ASC LIMIT ")
            .push_bind(window.limit())
            .push(" OFFSET ")
            .push_bind(window.offset());

        query
            .build_query_as::<FileRecord>()
            .fetch_all(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to list files", e))
    }

    async fn find_one(&self, filter: &FileFilter) -> AppResult<Option<FileRecord>> {
        let mut query = QueryBuilder::new(format!("SELECT {FILE_COLUMNS} FROM files"));
        push_filter(&mut query, filter);
        query.push(" LIMIT 1");

        query
            .build_query_as::<FileRecord>()
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| AppError::with_source(ErrorKind::Database, "Failed to find file", e))
    }

    async fn usage(&self, filter: &FileFilter) -> AppResult<StorageUsage> {
        let mut query = QueryBuilder::new(
            "SELECT COUNT(*) AS files, COALESCE(SUM(size_bytes), 0)::BIGINT AS used FROM files",
        );
        push_filter(&mut query, filter);

        query
            .build_query_as::<StorageUsage>()
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                AppError::with_source(ErrorKind::Database, "Failed to aggregate usage", e)
            })
    }
}
