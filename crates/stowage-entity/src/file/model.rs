//! Stored file entity model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use stowage_core::error::AppError;
use stowage_core::result::AppResult;
use stowage_core::types::{FileId, UserId};

/// Maximum length of a client-supplied file name, in characters.
pub const MAX_DISPLAY_NAME_LEN: usize = 100;
/// Maximum length of the stored logical path, in characters.
pub const MAX_LOGICAL_PATH_LEN: usize = 255;

/// Metadata for one uploaded blob.
///
/// Records are append-only: created once after the blob is fully written
/// and never updated in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct FileRecord {
    /// Unique file identifier; also the blob name stem.
    pub id: FileId,
    /// The uploading user.
    #[serde(rename = "user_id")]
    pub owner_id: UserId,
    /// Original client-supplied file name.
    #[serde(rename = "name")]
    pub display_name: String,
    /// Client-supplied virtual path joined with the file name.
    #[serde(rename = "path")]
    pub logical_path: String,
    /// Exact byte length of the blob.
    #[serde(rename = "size")]
    pub size_bytes: i64,
    /// Whether the blob may currently be fetched.
    pub is_downloadable: bool,
    /// When the record was created.
    pub created_at: DateTime<Utc>,
}

impl FileRecord {
    /// Name of the blob holding this record's bytes.
    pub fn blob_name(&self) -> String {
        blob_name(self.id, &self.display_name)
    }
}

/// Data required to create a new file record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateFileRecord {
    /// Pre-generated identifier shared with the blob.
    pub id: FileId,
    /// The uploading user.
    pub owner_id: UserId,
    /// Original client-supplied file name.
    pub display_name: String,
    /// Client path joined with the file name.
    pub logical_path: String,
    /// Final byte count.
    pub size_bytes: i64,
    /// Initial downloadable flag.
    pub is_downloadable: bool,
}

/// Extension used for the on-disk blob: everything after the last `.`.
///
/// A name without a dot yields the whole name, so `"test"` is stored as
/// `<id>.test`.
pub fn blob_extension(display_name: &str) -> &str {
    display_name.rsplit('.').next().unwrap_or(display_name)
}

/// Build the blob name `<id>.<extension>` for a file.
pub fn blob_name(id: FileId, display_name: &str) -> String {
    format!("{id}.{}", blob_extension(display_name))
}

/// Join the client path and file name into the stored logical path.
pub fn logical_path(path: &str, display_name: &str) -> String {
    format!("{}/{display_name}", path.trim_end_matches('/'))
}

/// Check a client-supplied file name before any bytes are accepted.
pub fn validate_display_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::validation("File name must not be empty"));
    }
    if name.chars().count() > MAX_DISPLAY_NAME_LEN {
        return Err(AppError::validation(format!(
            "File name must be at most {MAX_DISPLAY_NAME_LEN} characters"
        )));
    }
    if name.contains(['/', '\\', '\0']) || name == "." || name == ".." {
        return Err(AppError::validation(
            "File name must not contain path separators",
        ));
    }
    Ok(())
}

/// Check a joined logical path against the stored column width.
pub fn validate_logical_path(path: &str) -> AppResult<()> {
    if path.chars().count() > MAX_LOGICAL_PATH_LEN {
        return Err(AppError::validation(format!(
            "Path must be at most {MAX_LOGICAL_PATH_LEN} characters"
        )));
    }
    Ok(())
}
