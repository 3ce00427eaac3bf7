//! Blob storage configuration.

use serde::{Deserialize, Serialize};

/// Local blob storage and upload limits.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    /// Directory holding uploaded blobs.
    #[serde(default = "default_root_path")]
    pub root_path: String,
    /// Maximum accepted upload size in bytes (default 10 MiB).
    #[serde(default = "default_max_upload")]
    pub max_upload_size_bytes: u64,
    /// Read/write chunk size in bytes (default 64 KiB).
    #[serde(default = "default_chunk_size")]
    pub chunk_size_bytes: usize,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root_path: default_root_path(),
            max_upload_size_bytes: default_max_upload(),
            chunk_size_bytes: default_chunk_size(),
        }
    }
}

fn default_root_path() -> String {
    "./data/files".to_string()
}

fn default_max_upload() -> u64 {
    10 * 1024 * 1024
}

fn default_chunk_size() -> usize {
    64 * 1024
}
