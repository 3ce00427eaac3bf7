//! File use cases: upload, download, listing, and usage.

pub mod download;
pub mod service;
pub mod upload;
pub mod usage;

pub use download::{DownloadResult, DownloadService};
pub use service::{FileListing, FileService};
pub use upload::{UploadParams, UploadService};
pub use usage::UsageService;
