//! # stowage-storage
//!
//! Blob storage providers implementing
//! [`StorageProvider`](stowage_core::traits::StorageProvider).

pub mod providers;

pub use providers::local::LocalStorageProvider;
