//! In-memory repositories using Tokio locks for single-process deployments.
//!
//! These mirror the PostgreSQL semantics (uniqueness, ordering, windowing)
//! and back the `memory` database provider and the test suites.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;

use stowage_core::error::AppError;
use stowage_core::result::AppResult;
use stowage_core::traits::HealthProbe;
use stowage_core::types::{UserId, Window};
use stowage_entity::file::{CreateFileRecord, FileFilter, FileRecord, StorageUsage};
use stowage_entity::user::{CreateUser, User};

use super::file::FileRepository;
use super::user::UserRepository;

/// File records held in insertion order.
#[derive(Debug, Clone, Default)]
pub struct MemoryFileRepository {
    records: Arc<RwLock<Vec<FileRecord>>>,
}

impl MemoryFileRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FileRepository for MemoryFileRepository {
    async fn create(&self, data: &CreateFileRecord) -> AppResult<FileRecord> {
        let mut records = self.records.write().await;

        if records.iter().any(|r| r.logical_path == data.logical_path) {
            return Err(AppError::conflict(format!(
                "Path '{}' already exists",
                data.logical_path
            )));
        }
        if records.iter().any(|r| r.id == data.id) {
            return Err(AppError::conflict(format!("File {} already exists", data.id)));
        }

        let record = FileRecord {
            id: data.id,
            owner_id: data.owner_id,
            display_name: data.display_name.clone(),
            logical_path: data.logical_path.clone(),
            size_bytes: data.size_bytes,
            is_downloadable: data.is_downloadable,
            created_at: Utc::now(),
        };
        records.push(record.clone());
        Ok(record)
    }

    async fn list(&self, filter: &FileFilter, window: Window) -> AppResult<Vec<FileRecord>> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .skip(usize::try_from(window.skip).unwrap_or(usize::MAX))
            .take(usize::try_from(window.limit).unwrap_or(usize::MAX))
            .cloned()
            .collect())
    }

    async fn find_one(&self, filter: &FileFilter) -> AppResult<Option<FileRecord>> {
        let records = self.records.read().await;
        Ok(records.iter().find(|r| filter.matches(r)).cloned())
    }

    async fn usage(&self, filter: &FileFilter) -> AppResult<StorageUsage> {
        let records = self.records.read().await;
        Ok(records
            .iter()
            .filter(|r| filter.matches(r))
            .fold(StorageUsage::default(), |acc, r| StorageUsage {
                files: acc.files + 1,
                used: acc.used + r.size_bytes,
            }))
    }
}

/// Users keyed by id.
#[derive(Debug, Clone, Default)]
pub struct MemoryUserRepository {
    users: Arc<RwLock<HashMap<UserId, User>>>,
}

impl MemoryUserRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for MemoryUserRepository {
    async fn create(&self, data: &CreateUser) -> AppResult<User> {
        let mut users = self.users.write().await;

        let email = data.email.to_lowercase();
        if users.values().any(|u| u.email.to_lowercase() == email) {
            return Err(AppError::conflict("Email already registered"));
        }

        let user = User {
            id: UserId::new(),
            email: data.email.clone(),
            hashed_password: data.hashed_password.clone(),
            is_active: true,
            is_superuser: false,
            is_verified: false,
            created_at: Utc::now(),
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }

    async fn find_by_id(&self, id: UserId) -> AppResult<Option<User>> {
        Ok(self.users.read().await.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> AppResult<Option<User>> {
        // Same folding as `LOWER(email)` in PostgreSQL.
        let email = email.to_lowercase();
        Ok(self
            .users
            .read()
            .await
            .values()
            .find(|u| u.email.to_lowercase() == email)
            .cloned())
    }
}

/// Health probe for the in-memory provider; always reachable.
#[derive(Debug, Clone, Copy, Default)]
pub struct MemoryProbe;

#[async_trait]
impl HealthProbe for MemoryProbe {
    fn name(&self) -> &str {
        "memory"
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }
}
