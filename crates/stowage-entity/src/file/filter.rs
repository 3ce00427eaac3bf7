//! Named exact-match predicates over file records.

use serde::{Deserialize, Serialize};

use stowage_core::types::{FileId, UserId};

use super::model::FileRecord;

/// A conjunction of equality predicates. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileFilter {
    /// Match a single file id.
    pub id: Option<FileId>,
    /// Match records owned by this user.
    pub owner_id: Option<UserId>,
    /// Match on the downloadable flag.
    pub is_downloadable: Option<bool>,
}

impl FileFilter {
    /// Records owned by `owner`.
    pub fn owned_by(owner: UserId) -> Self {
        Self {
            owner_id: Some(owner),
            ..Self::default()
        }
    }

    /// Restrict to a single id.
    pub fn with_id(mut self, id: FileId) -> Self {
        self.id = Some(id);
        self
    }

    /// Restrict on the downloadable flag.
    pub fn downloadable(mut self, flag: bool) -> Self {
        self.is_downloadable = Some(flag);
        self
    }

    /// Evaluate the predicate against an in-memory record.
    pub fn matches(&self, record: &FileRecord) -> bool {
        self.id.is_none_or(|id| record.id == id)
            && self.owner_id.is_none_or(|owner| record.owner_id == owner)
            && self
                .is_downloadable
                .is_none_or(|flag| record.is_downloadable == flag)
    }
}
