//! Persistence interface for the six content collections.
//!
//! Two backends implement [`ContentStore`]: [`MemoryStore`] keeps everything in
//! process maps, [`DbStore`](crate::db::DbStore) maps the collections onto
//! relational tables through SeaORM. One of them is chosen once at startup by
//! [`open_store`] and handed to the HTTP layer as a [`SharedStore`].
//!
//! Missing records are never errors: lookups return `None`, updates return
//! `None` and deletes return `false`. Only backend faults surface as
//! [`StoreError`], and [`ContentStore::stats`] swallows even those.

pub mod memory;
mod seed;

pub use memory::MemoryStore;

use crate::config::StorageConfig;
use crate::db::DbStore;
use crate::models::{
    ContentStats, Enrollment, EnrollmentPatch, Feedback, NewEnrollment, NewFeedback, NewNote,
    NewQuestionPaper, NewUser, NewVideo, Note, NoteFilter, NotePatch, PaperFilter, QuestionPaper,
    QuestionPaperPatch, User, Video, VideoFilter, VideoPatch,
};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, warn};

/// Errors raised by a storage backend.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(String),

    #[error("Corrupt {entity} record {id}: {reason}")]
    CorruptRecord {
        entity: &'static str,
        id: String,
        reason: String,
    },

    #[error("Storage misconfigured: {0}")]
    Misconfigured(String),
}

impl From<sea_orm::DbErr> for StoreError {
    fn from(err: sea_orm::DbErr) -> Self {
        Self::Database(err.to_string())
    }
}

impl StoreError {
    pub fn corrupt(entity: &'static str, id: &str, reason: impl fmt::Display) -> Self {
        Self::CorruptRecord {
            entity,
            id: id.to_string(),
            reason: reason.to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Backend {
    Memory,
    Relational,
}

impl Backend {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Memory => "memory",
            Self::Relational => "relational",
        }
    }
}

impl fmt::Display for Backend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Uniform create/read/update/delete/filter/aggregate operations over users,
/// question papers, videos, notes, feedback and enrollments.
#[async_trait::async_trait]
pub trait ContentStore: Send + Sync {
    fn backend(&self) -> Backend;

    // Users

    /// All users ordered by username.
    async fn list_users(&self) -> Result<Vec<User>, StoreError>;

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError>;

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    async fn get_user_by_mobile(&self, mobile: &str) -> Result<Option<User>, StoreError>;

    /// Inserts a user without checking username or mobile uniqueness; callers
    /// pre-check with the lookups above.
    async fn create_user(&self, new: NewUser) -> Result<User, StoreError>;

    /// Returns `false` when the id is unknown or belongs to an admin.
    async fn delete_user(&self, id: &str) -> Result<bool, StoreError>;

    // Question papers

    /// Papers matching every set field of `filter`, newest year first.
    async fn list_question_papers(
        &self,
        filter: &PaperFilter,
    ) -> Result<Vec<QuestionPaper>, StoreError>;

    async fn get_question_paper(&self, id: &str) -> Result<Option<QuestionPaper>, StoreError>;

    async fn create_question_paper(
        &self,
        new: NewQuestionPaper,
    ) -> Result<QuestionPaper, StoreError>;

    async fn update_question_paper(
        &self,
        id: &str,
        patch: QuestionPaperPatch,
    ) -> Result<Option<QuestionPaper>, StoreError>;

    async fn delete_question_paper(&self, id: &str) -> Result<bool, StoreError>;

    // Videos

    /// Videos matching every set field of `filter`, most recently added first.
    async fn list_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>, StoreError>;

    async fn get_video(&self, id: &str) -> Result<Option<Video>, StoreError>;

    async fn create_video(&self, new: NewVideo) -> Result<Video, StoreError>;

    async fn update_video(&self, id: &str, patch: VideoPatch)
    -> Result<Option<Video>, StoreError>;

    async fn delete_video(&self, id: &str) -> Result<bool, StoreError>;

    // Notes

    /// Notes matching every set field of `filter`, most recently added first.
    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<Note>, StoreError>;

    async fn get_note(&self, id: &str) -> Result<Option<Note>, StoreError>;

    async fn create_note(&self, new: NewNote) -> Result<Note, StoreError>;

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StoreError>;

    async fn delete_note(&self, id: &str) -> Result<bool, StoreError>;

    // Feedback

    /// All feedback, most recent first.
    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError>;

    async fn get_feedback(&self, id: &str) -> Result<Option<Feedback>, StoreError>;

    async fn create_feedback(&self, new: NewFeedback) -> Result<Feedback, StoreError>;

    async fn delete_feedback(&self, id: &str) -> Result<bool, StoreError>;

    // Enrollments

    /// All enrollment requests, most recent first.
    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, StoreError>;

    async fn get_enrollment(&self, id: &str) -> Result<Option<Enrollment>, StoreError>;

    async fn create_enrollment(&self, new: NewEnrollment) -> Result<Enrollment, StoreError>;

    async fn update_enrollment(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, StoreError>;

    async fn delete_enrollment(&self, id: &str) -> Result<bool, StoreError>;

    // Aggregates

    /// Per-collection counts. Never fails: a backend fault yields all zeros.
    async fn stats(&self) -> ContentStats;
}

pub type SharedStore = Arc<dyn ContentStore>;

/// Builds the storage backend selected by `config`.
///
/// Relational mode without a database URL is a configuration error. A
/// relational backend that fails to connect or migrate is replaced by the
/// in-memory backend; this is the only place a fallback happens.
pub async fn open_store(config: &StorageConfig) -> Result<SharedStore, StoreError> {
    if config.use_memory_storage {
        info!("Using in-memory storage");
        return Ok(Arc::new(memory_store(config)));
    }

    let url = config
        .database_url
        .as_deref()
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .ok_or_else(|| {
            StoreError::Misconfigured(
                "DATABASE_URL is not defined and USE_MEMORY_STORAGE is not set to true"
                    .to_string(),
            )
        })?;

    info!("Using database storage");

    match DbStore::with_pool_options(url, config.max_db_connections, config.min_db_connections)
        .await
    {
        Ok(store) => Ok(Arc::new(store)),
        Err(e) => {
            warn!(
                error = %format!("{e:#}"),
                "Failed to initialize database storage, falling back to in-memory storage"
            );
            Ok(Arc::new(memory_store(config)))
        }
    }
}

fn memory_store(config: &StorageConfig) -> MemoryStore {
    if config.seed_sample_content {
        MemoryStore::with_sample_content()
    } else {
        MemoryStore::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_memory_flag_selects_memory_backend() {
        let config = StorageConfig {
            use_memory_storage: true,
            database_url: None,
            ..StorageConfig::default()
        };

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend(), Backend::Memory);
    }

    #[tokio::test]
    async fn test_missing_database_url_is_an_error() {
        let config = StorageConfig {
            use_memory_storage: false,
            database_url: Some("   ".to_string()),
            ..StorageConfig::default()
        };

        let result = open_store(&config).await;
        assert!(matches!(result, Err(StoreError::Misconfigured(_))));
    }

    #[tokio::test]
    async fn test_unreachable_database_falls_back_to_memory() {
        let config = StorageConfig {
            use_memory_storage: false,
            database_url: Some("nosuchdriver://localhost/bounceback".to_string()),
            seed_sample_content: false,
            ..StorageConfig::default()
        };

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend(), Backend::Memory);

        // The fallback store is seeded like any other in-memory store.
        let admin = store.get_user_by_username("admin").await.unwrap();
        assert!(admin.is_some());
    }

    #[tokio::test]
    async fn test_sqlite_url_selects_relational_backend() {
        let config = StorageConfig {
            use_memory_storage: false,
            database_url: Some("sqlite::memory:".to_string()),
            ..StorageConfig::default()
        };

        let store = open_store(&config).await.unwrap();
        assert_eq!(store.backend(), Backend::Relational);
    }
}
