use anyhow::{Context, Result};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, Statement};
use std::path::Path;
use std::time::Duration;
use tracing::{info, warn};

use crate::models::{
    ContentStats, Enrollment, EnrollmentPatch, Feedback, NewEnrollment, NewFeedback, NewNote,
    NewQuestionPaper, NewUser, NewVideo, Note, NoteFilter, NotePatch, PaperFilter, QuestionPaper,
    QuestionPaperPatch, User, Video, VideoFilter, VideoPatch,
};
use crate::storage::{Backend, ContentStore, StoreError};

pub mod migrator;
pub mod repositories;

/// Relational backend: one SeaORM connection pool shared by the per-table
/// repositories.
#[derive(Clone)]
pub struct DbStore {
    pub conn: DatabaseConnection,
}

fn is_in_memory_sqlite(db_url: &str) -> bool {
    db_url.contains(":memory:") || db_url.contains("mode=memory")
}

/// File path behind a `sqlite:` URL, without the query string.
fn sqlite_file_path(db_url: &str) -> Option<&str> {
    let rest = db_url
        .strip_prefix("sqlite://")
        .or_else(|| db_url.strip_prefix("sqlite:"))?;
    let path = rest.split('?').next().unwrap_or(rest);
    (!path.is_empty()).then_some(path)
}

impl DbStore {
    pub async fn new(db_url: &str) -> Result<Self> {
        Self::with_pool_options(db_url, 5, 1).await
    }

    /// Connects, creating the SQLite file if needed, and applies pending
    /// migrations (which also seed the admin account).
    pub async fn with_pool_options(
        db_url: &str,
        max_connections: u32,
        min_connections: u32,
    ) -> Result<Self> {
        use sea_orm_migration::MigratorTrait;

        let in_memory = is_in_memory_sqlite(db_url);

        if !in_memory && let Some(path_str) = sqlite_file_path(db_url) {
            let path = Path::new(path_str);
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            if !path.exists() {
                tokio::fs::File::create(path)
                    .await
                    .with_context(|| format!("Failed to create {}", path.display()))?;
            }
        }

        let mut opt = ConnectOptions::new(db_url.to_string());
        opt.connect_timeout(Duration::from_secs(10))
            .acquire_timeout(Duration::from_secs(10))
            .sqlx_logging(false);

        // Every pooled connection to `:memory:` would open its own database.
        if in_memory {
            opt.max_connections(1).min_connections(1);
        } else {
            opt.max_connections(max_connections)
                .min_connections(min_connections)
                .idle_timeout(Duration::from_secs(300))
                .max_lifetime(Duration::from_secs(600));
        }

        let conn = Database::connect(opt)
            .await
            .context("Failed to connect to database")?;

        migrator::Migrator::up(&conn, None)
            .await
            .context("Failed to apply database migrations")?;

        info!(
            "Database connected & migrations applied (pool: {}-{})",
            min_connections, max_connections
        );

        Ok(Self { conn })
    }

    pub async fn ping(&self) -> Result<()> {
        let backend = self.conn.get_database_backend();
        self.conn
            .query_one(Statement::from_string(backend, "SELECT 1".to_string()))
            .await?;
        Ok(())
    }

    fn user_repo(&self) -> repositories::user::UserRepository {
        repositories::user::UserRepository::new(self.conn.clone())
    }

    fn question_paper_repo(&self) -> repositories::question_paper::QuestionPaperRepository {
        repositories::question_paper::QuestionPaperRepository::new(self.conn.clone())
    }

    fn video_repo(&self) -> repositories::video::VideoRepository {
        repositories::video::VideoRepository::new(self.conn.clone())
    }

    fn note_repo(&self) -> repositories::note::NoteRepository {
        repositories::note::NoteRepository::new(self.conn.clone())
    }

    fn feedback_repo(&self) -> repositories::feedback::FeedbackRepository {
        repositories::feedback::FeedbackRepository::new(self.conn.clone())
    }

    fn enrollment_repo(&self) -> repositories::enrollment::EnrollmentRepository {
        repositories::enrollment::EnrollmentRepository::new(self.conn.clone())
    }

    async fn try_stats(&self) -> Result<ContentStats, StoreError> {
        let users = self.user_repo();
        let papers = self.question_paper_repo();
        let videos = self.video_repo();
        let notes = self.note_repo();
        let feedback = self.feedback_repo();
        let enrollments = self.enrollment_repo();

        let (total_users, total_papers, total_videos, total_notes, total_feedback, total_enrollments) =
            tokio::try_join!(
                users.count(),
                papers.count(),
                videos.count(),
                notes.count(),
                feedback.count(),
                enrollments.count(),
            )?;

        Ok(ContentStats {
            total_papers,
            total_videos,
            total_users,
            total_feedback,
            total_notes,
            total_enrollments,
        })
    }
}

#[async_trait::async_trait]
impl ContentStore for DbStore {
    fn backend(&self) -> Backend {
        Backend::Relational
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        self.user_repo().list().await
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        self.user_repo().get(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        self.user_repo().get_by_username(username).await
    }

    async fn get_user_by_mobile(&self, mobile: &str) -> Result<Option<User>, StoreError> {
        self.user_repo().get_by_mobile(mobile).await
    }

    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        self.user_repo().create(new).await
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        self.user_repo().remove(id).await
    }

    async fn list_question_papers(
        &self,
        filter: &PaperFilter,
    ) -> Result<Vec<QuestionPaper>, StoreError> {
        self.question_paper_repo().list(filter).await
    }

    async fn get_question_paper(&self, id: &str) -> Result<Option<QuestionPaper>, StoreError> {
        self.question_paper_repo().get(id).await
    }

    async fn create_question_paper(
        &self,
        new: NewQuestionPaper,
    ) -> Result<QuestionPaper, StoreError> {
        self.question_paper_repo().create(new).await
    }

    async fn update_question_paper(
        &self,
        id: &str,
        patch: QuestionPaperPatch,
    ) -> Result<Option<QuestionPaper>, StoreError> {
        self.question_paper_repo().update(id, patch).await
    }

    async fn delete_question_paper(&self, id: &str) -> Result<bool, StoreError> {
        self.question_paper_repo().remove(id).await
    }

    async fn list_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>, StoreError> {
        self.video_repo().list(filter).await
    }

    async fn get_video(&self, id: &str) -> Result<Option<Video>, StoreError> {
        self.video_repo().get(id).await
    }

    async fn create_video(&self, new: NewVideo) -> Result<Video, StoreError> {
        self.video_repo().create(new).await
    }

    async fn update_video(
        &self,
        id: &str,
        patch: VideoPatch,
    ) -> Result<Option<Video>, StoreError> {
        self.video_repo().update(id, patch).await
    }

    async fn delete_video(&self, id: &str) -> Result<bool, StoreError> {
        self.video_repo().remove(id).await
    }

    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<Note>, StoreError> {
        self.note_repo().list(filter).await
    }

    async fn get_note(&self, id: &str) -> Result<Option<Note>, StoreError> {
        self.note_repo().get(id).await
    }

    async fn create_note(&self, new: NewNote) -> Result<Note, StoreError> {
        self.note_repo().create(new).await
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StoreError> {
        self.note_repo().update(id, patch).await
    }

    async fn delete_note(&self, id: &str) -> Result<bool, StoreError> {
        self.note_repo().remove(id).await
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        self.feedback_repo().list().await
    }

    async fn get_feedback(&self, id: &str) -> Result<Option<Feedback>, StoreError> {
        self.feedback_repo().get(id).await
    }

    async fn create_feedback(&self, new: NewFeedback) -> Result<Feedback, StoreError> {
        self.feedback_repo().create(new).await
    }

    async fn delete_feedback(&self, id: &str) -> Result<bool, StoreError> {
        self.feedback_repo().remove(id).await
    }

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, StoreError> {
        self.enrollment_repo().list().await
    }

    async fn get_enrollment(&self, id: &str) -> Result<Option<Enrollment>, StoreError> {
        self.enrollment_repo().get(id).await
    }

    async fn create_enrollment(&self, new: NewEnrollment) -> Result<Enrollment, StoreError> {
        self.enrollment_repo().create(new).await
    }

    async fn update_enrollment(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, StoreError> {
        self.enrollment_repo().update(id, patch).await
    }

    async fn delete_enrollment(&self, id: &str) -> Result<bool, StoreError> {
        self.enrollment_repo().remove(id).await
    }

    async fn stats(&self) -> ContentStats {
        match self.try_stats().await {
            Ok(stats) => stats,
            Err(e) => {
                warn!(error = %e, "Failed to count content, reporting zeros");
                ContentStats::default()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqlite_file_path() {
        assert_eq!(sqlite_file_path("sqlite:data/app.db"), Some("data/app.db"));
        assert_eq!(
            sqlite_file_path("sqlite://data/app.db?mode=rwc"),
            Some("data/app.db")
        );
        assert_eq!(sqlite_file_path("postgres://localhost/app"), None);
    }

    #[test]
    fn test_in_memory_detection() {
        assert!(is_in_memory_sqlite("sqlite::memory:"));
        assert!(is_in_memory_sqlite("sqlite://file?mode=memory&cache=shared"));
        assert!(!is_in_memory_sqlite("sqlite:data/app.db"));
    }

    #[tokio::test]
    async fn test_migrations_seed_admin() {
        let store = DbStore::new("sqlite::memory:").await.unwrap();
        store.ping().await.unwrap();

        let admin = store.get_user_by_username("admin").await.unwrap().unwrap();
        assert!(admin.is_admin());
        assert_eq!(store.stats().await.total_users, 1);
    }

    #[tokio::test]
    async fn test_stats_degrade_to_zero_after_disconnect() {
        let store = DbStore::new("sqlite::memory:").await.unwrap();
        store.conn.clone().close().await.unwrap();

        assert_eq!(store.stats().await, ContentStats::default());
    }

    #[tokio::test]
    async fn test_errors_surface_after_disconnect() {
        let store = DbStore::new("sqlite::memory:").await.unwrap();
        store.conn.clone().close().await.unwrap();

        let papers = store.list_question_papers(&PaperFilter::default()).await;
        assert!(matches!(papers, Err(StoreError::Database(_))));

        let user = store.get_user("missing").await;
        assert!(matches!(user, Err(StoreError::Database(_))));

        let feedback = store
            .create_feedback(NewFeedback {
                name: "Asha".to_string(),
                email: None,
                message: "Great classes".to_string(),
                rating: Some(5),
            })
            .await;
        assert!(matches!(feedback, Err(StoreError::Database(_))));
    }
}
