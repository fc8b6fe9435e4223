//! In-process backend: six ordered maps behind a single lock.

use std::collections::BTreeMap;
use tokio::sync::RwLock;
use tracing::info;

use super::{Backend, ContentStore, StoreError, seed};
use crate::constants::admin;
use crate::models::{
    ContentStats, Enrollment, EnrollmentPatch, Feedback, NewEnrollment, NewFeedback, NewNote,
    NewQuestionPaper, NewUser, NewVideo, Note, NoteFilter, NotePatch, PaperFilter, QuestionPaper,
    QuestionPaperPatch, Role, User, Video, VideoFilter, VideoPatch,
};

#[derive(Default)]
struct Collections {
    users: BTreeMap<String, User>,
    question_papers: BTreeMap<String, QuestionPaper>,
    videos: BTreeMap<String, Video>,
    notes: BTreeMap<String, Note>,
    feedback: BTreeMap<String, Feedback>,
    enrollments: BTreeMap<String, Enrollment>,
}

pub struct MemoryStore {
    inner: RwLock<Collections>,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Empty store holding only the seeded admin account.
    #[must_use]
    pub fn new() -> Self {
        let mut collections = Collections::default();

        let admin = User::from_new(NewUser {
            username: admin::USERNAME.to_string(),
            password: admin::PASSWORD.to_string(),
            mobile: admin::MOBILE.to_string(),
            role: Some(Role::Admin),
        });
        collections.users.insert(admin.id.clone(), admin);

        Self {
            inner: RwLock::new(collections),
        }
    }

    /// Admin account plus the demo papers, videos, notes and enrollments
    /// shown on a fresh install.
    #[must_use]
    pub fn with_sample_content() -> Self {
        let mut collections = Self::new().inner.into_inner();

        for new in seed::sample_enrollments() {
            let enrollment = Enrollment::from_new(new);
            collections
                .enrollments
                .insert(enrollment.id.clone(), enrollment);
        }
        for new in seed::sample_question_papers() {
            let paper = QuestionPaper::from_new(new);
            collections.question_papers.insert(paper.id.clone(), paper);
        }
        for new in seed::sample_videos() {
            let video = Video::from_new(new);
            collections.videos.insert(video.id.clone(), video);
        }
        for new in seed::sample_notes() {
            let note = Note::from_new(new);
            collections.notes.insert(note.id.clone(), note);
        }

        info!(
            papers = collections.question_papers.len(),
            videos = collections.videos.len(),
            notes = collections.notes.len(),
            enrollments = collections.enrollments.len(),
            "Seeded in-memory store with sample content"
        );

        Self {
            inner: RwLock::new(collections),
        }
    }
}

/// Stable sort, most recent `created_at` first.
fn newest_first<T>(mut items: Vec<T>, created_at: impl Fn(&T) -> chrono::DateTime<chrono::Utc>) -> Vec<T> {
    items.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    items
}

#[async_trait::async_trait]
impl ContentStore for MemoryStore {
    fn backend(&self) -> Backend {
        Backend::Memory
    }

    async fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let inner = self.inner.read().await;
        let mut users: Vec<User> = inner.users.values().cloned().collect();
        users.sort_by(|a, b| a.username.cmp(&b.username));
        Ok(users)
    }

    async fn get_user(&self, id: &str) -> Result<Option<User>, StoreError> {
        Ok(self.inner.read().await.users.get(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .users
            .values()
            .find(|u| u.username == username)
            .cloned())
    }

    async fn get_user_by_mobile(&self, mobile: &str) -> Result<Option<User>, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner.users.values().find(|u| u.mobile == mobile).cloned())
    }

    async fn create_user(&self, new: NewUser) -> Result<User, StoreError> {
        let user = User::from_new(new);
        self.inner
            .write()
            .await
            .users
            .insert(user.id.clone(), user.clone());
        Ok(user)
    }

    async fn delete_user(&self, id: &str) -> Result<bool, StoreError> {
        let mut inner = self.inner.write().await;
        match inner.users.get(id) {
            Some(user) if user.is_admin() => Ok(false),
            Some(_) => Ok(inner.users.remove(id).is_some()),
            None => Ok(false),
        }
    }

    async fn list_question_papers(
        &self,
        filter: &PaperFilter,
    ) -> Result<Vec<QuestionPaper>, StoreError> {
        let inner = self.inner.read().await;
        let papers: Vec<QuestionPaper> = inner
            .question_papers
            .values()
            .filter(|p| filter.matches(p))
            .cloned()
            .collect();

        let mut papers = newest_first(papers, |p| p.created_at);
        papers.sort_by(|a, b| b.year.cmp(&a.year));
        Ok(papers)
    }

    async fn get_question_paper(&self, id: &str) -> Result<Option<QuestionPaper>, StoreError> {
        Ok(self.inner.read().await.question_papers.get(id).cloned())
    }

    async fn create_question_paper(
        &self,
        new: NewQuestionPaper,
    ) -> Result<QuestionPaper, StoreError> {
        let paper = QuestionPaper::from_new(new);
        self.inner
            .write()
            .await
            .question_papers
            .insert(paper.id.clone(), paper.clone());
        Ok(paper)
    }

    async fn update_question_paper(
        &self,
        id: &str,
        patch: QuestionPaperPatch,
    ) -> Result<Option<QuestionPaper>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.question_papers.get_mut(id).map(|paper| {
            patch.apply(paper);
            paper.clone()
        }))
    }

    async fn delete_question_paper(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self
            .inner
            .write()
            .await
            .question_papers
            .remove(id)
            .is_some())
    }

    async fn list_videos(&self, filter: &VideoFilter) -> Result<Vec<Video>, StoreError> {
        let inner = self.inner.read().await;
        let videos = inner
            .videos
            .values()
            .filter(|v| filter.matches(v))
            .cloned()
            .collect();
        Ok(newest_first(videos, |v| v.created_at))
    }

    async fn get_video(&self, id: &str) -> Result<Option<Video>, StoreError> {
        Ok(self.inner.read().await.videos.get(id).cloned())
    }

    async fn create_video(&self, new: NewVideo) -> Result<Video, StoreError> {
        let video = Video::from_new(new);
        self.inner
            .write()
            .await
            .videos
            .insert(video.id.clone(), video.clone());
        Ok(video)
    }

    async fn update_video(
        &self,
        id: &str,
        patch: VideoPatch,
    ) -> Result<Option<Video>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.videos.get_mut(id).map(|video| {
            patch.apply(video);
            video.clone()
        }))
    }

    async fn delete_video(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.videos.remove(id).is_some())
    }

    async fn list_notes(&self, filter: &NoteFilter) -> Result<Vec<Note>, StoreError> {
        let inner = self.inner.read().await;
        let notes = inner
            .notes
            .values()
            .filter(|n| filter.matches(n))
            .cloned()
            .collect();
        Ok(newest_first(notes, |n| n.created_at))
    }

    async fn get_note(&self, id: &str) -> Result<Option<Note>, StoreError> {
        Ok(self.inner.read().await.notes.get(id).cloned())
    }

    async fn create_note(&self, new: NewNote) -> Result<Note, StoreError> {
        let note = Note::from_new(new);
        self.inner
            .write()
            .await
            .notes
            .insert(note.id.clone(), note.clone());
        Ok(note)
    }

    async fn update_note(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.notes.get_mut(id).map(|note| {
            patch.apply(note);
            note.clone()
        }))
    }

    async fn delete_note(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.notes.remove(id).is_some())
    }

    async fn list_feedback(&self) -> Result<Vec<Feedback>, StoreError> {
        let inner = self.inner.read().await;
        let feedback = inner.feedback.values().cloned().collect();
        Ok(newest_first(feedback, |f| f.created_at))
    }

    async fn get_feedback(&self, id: &str) -> Result<Option<Feedback>, StoreError> {
        Ok(self.inner.read().await.feedback.get(id).cloned())
    }

    async fn create_feedback(&self, new: NewFeedback) -> Result<Feedback, StoreError> {
        let feedback = Feedback::from_new(new);
        self.inner
            .write()
            .await
            .feedback
            .insert(feedback.id.clone(), feedback.clone());
        Ok(feedback)
    }

    async fn delete_feedback(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.feedback.remove(id).is_some())
    }

    async fn list_enrollments(&self) -> Result<Vec<Enrollment>, StoreError> {
        let inner = self.inner.read().await;
        let enrollments = inner.enrollments.values().cloned().collect();
        Ok(newest_first(enrollments, |e| e.created_at))
    }

    async fn get_enrollment(&self, id: &str) -> Result<Option<Enrollment>, StoreError> {
        Ok(self.inner.read().await.enrollments.get(id).cloned())
    }

    async fn create_enrollment(&self, new: NewEnrollment) -> Result<Enrollment, StoreError> {
        let enrollment = Enrollment::from_new(new);
        self.inner
            .write()
            .await
            .enrollments
            .insert(enrollment.id.clone(), enrollment.clone());
        Ok(enrollment)
    }

    async fn update_enrollment(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, StoreError> {
        let mut inner = self.inner.write().await;
        Ok(inner.enrollments.get_mut(id).map(|enrollment| {
            patch.apply(enrollment);
            enrollment.clone()
        }))
    }

    async fn delete_enrollment(&self, id: &str) -> Result<bool, StoreError> {
        Ok(self.inner.write().await.enrollments.remove(id).is_some())
    }

    async fn stats(&self) -> ContentStats {
        let inner = self.inner.read().await;
        ContentStats {
            total_papers: inner.question_papers.len() as u64,
            total_videos: inner.videos.len() as u64,
            total_users: inner.users.len() as u64,
            total_feedback: inner.feedback.len() as u64,
            total_notes: inner.notes.len() as u64,
            total_enrollments: inner.enrollments.len() as u64,
        }
    }
}
