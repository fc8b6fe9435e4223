//! Store behaviour exercised identically against both backends.

use bounceback::db::DbStore;
use bounceback::models::feedback::average_rating;
use bounceback::models::{
    EnrollmentPatch, NewEnrollment, NewFeedback, NewNote, NewQuestionPaper, NewUser, NewVideo,
    NoteFilter, NotePatch, PaperFilter, Phase, QuestionPaperPatch, Role, VideoFilter, VideoPatch,
};
use bounceback::storage::{MemoryStore, SharedStore};
use std::sync::Arc;
use std::time::Duration;

async fn backends() -> Vec<(&'static str, SharedStore)> {
    let db = DbStore::new("sqlite::memory:")
        .await
        .expect("failed to open sqlite store");

    vec![
        ("memory", Arc::new(MemoryStore::new()) as SharedStore),
        ("sqlite", Arc::new(db) as SharedStore),
    ]
}

fn paper(class: i32, subject: &str, year: i32, phase: Phase) -> NewQuestionPaper {
    NewQuestionPaper {
        title: format!("{subject} {} {year}", phase.as_str()),
        class,
        subject: subject.to_string(),
        year,
        phase,
        file_url: format!("/uploads/papers/{subject}-{year}.pdf"),
    }
}

fn video(class: i32, subject: &str) -> NewVideo {
    NewVideo {
        title: format!("{subject} for class {class}"),
        description: None,
        class,
        subject: subject.to_string(),
        youtube_url: "https://www.youtube.com/watch?v=NcQUiqpGfXQ".to_string(),
        thumbnail_url: None,
        duration: Some("15".to_string()),
        views: None,
        upload_date: None,
        category: None,
    }
}

fn note(class: i32, subject: &str) -> NewNote {
    NewNote {
        title: format!("{subject} notes"),
        description: Some("Chapter summary".to_string()),
        class,
        subject: subject.to_string(),
        file_url: format!("/uploads/notes/{subject}.pdf"),
    }
}

fn feedback(rating: Option<i32>) -> NewFeedback {
    NewFeedback {
        name: "Asha".to_string(),
        email: None,
        message: "The mock papers helped a lot".to_string(),
        rating,
    }
}

fn enrollment(name: &str) -> NewEnrollment {
    NewEnrollment {
        name: name.to_string(),
        class: "10".to_string(),
        phone: "9876543210".to_string(),
        whatsapp: "9876543210".to_string(),
        address: "12 Lake Road".to_string(),
    }
}

fn student(username: &str, mobile: &str) -> NewUser {
    NewUser {
        username: username.to_string(),
        password: "secret".to_string(),
        mobile: mobile.to_string(),
        role: None,
    }
}

#[tokio::test]
async fn created_records_are_retrievable() {
    for (name, store) in backends().await {
        let user = store.create_user(student("meera", "9000000001")).await.unwrap();
        assert_eq!(user.role, Role::User, "{name}");
        assert_eq!(store.get_user(&user.id).await.unwrap(), Some(user.clone()));

        let p = store
            .create_question_paper(paper(10, "Mathematics", 2024, Phase::Phase1))
            .await
            .unwrap();
        assert_eq!(
            store.get_question_paper(&p.id).await.unwrap(),
            Some(p),
            "{name}"
        );

        let v = store.create_video(video(9, "Science")).await.unwrap();
        assert_eq!(v.description, None, "{name}");
        assert_eq!(store.get_video(&v.id).await.unwrap(), Some(v), "{name}");

        let n = store.create_note(note(11, "Physics")).await.unwrap();
        assert_eq!(store.get_note(&n.id).await.unwrap(), Some(n), "{name}");

        let f = store.create_feedback(feedback(Some(4))).await.unwrap();
        assert_eq!(store.get_feedback(&f.id).await.unwrap(), Some(f), "{name}");

        let e = store.create_enrollment(enrollment("Kiran")).await.unwrap();
        assert_eq!(store.get_enrollment(&e.id).await.unwrap(), Some(e), "{name}");
    }
}

#[tokio::test]
async fn missing_ids_are_not_errors() {
    for (name, store) in backends().await {
        assert!(store.get_question_paper("missing").await.unwrap().is_none(), "{name}");
        assert!(store.get_video("missing").await.unwrap().is_none(), "{name}");
        assert!(!store.delete_note("missing").await.unwrap(), "{name}");
        assert!(!store.delete_feedback("missing").await.unwrap(), "{name}");
        assert!(!store.delete_user("missing").await.unwrap(), "{name}");
        assert!(
            store
                .update_enrollment("missing", EnrollmentPatch::default())
                .await
                .unwrap()
                .is_none(),
            "{name}"
        );
    }
}

#[tokio::test]
async fn update_changes_only_given_fields() {
    for (name, store) in backends().await {
        let original = store
            .create_question_paper(paper(10, "Mathematics", 2024, Phase::Phase1))
            .await
            .unwrap();

        let updated = store
            .update_question_paper(
                &original.id,
                QuestionPaperPatch {
                    phase: Some(Phase::BoardExam),
                    ..QuestionPaperPatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();

        assert_eq!(updated.phase, Phase::BoardExam, "{name}");
        assert_eq!(updated.title, original.title, "{name}");
        assert_eq!(updated.year, original.year, "{name}");
        assert_eq!(updated.created_at, original.created_at, "{name}");

        let fetched = store.get_question_paper(&original.id).await.unwrap();
        assert_eq!(fetched, Some(updated), "{name}");
    }
}

#[tokio::test]
async fn explicit_null_clears_optional_fields() {
    for (name, store) in backends().await {
        let created = store.create_note(note(12, "Chemistry")).await.unwrap();
        let cleared = store
            .update_note(
                &created.id,
                NotePatch {
                    description: Some(None),
                    ..NotePatch::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(cleared.description, None, "{name}");

        let v = store.create_video(video(10, "Science")).await.unwrap();
        let patch: VideoPatch =
            serde_json::from_str(r#"{"duration": null, "views": 42}"#).unwrap();
        let updated = store.update_video(&v.id, patch).await.unwrap().unwrap();
        assert_eq!(updated.duration, None, "{name}");
        assert_eq!(updated.views, Some(42), "{name}");
        assert_eq!(
            store.get_video(&v.id).await.unwrap(),
            Some(updated),
            "{name}"
        );
    }
}

#[tokio::test]
async fn delete_removes_the_record() {
    for (name, store) in backends().await {
        let e = store.create_enrollment(enrollment("Ravi")).await.unwrap();

        assert!(store.delete_enrollment(&e.id).await.unwrap(), "{name}");
        assert!(store.get_enrollment(&e.id).await.unwrap().is_none(), "{name}");
        assert!(!store.delete_enrollment(&e.id).await.unwrap(), "{name}");

        let user = store.create_user(student("tara", "9000000002")).await.unwrap();
        assert!(store.delete_user(&user.id).await.unwrap(), "{name}");
        assert!(store.get_user(&user.id).await.unwrap().is_none(), "{name}");
    }
}

#[tokio::test]
async fn seeded_admin_cannot_be_deleted() {
    for (name, store) in backends().await {
        let admin = store
            .get_user_by_username("admin")
            .await
            .unwrap()
            .expect("admin is seeded");

        assert_eq!(admin.role, Role::Admin, "{name}");
        assert_eq!(admin.password, "admin123", "{name}");
        assert!(!store.delete_user(&admin.id).await.unwrap(), "{name}");
        assert!(store.get_user(&admin.id).await.unwrap().is_some(), "{name}");
    }
}

#[tokio::test]
async fn filters_match_exactly() {
    for (name, store) in backends().await {
        let maths = store
            .create_question_paper(paper(10, "Mathematics", 2024, Phase::Phase1))
            .await
            .unwrap();
        store
            .create_question_paper(paper(12, "English", 2023, Phase::BoardExam))
            .await
            .unwrap();

        let class_ten = store
            .list_question_papers(&PaperFilter {
                class: Some(10),
                ..PaperFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(class_ten, vec![maths.clone()], "{name}");

        let science = store
            .list_question_papers(&PaperFilter {
                class: Some(10),
                subject: Some("Science".to_string()),
                ..PaperFilter::default()
            })
            .await
            .unwrap();
        assert!(science.is_empty(), "{name}");

        let by_phase = store
            .list_question_papers(&PaperFilter {
                year: Some(2024),
                phase: Some(Phase::Phase1),
                ..PaperFilter::default()
            })
            .await
            .unwrap();
        assert_eq!(by_phase, vec![maths], "{name}");

        store.create_video(video(9, "Science")).await.unwrap();
        store.create_video(video(10, "Science")).await.unwrap();
        let videos = store
            .list_videos(&VideoFilter {
                class: Some(9),
                subject: Some("Science".to_string()),
            })
            .await
            .unwrap();
        assert_eq!(videos.len(), 1, "{name}");

        store.create_note(note(11, "Physics")).await.unwrap();
        let notes = store
            .list_notes(&NoteFilter {
                subject: Some("Biology".to_string()),
                ..NoteFilter::default()
            })
            .await
            .unwrap();
        assert!(notes.is_empty(), "{name}");
    }
}

#[tokio::test]
async fn listings_are_ordered() {
    for (name, store) in backends().await {
        for year in [2022, 2024, 2023] {
            store
                .create_question_paper(paper(10, "Mathematics", year, Phase::Phase2))
                .await
                .unwrap();
        }
        let years: Vec<i32> = store
            .list_question_papers(&PaperFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|p| p.year)
            .collect();
        assert_eq!(years, vec![2024, 2023, 2022], "{name}");

        let first = store.create_video(video(8, "English")).await.unwrap();
        tokio::time::sleep(Duration::from_millis(5)).await;
        let second = store.create_video(video(8, "History")).await.unwrap();
        let ids: Vec<String> = store
            .list_videos(&VideoFilter::default())
            .await
            .unwrap()
            .into_iter()
            .map(|v| v.id)
            .collect();
        assert_eq!(ids, vec![second.id, first.id], "{name}");

        store.create_user(student("zara", "9000000010")).await.unwrap();
        store.create_user(student("bilal", "9000000011")).await.unwrap();
        let names: Vec<String> = store
            .list_users()
            .await
            .unwrap()
            .into_iter()
            .map(|u| u.username)
            .collect();
        assert_eq!(names, vec!["admin", "bilal", "zara"], "{name}");
    }
}

#[tokio::test]
async fn users_can_be_found_by_username_and_mobile() {
    for (name, store) in backends().await {
        let user = store.create_user(student("neha", "9123456780")).await.unwrap();

        let by_name = store.get_user_by_username("neha").await.unwrap();
        let by_mobile = store.get_user_by_mobile("9123456780").await.unwrap();

        assert_eq!(by_name.map(|u| u.id), Some(user.id.clone()), "{name}");
        assert_eq!(by_mobile.map(|u| u.id), Some(user.id), "{name}");
        assert!(store.get_user_by_mobile("0000000000").await.unwrap().is_none());
    }
}

#[tokio::test]
async fn stats_track_live_cardinalities() {
    for (name, store) in backends().await {
        let five = store.create_feedback(feedback(Some(5))).await.unwrap();
        store.create_feedback(feedback(Some(3))).await.unwrap();

        let stats = store.stats().await;
        assert_eq!(stats.total_feedback, 2, "{name}");
        assert_eq!(stats.total_users, 1, "{name}");

        let all = store.list_feedback().await.unwrap();
        assert_eq!(average_rating(&all), Some(4.0), "{name}");

        store.create_note(note(10, "Biology")).await.unwrap();
        let e = store.create_enrollment(enrollment("Dev")).await.unwrap();
        store.delete_enrollment(&e.id).await.unwrap();
        store.delete_feedback(&five.id).await.unwrap();

        let stats = store.stats().await;
        assert_eq!(stats.total_feedback, 1, "{name}");
        assert_eq!(stats.total_notes, 1, "{name}");
        assert_eq!(stats.total_enrollments, 0, "{name}");
        assert_eq!(stats.total_papers, 0, "{name}");
        assert_eq!(
            store.list_feedback().await.unwrap().len() as u64,
            stats.total_feedback,
            "{name}"
        );
    }
}
