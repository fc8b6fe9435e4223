//! Demo content for a fresh in-memory store.

use crate::models::{NewEnrollment, NewNote, NewQuestionPaper, NewVideo, Phase};

pub(super) fn sample_enrollments() -> Vec<NewEnrollment> {
    vec![
        NewEnrollment {
            name: "John Doe".to_string(),
            class: "10".to_string(),
            phone: "9876543210".to_string(),
            whatsapp: "9876543210".to_string(),
            address: "123 Main St, City".to_string(),
        },
        NewEnrollment {
            name: "Jane Smith".to_string(),
            class: "12".to_string(),
            phone: "8765432109".to_string(),
            whatsapp: "8765432109".to_string(),
            address: "456 Park Ave, Town".to_string(),
        },
    ]
}

pub(super) fn sample_question_papers() -> Vec<NewQuestionPaper> {
    vec![
        NewQuestionPaper {
            title: "Mathematics Phase 1".to_string(),
            class: 10,
            subject: "Mathematics".to_string(),
            year: 2024,
            phase: Phase::Phase1,
            file_url: "/papers/math-10-2024-p1.pdf".to_string(),
        },
        NewQuestionPaper {
            title: "Science Phase 2".to_string(),
            class: 10,
            subject: "Science".to_string(),
            year: 2024,
            phase: Phase::Phase2,
            file_url: "/papers/science-10-2024-p2.pdf".to_string(),
        },
        NewQuestionPaper {
            title: "English Board Exam".to_string(),
            class: 12,
            subject: "English".to_string(),
            year: 2023,
            phase: Phase::BoardExam,
            file_url: "/papers/english-12-2023-board.pdf".to_string(),
        },
    ]
}

#[allow(clippy::too_many_arguments)]
fn youtube_video(
    title: &str,
    description: &str,
    class: i32,
    subject: &str,
    video_id: &str,
    duration: &str,
    views: i32,
    upload_date: &str,
    category: &str,
) -> NewVideo {
    NewVideo {
        title: title.to_string(),
        description: Some(description.to_string()),
        class,
        subject: subject.to_string(),
        youtube_url: format!("https://www.youtube.com/watch?v={video_id}"),
        thumbnail_url: Some(format!(
            "https://img.youtube.com/vi/{video_id}/maxresdefault.jpg"
        )),
        duration: Some(duration.to_string()),
        views: Some(views),
        upload_date: Some(upload_date.to_string()),
        category: Some(category.to_string()),
    }
}

pub(super) fn sample_videos() -> Vec<NewVideo> {
    vec![
        youtube_video(
            "Algebra Basics",
            "Introduction to algebraic expressions and equations",
            9,
            "Mathematics",
            "NcQUiqpGfXQ",
            "15",
            1,
            "20/7/2025",
            "Mathematics",
        ),
        youtube_video(
            "Photosynthesis Explained",
            "Understanding the process of photosynthesis in plants",
            10,
            "Science",
            "sQK3Yr4Sc_k",
            "12",
            5,
            "21/7/2025",
            "Chemistry & Energy",
        ),
        youtube_video(
            "Trigonometry Refresher",
            "Ratios, identities and heights-and-distances problems",
            11,
            "Mathematics",
            "1PxSMMproEo",
            "10",
            1,
            "23/7/2025",
            "Mathematics",
        ),
    ]
}

pub(super) fn sample_notes() -> Vec<NewNote> {
    vec![
        NewNote {
            title: "Physics Chapter 1: Mechanics".to_string(),
            description: Some(
                "Comprehensive notes on classical mechanics, including Newton's laws and work-energy theorem."
                    .to_string(),
            ),
            class: 11,
            subject: "Physics".to_string(),
            file_url: "/notes/physics-11-mechanics.pdf".to_string(),
        },
        NewNote {
            title: "Chemistry Chapter 3: Chemical Bonding".to_string(),
            description: Some(
                "Detailed notes on ionic, covalent, and metallic bonding, with examples and diagrams."
                    .to_string(),
            ),
            class: 12,
            subject: "Chemistry".to_string(),
            file_url: "/notes/chemistry-12-bonding.pdf".to_string(),
        },
        NewNote {
            title: "Biology Chapter 5: Cell Biology".to_string(),
            description: Some(
                "An in-depth look at cell structure, function, and cellular processes.".to_string(),
            ),
            class: 10,
            subject: "Biology".to_string(),
            file_url: "/notes/biology-10-cell-biology.pdf".to_string(),
        },
    ]
}
