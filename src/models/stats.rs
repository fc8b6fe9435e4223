use serde::Serialize;

/// Item counts for each collection.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ContentStats {
    pub total_papers: u64,
    pub total_videos: u64,
    pub total_users: u64,
    pub total_feedback: u64,
    pub total_notes: u64,
    pub total_enrollments: u64,
}
