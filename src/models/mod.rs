pub mod enrollment;
pub mod feedback;
pub mod note;
pub mod question_paper;
pub mod stats;
pub mod user;
pub mod video;

pub use enrollment::{Enrollment, EnrollmentPatch, NewEnrollment};
pub use feedback::{Feedback, NewFeedback};
pub use note::{NewNote, Note, NoteFilter, NotePatch};
pub use question_paper::{NewQuestionPaper, PaperFilter, Phase, QuestionPaper, QuestionPaperPatch};
pub use stats::ContentStats;
pub use user::{NewUser, Role, User};
pub use video::{NewVideo, Video, VideoFilter, VideoPatch};

use chrono::{DateTime, SecondsFormat, SubsecRound, Utc};
use serde::{Deserialize, Deserializer};
use thiserror::Error;

#[derive(Debug, Error)]
#[error("Unknown {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Fresh record identifier.
pub(crate) fn new_id() -> String {
    uuid::Uuid::new_v4().to_string()
}

/// Creation timestamp, truncated to microseconds so it survives a round trip
/// through any supported database.
pub(crate) fn now() -> DateTime<Utc> {
    Utc::now().trunc_subsecs(6)
}

/// Fixed-width RFC 3339 form used for persisted timestamps; lexical order
/// matches chronological order.
pub(crate) fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

pub(crate) fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|ts| ts.with_timezone(&Utc))
}

/// Distinguishes a missing field (`None`) from an explicit `null`
/// (`Some(None)`) in partial updates.
pub(crate) fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
