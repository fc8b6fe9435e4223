pub mod enrollment;
pub mod feedback;
pub mod note;
pub mod question_paper;
pub mod user;
pub mod video;

use chrono::{DateTime, Utc};

use crate::models::parse_timestamp;
use crate::storage::StoreError;

/// Decodes a persisted `created_at` column.
pub(crate) fn created_at(
    entity: &'static str,
    id: &str,
    raw: &str,
) -> Result<DateTime<Utc>, StoreError> {
    parse_timestamp(raw)
        .ok_or_else(|| StoreError::corrupt(entity, id, format!("bad timestamp {raw:?}")))
}
