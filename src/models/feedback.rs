use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Feedback {
    pub id: String,
    pub name: String,
    pub email: Option<String>,
    pub message: String,
    pub rating: Option<i32>,
    pub created_at: DateTime<Utc>,
}

impl Feedback {
    #[must_use]
    pub fn from_new(new: NewFeedback) -> Self {
        Self {
            id: super::new_id(),
            name: new.name,
            email: new.email,
            message: new.message,
            rating: new.rating,
            created_at: super::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewFeedback {
    pub name: String,
    #[serde(default)]
    pub email: Option<String>,
    pub message: String,
    #[serde(default)]
    pub rating: Option<i32>,
}

/// Mean of the ratings present in `items`, or `None` when nobody rated.
#[must_use]
pub fn average_rating(items: &[Feedback]) -> Option<f64> {
    let ratings: Vec<i32> = items.iter().filter_map(|f| f.rating).collect();
    if ratings.is_empty() {
        return None;
    }
    let sum: i64 = ratings.iter().map(|&r| i64::from(r)).sum();
    #[allow(clippy::cast_precision_loss)]
    Some(sum as f64 / ratings.len() as f64)
}
