use serde::Deserialize;

use super::ApiError;
use crate::constants::{CLASS_LEVELS, feedback};
use crate::models::{NoteFilter, PaperFilter, Phase, VideoFilter};

/// Raw listing query; every parameter arrives as text and empty means unset.
#[derive(Debug, Default, Deserialize)]
pub struct ContentQuery {
    pub class: Option<String>,
    pub subject: Option<String>,
    pub year: Option<String>,
    pub phase: Option<String>,
}

impl ContentQuery {
    pub fn paper_filter(self) -> Result<PaperFilter, ApiError> {
        Ok(PaperFilter {
            class: parse_optional_int("class", self.class.as_deref())?,
            subject: non_empty(self.subject),
            year: parse_optional_int("year", self.year.as_deref())?,
            phase: non_empty(self.phase).map(|p| parse_phase(&p)).transpose()?,
        })
    }

    pub fn video_filter(self) -> Result<VideoFilter, ApiError> {
        Ok(VideoFilter {
            class: parse_optional_int("class", self.class.as_deref())?,
            subject: non_empty(self.subject),
        })
    }

    pub fn note_filter(self) -> Result<NoteFilter, ApiError> {
        Ok(NoteFilter {
            class: parse_optional_int("class", self.class.as_deref())?,
            subject: non_empty(self.subject),
        })
    }
}

/// Trimmed value, or `None` when blank.
pub fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn parse_int(name: &str, raw: &str) -> Result<i32, ApiError> {
    raw.trim()
        .parse()
        .map_err(|_| ApiError::validation(format!("Invalid {name}: {raw}. Must be a number")))
}

pub fn parse_optional_int(name: &str, raw: Option<&str>) -> Result<Option<i32>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => parse_int(name, value).map(Some),
    }
}

pub fn parse_phase(raw: &str) -> Result<Phase, ApiError> {
    raw.trim().parse().map_err(|_| {
        ApiError::validation(format!(
            "Invalid phase: {raw}. Must be one of Phase 1, Phase 2, Board Exam"
        ))
    })
}

pub fn validate_class(class: i32) -> Result<i32, ApiError> {
    if !CLASS_LEVELS.contains(&class) {
        return Err(ApiError::validation(format!(
            "Invalid class: {class}. Class must be between {} and {}",
            CLASS_LEVELS[0],
            CLASS_LEVELS[CLASS_LEVELS.len() - 1]
        )));
    }
    Ok(class)
}

pub fn validate_rating(rating: Option<i32>) -> Result<Option<i32>, ApiError> {
    if let Some(r) = rating
        && !(feedback::MIN_RATING..=feedback::MAX_RATING).contains(&r)
    {
        return Err(ApiError::validation(format!(
            "Invalid rating: {r}. Rating must be between {} and {}",
            feedback::MIN_RATING,
            feedback::MAX_RATING
        )));
    }
    Ok(rating)
}

pub fn require_text(name: &str, value: &str) -> Result<String, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{name} is required")));
    }
    Ok(trimmed.to_string())
}
