use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ParseEnumError;

/// Examination sitting a paper belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[serde(rename = "Phase 1")]
    Phase1,
    #[serde(rename = "Phase 2")]
    Phase2,
    #[serde(rename = "Board Exam")]
    BoardExam,
}

impl Phase {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Phase1 => "Phase 1",
            Self::Phase2 => "Phase 2",
            Self::BoardExam => "Board Exam",
        }
    }
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Phase {
    type Err = ParseEnumError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Phase 1" => Ok(Self::Phase1),
            "Phase 2" => Ok(Self::Phase2),
            "Board Exam" => Ok(Self::BoardExam),
            other => Err(ParseEnumError {
                kind: "phase",
                value: other.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaper {
    pub id: String,
    pub title: String,
    pub class: i32,
    pub subject: String,
    pub year: i32,
    pub phase: Phase,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

impl QuestionPaper {
    #[must_use]
    pub fn from_new(new: NewQuestionPaper) -> Self {
        Self {
            id: super::new_id(),
            title: new.title,
            class: new.class,
            subject: new.subject,
            year: new.year,
            phase: new.phase,
            file_url: new.file_url,
            created_at: super::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewQuestionPaper {
    pub title: String,
    pub class: i32,
    pub subject: String,
    pub year: i32,
    pub phase: Phase,
    pub file_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionPaperPatch {
    pub title: Option<String>,
    pub class: Option<i32>,
    pub subject: Option<String>,
    pub year: Option<i32>,
    pub phase: Option<Phase>,
    pub file_url: Option<String>,
}

impl QuestionPaperPatch {
    pub fn apply(self, paper: &mut QuestionPaper) {
        if let Some(title) = self.title {
            paper.title = title;
        }
        if let Some(class) = self.class {
            paper.class = class;
        }
        if let Some(subject) = self.subject {
            paper.subject = subject;
        }
        if let Some(year) = self.year {
            paper.year = year;
        }
        if let Some(phase) = self.phase {
            paper.phase = phase;
        }
        if let Some(file_url) = self.file_url {
            paper.file_url = file_url;
        }
    }
}

/// Equality constraints for listing papers; unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PaperFilter {
    pub class: Option<i32>,
    pub subject: Option<String>,
    pub year: Option<i32>,
    pub phase: Option<Phase>,
}

impl PaperFilter {
    #[must_use]
    pub fn matches(&self, paper: &QuestionPaper) -> bool {
        self.class.is_none_or(|c| paper.class == c)
            && self.subject.as_deref().is_none_or(|s| paper.subject == s)
            && self.year.is_none_or(|y| paper.year == y)
            && self.phase.is_none_or(|p| paper.phase == p)
    }
}
