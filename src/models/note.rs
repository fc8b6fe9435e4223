use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Note {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub class: i32,
    pub subject: String,
    pub file_url: String,
    pub created_at: DateTime<Utc>,
}

impl Note {
    #[must_use]
    pub fn from_new(new: NewNote) -> Self {
        Self {
            id: super::new_id(),
            title: new.title,
            description: new.description,
            class: new.class,
            subject: new.subject,
            file_url: new.file_url,
            created_at: super::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewNote {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub class: i32,
    pub subject: String,
    pub file_url: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotePatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    pub class: Option<i32>,
    pub subject: Option<String>,
    pub file_url: Option<String>,
}

impl NotePatch {
    pub fn apply(self, note: &mut Note) {
        if let Some(title) = self.title {
            note.title = title;
        }
        if let Some(description) = self.description {
            note.description = description;
        }
        if let Some(class) = self.class {
            note.class = class;
        }
        if let Some(subject) = self.subject {
            note.subject = subject;
        }
        if let Some(file_url) = self.file_url {
            note.file_url = file_url;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NoteFilter {
    pub class: Option<i32>,
    pub subject: Option<String>,
}

impl NoteFilter {
    #[must_use]
    pub fn matches(&self, note: &Note) -> bool {
        self.class.is_none_or(|c| note.class == c)
            && self.subject.as_deref().is_none_or(|s| note.subject == s)
    }
}
