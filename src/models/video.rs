use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: Option<String>,
    pub class: i32,
    pub subject: String,
    pub youtube_url: String,
    pub thumbnail_url: Option<String>,
    pub duration: Option<String>,
    pub views: Option<i32>,
    pub upload_date: Option<String>,
    pub category: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Video {
    #[must_use]
    pub fn from_new(new: NewVideo) -> Self {
        Self {
            id: super::new_id(),
            title: new.title,
            description: new.description,
            class: new.class,
            subject: new.subject,
            youtube_url: new.youtube_url,
            thumbnail_url: new.thumbnail_url,
            duration: new.duration,
            views: new.views,
            upload_date: new.upload_date,
            category: new.category,
            created_at: super::now(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewVideo {
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub class: i32,
    pub subject: String,
    pub youtube_url: String,
    #[serde(default)]
    pub thumbnail_url: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
    #[serde(default)]
    pub views: Option<i32>,
    #[serde(default)]
    pub upload_date: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
}

/// Partial update; nullable columns use `Some(None)` to clear the value.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoPatch {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub description: Option<Option<String>>,
    pub class: Option<i32>,
    pub subject: Option<String>,
    pub youtube_url: Option<String>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub thumbnail_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub duration: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub views: Option<Option<i32>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub upload_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "super::double_option")]
    pub category: Option<Option<String>>,
}

impl VideoPatch {
    pub fn apply(self, video: &mut Video) {
        if let Some(title) = self.title {
            video.title = title;
        }
        if let Some(description) = self.description {
            video.description = description;
        }
        if let Some(class) = self.class {
            video.class = class;
        }
        if let Some(subject) = self.subject {
            video.subject = subject;
        }
        if let Some(youtube_url) = self.youtube_url {
            video.youtube_url = youtube_url;
        }
        if let Some(thumbnail_url) = self.thumbnail_url {
            video.thumbnail_url = thumbnail_url;
        }
        if let Some(duration) = self.duration {
            video.duration = duration;
        }
        if let Some(views) = self.views {
            video.views = views;
        }
        if let Some(upload_date) = self.upload_date {
            video.upload_date = upload_date;
        }
        if let Some(category) = self.category {
            video.category = category;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VideoFilter {
    pub class: Option<i32>,
    pub subject: Option<String>,
}

impl VideoFilter {
    #[must_use]
    pub fn matches(&self, video: &Video) -> bool {
        self.class.is_none_or(|c| video.class == c)
            && self.subject.as_deref().is_none_or(|s| video.subject == s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_omitted_optionals_are_null() {
        let new: NewVideo = serde_json::from_value(serde_json::json!({
            "title": "Algebra Basics",
            "class": 9,
            "subject": "Mathematics",
            "youtubeUrl": "https://www.youtube.com/watch?v=NcQUiqpGfXQ"
        }))
        .unwrap();

        let video = Video::from_new(new);
        assert_eq!(video.description, None);
        assert_eq!(video.views, None);
        assert_eq!(video.category, None);
    }

    #[test]
    fn test_patch_distinguishes_null_from_missing() {
        let patch: VideoPatch = serde_json::from_value(serde_json::json!({
            "description": null,
            "views": 12
        }))
        .unwrap();

        assert_eq!(patch.description, Some(None));
        assert_eq!(patch.views, Some(Some(12)));
        assert_eq!(patch.category, None);
    }
}
