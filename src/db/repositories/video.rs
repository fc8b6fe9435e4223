use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

use super::created_at;
use crate::entities::{prelude::*, videos};
use crate::models::{NewVideo, Video, VideoFilter, VideoPatch, format_timestamp};
use crate::storage::StoreError;

pub struct VideoRepository {
    conn: DatabaseConnection,
}

impl VideoRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: videos::Model) -> Result<Video, StoreError> {
        let created_at = created_at("video", &model.id, &model.created_at)?;

        Ok(Video {
            id: model.id,
            title: model.title,
            description: model.description,
            class: model.class,
            subject: model.subject,
            youtube_url: model.youtube_url,
            thumbnail_url: model.thumbnail_url,
            duration: model.duration,
            views: model.views,
            upload_date: model.upload_date,
            category: model.category,
            created_at,
        })
    }

    fn active_model(video: &Video) -> videos::ActiveModel {
        videos::ActiveModel {
            id: Set(video.id.clone()),
            title: Set(video.title.clone()),
            description: Set(video.description.clone()),
            class: Set(video.class),
            subject: Set(video.subject.clone()),
            youtube_url: Set(video.youtube_url.clone()),
            thumbnail_url: Set(video.thumbnail_url.clone()),
            duration: Set(video.duration.clone()),
            views: Set(video.views),
            upload_date: Set(video.upload_date.clone()),
            category: Set(video.category.clone()),
            created_at: Set(format_timestamp(&video.created_at)),
        }
    }

    pub async fn list(&self, filter: &VideoFilter) -> Result<Vec<Video>, StoreError> {
        let mut query = Videos::find();

        if let Some(class) = filter.class {
            query = query.filter(videos::Column::Class.eq(class));
        }
        if let Some(subject) = &filter.subject {
            query = query.filter(videos::Column::Subject.eq(subject.as_str()));
        }

        let rows = query
            .order_by_desc(videos::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Video>, StoreError> {
        Videos::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn create(&self, new: NewVideo) -> Result<Video, StoreError> {
        let video = Video::from_new(new);

        Videos::insert(Self::active_model(&video))
            .exec_without_returning(&self.conn)
            .await?;

        Ok(video)
    }

    pub async fn update(&self, id: &str, patch: VideoPatch) -> Result<Option<Video>, StoreError> {
        let Some(mut video) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut video);

        let mut active_model = Self::active_model(&video);
        active_model.id = Unchanged(video.id.clone());
        active_model.created_at = Unchanged(format_timestamp(&video.created_at));
        active_model.update(&self.conn).await?;

        Ok(Some(video))
    }

    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = Videos::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(Videos::find().count(&self.conn).await?)
    }
}
