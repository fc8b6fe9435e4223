use sea_orm::{DatabaseConnection, EntityTrait, PaginatorTrait, QueryOrder, Set};

use super::created_at;
use crate::entities::{feedback, prelude::Feedback as FeedbackEntity};
use crate::models::{Feedback, NewFeedback, format_timestamp};
use crate::storage::StoreError;

pub struct FeedbackRepository {
    conn: DatabaseConnection,
}

impl FeedbackRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: feedback::Model) -> Result<Feedback, StoreError> {
        let created_at = created_at("feedback", &model.id, &model.created_at)?;

        Ok(Feedback {
            id: model.id,
            name: model.name,
            email: model.email,
            message: model.message,
            rating: model.rating,
            created_at,
        })
    }

    pub async fn list(&self) -> Result<Vec<Feedback>, StoreError> {
        let rows = FeedbackEntity::find()
            .order_by_desc(feedback::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Feedback>, StoreError> {
        FeedbackEntity::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn create(&self, new: NewFeedback) -> Result<Feedback, StoreError> {
        let item = Feedback::from_new(new);

        let active_model = feedback::ActiveModel {
            id: Set(item.id.clone()),
            name: Set(item.name.clone()),
            email: Set(item.email.clone()),
            message: Set(item.message.clone()),
            rating: Set(item.rating),
            created_at: Set(format_timestamp(&item.created_at)),
        };

        FeedbackEntity::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        Ok(item)
    }

    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = FeedbackEntity::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(FeedbackEntity::find().count(&self.conn).await?)
    }
}
