use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::created_at;
use crate::entities::{prelude::*, question_papers};
use crate::models::{
    NewQuestionPaper, PaperFilter, Phase, QuestionPaper, QuestionPaperPatch, format_timestamp,
};
use crate::storage::StoreError;

pub struct QuestionPaperRepository {
    conn: DatabaseConnection,
}

impl QuestionPaperRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: question_papers::Model) -> Result<QuestionPaper, StoreError> {
        let phase = model
            .phase
            .parse::<Phase>()
            .map_err(|e| StoreError::corrupt("question paper", &model.id, e))?;
        let created_at = created_at("question paper", &model.id, &model.created_at)?;

        Ok(QuestionPaper {
            id: model.id,
            title: model.title,
            class: model.class,
            subject: model.subject,
            year: model.year,
            phase,
            file_url: model.file_url,
            created_at,
        })
    }

    pub async fn list(&self, filter: &PaperFilter) -> Result<Vec<QuestionPaper>, StoreError> {
        let mut query = QuestionPapers::find();

        if let Some(class) = filter.class {
            query = query.filter(question_papers::Column::Class.eq(class));
        }
        if let Some(subject) = &filter.subject {
            query = query.filter(question_papers::Column::Subject.eq(subject.as_str()));
        }
        if let Some(year) = filter.year {
            query = query.filter(question_papers::Column::Year.eq(year));
        }
        if let Some(phase) = filter.phase {
            query = query.filter(question_papers::Column::Phase.eq(phase.as_str()));
        }

        let rows = query
            .order_by_desc(question_papers::Column::Year)
            .order_by_desc(question_papers::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<QuestionPaper>, StoreError> {
        QuestionPapers::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn create(&self, new: NewQuestionPaper) -> Result<QuestionPaper, StoreError> {
        let paper = QuestionPaper::from_new(new);

        let active_model = question_papers::ActiveModel {
            id: Set(paper.id.clone()),
            title: Set(paper.title.clone()),
            class: Set(paper.class),
            subject: Set(paper.subject.clone()),
            year: Set(paper.year),
            phase: Set(paper.phase.as_str().to_string()),
            file_url: Set(paper.file_url.clone()),
            created_at: Set(format_timestamp(&paper.created_at)),
        };

        QuestionPapers::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        info!(paper_id = %paper.id, title = %paper.title, "Added question paper");
        Ok(paper)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: QuestionPaperPatch,
    ) -> Result<Option<QuestionPaper>, StoreError> {
        let Some(mut paper) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut paper);

        question_papers::ActiveModel {
            id: Unchanged(paper.id.clone()),
            title: Set(paper.title.clone()),
            class: Set(paper.class),
            subject: Set(paper.subject.clone()),
            year: Set(paper.year),
            phase: Set(paper.phase.as_str().to_string()),
            file_url: Set(paper.file_url.clone()),
            created_at: Unchanged(format_timestamp(&paper.created_at)),
        }
        .update(&self.conn)
        .await?;

        Ok(Some(paper))
    }

    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = QuestionPapers::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(QuestionPapers::find().count(&self.conn).await?)
    }
}
