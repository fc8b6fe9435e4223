use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, ColumnTrait, DatabaseConnection, EntityTrait,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use super::created_at;
use crate::entities::{notes, prelude::*};
use crate::models::{NewNote, Note, NoteFilter, NotePatch, format_timestamp};
use crate::storage::StoreError;

pub struct NoteRepository {
    conn: DatabaseConnection,
}

impl NoteRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: notes::Model) -> Result<Note, StoreError> {
        let created_at = created_at("note", &model.id, &model.created_at)?;

        Ok(Note {
            id: model.id,
            title: model.title,
            description: model.description,
            class: model.class,
            subject: model.subject,
            file_url: model.file_url,
            created_at,
        })
    }

    pub async fn list(&self, filter: &NoteFilter) -> Result<Vec<Note>, StoreError> {
        let mut query = Notes::find();

        if let Some(class) = filter.class {
            query = query.filter(notes::Column::Class.eq(class));
        }
        if let Some(subject) = &filter.subject {
            query = query.filter(notes::Column::Subject.eq(subject.as_str()));
        }

        let rows = query
            .order_by_desc(notes::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Note>, StoreError> {
        Notes::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn create(&self, new: NewNote) -> Result<Note, StoreError> {
        let note = Note::from_new(new);

        let active_model = notes::ActiveModel {
            id: Set(note.id.clone()),
            title: Set(note.title.clone()),
            description: Set(note.description.clone()),
            class: Set(note.class),
            subject: Set(note.subject.clone()),
            file_url: Set(note.file_url.clone()),
            created_at: Set(format_timestamp(&note.created_at)),
        };

        Notes::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        info!(note_id = %note.id, title = %note.title, "Added notes");
        Ok(note)
    }

    pub async fn update(&self, id: &str, patch: NotePatch) -> Result<Option<Note>, StoreError> {
        let Some(mut note) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut note);

        notes::ActiveModel {
            id: Unchanged(note.id.clone()),
            title: Set(note.title.clone()),
            description: Set(note.description.clone()),
            class: Set(note.class),
            subject: Set(note.subject.clone()),
            file_url: Set(note.file_url.clone()),
            created_at: Unchanged(format_timestamp(&note.created_at)),
        }
        .update(&self.conn)
        .await?;

        Ok(Some(note))
    }

    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = Notes::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(Notes::find().count(&self.conn).await?)
    }
}
