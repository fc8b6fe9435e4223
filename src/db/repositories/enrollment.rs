use sea_orm::{
    ActiveModelTrait, ActiveValue::Unchanged, DatabaseConnection, EntityTrait, PaginatorTrait,
    QueryOrder, Set,
};
use tracing::info;

use super::created_at;
use crate::entities::{enrollments, prelude::*};
use crate::models::{Enrollment, EnrollmentPatch, NewEnrollment, format_timestamp};
use crate::storage::StoreError;

pub struct EnrollmentRepository {
    conn: DatabaseConnection,
}

impl EnrollmentRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: enrollments::Model) -> Result<Enrollment, StoreError> {
        let created_at = created_at("enrollment", &model.id, &model.created_at)?;

        Ok(Enrollment {
            id: model.id,
            name: model.name,
            class: model.class,
            phone: model.phone,
            whatsapp: model.whatsapp,
            address: model.address,
            created_at,
        })
    }

    pub async fn list(&self) -> Result<Vec<Enrollment>, StoreError> {
        let rows = Enrollments::find()
            .order_by_desc(enrollments::Column::CreatedAt)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<Enrollment>, StoreError> {
        Enrollments::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn create(&self, new: NewEnrollment) -> Result<Enrollment, StoreError> {
        let enrollment = Enrollment::from_new(new);

        let active_model = enrollments::ActiveModel {
            id: Set(enrollment.id.clone()),
            name: Set(enrollment.name.clone()),
            class: Set(enrollment.class.clone()),
            phone: Set(enrollment.phone.clone()),
            whatsapp: Set(enrollment.whatsapp.clone()),
            address: Set(enrollment.address.clone()),
            created_at: Set(format_timestamp(&enrollment.created_at)),
        };

        Enrollments::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        info!(enrollment_id = %enrollment.id, class = %enrollment.class, "Received enrollment");
        Ok(enrollment)
    }

    pub async fn update(
        &self,
        id: &str,
        patch: EnrollmentPatch,
    ) -> Result<Option<Enrollment>, StoreError> {
        let Some(mut enrollment) = self.get(id).await? else {
            return Ok(None);
        };
        patch.apply(&mut enrollment);

        enrollments::ActiveModel {
            id: Unchanged(enrollment.id.clone()),
            name: Set(enrollment.name.clone()),
            class: Set(enrollment.class.clone()),
            phone: Set(enrollment.phone.clone()),
            whatsapp: Set(enrollment.whatsapp.clone()),
            address: Set(enrollment.address.clone()),
            created_at: Unchanged(format_timestamp(&enrollment.created_at)),
        }
        .update(&self.conn)
        .await?;

        Ok(Some(enrollment))
    }

    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = Enrollments::delete_by_id(id).exec(&self.conn).await?;
        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(Enrollments::find().count(&self.conn).await?)
    }
}
