use crate::constants::admin;
use crate::entities::{prelude::*, users};
use crate::models::Role;
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::{ColumnTrait, EntityTrait, QueryFilter};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Databases carried over from an older deployment may already hold the admin.
        let existing = Users::find()
            .filter(users::Column::Username.eq(admin::USERNAME))
            .one(manager.get_connection())
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        let insert = sea_orm_migration::sea_query::Query::insert()
            .into_table(Users)
            .columns([
                users::Column::Id,
                users::Column::Username,
                users::Column::Password,
                users::Column::Mobile,
                users::Column::Role,
            ])
            .values_panic([
                uuid::Uuid::new_v4().to_string().into(),
                admin::USERNAME.into(),
                admin::PASSWORD.into(),
                admin::MOBILE.into(),
                Role::Admin.as_str().into(),
            ])
            .to_owned();

        manager.exec_stmt(insert).await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let delete = sea_orm_migration::sea_query::Query::delete()
            .from_table(Users)
            .and_where(Expr::col(users::Column::Username).eq(admin::USERNAME))
            .to_owned();

        manager.exec_stmt(delete).await?;

        Ok(())
    }
}
