use sea_orm::{
    ColumnTrait, DatabaseConnection, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};
use tracing::info;

use crate::entities::{prelude::*, users};
use crate::models::{NewUser, Role, User};
use crate::storage::StoreError;

pub struct UserRepository {
    conn: DatabaseConnection,
}

impl UserRepository {
    #[must_use]
    pub const fn new(conn: DatabaseConnection) -> Self {
        Self { conn }
    }

    fn map_model(model: users::Model) -> Result<User, StoreError> {
        let role = model
            .role
            .parse::<Role>()
            .map_err(|e| StoreError::corrupt("user", &model.id, e))?;

        Ok(User {
            id: model.id,
            username: model.username,
            password: model.password,
            mobile: model.mobile,
            role,
        })
    }

    pub async fn list(&self) -> Result<Vec<User>, StoreError> {
        let rows = Users::find()
            .order_by_asc(users::Column::Username)
            .all(&self.conn)
            .await?;

        rows.into_iter().map(Self::map_model).collect()
    }

    pub async fn get(&self, id: &str) -> Result<Option<User>, StoreError> {
        Users::find_by_id(id)
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn get_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn get_by_mobile(&self, mobile: &str) -> Result<Option<User>, StoreError> {
        Users::find()
            .filter(users::Column::Mobile.eq(mobile))
            .one(&self.conn)
            .await?
            .map(Self::map_model)
            .transpose()
    }

    pub async fn create(&self, new: NewUser) -> Result<User, StoreError> {
        let user = User::from_new(new);

        let active_model = users::ActiveModel {
            id: Set(user.id.clone()),
            username: Set(user.username.clone()),
            password: Set(user.password.clone()),
            mobile: Set(user.mobile.clone()),
            role: Set(user.role.as_str().to_string()),
        };

        Users::insert(active_model)
            .exec_without_returning(&self.conn)
            .await?;

        info!(user_id = %user.id, username = %user.username, "Created user");
        Ok(user)
    }

    /// Admin rows are excluded by the delete statement itself.
    pub async fn remove(&self, id: &str) -> Result<bool, StoreError> {
        let result = Users::delete_many()
            .filter(users::Column::Id.eq(id))
            .filter(users::Column::Role.ne(Role::Admin.as_str()))
            .exec(&self.conn)
            .await?;

        Ok(result.rows_affected > 0)
    }

    pub async fn count(&self) -> Result<u64, StoreError> {
        Ok(Users::find().count(&self.conn).await?)
    }
}
