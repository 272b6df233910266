use async_trait::async_trait;
use sea_orm::ActiveValue::{NotSet, Set, Unchanged};
use sea_orm::{ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryOrder};

use crate::{
    entity,
    error::{UserError, UserResult},
    models::{CreateUser, UpdateUser, User},
    repository::UserRepository,
};

/// PostgreSQL implementation of UserRepository using SeaORM.
///
/// Ids come from the `SERIAL` surrogate key, so they are never reused.
#[derive(Clone)]
pub struct PostgresUserRepository {
    db: DatabaseConnection,
}

impl PostgresUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let models = entity::Entity::find()
            .order_by_asc(entity::Column::Id)
            .all(&self.db)
            .await
            .map_err(UserError::database("fetching all users"))?;

        Ok(models.into_iter().map(Into::into).collect())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let model = entity::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(UserError::database(format!("fetching user with ID {}", id)))?;

        Ok(model.map(Into::into))
    }

    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let active_model = entity::ActiveModel {
            id: NotSet,
            name: Set(input.name),
            email: Set(input.email),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(UserError::database("creating a new user"))?;

        Ok(model.into())
    }

    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<Option<User>> {
        let active_model = entity::ActiveModel {
            id: Unchanged(id),
            name: Set(input.name),
            email: Set(input.email),
        };

        match active_model.update(&self.db).await {
            Ok(model) => Ok(Some(model.into())),
            // UPDATE ... RETURNING matched no row
            Err(DbErr::RecordNotUpdated) => Ok(None),
            Err(e) => Err(UserError::database(format!("updating user with ID {}", id))(e)),
        }
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let result = entity::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(UserError::database(format!("deleting user with ID {}", id)))?;

        Ok(result.rows_affected > 0)
    }
}
