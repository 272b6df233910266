use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};
use crate::repository::UserRepository;

/// Service layer for User operations.
///
/// Turns absent records into `UserError::NotFound` and logs every outcome:
/// info on success, warn for not-found, error for storage faults.
#[derive(Clone)]
pub struct UserService<R: UserRepository> {
    repository: Arc<R>,
}

impl<R: UserRepository> UserService<R> {
    pub fn new(repository: R) -> Self {
        Self {
            repository: Arc::new(repository),
        }
    }

    #[instrument(skip(self))]
    pub async fn list_users(&self) -> UserResult<Vec<User>> {
        info!("Fetching all users.");
        let users = self.repository.list().await.inspect_err(log_failure)?;
        info!("Fetched {} users.", users.len());
        Ok(users)
    }

    #[instrument(skip(self), fields(user_id = id))]
    pub async fn get_user(&self, id: i32) -> UserResult<User> {
        info!("Fetching user with ID {}.", id);
        let user = self
            .repository
            .get_by_id(id)
            .await
            .inspect_err(log_failure)?
            .ok_or_else(|| not_found(id))?;

        info!("Fetched user with ID {}.", id);
        Ok(user)
    }

    #[instrument(skip(self, input))]
    pub async fn create_user(&self, input: CreateUser) -> UserResult<User> {
        info!("Creating a new user.");
        let user = self
            .repository
            .create(input)
            .await
            .inspect_err(log_failure)?;

        info!(user_id = user.id, "Created user with ID {}.", user.id);
        Ok(user)
    }

    #[instrument(skip(self, input), fields(user_id = id))]
    pub async fn update_user(&self, id: i32, input: UpdateUser) -> UserResult<User> {
        info!("Updating user with ID {}.", id);
        let user = self
            .repository
            .update(id, input)
            .await
            .inspect_err(log_failure)?
            .ok_or_else(|| not_found(id))?;

        info!("Updated user with ID {}.", id);
        Ok(user)
    }

    #[instrument(skip(self), fields(user_id = id))]
    pub async fn delete_user(&self, id: i32) -> UserResult<()> {
        info!("Deleting user with ID {}.", id);
        let deleted = self.repository.delete(id).await.inspect_err(log_failure)?;

        if !deleted {
            return Err(not_found(id));
        }

        info!("Deleted user with ID {}.", id);
        Ok(())
    }
}

fn not_found(id: i32) -> UserError {
    let err = UserError::NotFound(id);
    warn!("{}", err);
    err
}

fn log_failure(err: &UserError) {
    error!(error = %err, "Storage operation failed");
}
