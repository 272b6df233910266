use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence.
///
/// Absent records are `None`/`false`, not errors; the service turns them
/// into `UserError::NotFound`. Every call is a single attempt.
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// All users, ordered by id
    async fn list(&self) -> UserResult<Vec<User>>;

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>>;

    /// Persist a new user with a freshly assigned id
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    /// Overwrite `name` and `email`; `None` when `id` does not exist
    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<Option<User>>;

    /// `true` when a record was removed
    async fn delete(&self, id: i32) -> UserResult<bool>;
}

#[derive(Debug)]
struct Store {
    users: BTreeMap<i32, User>,
    next_id: i32,
}

/// In-memory implementation of UserRepository (for development/testing).
///
/// Ids come from a monotonic counter starting at 1, so an id is never handed
/// out twice within the process, even after the highest one is deleted.
#[derive(Debug, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self {
            store: Arc::new(RwLock::new(Store {
                users: BTreeMap::new(),
                next_id: 1,
            })),
        }
    }
}

impl Default for InMemoryUserRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn list(&self) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(store.users.values().cloned().collect())
    }

    async fn get_by_id(&self, id: i32) -> UserResult<Option<User>> {
        let store = self.store.read().await;
        Ok(store.users.get(&id).cloned())
    }

    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        let id = store.next_id;
        store.next_id = id
            .checked_add(1)
            .ok_or_else(|| UserError::Internal("user id space exhausted".to_string()))?;

        let user = User::new(id, input);
        store.users.insert(id, user.clone());
        Ok(user)
    }

    async fn update(&self, id: i32, input: UpdateUser) -> UserResult<Option<User>> {
        let mut store = self.store.write().await;

        Ok(store.users.get_mut(&id).map(|user| {
            user.apply_update(input);
            user.clone()
        }))
    }

    async fn delete(&self, id: i32) -> UserResult<bool> {
        let mut store = self.store.write().await;
        Ok(store.users.remove(&id).is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> CreateUser {
        CreateUser {
            name: "Alice".to_string(),
            email: "a@x.com".to_string(),
        }
    }

    #[tokio::test]
    async fn test_ids_start_at_one_and_increase() {
        let repo = InMemoryUserRepository::new();

        let first = repo.create(alice()).await.unwrap();
        let second = repo.create(alice()).await.unwrap();

        assert_eq!(
            first,
            User {
                id: 1,
                name: "Alice".to_string(),
                email: "a@x.com".to_string(),
            }
        );
        assert_eq!(second.id, 2);
    }

    #[tokio::test]
    async fn test_create_fails_when_id_space_is_exhausted() {
        let repo = InMemoryUserRepository::new();
        repo.store.write().await.next_id = i32::MAX;

        let result = repo.create(alice()).await;

        assert!(matches!(result, Err(UserError::Internal(_))));
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_deleted_id_is_not_reused() {
        let repo = InMemoryUserRepository::new();

        repo.create(alice()).await.unwrap();
        let second = repo.create(alice()).await.unwrap();
        assert!(repo.delete(second.id).await.unwrap());

        let third = repo.create(alice()).await.unwrap();
        assert_eq!(third.id, 3);
    }

    #[tokio::test]
    async fn test_create_and_get_user() {
        let repo = InMemoryUserRepository::new();

        let created = repo.create(alice()).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap();

        assert_eq!(fetched, Some(created));
        assert_eq!(repo.get_by_id(99).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_update_missing_user_returns_none() {
        let repo = InMemoryUserRepository::new();

        let result = repo
            .update(
                5,
                UpdateUser {
                    name: "Bob".to_string(),
                    email: "b@x.com".to_string(),
                },
            )
            .await
            .unwrap();

        assert!(result.is_none());
        assert!(repo.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let repo = InMemoryUserRepository::new();
        let created = repo.create(alice()).await.unwrap();

        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
    }

    #[tokio::test]
    async fn test_concurrent_creates_get_distinct_ids() {
        let repo = InMemoryUserRepository::new();

        let handles: Vec<_> = (0..20)
            .map(|_| {
                let repo = repo.clone();
                tokio::spawn(async move { repo.create(alice()).await.unwrap().id })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap());
        }
        ids.sort_unstable();

        assert_eq!(ids, (1..=20).collect::<Vec<_>>());
        assert_eq!(repo.list().await.unwrap().len(), 20);
    }
}
