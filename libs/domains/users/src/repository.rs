use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::error::{UserError, UserResult};
use crate::models::{CreateUser, UpdateUser, User};

/// Repository trait for User persistence
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// Insert a user and assign its id
    async fn create(&self, input: CreateUser) -> UserResult<User>;

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>>;

    /// All users ordered by id
    async fn list(&self) -> UserResult<Vec<User>>;

    /// Users with the given ids; unknown ids are skipped
    async fn list_by_ids(&self, ids: Vec<i64>) -> UserResult<Vec<User>>;

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User>;

    /// Delete a user; `false` when no such user existed
    async fn delete(&self, id: i64) -> UserResult<bool>;

    /// Case-insensitive email lookup, optionally ignoring one user
    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> UserResult<bool>;
}

/// Lets a shared `Arc<dyn UserRepository>` back a [`UserService`](crate::UserService).
#[async_trait]
impl<R: UserRepository + ?Sized> UserRepository for Arc<R> {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        (**self).create(input).await
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        (**self).get_by_id(id).await
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        (**self).list().await
    }

    async fn list_by_ids(&self, ids: Vec<i64>) -> UserResult<Vec<User>> {
        (**self).list_by_ids(ids).await
    }

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        (**self).update(id, input).await
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        (**self).delete(id).await
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> UserResult<bool> {
        (**self).email_exists(email, exclude_id).await
    }
}

#[derive(Debug, Default)]
struct Store {
    next_id: i64,
    users: BTreeMap<i64, User>,
}

impl Store {
    fn email_taken(&self, email: &str, exclude_id: Option<i64>) -> bool {
        self.users
            .values()
            .any(|u| Some(u.id) != exclude_id && u.email.eq_ignore_ascii_case(email))
    }
}

/// In-memory implementation of UserRepository (for development/testing)
///
/// Clones share the same store.
#[derive(Debug, Default, Clone)]
pub struct InMemoryUserRepository {
    store: Arc<RwLock<Store>>,
}

impl InMemoryUserRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn create(&self, input: CreateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if store.email_taken(&input.email, None) {
            return Err(UserError::DuplicateEmail(input.email));
        }

        store.next_id += 1;
        let user = User {
            id: store.next_id,
            name: input.name,
            email: input.email,
        };
        store.users.insert(user.id, user.clone());

        tracing::info!(user_id = user.id, "Created user");
        Ok(user)
    }

    async fn get_by_id(&self, id: i64) -> UserResult<Option<User>> {
        Ok(self.store.read().await.users.get(&id).cloned())
    }

    async fn list(&self) -> UserResult<Vec<User>> {
        Ok(self.store.read().await.users.values().cloned().collect())
    }

    async fn list_by_ids(&self, ids: Vec<i64>) -> UserResult<Vec<User>> {
        let store = self.store.read().await;
        Ok(ids
            .iter()
            .filter_map(|id| store.users.get(id).cloned())
            .collect())
    }

    async fn update(&self, id: i64, input: UpdateUser) -> UserResult<User> {
        let mut store = self.store.write().await;

        if let Some(ref email) = input.email {
            if store.email_taken(email, Some(id)) {
                return Err(UserError::DuplicateEmail(email.clone()));
            }
        }

        let user = store.users.get_mut(&id).ok_or(UserError::NotFound(id))?;
        user.apply_update(input);

        tracing::info!(user_id = id, "Updated user");
        Ok(user.clone())
    }

    async fn delete(&self, id: i64) -> UserResult<bool> {
        let removed = self.store.write().await.users.remove(&id).is_some();
        if removed {
            tracing::info!(user_id = id, "Deleted user");
        }
        Ok(removed)
    }

    async fn email_exists(&self, email: &str, exclude_id: Option<i64>) -> UserResult<bool> {
        Ok(self.store.read().await.email_taken(email, exclude_id))
    }
}
