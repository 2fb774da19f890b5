//! In-memory user repository implementation.

use std::collections::BTreeMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use tracing::debug;

use super::user_repository::{credentials_match, UserRepository};
use common::AppResult;
use domain::{DomainError, NewUser, UniqueKey, User};

#[derive(Debug, Default)]
struct State {
    users: BTreeMap<i64, User>,
    last_id: i64,
}

impl State {
    fn find_by_username(&self, username: &str) -> Option<&User> {
        self.users.values().find(|user| user.username == username)
    }
}

/// In-memory implementation of UserRepository.
///
/// Ids are assigned from a counter starting at 1 and are never reused.
#[derive(Debug, Default)]
pub struct InMemoryUserRepository {
    state: RwLock<State>,
}

impl InMemoryUserRepository {
    /// Create a new empty repository
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a repository with initial users
    pub fn with_users(users: Vec<User>) -> Self {
        let last_id = users.iter().map(|user| user.id).max().unwrap_or(0);
        let users = users.into_iter().map(|user| (user.id, user)).collect();

        Self {
            state: RwLock::new(State { users, last_id }),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
    async fn get_all(&self) -> AppResult<Vec<User>> {
        let state = self.state.read().await;
        Ok(state.users.values().cloned().collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state.users.get(&id).cloned())
    }

    async fn find_by_unique_key(&self, key: UniqueKey, value: &str) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        let found = match key {
            UniqueKey::Username => state.find_by_username(value),
        };
        Ok(found.cloned())
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        let state = self.state.read().await;
        Ok(state
            .find_by_username(username)
            .filter(|user| credentials_match(user, password))
            .cloned())
    }

    async fn save(&self, new_user: NewUser) -> AppResult<User> {
        let mut state = self.state.write().await;

        if state.find_by_username(&new_user.username).is_some() {
            return Err(DomainError::conflict("Username").into());
        }

        state.last_id += 1;
        let user = new_user.into_user(state.last_id);
        state.users.insert(user.id, user.clone());
        debug!(id = user.id, "user stored in memory");

        Ok(user)
    }

    async fn update(&self, mut user: User) -> AppResult<Option<User>> {
        let mut state = self.state.write().await;

        let taken = state
            .find_by_username(&user.username)
            .is_some_and(|other| other.id != user.id);
        if taken {
            return Err(DomainError::conflict("Username").into());
        }

        let Some(existing) = state.users.get_mut(&user.id) else {
            return Ok(None);
        };

        if user.password.is_none() {
            user.password = existing.password.take();
        }
        *existing = user.clone();

        Ok(Some(user))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let mut state = self.state.write().await;
        Ok(state.users.remove(&id).is_some())
    }
}
