//! User service - validation and orchestration of user use cases.
//!
//! Every method validates its input before touching the repository, and
//! every user it returns has had its password removed.

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use common::{AppError, AppResult, OptionExt};
use domain::{
    is_blank, is_valid_object, parse_id, DomainError, NewUser, Password, UniqueKey, User,
};

use crate::repository::UserRepository;

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User service trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserService: Send + Sync {
    /// List every user. Fails with `ResourceNotFound` when there are none.
    async fn get_all_users(&self) -> AppResult<Vec<User>>;

    /// Get a user from a raw id such as a path segment.
    async fn get_user_by_id(&self, id: &str) -> AppResult<User>;

    /// Get a user by a unique field name and its value.
    async fn get_user_by_unique_key(&self, field: &str, value: &str) -> AppResult<User>;

    /// Check whether nobody holds `username` yet.
    async fn is_username_available(&self, username: &str) -> AppResult<bool>;

    /// Validate, check uniqueness, hash the password and persist a new user.
    async fn add_new_user(&self, user: NewUser) -> AppResult<User>;

    /// Look a user up by username and password.
    async fn get_user_by_credentials(&self, username: &str, password: &str) -> AppResult<User>;
}

/// Concrete implementation of UserService using repository.
pub struct UserManager {
    repo: Arc<dyn UserRepository>,
}

impl UserManager {
    /// Create new user service instance with repository
    pub fn new(repo: Arc<dyn UserRepository>) -> Self {
        Self { repo }
    }
}

#[async_trait]
impl UserService for UserManager {
    async fn get_all_users(&self) -> AppResult<Vec<User>> {
        let users = self.repo.get_all().await?;

        if users.is_empty() {
            return Err(AppError::not_found("No users found"));
        }

        debug!(count = users.len(), "listed users");
        Ok(users.into_iter().map(User::without_password).collect())
    }

    #[instrument(skip(self))]
    async fn get_user_by_id(&self, id: &str) -> AppResult<User> {
        let Some(id) = parse_id(id) else {
            warn!("rejected invalid user id");
            return Err(AppError::bad_request(format!("'{}' is not a valid user id", id)));
        };

        self.repo
            .find_by_id(id)
            .await?
            .map(User::without_password)
            .ok_or_not_found(format!("No user found with id {}", id))
    }

    #[instrument(skip(self, value))]
    async fn get_user_by_unique_key(&self, field: &str, value: &str) -> AppResult<User> {
        let key: UniqueKey = field.parse()?;

        self.repo
            .find_by_unique_key(key, value)
            .await?
            .map(User::without_password)
            .ok_or_not_found(format!("No user found with that {}", key))
    }

    async fn is_username_available(&self, username: &str) -> AppResult<bool> {
        let existing = self
            .repo
            .find_by_unique_key(UniqueKey::Username, username)
            .await?;

        Ok(existing.is_none())
    }

    #[instrument(skip_all, fields(username = %user.username))]
    async fn add_new_user(&self, mut user: NewUser) -> AppResult<User> {
        if !is_valid_object(&user) {
            warn!("rejected incomplete user");
            return Err(AppError::bad_request("Invalid user object: missing required fields"));
        }

        if !self.is_username_available(&user.username).await? {
            warn!("username already taken");
            return Err(DomainError::conflict("Username").into());
        }

        user.id = None;
        user.password = Password::hash(&user.password)?.into_string();

        let saved = self.repo.save(user).await?;
        info!(id = saved.id, "user created");

        Ok(saved.without_password())
    }

    #[instrument(skip(self, password))]
    async fn get_user_by_credentials(&self, username: &str, password: &str) -> AppResult<User> {
        if is_blank(username) || is_blank(password) {
            return Err(AppError::bad_request("Username and password are required"));
        }

        match self.repo.find_by_credentials(username, password).await? {
            Some(user) => Ok(user.without_password()),
            None => {
                warn!("credential lookup failed");
                Err(DomainError::InvalidCredentials.into())
            }
        }
    }
}
