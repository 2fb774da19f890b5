//! User repository contract and its SeaORM implementation.

use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ActiveValue::NotSet, ColumnTrait, DatabaseConnection, DbErr, EntityTrait,
    QueryFilter, QueryOrder, Set, SqlErr,
};
use tracing::debug;

use super::entities::user::{self, ActiveModel, Entity as UserEntity};
use common::{AppError, AppResult};
use domain::{DomainError, NewUser, Password, UniqueKey, User};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// User repository trait for dependency injection.
///
/// Absence is reported as `Ok(None)`; errors are reserved for storage
/// failures and constraint violations.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait]
pub trait UserRepository: Send + Sync {
    /// List every stored user, ordered by id
    async fn get_all(&self) -> AppResult<Vec<User>>;

    /// Find user by ID
    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>>;

    /// Find user by a unique field
    async fn find_by_unique_key(&self, key: UniqueKey, value: &str) -> AppResult<Option<User>>;

    /// Find an unlocked user whose stored password hash matches `password`
    async fn find_by_credentials(&self, username: &str, password: &str)
        -> AppResult<Option<User>>;

    /// Persist a new user and return it with its assigned id
    async fn save(&self, user: NewUser) -> AppResult<User>;

    /// Replace the stored fields of an existing user.
    ///
    /// A `None` password keeps the stored one. Returns `None` if no user has
    /// that id.
    async fn update(&self, user: User) -> AppResult<Option<User>>;

    /// Delete user by ID, returning whether a record was removed
    async fn delete_by_id(&self, id: i64) -> AppResult<bool>;
}

/// SeaORM-backed implementation of UserRepository.
///
/// Expects the `users` table to exist.
pub struct UserStore {
    db: DatabaseConnection,
}

impl UserStore {
    /// Create new repository instance
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }
}

/// Unique violations become persistence conflicts; everything else is a
/// database failure.
fn map_write_error(err: DbErr) -> AppError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            debug!(%detail, "unique constraint violated");
            DomainError::conflict("Username").into()
        }
        _ => AppError::from(err),
    }
}

/// Overwrite the editable columns of a stored row. The password column is
/// left untouched when `user` carries none.
fn apply_changes(existing: user::Model, user: User) -> ActiveModel {
    let mut active: ActiveModel = existing.into();
    active.username = Set(user.username);
    active.first_name = Set(user.first_name);
    active.last_name = Set(user.last_name);
    active.role = Set(user.role.to_string());
    if let Some(password) = user.password {
        active.password = Set(password);
    }
    active
}

#[async_trait]
impl UserRepository for UserStore {
    async fn get_all(&self) -> AppResult<Vec<User>> {
        let models = UserEntity::find()
            .order_by_asc(user::Column::Id)
            .all(&self.db)
            .await?;

        Ok(models.into_iter().map(User::from).collect())
    }

    async fn find_by_id(&self, id: i64) -> AppResult<Option<User>> {
        let result = UserEntity::find_by_id(id).one(&self.db).await?;

        Ok(result.map(User::from))
    }

    async fn find_by_unique_key(&self, key: UniqueKey, value: &str) -> AppResult<Option<User>> {
        let column = match key {
            UniqueKey::Username => user::Column::Username,
        };

        let result = UserEntity::find()
            .filter(column.eq(value))
            .one(&self.db)
            .await?;

        Ok(result.map(User::from))
    }

    async fn find_by_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> AppResult<Option<User>> {
        let result = self
            .find_by_unique_key(UniqueKey::Username, username)
            .await?;

        Ok(result.filter(|user| credentials_match(user, password)))
    }

    async fn save(&self, new_user: NewUser) -> AppResult<User> {
        let active_model = ActiveModel {
            id: NotSet,
            username: Set(new_user.username),
            password: Set(new_user.password),
            first_name: Set(new_user.first_name),
            last_name: Set(new_user.last_name),
            role: Set(new_user.role.to_string()),
        };

        let model = active_model
            .insert(&self.db)
            .await
            .map_err(map_write_error)?;
        debug!(id = model.id, "user row inserted");

        Ok(User::from(model))
    }

    async fn update(&self, user: User) -> AppResult<Option<User>> {
        let Some(existing) = UserEntity::find_by_id(user.id).one(&self.db).await? else {
            return Ok(None);
        };

        let model = apply_changes(existing, user)
            .update(&self.db)
            .await
            .map_err(map_write_error)?;
        debug!(id = model.id, "user row updated");

        Ok(Some(User::from(model)))
    }

    async fn delete_by_id(&self, id: i64) -> AppResult<bool> {
        let result = UserEntity::delete_by_id(id).exec(&self.db).await?;

        Ok(result.rows_affected > 0)
    }
}

/// Check a plain text password against a stored user. Locked users never
/// match.
pub(crate) fn credentials_match(user: &User, password: &str) -> bool {
    if user.is_locked() {
        return false;
    }

    user.password
        .as_deref()
        .map(|hash| Password::from_hash(hash).verify(password))
        .unwrap_or(false)
}
