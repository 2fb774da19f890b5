//! User domain entity and related types.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::constants::{KEY_USERNAME, REDACTED, ROLE_ADMIN, ROLE_LOCKED, ROLE_USER, UNIQUE_KEYS};
use crate::error::DomainError;

/// User roles enumeration
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    #[default]
    User,
    Locked,
}

impl UserRole {
    /// Check if accounts with this role are locked out
    pub fn is_locked(&self) -> bool {
        matches!(self, UserRole::Locked)
    }

    /// Stored label for this role
    pub fn as_str(&self) -> &'static str {
        match self {
            UserRole::Admin => ROLE_ADMIN,
            UserRole::User => ROLE_USER,
            UserRole::Locked => ROLE_LOCKED,
        }
    }
}

/// Unknown labels fall back to the default role.
impl From<&str> for UserRole {
    fn from(s: &str) -> Self {
        match s.to_ascii_lowercase().as_str() {
            ROLE_ADMIN => UserRole::Admin,
            ROLE_LOCKED => UserRole::Locked,
            _ => UserRole::User,
        }
    }
}

impl From<String> for UserRole {
    fn from(s: String) -> Self {
        UserRole::from(s.as_str())
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Fields that are unique across all users and can be used for point lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UniqueKey {
    Username,
}

impl UniqueKey {
    /// Field name of this key
    pub fn as_str(&self) -> &'static str {
        match self {
            UniqueKey::Username => KEY_USERNAME,
        }
    }
}

impl FromStr for UniqueKey {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            KEY_USERNAME => Ok(UniqueKey::Username),
            other => Err(DomainError::validation(format!(
                "'{}' is not a unique user field (expected one of: {})",
                other,
                UNIQUE_KEYS.join(", ")
            ))),
        }
    }
}

impl fmt::Display for UniqueKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User domain entity
///
/// `password` holds the stored credential while the record is inside the
/// persistence layer. It is never serialized and is cleared before a user
/// leaves the service.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub username: String,
    #[serde(default, skip_serializing)]
    pub password: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub role: UserRole,
}

impl fmt::Debug for User {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("User")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| REDACTED))
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}

impl User {
    /// Return this user with the password removed
    pub fn without_password(mut self) -> Self {
        self.password = None;
        self
    }

    /// Check if user is locked out
    pub fn is_locked(&self) -> bool {
        self.role.is_locked()
    }
}

/// User creation payload.
///
/// An `id` supplied by the caller is ignored; persistence assigns one.
#[derive(Clone, PartialEq, Eq, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct NewUser {
    #[serde(default)]
    pub id: Option<i64>,
    #[validate(length(min = 1, message = "Username is required"))]
    pub username: String,
    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
    #[validate(length(min = 1, message = "First name is required"))]
    pub first_name: String,
    #[validate(length(min = 1, message = "Last name is required"))]
    pub last_name: String,
    #[serde(default)]
    pub role: UserRole,
}

impl fmt::Debug for NewUser {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NewUser")
            .field("id", &self.id)
            .field("username", &self.username)
            .field("password", &REDACTED)
            .field("first_name", &self.first_name)
            .field("last_name", &self.last_name)
            .field("role", &self.role)
            .finish()
    }
}

impl NewUser {
    /// Create a new user payload with the default role
    pub fn new(
        username: impl Into<String>,
        password: impl Into<String>,
        first_name: impl Into<String>,
        last_name: impl Into<String>,
    ) -> Self {
        Self {
            id: None,
            username: username.into(),
            password: password.into(),
            first_name: first_name.into(),
            last_name: last_name.into(),
            role: UserRole::default(),
        }
    }

    /// Set the role
    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }

    /// Build the persisted entity once storage has assigned an id
    pub fn into_user(self, id: i64) -> User {
        User {
            id,
            username: self.username,
            password: Some(self.password),
            first_name: self.first_name,
            last_name: self.last_name,
            role: self.role,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_user() -> User {
        NewUser::new("jdoe", "secret", "John", "Doe").into_user(7)
    }

    #[test]
    fn test_role_from_label() {
        assert_eq!(UserRole::from("admin"), UserRole::Admin);
        assert_eq!(UserRole::from("LOCKED"), UserRole::Locked);
        assert_eq!(UserRole::from("user"), UserRole::User);
        assert_eq!(UserRole::from("something-else"), UserRole::User);
    }

    #[test]
    fn test_role_display_round_trips_through_label() {
        for role in [UserRole::Admin, UserRole::User, UserRole::Locked] {
            assert_eq!(UserRole::from(role.to_string()), role);
            assert!(crate::is_valid_role(role.as_str()));
        }
    }

    #[test]
    fn test_unique_key_parse() {
        assert_eq!("username".parse::<UniqueKey>(), Ok(UniqueKey::Username));
        assert!(matches!(
            "email".parse::<UniqueKey>(),
            Err(DomainError::Validation(msg)) if msg.contains("expected one of: username")
        ));
        assert!("Username".parse::<UniqueKey>().is_err());
    }

    #[test]
    fn test_without_password_clears_credential() {
        let user = sample_user();
        assert!(user.password.is_some());

        let stripped = user.without_password();
        assert!(stripped.password.is_none());
        assert_eq!(stripped.id, 7);
        assert_eq!(stripped.username, "jdoe");
    }

    #[test]
    fn test_password_never_serialized() {
        let json = serde_json::to_value(sample_user()).unwrap();

        assert!(json.get("password").is_none());
        assert_eq!(json["firstName"], "John");
        assert_eq!(json["role"], "user");
    }

    #[test]
    fn test_debug_redacts_password() {
        let output = format!("{:?}", sample_user());
        assert!(output.contains(REDACTED));
        assert!(!output.contains("secret"));
    }

    #[test]
    fn test_new_user_deserializes_with_default_role() {
        let payload = r#"{
            "id": 42,
            "username": "amy",
            "password": "pw",
            "firstName": "Amy",
            "lastName": "Pond"
        }"#;
        let new_user: NewUser = serde_json::from_str(payload).unwrap();

        assert_eq!(new_user.id, Some(42));
        assert_eq!(new_user.role, UserRole::User);
        assert_eq!(new_user.into_user(1).id, 1);
    }
}
