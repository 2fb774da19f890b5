//! Domain layer - Core business entities and value objects.
//!
//! This crate contains pure domain logic with no infrastructure dependencies:
//! the user entity, its creation payload, the unique-key lookup fields,
//! input validation predicates and password hashing.

pub mod constants;
pub mod error;
pub mod password;
pub mod user;
pub mod validation;

pub use constants::*;
pub use error::{DomainError, DomainResult};
pub use password::Password;
pub use user::{NewUser, UniqueKey, User, UserRole};
pub use validation::{is_blank, is_valid_id, is_valid_object, parse_id};
