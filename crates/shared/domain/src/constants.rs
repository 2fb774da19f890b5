//! Domain-level constants.
//!
//! These constants define business rules and validation requirements.

// =============================================================================
// User Roles
// =============================================================================

/// Default role assigned to new users
pub const ROLE_USER: &str = "user";

/// Administrator role with elevated privileges
pub const ROLE_ADMIN: &str = "admin";

/// Role for accounts that may not sign in
pub const ROLE_LOCKED: &str = "locked";

/// All valid role values
pub const VALID_ROLES: &[&str] = &[ROLE_ADMIN, ROLE_USER, ROLE_LOCKED];

/// Check if a role value is valid
pub fn is_valid_role(role: &str) -> bool {
    VALID_ROLES.contains(&role)
}

// =============================================================================
// Unique Keys
// =============================================================================

/// Field name of the username unique key
pub const KEY_USERNAME: &str = "username";

/// All fields that can be used for a unique-key lookup, in display order
pub const UNIQUE_KEYS: &[&str] = &[KEY_USERNAME];

// =============================================================================
// Messages
// =============================================================================

/// Redaction marker used in debug output for secrets
pub const REDACTED: &str = "[REDACTED]";
