//! User domain types.

use vitrine_core::UserId;

/// An admin login account (domain type).
///
/// The password hash is deliberately absent; it is only read by
/// `UserRepository::get_password_hash` during login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    /// Unique user ID.
    pub id: UserId,
    /// Login name.
    pub username: String,
}
