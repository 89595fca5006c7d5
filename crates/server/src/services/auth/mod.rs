//! Authentication service.
//!
//! Provides username/password authentication for the admin panel.

mod error;

pub use error::AuthError;

use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use sqlx::SqlitePool;

use crate::db::RepositoryError;
use crate::db::users::UserRepository;
use crate::models::User;

/// Authentication service.
pub struct AuthService<'a> {
    users: UserRepository<'a>,
}

impl<'a> AuthService<'a> {
    /// Create a new authentication service.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self {
            users: UserRepository::new(pool),
        }
    }

    /// Login with username and password.
    ///
    /// An unknown username and a wrong password produce the same error.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::InvalidCredentials` if the username/password is wrong.
    /// Returns `AuthError::Repository` if the lookup fails.
    pub async fn login(&self, username: &str, password: &str) -> Result<User, AuthError> {
        let (user, password_hash) = self
            .users
            .get_password_hash(username)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        verify_password(password, &password_hash)?;

        Ok(user)
    }

    /// Create `username` with `password` unless the user already exists.
    ///
    /// Returns `true` if the user was created.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::PasswordHash` if hashing fails.
    /// Returns `AuthError::Repository` if the database fails.
    pub async fn ensure_user(&self, username: &str, password: &str) -> Result<bool, AuthError> {
        if self.users.get_by_username(username).await?.is_some() {
            return Ok(false);
        }

        let password_hash = hash_password(password)?;
        match self.users.create(username, &password_hash).await {
            Ok(_) => Ok(true),
            // Another process seeded the same user between lookup and insert
            Err(RepositoryError::Conflict(_)) => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    /// Replace the password of an existing user.
    ///
    /// # Errors
    ///
    /// Returns `AuthError::UserNotFound` if no user has that username.
    /// Returns `AuthError::PasswordHash` if hashing fails.
    pub async fn set_password(&self, username: &str, password: &str) -> Result<(), AuthError> {
        let password_hash = hash_password(password)?;
        if self.users.update_password(username, &password_hash).await? {
            Ok(())
        } else {
            Err(AuthError::UserNotFound)
        }
    }
}

// =============================================================================
// Password Helpers
// =============================================================================

/// Hash a password with Argon2id and a random salt.
///
/// Returns the PHC string stored in `users.password`.
///
/// # Errors
///
/// Returns `AuthError::PasswordHash` if hashing fails.
pub fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();

    argon2
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|_| AuthError::PasswordHash)
}

/// Verify a password against a stored PHC hash in constant time.
fn verify_password(password: &str, hash: &str) -> Result<(), AuthError> {
    let parsed_hash = PasswordHash::new(hash).map_err(|_| AuthError::InvalidCredentials)?;

    Argon2::default()
        .verify_password(password.as_bytes(), &parsed_hash)
        .map_err(|_| AuthError::InvalidCredentials)
}
