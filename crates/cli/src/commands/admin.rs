//! Admin user management commands.
//!
//! # Usage
//!
//! ```bash
//! vitrine-cli admin set-password -u admin -p 'a long passphrase'
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `SQLite` connection string (default: `sqlite://database.db`)

use thiserror::Error;

use vitrine_server::config::StorageConfig;
use vitrine_server::db;
use vitrine_server::services::auth::{AuthError, AuthService};

/// Errors that can occur during admin operations.
#[derive(Debug, Error)]
pub enum AdminError {
    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Password was empty.
    #[error("Password cannot be empty")]
    EmptyPassword,

    /// No user with that username.
    #[error("No admin user named {0}; run `vitrine-cli init` first")]
    UserNotFound(String),

    /// Hashing or storing the password failed.
    #[error("Could not update password: {0}")]
    Auth(AuthError),
}

/// Replace the password of an existing admin user.
///
/// # Arguments
///
/// * `username` - Login name of the user
/// * `password` - New plain-text password (hashed with Argon2id before storing)
///
/// # Errors
///
/// Returns `AdminError::UserNotFound` if the user does not exist.
pub async fn set_password(username: &str, password: &str) -> Result<(), AdminError> {
    if password.is_empty() {
        return Err(AdminError::EmptyPassword);
    }

    let config = StorageConfig::from_env();

    tracing::info!("Connecting to catalog database...");
    let pool = db::create_pool(&config.database_url).await?;

    let result = AuthService::new(&pool)
        .set_password(username, password)
        .await
        .map_err(|e| match e {
            AuthError::UserNotFound => AdminError::UserNotFound(username.to_owned()),
            other => AdminError::Auth(other),
        });
    pool.close().await;
    result?;

    tracing::info!(username, "Admin password updated");
    Ok(())
}
