//! First-boot initialization.
//!
//! Every step is idempotent, so this runs on each start of the server and
//! from `vitrine-cli init`.

use secrecy::ExposeSecret;
use sqlx::SqlitePool;
use thiserror::Error;
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::StorageConfig;
use crate::db;
use crate::services::auth::{AuthError, AuthService};
use crate::uploads::UploadStore;

/// Username of the seeded admin account.
pub const ADMIN_USERNAME: &str = "admin";

/// Errors that can occur while preparing storage.
#[derive(Debug, Error)]
pub enum BootstrapError {
    #[error("could not create upload folder: {0}")]
    UploadDir(#[from] std::io::Error),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("could not seed admin user: {0}")]
    Seed(#[from] AuthError),
}

/// Prepare the upload folder and database, returning the open pool.
///
/// 1. Create the upload folder and its parents
/// 2. Open the pool (creating the database file if needed)
/// 3. Create the `products` and `users` tables
/// 4. Seed the `admin` user if it does not exist
/// 5. Create the session table
///
/// # Errors
///
/// Returns `BootstrapError` naming the step that failed.
pub async fn run(config: &StorageConfig) -> Result<SqlitePool, BootstrapError> {
    UploadStore::new(config.upload_dir.clone())
        .ensure_dir()
        .await?;

    let pool = db::create_pool(&config.database_url).await?;
    db::schema::create_tables(&pool).await?;

    let created = AuthService::new(&pool)
        .ensure_user(ADMIN_USERNAME, config.admin_password.expose_secret())
        .await?;
    if created {
        tracing::info!(username = ADMIN_USERNAME, "Seeded admin user");
        if config.admin_password_is_default {
            tracing::warn!(
                "Admin user was seeded with the default password; change it with `vitrine-cli admin set-password`"
            );
        }
    }

    SqliteStore::new(pool.clone()).migrate().await?;

    Ok(pool)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
pub(crate) mod test_support {
    use std::path::Path;

    use secrecy::SecretString;
    use vitrine_core::Locale;

    use crate::config::{CatalogConfig, DEFAULT_ADMIN_PASSWORD, LogFormat, StorageConfig};

    /// A configuration rooted in `dir`, using the default admin password.
    pub fn config_in(dir: &Path) -> CatalogConfig {
        CatalogConfig {
            storage: StorageConfig {
                database_url: SecretString::from(format!(
                    "sqlite://{}",
                    dir.join("catalog.db").display()
                )),
                upload_dir: dir.join("static").join("uploads"),
                admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
                admin_password_is_default: true,
            },
            host: "127.0.0.1".parse().unwrap(),
            port: 0,
            base_url: "http://localhost".to_string(),
            session_secret: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"),
            static_dir: dir.join("static"),
            max_upload_bytes: 1024 * 1024,
            locale: Locale::En,
            log_format: LogFormat::Text,
            sentry_dsn: None,
            sentry_environment: None,
            sentry_sample_rate: 1.0,
            sentry_traces_sample_rate: 0.0,
        }
    }
}
