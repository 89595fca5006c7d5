//! Storage initialization command.
//!
//! # Usage
//!
//! ```bash
//! vitrine-cli init
//! ```
//!
//! # Environment Variables
//!
//! - `CATALOG_DATABASE_URL` - `SQLite` connection string (default: `sqlite://database.db`)
//! - `CATALOG_UPLOAD_DIR` - Product image folder (default: `static/uploads`)
//! - `CATALOG_ADMIN_PASSWORD` - Password for a newly seeded `admin` user

use vitrine_server::bootstrap::{self, BootstrapError};
use vitrine_server::config::StorageConfig;

/// Run the same idempotent storage setup the server performs on start.
///
/// # Errors
///
/// Returns `BootstrapError` if any step fails.
pub async fn run() -> Result<(), BootstrapError> {
    let config = StorageConfig::from_env();

    tracing::info!(upload_dir = %config.upload_dir.display(), "Initializing storage...");
    let pool = bootstrap::run(&config).await?;
    pool.close().await;

    tracing::info!("Storage initialized");
    Ok(())
}
