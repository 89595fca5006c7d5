//! Application state shared across handlers.

use std::sync::Arc;

use sqlx::SqlitePool;
use vitrine_core::Locale;

use crate::config::CatalogConfig;
use crate::i18n::{Message, UiText};
use crate::uploads::UploadStore;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources like database connections and configuration.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: CatalogConfig,
    pool: SqlitePool,
    uploads: UploadStore,
}

impl AppState {
    /// Create a new application state.
    ///
    /// # Arguments
    ///
    /// * `config` - Catalog configuration
    /// * `pool` - `SQLite` connection pool (already bootstrapped)
    #[must_use]
    pub fn new(config: CatalogConfig, pool: SqlitePool) -> Self {
        let uploads = UploadStore::new(config.storage.upload_dir.clone());
        Self {
            inner: Arc::new(AppStateInner {
                config,
                pool,
                uploads,
            }),
        }
    }

    /// Get a reference to the catalog configuration.
    #[must_use]
    pub fn config(&self) -> &CatalogConfig {
        &self.inner.config
    }

    /// Get a reference to the database connection pool.
    #[must_use]
    pub fn pool(&self) -> &SqlitePool {
        &self.inner.pool
    }

    /// Get a reference to the upload folder.
    #[must_use]
    pub fn uploads(&self) -> &UploadStore {
        &self.inner.uploads
    }

    /// Configured locale.
    #[must_use]
    pub fn locale(&self) -> Locale {
        self.inner.config.locale
    }

    /// Page labels in the configured locale.
    #[must_use]
    pub fn ui(&self) -> &'static UiText {
        UiText::for_locale(self.locale())
    }

    /// A message in the configured locale.
    #[must_use]
    pub fn message(&self, message: Message) -> &'static str {
        message.text(self.locale())
    }
}
