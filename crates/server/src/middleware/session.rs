//! Session middleware configuration.
//!
//! Sets up `SQLite`-backed sessions using tower-sessions. The cookie only
//! carries the session ID, signed with a key derived from
//! `CATALOG_SESSION_SECRET`.

use axum::Router;
use secrecy::ExposeSecret;
use sha2::{Digest, Sha512};
use sqlx::SqlitePool;
use tower_sessions::cookie::{Key, SameSite};
use tower_sessions::{Expiry, SessionManagerLayer};
use tower_sessions_sqlx_store::SqliteStore;

use crate::config::CatalogConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "vitrine_session";

/// Session expiry time in seconds (24 hours of inactivity).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Derive the 64-byte cookie signing key from the configured secret.
fn signing_key(config: &CatalogConfig) -> Key {
    let digest = Sha512::digest(config.session_secret.expose_secret().as_bytes());
    Key::from(digest.as_slice())
}

/// Wrap `router` in the session layer.
///
/// The session table must already exist; see [`crate::bootstrap::run`].
pub fn with_session_layer(router: Router, pool: &SqlitePool, config: &CatalogConfig) -> Router {
    let store = SqliteStore::new(pool.clone());

    let layer = SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(signing_key(config));

    router.layer(layer)
}
