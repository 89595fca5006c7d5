//! Table definitions.

use sqlx::SqlitePool;

const CREATE_PRODUCTS: &str = r"
CREATE TABLE IF NOT EXISTS products (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    description TEXT,
    price TEXT,
    image TEXT
)";

const CREATE_USERS: &str = r"
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    username TEXT UNIQUE NOT NULL,
    password TEXT NOT NULL
)";

/// Create the `products` and `users` tables if they do not exist.
///
/// Safe to call on every start.
///
/// # Errors
///
/// Returns `sqlx::Error` if a statement fails.
pub async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_PRODUCTS).execute(pool).await?;
    sqlx::query(CREATE_USERS).execute(pool).await?;
    tracing::debug!("Catalog tables ensured");
    Ok(())
}
