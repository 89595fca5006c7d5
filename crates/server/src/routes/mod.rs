//! HTTP route handlers for the catalog.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                    - Public product listing
//! GET  /login               - Login form
//! POST /login               - Authenticate
//! GET  /logout              - Clear session (also POST)
//! GET  /admin               - Admin listing with add form (auth required)
//! POST /admin/add           - Create product with image upload (auth required)
//! GET  /admin/delete/{id}   - Delete product (auth required)
//! ```

pub mod admin;
pub mod auth;
pub mod catalog;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    routing::{get, post},
};

use crate::models::Product;
use crate::state::AppState;

/// Build the catalog router.
///
/// `max_upload_bytes` bounds the body of `POST /admin/add`.
pub fn routes(max_upload_bytes: usize) -> Router<AppState> {
    Router::new()
        .route("/", get(catalog::index))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", get(auth::logout).post(auth::logout))
        .route("/admin", get(admin::index))
        .route(
            "/admin/add",
            post(admin::add).layer(DefaultBodyLimit::max(max_upload_bytes)),
        )
        .route("/admin/delete/{id}", get(admin::delete))
}

/// Product view for templates.
#[derive(Debug, Clone)]
pub struct ProductView {
    pub id: i64,
    pub name: String,
    pub description: String,
    pub price: String,
    pub image_url: Option<String>,
}

impl From<Product> for ProductView {
    fn from(product: Product) -> Self {
        let image_url = product.image_url();
        Self {
            id: product.id.as_i64(),
            name: product.name,
            description: product.description.unwrap_or_default(),
            price: product.price.into_inner(),
            image_url,
        }
    }
}
