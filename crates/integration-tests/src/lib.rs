//! Integration test harness for Vitrine.
//!
//! Each [`TestApp`] runs the full server stack on an ephemeral port, backed by
//! a throwaway `SQLite` file and upload folder in a temp directory.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p vitrine-integration-tests
//! ```

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::io::Cursor;
use std::path::PathBuf;

use image::{DynamicImage, ImageFormat, RgbImage};
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response, redirect};
use secrecy::SecretString;
use sqlx::SqlitePool;
use tempfile::TempDir;

use vitrine_core::Locale;
use vitrine_server::app::build_app;
use vitrine_server::bootstrap;
use vitrine_server::config::{CatalogConfig, DEFAULT_ADMIN_PASSWORD, LogFormat, StorageConfig};
use vitrine_server::db::ProductRepository;
use vitrine_server::models::Product;
use vitrine_server::state::AppState;

/// A running server plus a cookie-keeping client that does not follow redirects.
pub struct TestApp {
    pub address: String,
    pub client: Client,
    pub pool: SqlitePool,
    pub upload_dir: PathBuf,
    _dir: TempDir,
}

impl TestApp {
    /// Bootstrap storage and start the server on `127.0.0.1:0`.
    pub async fn spawn() -> Self {
        let dir = tempfile::tempdir().unwrap();
        let config = test_config(&dir);
        let upload_dir = config.storage.upload_dir.clone();

        let pool = bootstrap::run(&config.storage).await.unwrap();
        let app = build_app(AppState::new(config, pool.clone()));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let address = format!("http://{}", listener.local_addr().unwrap());
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        let client = Client::builder()
            .cookie_store(true)
            .redirect(redirect::Policy::none())
            .build()
            .unwrap();

        Self {
            address,
            client,
            pool,
            upload_dir,
            _dir: dir,
        }
    }

    /// Absolute URL for `path`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    pub async fn get(&self, path: &str) -> Response {
        self.client.get(self.url(path)).send().await.unwrap()
    }

    pub async fn get_text(&self, path: &str) -> String {
        self.get(path).await.text().await.unwrap()
    }

    pub async fn login(&self, username: &str, password: &str) -> Response {
        self.client
            .post(self.url("/login"))
            .form(&[("username", username), ("password", password)])
            .send()
            .await
            .unwrap()
    }

    /// Log in as the seeded admin with the default password.
    pub async fn login_as_admin(&self) {
        let response = self.login(bootstrap::ADMIN_USERNAME, DEFAULT_ADMIN_PASSWORD).await;
        assert_eq!(location(&response), "/admin");
    }

    /// Submit the add-product form with an image part.
    pub async fn add_product(&self, name: &str, filename: &str, bytes: Vec<u8>) -> Response {
        let image = Part::bytes(bytes)
            .file_name(filename.to_owned())
            .mime_str("image/png")
            .unwrap();
        let form = product_fields(name).part("image", image);
        self.post_multipart("/admin/add", form).await
    }

    pub async fn post_multipart(&self, path: &str, form: Form) -> Response {
        self.client
            .post(self.url(path))
            .multipart(form)
            .send()
            .await
            .unwrap()
    }

    pub async fn products(&self) -> Vec<Product> {
        ProductRepository::new(&self.pool).list_all().await.unwrap()
    }

    /// Names of all files in the upload folder.
    #[must_use]
    pub fn uploaded_files(&self) -> Vec<String> {
        let mut names: Vec<String> = std::fs::read_dir(&self.upload_dir)
            .unwrap()
            .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }
}

fn test_config(dir: &TempDir) -> CatalogConfig {
    CatalogConfig {
        storage: StorageConfig {
            database_url: SecretString::from(format!(
                "sqlite://{}",
                dir.path().join("catalog.db").display()
            )),
            upload_dir: dir.path().join("static").join("uploads"),
            admin_password: SecretString::from(DEFAULT_ADMIN_PASSWORD),
            admin_password_is_default: true,
        },
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://127.0.0.1".to_string(),
        session_secret: SecretString::from("aB3$xY9!mK2@nL5#pQ7&rT0*uW4^zC6"),
        static_dir: dir.path().join("static"),
        max_upload_bytes: 4 * 1024 * 1024,
        locale: Locale::En,
        log_format: LogFormat::Text,
        sentry_dsn: None,
        sentry_environment: None,
        sentry_sample_rate: 1.0,
        sentry_traces_sample_rate: 0.0,
    }
}

/// Text fields of the add-product form.
#[must_use]
pub fn product_fields(name: &str) -> Form {
    Form::new()
        .text("name", name.to_owned())
        .text("description", "Comfortable and light")
        .text("price", "120,000 Toman")
}

/// Encode a solid-color PNG of the given size.
#[must_use]
pub fn png_bytes(width: u32, height: u32) -> Vec<u8> {
    let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(width, height, image::Rgb([200, 40, 40])));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).unwrap();
    out.into_inner()
}

/// The `Location` header of a redirect.
#[must_use]
pub fn location(response: &Response) -> String {
    response
        .headers()
        .get(reqwest::header::LOCATION)
        .map(|value| value.to_str().unwrap().to_owned())
        .unwrap_or_default()
}
