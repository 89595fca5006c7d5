//! Vitrine catalog server.
//!
//! This crate provides the catalog functionality as a library, allowing it
//! to be tested and reused by the `vitrine-cli` binary.
//!
//! # Architecture
//!
//! - Axum web framework, Askama templates for server-side rendering
//! - `SQLite` (via sqlx) for products, users, and sessions
//! - Uploaded product images are cropped to a 600x600 square with `image`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod app;
pub mod bootstrap;
pub mod config;
pub mod db;
pub mod error;
pub mod filters;
pub mod i18n;
pub mod images;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod uploads;
