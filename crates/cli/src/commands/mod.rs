//! CLI command implementations.

pub mod admin;
pub mod image;
pub mod init;
