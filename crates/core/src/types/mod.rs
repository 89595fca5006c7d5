//! Core types for Vitrine.
//!
//! This module provides type-safe wrappers for common domain concepts.

pub mod filename;
pub mod id;
pub mod locale;
pub mod price;

pub use filename::{FilenameError, SanitizedFilename, StoredImageName};
pub use id::*;
pub use locale::Locale;
pub use price::Price;
