//! Upload filename types.
//!
//! A browser-supplied filename is untrusted: it may contain directory
//! components, non-ASCII characters, or nothing usable at all.
//! [`SanitizedFilename`] reduces it to a safe ASCII name, and
//! [`StoredImageName`] prefixes it with a generated identifier so that every
//! upload lands in its own file.

use core::fmt;

use serde::{Deserialize, Serialize};
use unicode_normalization::UnicodeNormalization;
use uuid::Uuid;

/// Errors that can occur when parsing upload filenames.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FilenameError {
    /// The input string is empty.
    #[error("filename cannot be empty")]
    Empty,
    /// Nothing remained after removing unsafe characters.
    #[error("filename has no safe characters")]
    NoSafeCharacters,
    /// A stored name contains characters that could escape the upload folder.
    #[error("unsafe stored filename: {0}")]
    Unsafe(String),
}

/// Characters allowed in a sanitized filename besides ASCII alphanumerics.
const fn is_safe_char(c: char) -> bool {
    c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-')
}

/// A filename stripped of path components and unsafe characters.
///
/// ## Rules
///
/// 1. Compatibility decomposition (NFKD), then non-ASCII characters are
///    dropped, so accented letters keep their base letter
/// 2. `/` and `\` become spaces
/// 3. Runs of whitespace are joined with `_`
/// 4. Anything outside `[A-Za-z0-9_.-]` is dropped
/// 5. Leading and trailing `.` and `_` are trimmed
///
/// ## Examples
///
/// ```
/// use vitrine_core::SanitizedFilename;
///
/// let name = SanitizedFilename::parse("My cool movie.mov").unwrap();
/// assert_eq!(name.as_str(), "My_cool_movie.mov");
///
/// let name = SanitizedFilename::parse("café.png").unwrap();
/// assert_eq!(name.as_str(), "cafe.png");
///
/// let name = SanitizedFilename::parse("../../etc/passwd").unwrap();
/// assert_eq!(name.as_str(), "etc_passwd");
///
/// assert!(SanitizedFilename::parse("").is_err());
/// assert!(SanitizedFilename::parse("../..").is_err());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SanitizedFilename(String);

impl SanitizedFilename {
    /// Sanitize a client-supplied filename.
    ///
    /// # Errors
    ///
    /// Returns `FilenameError::Empty` for an empty input and
    /// `FilenameError::NoSafeCharacters` when nothing usable remains.
    pub fn parse(raw: &str) -> Result<Self, FilenameError> {
        if raw.is_empty() {
            return Err(FilenameError::Empty);
        }

        let separated: String = raw
            .nfkd()
            .filter(char::is_ascii)
            .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
            .collect();

        let joined = separated.split_whitespace().collect::<Vec<_>>().join("_");
        let kept: String = joined.chars().filter(|&c| is_safe_char(c)).collect();
        let trimmed = kept.trim_matches(|c| c == '.' || c == '_');

        if trimmed.is_empty() {
            return Err(FilenameError::NoSafeCharacters);
        }

        Ok(Self(trimmed.to_owned()))
    }

    /// Returns the sanitized filename as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SanitizedFilename {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The on-disk name of an uploaded product image.
///
/// Generated names have the form `<32 hex chars>_<sanitized filename>`.
/// Names read back from the database are re-validated with
/// [`StoredImageName::parse`] before being joined onto the upload folder.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StoredImageName(String);

impl StoredImageName {
    /// Generate a fresh, unique storage name for an upload.
    #[must_use]
    pub fn generate(original: &SanitizedFilename) -> Self {
        Self(format!("{}_{}", Uuid::new_v4().simple(), original.as_str()))
    }

    /// Validate a stored name.
    ///
    /// # Errors
    ///
    /// Returns `FilenameError::Empty` for an empty name and
    /// `FilenameError::Unsafe` if the name starts with a dot or contains
    /// anything outside `[A-Za-z0-9_.-]`.
    pub fn parse(name: &str) -> Result<Self, FilenameError> {
        if name.is_empty() {
            return Err(FilenameError::Empty);
        }

        if name.starts_with('.') || !name.chars().all(is_safe_char) {
            return Err(FilenameError::Unsafe(name.to_owned()));
        }

        Ok(Self(name.to_owned()))
    }

    /// Returns the stored name as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `StoredImageName` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Display for StoredImageName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for StoredImageName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
