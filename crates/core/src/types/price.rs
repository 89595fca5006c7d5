//! Free-text product price.
//!
//! Prices are entered by the admin exactly as they should be displayed
//! ("120,000 Toman", "$19.99", "call us"). No numeric parsing or currency
//! handling is performed.

use core::fmt;

use serde::{Deserialize, Serialize};

/// A product price as entered by the admin.
///
/// The value is stored verbatim: no trimming, no length limit, no format
/// validation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Price(String);

impl Price {
    /// Wrap a price string.
    #[must_use]
    pub const fn new(value: String) -> Self {
        Self(value)
    }

    /// Returns the price as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the `Price` and returns its inner string.
    #[must_use]
    pub fn into_inner(self) -> String {
        self.0
    }

    /// Whether no price was entered.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for Price {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl From<&str> for Price {
    fn from(value: &str) -> Self {
        Self(value.to_owned())
    }
}

impl AsRef<str> for Price {
    fn as_ref(&self) -> &str {
        &self.0
    }
}
