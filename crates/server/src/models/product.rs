//! Product domain types.

use vitrine_core::{Price, ProductId, StoredImageName};

/// A catalog product (domain type).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Product {
    /// Auto-incrementing product ID, never reused.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Free-form description.
    pub description: Option<String>,
    /// Price exactly as entered.
    pub price: Price,
    /// Storage name of the product image in the upload folder.
    pub image: Option<StoredImageName>,
}

impl Product {
    /// Public URL of the product image, if any.
    #[must_use]
    pub fn image_url(&self) -> Option<String> {
        self.image.as_ref().map(|name| format!("/uploads/{name}"))
    }
}

/// Fields required to insert a product.
#[derive(Debug, Clone)]
pub struct NewProduct {
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image: StoredImageName,
}
