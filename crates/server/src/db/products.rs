//! Product repository for database operations.
//!
//! Each call runs a single statement; nothing here opens a transaction.

use sqlx::SqlitePool;

use vitrine_core::{Price, ProductId, StoredImageName};

use super::RepositoryError;
use crate::models::{NewProduct, Product};

/// Raw `products` row.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i64,
    name: String,
    description: Option<String>,
    price: Option<String>,
    image: Option<String>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        let image = row
            .image
            .filter(|name| !name.is_empty())
            .map(|name| StoredImageName::parse(&name))
            .transpose()
            .map_err(|e| {
                RepositoryError::DataCorruption(format!("invalid image name in database: {e}"))
            })?;

        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            description: row.description,
            price: row.price.map(Price::from).unwrap_or_default(),
            image,
        })
    }
}

/// Repository for product database operations.
pub struct ProductRepository<'a> {
    pool: &'a SqlitePool,
}

impl<'a> ProductRepository<'a> {
    /// Create a new product repository.
    #[must_use]
    pub const fn new(pool: &'a SqlitePool) -> Self {
        Self { pool }
    }

    /// List every product in insertion order.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if a stored image name is unsafe.
    pub async fn list_all(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, image FROM products ORDER BY id",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(Product::try_from).collect()
    }

    /// Get a product by its ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    /// Returns `RepositoryError::DataCorruption` if the stored image name is unsafe.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            "SELECT id, name, description, price, image FROM products WHERE id = ?",
        )
        .bind(id)
        .fetch_optional(self.pool)
        .await?;

        row.map(Product::try_from).transpose()
    }

    /// Insert a new product and return it with its assigned ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the insert fails.
    pub async fn create(&self, product: NewProduct) -> Result<Product, RepositoryError> {
        let result = sqlx::query(
            "INSERT INTO products (name, description, price, image) VALUES (?, ?, ?, ?)",
        )
        .bind(&product.name)
        .bind(&product.description)
        .bind(product.price.as_str())
        .bind(product.image.as_str())
        .execute(self.pool)
        .await?;

        Ok(Product {
            id: ProductId::new(result.last_insert_rowid()),
            name: product.name,
            description: Some(product.description),
            price: product.price,
            image: Some(product.image),
        })
    }

    /// Delete a product by ID.
    ///
    /// Returns `true` if a row was deleted, `false` if no product had that ID.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<bool, RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = ?")
            .bind(id)
            .execute(self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }

    /// Count all products.
    ///
    /// # Errors
    ///
    /// Returns `RepositoryError::Database` if the query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;
        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use vitrine_core::SanitizedFilename;

    use super::*;
    use crate::db::test_support::test_pool;

    fn new_product(name: &str, file: &str) -> NewProduct {
        NewProduct {
            name: name.to_string(),
            description: "A description".to_string(),
            price: Price::from("120,000"),
            image: StoredImageName::generate(&SanitizedFilename::parse(file).unwrap()),
        }
    }

    #[tokio::test]
    async fn test_create_and_list_in_insertion_order() {
        let (_dir, pool) = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let first = repo.create(new_product("Shoe", "shoe.png")).await.unwrap();
        let second = repo.create(new_product("Hat", "hat.jpg")).await.unwrap();

        let products = repo.list_all().await.unwrap();
        assert_eq!(products, vec![first, second]);
        assert_eq!(repo.count().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_get_by_id() {
        let (_dir, pool) = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let created = repo.create(new_product("Shoe", "shoe.png")).await.unwrap();
        let fetched = repo.get_by_id(created.id).await.unwrap().unwrap();

        assert_eq!(fetched.price.as_str(), "120,000");
        assert!(fetched.image_url().unwrap().ends_with("_shoe.png"));
        assert!(repo.get_by_id(ProductId::new(999)).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_delete_reports_whether_row_existed() {
        let (_dir, pool) = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let created = repo.create(new_product("Shoe", "shoe.png")).await.unwrap();
        assert!(repo.delete(created.id).await.unwrap());
        assert!(!repo.delete(created.id).await.unwrap());
        assert_eq!(repo.count().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_ids_are_not_reused() {
        let (_dir, pool) = test_pool().await;
        let repo = ProductRepository::new(&pool);

        let first = repo.create(new_product("Shoe", "shoe.png")).await.unwrap();
        repo.delete(first.id).await.unwrap();
        let second = repo.create(new_product("Shoe", "shoe.png")).await.unwrap();

        assert!(second.id.as_i64() > first.id.as_i64());
    }

    #[tokio::test]
    async fn test_unsafe_image_name_is_data_corruption() {
        let (_dir, pool) = test_pool().await;
        sqlx::query("INSERT INTO products (name, image) VALUES ('Bad', '../etc/passwd')")
            .execute(&pool)
            .await
            .unwrap();

        let result = ProductRepository::new(&pool).list_all().await;
        assert!(matches!(result, Err(RepositoryError::DataCorruption(_))));
    }
}
