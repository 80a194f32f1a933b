//! Product repository for catalog database operations.

use chrono::{DateTime, Utc};
use sqlx::PgPool;

use unique_items_core::{ProductId, ProductStatus};

use super::RepositoryError;
use crate::models::product::{NewProduct, Product, ProductChanges};

// =============================================================================
// Internal Row Types
// =============================================================================

/// Internal row type for `PostgreSQL` product queries.
#[derive(Debug, sqlx::FromRow)]
struct ProductRow {
    id: i32,
    name: String,
    slug: String,
    price: i64,
    old_price: Option<i64>,
    category: String,
    collection: String,
    description: String,
    images: Vec<String>,
    colors: Vec<String>,
    status: String,
    in_stock: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl TryFrom<ProductRow> for Product {
    type Error = RepositoryError;

    fn try_from(row: ProductRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: ProductId::new(row.id),
            name: row.name,
            slug: row.slug,
            price: unique_items_core::Rupees::new(row.price),
            old_price: row.old_price.map(unique_items_core::Rupees::new),
            category: row.category.parse().map_err(RepositoryError::DataCorruption)?,
            collection: row.collection.parse().map_err(RepositoryError::DataCorruption)?,
            description: row.description,
            images: row.images,
            colors: row.colors,
            status: row.status.parse().map_err(RepositoryError::DataCorruption)?,
            in_stock: row.in_stock,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }
}

// =============================================================================
// Repository
// =============================================================================

/// Filters for the admin product listing.
#[derive(Debug, Clone, Copy)]
pub struct ProductListFilter<'a> {
    /// Restrict to one publication status, or list every status.
    pub status: Option<ProductStatus>,
    /// Case-insensitive substring over name, slug, category, and collection.
    pub q: Option<&'a str>,
    /// Maximum number of rows returned, newest first.
    pub limit: i64,
}

/// Repository for product database operations.
#[derive(Debug, Clone, Copy)]
pub struct ProductRepository<'a> {
    pool: &'a PgPool,
}

impl<'a> ProductRepository<'a> {
    /// Creates a new repository with the given database pool.
    #[must_use]
    pub const fn new(pool: &'a PgPool) -> Self {
        Self { pool }
    }

    /// Lists published products, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is invalid.
    pub async fn list_published(&self) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, slug, price, old_price, category, collection,
                   description, images, colors, status, in_stock, created_at, updated_at
            FROM products
            WHERE status = 'published'
            ORDER BY created_at DESC
            ",
        )
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Finds a published product by slug.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is invalid.
    pub async fn get_published_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, slug, price, old_price, category, collection,
                   description, images, colors, status, in_stock, created_at, updated_at
            FROM products
            WHERE slug = $1 AND status = 'published'
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Finds a product by ID regardless of status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is invalid.
    pub async fn get_by_id(&self, id: ProductId) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, slug, price, old_price, category, collection,
                   description, images, colors, status, in_stock, created_at, updated_at
            FROM products
            WHERE id = $1
            ",
        )
        .bind(id.as_i32())
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Finds a product by slug regardless of status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the row is invalid.
    pub async fn get_by_slug(&self, slug: &str) -> Result<Option<Product>, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, slug, price, old_price, category, collection,
                   description, images, colors, status, in_stock, created_at, updated_at
            FROM products
            WHERE slug = $1
            ",
        )
        .bind(slug)
        .fetch_optional(self.pool)
        .await?;

        row.map(TryInto::try_into).transpose()
    }

    /// Lists products for the admin console, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or a row is invalid.
    pub async fn list(
        &self,
        filter: &ProductListFilter<'_>,
    ) -> Result<Vec<Product>, RepositoryError> {
        let rows = sqlx::query_as::<_, ProductRow>(
            r"
            SELECT id, name, slug, price, old_price, category, collection,
                   description, images, colors, status, in_stock, created_at, updated_at
            FROM products
            WHERE ($1::text IS NULL OR status = $1)
              AND ($2::text IS NULL
                   OR name ILIKE '%' || $2 || '%'
                   OR slug ILIKE '%' || $2 || '%'
                   OR category ILIKE '%' || $2 || '%'
                   OR collection ILIKE '%' || $2 || '%')
            ORDER BY created_at DESC
            LIMIT $3
            ",
        )
        .bind(filter.status.map(|s| s.as_str()))
        .bind(filter.q)
        .bind(filter.limit)
        .fetch_all(self.pool)
        .await?;

        rows.into_iter().map(TryInto::try_into).collect()
    }

    /// Creates a product.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::Conflict`] if the slug is already taken,
    /// or another error if the insert fails.
    pub async fn create(&self, new: &NewProduct) -> Result<Product, RepositoryError> {
        let row = sqlx::query_as::<_, ProductRow>(
            r"
            INSERT INTO products (name, slug, price, old_price, category, collection,
                                  description, images, colors, status, in_stock)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            RETURNING id, name, slug, price, old_price, category, collection,
                      description, images, colors, status, in_stock, created_at, updated_at
            ",
        )
        .bind(&new.name)
        .bind(&new.slug)
        .bind(new.price.amount())
        .bind(new.old_price.map(|p| p.amount()))
        .bind(new.category.as_str())
        .bind(new.collection.as_str())
        .bind(&new.description)
        .bind(&new.images)
        .bind(&new.colors)
        .bind(new.status.as_str())
        .bind(new.in_stock)
        .fetch_one(self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(ref db_err) = e
                && db_err.is_unique_violation()
            {
                return RepositoryError::Conflict("slug already exists".to_owned());
            }
            RepositoryError::Database(e)
        })?;

        row.try_into()
    }

    /// Applies a partial update to a product.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no product has the given ID,
    /// or another error if the update fails.
    pub async fn update(
        &self,
        id: ProductId,
        changes: &ProductChanges,
    ) -> Result<Product, RepositoryError> {
        let old_price_value = changes.old_price.flatten().map(|p| p.amount());
        let clear_old_price = matches!(changes.old_price, Some(None));

        let row = sqlx::query_as::<_, ProductRow>(
            r"
            UPDATE products
            SET name = COALESCE($2, name),
                price = COALESCE($3, price),
                old_price = CASE WHEN $5 THEN NULL ELSE COALESCE($4, old_price) END,
                category = COALESCE($6, category),
                collection = COALESCE($7, collection),
                description = COALESCE($8, description),
                images = COALESCE($9, images),
                colors = COALESCE($10, colors),
                status = COALESCE($11, status),
                in_stock = COALESCE($12, in_stock),
                updated_at = NOW()
            WHERE id = $1
            RETURNING id, name, slug, price, old_price, category, collection,
                      description, images, colors, status, in_stock, created_at, updated_at
            ",
        )
        .bind(id.as_i32())
        .bind(changes.name.as_deref())
        .bind(changes.price.map(|p| p.amount()))
        .bind(old_price_value)
        .bind(clear_old_price)
        .bind(changes.category.map(|c| c.as_str()))
        .bind(changes.collection.map(|c| c.as_str()))
        .bind(changes.description.as_deref())
        .bind(changes.images.as_deref())
        .bind(changes.colors.as_deref())
        .bind(changes.status.map(|s| s.as_str()))
        .bind(changes.in_stock)
        .fetch_optional(self.pool)
        .await?
        .ok_or(RepositoryError::NotFound)?;

        row.try_into()
    }

    /// Deletes a product.
    ///
    /// # Errors
    ///
    /// Returns [`RepositoryError::NotFound`] if no product has the given ID,
    /// or another error if the delete fails.
    pub async fn delete(&self, id: ProductId) -> Result<(), RepositoryError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id.as_i32())
            .execute(self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(RepositoryError::NotFound);
        }

        Ok(())
    }

    /// Counts every product regardless of status.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count(&self) -> Result<i64, RepositoryError> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products")
            .fetch_one(self.pool)
            .await?;

        Ok(count)
    }

    /// Counts products currently marked out of stock.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn count_out_of_stock(&self) -> Result<i64, RepositoryError> {
        let count =
            sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM products WHERE NOT in_stock")
                .fetch_one(self.pool)
                .await?;

        Ok(count)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use unique_items_core::{ProductCategory, Rupees};

    fn sample_row() -> ProductRow {
        ProductRow {
            id: 7,
            name: "Chrono Steel".to_owned(),
            slug: "chrono-steel".to_owned(),
            price: 4500,
            old_price: Some(5200),
            category: "men".to_owned(),
            collection: "luxury".to_owned(),
            description: String::new(),
            images: vec!["https://img.example.com/chrono-steel.jpg".to_owned()],
            colors: vec!["black".to_owned(), "silver".to_owned()],
            status: "published".to_owned(),
            in_stock: true,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_row_converts_to_product() {
        let product = Product::try_from(sample_row()).unwrap();
        assert_eq!(product.id, ProductId::new(7));
        assert_eq!(product.price, Rupees::new(4500));
        assert_eq!(product.old_price, Some(Rupees::new(5200)));
        assert_eq!(product.category, ProductCategory::Men);
        assert_eq!(product.status, ProductStatus::Published);
    }

    #[test]
    fn test_row_with_unknown_category_is_corruption() {
        let mut row = sample_row();
        row.category = "gadgets".to_owned();

        let err = Product::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }

    #[test]
    fn test_row_with_unknown_status_is_corruption() {
        let mut row = sample_row();
        row.status = "archived".to_owned();

        let err = Product::try_from(row).unwrap_err();
        assert!(matches!(err, RepositoryError::DataCorruption(_)));
    }
}
