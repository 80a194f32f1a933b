//! Seed the catalog with sample products for local development.
//!
//! Inserts a deterministic set of published watches so the storefront has
//! something to render on a fresh database. Reruns skip slugs that already
//! exist instead of failing, so the command is safe to repeat.
//!
//! # Usage
//!
//! ```bash
//! unique-items seed products --count 12
//! ```
//!
//! # Environment Variables
//!
//! - `UNIQUE_ITEMS_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL`
//!   connection string

use thiserror::Error;
use tracing::info;

use unique_items_core::{ProductCategory, ProductCollection, ProductStatus, Rupees};
use unique_items_server::db::{ProductRepository, RepositoryError, create_pool};
use unique_items_server::models::product::NewProduct;

/// Errors that can occur while seeding.
#[derive(Debug, Error)]
pub enum SeedError {
    /// Required environment variable is missing.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(&'static str),

    /// Database connection error.
    #[error("Database connection error: {0}")]
    Database(#[from] sqlx::Error),

    /// Insert failed for a reason other than a duplicate slug.
    #[error("Seeding failed: {0}")]
    Repository(#[from] RepositoryError),
}

const WATCH_NAMES: [&str; 12] = [
    "Aurora Rose",
    "Meridian Steel",
    "Nocturne Black",
    "Harbor Classic",
    "Solstice Gold",
    "Cascade Silver",
    "Ember Chrono",
    "Atlas Field",
    "Lumen Minimal",
    "Vesper Slate",
    "Orion Racer",
    "Willow Pearl",
];

const CATEGORIES: [ProductCategory; 5] = [
    ProductCategory::Men,
    ProductCategory::Women,
    ProductCategory::Kids,
    ProductCategory::Sport,
    ProductCategory::Couplewatches,
];

const COLLECTIONS: [ProductCollection; 4] = [
    ProductCollection::Classic,
    ProductCollection::Minimal,
    ProductCollection::Luxury,
    ProductCollection::Sport,
];

const COLOR_SETS: [&[&str]; 4] = [&["black", "silver"], &["gold", "rose gold"], &["blue"], &[]];

/// Insert `count` sample published watches.
///
/// # Errors
///
/// Returns an error if environment variables are missing or database
/// operations fail. Duplicate slugs are skipped, not errors.
pub async fn products(count: u32) -> Result<(), SeedError> {
    dotenvy::dotenv().ok();

    let database_url = crate::commands::database_url()
        .ok_or(SeedError::MissingEnvVar("UNIQUE_ITEMS_DATABASE_URL"))?;

    info!("Connecting to database...");
    let pool = create_pool(&database_url).await?;
    let repo = ProductRepository::new(&pool);

    let mut inserted = 0u32;
    let mut skipped = 0u32;

    for index in 0..count {
        let new = sample_product(index);
        match repo.create(&new).await {
            Ok(product) => {
                inserted += 1;
                info!("  {} ({})", product.name, product.slug);
            }
            Err(RepositoryError::Conflict(_)) => {
                skipped += 1;
                info!("  {} already present, skipping", new.slug);
            }
            Err(e) => return Err(e.into()),
        }
    }

    info!("Seeding complete!");
    info!("  Products inserted: {inserted}");
    info!("  Products skipped (already exist): {skipped}");

    Ok(())
}

/// Build the sample watch at `index`.
///
/// Names repeat with a series suffix once the base list runs out, so any
/// `count` produces unique slugs.
#[allow(clippy::indexing_slicing)] // every index is taken modulo the list length
fn sample_product(index: u32) -> NewProduct {
    let idx = index as usize;
    let base = WATCH_NAMES[idx % WATCH_NAMES.len()];
    let series = idx / WATCH_NAMES.len() + 1;
    let name = if series > 1 {
        format!("{base} {series}")
    } else {
        base.to_owned()
    };
    let slug = name.to_lowercase().replace(' ', "-");
    let price = Rupees::new(1_800 + i64::from(index % 6) * 350);
    let old_price = (index % 3 == 0).then(|| price + Rupees::new(500));
    let collection = COLLECTIONS[idx % COLLECTIONS.len()];
    let description = format!("{name} wrist watch from the {} collection.", collection.as_str());
    let images = vec![format!("https://placehold.co/600x600?text={slug}")];
    let colors = COLOR_SETS[idx % COLOR_SETS.len()]
        .iter()
        .map(|color| (*color).to_owned())
        .collect();

    NewProduct {
        name,
        slug,
        price,
        old_price,
        category: CATEGORIES[idx % CATEGORIES.len()],
        collection,
        description,
        images,
        colors,
        status: ProductStatus::Published,
        in_stock: index % 7 != 6,
    }
}
