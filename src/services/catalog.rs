use serde::Serialize;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::AppResult;
use crate::models::{Category, Item, SeedCatalog};

/// Summary row returned by the categories endpoint.
#[derive(Debug, Serialize)]
pub struct CategorySummary {
    pub id: &'static str,
    pub name: &'static str,
    pub name_ar: &'static str,
    pub count: i64,
}

/// Read side of the catalog, plus one-time seeding.
///
/// Items are written exactly once, by `seed`, and only read afterwards. The
/// pool is injected so tests can point the store at an in-memory database.
#[derive(Clone)]
pub struct CatalogStore {
    pool: SqlitePool,
}

impl CatalogStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Inserts the seed dataset into every empty category table.
    ///
    /// A non-empty table is left untouched, which makes seeding idempotent
    /// across restarts. The check is count-only and rows are inserted
    /// individually, so a crash mid-seed leaves a short table that is never
    /// repaired automatically.
    pub async fn seed(&self, dataset: &SeedCatalog) -> AppResult<()> {
        for category in Category::ALL {
            if self.count(category).await? > 0 {
                continue;
            }

            let items = dataset.items(category);
            let sql = format!(
                "INSERT INTO {} (id, name, name_ar, category, year, genre, description, image_url) \
                 VALUES (?, ?, ?, ?, ?, ?, NULL, NULL)",
                category.as_str()
            );
            for entry in items {
                sqlx::query(&sql)
                    .bind(Uuid::new_v4().to_string())
                    .bind(&entry.name)
                    .bind(&entry.name_ar)
                    .bind(category)
                    .bind(entry.year)
                    .bind(entry.genre.as_deref())
                    .execute(&self.pool)
                    .await?;
            }

            tracing::info!(
                category = %category,
                items = items.len(),
                version = dataset.version,
                "seeded catalog"
            );
        }
        Ok(())
    }

    /// Number of items stored for a category.
    pub async fn count(&self, category: Category) -> AppResult<i64> {
        let sql = format!("SELECT COUNT(*) FROM {}", category.as_str());
        let count = sqlx::query_scalar(&sql).fetch_one(&self.pool).await?;
        Ok(count)
    }

    /// Every category with its canonical name, Arabic name, and item count.
    pub async fn list_categories(&self) -> AppResult<Vec<CategorySummary>> {
        let mut summaries = Vec::with_capacity(Category::ALL.len());
        for category in Category::ALL {
            summaries.push(CategorySummary {
                id: category.as_str(),
                name: category.as_str(),
                name_ar: category.name_ar(),
                count: self.count(category).await?,
            });
        }
        Ok(summaries)
    }

    /// Distinct non-empty genres in a category, ascending.
    pub async fn list_genres(&self, category: Category) -> AppResult<Vec<String>> {
        let sql = format!(
            "SELECT DISTINCT genre FROM {} WHERE genre IS NOT NULL AND genre != '' ORDER BY genre",
            category.as_str()
        );
        let genres = sqlx::query_scalar(&sql).fetch_all(&self.pool).await?;
        Ok(genres)
    }

    /// One page of items in insertion order, plus the unpaged total.
    pub async fn list_items(
        &self,
        category: Category,
        skip: i64,
        limit: i64,
    ) -> AppResult<(Vec<Item>, i64)> {
        let total = self.count(category).await?;

        let sql = format!(
            "{} ORDER BY rowid LIMIT ? OFFSET ?",
            Item::select_from(category)
        );
        let items = sqlx::query_as::<_, Item>(&sql)
            .bind(limit)
            .bind(skip)
            .fetch_all(&self.pool)
            .await?;

        Ok((items, total))
    }
}
