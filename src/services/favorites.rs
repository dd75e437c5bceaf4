use chrono::Utc;
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::error::{AppError, AppResult};
use crate::models::{Category, Favorite, Item};
use crate::services::external_link::external_url;

/// Most favorites ever returned by `list`.
const LIST_CAP: i64 = 100;

/// The favorites collection, keyed by source item id.
///
/// Deployment-global: there is no per-user scoping. A favorite snapshots the
/// item's display fields at creation time and is never mutated afterwards.
#[derive(Clone)]
pub struct FavoritesStore {
    pool: SqlitePool,
}

impl FavoritesStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Saves the item with `item_id` from `category` as a favorite.
    ///
    /// The duplicate check runs before the item lookup, so favoriting an
    /// already-saved id reports the conflict even when the category is wrong.
    /// Check and insert are two separate store round trips; two concurrent
    /// adds for the same item can both pass the check and insert twice.
    /// `remove` deletes by item_id, which clears any doubles.
    pub async fn add(&self, category: Category, item_id: &str) -> AppResult<Favorite> {
        if self.exists(item_id).await? {
            return Err(AppError::Conflict("موجود في المفضلة مسبقاً".to_string()));
        }

        let sql = format!("{} WHERE id = ?", Item::select_from(category));
        let item = sqlx::query_as::<_, Item>(&sql)
            .bind(item_id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound("العنصر غير موجود".to_string()))?;

        let favorite = Favorite {
            id: Uuid::new_v4().to_string(),
            item_id: item.id.clone(),
            category: item.category,
            name: item.name.clone(),
            name_ar: item.name_ar.clone(),
            year: item.year,
            genre: item.genre.clone(),
            external_url: Some(external_url(&item.name, item.category)),
            created_at: Utc::now(),
        };

        sqlx::query(
            "INSERT INTO favorites (id, item_id, category, name, name_ar, year, genre, external_url, created_at) \
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&favorite.id)
        .bind(&favorite.item_id)
        .bind(favorite.category)
        .bind(&favorite.name)
        .bind(&favorite.name_ar)
        .bind(favorite.year)
        .bind(favorite.genre.as_deref())
        .bind(favorite.external_url.as_deref())
        .bind(favorite.created_at)
        .execute(&self.pool)
        .await?;

        Ok(favorite)
    }

    /// Removes the favorite for `item_id`.
    pub async fn remove(&self, item_id: &str) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM favorites WHERE item_id = ?")
            .bind(item_id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(
                "العنصر غير موجود في المفضلة".to_string(),
            ));
        }
        Ok(())
    }

    /// All favorites, newest first, capped at 100 rows.
    pub async fn list(&self) -> AppResult<Vec<Favorite>> {
        let favorites = sqlx::query_as::<_, Favorite>(
            "SELECT id, item_id, category, name, name_ar, year, genre, external_url, created_at \
             FROM favorites ORDER BY created_at DESC LIMIT ?",
        )
        .bind(LIST_CAP)
        .fetch_all(&self.pool)
        .await?;
        Ok(favorites)
    }

    /// Whether `item_id` is currently favorited. Absence is not an error.
    pub async fn exists(&self, item_id: &str) -> AppResult<bool> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM favorites WHERE item_id = ?")
            .bind(item_id)
            .fetch_one(&self.pool)
            .await?;
        Ok(count > 0)
    }
}
