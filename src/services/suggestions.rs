use sqlx::{QueryBuilder, Sqlite, SqlitePool};

use crate::error::{AppError, AppResult};
use crate::models::{Category, Item};

/// Outcome of a selector run: the picked item plus the size of the
/// genre-filtered universe it was picked from, before exclusions.
#[derive(Debug)]
pub struct Selection {
    pub item: Item,
    pub total: i64,
}

/// Uniform random selection over a category.
///
/// The caller supplies the ids it has already seen; once that set covers the
/// whole (optionally genre-filtered) universe, the set is dropped for one
/// call and selection restarts from the full universe. No reset flag is
/// reported back; the caller restarts its own tracking from the returned
/// item onward.
#[derive(Clone)]
pub struct SuggestionSelector {
    pool: SqlitePool,
}

impl SuggestionSelector {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    /// Picks one random item from `category`.
    ///
    /// `genre` filters the universe by exact match. `total` in the returned
    /// selection counts the genre-filtered universe without exclusions, so
    /// the caller can render "item X of N" stably across a session.
    pub async fn suggest(
        &self,
        category: Category,
        exclude_ids: &[String],
        genre: Option<&str>,
    ) -> AppResult<Selection> {
        let total = self.count_matching(category, genre, &[]).await?;
        if total == 0 {
            return Err(AppError::NotFound(
                "لا توجد اقتراحات متاحة لهذا النوع".to_string(),
            ));
        }

        let available = self.count_matching(category, genre, exclude_ids).await?;

        // Exhausted universe: drop the exclusion set for this call only.
        let effective: &[String] = if available > 0 { exclude_ids } else { &[] };

        let item = self
            .pick_random(category, genre, effective)
            .await?
            .ok_or_else(|| AppError::NotFound("لا توجد اقتراحات متاحة".to_string()))?;

        Ok(Selection { item, total })
    }

    async fn count_matching(
        &self,
        category: Category,
        genre: Option<&str>,
        exclude_ids: &[String],
    ) -> AppResult<i64> {
        let mut query =
            QueryBuilder::<Sqlite>::new(format!("SELECT COUNT(*) FROM {}", category.as_str()));
        push_filters(&mut query, genre, exclude_ids);

        let count = query.build_query_scalar().fetch_one(&self.pool).await?;
        Ok(count)
    }

    async fn pick_random(
        &self,
        category: Category,
        genre: Option<&str>,
        exclude_ids: &[String],
    ) -> AppResult<Option<Item>> {
        let mut query = QueryBuilder::<Sqlite>::new(Item::select_from(category));
        push_filters(&mut query, genre, exclude_ids);
        // ORDER BY RANDOM() gives every matching row equal probability.
        query.push(" ORDER BY RANDOM() LIMIT 1");

        let item = query
            .build_query_as::<Item>()
            .fetch_optional(&self.pool)
            .await?;
        Ok(item)
    }
}

fn push_filters<'a>(
    query: &mut QueryBuilder<'a, Sqlite>,
    genre: Option<&'a str>,
    exclude_ids: &'a [String],
) {
    query.push(" WHERE 1 = 1");

    if let Some(genre) = genre {
        query.push(" AND genre = ").push_bind(genre);
    }

    if !exclude_ids.is_empty() {
        query.push(" AND id NOT IN (");
        let mut ids = query.separated(", ");
        for id in exclude_ids {
            ids.push_bind(id.as_str());
        }
        ids.push_unseparated(")");
    }
}
