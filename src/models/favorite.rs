use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Category;

/// A user-saved snapshot of a catalog item.
///
/// Display fields are copied from the item at creation time, so a favorite
/// keeps rendering unchanged even if the catalog were ever reseeded with
/// different data. Favorites are inserted and deleted, never updated.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct Favorite {
    pub id: String,
    pub item_id: String,
    pub category: Category,
    pub name: String,
    pub name_ar: String,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub external_url: Option<String>,
    pub created_at: DateTime<Utc>,
}
