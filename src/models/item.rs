use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use super::Category;
use crate::services::external_link::external_url;

/// A single catalog entry. Items are created by seeding and never mutated
/// or deleted afterwards.
///
/// `description` and `image_url` are carried on the wire for frontend
/// compatibility but are not populated by the seed dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Item {
    pub id: String,
    pub name: String,
    pub name_ar: String,
    pub category: Category,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub description: Option<String>,
    pub image_url: Option<String>,
}

impl Item {
    /// Shared SELECT prefix for the per-category catalog tables.
    pub(crate) fn select_from(category: Category) -> String {
        format!(
            "SELECT id, name, name_ar, category, year, genre, description, image_url FROM {}",
            category.as_str()
        )
    }
}

/// An item decorated with its computed external search link, the shape
/// returned by the suggestion and listing endpoints.
#[derive(Debug, Clone, Serialize)]
pub struct ItemWithLink {
    #[serde(flatten)]
    pub item: Item,
    pub external_url: String,
}

impl From<Item> for ItemWithLink {
    fn from(item: Item) -> Self {
        let external_url = external_url(&item.name, item.category);
        Self { item, external_url }
    }
}
