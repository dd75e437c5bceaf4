use std::collections::HashMap;

use serde::Deserialize;

use super::Category;

/// The versioned seed dataset embedded in the binary.
///
/// Parsed once at startup from `assets/seed_catalog.json` and handed to
/// `CatalogStore::seed`. The version is only logged today; it exists so a
/// future dataset revision can be told apart in deployment logs.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedCatalog {
    pub version: u32,
    pub categories: HashMap<Category, Vec<SeedItem>>,
}

/// One catalog entry as it appears in the seed asset, before an id is
/// assigned.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SeedItem {
    pub name: String,
    pub name_ar: String,
    #[serde(default)]
    pub year: Option<i32>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl SeedCatalog {
    /// Parses the dataset embedded in the binary.
    pub fn embedded() -> anyhow::Result<Self> {
        let catalog = serde_json::from_str(include_str!("../../assets/seed_catalog.json"))?;
        Ok(catalog)
    }

    /// Seed items for one category; empty when the dataset has none.
    pub fn items(&self, category: Category) -> &[SeedItem] {
        self.categories
            .get(&category)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }
}
