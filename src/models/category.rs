use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// The closed set of content categories served by the catalog.
///
/// Each category maps to exactly one catalog table and one Arabic display
/// name. Anything outside this set is rejected at the API boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(rename_all = "lowercase")]
pub enum Category {
    Games,
    Movies,
    Series,
    Youtube,
}

impl Category {
    /// All categories, in display order.
    pub const ALL: [Category; 4] = [
        Category::Games,
        Category::Movies,
        Category::Series,
        Category::Youtube,
    ];

    /// Canonical lowercase name, which is also the catalog table name.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Games => "games",
            Category::Movies => "movies",
            Category::Series => "series",
            Category::Youtube => "youtube",
        }
    }

    /// Arabic display name shown by the frontend.
    pub fn name_ar(self) -> &'static str {
        match self {
            Category::Games => "ألعاب",
            Category::Movies => "أفلام",
            Category::Series => "مسلسلات",
            Category::Youtube => "يوتيوب",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "games" => Ok(Category::Games),
            "movies" => Ok(Category::Movies),
            "series" => Ok(Category::Series),
            "youtube" => Ok(Category::Youtube),
            _ => Err(AppError::NotFound("الفئة غير موجودة".to_string())),
        }
    }
}
