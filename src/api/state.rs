use sqlx::SqlitePool;

use crate::services::{CatalogStore, FavoritesStore, StatusStore, SuggestionSelector};

/// Shared application state
///
/// Each component receives the pool by injection; there is no process-wide
/// store handle. The persistent store is the only state shared between
/// requests.
#[derive(Clone)]
pub struct AppState {
    pub catalog: CatalogStore,
    pub favorites: FavoritesStore,
    pub selector: SuggestionSelector,
    pub status: StatusStore,
}

impl AppState {
    /// Builds the component set on top of one shared pool.
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            catalog: CatalogStore::new(pool.clone()),
            favorites: FavoritesStore::new(pool.clone()),
            selector: SuggestionSelector::new(pool.clone()),
            status: StatusStore::new(pool),
        }
    }
}
