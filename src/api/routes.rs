use axum::{
    routing::{delete, get, post},
    Router,
};

use super::handlers;
use super::AppState;

/// Creates the main API router with all routes
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // axum's nested `/` route matches the bare prefix (`/api`) but not the
        // trailing-slash form (`/api/`) the spec/frontend uses; wire it here too.
        .route("/api/", get(handlers::root))
        .nest("/api", api_routes())
        .with_state(state)
}

/// Routes under the /api prefix consumed by the frontend
fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(handlers::root))
        // Catalog
        .route("/categories", get(handlers::get_categories))
        .route("/genres/:category", get(handlers::get_genres))
        .route("/suggest/:category", get(handlers::suggest))
        .route("/all/:category", get(handlers::list_items))
        // Favorites
        .route("/favorites", get(handlers::get_favorites))
        .route("/favorites", post(handlers::add_favorite))
        .route("/favorites/:item_id", delete(handlers::remove_favorite))
        .route("/favorites/check/:item_id", get(handlers::check_favorite))
        // Status checks
        .route("/status", get(handlers::get_status_checks))
        .route("/status", post(handlers::create_status_check))
}
