use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::{AppError, AppResult};
use crate::models::{Category, Favorite, ItemWithLink, StatusCheck};
use crate::services::catalog::CategorySummary;

use super::AppState;

// Request/Response types

/// Query parameters for the suggestion endpoint.
#[derive(Debug, Default, Deserialize)]
pub struct SuggestParams {
    /// Comma-separated item ids the caller has already seen.
    #[serde(default)]
    pub exclude_ids: String,
    /// Exact-match genre filter. Empty means "no filter".
    #[serde(default)]
    pub genre: String,
}

#[derive(Debug, Deserialize)]
pub struct PageParams {
    #[serde(default)]
    pub skip: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

fn default_limit() -> i64 {
    20
}

#[derive(Debug, Serialize)]
pub struct SuggestionResponse {
    pub suggestion: ItemWithLink,
    pub total_in_category: i64,
}

#[derive(Debug, Serialize)]
pub struct GenresResponse {
    pub genres: Vec<String>,
}

#[derive(Debug, Serialize)]
pub struct ItemPage {
    pub items: Vec<ItemWithLink>,
    pub total: i64,
    pub skip: i64,
    pub limit: i64,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FavoriteCreate {
    pub item_id: String,
    pub category: String,
}

#[derive(Debug, Serialize)]
pub struct FavoritesResponse {
    pub favorites: Vec<Favorite>,
}

#[derive(Debug, Serialize)]
pub struct FavoriteCheckResponse {
    pub is_favorite: bool,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> StatusCode {
    StatusCode::OK
}

/// Welcome message at the API root
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "مرحباً بك في موقع الاقتراحات العشوائية!" }))
}

/// All categories with their item counts
pub async fn get_categories(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<CategorySummary>>> {
    Ok(Json(state.catalog.list_categories().await?))
}

/// Distinct genres available in one category
pub async fn get_genres(
    State(state): State<AppState>,
    Path(category): Path<String>,
) -> AppResult<Json<GenresResponse>> {
    let category: Category = category.parse()?;
    let genres = state.catalog.list_genres(category).await?;
    Ok(Json(GenresResponse { genres }))
}

/// Random suggestion, honoring the caller's exclusion list and genre filter
pub async fn suggest(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<SuggestParams>,
) -> AppResult<Json<SuggestionResponse>> {
    let category: Category = category.parse()?;

    let exclude_ids: Vec<String> = params
        .exclude_ids
        .split(',')
        .filter(|id| !id.is_empty())
        .map(str::to_string)
        .collect();
    // An empty genre parameter means "no filter", never "genre is empty".
    let genre = (!params.genre.is_empty()).then_some(params.genre.as_str());

    let selection = state.selector.suggest(category, &exclude_ids, genre).await?;

    Ok(Json(SuggestionResponse {
        suggestion: selection.item.into(),
        total_in_category: selection.total,
    }))
}

/// One page of a category's items
pub async fn list_items(
    State(state): State<AppState>,
    Path(category): Path<String>,
    Query(params): Query<PageParams>,
) -> AppResult<Json<ItemPage>> {
    let category: Category = category.parse()?;
    if params.skip < 0 || params.limit < 0 {
        return Err(AppError::InvalidInput(
            "skip and limit must be non-negative".to_string(),
        ));
    }

    let (items, total) = state
        .catalog
        .list_items(category, params.skip, params.limit)
        .await?;

    Ok(Json(ItemPage {
        items: items.into_iter().map(ItemWithLink::from).collect(),
        total,
        skip: params.skip,
        limit: params.limit,
    }))
}

/// Add an item to favorites
pub async fn add_favorite(
    State(state): State<AppState>,
    Json(request): Json<FavoriteCreate>,
) -> AppResult<(StatusCode, Json<Favorite>)> {
    let category: Category = request.category.parse()?;
    let favorite = state.favorites.add(category, &request.item_id).await?;
    Ok((StatusCode::CREATED, Json(favorite)))
}

/// Remove an item from favorites
pub async fn remove_favorite(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<Value>> {
    state.favorites.remove(&item_id).await?;
    Ok(Json(json!({ "message": "تم الحذف من المفضلة" })))
}

/// All favorites, newest first
pub async fn get_favorites(State(state): State<AppState>) -> AppResult<Json<FavoritesResponse>> {
    let favorites = state.favorites.list().await?;
    Ok(Json(FavoritesResponse { favorites }))
}

/// Whether an item is currently favorited
pub async fn check_favorite(
    State(state): State<AppState>,
    Path(item_id): Path<String>,
) -> AppResult<Json<FavoriteCheckResponse>> {
    let is_favorite = state.favorites.exists(&item_id).await?;
    Ok(Json(FavoriteCheckResponse { is_favorite }))
}

/// Record a deployment status ping
pub async fn create_status_check(
    State(state): State<AppState>,
    Json(request): Json<StatusCheckCreate>,
) -> AppResult<Json<StatusCheck>> {
    Ok(Json(state.status.create(&request.client_name).await?))
}

/// Recorded status pings
pub async fn get_status_checks(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<StatusCheck>>> {
    Ok(Json(state.status.list().await?))
}
