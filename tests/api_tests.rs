use axum::http::StatusCode;
use axum_test::TestServer;
use serde_json::json;
use sqlx::sqlite::SqlitePoolOptions;
use sqlx::SqlitePool;

use eqtirah_api::api::{create_router, AppState};
use eqtirah_api::db;
use eqtirah_api::models::{Category, SeedCatalog};

async fn test_pool() -> SqlitePool {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await
        .unwrap();
    db::MIGRATOR.run(&pool).await.unwrap();
    pool
}

/// Server seeded with the full embedded dataset.
async fn create_test_server() -> TestServer {
    create_server_with(SeedCatalog::embedded().unwrap()).await
}

/// Server seeded with a small deterministic catalog.
async fn create_fixture_server() -> TestServer {
    let dataset: SeedCatalog = serde_json::from_value(json!({
        "version": 0,
        "categories": {
            "games": [
                {"name": "Alpha", "name_ar": "ألفا", "year": 2020, "genre": "أكشن"},
                {"name": "Beta", "name_ar": "بيتا", "year": 2021, "genre": "أكشن"},
                {"name": "Gamma", "name_ar": "جاما", "year": 2022, "genre": "ألغاز"}
            ],
            "movies": [
                {"name": "Drama One", "name_ar": "دراما واحد", "year": 1999, "genre": "دراما"},
                {"name": "Crime One", "name_ar": "جريمة واحد", "year": 2001, "genre": "أكشن/جريمة"},
                {"name": "No Genre", "name_ar": "بدون نوع", "year": 2005}
            ]
        }
    }))
    .unwrap();
    create_server_with(dataset).await
}

async fn create_server_with(dataset: SeedCatalog) -> TestServer {
    let pool = test_pool().await;
    let state = AppState::new(pool);
    state.catalog.seed(&dataset).await.unwrap();
    TestServer::new(create_router(state)).unwrap()
}

async fn game_ids(server: &TestServer) -> Vec<String> {
    let response = server.get("/api/all/games").await;
    response.assert_status_ok();
    let page: serde_json::Value = response.json();
    page["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|item| item["id"].as_str().unwrap().to_string())
        .collect()
}

#[tokio::test]
async fn test_health_check() {
    let server = create_fixture_server().await;
    let response = server.get("/health").await;
    response.assert_status_ok();
}

#[tokio::test]
async fn test_api_root_welcome() {
    let server = create_fixture_server().await;
    let response = server.get("/api/").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "مرحباً بك في موقع الاقتراحات العشوائية!");
}

#[tokio::test]
async fn test_categories_report_seeded_counts() {
    let server = create_test_server().await;
    let dataset = SeedCatalog::embedded().unwrap();

    let response = server.get("/api/categories").await;
    response.assert_status_ok();
    let categories: Vec<serde_json::Value> = response.json();
    assert_eq!(categories.len(), 4);

    for category in &categories {
        let id: Category = category["id"].as_str().unwrap().parse().unwrap();
        assert_eq!(
            category["count"].as_i64().unwrap(),
            dataset.items(id).len() as i64
        );
        assert!(category["name_ar"].as_str().unwrap().len() > 0);
    }
}

#[tokio::test]
async fn test_genres_sorted_with_nulls_excluded() {
    let server = create_fixture_server().await;

    let response = server.get("/api/genres/movies").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    // The null genre drops out and the rest sort ascending.
    assert_eq!(body["genres"], json!(["أكشن/جريمة", "دراما"]));
}

#[tokio::test]
async fn test_genres_unknown_category() {
    let server = create_fixture_server().await;
    let response = server.get("/api/genres/podcasts").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggest_reports_full_category_total() {
    let server = create_test_server().await;

    let response = server.get("/api/suggest/games").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["total_in_category"], 100);
    let suggestion = &body["suggestion"];
    assert!(suggestion["id"].as_str().unwrap().len() > 0);
    assert!(suggestion["name"].as_str().unwrap().len() > 0);
    assert!(suggestion["name_ar"].as_str().unwrap().len() > 0);
    assert_eq!(suggestion["category"], "games");
    assert!(suggestion["external_url"].as_str().unwrap().contains("+game"));
}

#[tokio::test]
async fn test_suggest_genre_filter_is_exact() {
    let server = create_fixture_server().await;

    for _ in 0..10 {
        let response = server
            .get("/api/suggest/games")
            .add_query_param("genre", "أكشن")
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        assert_eq!(body["suggestion"]["genre"], "أكشن");
        assert_eq!(body["total_in_category"], 2);
    }
}

#[tokio::test]
async fn test_suggest_empty_genre_means_no_filter() {
    let server = create_fixture_server().await;

    let response = server.get("/api/suggest/games?genre=").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["total_in_category"], 3);
}

#[tokio::test]
async fn test_suggest_walks_whole_catalog_then_resets() {
    let server = create_fixture_server().await;
    let all_ids = game_ids(&server).await;
    let mut seen: Vec<String> = Vec::new();

    // Growing the exclusion list walks every item exactly once.
    for _ in 0..all_ids.len() {
        let response = server
            .get(&format!("/api/suggest/games?exclude_ids={}", seen.join(",")))
            .await;
        response.assert_status_ok();
        let body: serde_json::Value = response.json();
        let id = body["suggestion"]["id"].as_str().unwrap().to_string();
        assert!(!seen.contains(&id));
        seen.push(id);
    }

    // Full coverage: the exclusion set is dropped instead of failing.
    let response = server
        .get(&format!("/api/suggest/games?exclude_ids={}", seen.join(",")))
        .await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(all_ids.contains(&body["suggestion"]["id"].as_str().unwrap().to_string()));
}

#[tokio::test]
async fn test_suggest_unknown_genre_has_no_content() {
    let server = create_fixture_server().await;
    let response = server
        .get("/api/suggest/games")
        .add_query_param("genre", "سباق")
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_suggest_unknown_category() {
    let server = create_fixture_server().await;
    let response = server.get("/api/suggest/podcasts").await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_items_pagination_echo() {
    let server = create_test_server().await;

    let response = server.get("/api/all/games?skip=10&limit=5").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();

    assert_eq!(body["total"], 100);
    assert_eq!(body["skip"], 10);
    assert_eq!(body["limit"], 5);
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 5);
    for item in items {
        assert!(item["external_url"].as_str().unwrap().starts_with("https://"));
    }
}

#[tokio::test]
async fn test_list_items_rejects_negative_paging() {
    let server = create_fixture_server().await;
    let response = server.get("/api/all/games?skip=-1").await;
    response.assert_status(StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_favorites_lifecycle() {
    let server = create_fixture_server().await;
    let ids = game_ids(&server).await;
    let item_id = &ids[0];

    // Not favorited yet.
    let response = server.get(&format!("/api/favorites/check/{item_id}")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["is_favorite"], false);

    // Add it.
    let response = server
        .post("/api/favorites")
        .json(&json!({ "item_id": item_id, "category": "games" }))
        .await;
    response.assert_status(StatusCode::CREATED);
    let favorite: serde_json::Value = response.json();
    assert_eq!(favorite["item_id"], *item_id);
    assert_eq!(favorite["name"], "Alpha");
    assert_eq!(favorite["name_ar"], "ألفا");
    assert!(favorite["external_url"].as_str().unwrap().contains("Alpha"));

    // Now reported as favorited and listed.
    let response = server.get(&format!("/api/favorites/check/{item_id}")).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["is_favorite"], true);

    let response = server.get("/api/favorites").await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["favorites"].as_array().unwrap().len(), 1);

    // A second add is rejected.
    let response = server
        .post("/api/favorites")
        .json(&json!({ "item_id": item_id, "category": "games" }))
        .await;
    response.assert_status(StatusCode::BAD_REQUEST);

    // Remove, then the check flips back and a re-remove is a 404.
    let response = server.delete(&format!("/api/favorites/{item_id}")).await;
    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert_eq!(body["message"], "تم الحذف من المفضلة");

    let response = server.get(&format!("/api/favorites/check/{item_id}")).await;
    let body: serde_json::Value = response.json();
    assert_eq!(body["is_favorite"], false);

    let response = server.delete(&format!("/api/favorites/{item_id}")).await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_favorites_newest_first() {
    let server = create_fixture_server().await;
    let ids = game_ids(&server).await;

    for item_id in &ids[..2] {
        let response = server
            .post("/api/favorites")
            .json(&json!({ "item_id": item_id, "category": "games" }))
            .await;
        response.assert_status(StatusCode::CREATED);
    }

    let response = server.get("/api/favorites").await;
    let body: serde_json::Value = response.json();
    let favorites = body["favorites"].as_array().unwrap();
    assert_eq!(favorites.len(), 2);
    assert_eq!(favorites[0]["item_id"], ids[1]);
    assert_eq!(favorites[1]["item_id"], ids[0]);
}

#[tokio::test]
async fn test_add_favorite_unknown_item() {
    let server = create_fixture_server().await;
    let response = server
        .post("/api/favorites")
        .json(&json!({ "item_id": "no-such-item", "category": "games" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_favorite_unknown_category() {
    let server = create_fixture_server().await;
    let response = server
        .post("/api/favorites")
        .json(&json!({ "item_id": "whatever", "category": "podcasts" }))
        .await;
    response.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_add_favorite_rejects_unknown_fields() {
    let server = create_fixture_server().await;
    let ids = game_ids(&server).await;
    let response = server
        .post("/api/favorites")
        .json(&json!({ "item_id": ids[0], "category": "games", "rating": 5 }))
        .await;
    response.assert_status(StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_status_check_roundtrip() {
    let server = create_fixture_server().await;

    let response = server
        .post("/api/status")
        .json(&json!({ "client_name": "test-suite" }))
        .await;
    response.assert_status_ok();
    let created: serde_json::Value = response.json();
    assert_eq!(created["client_name"], "test-suite");
    assert!(created["id"].as_str().unwrap().len() > 0);

    let response = server.get("/api/status").await;
    response.assert_status_ok();
    let checks: Vec<serde_json::Value> = response.json();
    assert_eq!(checks.len(), 1);
    assert_eq!(checks[0]["client_name"], "test-suite");
}
