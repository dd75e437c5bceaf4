use axum::http::{header, HeaderValue, Method};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use eqtirah_api::api::{create_router, AppState};
use eqtirah_api::config::Config;
use eqtirah_api::db;
use eqtirah_api::middleware::request_id;
use eqtirah_api::models::SeedCatalog;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::from_env()?;

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Connect, migrate, and seed before accepting any traffic. A failure
    // here aborts startup; there is no partial-start mode.
    let pool = db::create_pool(&config.database_url).await?;
    let state = AppState::new(pool.clone());
    state.catalog.seed(&SeedCatalog::embedded()?).await?;

    let app = create_router(state)
        .layer(TraceLayer::new_for_http().make_span_with(request_id::make_span))
        .layer(axum::middleware::from_fn(request_id::request_id_middleware))
        .layer(cors_layer(&config.cors_origins));

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // The pool is the only teardown the service owns.
    pool.close().await;

    Ok(())
}

/// Builds the CORS layer from the configured origin list.
///
/// A wildcard cannot be combined with credentials, so the two modes are
/// assembled separately.
fn cors_layer(origins: &str) -> CorsLayer {
    if origins.trim() == "*" {
        return CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
    }

    let origins: Vec<HeaderValue> = origins
        .split(',')
        .filter_map(|origin| origin.trim().parse().ok())
        .collect();

    CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE])
        .allow_credentials(true)
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
}
