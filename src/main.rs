//! Personal blog backend
//!
//! Serves the blog page and a small JSON API, persisting every post to one JSON file.

mod api;
mod config;
mod errors;
mod models;
mod service;
mod store;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::{Config, LogFormat};
use service::PostService;
use store::JsonFileStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub posts: Arc<PostService>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    init_tracing(&config);

    tracing::info!("Starting blog backend");
    tracing::info!("Bind address: {}", config.bind_addr);

    // Initialize storage
    let store = JsonFileStore::open(&config.data_path).await?;
    tracing::info!("Data path: {:?}", store.path());

    let state = AppState {
        posts: Arc::new(PostService::new(Arc::new(store))),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Serving at http://{}", listener.local_addr()?);

    axum::serve(listener, app).await?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    let registry = tracing_subscriber::registry().with(env_filter);
    match config.log_format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Text => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

/// Create the application router with all routes.
///
/// A known path requested with the wrong method is answered 404, like an unknown path.
/// Request bodies have no size limit.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(api::index).fallback(api::not_found))
        .route("/get", get(api::list_posts).fallback(api::not_found))
        .route("/save", post(api::save_post).fallback(api::not_found))
        .route("/delete", post(api::delete_post).fallback(api::not_found))
        .fallback(api::not_found)
        .layer(DefaultBodyLimit::disable())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
