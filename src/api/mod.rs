// HTTP 路由層：handler 只負責抓資料、交給查詢引擎、組 JSON，失敗狀態碼由 LibraryError 決定
pub mod error;
mod routes;

use crate::config::{ImageConfig, ServerConfig};
use crate::core::cache::CachedCatalogSource;
use crate::core::fetcher::HttpCatalogSource;
use crate::domain::ports::CatalogSource;
use crate::utils::error::Result;
use axum::{
    http::{header, Method},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

#[derive(Clone)]
pub struct AppState {
    pub source: Arc<dyn CatalogSource>,
    pub images: ImageConfig,
}

impl AppState {
    pub fn new(source: Arc<dyn CatalogSource>, images: ImageConfig) -> Self {
        Self { source, images }
    }

    /// HTTP 來源外包一層 TTL 快取 (ttl 為 0 時等同停用)
    pub fn from_config(config: &ServerConfig) -> Result<Self> {
        let http = HttpCatalogSource::new(
            config.source.url.clone(),
            config.source.timeout(),
            &config.source.user_agent,
        )?;
        let cached = CachedCatalogSource::new(
            http,
            config.cache.ttl(),
            config.cache.serve_stale_on_error,
        );
        if cached.is_enabled() {
            tracing::info!("Catalog cache enabled (ttl {}s)", config.cache.ttl_seconds);
        } else {
            tracing::info!("Catalog cache disabled, fetching on every request");
        }

        Ok(Self::new(Arc::new(cached), config.images.clone()))
    }
}

pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE]);

    Router::new()
        .route("/", get(routes::home))
        .route("/api/items", get(routes::list_items))
        .route("/api/items/filter", get(routes::filter_items))
        .route("/api/items/{id}", get(routes::get_item))
        .route("/api/image/{image_type}/{value}", get(routes::get_image_url))
        .route(
            "/api/rarity/{rarity}/background",
            get(routes::get_rarity_background),
        )
        .route("/api/health", get(routes::health))
        .fallback(routes::not_found)
        .with_state(state)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(error::panic_response))
}
