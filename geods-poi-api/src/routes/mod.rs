//! HTTP routes and router configuration
mod image;
mod markers;
mod ref_data;
mod search;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    extract::State,
    http::{header::CACHE_CONTROL, HeaderValue, Method, StatusCode},
    middleware,
    routing::get,
    Json, Router,
};
use geods_poi_core::search::PoiSearch;
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

pub use search::{SearchParams, SearchResponse};

use crate::{
    app::ServerConfig,
    error::PoiApiError,
    gpkg::{self, GeoPackageRowSource, RefData},
    http_metrics::{self, HttpMetrics},
    image::ImageLookup,
    markers::MarkerCatalog,
};

pub const API_PREFIX: &str = "/v1/geods-poi";
const MARKER_CACHE_CONTROL: &str = "public, max-age=31536000, immutable";

/// state shared by every request
pub struct AppState {
    pub search: PoiSearch<GeoPackageRowSource>,
    pub ref_data: RefData,
    pub markers: MarkerCatalog,
    pub images: ImageLookup,
    pub metrics: HttpMetrics,
}

impl AppState {
    /// opens the database and computes everything served from memory. any
    /// failure here aborts start-up.
    pub async fn load(config: &ServerConfig) -> Result<Self, PoiApiError> {
        let pool = gpkg::open_pool(&config.db, config.max_connections).await?;
        let ref_data = RefData::load(&pool, config.attribution.clone()).await?;
        let markers = MarkerCatalog::load(&config.marker_mappings, &config.markers_dir)?;
        let images = ImageLookup::new(&config.image)?;
        let search = PoiSearch::new(GeoPackageRowSource::new(pool), config.search);
        log::info!("search options: {:?}", search.options());
        Ok(Self {
            search,
            ref_data,
            markers,
            images,
            metrics: HttpMetrics::new(),
        })
    }
}

/// Build the main application router
pub fn build_router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    let marker_routes = Router::new()
        .route("/marker/shadow", get(markers::shadow))
        .route("/marker/:category", get(markers::marker))
        .layer(SetResponseHeaderLayer::overriding(
            CACHE_CONTROL,
            HeaderValue::from_static(MARKER_CACHE_CONTROL),
        ));

    let api_routes = Router::new()
        .route("/search", get(search::search))
        .route("/ref-data", get(ref_data::ref_data))
        .route("/image/:category", get(image::image))
        .merge(marker_routes)
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            http_metrics::track,
        ));

    // health checks and scrapes are not instrumented
    Router::new()
        .nest(API_PREFIX, api_routes)
        .route("/healthz", get(healthz))
        .route("/metrics", get(http_metrics::render))
        .with_state(state)
        .layer(TimeoutLayer::new(request_timeout))
        .layer(CompressionLayer::new())
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods([Method::GET])
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
}

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

async fn healthz(State(state): State<Arc<AppState>>) -> (StatusCode, Json<HealthResponse>) {
    match gpkg::ping(state.search.source().pool()).await {
        Ok(()) => (StatusCode::OK, Json(HealthResponse { status: "ok" })),
        Err(e) => {
            log::error!("health check failed: {e}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthResponse {
                    status: "unavailable",
                }),
            )
        }
    }
}

/// loads the application state and serves the API until Ctrl-C.
pub async fn serve(config: ServerConfig) -> Result<(), PoiApiError> {
    let state = Arc::new(AppState::load(&config).await?);
    let router = build_router(state, config.request_timeout);

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(addr).await.map_err(|e| {
        PoiApiError::ServerError(format!("failed to bind to {addr}: {e}"))
    })?;
    log::info!("starting HTTP API server on port {}", config.port);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| PoiApiError::ServerError(e.to_string()))?;
    log::info!("HTTP API server stopped");
    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => log::info!("shutdown signal received"),
        Err(e) => {
            log::error!("unable to listen for shutdown signal: {e}");
            std::future::pending::<()>().await
        }
    }
}
