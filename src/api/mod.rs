pub mod errors;
pub mod models;
pub mod routes;

use std::sync::Arc;

use axum::Router;
use dashmap::DashMap;
use tower::ServiceBuilder;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::config::DeckConfig;
use crate::db::Database;
use crate::errors::DeckError;
use crate::lifecycle::{Clock, SystemClock, WatchSession};
use crate::storage::FileStore;

#[derive(Clone)]
pub struct AppState {
    pub db: Database,
    pub files: FileStore,
    pub clock: Arc<dyn Clock>,
    /// Live tick sessions, one per watched scan. Entries are removed (and
    /// their tick loops cancelled) on explicit stop or scan deletion.
    pub watchers: Arc<DashMap<String, Arc<WatchSession>>>,
    pub tick_interval: std::time::Duration,
}

pub fn create_app_state(config: &DeckConfig) -> Result<AppState, DeckError> {
    let db = Database::new(
        config
            .db_path()
            .to_str()
            .ok_or_else(|| DeckError::Config("Non-UTF-8 data dir".to_string()))?,
    )?;
    let files = FileStore::new(config.files_dir())?;
    Ok(AppState {
        db,
        files,
        clock: Arc::new(SystemClock),
        watchers: Arc::new(DashMap::new()),
        tick_interval: config.tick_interval(),
    })
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/api/health", axum::routing::get(routes::health::health_check))
        .route(
            "/api/scans",
            axum::routing::post(routes::scans::create_scan).get(routes::scans::list_scans),
        )
        .route(
            "/api/scans/:id",
            axum::routing::get(routes::scans::get_scan).delete(routes::scans::delete_scan),
        )
        .route("/api/scans/:id/view", axum::routing::get(routes::views::get_view))
        .route("/api/scans/:id/file", axum::routing::get(routes::views::get_file))
        .route(
            "/api/scans/:id/watch",
            axum::routing::post(routes::views::open_watch)
                .get(routes::views::poll_watch)
                .delete(routes::views::stop_watch),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
        .with_state(state)
}
