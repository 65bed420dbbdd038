pub mod config;
pub mod db;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;

use std::sync::Arc;

use axum::{
    http::{header, Method},
    routing::{get, put},
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use config::Config;
use services::announcements::AnnouncementService;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub announcements: AnnouncementService,
    pub config: Arc<Config>,
}

pub fn router(state: AppState) -> Router {
    let allow_origin = match &state.config.cors_allowed_origin {
        Some(origin) => AllowOrigin::exact(origin.clone()),
        None => AllowOrigin::from(Any),
    };

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE, Method::OPTIONS])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
        .allow_origin(allow_origin);

    Router::new()
        .route("/health", get(routes::health::health_check))
        .route("/metrics", get(routes::metrics::metrics_handler))
        .route("/announcements/active", get(routes::announcements::list_active))
        .route(
            "/announcements",
            get(routes::announcements::list_all).post(routes::announcements::create_announcement),
        )
        .route(
            "/announcements/{id}",
            put(routes::announcements::update_announcement)
                .delete(routes::announcements::delete_announcement),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
