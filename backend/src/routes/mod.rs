//! Route definitions for the AgriSights field monitor

use axum::{
    routing::{get, post, put},
    Router,
};

use crate::{handlers, AppState};

/// Create API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(handlers::health_check))
        .route("/session", get(handlers::get_session))
        .route("/session/layer", put(handlers::select_layer))
        .nest("/drawing", drawing_routes())
        .route("/map", get(handlers::get_map_view))
        .route("/chart", get(handlers::get_chart))
        .route("/legend", get(handlers::get_legend))
}

/// Field drawing routes
fn drawing_routes() -> Router<AppState> {
    Router::new()
        .route("/start", post(handlers::start_drawing))
        .route("/points", post(handlers::add_point))
        .route("/finish", post(handlers::finish_drawing))
        .route("/cancel", post(handlers::cancel_drawing))
}
