//! AgriSights field monitor backend
//!
//! Draws fields, synthesizes vegetation and water indices for them, and asks a
//! text-generation service for an agronomic summary. A browser front-end drives
//! the single session through the HTTP surface built by [`create_app`].

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

pub mod config;
pub mod error;
pub mod external;
pub mod handlers;
pub mod routes;
pub mod services;
pub mod state;

pub use config::Config;

use crate::error::AppResult;
use crate::external::{GeminiClient, TextGenerator};
use crate::services::{AnalysisPipeline, FieldDataService, InterpretationService};
use crate::state::SessionStore;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: SessionStore,
    pub pipeline: AnalysisPipeline,
}

impl AppState {
    /// Wire the session and pipeline around a text generator
    pub fn new(config: Config, generator: Arc<dyn TextGenerator>) -> Self {
        let session = SessionStore::new();
        let pipeline = AnalysisPipeline::new(
            session.clone(),
            FieldDataService::new(&config.analysis),
            InterpretationService::new(generator),
        );

        Self {
            config: Arc::new(config),
            session,
            pipeline,
        }
    }

    /// Build state using the Gemini client from configuration
    pub fn from_config(config: Config) -> AppResult<Self> {
        let client = GeminiClient::new(&config.gemini)?;
        Ok(Self::new(config, Arc::new(client)))
    }

    pub fn pipeline_configured(&self) -> bool {
        self.pipeline.interpretation_configured()
    }
}

/// Create the application router with all routes and middleware
pub fn create_app(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(root))
        .route("/health", get(handlers::health_check))
        .nest("/api/v1", routes::api_routes())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Root endpoint
async fn root() -> &'static str {
    "AgriSights Field Monitor API v1.0"
}
