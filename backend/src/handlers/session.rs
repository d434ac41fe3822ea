//! HTTP handlers for the session record and layer switch

use axum::{extract::State, Json};
use serde::Deserialize;
use shared::MapLayer;

use crate::error::AppResult;
use crate::state::{SessionAction, SessionState};
use crate::AppState;

/// Current session record
pub async fn get_session(State(state): State<AppState>) -> Json<SessionState> {
    let snapshot = state.session.snapshot().await;
    Json(snapshot.as_ref().clone())
}

#[derive(Debug, Deserialize)]
pub struct SelectLayerInput {
    pub layer: MapLayer,
}

/// Switch the active map layer
pub async fn select_layer(
    State(state): State<AppState>,
    Json(input): Json<SelectLayerInput>,
) -> AppResult<Json<SessionState>> {
    let next = state
        .session
        .dispatch(SessionAction::LayerSelected(input.layer))
        .await?;
    tracing::debug!(layer = %input.layer, "Layer selected");
    Ok(Json(next.as_ref().clone()))
}
