//! HTTP handlers for drawing a field boundary

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde::Serialize;
use shared::{Coordinate, FarmField};

use crate::error::{AppError, AppResult};
use crate::state::{AnalysisTicket, SessionAction, SessionState};
use crate::AppState;

/// Drawing progress for the map controls
#[derive(Debug, Serialize)]
pub struct DrawingView {
    pub is_drawing: bool,
    pub points: Vec<Coordinate>,
    pub can_finish: bool,
}

impl From<&SessionState> for DrawingView {
    fn from(session: &SessionState) -> Self {
        Self {
            is_drawing: session.drawing.is_drawing(),
            points: session.drawing.points().to_vec(),
            can_finish: session.drawing.can_finish(),
        }
    }
}

/// A committed field and the analysis started for it
#[derive(Debug, Serialize)]
pub struct FieldCommitted {
    pub field: FarmField,
    pub ticket: AnalysisTicket,
}

/// Enter drawing mode
pub async fn start_drawing(State(state): State<AppState>) -> AppResult<Json<DrawingView>> {
    let next = state.session.dispatch(SessionAction::DrawingStarted).await?;
    Ok(Json(DrawingView::from(next.as_ref())))
}

/// Append a clicked map position
pub async fn add_point(
    State(state): State<AppState>,
    Json(point): Json<Coordinate>,
) -> AppResult<Json<DrawingView>> {
    let next = state
        .session
        .dispatch(SessionAction::PointAdded(point))
        .await?;
    Ok(Json(DrawingView::from(next.as_ref())))
}

/// Close the ring, select the new field and start its analysis
pub async fn finish_drawing(
    State(state): State<AppState>,
) -> AppResult<(StatusCode, Json<FieldCommitted>)> {
    let next = state
        .session
        .dispatch(SessionAction::DrawingFinished { at: Utc::now() })
        .await?;

    let (field, ticket) = match (&next.selected_field, next.current_ticket) {
        (Some(field), Some(ticket)) => (field.clone(), ticket),
        _ => return Err(AppError::Internal("finished drawing without a field".to_string())),
    };

    tracing::info!(
        field_id = %field.id,
        %ticket,
        vertices = field.vertex_count(),
        "Field committed"
    );
    state.pipeline.spawn(field.clone(), ticket);

    Ok((StatusCode::ACCEPTED, Json(FieldCommitted { field, ticket })))
}

/// Abort drawing and discard the points
pub async fn cancel_drawing(State(state): State<AppState>) -> AppResult<Json<DrawingView>> {
    let next = state.session.dispatch(SessionAction::DrawingCancelled).await?;
    Ok(Json(DrawingView::from(next.as_ref())))
}
