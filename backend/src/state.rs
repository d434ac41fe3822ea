//! Session state container
//!
//! The whole interactive session is one immutable [`SessionState`] record.
//! Every change goes through [`SessionState::reduce`], which returns the next
//! record; [`SessionStore`] swaps it in. Each committed field opens a new
//! [`AnalysisTicket`] and results carrying an older ticket are rejected, so
//! only the most recent analysis pipeline can write to the session.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use shared::{
    AnalysisResult, Coordinate, DrawingController, DrawingError, FarmField, HeatmapPixel,
    MapLayer, TrendSeries,
};
use thiserror::Error;
use tokio::sync::RwLock;

/// Monotonic identifier of one analysis pipeline run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct AnalysisTicket(pub u64);

impl std::fmt::Display for AnalysisTicket {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransitionError {
    #[error(transparent)]
    Drawing(#[from] DrawingError),

    #[error("Analysis {0} was superseded")]
    Stale(AnalysisTicket),
}

/// Everything that can happen to a session
#[derive(Debug, Clone)]
pub enum SessionAction {
    DrawingStarted,
    PointAdded(Coordinate),
    DrawingCancelled,
    /// Close the ring drawn so far and open a new analysis
    DrawingFinished { at: DateTime<Utc> },
    AnalysisReady {
        ticket: AnalysisTicket,
        result: AnalysisResult,
    },
    AnalysisFailed {
        ticket: AnalysisTicket,
        reason: String,
    },
    InterpretationReady {
        ticket: AnalysisTicket,
        text: String,
    },
    LayerSelected(MapLayer),
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct SessionState {
    pub selected_field: Option<FarmField>,
    pub analysis: Option<AnalysisResult>,
    pub interpretation: Option<String>,
    pub is_processing: bool,
    pub is_interpreting: bool,
    pub active_layer: MapLayer,
    pub drawing: DrawingController,
    /// Ticket of the analysis allowed to write results
    pub current_ticket: Option<AnalysisTicket>,
    #[serde(skip)]
    issued_tickets: u64,
}

impl SessionState {
    pub fn is_current(&self, ticket: AnalysisTicket) -> bool {
        self.current_ticket == Some(ticket)
    }

    /// Compute the state that follows `action`
    pub fn reduce(&self, action: SessionAction) -> Result<SessionState, TransitionError> {
        let mut next = self.clone();

        match action {
            SessionAction::DrawingStarted => next.drawing.start(),
            SessionAction::PointAdded(point) => {
                next.drawing.add_point(point)?;
            }
            SessionAction::DrawingCancelled => {
                next.drawing.cancel();
            }
            SessionAction::DrawingFinished { at } => {
                let field = next.drawing.finish(at)?;
                next.issued_tickets += 1;
                next.current_ticket = Some(AnalysisTicket(next.issued_tickets));
                next.selected_field = Some(field);
                next.analysis = None;
                next.interpretation = None;
                next.is_processing = true;
                next.is_interpreting = false;
            }
            SessionAction::AnalysisReady { ticket, result } => {
                self.ensure_current(ticket)?;
                next.analysis = Some(result);
                next.is_processing = false;
                next.is_interpreting = true;
            }
            SessionAction::AnalysisFailed { ticket, .. } => {
                self.ensure_current(ticket)?;
                next.is_processing = false;
                next.is_interpreting = false;
            }
            SessionAction::InterpretationReady { ticket, text } => {
                self.ensure_current(ticket)?;
                next.interpretation = Some(text);
                next.is_interpreting = false;
            }
            SessionAction::LayerSelected(layer) => next.active_layer = layer,
        }

        Ok(next)
    }

    fn ensure_current(&self, ticket: AnalysisTicket) -> Result<(), TransitionError> {
        if self.is_current(ticket) {
            Ok(())
        } else {
            Err(TransitionError::Stale(ticket))
        }
    }

    /// Heatmap pixels the map should draw right now
    pub fn visible_heatmap(&self) -> &[HeatmapPixel] {
        match &self.analysis {
            Some(analysis) if self.active_layer.shows_heatmap() && !self.drawing.is_drawing() => {
                &analysis.ndvi_heatmap
            }
            _ => &[],
        }
    }

    /// Ring of the selected field, hidden while a new one is drawn
    pub fn visible_field(&self) -> Option<&FarmField> {
        self.selected_field
            .as_ref()
            .filter(|_| !self.drawing.is_drawing())
    }

    /// Chart series for the active layer
    pub fn trend(&self) -> Option<TrendSeries> {
        self.analysis
            .as_ref()
            .map(|a| a.trend(self.active_layer.chart_key()))
    }
}

/// Shared handle to the current session record
#[derive(Clone, Default)]
pub struct SessionStore {
    state: Arc<RwLock<Arc<SessionState>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// The current record
    pub async fn snapshot(&self) -> Arc<SessionState> {
        self.state.read().await.clone()
    }

    /// Apply an action and return the record that replaced the old one.
    ///
    /// A rejected action leaves the session untouched.
    pub async fn dispatch(&self, action: SessionAction) -> Result<Arc<SessionState>, TransitionError> {
        let mut guard = self.state.write().await;
        let next = Arc::new(guard.reduce(action)?);
        *guard = next.clone();
        Ok(next)
    }
}
