//! Field drawing interaction
//!
//! Accumulates clicked map positions into a ring and turns it into a
//! [`FarmField`] once the user finishes. Two states: idle and drawing.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::FarmField;
use crate::types::Coordinate;
use crate::validation::{validate_field_ring, MIN_RING_VERTICES};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DrawingError {
    #[error("No field is being drawn")]
    NotDrawing,

    #[error("A polygon needs at least 3 points, got {count}")]
    TooFewPoints { count: usize },

    #[error("Invalid field boundary: {0}")]
    InvalidRing(String),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DrawingState {
    #[default]
    Idle,
    Drawing { points: Vec<Coordinate> },
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DrawingController {
    state: DrawingState,
}

impl DrawingController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &DrawingState {
        &self.state
    }

    pub fn is_drawing(&self) -> bool {
        matches!(self.state, DrawingState::Drawing { .. })
    }

    /// Points placed so far, empty while idle
    pub fn points(&self) -> &[Coordinate] {
        match &self.state {
            DrawingState::Idle => &[],
            DrawingState::Drawing { points } => points,
        }
    }

    /// Whether finishing now would be accepted
    pub fn can_finish(&self) -> bool {
        self.is_drawing() && self.points().len() >= MIN_RING_VERTICES
    }

    /// Enter drawing mode with an empty buffer.
    ///
    /// Calling this mid-drawing discards the points placed so far.
    pub fn start(&mut self) {
        self.state = DrawingState::Drawing { points: Vec::new() };
    }

    /// Append one clicked position, returning the new vertex count
    pub fn add_point(&mut self, point: Coordinate) -> Result<usize, DrawingError> {
        match &mut self.state {
            DrawingState::Idle => Err(DrawingError::NotDrawing),
            DrawingState::Drawing { points } => {
                points.push(point);
                Ok(points.len())
            }
        }
    }

    /// Close the ring into a new field and return to idle.
    ///
    /// A rejected finish leaves the controller drawing with its points intact.
    pub fn finish(&mut self, created_at: DateTime<Utc>) -> Result<FarmField, DrawingError> {
        let points = match &self.state {
            DrawingState::Idle => return Err(DrawingError::NotDrawing),
            DrawingState::Drawing { points } => points,
        };

        if points.len() < MIN_RING_VERTICES {
            return Err(DrawingError::TooFewPoints {
                count: points.len(),
            });
        }
        validate_field_ring(points).map_err(|e| DrawingError::InvalidRing(e.to_string()))?;

        let field = FarmField::from_ring(points.clone(), created_at)
            .map_err(|e| DrawingError::InvalidRing(e.to_string()))?;

        self.state = DrawingState::Idle;
        Ok(field)
    }

    /// Abort drawing, returning how many points were discarded
    pub fn cancel(&mut self) -> usize {
        let discarded = self.points().len();
        self.state = DrawingState::Idle;
        discarded
    }
}
