//! Farm field models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use crate::types::Coordinate;
use crate::validation::MIN_RING_VERTICES;

/// A user-drawn field boundary
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Validate)]
pub struct FarmField {
    pub id: Uuid,
    #[validate(length(min = 1, message = "Field name cannot be empty"))]
    pub name: String,
    /// Polygon ring in drawing order; need not be closed or simple
    #[validate(length(min = 3, message = "A field boundary needs at least 3 points"))]
    pub coordinates: Vec<Coordinate>,
    /// Always zero, area is not computed
    pub area_hectares: f64,
}

impl FarmField {
    /// Build a field from a finished ring, named after the commit time
    pub fn from_ring(
        coordinates: Vec<Coordinate>,
        created_at: DateTime<Utc>,
    ) -> Result<Self, validator::ValidationErrors> {
        let name = format!("Field {}", created_at.format("%H:%M:%S"));
        Self::new(name, coordinates)
    }

    /// Build a field with a fresh identifier
    pub fn new(
        name: impl Into<String>,
        coordinates: Vec<Coordinate>,
    ) -> Result<Self, validator::ValidationErrors> {
        let field = Self {
            id: Uuid::new_v4(),
            name: name.into(),
            coordinates,
            area_hectares: 0.0,
        };
        field.validate()?;
        Ok(field)
    }

    pub fn vertex_count(&self) -> usize {
        self.coordinates.len()
    }

    /// Whether the ring satisfies the minimum vertex count
    pub fn is_closable(&self) -> bool {
        self.coordinates.len() >= MIN_RING_VERTICES
    }
}
