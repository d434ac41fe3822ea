//! Field analysis results

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::index::{IndexDataPoint, VegetationHealth};
use crate::types::{Coordinate, IndexKind};
use crate::validation::validate_history;

/// Number of monthly readings in every analysis
pub const HISTORY_MONTHS: usize = 7;

/// Fixed value axis of the trend chart
pub const CHART_DOMAIN: (f64, f64) = (-0.5, 1.0);

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AnalysisError {
    #[error("Invalid history: {0}")]
    InvalidHistory(&'static str),
}

/// One sample of the vegetation overlay
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HeatmapPixel {
    pub lat: f64,
    pub lng: f64,
    /// Vegetation index, not clamped
    pub value: f64,
    pub color: String,
}

impl HeatmapPixel {
    pub fn new(position: Coordinate, value: f64) -> Self {
        Self {
            lat: position.lat,
            lng: position.lng,
            value,
            color: VegetationHealth::classify(value).color().to_string(),
        }
    }

    pub fn position(&self) -> Coordinate {
        Coordinate::new(self.lat, self.lng)
    }

    pub fn health(&self) -> VegetationHealth {
        VegetationHealth::classify(self.value)
    }
}

/// Indices, history and overlay produced for one field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AnalysisResult {
    pub field_id: Uuid,
    pub current_ndvi: f64,
    pub current_ndwi: f64,
    pub current_moisture: f64,
    /// Oldest first, most recent last
    pub history: Vec<IndexDataPoint>,
    pub ndvi_heatmap: Vec<HeatmapPixel>,
    pub last_updated: DateTime<Utc>,
}

impl AnalysisResult {
    /// Assemble a result, taking the current scalars from the latest reading
    pub fn new(
        field_id: Uuid,
        history: Vec<IndexDataPoint>,
        ndvi_heatmap: Vec<HeatmapPixel>,
        last_updated: DateTime<Utc>,
    ) -> Result<Self, AnalysisError> {
        validate_history(&history).map_err(AnalysisError::InvalidHistory)?;
        let latest = history[history.len() - 1];

        Ok(Self {
            field_id,
            current_ndvi: latest.ndvi,
            current_ndwi: latest.ndwi,
            current_moisture: latest.moisture,
            history,
            ndvi_heatmap,
            last_updated,
        })
    }

    /// Health bracket of the current vegetation index
    pub fn health(&self) -> VegetationHealth {
        VegetationHealth::classify(self.current_ndvi)
    }

    /// Chart series for one index
    pub fn trend(&self, key: IndexKind) -> TrendSeries {
        TrendSeries {
            key,
            domain: CHART_DOMAIN,
            points: self
                .history
                .iter()
                .map(|p| TrendPoint {
                    date: p.date,
                    value: p.value(key),
                })
                .collect(),
        }
    }
}

/// Time series handed to the chart
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TrendSeries {
    pub key: IndexKind,
    pub domain: (f64, f64),
    pub points: Vec<TrendPoint>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct TrendPoint {
    pub date: NaiveDate,
    pub value: f64,
}

/// Map legend row
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LegendEntry {
    pub health: VegetationHealth,
    pub label: String,
    pub color: String,
    pub min_value: Option<f64>,
}

/// Legend for the vegetation overlay, lowest bracket first
pub fn vegetation_legend() -> Vec<LegendEntry> {
    VegetationHealth::ALL
        .iter()
        .map(|h| LegendEntry {
            health: *h,
            label: h.to_string(),
            color: h.color().to_string(),
            min_value: h.lower_bound(),
        })
        .collect()
}
