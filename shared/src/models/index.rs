//! Spectral index readings and vegetation health classification

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::types::IndexKind;

/// Observed clamp for the vegetation index
pub const NDVI_RANGE: (f64, f64) = (0.1, 0.9);
/// Observed clamp for the water index
pub const NDWI_RANGE: (f64, f64) = (-0.4, 0.6);
/// Observed clamp for the soil moisture index
pub const MOISTURE_RANGE: (f64, f64) = (0.2, 0.8);

/// One monthly reading for a field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct IndexDataPoint {
    /// First day of the month the reading belongs to
    pub date: NaiveDate,
    pub ndvi: f64,
    pub ndwi: f64,
    pub moisture: f64,
}

impl IndexDataPoint {
    pub fn value(&self, kind: IndexKind) -> f64 {
        match kind {
            IndexKind::Ndvi => self.ndvi,
            IndexKind::Ndwi => self.ndwi,
            IndexKind::Moisture => self.moisture,
        }
    }
}

/// Vegetation health brackets used for map colouring
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum VegetationHealth {
    /// Below 0.2
    Barren,
    /// 0.2 up to 0.4
    Stressed,
    /// 0.4 up to 0.6
    Moderate,
    /// 0.6 and above
    Healthy,
}

impl VegetationHealth {
    pub const ALL: [VegetationHealth; 4] = [
        VegetationHealth::Barren,
        VegetationHealth::Stressed,
        VegetationHealth::Moderate,
        VegetationHealth::Healthy,
    ];

    /// Classify a vegetation index value. Boundary values belong to the higher bracket.
    pub fn classify(value: f64) -> Self {
        if value >= 0.6 {
            VegetationHealth::Healthy
        } else if value >= 0.4 {
            VegetationHealth::Moderate
        } else if value >= 0.2 {
            VegetationHealth::Stressed
        } else {
            VegetationHealth::Barren
        }
    }

    /// Display colour as a CSS hex string
    pub fn color(&self) -> &'static str {
        match self {
            VegetationHealth::Barren => "#ef4444",
            VegetationHealth::Stressed => "#f59e0b",
            VegetationHealth::Moderate => "#84cc16",
            VegetationHealth::Healthy => "#15803d",
        }
    }

    /// Lower bound of the bracket, `None` for the open-ended lowest bracket
    pub fn lower_bound(&self) -> Option<f64> {
        match self {
            VegetationHealth::Barren => None,
            VegetationHealth::Stressed => Some(0.2),
            VegetationHealth::Moderate => Some(0.4),
            VegetationHealth::Healthy => Some(0.6),
        }
    }
}

impl std::fmt::Display for VegetationHealth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            VegetationHealth::Barren => write!(f, "Barren/Dead"),
            VegetationHealth::Stressed => write!(f, "Stressed"),
            VegetationHealth::Moderate => write!(f, "Moderate"),
            VegetationHealth::Healthy => write!(f, "Healthy"),
        }
    }
}

/// Map a vegetation index value to its display colour
pub fn vegetation_color(value: f64) -> &'static str {
    VegetationHealth::classify(value).color()
}
