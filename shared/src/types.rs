//! Common types used across the platform

use serde::{Deserialize, Serialize};

/// Esri World Imagery tiles, used by the satellite layer
pub const SATELLITE_TILE_URL: &str =
    "https://server.arcgisonline.com/ArcGIS/rest/services/World_Imagery/MapServer/tile/{z}/{y}/{x}";

/// OpenStreetMap tiles, used underneath the index overlays
pub const STREET_TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";

/// A WGS84 position in degrees. Not range-checked.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    pub fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

impl From<(f64, f64)> for Coordinate {
    fn from((lat, lng): (f64, f64)) -> Self {
        Self { lat, lng }
    }
}

/// Map layers the user can switch between
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum MapLayer {
    Satellite,
    #[default]
    VegetationIndex,
    WaterIndex,
}

impl MapLayer {
    /// Whether the base map should use satellite imagery
    pub fn uses_satellite_tiles(&self) -> bool {
        matches!(self, MapLayer::Satellite)
    }

    /// Tile source for the built-in imagery URLs
    pub fn default_tile_url(&self) -> &'static str {
        if self.uses_satellite_tiles() {
            SATELLITE_TILE_URL
        } else {
            STREET_TILE_URL
        }
    }

    /// Which index the trend chart plots while this layer is active
    pub fn chart_key(&self) -> IndexKind {
        match self {
            MapLayer::WaterIndex => IndexKind::Ndwi,
            MapLayer::Satellite | MapLayer::VegetationIndex => IndexKind::Ndvi,
        }
    }

    /// Whether the vegetation heatmap overlay is drawn on this layer
    pub fn shows_heatmap(&self) -> bool {
        matches!(self, MapLayer::VegetationIndex)
    }
}

impl std::fmt::Display for MapLayer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MapLayer::Satellite => write!(f, "Satellite"),
            MapLayer::VegetationIndex => write!(f, "NDVI (Health)"),
            MapLayer::WaterIndex => write!(f, "NDWI (Water)"),
        }
    }
}

/// The spectral indices tracked per field
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum IndexKind {
    /// Normalized Difference Vegetation Index
    Ndvi,
    /// Normalized Difference Water Index
    Ndwi,
    /// Soil moisture index
    Moisture,
}

impl std::fmt::Display for IndexKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            IndexKind::Ndvi => write!(f, "NDVI"),
            IndexKind::Ndwi => write!(f, "NDWI"),
            IndexKind::Moisture => write!(f, "Moisture"),
        }
    }
}
