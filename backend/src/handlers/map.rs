//! HTTP handlers feeding the map, chart and legend

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use shared::{vegetation_legend, Coordinate, HeatmapPixel, LegendEntry, MapLayer, TrendSeries};

use crate::error::{AppError, AppResult};
use crate::AppState;

/// Client geolocation, both parts or nothing.
///
/// Kept as raw strings; empty or malformed parts count as absent.
#[derive(Debug, Default, Deserialize)]
pub struct GeolocationQuery {
    pub lat: Option<String>,
    pub lng: Option<String>,
}

impl GeolocationQuery {
    fn coordinate(&self) -> Option<Coordinate> {
        let lat = parse_degrees(self.lat.as_deref())?;
        let lng = parse_degrees(self.lng.as_deref())?;
        Some(Coordinate::new(lat, lng))
    }
}

fn parse_degrees(raw: Option<&str>) -> Option<f64> {
    raw?.trim().parse::<f64>().ok().filter(|v| v.is_finite())
}

/// Everything the map canvas draws
#[derive(Debug, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub layer: MapLayer,
    pub tile_url: String,
    /// Selected field ring, hidden while drawing
    pub field: Option<Vec<Coordinate>>,
    /// Ring under construction
    pub drawing: Vec<Coordinate>,
    pub heatmap: Vec<HeatmapPixel>,
}

/// Map view for the current session
pub async fn get_map_view(
    State(state): State<AppState>,
    Query(query): Query<GeolocationQuery>,
) -> Json<MapView> {
    let session = state.session.snapshot().await;
    let geolocation = query.coordinate();
    if geolocation.is_none() {
        tracing::debug!("No client geolocation, using default centre");
    }

    let map = &state.config.map;
    Json(MapView {
        center: map.resolve_center(geolocation),
        zoom: map.default_zoom,
        layer: session.active_layer,
        tile_url: map.tile_url(session.active_layer).to_string(),
        field: session.visible_field().map(|f| f.coordinates.clone()),
        drawing: session.drawing.points().to_vec(),
        heatmap: session.visible_heatmap().to_vec(),
    })
}

/// Trend chart series for the active layer
pub async fn get_chart(State(state): State<AppState>) -> AppResult<Json<TrendSeries>> {
    let session = state.session.snapshot().await;
    session
        .trend()
        .map(Json)
        .ok_or_else(|| AppError::NotFound("Analysis".to_string()))
}

/// Vegetation overlay legend
pub async fn get_legend() -> Json<Vec<LegendEntry>> {
    Json(vegetation_legend())
}
