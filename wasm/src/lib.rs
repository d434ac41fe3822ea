//! WebAssembly module for the AgriSights field monitor
//!
//! Provides client-side computation for:
//! - Vegetation index colouring for the overlay and legend
//! - Field boundary validation and bounding boxes
//! - Drawing a field ring before it is sent to the server

use chrono::{DateTime, Utc};
use wasm_bindgen::prelude::*;

// Re-export shared types for use in JavaScript
pub use shared::drawing::*;
pub use shared::geometry::*;
pub use shared::models::*;
pub use shared::types::*;
pub use shared::validation::*;

/// Initialize the WASM module
#[wasm_bindgen(start)]
pub fn init() {
    web_sys::console::log_1(&JsValue::from_str("AgriSights field tools loaded"));
}

fn js_error(message: impl std::fmt::Display) -> JsValue {
    js_sys::Error::new(&message.to_string()).into()
}

fn parse_ring(coordinates_json: &str) -> Result<Vec<Coordinate>, String> {
    serde_json::from_str(coordinates_json).map_err(|e| format!("Invalid coordinates JSON: {}", e))
}

/// Overlay colour for a vegetation index value
#[wasm_bindgen]
pub fn classify_vegetation_index(value: f64) -> String {
    vegetation_color(value).to_string()
}

/// Legend label for a vegetation index value
#[wasm_bindgen]
pub fn vegetation_health_label(value: f64) -> String {
    VegetationHealth::classify(value).to_string()
}

/// Bounding box of a JSON coordinate array
#[wasm_bindgen]
pub fn bounding_box_json(coordinates_json: &str) -> Result<String, JsValue> {
    let ring = parse_ring(coordinates_json).map_err(js_error)?;
    let bounds = bounding_box(&ring).map_err(js_error)?;
    serde_json::to_string(&bounds).map_err(js_error)
}

/// Whether a JSON coordinate array can be committed as a field
#[wasm_bindgen]
pub fn validate_field_ring_json(coordinates_json: &str) -> bool {
    parse_ring(coordinates_json)
        .and_then(|ring| validate_field_ring(&ring).map_err(str::to_string))
        .is_ok()
}

/// Field ring being drawn in the browser
#[wasm_bindgen]
#[derive(Default)]
pub struct FieldDrawing {
    controller: DrawingController,
}

#[wasm_bindgen]
impl FieldDrawing {
    #[wasm_bindgen(constructor)]
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter drawing mode, discarding any earlier points
    pub fn start(&mut self) {
        self.controller.start();
    }

    /// Append a clicked position and return the point count
    pub fn add_point(&mut self, lat: f64, lng: f64) -> Result<usize, JsValue> {
        self.controller
            .add_point(Coordinate::new(lat, lng))
            .map_err(|e| {
                web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
                js_error(e)
            })
    }

    /// Close the ring and return the committed field as JSON.
    ///
    /// `created_at_ms` is a JavaScript timestamp and names the field.
    pub fn finish(&mut self, created_at_ms: f64) -> Result<String, JsValue> {
        let created_at = DateTime::<Utc>::from_timestamp_millis(created_at_ms as i64)
            .ok_or_else(|| js_error("Invalid timestamp"))?;

        let field = self.controller.finish(created_at).map_err(|e| {
            web_sys::console::warn_1(&JsValue::from_str(&e.to_string()));
            js_error(e)
        })?;
        serde_json::to_string(&field).map_err(js_error)
    }

    /// Abort drawing and return how many points were discarded
    pub fn cancel(&mut self) -> usize {
        self.controller.cancel()
    }

    pub fn is_drawing(&self) -> bool {
        self.controller.is_drawing()
    }

    pub fn point_count(&self) -> usize {
        self.controller.points().len()
    }

    pub fn can_finish(&self) -> bool {
        self.controller.can_finish()
    }

    /// Points placed so far as JSON
    pub fn points_json(&self) -> String {
        serde_json::to_string(self.controller.points()).unwrap_or_else(|_| "[]".to_string())
    }
}
