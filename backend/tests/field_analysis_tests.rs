//! Field analysis integration tests
//!
//! Tests for synthetic index generation and interpretation including:
//! - History shape: seven monthly readings, oldest first, inside observed ranges
//! - Heatmap sampling bounded by the grid resolution
//! - Interpretation fallbacks for missing keys, failures and empty answers

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use agrisights_backend::config::AnalysisConfig;
use agrisights_backend::error::{AppError, AppResult};
use agrisights_backend::external::TextGenerator;
use agrisights_backend::services::field_data::{FieldDataService, RandomNoise};
use agrisights_backend::services::interpretation::{
    build_prompt, InterpretationService, EMPTY_RESPONSE_MESSAGE, MISSING_CONFIGURATION_MESSAGE,
    UNAVAILABLE_MESSAGE,
};
use async_trait::async_trait;
use chrono::{TimeZone, Utc};
use proptest::prelude::*;
use rand::{rngs::StdRng, SeedableRng};
use shared::{
    is_within_observed_ranges, AnalysisResult, Coordinate, FarmField, HISTORY_MONTHS,
};

fn service() -> FieldDataService {
    FieldDataService::new(&AnalysisConfig {
        simulated_latency_ms: 0,
        grid_resolution: 10,
    })
}

fn field_from(points: &[(f64, f64)]) -> FarmField {
    let ring = points.iter().copied().map(Coordinate::from).collect();
    FarmField::new("Test field", ring).unwrap()
}

fn sample_analysis() -> AnalysisResult {
    let field = field_from(&[(40.0, -74.0), (40.0, -73.99), (40.01, -73.99)]);
    let now = Utc.with_ymd_and_hms(2024, 7, 4, 9, 30, 0).unwrap();
    service()
        .synthesize(&field, now, &mut RandomNoise(StdRng::seed_from_u64(7)))
        .unwrap()
}

// ============================================================================
// Text generator stubs
// ============================================================================

/// Generator with no credential; must never be called
struct Unconfigured;

#[async_trait]
impl TextGenerator for Unconfigured {
    fn is_configured(&self) -> bool {
        false
    }

    async fn generate_text(&self, _prompt: &str) -> AppResult<String> {
        panic!("text generation called without a credential");
    }
}

/// Generator answering with a fixed reply and counting calls
struct Canned {
    reply: AppResult<String>,
    calls: AtomicUsize,
}

impl Canned {
    fn ok(text: &str) -> Self {
        Self {
            reply: Ok(text.to_string()),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            reply: Err(AppError::TextGeneration("connection refused".to_string())),
            calls: AtomicUsize::new(0),
        }
    }
}

#[async_trait]
impl TextGenerator for Canned {
    async fn generate_text(&self, _prompt: &str) -> AppResult<String> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.reply {
            Ok(text) => Ok(text.clone()),
            Err(e) => Err(AppError::TextGeneration(e.to_string())),
        }
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Current values are the last reading of the history
    #[test]
    fn test_current_values_match_latest_reading() {
        let result = sample_analysis();
        let latest = result.history.last().unwrap();

        assert_eq!(result.history.len(), HISTORY_MONTHS);
        assert_eq!(result.current_ndvi, latest.ndvi);
        assert_eq!(result.current_ndwi, latest.ndwi);
        assert_eq!(result.current_moisture, latest.moisture);
    }

    /// July readings use the growing-season baseline
    #[test]
    fn test_summer_reading_near_growing_baseline() {
        let result = sample_analysis();
        assert!((result.current_ndvi - 0.7).abs() <= 0.1 + 1e-9);
    }

    /// Heatmap pixels carry the colour of their own value
    #[test]
    fn test_heatmap_pixel_colours() {
        let result = sample_analysis();
        assert!(!result.ndvi_heatmap.is_empty());
        for pixel in &result.ndvi_heatmap {
            assert_eq!(pixel.color, shared::vegetation_color(pixel.value));
        }
    }

    /// Prompt lists every reading with two decimals
    #[test]
    fn test_prompt_contains_history() {
        let result = sample_analysis();
        let prompt = build_prompt(&result);

        assert!(prompt.contains("expert agronomist"));
        assert!(prompt.contains(&format!("{:.2}", result.current_ndvi)));
        for point in &result.history {
            assert!(prompt.contains(&point.date.to_string()));
        }
    }

    #[tokio::test]
    async fn test_missing_key_short_circuits() {
        let service = InterpretationService::new(Arc::new(Unconfigured));
        assert!(!service.is_configured());

        let text = service.interpret(&sample_analysis()).await;
        assert_eq!(text, MISSING_CONFIGURATION_MESSAGE);
    }

    #[tokio::test]
    async fn test_generated_text_passed_through() {
        let generator = Arc::new(Canned::ok("Crops look vigorous."));
        let service = InterpretationService::new(generator.clone());

        let text = service.interpret(&sample_analysis()).await;
        assert_eq!(text, "Crops look vigorous.");
        assert_eq!(generator.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_answer_uses_fallback() {
        let service = InterpretationService::new(Arc::new(Canned::ok("")));
        let text = service.interpret(&sample_analysis()).await;
        assert_eq!(text, EMPTY_RESPONSE_MESSAGE);
    }

    #[tokio::test]
    async fn test_whitespace_answer_returned_verbatim() {
        let service = InterpretationService::new(Arc::new(Canned::ok("  \n")));
        let text = service.interpret(&sample_analysis()).await;
        assert_eq!(text, "  \n");
    }

    #[tokio::test]
    async fn test_failure_uses_unavailable_message() {
        let service = InterpretationService::new(Arc::new(Canned::failing()));
        let text = service.interpret(&sample_analysis()).await;
        assert_eq!(text, UNAVAILABLE_MESSAGE);
    }

    #[tokio::test]
    async fn test_process_field_without_latency() {
        let field = field_from(&[(0.0, 0.0), (0.0, 1.0), (1.0, 1.0)]);
        let result = service().process_field(&field).await.unwrap();

        assert_eq!(result.field_id, field.id);
        assert_eq!(result.history.len(), HISTORY_MONTHS);
    }
}

// ============================================================================
// Property-Based Tests
// ============================================================================

fn coordinate_strategy() -> impl Strategy<Value = (f64, f64)> {
    (-80.0f64..80.0, -179.0f64..179.0)
}

fn ring_strategy() -> impl Strategy<Value = Vec<(f64, f64)>> {
    prop::collection::vec(coordinate_strategy(), 3..12)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// History always holds seven chronological readings inside the observed ranges
    #[test]
    fn prop_history_shape(
        ring in ring_strategy(),
        seed in any::<u64>(),
        year in 2000i32..2100,
        month in 1u32..=12,
        day in 1u32..=28,
    ) {
        let field = field_from(&ring);
        let now = Utc.with_ymd_and_hms(year, month, day, 12, 0, 0).unwrap();
        let result = service()
            .synthesize(&field, now, &mut RandomNoise(StdRng::seed_from_u64(seed)))
            .unwrap();

        prop_assert_eq!(result.history.len(), HISTORY_MONTHS);
        prop_assert!(result.history.windows(2).all(|w| w[0].date < w[1].date));
        prop_assert!(result.history.iter().all(is_within_observed_ranges));
        prop_assert_eq!(result.last_updated, now);
    }

    /// Heatmap sampling never exceeds resolution squared and stays inside the field bounds
    #[test]
    fn prop_heatmap_bounded(ring in ring_strategy(), seed in any::<u64>()) {
        let field = field_from(&ring);
        let bounds = shared::bounding_box(&field.coordinates).unwrap();
        let result = service()
            .synthesize(&field, Utc::now(), &mut RandomNoise(StdRng::seed_from_u64(seed)))
            .unwrap();

        prop_assert!(result.ndvi_heatmap.len() <= 100);
        for pixel in &result.ndvi_heatmap {
            prop_assert!(pixel.lat >= bounds.min_lat && pixel.lat < bounds.max_lat);
            prop_assert!(pixel.lng >= bounds.min_lng && pixel.lng < bounds.max_lng);
            prop_assert!((pixel.value - result.current_ndvi).abs() <= 0.15 + 1e-9);
        }
    }
}
