//! Synthetic satellite index service
//!
//! Stands in for a remote-sensing pipeline: every analysis is a fresh set of
//! randomized readings shaped by a simple seasonal curve.

use std::time::Duration;

use chrono::{DateTime, Datelike, Months, NaiveDate, Utc};
use rand::Rng;
use shared::{
    bounding_box, AnalysisResult, FarmField, HeatmapPixel, IndexDataPoint, HISTORY_MONTHS,
    MOISTURE_RANGE, NDVI_RANGE, NDWI_RANGE,
};

use crate::config::AnalysisConfig;
use crate::error::{AppError, AppResult};

/// Vegetation baseline for June through September
pub const GROWING_SEASON_NDVI: f64 = 0.7;
/// Vegetation baseline for the rest of the year
pub const OFF_SEASON_NDVI: f64 = 0.4;

const NDVI_NOISE: f64 = 0.1;
const NDWI_NOISE: f64 = 0.2;
const MOISTURE_NOISE_MAX: f64 = 0.5;
const HEATMAP_NOISE: f64 = 0.15;

/// Source of uniform noise for the generator
pub trait NoiseSource {
    /// A value drawn uniformly from `[low, high]`
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Noise backed by any `rand` generator
pub struct RandomNoise<R>(pub R);

impl<R: Rng> NoiseSource for RandomNoise<R> {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        if low >= high {
            return low;
        }
        self.0.random_range(low..=high)
    }
}

/// Synthetic analysis service
#[derive(Debug, Clone)]
pub struct FieldDataService {
    latency: Duration,
    grid_resolution: usize,
}

impl FieldDataService {
    /// Create a new FieldDataService instance
    pub fn new(config: &AnalysisConfig) -> Self {
        Self {
            latency: config.simulated_latency(),
            grid_resolution: config.grid_resolution,
        }
    }

    /// Produce an analysis for a field after the simulated fetch delay
    pub async fn process_field(&self, field: &FarmField) -> AppResult<AnalysisResult> {
        tracing::debug!(field_id = %field.id, latency_ms = self.latency.as_millis() as u64, "Fetching indices");

        if self.latency.is_zero() {
            tokio::task::yield_now().await;
        } else {
            tokio::time::sleep(self.latency).await;
        }

        let mut noise = RandomNoise(rand::rng());
        let result = self.synthesize(field, Utc::now(), &mut noise)?;

        tracing::info!(
            field_id = %field.id,
            ndvi = result.current_ndvi,
            pixels = result.ndvi_heatmap.len(),
            "Indices ready"
        );
        Ok(result)
    }

    /// Build an analysis for `now` using the given noise
    pub fn synthesize<N: NoiseSource>(
        &self,
        field: &FarmField,
        now: DateTime<Utc>,
        noise: &mut N,
    ) -> AppResult<AnalysisResult> {
        let history = monthly_history(now.date_naive(), noise)?;
        let current_ndvi = history[history.len() - 1].ndvi;

        let bounds = bounding_box(&field.coordinates)?;
        let heatmap = bounds
            .grid(self.grid_resolution)
            .into_iter()
            .map(|position| {
                let value = current_ndvi + noise.uniform(-HEATMAP_NOISE, HEATMAP_NOISE);
                HeatmapPixel::new(position, value)
            })
            .collect();

        Ok(AnalysisResult::new(field.id, history, heatmap, now)?)
    }
}

/// Seasonal vegetation baseline for a calendar month (1-12)
pub fn seasonal_baseline(month: u32) -> f64 {
    if (6..=9).contains(&month) {
        GROWING_SEASON_NDVI
    } else {
        OFF_SEASON_NDVI
    }
}

/// Seven monthly readings ending at the month of `today`, oldest first
fn monthly_history<N: NoiseSource>(
    today: NaiveDate,
    noise: &mut N,
) -> AppResult<Vec<IndexDataPoint>> {
    let month_start = today
        .with_day(1)
        .ok_or_else(|| AppError::Internal("invalid calendar date".to_string()))?;

    (0..HISTORY_MONTHS as u32)
        .rev()
        .map(|offset| {
            let date = month_start
                .checked_sub_months(Months::new(offset))
                .ok_or_else(|| AppError::Internal("date out of range".to_string()))?;

            let ndvi = seasonal_baseline(date.month()) + noise.uniform(-NDVI_NOISE, NDVI_NOISE);
            let ndwi = noise.uniform(-NDWI_NOISE, NDWI_NOISE);
            let moisture = noise.uniform(0.0, MOISTURE_NOISE_MAX);

            Ok(IndexDataPoint {
                date,
                ndvi: ndvi.clamp(NDVI_RANGE.0, NDVI_RANGE.1),
                ndwi: ndwi.clamp(NDWI_RANGE.0, NDWI_RANGE.1),
                moisture: moisture.clamp(MOISTURE_RANGE.0, MOISTURE_RANGE.1),
            })
        })
        .collect()
}
