//! Validation utilities for the AgriSights field monitor

use crate::models::{IndexDataPoint, HISTORY_MONTHS, MOISTURE_RANGE, NDVI_RANGE, NDWI_RANGE};
use crate::types::Coordinate;

/// Fewest points that make a field boundary
pub const MIN_RING_VERTICES: usize = 3;

// ============================================================================
// Geometry Validations
// ============================================================================

/// Validate that a drawn ring can become a field
pub fn validate_field_ring(coords: &[Coordinate]) -> Result<(), &'static str> {
    if coords.len() < MIN_RING_VERTICES {
        return Err("A polygon needs at least 3 points");
    }
    if coords.iter().any(|c| !c.lat.is_finite() || !c.lng.is_finite()) {
        return Err("Coordinates must be finite numbers");
    }
    Ok(())
}

// ============================================================================
// Index Validations
// ============================================================================

/// Validate that a history has the fixed length and runs oldest to newest
pub fn validate_history(history: &[IndexDataPoint]) -> Result<(), &'static str> {
    if history.len() != HISTORY_MONTHS {
        return Err("History must contain exactly 7 monthly points");
    }
    if history.windows(2).any(|w| w[0].date > w[1].date) {
        return Err("History must be in chronological order");
    }
    Ok(())
}

/// Check a reading against the observed clamp of each index
pub fn is_within_observed_ranges(point: &IndexDataPoint) -> bool {
    in_range(point.ndvi, NDVI_RANGE)
        && in_range(point.ndwi, NDWI_RANGE)
        && in_range(point.moisture, MOISTURE_RANGE)
}

fn in_range(value: f64, (min, max): (f64, f64)) -> bool {
    value >= min && value <= max
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn point(month: u32, ndvi: f64, ndwi: f64, moisture: f64) -> IndexDataPoint {
        IndexDataPoint {
            date: NaiveDate::from_ymd_opt(2024, month, 1).unwrap(),
            ndvi,
            ndwi,
            moisture,
        }
    }

    // ========================================================================
    // Geometry Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_field_ring_valid() {
        let ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(0.0, 1.0),
            Coordinate::new(1.0, 0.0),
        ];
        assert!(validate_field_ring(&ring).is_ok());
    }

    #[test]
    fn test_validate_field_ring_too_few() {
        let ring = vec![Coordinate::new(0.0, 0.0), Coordinate::new(0.0, 1.0)];
        assert!(validate_field_ring(&ring).is_err());
        assert!(validate_field_ring(&[]).is_err());
    }

    #[test]
    fn test_validate_field_ring_non_finite() {
        let ring = vec![
            Coordinate::new(0.0, 0.0),
            Coordinate::new(f64::NAN, 1.0),
            Coordinate::new(1.0, 0.0),
        ];
        assert!(validate_field_ring(&ring).is_err());
    }

    // ========================================================================
    // Index Validation Tests
    // ========================================================================

    #[test]
    fn test_validate_history_valid() {
        let history: Vec<_> = (1..=7).map(|m| point(m, 0.5, 0.0, 0.3)).collect();
        assert!(validate_history(&history).is_ok());
    }

    #[test]
    fn test_validate_history_wrong_length() {
        let history: Vec<_> = (1..=8).map(|m| point(m, 0.5, 0.0, 0.3)).collect();
        assert!(validate_history(&history).is_err());
    }

    #[test]
    fn test_validate_history_unordered() {
        let mut history: Vec<_> = (1..=7).map(|m| point(m, 0.5, 0.0, 0.3)).collect();
        history.reverse();
        assert!(validate_history(&history).is_err());
    }

    #[test]
    fn test_observed_ranges() {
        assert!(is_within_observed_ranges(&point(1, 0.1, -0.4, 0.2)));
        assert!(is_within_observed_ranges(&point(1, 0.9, 0.6, 0.8)));
        assert!(!is_within_observed_ranges(&point(1, 0.95, 0.0, 0.5)));
        assert!(!is_within_observed_ranges(&point(1, 0.5, -0.5, 0.5)));
        assert!(!is_within_observed_ranges(&point(1, 0.5, 0.0, 0.1)));
    }
}
