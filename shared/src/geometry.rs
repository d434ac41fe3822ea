//! Planar geometry over field rings
//!
//! Coordinates are treated as plain (lat, lng) numbers; no projection is applied.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeometryError {
    #[error("Invalid input: {0}")]
    InvalidInput(&'static str),
}

/// Axis-aligned rectangle enclosing a set of coordinates
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lng: f64,
    pub max_lng: f64,
}

impl BoundingBox {
    pub fn lat_span(&self) -> f64 {
        self.max_lat - self.min_lat
    }

    pub fn lng_span(&self) -> f64 {
        self.max_lng - self.min_lng
    }

    pub fn center(&self) -> Coordinate {
        Coordinate::new(
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lng + self.max_lng) / 2.0,
        )
    }

    /// True when either axis has no extent
    pub fn is_degenerate(&self) -> bool {
        self.lat_span() <= 0.0 || self.lng_span() <= 0.0
    }

    /// Sample positions of an `n`×`n` grid anchored at the minimum corner.
    ///
    /// Each axis is stepped by `span / n` and only positions strictly below the
    /// maximum bound are kept, so a degenerate axis yields no samples.
    pub fn grid(&self, n: usize) -> Vec<Coordinate> {
        let lats = axis_samples(self.min_lat, self.max_lat, n);
        let lngs = axis_samples(self.min_lng, self.max_lng, n);

        lats.iter()
            .flat_map(|&lat| lngs.iter().map(move |&lng| Coordinate::new(lat, lng)))
            .collect()
    }
}

fn axis_samples(min: f64, max: f64, n: usize) -> Vec<f64> {
    if n == 0 || !(max > min) {
        return Vec::new();
    }
    let step = (max - min) / n as f64;
    (0..n)
        .map(|i| min + step * i as f64)
        .filter(|&v| v < max)
        .collect()
}

/// Compute the minimal bounding box of a ring.
///
/// Fails on an empty slice instead of returning an inverted box.
pub fn bounding_box(coords: &[Coordinate]) -> Result<BoundingBox, GeometryError> {
    let (first, rest) = coords
        .split_first()
        .ok_or(GeometryError::InvalidInput("cannot bound an empty coordinate list"))?;

    let init = BoundingBox {
        min_lat: first.lat,
        max_lat: first.lat,
        min_lng: first.lng,
        max_lng: first.lng,
    };

    Ok(rest.iter().fold(init, |b, c| BoundingBox {
        min_lat: b.min_lat.min(c.lat),
        max_lat: b.max_lat.max(c.lat),
        min_lng: b.min_lng.min(c.lng),
        max_lng: b.max_lng.max(c.lng),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ring(points: &[(f64, f64)]) -> Vec<Coordinate> {
        points.iter().copied().map(Coordinate::from).collect()
    }

    #[test]
    fn test_bounding_box_triangle() {
        let bounds = bounding_box(&ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 0.0)])).unwrap();
        assert_eq!(
            bounds,
            BoundingBox {
                min_lat: 0.0,
                max_lat: 2.0,
                min_lng: 0.0,
                max_lng: 2.0,
            }
        );
    }

    #[test]
    fn test_bounding_box_single_point() {
        let bounds = bounding_box(&ring(&[(13.75, 100.5)])).unwrap();
        assert_eq!(bounds.min_lat, 13.75);
        assert_eq!(bounds.max_lat, 13.75);
        assert!(bounds.is_degenerate());
    }

    #[test]
    fn test_bounding_box_negative_coordinates() {
        let bounds =
            bounding_box(&ring(&[(-33.9, 18.4), (-34.1, 18.6), (-33.8, 18.5)])).unwrap();
        assert_eq!(bounds.min_lat, -34.1);
        assert_eq!(bounds.max_lat, -33.8);
        assert_eq!(bounds.min_lng, 18.4);
        assert_eq!(bounds.max_lng, 18.6);
    }

    #[test]
    fn test_bounding_box_empty_fails() {
        assert!(matches!(
            bounding_box(&[]),
            Err(GeometryError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_center() {
        let bounds = bounding_box(&ring(&[(0.0, 0.0), (0.0, 2.0), (2.0, 0.0)])).unwrap();
        assert_eq!(bounds.center(), Coordinate::new(1.0, 1.0));
    }

    #[test]
    fn test_grid_full_resolution() {
        let bounds = bounding_box(&ring(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        let grid = bounds.grid(10);
        assert_eq!(grid.len(), 100);
        assert!(grid.iter().all(|c| c.lat < 1.0 && c.lng < 1.0));
        assert_eq!(grid[0], Coordinate::new(0.0, 0.0));
    }

    #[test]
    fn test_grid_degenerate_axis_is_empty() {
        let bounds = bounding_box(&ring(&[(5.0, 0.0), (5.0, 3.0), (5.0, 1.0)])).unwrap();
        assert!(bounds.grid(10).is_empty());
    }

    #[test]
    fn test_grid_zero_resolution() {
        let bounds = bounding_box(&ring(&[(0.0, 0.0), (1.0, 1.0)])).unwrap();
        assert!(bounds.grid(0).is_empty());
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(100))]

            #[test]
            fn prop_box_contains_every_vertex(
                points in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 1..20)
            ) {
                let coords = ring(&points);
                let bounds = bounding_box(&coords).unwrap();
                for c in &coords {
                    prop_assert!(c.lat >= bounds.min_lat && c.lat <= bounds.max_lat);
                    prop_assert!(c.lng >= bounds.min_lng && c.lng <= bounds.max_lng);
                }
            }

            #[test]
            fn prop_grid_never_exceeds_resolution(
                points in prop::collection::vec((-90.0f64..90.0, -180.0f64..180.0), 1..20),
                n in 0usize..16,
            ) {
                let bounds = bounding_box(&ring(&points)).unwrap();
                prop_assert!(bounds.grid(n).len() <= n * n);
            }
        }
    }
}
