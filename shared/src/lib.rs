//! Shared types and models for the AgriSights field monitor
//!
//! This crate contains the domain records and pure logic shared between the
//! backend, the browser front-end (via WASM), and the tests.

pub mod drawing;
pub mod geometry;
pub mod models;
pub mod types;
pub mod validation;

pub use drawing::*;
pub use geometry::*;
pub use models::*;
pub use types::*;
pub use validation::*;
