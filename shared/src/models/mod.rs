//! Domain models for the AgriSights field monitor

mod analysis;
mod field;
mod index;

pub use analysis::*;
pub use field::*;
pub use index::*;
