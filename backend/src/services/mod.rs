//! Business logic services for the AgriSights field monitor

pub mod analysis;
pub mod field_data;
pub mod interpretation;

pub use analysis::{AnalysisPipeline, PipelineOutcome};
pub use field_data::FieldDataService;
pub use interpretation::InterpretationService;
