//! Agronomic interpretation of field analyses
//!
//! Best effort: every failure collapses into a fixed message for the panel.

use std::fmt::Write as _;
use std::sync::Arc;

use shared::AnalysisResult;

use crate::external::TextGenerator;

/// Shown when no text-generation credential is configured
pub const MISSING_CONFIGURATION_MESSAGE: &str =
    "API Key is missing. Please configure the environment variable.";

/// Shown when the service answers with no text
pub const EMPTY_RESPONSE_MESSAGE: &str = "Could not generate interpretation.";

/// Shown when the request fails
pub const UNAVAILABLE_MESSAGE: &str =
    "AI analysis currently unavailable due to network or configuration issues.";

/// Interpretation service backed by a text generator
#[derive(Clone)]
pub struct InterpretationService {
    generator: Arc<dyn TextGenerator>,
}

impl InterpretationService {
    /// Create a new InterpretationService instance
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator }
    }

    pub fn is_configured(&self) -> bool {
        self.generator.is_configured()
    }

    /// Summarize an analysis for the farmer. Never fails.
    pub async fn interpret(&self, data: &AnalysisResult) -> String {
        if !self.generator.is_configured() {
            tracing::debug!(field_id = %data.field_id, "Skipping interpretation, no API key");
            return MISSING_CONFIGURATION_MESSAGE.to_string();
        }

        let prompt = build_prompt(data);

        match self.generator.generate_text(&prompt).await {
            Ok(text) if text.is_empty() => {
                tracing::warn!(field_id = %data.field_id, "Text generation returned no text");
                EMPTY_RESPONSE_MESSAGE.to_string()
            }
            Ok(text) => text,
            Err(e) => {
                tracing::error!(field_id = %data.field_id, error = %e, "Text generation failed");
                UNAVAILABLE_MESSAGE.to_string()
            }
        }
    }
}

/// Prompt asking for a short agronomic summary of the analysis
pub fn build_prompt(data: &AnalysisResult) -> String {
    let mut trend = String::new();
    for point in &data.history {
        let _ = writeln!(
            trend,
            "{}: NDVI {:.2}, NDWI {:.2}",
            point.date, point.ndvi, point.ndwi
        );
    }

    format!(
        "You are an expert agronomist. Analyze the following satellite index data for a farm field.

Current Metrics:
- NDVI (Vegetation Health -1 to 1): {ndvi:.2}
- NDWI (Water Stress -1 to 1): {ndwi:.2}
- Soil Moisture Index (0 to 1): {moisture:.2}

Historical Trend (last {months} months):
{trend}
Provide a concise, helpful summary for the farmer.
1. Assess crop health.
2. Identify potential water stress or irrigation needs.
3. Suggest one actionable step.

Keep it under 100 words. Use professional but accessible language.
",
        ndvi = data.current_ndvi,
        ndwi = data.current_ndwi,
        moisture = data.current_moisture,
        months = data.history.len(),
        trend = trend,
    )
}
