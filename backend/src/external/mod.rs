//! External API integrations

use async_trait::async_trait;

use crate::error::AppResult;

pub mod gemini;

pub use gemini::GeminiClient;

/// A text-generation backend: one prompt in, generated prose out.
///
/// Latency is unbounded and any call may fail.
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Whether a credential is present; unconfigured generators are never called
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate_text(&self, prompt: &str) -> AppResult<String>;
}
