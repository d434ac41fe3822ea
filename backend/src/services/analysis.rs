//! Field analysis pipeline
//!
//! Runs synthetic index generation and then the interpretation request for a
//! committed field, writing each stage into the session under the field's
//! ticket. A superseded run stops at its next write.

use shared::FarmField;
use tokio::task::JoinHandle;
use tracing::Instrument;

use crate::services::{FieldDataService, InterpretationService};
use crate::state::{AnalysisTicket, SessionAction, SessionStore, TransitionError};

/// How a pipeline run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineOutcome {
    /// Analysis and interpretation were both stored
    Completed,
    /// A newer field was committed before this run could store its results
    Superseded,
    /// Index generation failed
    Failed,
}

#[derive(Clone)]
pub struct AnalysisPipeline {
    store: SessionStore,
    field_data: FieldDataService,
    interpretation: InterpretationService,
}

impl AnalysisPipeline {
    pub fn new(
        store: SessionStore,
        field_data: FieldDataService,
        interpretation: InterpretationService,
    ) -> Self {
        Self {
            store,
            field_data,
            interpretation,
        }
    }

    /// Whether interpretations will reach the text-generation service
    pub fn interpretation_configured(&self) -> bool {
        self.interpretation.is_configured()
    }

    /// Run the pipeline in the background
    pub fn spawn(&self, field: FarmField, ticket: AnalysisTicket) -> JoinHandle<PipelineOutcome> {
        let pipeline = self.clone();
        tokio::spawn(async move { pipeline.run(field, ticket).await })
    }

    /// Generate indices, then request the interpretation
    pub async fn run(&self, field: FarmField, ticket: AnalysisTicket) -> PipelineOutcome {
        let span = tracing::info_span!("analysis", %ticket, field_id = %field.id);
        self.run_stages(field, ticket).instrument(span).await
    }

    async fn run_stages(&self, field: FarmField, ticket: AnalysisTicket) -> PipelineOutcome {
        let result = match self.field_data.process_field(&field).await {
            Ok(result) => result,
            Err(e) => {
                tracing::error!(%ticket, error = %e, "Index generation failed");
                let action = SessionAction::AnalysisFailed {
                    ticket,
                    reason: e.to_string(),
                };
                return match self.store.dispatch(action).await {
                    Err(TransitionError::Stale(_)) => PipelineOutcome::Superseded,
                    _ => PipelineOutcome::Failed,
                };
            }
        };

        let stored = self
            .store
            .dispatch(SessionAction::AnalysisReady {
                ticket,
                result: result.clone(),
            })
            .await;
        if let Err(e) = stored {
            tracing::info!(%ticket, reason = %e, "Discarding analysis");
            return PipelineOutcome::Superseded;
        }

        let text = self.interpretation.interpret(&result).await;

        match self
            .store
            .dispatch(SessionAction::InterpretationReady { ticket, text })
            .await
        {
            Ok(_) => {
                tracing::info!(%ticket, "Analysis complete");
                PipelineOutcome::Completed
            }
            Err(e) => {
                tracing::info!(%ticket, reason = %e, "Discarding interpretation");
                PipelineOutcome::Superseded
            }
        }
    }
}
