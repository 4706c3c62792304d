//! The two-phase report pipeline.
//!
//! Phase one sends the analyst briefing plus the raw log transcript and
//! gets back the initial report together with its `[n_steps:X]` marker.
//! Phase two expands each declared step with one further completion call,
//! strictly in index order. Every call is timed and costed; every response
//! is persisted as it arrives, so a failed run leaves behind exactly the
//! artifacts produced before the failure.

use std::io;
use std::sync::Arc;
use std::time::Instant;

use log::info;
use thiserror::Error;

use crate::artifacts::ArtifactStore;
use crate::prompts::{expansion_request, Locale};
use crate::reporter::summarize;
use crate::steps::{extract_step_count, StepMarkerError};
use report_core::{estimate_cost, ChatMessage, PricingConfig, ReportRun, StepRecord};
use report_llm::{CompletionError, CompletionProvider};

pub const DEFAULT_MAX_OUTPUT_TOKENS: u32 = 1500;

pub const INITIAL_REPORT_FILE: &str = "initial_report.txt";
pub const PERFORMANCE_REPORT_FILE: &str = "api_performance_report.txt";

#[derive(Debug, Error)]
pub enum PipelineError {
    #[error("segmentation call failed: {0}")]
    Segmentation(#[source] CompletionError),

    #[error("expansion of step {step} failed: {source}")]
    Expansion {
        step: u32,
        #[source]
        source: CompletionError,
    },

    #[error(transparent)]
    Marker(#[from] StepMarkerError),

    #[error("failed to persist artifact: {0}")]
    Artifact(#[from] io::Error),
}

/// Drives the segmentation and expansion phases against one completion
/// provider. Calls are issued one at a time; steps are never reordered,
/// skipped, or retried.
pub struct ReportPipeline {
    provider: Arc<dyn CompletionProvider>,
    artifacts: ArtifactStore,
    pricing: PricingConfig,
    max_output_tokens: u32,
    locale: Locale,
}

impl ReportPipeline {
    pub fn new(
        provider: Arc<dyn CompletionProvider>,
        artifacts: ArtifactStore,
        pricing: PricingConfig,
    ) -> Self {
        Self {
            provider,
            artifacts,
            pricing,
            max_output_tokens: DEFAULT_MAX_OUTPUT_TOKENS,
            locale: Locale::default(),
        }
    }

    pub fn with_max_output_tokens(mut self, max_output_tokens: u32) -> Self {
        self.max_output_tokens = max_output_tokens;
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    /// Run both phases and return the completed run.
    ///
    /// Any completion, marker, or artifact failure aborts immediately;
    /// step records produced before the failure are not rolled back.
    pub async fn run(&self, instructions: &str, log_text: &str) -> Result<ReportRun, PipelineError> {
        let run_start = Instant::now();

        let conversation = vec![ChatMessage::user(instructions), ChatMessage::user(log_text)];
        let initial = self
            .provider
            .complete(&conversation, self.max_output_tokens)
            .await
            .map_err(PipelineError::Segmentation)?;
        self.artifacts.write(INITIAL_REPORT_FILE, &initial.text)?;

        let step_count = extract_step_count(&initial.text)?;
        info!("segmentation identified {step_count} attack steps");

        let mut steps = Vec::with_capacity(step_count as usize);
        let mut total_cost_usd = 0.0;

        for index in 1..=step_count {
            let conversation = vec![
                ChatMessage::assistant(initial.text.clone()),
                ChatMessage::user(expansion_request(self.locale, index)),
            ];

            let step_start = Instant::now();
            let completion = self
                .provider
                .complete(&conversation, self.max_output_tokens)
                .await
                .map_err(|source| PipelineError::Expansion {
                    step: index,
                    source,
                })?;
            let duration_secs = step_start.elapsed().as_secs_f64();

            self.artifacts
                .write(&format!("expansion_step_{index}.txt"), &completion.text)?;

            let cost_usd = estimate_cost(completion.usage, &self.pricing);
            total_cost_usd += cost_usd;
            info!(
                "step {index}/{step_count}: {duration_secs:.2}s, {} tokens, ${cost_usd:.5}",
                completion.usage.total_tokens
            );

            steps.push(StepRecord {
                index,
                duration_secs,
                tokens_used: completion.usage.total_tokens,
                cost_usd,
                content: completion.text,
            });
        }

        let run = ReportRun {
            initial_response: initial.text,
            step_count,
            steps,
            total_duration_secs: run_start.elapsed().as_secs_f64(),
            total_cost_usd,
        };

        self.artifacts
            .write(PERFORMANCE_REPORT_FILE, &summarize(&run))?;
        info!(
            "report complete: {:.2}s total, ${:.5} estimated cost",
            run.total_duration_secs, run.total_cost_usd
        );

        Ok(run)
    }
}
