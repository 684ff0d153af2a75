//! Optional generated summary and improvement checklist for an evaluation.
//!
//! Generation is best effort. Every call runs under a timeout; a failure,
//! timeout or empty answer is logged and replaced by deterministic text, so
//! enrichment never turns a successful evaluation into an error.

pub mod gemini;
pub mod prompts;

use crate::config::EnrichmentConfig;
use crate::error::Result;
use crate::processing::evaluator::EvaluationResult;
use crate::processing::job::JobSpec;
use prompts::PromptTemplates;
use serde::{Deserialize, Serialize};
use std::future::Future;
use std::time::Duration;

pub use gemini::GeminiClient;

/// Summary used whenever none could be generated
pub const FALLBACK_SUMMARY: &str = "No summary generated.";

pub trait TextGenerator: Send + Sync {
    fn generate(&self, prompt: &str) -> impl Future<Output = Result<String>> + Send;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentSource {
    Generated,
    Fallback,
}

/// Evaluation plus the summary and the source of each narrative field.
/// `evaluation.feedback` holds the final feedback, generated or not.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnrichedEvaluation {
    #[serde(flatten)]
    pub evaluation: EvaluationResult,
    pub summary: String,
    pub summary_source: ContentSource,
    pub feedback_source: ContentSource,
}

impl EnrichedEvaluation {
    /// Record with deterministic text only
    pub fn fallback(evaluation: EvaluationResult) -> Self {
        Self {
            evaluation,
            summary: FALLBACK_SUMMARY.to_string(),
            summary_source: ContentSource::Fallback,
            feedback_source: ContentSource::Fallback,
        }
    }
}

pub struct Enricher<G> {
    generator: G,
    templates: PromptTemplates,
    timeout: Duration,
    resume_char_limit: usize,
}

impl<G: TextGenerator> Enricher<G> {
    pub fn new(generator: G, config: &EnrichmentConfig) -> Self {
        Self::with_timeout(
            generator,
            Duration::from_secs(config.timeout_secs),
            config.resume_char_limit,
        )
    }

    pub fn with_timeout(generator: G, timeout: Duration, resume_char_limit: usize) -> Self {
        Self {
            generator,
            templates: PromptTemplates::default(),
            timeout,
            resume_char_limit,
        }
    }

    pub async fn enrich(
        &self,
        evaluation: EvaluationResult,
        job: &JobSpec,
        resume_text: &str,
    ) -> EnrichedEvaluation {
        let summary_prompt = self.templates.render_summary(job, &evaluation);
        let checklist_prompt =
            self.templates
                .render_checklist(job, resume_text, self.resume_char_limit);

        let (summary, checklist) = tokio::join!(
            self.generate_text("summary", &summary_prompt),
            self.generate_text("feedback", &checklist_prompt)
        );

        let mut enriched = EnrichedEvaluation::fallback(evaluation);
        if let Some(summary) = summary {
            enriched.summary = summary;
            enriched.summary_source = ContentSource::Generated;
        }
        if let Some(feedback) = checklist {
            enriched.evaluation.feedback = feedback;
            enriched.feedback_source = ContentSource::Generated;
        }
        enriched
    }

    /// Trimmed generated text, or `None` after logging why there is none
    async fn generate_text(&self, label: &str, prompt: &str) -> Option<String> {
        match tokio::time::timeout(self.timeout, self.generator.generate(prompt)).await {
            Ok(Ok(text)) if !text.trim().is_empty() => Some(text.trim().to_string()),
            Ok(Ok(_)) => {
                log::warn!("Generated {} was empty, using fallback", label);
                None
            }
            Ok(Err(e)) => {
                log::warn!("Generating {} failed: {}", label, e);
                None
            }
            Err(_) => {
                log::warn!("Generating {} timed out after {:?}", label, self.timeout);
                None
            }
        }
    }
}
