//! Report data handed to the output formatters

use crate::enrichment::EnrichedEvaluation;
use crate::processing::hard_matcher::HardMatchResult;
use crate::processing::job::JobSpec;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub metadata: ReportMetadata,
    pub job: JobSpec,
    pub evaluation: EnrichedEvaluation,
    /// Per-term match breakdown, present in detailed reports
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub hard_match: Option<HardMatchResult>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportMetadata {
    pub generated_at: DateTime<Utc>,
    pub engine_version: String,
    pub resume_file: String,
    pub job_file: String,
    pub processing_time_ms: u64,
}

impl ReportMetadata {
    pub fn new(resume_file: impl Into<String>, job_file: impl Into<String>, processing_time_ms: u64) -> Self {
        Self {
            generated_at: Utc::now(),
            engine_version: env!("CARGO_PKG_VERSION").to_string(),
            resume_file: resume_file.into(),
            job_file: job_file.into(),
            processing_time_ms,
        }
    }
}

impl EvaluationReport {
    pub fn new(
        metadata: ReportMetadata,
        job: JobSpec,
        evaluation: EnrichedEvaluation,
        hard_match: Option<HardMatchResult>,
    ) -> Self {
        Self {
            metadata,
            job,
            evaluation,
            hard_match,
        }
    }
}
