//! Relevance evaluation pipeline: requirements, hard match, semantic match,
//! score composition and fallback feedback in one pure pass

use crate::config::{Config, ScoringConfig};
use crate::processing::extractor::extract_requirements;
use crate::processing::feedback::FeedbackSynthesizer;
use crate::processing::hard_matcher::{HardMatchResult, HardMatcher};
use crate::processing::job::JobSpec;
use crate::processing::scoring::{round_score, ScoreComposer, Verdict};
use crate::processing::semantic::{SemanticBackendKind, SemanticMatcher};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Outcome of one evaluation. Built once, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    /// Composite score, 0 to 100
    pub score: u8,
    pub verdict: Verdict,
    pub hard_score: f64,
    pub semantic_score: f64,
    /// Unmatched must-have terms first, then good-to-have terms
    pub missing_skills: Vec<String>,
    /// Deterministic fallback feedback
    pub feedback: String,
    /// Which similarity backend produced `semantic_score`
    pub semantic_backend: SemanticBackendKind,
}

pub struct Evaluator {
    hard_matcher: HardMatcher,
    semantic_matcher: SemanticMatcher,
    composer: ScoreComposer,
    synthesizer: FeedbackSynthesizer,
}

impl Evaluator {
    /// Evaluator with the default weights over the given semantic matcher
    pub fn new(semantic_matcher: SemanticMatcher) -> Self {
        Self::with_scoring(semantic_matcher, &ScoringConfig::default())
    }

    pub fn with_scoring(semantic_matcher: SemanticMatcher, scoring: &ScoringConfig) -> Self {
        Self {
            hard_matcher: HardMatcher::with_weights(scoring.must_weight, scoring.good_weight),
            semantic_matcher,
            composer: ScoreComposer::new(scoring.alpha),
            synthesizer: FeedbackSynthesizer::new(),
        }
    }

    /// Evaluator over the process-wide similarity backend for the configured model
    pub fn from_config(config: &Config) -> Self {
        let model_path = config.embedding_model_path();
        let semantic_matcher = SemanticMatcher::shared(Some(&model_path));
        Self::with_scoring(semantic_matcher, &config.scoring)
    }

    pub fn semantic_backend(&self) -> SemanticBackendKind {
        self.semantic_matcher.backend_kind()
    }

    /// Score `resume_text` against `job`. Total: empty text and empty jobs
    /// produce a valid result.
    pub fn evaluate(&self, resume_text: &str, job: &JobSpec) -> EvaluationResult {
        self.evaluate_with_details(resume_text, job).0
    }

    /// Same as [`Evaluator::evaluate`], also returning the per-term hard match
    pub fn evaluate_with_details(
        &self,
        resume_text: &str,
        job: &JobSpec,
    ) -> (EvaluationResult, HardMatchResult) {
        let start_time = Instant::now();

        let terms = extract_requirements(job);
        let hard_match = self.hard_matcher.match_requirements(&terms, resume_text);
        let semantic_raw = self
            .semantic_matcher
            .score(&job.descriptive_text(), resume_text);

        let hard_score = round_score(hard_match.hard_score);
        let semantic_score = round_score(semantic_raw);
        let (score, verdict) = self.composer.classify(hard_score, semantic_score);

        let feedback = self.synthesizer.synthesize(
            score,
            verdict,
            &hard_match.missing_skills,
            &terms.must_terms,
        );

        log::debug!(
            "Evaluated '{}': score {} ({}), hard {:.2}, semantic {:.2} via {} in {:.2?}",
            job.title(),
            score,
            verdict,
            hard_score,
            semantic_score,
            self.semantic_matcher.backend_kind(),
            start_time.elapsed()
        );

        let result = EvaluationResult {
            score,
            verdict,
            hard_score,
            semantic_score,
            missing_skills: hard_match.missing_skills.clone(),
            feedback,
            semantic_backend: self.semantic_matcher.backend_kind(),
        };

        (result, hard_match)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn evaluator() -> Evaluator {
        Evaluator::new(SemanticMatcher::statistical())
    }

    fn job(must: &[&str], good: &[&str]) -> JobSpec {
        JobSpec::new(
            "Backend Developer",
            must.iter().map(|s| s.to_string()).collect(),
            good.iter().map(|s| s.to_string()).collect(),
            "",
        )
    }

    #[test]
    fn test_python_sql_scenario() {
        let result = evaluator().evaluate(
            "Experienced Python developer, SQL databases",
            &job(&["python", "sql"], &["docker"]),
        );

        assert_eq!(result.missing_skills, vec!["docker"]);
        assert_eq!(result.hard_score, 75.0);
        assert!(matches!(result.verdict, Verdict::Medium | Verdict::High));
        assert!(result.feedback.contains("docker"));
    }

    #[test]
    fn test_empty_resume_scenario() {
        let result = evaluator().evaluate("", &job(&["python", "sql"], &["docker"]));

        assert_eq!(result.hard_score, 0.0);
        assert_eq!(result.semantic_score, 0.0);
        assert_eq!(result.score, 0);
        assert_eq!(result.verdict, Verdict::Low);
        assert_eq!(result.missing_skills, vec!["python", "sql", "docker"]);
    }

    #[test]
    fn test_no_requirements() {
        let result = evaluator().evaluate("Anything at all", &job(&[], &[]));

        assert_eq!(result.hard_score, 100.0);
        assert!(result.missing_skills.is_empty());
    }

    #[test]
    fn test_everything_present() {
        let result = evaluator().evaluate(
            "Rust and Go services on Kubernetes, tested with property tests",
            &job(&["rust", "kubernetes"], &["go"]),
        );

        assert!(result.missing_skills.is_empty());
        assert_eq!(result.hard_score, 100.0);
        assert!(result.score >= 70);
    }

    #[test]
    fn test_verbatim_typographic_requirements_are_found() {
        let posting = JobSpec::new(
            "Analyst",
            vec!["Bachelor\u{2019}s degree".to_string()],
            vec!["\u{201C}data storytelling\u{201D}".to_string()],
            "",
        );
        let result = evaluator().evaluate(
            "Holds a Bachelor\u{2019}s degree in CS and teaches \u{201C}data storytelling\u{201D}",
            &posting,
        );

        assert!(result.missing_skills.is_empty(), "missing: {:?}", result.missing_skills);
        assert_eq!(result.hard_score, 100.0);
    }

    #[test]
    fn test_idempotent() {
        let evaluator = evaluator();
        let posting = job(&["python", "sql"], &["docker", "aws"]);
        let resume = "Python and AWS engineer who likes Postgres";

        let first = serde_json::to_string(&evaluator.evaluate(resume, &posting)).unwrap();
        let second = serde_json::to_string(&evaluator.evaluate(resume, &posting)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_score_is_function_of_sub_scores() {
        let evaluator = evaluator();
        let composer = ScoreComposer::default();
        let result = evaluator.evaluate(
            "Java developer with Spring and some Docker",
            &job(&["java", "spring", "kafka"], &["docker"]),
        );

        assert_eq!(
            result.score,
            composer.compose(result.hard_score, result.semantic_score)
        );
        assert_eq!(result.verdict, Verdict::from_score(result.score));
    }

    #[test]
    fn test_bounds() {
        let evaluator = evaluator();
        let resumes = ["", "python", "Python SQL Docker AWS Kafka Spark", "🦀 crabs"];
        for resume in resumes {
            let result = evaluator.evaluate(resume, &job(&["python"], &["docker"]));
            assert!((0.0..=100.0).contains(&result.hard_score));
            assert!((0.0..=100.0).contains(&result.semantic_score));
            assert!(result.score <= 100);
        }
    }

    #[test]
    fn test_custom_scoring_weights() {
        let scoring = ScoringConfig {
            alpha: 1.0,
            must_weight: 4.0,
            good_weight: 1.0,
        };
        let evaluator = Evaluator::with_scoring(SemanticMatcher::statistical(), &scoring);
        let result = evaluator.evaluate("python", &job(&["python"], &["docker"]));

        assert_eq!(result.hard_score, 80.0);
        assert_eq!(result.score, 80);
    }

    #[test]
    fn test_serializes_expected_fields() {
        let result = evaluator().evaluate("python", &job(&["python"], &[]));
        let value = serde_json::to_value(&result).unwrap();

        for field in [
            "score",
            "verdict",
            "hard_score",
            "semantic_score",
            "missing_skills",
            "feedback",
            "semantic_backend",
        ] {
            assert!(value.get(field).is_some(), "missing field {}", field);
        }
        assert_eq!(value["semantic_backend"], "statistical");
    }
}
