//! Semantic similarity between job text and resume text
//!
//! Two backends share one contract: deterministic for fixed inputs and
//! bounded to [0, 1]. Model2Vec static embeddings are preferred; when the
//! model cannot be loaded a bag-of-words cosine with topic features takes
//! over. Scoring never fails.

use crate::error::{Result, RelevanceError};
use crate::processing::synonyms::concept_of;
use crate::processing::text_processor::TextProcessor;
use log::{info, warn};
use model2vec_rs::model::StaticModel;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::path::Path;
use std::sync::{Arc, OnceLock};
use std::time::Instant;

/// Weight of a token's topic feature relative to the token itself
const CONCEPT_WEIGHT: f64 = 0.5;

static SHARED_BACKEND: OnceLock<Arc<dyn SimilarityBackend>> = OnceLock::new();

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SemanticBackendKind {
    Model2Vec,
    Statistical,
}

impl fmt::Display for SemanticBackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SemanticBackendKind::Model2Vec => write!(f, "model2vec"),
            SemanticBackendKind::Statistical => write!(f, "statistical"),
        }
    }
}

pub trait SimilarityBackend: Send + Sync {
    fn kind(&self) -> SemanticBackendKind;

    /// Similarity in [0, 1]
    fn similarity(&self, job_text: &str, resume_text: &str) -> f64;
}

pub struct Model2VecBackend {
    model: StaticModel,
}

impl Model2VecBackend {
    /// Load a Model2Vec model from a local directory
    pub fn load(model_path: &Path) -> Result<Self> {
        if !model_path.exists() {
            return Err(RelevanceError::ModelUnavailable(format!(
                "model directory not found: {}",
                model_path.display()
            )));
        }

        let start_time = Instant::now();
        let model = StaticModel::from_pretrained(model_path, None, None, None)?;
        info!(
            "Loaded Model2Vec model from {} in {:.2?}",
            model_path.display(),
            start_time.elapsed()
        );

        Ok(Self { model })
    }
}

impl SimilarityBackend for Model2VecBackend {
    fn kind(&self) -> SemanticBackendKind {
        SemanticBackendKind::Model2Vec
    }

    fn similarity(&self, job_text: &str, resume_text: &str) -> f64 {
        let job_embedding = self.model.encode_single(job_text);
        let resume_embedding = self.model.encode_single(resume_text);
        cosine_similarity(&job_embedding, &resume_embedding).clamp(0.0, 1.0)
    }
}

/// Bag-of-words cosine. Each token also adds a weighted topic feature, so
/// related wording overlaps without a literal match.
pub struct StatisticalBackend {
    processor: TextProcessor,
}

impl Default for StatisticalBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl StatisticalBackend {
    pub fn new() -> Self {
        Self {
            processor: TextProcessor::new(),
        }
    }

    fn feature_vector(&self, text: &str) -> BTreeMap<String, f64> {
        let mut features = BTreeMap::new();

        for (token, count) in self.processor.term_frequencies(text) {
            // Sub-linear term frequency keeps repeated words from dominating
            let weight = 1.0 + count.ln();
            if let Some(concept) = concept_of(&token) {
                *features.entry(concept.to_string()).or_insert(0.0) += CONCEPT_WEIGHT * weight;
            }
            *features.entry(token).or_insert(0.0) += weight;
        }

        features
    }
}

impl SimilarityBackend for StatisticalBackend {
    fn kind(&self) -> SemanticBackendKind {
        SemanticBackendKind::Statistical
    }

    fn similarity(&self, job_text: &str, resume_text: &str) -> f64 {
        let job_features = self.feature_vector(job_text);
        let resume_features = self.feature_vector(resume_text);
        sparse_cosine(&job_features, &resume_features).clamp(0.0, 1.0)
    }
}

/// Scores job/resume similarity on a 0 to 100 scale
#[derive(Clone)]
pub struct SemanticMatcher {
    backend: Arc<dyn SimilarityBackend>,
}

impl SemanticMatcher {
    pub fn new(backend: Arc<dyn SimilarityBackend>) -> Self {
        Self { backend }
    }

    /// Matcher over the process-wide backend, see [`shared_backend`]
    pub fn shared(model_path: Option<&Path>) -> Self {
        Self::new(shared_backend(model_path))
    }

    pub fn statistical() -> Self {
        Self::new(Arc::new(StatisticalBackend::new()))
    }

    pub fn backend_kind(&self) -> SemanticBackendKind {
        self.backend.kind()
    }

    /// Similarity scaled to [0, 100]. Blank text on either side scores 0.
    pub fn score(&self, job_text: &str, resume_text: &str) -> f64 {
        if job_text.trim().is_empty() || resume_text.trim().is_empty() {
            return 0.0;
        }

        let similarity = self.backend.similarity(job_text, resume_text);
        if similarity.is_nan() {
            warn!("{} backend produced NaN similarity, scoring 0", self.backend.kind());
            return 0.0;
        }

        (similarity * 100.0).clamp(0.0, 100.0)
    }
}

/// Process-wide similarity backend, initialised once on first use.
///
/// Concurrent first callers race safely; exactly one initialiser runs and the
/// `model_path` seen by it decides the backend for the process lifetime. A
/// model that fails to load is logged and replaced by [`StatisticalBackend`].
pub fn shared_backend(model_path: Option<&Path>) -> Arc<dyn SimilarityBackend> {
    SHARED_BACKEND
        .get_or_init(|| load_backend(model_path))
        .clone()
}

fn load_backend(model_path: Option<&Path>) -> Arc<dyn SimilarityBackend> {
    let Some(path) = model_path else {
        info!("No embedding model configured, using statistical similarity");
        return Arc::new(StatisticalBackend::new());
    };

    match Model2VecBackend::load(path) {
        Ok(backend) => Arc::new(backend),
        Err(e) => {
            warn!("{}; falling back to statistical similarity", e);
            Arc::new(StatisticalBackend::new())
        }
    }
}

/// Cosine similarity of two dense vectors; 0 for mismatched or zero vectors
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f64 {
    if a.len() != b.len() || a.is_empty() {
        return 0.0;
    }

    let dot_product: f64 = a.iter().zip(b.iter()).map(|(x, y)| *x as f64 * *y as f64).sum();
    let norm_a: f64 = a.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();
    let norm_b: f64 = b.iter().map(|x| (*x as f64).powi(2)).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

fn sparse_cosine(a: &BTreeMap<String, f64>, b: &BTreeMap<String, f64>) -> f64 {
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let dot_product: f64 = a
        .iter()
        .filter_map(|(key, x)| b.get(key).map(|y| x * y))
        .sum();
    let norm_a = a.values().map(|x| x * x).sum::<f64>().sqrt();
    let norm_b = b.values().map(|x| x * x).sum::<f64>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot_product / (norm_a * norm_b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_text_scores_floor() {
        let matcher = SemanticMatcher::statistical();
        assert_eq!(matcher.score("python developer", ""), 0.0);
        assert_eq!(matcher.score("  ", "python developer"), 0.0);
    }

    #[test]
    fn test_identical_text_scores_top() {
        let matcher = SemanticMatcher::statistical();
        let text = "Senior Rust engineer building distributed storage";
        let score = matcher.score(text, text);
        assert!((score - 100.0).abs() < 1e-9, "score was {}", score);
    }

    #[test]
    fn test_related_wording_scores_without_literal_match() {
        let matcher = SemanticMatcher::statistical();
        let score = matcher.score("distributed systems", "Built scalable backend services");
        assert!(score > 0.0, "score was {}", score);
    }

    #[test]
    fn test_related_resume_beats_unrelated_resume() {
        let matcher = SemanticMatcher::statistical();
        let job = "Data engineer: python, sql, airflow pipelines and data warehouse design";
        let related = "Python developer who designed SQL databases and ETL pipelines";
        let unrelated = "Pastry chef specialising in sourdough and laminated doughs";

        assert!(matcher.score(job, related) > matcher.score(job, unrelated));
    }

    #[test]
    fn test_scores_are_bounded_and_deterministic() {
        let matcher = SemanticMatcher::statistical();
        let job = "Frontend developer react typescript css";
        let resume = "React and TypeScript UI work, CSS animations, accessibility audits";

        let first = matcher.score(job, resume);
        let second = matcher.score(job, resume);

        assert_eq!(first, second);
        assert!((0.0..=100.0).contains(&first));
    }

    #[test]
    fn test_missing_model_is_unavailable() {
        let err = Model2VecBackend::load(Path::new("/definitely/not/a/model")).err();
        assert!(matches!(err, Some(RelevanceError::ModelUnavailable(_))));
    }

    #[test]
    fn test_load_backend_falls_back_to_statistical() {
        let backend = load_backend(Some(Path::new("/definitely/not/a/model")));
        assert_eq!(backend.kind(), SemanticBackendKind::Statistical);

        let backend = load_backend(None);
        assert_eq!(backend.kind(), SemanticBackendKind::Statistical);
    }

    #[test]
    fn test_shared_backend_initialises_once() {
        let handles: Vec<_> = (0..8)
            .map(|_| std::thread::spawn(|| shared_backend(None)))
            .collect();

        let backends: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        for backend in &backends[1..] {
            assert!(Arc::ptr_eq(&backends[0], backend));
        }
    }

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-9);
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
        assert_eq!(cosine_similarity(&[1.0], &[1.0, 2.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 2.0]), 0.0);
    }
}
