//! Deterministic keyword matching of requirement terms against resume text

use crate::processing::extractor::{normalize_term, RequirementTerms};
use crate::processing::scoring::{W_GOOD, W_MUST};
use crate::processing::synonyms::variants_of;
use crate::processing::text_processor::TextProcessor;
use aho_corasick::{AhoCorasick, MatchKind};
use serde::{Deserialize, Serialize};

/// Matches requirement terms (and their known variants) on token boundaries
pub struct HardMatcher {
    processor: TextProcessor,
    must_weight: f64,
    good_weight: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HardMatchResult {
    /// Weighted share of satisfied requirements, 0 to 100
    pub hard_score: f64,
    pub matched_must: Vec<String>,
    pub matched_good: Vec<String>,
    /// Unmatched must-have terms, then unmatched good-to-have terms
    pub missing_skills: Vec<String>,
    pub total_must: usize,
    pub total_good: usize,
}

impl Default for HardMatcher {
    fn default() -> Self {
        Self::new()
    }
}

impl HardMatcher {
    pub fn new() -> Self {
        Self::with_weights(W_MUST, W_GOOD)
    }

    pub fn with_weights(must_weight: f64, good_weight: f64) -> Self {
        Self {
            processor: TextProcessor::new(),
            must_weight,
            good_weight,
        }
    }

    /// Decide presence of every term and score the outcome.
    ///
    /// A job with no requirements scores 100 with nothing missing.
    pub fn match_requirements(&self, terms: &RequirementTerms, resume_text: &str) -> HardMatchResult {
        let total_must = terms.must_terms.len();
        let total_good = terms.good_terms.len();

        if terms.is_empty() {
            return HardMatchResult {
                hard_score: 100.0,
                matched_must: Vec::new(),
                matched_good: Vec::new(),
                missing_skills: Vec::new(),
                total_must,
                total_good,
            };
        }

        let normalized = self.processor.normalize_for_matching(resume_text);
        let all_terms: Vec<&String> = terms.all_terms().collect();
        let present = self.find_present_terms(&all_terms, &normalized);

        let mut matched_must = Vec::new();
        let mut matched_good = Vec::new();
        let mut missing_skills = Vec::new();

        for (idx, term) in all_terms.iter().enumerate() {
            match (present[idx], idx < total_must) {
                (true, true) => matched_must.push((*term).clone()),
                (true, false) => matched_good.push((*term).clone()),
                (false, _) => missing_skills.push((*term).clone()),
            }
        }

        let hard_score = self.weighted_score(
            matched_must.len(),
            total_must,
            matched_good.len(),
            total_good,
        );

        log::debug!(
            "Hard match: {}/{} must-have, {}/{} good-to-have, score {:.2}",
            matched_must.len(),
            total_must,
            matched_good.len(),
            total_good,
            hard_score
        );

        HardMatchResult {
            hard_score,
            matched_must,
            matched_good,
            missing_skills,
            total_must,
            total_good,
        }
    }

    /// `100 * (w_must * m/M + w_good * g/G) / (w_must + w_good)`; an empty
    /// group drops out of both the numerator and the weight sum.
    pub fn weighted_score(
        &self,
        matched_must: usize,
        total_must: usize,
        matched_good: usize,
        total_good: usize,
    ) -> f64 {
        let mut weighted = 0.0;
        let mut weight_sum = 0.0;

        if total_must > 0 {
            weighted += self.must_weight * matched_must as f64 / total_must as f64;
            weight_sum += self.must_weight;
        }
        if total_good > 0 {
            weighted += self.good_weight * matched_good as f64 / total_good as f64;
            weight_sum += self.good_weight;
        }

        if weight_sum == 0.0 {
            100.0
        } else {
            (100.0 * weighted / weight_sum).clamp(0.0, 100.0)
        }
    }

    /// Presence flag per term, in the order given
    fn find_present_terms(&self, terms: &[&String], text: &str) -> Vec<bool> {
        let mut present = vec![false; terms.len()];
        if text.is_empty() {
            return present;
        }

        let mut patterns = Vec::new();
        let mut owners = Vec::new();
        for (idx, term) in terms.iter().enumerate() {
            for variant in variants_of(term) {
                if let Some(pattern) = normalize_term(&variant) {
                    patterns.push(pattern);
                    owners.push(idx);
                }
            }
        }

        match AhoCorasick::builder()
            .ascii_case_insensitive(true)
            .match_kind(MatchKind::Standard)
            .build(&patterns)
        {
            Ok(automaton) => {
                for mat in automaton.find_overlapping_iter(text) {
                    if is_token_boundary(text, mat.start(), mat.end()) {
                        present[owners[mat.pattern().as_usize()]] = true;
                    }
                }
            }
            Err(e) => {
                log::warn!("Keyword automaton unavailable ({}), scanning terms one by one", e);
                for (pattern, &owner) in patterns.iter().zip(owners.iter()) {
                    if present[owner] {
                        continue;
                    }
                    present[owner] = text
                        .match_indices(pattern.as_str())
                        .any(|(start, m)| is_token_boundary(text, start, start + m.len()));
                }
            }
        }

        present
    }
}

/// Neither neighbour of `text[start..end]` is alphanumeric
fn is_token_boundary(text: &str, start: usize, end: usize) -> bool {
    let before = text[..start].chars().next_back();
    let after = text[end..].chars().next();
    !before.map_or(false, char::is_alphanumeric) && !after.map_or(false, char::is_alphanumeric)
}
