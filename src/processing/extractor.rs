//! Requirement extraction: job requirement phrases to canonical, comparable terms

use crate::processing::job::JobSpec;
use crate::processing::text_processor::fold_typography;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Canonical requirement terms for one job, in original order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequirementTerms {
    pub must_terms: Vec<String>,
    pub good_terms: Vec<String>,
}

impl RequirementTerms {
    pub fn total(&self) -> usize {
        self.must_terms.len() + self.good_terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }

    /// Must-have terms first, then good-to-have terms
    pub fn all_terms(&self) -> impl Iterator<Item = &String> {
        self.must_terms.iter().chain(self.good_terms.iter())
    }
}

/// Fold typography, lower-case, trim and collapse internal whitespace.
/// Returns `None` for blank input.
pub fn normalize_term(raw: &str) -> Option<String> {
    let collapsed = fold_typography(raw)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase();

    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

/// Normalize and deduplicate a term list. First occurrence wins.
pub fn canonical_terms<I, S>(raw: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut seen = HashSet::new();
    let mut terms = Vec::new();

    for item in raw {
        if let Some(term) = normalize_term(item.as_ref()) {
            if seen.insert(term.clone()) {
                terms.push(term);
            }
        }
    }

    terms
}

/// Extract `must_terms` and `good_terms` from a job.
///
/// Pure: same job, same terms. A term listed under both groups is kept only
/// as a must-have so it is neither scored nor reported twice.
pub fn extract_requirements(job: &JobSpec) -> RequirementTerms {
    let must_terms = canonical_terms(job.must_have());
    let must_set: HashSet<&str> = must_terms.iter().map(String::as_str).collect();

    let good_terms = canonical_terms(job.good_to_have())
        .into_iter()
        .filter(|term| !must_set.contains(term.as_str()))
        .collect();

    RequirementTerms {
        must_terms,
        good_terms,
    }
}
