//! Typed job specification, built once at the job store boundary

use crate::error::{Result, RelevanceError};
use crate::processing::extractor::canonical_terms;
use serde::{Deserialize, Serialize};

/// Immutable job requirements. Terms are lower-cased, trimmed, non-empty and
/// deduplicated at construction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "JobRecord")]
pub struct JobSpec {
    title: String,
    must_have: Vec<String>,
    good_to_have: Vec<String>,
    qualifications: String,
}

/// Loosely-typed job as found in job files
#[derive(Debug, Clone, Default, Deserialize)]
struct JobRecord {
    #[serde(default)]
    title: String,
    #[serde(default)]
    must_have: Vec<String>,
    #[serde(default)]
    good_to_have: Vec<String>,
    #[serde(default)]
    qualifications: String,
}

impl From<JobRecord> for JobSpec {
    fn from(record: JobRecord) -> Self {
        JobSpec::new(
            record.title,
            record.must_have,
            record.good_to_have,
            record.qualifications,
        )
    }
}

impl JobSpec {
    pub fn new(
        title: impl Into<String>,
        must_have: Vec<String>,
        good_to_have: Vec<String>,
        qualifications: impl Into<String>,
    ) -> Self {
        Self {
            title: title.into().trim().to_string(),
            must_have: canonical_terms(must_have),
            good_to_have: canonical_terms(good_to_have),
            qualifications: qualifications.into().trim().to_string(),
        }
    }

    /// Build from job-creation form input, where requirements are comma-separated
    pub fn from_form(title: &str, must_have: &str, good_to_have: &str, qualifications: &str) -> Self {
        Self::new(
            title,
            split_comma_list(must_have),
            split_comma_list(good_to_have),
            qualifications,
        )
    }

    /// Build from a stored record whose requirement lists are JSON-encoded arrays.
    /// An empty column is treated as `[]`.
    pub fn from_stored(
        title: &str,
        must_have_json: &str,
        good_to_have_json: &str,
        qualifications: &str,
    ) -> Result<Self> {
        let must_have = parse_stored_list("must_have", must_have_json)?;
        let good_to_have = parse_stored_list("good_to_have", good_to_have_json)?;
        Ok(Self::new(title, must_have, good_to_have, qualifications))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn must_have(&self) -> &[String] {
        &self.must_have
    }

    pub fn good_to_have(&self) -> &[String] {
        &self.good_to_have
    }

    pub fn qualifications(&self) -> &str {
        &self.qualifications
    }

    /// Title, qualifications and every requirement term, for the semantic matcher
    pub fn descriptive_text(&self) -> String {
        let mut parts: Vec<&str> = Vec::new();
        if !self.title.is_empty() {
            parts.push(&self.title);
        }
        if !self.qualifications.is_empty() {
            parts.push(&self.qualifications);
        }
        parts.extend(self.must_have.iter().map(String::as_str));
        parts.extend(self.good_to_have.iter().map(String::as_str));
        parts.join(" ")
    }
}

fn split_comma_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_stored_list(field: &str, raw: &str) -> Result<Vec<String>> {
    if raw.trim().is_empty() {
        return Ok(Vec::new());
    }

    serde_json::from_str::<Vec<String>>(raw).map_err(|e| {
        RelevanceError::InvalidInput(format!(
            "{} is not a JSON array of strings: {}",
            field, e
        ))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes_terms() {
        let job = JobSpec::new(
            "  Data Engineer ",
            vec!["Python".into(), " SQL ".into(), "python".into(), "".into()],
            vec!["Docker".into(), "   ".into()],
            " BSc ",
        );

        assert_eq!(job.title(), "Data Engineer");
        assert_eq!(job.must_have(), ["python", "sql"]);
        assert_eq!(job.good_to_have(), ["docker"]);
        assert_eq!(job.qualifications(), "BSc");
    }

    #[test]
    fn test_from_form_splits_commas() {
        let job = JobSpec::from_form("Dev", "Python, SQL,, ,Rust", "", "");
        assert_eq!(job.must_have(), ["python", "sql", "rust"]);
        assert!(job.good_to_have().is_empty());
    }

    #[test]
    fn test_from_stored_parses_json_lists() {
        let job = JobSpec::from_stored("Dev", r#"["Python","SQL"]"#, "", "Degree").unwrap();
        assert_eq!(job.must_have(), ["python", "sql"]);
        assert!(job.good_to_have().is_empty());
    }

    #[test]
    fn test_from_stored_rejects_malformed_lists() {
        let err = JobSpec::from_stored("Dev", r#"{"python": true}"#, "[]", "").unwrap_err();
        assert!(matches!(err, RelevanceError::InvalidInput(_)));

        assert!(JobSpec::from_stored("Dev", "[]", "python, sql", "").is_err());
    }

    #[test]
    fn test_deserialize_goes_through_normalization() {
        let job: JobSpec = serde_json::from_str(
            r#"{"title": "Dev", "must_have": ["Rust", "rust", " Tokio "]}"#,
        )
        .unwrap();

        assert_eq!(job.must_have(), ["rust", "tokio"]);
        assert!(job.good_to_have().is_empty());
        assert_eq!(job.qualifications(), "");
    }

    #[test]
    fn test_descriptive_text_includes_everything() {
        let job = JobSpec::new("Dev", vec!["rust".into()], vec!["docker".into()], "CS degree");
        assert_eq!(job.descriptive_text(), "Dev CS degree rust docker");
    }
}
