//! Deterministic fallback feedback, used whenever generated feedback is unavailable

use crate::processing::scoring::Verdict;
use std::collections::HashSet;

/// How many skills of each group are named before summarising the rest
const MAX_LISTED_SKILLS: usize = 5;

pub struct FeedbackSynthesizer {
    max_listed: usize,
}

impl Default for FeedbackSynthesizer {
    fn default() -> Self {
        Self {
            max_listed: MAX_LISTED_SKILLS,
        }
    }
}

impl FeedbackSynthesizer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build feedback naming the verdict and the missing skills.
    ///
    /// Only skills from `missing_skills` are ever mentioned; `must_terms`
    /// just decides which of them are reported as must-have.
    pub fn synthesize(
        &self,
        score: u8,
        verdict: Verdict,
        missing_skills: &[String],
        must_terms: &[String],
    ) -> String {
        let must_set: HashSet<&str> = must_terms.iter().map(String::as_str).collect();
        let (missing_must, missing_good): (Vec<&String>, Vec<&String>) = missing_skills
            .iter()
            .partition(|skill| must_set.contains(skill.as_str()));

        let mut feedback = format!(
            "Verdict: {} relevance ({}/100). {}",
            verdict,
            score,
            Self::verdict_guidance(verdict)
        );

        if missing_skills.is_empty() {
            feedback.push_str(" Every listed requirement was found in the resume.");
            return feedback;
        }

        if !missing_must.is_empty() {
            feedback.push_str(&format!(
                " Missing must-have skills: {}. Add concrete evidence of these (projects, roles, certifications) before applying.",
                self.list_skills(&missing_must)
            ));
        }

        if !missing_good.is_empty() {
            feedback.push_str(&format!(
                " Nice-to-have skills not found: {}. Mentioning any real exposure to these would strengthen the application.",
                self.list_skills(&missing_good)
            ));
        }

        feedback
    }

    fn verdict_guidance(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::High => "The resume is a strong fit for this role.",
            Verdict::Medium => "The resume partially fits this role.",
            Verdict::Low => "The resume currently shows a weak fit for this role.",
        }
    }

    fn list_skills(&self, skills: &[&String]) -> String {
        let listed: Vec<&str> = skills
            .iter()
            .take(self.max_listed)
            .map(|s| s.as_str())
            .collect();
        let remaining = skills.len().saturating_sub(self.max_listed);

        if remaining > 0 {
            format!("{} and {} more", listed.join(", "), remaining)
        } else {
            listed.join(", ")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_mentions_verdict_and_must_have_gaps() {
        let synthesizer = FeedbackSynthesizer::new();
        let feedback = synthesizer.synthesize(
            42,
            Verdict::Low,
            &strings(&["python", "docker"]),
            &strings(&["python", "sql"]),
        );

        assert!(feedback.contains("Low"));
        assert!(feedback.contains("42/100"));
        assert!(feedback.contains("Missing must-have skills: python."));
        assert!(feedback.contains("Nice-to-have skills not found: docker."));
    }

    #[test]
    fn test_nothing_missing() {
        let synthesizer = FeedbackSynthesizer::new();
        let feedback = synthesizer.synthesize(90, Verdict::High, &[], &strings(&["rust"]));

        assert!(feedback.contains("High"));
        assert!(feedback.contains("Every listed requirement was found"));
        assert!(!feedback.contains("Missing"));
    }

    #[test]
    fn test_never_mentions_skills_outside_missing_list() {
        let synthesizer = FeedbackSynthesizer::new();
        let feedback = synthesizer.synthesize(
            60,
            Verdict::Medium,
            &strings(&["docker"]),
            &strings(&["python", "sql"]),
        );

        assert!(!feedback.contains("python"));
        assert!(!feedback.contains("sql"));
        assert!(!feedback.contains("must-have skills"));
        assert!(feedback.contains("docker"));
    }

    #[test]
    fn test_long_lists_are_summarised() {
        let synthesizer = FeedbackSynthesizer::new();
        let missing = strings(&["a1", "b2", "c3", "d4", "e5", "f6", "g7"]);
        let feedback = synthesizer.synthesize(10, Verdict::Low, &missing, &missing);

        assert!(feedback.contains("a1, b2, c3, d4, e5 and 2 more"));
        assert!(!feedback.contains("f6"));
    }

    #[test]
    fn test_is_deterministic_and_non_empty() {
        let synthesizer = FeedbackSynthesizer::new();
        let missing = strings(&["go"]);
        let first = synthesizer.synthesize(55, Verdict::Medium, &missing, &missing);
        let second = synthesizer.synthesize(55, Verdict::Medium, &missing, &missing);

        assert_eq!(first, second);
        assert!(!first.is_empty());
    }
}
