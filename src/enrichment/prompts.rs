//! Prompt templates for generated summaries and improvement checklists

use crate::processing::evaluator::EvaluationResult;
use crate::processing::job::JobSpec;

const SUMMARY_TEMPLATE: &str = "You are a resume analyzer. Job title: {title}. Overall score: {score}%. \
Verdict: {verdict}. Missing skills: {missing}. \
Provide a short, one-paragraph summary of the candidate's fit for the job.";

const CHECKLIST_TEMPLATE: &str = "You are a resume coach. Job title: {title}. Must-have skills: {must}. \
Good-to-have: {good}. Candidate resume text: {resume}.\n\
Provide a short personalized improvement checklist (3-6 bullets) focusing on missing skills and how to show them.";

#[derive(Debug, Clone)]
pub struct PromptTemplates {
    pub summary: String,
    pub checklist: String,
}

impl Default for PromptTemplates {
    fn default() -> Self {
        Self {
            summary: SUMMARY_TEMPLATE.to_string(),
            checklist: CHECKLIST_TEMPLATE.to_string(),
        }
    }
}

impl PromptTemplates {
    pub fn render_summary(&self, job: &JobSpec, result: &EvaluationResult) -> String {
        let missing = if result.missing_skills.is_empty() {
            "None".to_string()
        } else {
            result.missing_skills.join(", ")
        };

        self.summary
            .replace("{title}", job.title())
            .replace("{score}", &result.score.to_string())
            .replace("{verdict}", &result.verdict.to_string())
            .replace("{missing}", &missing)
    }

    /// The resume is cut to `resume_char_limit` characters
    pub fn render_checklist(&self, job: &JobSpec, resume_text: &str, resume_char_limit: usize) -> String {
        let resume: String = resume_text.chars().take(resume_char_limit).collect();

        self.checklist
            .replace("{title}", job.title())
            .replace("{must}", &format_list(job.must_have()))
            .replace("{good}", &format_list(job.good_to_have()))
            .replace("{resume}", &resume)
    }
}

fn format_list(items: &[String]) -> String {
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::scoring::Verdict;
    use crate::processing::semantic::SemanticBackendKind;

    fn job() -> JobSpec {
        JobSpec::new(
            "Data Engineer",
            vec!["python".to_string(), "sql".to_string()],
            vec!["docker".to_string()],
            "",
        )
    }

    fn result(missing: &[&str]) -> EvaluationResult {
        EvaluationResult {
            score: 61,
            verdict: Verdict::Medium,
            hard_score: 75.0,
            semantic_score: 30.0,
            missing_skills: missing.iter().map(|s| s.to_string()).collect(),
            feedback: String::new(),
            semantic_backend: SemanticBackendKind::Statistical,
        }
    }

    #[test]
    fn test_summary_prompt() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_summary(&job(), &result(&["docker"]));

        assert!(prompt.contains("Job title: Data Engineer"));
        assert!(prompt.contains("Overall score: 61%"));
        assert!(prompt.contains("Verdict: Medium"));
        assert!(prompt.contains("Missing skills: docker."));
        assert!(!prompt.contains('{'));
    }

    #[test]
    fn test_summary_prompt_without_gaps() {
        let templates = PromptTemplates::default();
        let prompt = templates.render_summary(&job(), &result(&[]));
        assert!(prompt.contains("Missing skills: None."));
    }

    #[test]
    fn test_checklist_prompt_truncates_resume() {
        let templates = PromptTemplates::default();
        let resume = "é".repeat(50);
        let prompt = templates.render_checklist(&job(), &resume, 10);

        assert!(prompt.contains("Must-have skills: [python, sql]"));
        assert!(prompt.contains("Good-to-have: [docker]"));
        assert!(prompt.contains(&format!("Candidate resume text: {}.", "é".repeat(10))));
        assert!(!prompt.contains(&"é".repeat(11)));
        assert!(prompt.contains("3-6 bullets"));
    }
}
