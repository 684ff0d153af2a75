//! Console, JSON and Markdown renderings of an evaluation report

use crate::config::OutputFormat;
use crate::enrichment::ContentSource;
use crate::error::Result;
use crate::output::report::EvaluationReport;
use crate::processing::scoring::Verdict;
use colored::{Color, Colorize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};

pub trait OutputFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

pub struct ConsoleFormatter {
    use_colors: bool,
    detailed: bool,
}

pub struct JsonFormatter {
    pretty: bool,
}

pub struct MarkdownFormatter {
    include_metadata: bool,
}

/// Picks the formatter for a requested output format
pub struct ReportGenerator {
    console_formatter: ConsoleFormatter,
    json_formatter: JsonFormatter,
    markdown_formatter: MarkdownFormatter,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool, detailed: bool) -> Self {
        Self { use_colors, detailed }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str, level: u8) -> String {
        let (prefix, color) = match level {
            1 => ("█", Color::Blue),
            2 => ("▓", Color::Green),
            _ => ("▒", Color::Yellow),
        };

        if self.use_colors {
            format!("\n{} {}\n", prefix.color(color).bold(), title.color(color).bold())
        } else {
            format!("\n{} {}\n", prefix, title)
        }
    }

    fn format_verdict_badge(&self, verdict: Verdict) -> String {
        let color = match verdict {
            Verdict::High => Color::Green,
            Verdict::Medium => Color::Yellow,
            Verdict::Low => Color::Red,
        };
        let label = verdict.to_string().to_uppercase();

        if self.use_colors {
            format!("[{}]", label.color(color).bold())
        } else {
            format!("[{}]", label)
        }
    }

    fn format_term_list(&self, terms: &[String], color: Color) -> String {
        if terms.is_empty() {
            "none".to_string()
        } else {
            self.colorize(&terms.join(", "), color)
        }
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let evaluation = &report.evaluation.evaluation;
        let mut output = String::new();

        output.push_str(&self.format_header("RESUME RELEVANCE", 1));
        output.push_str(&format!(
            "Job: {} | Resume: {}\n",
            report.job.title(),
            report.metadata.resume_file
        ));

        output.push_str(&self.format_header("Score", 2));
        output.push_str(&format!(
            "Relevance: {}/100 {}\n",
            evaluation.score,
            self.format_verdict_badge(evaluation.verdict)
        ));
        output.push_str(&format!(
            "Hard match: {:.2} | Semantic match: {:.2} ({})\n",
            evaluation.hard_score, evaluation.semantic_score, evaluation.semantic_backend
        ));
        output.push_str(&format!(
            "Missing skills: {}\n",
            self.format_term_list(&evaluation.missing_skills, Color::Red)
        ));

        output.push_str(&self.format_header("Summary", 2));
        output.push_str(&report.evaluation.summary);
        output.push('\n');

        output.push_str(&self.format_header("Feedback", 2));
        output.push_str(&evaluation.feedback);
        output.push('\n');

        if self.detailed {
            if let Some(hard_match) = &report.hard_match {
                output.push_str(&self.format_header("Requirement Breakdown", 3));
                output.push_str(&format!(
                    "Must-have matched ({}/{}): {}\n",
                    hard_match.matched_must.len(),
                    hard_match.total_must,
                    self.format_term_list(&hard_match.matched_must, Color::Green)
                ));
                output.push_str(&format!(
                    "Good-to-have matched ({}/{}): {}\n",
                    hard_match.matched_good.len(),
                    hard_match.total_good,
                    self.format_term_list(&hard_match.matched_good, Color::Green)
                ));
            }

            output.push_str(&format!(
                "\nSummary: {} | Feedback: {} | {}ms\n",
                source_label(report.evaluation.summary_source),
                source_label(report.evaluation.feedback_source),
                report.metadata.processing_time_ms
            ));
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl MarkdownFormatter {
    pub fn new(include_metadata: bool) -> Self {
        Self { include_metadata }
    }

    fn verdict_badge(verdict: Verdict) -> &'static str {
        match verdict {
            Verdict::High => "🟢 High",
            Verdict::Medium => "🟡 Medium",
            Verdict::Low => "🔴 Low",
        }
    }
}

impl OutputFormatter for MarkdownFormatter {
    fn format_report(&self, report: &EvaluationReport) -> Result<String> {
        let evaluation = &report.evaluation.evaluation;
        let mut output = String::new();

        output.push_str(&format!("# Resume Relevance: {}\n\n", report.job.title()));

        if self.include_metadata {
            output.push_str(&format!(
                "**Generated:** {} | **Processing Time:** {}ms\n",
                report.metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
                report.metadata.processing_time_ms
            ));
            output.push_str(&format!(
                "**Resume:** `{}` | **Job:** `{}`\n\n",
                file_name(&report.metadata.resume_file),
                file_name(&report.metadata.job_file)
            ));
        }

        output.push_str("## Result\n\n");
        output.push_str(&format!(
            "**Relevance Score:** {}/100 {}\n\n",
            evaluation.score,
            Self::verdict_badge(evaluation.verdict)
        ));
        output.push_str("| Component | Score |\n");
        output.push_str("|-----------|-------|\n");
        output.push_str(&format!("| Hard match | {:.2} |\n", evaluation.hard_score));
        output.push_str(&format!(
            "| Semantic match ({}) | {:.2} |\n\n",
            evaluation.semantic_backend, evaluation.semantic_score
        ));

        output.push_str("## Missing Skills\n\n");
        if evaluation.missing_skills.is_empty() {
            output.push_str("None\n\n");
        } else {
            for skill in &evaluation.missing_skills {
                output.push_str(&format!("- {}\n", skill));
            }
            output.push('\n');
        }

        output.push_str("## Summary\n\n");
        output.push_str(&report.evaluation.summary);
        output.push_str("\n\n## Feedback\n\n");
        output.push_str(&evaluation.feedback);
        output.push('\n');

        if let Some(hard_match) = &report.hard_match {
            output.push_str("\n## Requirement Breakdown\n\n");
            output.push_str("| Requirement | Kind | Found |\n");
            output.push_str("|-------------|------|-------|\n");
            for term in report.job.must_have() {
                let found = hard_match.matched_must.contains(term);
                output.push_str(&format!("| {} | must-have | {} |\n", term, check_mark(found)));
            }
            for term in report.job.good_to_have() {
                if report.job.must_have().contains(term) {
                    continue;
                }
                let found = hard_match.matched_good.contains(term);
                output.push_str(&format!("| {} | good-to-have | {} |\n", term, check_mark(found)));
            }
        }

        Ok(output)
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Markdown
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, false, true, true)
    }

    pub fn with_options(use_colors: bool, detailed: bool, pretty_json: bool, include_metadata: bool) -> Self {
        Self {
            console_formatter: ConsoleFormatter::new(use_colors, detailed),
            json_formatter: JsonFormatter::new(pretty_json),
            markdown_formatter: MarkdownFormatter::new(include_metadata),
        }
    }

    pub fn generate_report(&self, report: &EvaluationReport, format: &OutputFormat) -> Result<String> {
        match format {
            OutputFormat::Console => self.console_formatter.format_report(report),
            OutputFormat::Json => self.json_formatter.format_report(report),
            OutputFormat::Markdown => self.markdown_formatter.format_report(report),
        }
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

fn source_label(source: ContentSource) -> &'static str {
    match source {
        ContentSource::Generated => "generated",
        ContentSource::Fallback => "fallback",
    }
}

fn check_mark(found: bool) -> &'static str {
    if found {
        "✅"
    } else {
        "❌"
    }
}

fn file_name(path: &str) -> String {
    Path::new(path)
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_else(|| path.to_string())
}

pub fn save_report_to_file(content: &str, file_path: &Path) -> Result<()> {
    if let Some(parent) = file_path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(file_path, content)?;
    Ok(())
}

pub fn suggest_filename(format: &OutputFormat, resume_name: &str, timestamp: bool) -> String {
    let base_name = Path::new(resume_name)
        .file_stem()
        .unwrap_or_default()
        .to_string_lossy();

    let timestamp_suffix = if timestamp {
        format!("_{}", chrono::Utc::now().format("%Y%m%d_%H%M%S"))
    } else {
        String::new()
    };

    let extension = match format {
        OutputFormat::Console => "txt",
        OutputFormat::Json => "json",
        OutputFormat::Markdown => "md",
    };

    format!("{}_relevance{}.{}", base_name, timestamp_suffix, extension)
}

/// Report file for each resume, in order.
///
/// A single resume saved to a non-directory target writes to `target`
/// itself. Otherwise every resume gets a suggested name inside `target`;
/// names that collide within the batch (same file stem from different
/// folders) get a numeric suffix, so no report overwrites another.
pub fn plan_report_paths(target: &Path, resumes: &[PathBuf], format: &OutputFormat) -> Vec<PathBuf> {
    if resumes.len() <= 1 && !target.is_dir() {
        return resumes.iter().map(|_| target.to_path_buf()).collect();
    }

    let mut used = HashSet::new();
    resumes
        .iter()
        .map(|resume| {
            let name = suggest_filename(format, &resume.to_string_lossy(), false);
            let (stem, extension) = name.rsplit_once('.').unwrap_or((name.as_str(), "txt"));

            let mut candidate = name.clone();
            let mut index = 2;
            while !used.insert(candidate.clone()) {
                candidate = format!("{}_{}.{}", stem, index, extension);
                index += 1;
            }
            target.join(candidate)
        })
        .collect()
}
