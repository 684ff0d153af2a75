//! Report model and formatters

pub mod formatter;
pub mod report;

pub use formatter::{
    plan_report_paths, save_report_to_file, suggest_filename, OutputFormatter, ReportGenerator,
};
pub use report::{EvaluationReport, ReportMetadata};
