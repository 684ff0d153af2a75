//! CLI interface for the relevance engine

use crate::config::OutputFormat;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resume-relevance")]
#[command(about = "Score resumes against structured job requirements")]
#[command(
    long_about = "Blend must-have/good-to-have keyword coverage with semantic similarity into a 0-100 relevance score, verdict and feedback"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate one or more resumes against a job file
    Evaluate {
        /// Job file (TOML or JSON)
        #[arg(short, long)]
        job: PathBuf,

        /// Resume files (PDF, TXT, MD)
        #[arg(short, long, num_args = 1.., required = true)]
        resume: Vec<PathBuf>,

        /// Output format: console, json, markdown
        #[arg(short, long, value_parser = parse_output_format)]
        output: Option<OutputFormat>,

        /// Save reports to this file, or into this directory for several resumes
        #[arg(short, long)]
        save: Option<PathBuf>,

        /// Skip generated summaries and feedback
        #[arg(long)]
        no_enrich: bool,

        /// Include the per-requirement breakdown
        #[arg(short, long)]
        detailed: bool,
    },

    /// Build a job file from comma-separated requirement lists
    Job {
        #[arg(short, long)]
        title: String,

        /// Comma-separated must-have skills
        #[arg(short, long, default_value = "")]
        must_have: String,

        /// Comma-separated good-to-have skills
        #[arg(short, long, default_value = "")]
        good_to_have: String,

        #[arg(short, long, default_value = "")]
        qualifications: String,

        /// Write the job to a .toml or .json file instead of stdout
        #[arg(short, long)]
        save: Option<PathBuf>,
    },

    /// Embedding model management
    Models {
        #[command(subcommand)]
        action: ModelAction,
    },

    /// Show or reset configuration
    Config {
        #[command(subcommand)]
        action: Option<ConfigAction>,
    },
}

#[derive(Subcommand)]
pub enum ModelAction {
    /// List available embedding models
    List,

    /// Download an embedding model
    Download {
        /// Model id, display name or Hugging Face repo id
        model: String,

        /// Force re-download if the model exists
        #[arg(short, long)]
        force: bool,
    },

    /// Show model information
    Info { model: String },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Reset configuration to defaults
    Reset,

    /// Print the configuration file location
    Path,
}

pub fn parse_output_format(format: &str) -> Result<OutputFormat, String> {
    match format.to_lowercase().as_str() {
        "console" => Ok(OutputFormat::Console),
        "json" => Ok(OutputFormat::Json),
        "markdown" | "md" => Ok(OutputFormat::Markdown),
        _ => Err(format!(
            "Invalid output format: {}. Supported: console, json, markdown",
            format
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_output_format() {
        assert_eq!(parse_output_format("JSON"), Ok(OutputFormat::Json));
        assert_eq!(parse_output_format("md"), Ok(OutputFormat::Markdown));
        assert!(parse_output_format("html").is_err());
    }

    #[test]
    fn test_evaluate_accepts_several_resumes() {
        let cli = Cli::try_parse_from([
            "resume-relevance",
            "evaluate",
            "--job",
            "job.toml",
            "--resume",
            "a.pdf",
            "b.md",
            "--output",
            "json",
            "--no-enrich",
        ])
        .unwrap();

        match cli.command {
            Commands::Evaluate {
                resume,
                output,
                no_enrich,
                ..
            } => {
                assert_eq!(resume.len(), 2);
                assert_eq!(output, Some(OutputFormat::Json));
                assert!(no_enrich);
            }
            _ => panic!("expected evaluate"),
        }
    }

    #[test]
    fn test_evaluate_requires_a_resume() {
        assert!(Cli::try_parse_from(["resume-relevance", "evaluate", "--job", "job.toml"]).is_err());
    }

    #[test]
    fn test_cli_definition() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }
}
