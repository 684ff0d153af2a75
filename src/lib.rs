//! Resume relevance scoring against structured job requirements

pub mod cli;
pub mod config;
pub mod enrichment;
pub mod error;
pub mod input;
pub mod output;
pub mod processing;

pub use config::Config;
pub use error::{RelevanceError, Result};
pub use processing::evaluator::{EvaluationResult, Evaluator};
pub use processing::job::JobSpec;
pub use processing::scoring::Verdict;
