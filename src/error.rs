//! Error handling for the relevance engine and its collaborators

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RelevanceError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("PDF extraction error: {0}")]
    PdfExtraction(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The similarity backend could not be loaded. Recovered inside the
    /// semantic matcher; never returned from an evaluation.
    #[error("Similarity model unavailable: {0}")]
    ModelUnavailable(String),

    #[error("Model error: {0}")]
    ModelError(String),

    #[error("Model not found: {0}")]
    ModelNotFound(String),

    /// External text generation failed. Swallowed at the enrichment call site.
    #[error("Enrichment failed: {0}")]
    Enrichment(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("File format not supported: {0}")]
    UnsupportedFormat(String),

    #[error("Network error: {0}")]
    Network(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, RelevanceError>;

/// model2vec-rs reports load failures as anyhow errors
impl From<anyhow::Error> for RelevanceError {
    fn from(err: anyhow::Error) -> Self {
        RelevanceError::ModelUnavailable(err.to_string())
    }
}

impl From<reqwest::Error> for RelevanceError {
    fn from(err: reqwest::Error) -> Self {
        RelevanceError::Network(err.to_string())
    }
}

impl From<toml::de::Error> for RelevanceError {
    fn from(err: toml::de::Error) -> Self {
        RelevanceError::Configuration(format!("Failed to parse TOML: {}", err))
    }
}

impl From<toml::ser::Error> for RelevanceError {
    fn from(err: toml::ser::Error) -> Self {
        RelevanceError::Configuration(format!("Failed to serialize TOML: {}", err))
    }
}
